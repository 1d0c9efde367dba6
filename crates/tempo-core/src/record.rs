//! Immutable input records: processes, resources, and scripted actions.
//!
//! These are the three input vectors handed to the engine at construction.
//! The engine copies them into mutable run state at reset and never
//! modifies the originals.

use std::fmt;

use crate::id::Cycle;

/// Reserved execution-history sentinel recorded when no process holds the
/// CPU. Must not be used as a process identifier.
pub const IDLE_LABEL: &str = "idle";

/// Description of one simulated process.
///
/// # Examples
///
/// ```
/// use tempo_core::ProcessSpec;
///
/// let p = ProcessSpec {
///     pid: "P1".into(),
///     burst: 5,
///     arrival: 0,
///     priority: 2,
/// };
///
/// assert_eq!(p.burst, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Opaque identifier, unique within a run. `"idle"` is reserved.
    pub pid: String,
    /// Original service length in cycles.
    pub burst: u32,
    /// Cycle at which the process becomes available to run.
    pub arrival: u32,
    /// Scheduling priority; a smaller value means higher priority.
    pub priority: i32,
}

/// Description of one named synchronization resource.
///
/// Capacity 1 gives the resource mutex semantics (exclusive owner, FIFO
/// hand-off); any other capacity gives a counting semaphore with that
/// initial count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Opaque resource name, unique within a run.
    pub name: String,
    /// Capacity count. 1 ⇒ mutex; otherwise ⇒ counting semaphore.
    pub capacity: u32,
}

impl ResourceSpec {
    /// Whether this resource carries mutex semantics.
    pub fn is_mutex(&self) -> bool {
        self.capacity == 1
    }
}

/// One timed synchronization action from the input script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSpec {
    /// Identifier of the issuing process.
    pub pid: String,
    /// The operation to perform.
    pub op: SyncOp,
    /// Name of the target resource.
    pub resource: String,
    /// Cycle at which the action fires.
    pub cycle: u32,
}

impl ActionSpec {
    /// The firing cycle as an engine [`Cycle`].
    pub fn fire_cycle(&self) -> Cycle {
        Cycle::from(self.cycle)
    }
}

/// A scriptable synchronization operation.
///
/// These are the six operation tokens accepted in the action input vector.
/// The synthetic `WAKE` event is not scriptable; see
/// [`EventAction`](crate::event::EventAction).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncOp {
    /// Read access to a resource.
    Read,
    /// Write access to a resource.
    Write,
    /// Take exclusive ownership of a mutex.
    Acquire,
    /// Give up exclusive ownership of a mutex.
    Release,
    /// Decrement a semaphore, blocking when exhausted.
    Wait,
    /// Increment a semaphore or wake its head waiter.
    Signal,
}

impl SyncOp {
    /// Parse an input-file token (`"READ"`, `"WRITE"`, ...).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "READ" => Some(Self::Read),
            "WRITE" => Some(Self::Write),
            "ACQUIRE" => Some(Self::Acquire),
            "RELEASE" => Some(Self::Release),
            "WAIT" => Some(Self::Wait),
            "SIGNAL" => Some(Self::Signal),
            _ => None,
        }
    }

    /// The canonical input-file token for this operation.
    pub fn token(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Acquire => "ACQUIRE",
            Self::Release => "RELEASE",
            Self::Wait => "WAIT",
            Self::Signal => "SIGNAL",
        }
    }
}

impl fmt::Display for SyncOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        for op in [
            SyncOp::Read,
            SyncOp::Write,
            SyncOp::Acquire,
            SyncOp::Release,
            SyncOp::Wait,
            SyncOp::Signal,
        ] {
            assert_eq!(SyncOp::from_token(op.token()), Some(op));
        }
    }

    #[test]
    fn unknown_token_rejected() {
        assert_eq!(SyncOp::from_token("LOCK"), None);
        assert_eq!(SyncOp::from_token("read"), None);
        assert_eq!(SyncOp::from_token(""), None);
    }

    #[test]
    fn capacity_one_is_mutex() {
        let m = ResourceSpec {
            name: "M".into(),
            capacity: 1,
        };
        let s = ResourceSpec {
            name: "S".into(),
            capacity: 3,
        };
        assert!(m.is_mutex());
        assert!(!s.is_mutex());
    }
}
