//! The synchronization event record and its vocabulary.
//!
//! Every synchronization action that takes effect (or blocks) appends one
//! or more [`SyncEvent`]s to the engine's log. The log is what a timeline
//! front-end renders: one row per process, one marker per event.

use std::fmt;

use crate::id::{Cycle, ProcId};
use crate::record::SyncOp;

/// Outcome of one synchronization attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The process obtained the resource (or completed the operation).
    Accessed,
    /// The process blocked and was parked on the wait queue.
    Waiting,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accessed => "ACCESSED",
            Self::Waiting => "WAITING",
        })
    }
}

/// Action tag carried by a logged event.
///
/// Extends [`SyncOp`] with the synthetic `Wake` marker emitted when a
/// blocked process is released by a SIGNAL. `Wake` never appears in the
/// input script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventAction {
    /// Read access.
    Read,
    /// Write access.
    Write,
    /// Mutex acquisition (scripted or automatic hand-off).
    Acquire,
    /// Mutex release.
    Release,
    /// Semaphore decrement.
    Wait,
    /// Semaphore increment / waiter wake-up.
    Signal,
    /// Synthetic marker: a blocked process was unblocked. Always followed
    /// in the same cycle by a replay of the originally blocked action.
    Wake,
}

impl From<SyncOp> for EventAction {
    fn from(op: SyncOp) -> Self {
        match op {
            SyncOp::Read => Self::Read,
            SyncOp::Write => Self::Write,
            SyncOp::Acquire => Self::Acquire,
            SyncOp::Release => Self::Release,
            SyncOp::Wait => Self::Wait,
            SyncOp::Signal => Self::Signal,
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Acquire => "ACQUIRE",
            Self::Release => "RELEASE",
            Self::Wait => "WAIT",
            Self::Signal => "SIGNAL",
            Self::Wake => "WAKE",
        })
    }
}

/// One entry in the synchronization event log.
///
/// The log is kept sorted by [`sort_key`](SyncEvent::sort_key) — cycle
/// ascending, then process handle ascending. The sort must be stable:
/// within a single (cycle, process) bucket the interpreter's emission
/// order (RELEASE before the automatic ACQUIRE, SIGNAL before WAKE before
/// the replayed access) is what the timeline renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncEvent {
    /// Cycle at which the event occurred.
    pub cycle: Cycle,
    /// Handle of the process the event belongs to.
    pub proc: ProcId,
    /// Name of the resource involved.
    pub resource: String,
    /// Whether the attempt succeeded or blocked.
    pub outcome: Outcome,
    /// The action tag to render.
    pub action: EventAction,
}

impl SyncEvent {
    /// Rendering sort key: `(cycle, proc)`.
    pub fn sort_key(&self) -> (Cycle, ProcId) {
        (self.cycle, self.proc)
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] p{} {} {} {}",
            self.cycle, self.proc, self.resource, self.action, self.outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(cycle: i64, proc: u32) -> SyncEvent {
        SyncEvent {
            cycle: Cycle(cycle),
            proc: ProcId(proc),
            resource: "R".into(),
            outcome: Outcome::Accessed,
            action: EventAction::Read,
        }
    }

    #[test]
    fn sort_key_orders_by_cycle_then_proc() {
        let mut log = vec![ev(2, 0), ev(0, 1), ev(0, 0), ev(1, 3)];
        log.sort_by_key(SyncEvent::sort_key);
        let keys: Vec<_> = log.iter().map(|e| (e.cycle.0, e.proc.0)).collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (1, 3), (2, 0)]);
    }

    #[test]
    fn event_action_preserves_op() {
        assert_eq!(EventAction::from(SyncOp::Wait), EventAction::Wait);
        assert_eq!(EventAction::from(SyncOp::Signal), EventAction::Signal);
    }

    #[test]
    fn display_is_render_friendly() {
        let e = ev(3, 1);
        assert_eq!(format!("{e}"), "[3] p1 R READ ACCESSED");
    }
}
