//! Run-time synchronization fault types.
//!
//! Faults are domain errors raised by the synchronization interpreter when
//! the action script misuses a primitive. They are reported on the
//! engine's diagnostic side-channel and the offending action is dropped;
//! the simulation itself continues unperturbed and never unwinds out of
//! `tick()`.

use std::fmt;

use crate::id::ProcId;
use crate::record::SyncOp;

/// A scripted action that misused a synchronization primitive.
///
/// The faulted action alters no primitive state and logs no event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncFault {
    /// READ or WRITE against a mutex the issuer does not own.
    NotOwner {
        /// The issuing process.
        proc: ProcId,
        /// The mutex name.
        resource: String,
        /// The attempted operation (READ or WRITE).
        op: SyncOp,
    },
    /// The named resource does not exist. For READ/WRITE this also aborts
    /// the remainder of the cycle's action scan.
    UnknownResource {
        /// The issuing process.
        proc: ProcId,
        /// The unknown name.
        resource: String,
        /// The attempted operation.
        op: SyncOp,
    },
    /// A mutex operation aimed at a semaphore, or vice versa.
    WrongPrimitive {
        /// The issuing process.
        proc: ProcId,
        /// The resource name.
        resource: String,
        /// The attempted operation.
        op: SyncOp,
    },
    /// ACQUIRE by the process that already owns the mutex.
    DoubleAcquire {
        /// The issuing process (current owner).
        proc: ProcId,
        /// The mutex name.
        resource: String,
    },
    /// ACQUIRE by a process that was handed the mutex automatically
    /// earlier in the same cycle.
    ReacquireAfterHandoff {
        /// The issuing process (new owner via hand-off).
        proc: ProcId,
        /// The mutex name.
        resource: String,
    },
    /// RELEASE by a process that is not the current owner.
    UnauthorizedRelease {
        /// The issuing process.
        proc: ProcId,
        /// The mutex name.
        resource: String,
    },
}

impl fmt::Display for SyncFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOwner { proc, resource, op } => {
                write!(f, "process {proc}: {op} on mutex '{resource}' without ownership")
            }
            Self::UnknownResource { proc, resource, op } => {
                write!(f, "process {proc}: {op} on unknown resource '{resource}'")
            }
            Self::WrongPrimitive { proc, resource, op } => {
                write!(f, "process {proc}: {op} not applicable to resource '{resource}'")
            }
            Self::DoubleAcquire { proc, resource } => {
                write!(f, "process {proc}: already owns mutex '{resource}'")
            }
            Self::ReacquireAfterHandoff { proc, resource } => {
                write!(
                    f,
                    "process {proc}: mutex '{resource}' was already granted by hand-off this cycle"
                )
            }
            Self::UnauthorizedRelease { proc, resource } => {
                write!(f, "process {proc}: RELEASE of mutex '{resource}' it does not own")
            }
        }
    }
}

impl std::error::Error for SyncFault {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_process_and_resource() {
        let fault = SyncFault::DoubleAcquire {
            proc: ProcId(2),
            resource: "M".into(),
        };
        let msg = format!("{fault}");
        assert!(msg.contains("2"));
        assert!(msg.contains("'M'"));
    }
}
