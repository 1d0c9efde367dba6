//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] bundles the three immutable input vectors with the
//! initial scheduling discipline. [`validate()`](EngineConfig::validate)
//! checks structural invariants at construction; run-time misuse of
//! primitives is a separate concern handled by the interpreter's fault
//! side-channel.

use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use tempo_core::{ActionSpec, ProcessSpec, ResourceSpec, SchedPolicy, SimMode, IDLE_LABEL};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Two processes share the same identifier.
    DuplicatePid {
        /// The repeated identifier.
        pid: String,
    },
    /// A process uses the reserved execution-history sentinel as its id.
    ReservedPid,
    /// Two resources share the same name.
    DuplicateResource {
        /// The repeated name.
        name: String,
    },
    /// The Round-Robin quantum is zero.
    ZeroQuantum,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePid { pid } => write!(f, "duplicate process id '{pid}'"),
            Self::ReservedPid => {
                write!(f, "process id '{IDLE_LABEL}' is reserved for the execution history")
            }
            Self::DuplicateResource { name } => write!(f, "duplicate resource name '{name}'"),
            Self::ZeroQuantum => write!(f, "rr_quantum must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for constructing an [`Engine`](crate::Engine).
///
/// The process, resource, and action vectors are stored as-is; the engine
/// copies them into mutable run state at every reset. Actions may
/// reference unknown pids or resources — those are skipped or faulted at
/// run time, not rejected here.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Process descriptions, in input order. `ProcId(n)` is `processes[n]`.
    pub processes: Vec<ProcessSpec>,
    /// Named resources; capacity decides mutex vs. semaphore semantics.
    pub resources: Vec<ResourceSpec>,
    /// The timed synchronization script, in firing-priority order.
    pub actions: Vec<ActionSpec>,
    /// Initial scheduling discipline.
    pub policy: SchedPolicy,
    /// Round-Robin time slice in cycles. Ignored by other policies.
    pub rr_quantum: u32,
    /// Initial mode. Defaults to scheduling.
    pub mode: SimMode,
}

impl EngineConfig {
    /// Bundle the input vectors with a discipline, using a quantum of 1
    /// and scheduling mode.
    pub fn new(
        processes: Vec<ProcessSpec>,
        resources: Vec<ResourceSpec>,
        actions: Vec<ActionSpec>,
        policy: SchedPolicy,
    ) -> Self {
        Self {
            processes,
            resources,
            actions,
            policy,
            rr_quantum: 1,
            mode: SimMode::Scheduling,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut pids = HashSet::new();
        for p in &self.processes {
            if p.pid == IDLE_LABEL {
                return Err(ConfigError::ReservedPid);
            }
            if !pids.insert(p.pid.as_str()) {
                return Err(ConfigError::DuplicatePid { pid: p.pid.clone() });
            }
        }

        let mut names = HashSet::new();
        for r in &self.resources {
            if !names.insert(r.name.as_str()) {
                return Err(ConfigError::DuplicateResource {
                    name: r.name.clone(),
                });
            }
        }

        if self.rr_quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc_spec(pid: &str) -> ProcessSpec {
        ProcessSpec {
            pid: pid.into(),
            burst: 1,
            arrival: 0,
            priority: 0,
        }
    }

    fn valid_config() -> EngineConfig {
        EngineConfig::new(
            vec![proc_spec("A"), proc_spec("B")],
            vec![ResourceSpec {
                name: "M".into(),
                capacity: 1,
            }],
            vec![],
            SchedPolicy::Fifo,
        )
    }

    #[test]
    fn validate_valid_config_succeeds() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_duplicate_pid_fails() {
        let mut cfg = valid_config();
        cfg.processes.push(proc_spec("A"));
        match cfg.validate() {
            Err(ConfigError::DuplicatePid { pid }) => assert_eq!(pid, "A"),
            other => panic!("expected DuplicatePid, got {other:?}"),
        }
    }

    #[test]
    fn validate_reserved_pid_fails() {
        let mut cfg = valid_config();
        cfg.processes.push(proc_spec("idle"));
        assert_eq!(cfg.validate(), Err(ConfigError::ReservedPid));
    }

    #[test]
    fn validate_duplicate_resource_fails() {
        let mut cfg = valid_config();
        cfg.resources.push(ResourceSpec {
            name: "M".into(),
            capacity: 4,
        });
        match cfg.validate() {
            Err(ConfigError::DuplicateResource { name }) => assert_eq!(name, "M"),
            other => panic!("expected DuplicateResource, got {other:?}"),
        }
    }

    #[test]
    fn validate_zero_quantum_fails() {
        let mut cfg = valid_config();
        cfg.rr_quantum = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroQuantum));
    }

    #[test]
    fn actions_may_reference_unknown_names() {
        // Unknown pids/resources in the script are a run-time concern.
        let mut cfg = valid_config();
        cfg.actions.push(ActionSpec {
            pid: "ghost".into(),
            op: tempo_core::SyncOp::Signal,
            resource: "nowhere".into(),
            cycle: 0,
        });
        assert!(cfg.validate().is_ok());
    }
}
