//! Mutable per-run process state.

use tempo_core::{Cycle, ProcState, ProcessSpec};

/// Run-time state of one simulated process.
///
/// Created from a [`ProcessSpec`] at every reset and retained for the whole
/// run — completion never removes a task, it only records the completion
/// cycle. `remaining` starts at the burst and is non-increasing; it never
/// goes negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub(crate) pid: String,
    pub(crate) burst: u32,
    pub(crate) arrival: u32,
    pub(crate) priority: i32,
    pub(crate) remaining: u32,
    pub(crate) completion: Option<Cycle>,
    pub(crate) state: ProcState,
    pub(crate) granted_by_handoff: bool,
}

impl Task {
    pub(crate) fn from_spec(spec: &ProcessSpec) -> Self {
        Self {
            pid: spec.pid.clone(),
            burst: spec.burst,
            arrival: spec.arrival,
            priority: spec.priority,
            remaining: spec.burst,
            completion: None,
            state: ProcState::Ready,
            granted_by_handoff: false,
        }
    }

    /// Whether the process has arrived by `cycle` and may be selected.
    pub(crate) fn arrived_by(&self, cycle: Cycle) -> bool {
        Cycle::from(self.arrival) <= cycle
    }

    /// The process identifier.
    pub fn pid(&self) -> &str {
        &self.pid
    }

    /// Original service length in cycles.
    pub fn burst(&self) -> u32 {
        self.burst
    }

    /// Arrival cycle.
    pub fn arrival(&self) -> u32 {
        self.arrival
    }

    /// Scheduling priority (smaller = higher).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Cycles of service still owed.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// The cycle after the one in which the last owed cycle ran, or `None`
    /// while the process is unfinished.
    pub fn completion(&self) -> Option<Cycle> {
        self.completion
    }

    /// Current liveness state.
    pub fn state(&self) -> ProcState {
        self.state
    }

    /// Whether the process received a mutex by automatic hand-off in the
    /// cycle currently being interpreted.
    pub fn granted_by_handoff(&self) -> bool {
        self.granted_by_handoff
    }

    /// Whether all owed service has been delivered.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_spec_initializes_run_state() {
        let task = Task::from_spec(&ProcessSpec {
            pid: "A".into(),
            burst: 4,
            arrival: 2,
            priority: 1,
        });
        assert_eq!(task.remaining(), 4);
        assert_eq!(task.completion(), None);
        assert_eq!(task.state(), ProcState::Ready);
        assert!(!task.granted_by_handoff());
    }

    #[test]
    fn arrival_gate() {
        let task = Task::from_spec(&ProcessSpec {
            pid: "A".into(),
            burst: 1,
            arrival: 3,
            priority: 0,
        });
        assert!(!task.arrived_by(Cycle(2)));
        assert!(task.arrived_by(Cycle(3)));
        assert!(task.arrived_by(Cycle(4)));
    }
}
