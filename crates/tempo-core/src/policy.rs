//! Scheduling disciplines, engine modes, and process liveness states.

use std::fmt;

/// The five supported scheduling disciplines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchedPolicy {
    /// First-in first-out; non-preemptive.
    Fifo,
    /// Shortest Job First by original burst; non-preemptive, pre-loaded.
    Sjf,
    /// Shortest Remaining Time; preemptive.
    Srt,
    /// Round Robin with a configurable quantum; preemptive.
    RoundRobin,
    /// Smallest-priority-value first; preemptive, pre-loaded.
    Priority,
}

impl SchedPolicy {
    /// Whether the scheduler is consulted on every tick (preemptive
    /// policies) rather than only when the CPU is idle.
    pub fn preempts_every_cycle(self) -> bool {
        matches!(self, Self::Srt | Self::RoundRobin | Self::Priority)
    }

    /// Whether processes enter the ready queue at their arrival cycle.
    ///
    /// Policies that return `false` pre-load the entire ready queue at
    /// reset and gate candidate selection on arrival instead.
    pub fn admits_arrivals(self) -> bool {
        matches!(self, Self::Fifo | Self::Srt | Self::RoundRobin)
    }

    /// Whether reset pre-populates the ready queue with every process.
    pub fn preloads_ready_queue(self) -> bool {
        !self.admits_arrivals()
    }
}

impl fmt::Display for SchedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fifo => "FIFO",
            Self::Sjf => "SJF",
            Self::Srt => "SRT",
            Self::RoundRobin => "RR",
            Self::Priority => "PRIORITY",
        };
        f.write_str(name)
    }
}

/// What a `tick()` advances: the scheduler or the synchronization script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SimMode {
    /// Admit arrivals, run the scheduling discipline, execute the CPU.
    #[default]
    Scheduling,
    /// Interpret the scripted synchronization actions for the cycle.
    Synchronization,
}

/// Liveness state of a simulated process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProcState {
    /// Eligible to be picked by the scheduler.
    #[default]
    Ready,
    /// Currently holding the CPU. At most one process at a time.
    Running,
    /// Parked on a mutex or semaphore wait queue.
    Blocked,
}
