//! The engine facade: owns all mutable simulation state.
//!
//! [`Engine`] is the single user-facing entry point. Each
//! [`tick()`](Engine::tick) advances exactly one cycle of either the
//! scheduler or the synchronization interpreter; every other public method
//! is a read-only view or a trivial setter. All mutation happens inside
//! `tick()` and [`reset()`](Engine::reset), so callers observe a
//! consistent snapshot between calls.
//!
//! # Ownership model
//!
//! `Engine` owns the immutable input vectors (kept for reset), the task
//! table, the primitive table, both logs, and the scheduler bookkeeping.
//! Everything is referenced by [`ProcId`] handle; no internal references
//! borrow across tick boundaries.

use std::collections::VecDeque;
use std::fmt;

use indexmap::IndexMap;
use tempo_core::{
    ActionSpec, Cycle, ProcId, ProcessSpec, ResourceSpec, SchedPolicy, SimMode, SyncEvent,
    SyncFault, IDLE_LABEL,
};

use crate::config::{ConfigError, EngineConfig};
use crate::sync::Primitive;
use crate::task::Task;

/// Deterministic, cycle-stepped simulator of process scheduling and
/// inter-process synchronization.
///
/// # Example
///
/// ```
/// use tempo_core::{ProcessSpec, SchedPolicy};
/// use tempo_engine::{Engine, EngineConfig};
///
/// let config = EngineConfig::new(
///     vec![
///         ProcessSpec { pid: "A".into(), burst: 2, arrival: 0, priority: 0 },
///         ProcessSpec { pid: "B".into(), burst: 1, arrival: 0, priority: 0 },
///     ],
///     vec![],
///     vec![],
///     SchedPolicy::Fifo,
/// );
/// let mut engine = Engine::new(config).unwrap();
/// while !engine.is_finished() {
///     engine.tick();
/// }
/// assert_eq!(engine.history_labels(), ["A", "A", "B"]);
/// ```
pub struct Engine {
    // Originals, retained for reset.
    pub(crate) processes: Vec<ProcessSpec>,
    pub(crate) resources: Vec<ResourceSpec>,
    pub(crate) actions: Vec<ActionSpec>,

    pub(crate) policy: SchedPolicy,
    pub(crate) mode: SimMode,
    pub(crate) rr_quantum: u32,

    // Mutable run state, rebuilt by reset().
    pub(crate) tasks: Vec<Task>,
    pub(crate) primitives: IndexMap<String, Primitive>,
    pub(crate) ready: VecDeque<ProcId>,
    pub(crate) running: Option<ProcId>,
    pub(crate) history: Vec<Option<ProcId>>,
    pub(crate) sync_log: Vec<SyncEvent>,
    pub(crate) faults: Vec<SyncFault>,
    pub(crate) cycle: Cycle,
    pub(crate) rr_counter: u32,
    pub(crate) max_sync_cycle: Cycle,
}

impl Engine {
    /// Construct an engine from a validated configuration.
    ///
    /// Stores the input vectors and calls [`reset()`](Engine::reset).
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let EngineConfig {
            processes,
            resources,
            actions,
            policy,
            rr_quantum,
            mode,
        } = config;

        let mut engine = Self {
            processes,
            resources,
            actions,
            policy,
            mode,
            rr_quantum,
            tasks: Vec::new(),
            primitives: IndexMap::new(),
            ready: VecDeque::new(),
            running: None,
            history: Vec::new(),
            sync_log: Vec::new(),
            faults: Vec::new(),
            cycle: Cycle::START,
            rr_counter: 0,
            max_sync_cycle: Cycle(0),
        };
        engine.reset();
        Ok(engine)
    }

    /// Restore the engine to its freshly constructed state.
    ///
    /// Copies the originals into the task table, rebuilds every primitive
    /// from the resource list, clears the ready queue, execution history,
    /// event log, and fault log, and rewinds the cycle counter to −1. For
    /// the pre-loading disciplines (SJF, PRIORITY) the ready queue is
    /// populated with every process handle up front; their arrival cycles
    /// then gate selection instead of admission.
    pub fn reset(&mut self) {
        self.cycle = Cycle::START;
        self.rr_counter = 0;
        self.running = None;
        self.tasks = self.processes.iter().map(Task::from_spec).collect();
        self.ready.clear();
        self.history.clear();
        self.sync_log.clear();
        self.faults.clear();

        if self.policy.preloads_ready_queue() {
            self.ready
                .extend((0..self.tasks.len() as u32).map(ProcId));
        }

        self.primitives = self
            .resources
            .iter()
            .map(|r| (r.name.clone(), Primitive::for_resource(r)))
            .collect();

        self.max_sync_cycle = self
            .actions
            .iter()
            .map(ActionSpec::fire_cycle)
            .max()
            .unwrap_or(Cycle(0));
    }

    /// Advance the simulation by one cycle.
    ///
    /// In synchronization mode the engine stops advancing once the cycle
    /// counter has reached the last scripted action cycle; further calls
    /// return without change. `tick()` never fails: run-time misuse of a
    /// primitive is recorded on the fault side-channel and the offending
    /// action is dropped.
    pub fn tick(&mut self) {
        if self.mode == SimMode::Synchronization && self.cycle >= self.max_sync_cycle {
            return;
        }
        self.cycle = self.cycle.next();
        match self.mode {
            SimMode::Scheduling => self.run_sched_cycle(),
            SimMode::Synchronization => self.run_sync_cycle(),
        }
    }

    /// Whether every process has been fully served and the CPU is idle
    /// with an empty ready queue. Immediately true for an empty process
    /// list.
    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(Task::is_complete) && self.running.is_none() && self.ready.is_empty()
    }

    /// Mean waiting time over completed processes: the average of
    /// `completion − arrival − burst`. Returns 0 when nothing has
    /// completed yet.
    pub fn average_waiting_time(&self) -> f64 {
        let mut total = 0.0;
        let mut count = 0u32;
        for task in &self.tasks {
            if let Some(completion) = task.completion {
                total += (completion.0 - i64::from(task.arrival) - i64::from(task.burst)) as f64;
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            total / f64::from(count)
        }
    }

    // ── Setters ──────────────────────────────────────────────────

    /// Switch the scheduling discipline. Callers are expected to
    /// [`reset()`](Engine::reset) afterwards; the ready queue layout of
    /// the old discipline is not translated.
    pub fn set_policy(&mut self, policy: SchedPolicy) {
        self.policy = policy;
    }

    /// Switch between scheduling and synchronization mode. Idempotent.
    pub fn set_mode(&mut self, mode: SimMode) {
        self.mode = mode;
    }

    /// Change the Round-Robin quantum for subsequent cycles.
    pub fn set_rr_quantum(&mut self, quantum: u32) {
        self.rr_quantum = quantum;
    }

    // ── Read accessors ───────────────────────────────────────────

    /// The current cycle (−1 before the first tick).
    pub fn current_cycle(&self) -> Cycle {
        self.cycle
    }

    /// Handle of the process holding the CPU, if any.
    pub fn running(&self) -> Option<ProcId> {
        self.running
    }

    /// Snapshot of the task table, indexed by handle.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The current ready queue, in order.
    pub fn ready_queue(&self) -> &VecDeque<ProcId> {
        &self.ready
    }

    /// Per-cycle CPU occupancy: one entry per scheduling tick, `None` when
    /// the CPU was idle.
    pub fn execution_history(&self) -> &[Option<ProcId>] {
        &self.history
    }

    /// The execution history as display labels, using the reserved
    /// `"idle"` sentinel for empty cycles.
    pub fn history_labels(&self) -> Vec<&str> {
        self.history
            .iter()
            .map(|slot| match slot {
                Some(id) => self.pid_of(*id),
                None => IDLE_LABEL,
            })
            .collect()
    }

    /// The synchronization event log, sorted by (cycle, process).
    pub fn sync_log(&self) -> &[SyncEvent] {
        &self.sync_log
    }

    /// Run-time domain faults recorded so far. Cleared by reset.
    pub fn faults(&self) -> &[SyncFault] {
        &self.faults
    }

    /// The primitive table, keyed by resource name in input order.
    pub fn primitives(&self) -> &IndexMap<String, Primitive> {
        &self.primitives
    }

    /// Whether `name` is a known resource with mutex semantics.
    pub fn is_mutex(&self, name: &str) -> bool {
        self.primitives.get(name).is_some_and(Primitive::is_mutex)
    }

    /// The mutex-valued primitives, in input order.
    pub fn mutexes(&self) -> impl Iterator<Item = (&str, &crate::sync::MutexState)> {
        self.primitives
            .iter()
            .filter_map(|(name, p)| Some((name.as_str(), p.as_mutex()?)))
    }

    /// The semaphore-valued primitives, in input order.
    pub fn semaphores(&self) -> impl Iterator<Item = (&str, &crate::sync::SemaphoreState)> {
        self.primitives
            .iter()
            .filter_map(|(name, p)| Some((name.as_str(), p.as_semaphore()?)))
    }

    /// The active scheduling discipline.
    pub fn policy(&self) -> SchedPolicy {
        self.policy
    }

    /// The active mode.
    pub fn mode(&self) -> SimMode {
        self.mode
    }

    /// The configured Round-Robin quantum.
    pub fn rr_quantum(&self) -> u32 {
        self.rr_quantum
    }

    /// The display identifier of a process handle.
    pub fn pid_of(&self, id: ProcId) -> &str {
        self.tasks[id.index()].pid()
    }

    /// Handle of the process with the given identifier, if any.
    pub(crate) fn lookup(&self, pid: &str) -> Option<ProcId> {
        self.tasks
            .iter()
            .position(|t| t.pid == pid)
            .map(|i| ProcId(i as u32))
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("cycle", &self.cycle)
            .field("mode", &self.mode)
            .field("policy", &self.policy)
            .field("running", &self.running)
            .field("ready", &self.ready)
            .field("finished", &self.is_finished())
            .finish()
    }
}
