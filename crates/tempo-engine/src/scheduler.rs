//! The five scheduling disciplines over the ready queue.
//!
//! `schedule_next()` may replace the running handle; preemption is always
//! expressed by pushing the incumbent back onto the ready queue before the
//! selection, so queue order doubles as the tie-break everywhere. A
//! process is *available* once its arrival cycle has been reached — for
//! the admission-driven policies (FIFO, SRT, RR) the queue only ever holds
//! available processes, while the pre-loading policies (SJF, PRIORITY)
//! apply the gate during selection.

use tempo_core::{Cycle, ProcId, ProcState, SchedPolicy};

use crate::engine::Engine;
use crate::task::Task;

impl Engine {
    /// One scheduling-mode cycle: admission, selection, record, execute.
    pub(crate) fn run_sched_cycle(&mut self) {
        if self.policy.admits_arrivals() {
            self.handle_arrivals();
        }
        if self.policy.preempts_every_cycle() || self.running.is_none() {
            self.schedule_next();
        }
        self.history.push(self.running);
        self.execute_running();
    }

    /// Append every process whose arrival equals the current cycle.
    pub(crate) fn handle_arrivals(&mut self) {
        for (i, task) in self.tasks.iter().enumerate() {
            if Cycle::from(task.arrival) == self.cycle {
                self.ready.push_back(ProcId(i as u32));
            }
        }
    }

    /// Run the active discipline's selection, possibly replacing the
    /// running handle.
    pub(crate) fn schedule_next(&mut self) {
        match self.policy {
            SchedPolicy::Fifo => self.schedule_fifo(),
            SchedPolicy::Sjf => self.schedule_sjf(),
            SchedPolicy::Srt => self.schedule_srt(),
            SchedPolicy::RoundRobin => self.schedule_rr(),
            SchedPolicy::Priority => self.schedule_priority(),
        }
    }

    /// Deliver one cycle of service to the running process.
    ///
    /// On reaching zero remaining, records `completion = cycle + 1` and
    /// frees the CPU. Under Round Robin the per-slice counter advances
    /// here; the other disciplines never read it.
    pub(crate) fn execute_running(&mut self) {
        let Some(id) = self.running else { return };
        if self.policy == SchedPolicy::RoundRobin {
            self.rr_counter += 1;
        }
        let task = &mut self.tasks[id.index()];
        task.remaining = task.remaining.saturating_sub(1);
        if task.remaining == 0 {
            task.completion = Some(self.cycle.next());
            task.state = ProcState::Ready;
            self.running = None;
            self.rr_counter = 0;
        }
    }

    // ── Disciplines ──────────────────────────────────────────────

    fn schedule_fifo(&mut self) {
        if self.running.is_none() {
            if let Some(next) = self.ready.pop_front() {
                self.set_running(next);
            }
        }
    }

    fn schedule_sjf(&mut self) {
        if self.running.is_some() {
            return;
        }
        if let Some(pos) = self.best_available(|t| i64::from(t.burst)) {
            self.dispatch_at(pos);
        }
    }

    fn schedule_srt(&mut self) {
        // Unconditionally re-queue the incumbent, then take the minimum
        // remaining. An equal-remaining queue entry beats the incumbent
        // (it sits earlier in the queue), so ties preempt.
        if let Some(curr) = self.running.take() {
            self.tasks[curr.index()].state = ProcState::Ready;
            self.ready.push_back(curr);
        }
        if let Some(pos) = self.best_available(|t| i64::from(t.remaining)) {
            self.dispatch_at(pos);
        }
    }

    fn schedule_rr(&mut self) {
        if self.rr_counter >= self.rr_quantum {
            if let Some(curr) = self.running.take() {
                self.tasks[curr.index()].state = ProcState::Ready;
                self.ready.push_back(curr);
                self.rr_counter = 0;
            }
        }
        if self.running.is_none() {
            if let Some(next) = self.ready.pop_front() {
                self.set_running(next);
                self.rr_counter = 0;
            }
        }
    }

    fn schedule_priority(&mut self) {
        let Some(pos) = self.best_available(|t| i64::from(t.priority)) else {
            return;
        };
        match self.running {
            None => self.dispatch_at(pos),
            Some(curr) => {
                let candidate = self.ready[pos];
                if self.tasks[candidate.index()].priority < self.tasks[curr.index()].priority {
                    self.tasks[curr.index()].state = ProcState::Ready;
                    self.ready.push_back(curr);
                    self.dispatch_at(pos);
                }
                // Equal priority keeps the incumbent.
            }
        }
    }

    // ── Selection helpers ────────────────────────────────────────

    /// Ready-queue position of the available entry minimising `key`.
    /// Ties keep the earliest queue position.
    fn best_available(&self, key: impl Fn(&Task) -> i64) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (pos, id) in self.ready.iter().enumerate() {
            let task = &self.tasks[id.index()];
            if !task.arrived_by(self.cycle) {
                continue;
            }
            let k = key(task);
            if best.map_or(true, |(_, b)| k < b) {
                best = Some((pos, k));
            }
        }
        best.map(|(pos, _)| pos)
    }

    /// Remove the queue entry at `pos` and give it the CPU.
    fn dispatch_at(&mut self, pos: usize) {
        if let Some(id) = self.ready.remove(pos) {
            self.set_running(id);
        }
    }

    fn set_running(&mut self, id: ProcId) {
        self.tasks[id.index()].state = ProcState::Running;
        self.running = Some(id);
    }
}
