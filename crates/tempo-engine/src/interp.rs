//! The synchronization interpreter.
//!
//! Each synchronization-mode cycle scans the immutable action script in
//! its original order and applies every action that fires in the current
//! cycle. Misuse of a primitive (see [`SyncFault`]) is recorded on the
//! fault side-channel and the action dropped; the scan then continues,
//! except for a READ/WRITE against an unknown resource, which abandons
//! the rest of the cycle's scan.
//!
//! Ordering within a cycle: a RELEASE that hands off emits the RELEASE
//! event before the new owner's automatic ACQUIRE; a SIGNAL that wakes
//! emits SIGNAL, then WAKE, then a replay of the originally blocked
//! action. The closing stable sort by (cycle, process) preserves those
//! emission orders inside each bucket.

use smallvec::SmallVec;

use tempo_core::{
    ActionSpec, Cycle, EventAction, Outcome, ProcId, ProcState, SyncEvent, SyncFault, SyncOp,
};

use crate::engine::Engine;
use crate::sync::{Primitive, Waiter};

/// Most cycles fire no more than a handful of scripted actions.
type FiredActions = SmallVec<[ActionSpec; 4]>;

fn event(
    cycle: Cycle,
    proc: ProcId,
    resource: &str,
    outcome: Outcome,
    action: EventAction,
) -> SyncEvent {
    SyncEvent {
        cycle,
        proc,
        resource: resource.to_string(),
        outcome,
        action,
    }
}

impl Engine {
    /// One synchronization-mode cycle: scan, dispatch, sort.
    pub(crate) fn run_sync_cycle(&mut self) {
        // Hand-off grants only suppress re-acquires within their own
        // cycle; a new cycle starts clean.
        for task in &mut self.tasks {
            task.granted_by_handoff = false;
        }

        let fired: FiredActions = self
            .actions
            .iter()
            .filter(|a| a.fire_cycle() == self.cycle)
            .cloned()
            .collect();

        for action in &fired {
            let Some(id) = self.lookup(&action.pid) else {
                continue;
            };
            // A blocked process cannot execute a SIGNAL.
            if action.op == SyncOp::Signal && self.tasks[id.index()].state == ProcState::Blocked {
                continue;
            }
            let abort = match action.op {
                SyncOp::Read | SyncOp::Write => self.sync_access(id, action),
                SyncOp::Acquire => {
                    self.sync_acquire(id, action);
                    false
                }
                SyncOp::Release => {
                    self.sync_release(id, action);
                    false
                }
                SyncOp::Wait => {
                    self.sync_wait(id, action);
                    false
                }
                SyncOp::Signal => {
                    self.sync_signal(id, action);
                    false
                }
            };
            if abort {
                break;
            }
        }

        // Rendering order. The sort is stable, so emission order survives
        // within each (cycle, process) bucket.
        self.sync_log.sort_by_key(SyncEvent::sort_key);
    }

    /// READ / WRITE. Returns `true` when the remaining scan for this
    /// cycle must be abandoned (unknown resource).
    fn sync_access(&mut self, id: ProcId, action: &ActionSpec) -> bool {
        let cycle = self.cycle;
        match self.primitives.get_mut(&action.resource) {
            Some(Primitive::Semaphore(sem)) => {
                if sem.count > 0 {
                    sem.count -= 1;
                    self.sync_log.push(event(
                        cycle,
                        id,
                        &action.resource,
                        Outcome::Accessed,
                        action.op.into(),
                    ));
                } else {
                    sem.waiters.push_back(Waiter {
                        proc: id,
                        requested: action.op,
                    });
                    self.tasks[id.index()].state = ProcState::Blocked;
                    self.sync_log.push(event(
                        cycle,
                        id,
                        &action.resource,
                        Outcome::Waiting,
                        action.op.into(),
                    ));
                }
                false
            }
            Some(Primitive::Mutex(m)) => {
                if m.owner == Some(id) {
                    self.sync_log.push(event(
                        cycle,
                        id,
                        &action.resource,
                        Outcome::Accessed,
                        action.op.into(),
                    ));
                } else {
                    self.faults.push(SyncFault::NotOwner {
                        proc: id,
                        resource: action.resource.clone(),
                        op: action.op,
                    });
                }
                false
            }
            None => {
                self.faults.push(SyncFault::UnknownResource {
                    proc: id,
                    resource: action.resource.clone(),
                    op: action.op,
                });
                true
            }
        }
    }

    fn sync_acquire(&mut self, id: ProcId, action: &ActionSpec) {
        let cycle = self.cycle;
        match self.primitives.get_mut(&action.resource) {
            Some(Primitive::Mutex(m)) => {
                if m.owner == Some(id) {
                    self.faults.push(SyncFault::DoubleAcquire {
                        proc: id,
                        resource: action.resource.clone(),
                    });
                    return;
                }
                if self.tasks[id.index()].granted_by_handoff {
                    self.tasks[id.index()].granted_by_handoff = false;
                    self.faults.push(SyncFault::ReacquireAfterHandoff {
                        proc: id,
                        resource: action.resource.clone(),
                    });
                    return;
                }
                if m.owner.is_none() {
                    m.owner = Some(id);
                    self.sync_log.push(event(
                        cycle,
                        id,
                        &action.resource,
                        Outcome::Accessed,
                        EventAction::Acquire,
                    ));
                } else {
                    m.waiters.push_back(Waiter {
                        proc: id,
                        requested: SyncOp::Acquire,
                    });
                    self.tasks[id.index()].state = ProcState::Blocked;
                    self.sync_log.push(event(
                        cycle,
                        id,
                        &action.resource,
                        Outcome::Waiting,
                        EventAction::Acquire,
                    ));
                }
            }
            Some(Primitive::Semaphore(_)) => {
                self.faults.push(SyncFault::WrongPrimitive {
                    proc: id,
                    resource: action.resource.clone(),
                    op: action.op,
                });
            }
            None => {
                self.faults.push(SyncFault::UnknownResource {
                    proc: id,
                    resource: action.resource.clone(),
                    op: action.op,
                });
            }
        }
    }

    fn sync_release(&mut self, id: ProcId, action: &ActionSpec) {
        let cycle = self.cycle;
        match self.primitives.get_mut(&action.resource) {
            Some(Primitive::Mutex(m)) => {
                if m.owner != Some(id) {
                    self.faults.push(SyncFault::UnauthorizedRelease {
                        proc: id,
                        resource: action.resource.clone(),
                    });
                    return;
                }
                self.sync_log.push(event(
                    cycle,
                    id,
                    &action.resource,
                    Outcome::Accessed,
                    EventAction::Release,
                ));
                if let Some(next) = m.waiters.pop_front() {
                    // Atomic hand-off: the mutex never unlocks; ownership
                    // moves straight to the head waiter.
                    m.owner = Some(next.proc);
                    let woken = &mut self.tasks[next.proc.index()];
                    woken.granted_by_handoff = true;
                    woken.state = ProcState::Ready;
                    self.ready.push_back(next.proc);
                    self.sync_log.push(event(
                        cycle,
                        next.proc,
                        &action.resource,
                        Outcome::Accessed,
                        next.requested.into(),
                    ));
                } else {
                    m.owner = None;
                }
            }
            Some(Primitive::Semaphore(_)) => {
                self.faults.push(SyncFault::WrongPrimitive {
                    proc: id,
                    resource: action.resource.clone(),
                    op: action.op,
                });
            }
            None => {
                self.faults.push(SyncFault::UnknownResource {
                    proc: id,
                    resource: action.resource.clone(),
                    op: action.op,
                });
            }
        }
    }

    fn sync_wait(&mut self, id: ProcId, action: &ActionSpec) {
        let cycle = self.cycle;
        match self.primitives.get_mut(&action.resource) {
            Some(Primitive::Semaphore(sem)) => {
                if sem.count > 0 {
                    sem.count -= 1;
                    self.sync_log.push(event(
                        cycle,
                        id,
                        &action.resource,
                        Outcome::Accessed,
                        EventAction::Wait,
                    ));
                } else {
                    sem.waiters.push_back(Waiter {
                        proc: id,
                        requested: SyncOp::Wait,
                    });
                    self.tasks[id.index()].state = ProcState::Blocked;
                    self.sync_log.push(event(
                        cycle,
                        id,
                        &action.resource,
                        Outcome::Waiting,
                        EventAction::Wait,
                    ));
                }
            }
            Some(Primitive::Mutex(_)) => {
                self.faults.push(SyncFault::WrongPrimitive {
                    proc: id,
                    resource: action.resource.clone(),
                    op: action.op,
                });
            }
            None => {
                self.faults.push(SyncFault::UnknownResource {
                    proc: id,
                    resource: action.resource.clone(),
                    op: action.op,
                });
            }
        }
    }

    fn sync_signal(&mut self, id: ProcId, action: &ActionSpec) {
        let cycle = self.cycle;
        match self.primitives.get_mut(&action.resource) {
            Some(Primitive::Semaphore(sem)) => {
                self.sync_log.push(event(
                    cycle,
                    id,
                    &action.resource,
                    Outcome::Accessed,
                    EventAction::Signal,
                ));
                if let Some(next) = sem.waiters.pop_front() {
                    // The released unit goes straight to the head waiter:
                    // the count stays where it is.
                    self.tasks[next.proc.index()].state = ProcState::Ready;
                    self.ready.push_back(next.proc);
                    self.sync_log.push(event(
                        cycle,
                        next.proc,
                        &action.resource,
                        Outcome::Accessed,
                        EventAction::Wake,
                    ));
                    self.sync_log.push(event(
                        cycle,
                        next.proc,
                        &action.resource,
                        Outcome::Accessed,
                        next.requested.into(),
                    ));
                } else {
                    sem.count += 1;
                }
            }
            Some(Primitive::Mutex(_)) => {
                self.faults.push(SyncFault::WrongPrimitive {
                    proc: id,
                    resource: action.resource.clone(),
                    op: action.op,
                });
            }
            None => {
                self.faults.push(SyncFault::UnknownResource {
                    proc: id,
                    resource: action.resource.clone(),
                    op: action.op,
                });
            }
        }
    }
}
