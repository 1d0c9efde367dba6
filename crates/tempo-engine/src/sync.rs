//! Synchronization primitive state: mutexes and counting semaphores.
//!
//! Both primitives carry an ordered FIFO wait queue of [`Waiter`]s. A
//! waiter records the operation that originally blocked, so that the event
//! emitted when it is finally granted renders the same action the script
//! asked for.

use std::collections::VecDeque;

use tempo_core::{ProcId, ResourceSpec, SyncOp};

/// One blocked process parked on a primitive's wait queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Waiter {
    /// The blocked process.
    pub proc: ProcId,
    /// The operation that blocked (replayed in the post-wake event).
    pub requested: SyncOp,
}

/// Binary lock with an exclusive owner and FIFO hand-off.
///
/// Locked iff `owner` is set; the wait queue is non-empty only while
/// locked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MutexState {
    pub(crate) owner: Option<ProcId>,
    pub(crate) waiters: VecDeque<Waiter>,
}

impl MutexState {
    /// The current owner, if the mutex is held.
    pub fn owner(&self) -> Option<ProcId> {
        self.owner
    }

    /// Whether the mutex is currently held.
    pub fn is_locked(&self) -> bool {
        self.owner.is_some()
    }

    /// The ordered wait queue.
    pub fn waiters(&self) -> &VecDeque<Waiter> {
        &self.waiters
    }
}

/// Non-negative counter with a FIFO wait queue.
///
/// `count > 0` implies the wait queue is empty: a SIGNAL with waiters
/// present hands the unit directly to the head waiter instead of
/// incrementing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SemaphoreState {
    pub(crate) count: u32,
    pub(crate) waiters: VecDeque<Waiter>,
}

impl SemaphoreState {
    pub(crate) fn new(count: u32) -> Self {
        Self {
            count,
            waiters: VecDeque::new(),
        }
    }

    /// The current counter value.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The ordered wait queue.
    pub fn waiters(&self) -> &VecDeque<Waiter> {
        &self.waiters
    }
}

/// A named synchronization resource: mutex or counting semaphore.
///
/// The engine keys primitives by resource name in a single map; which
/// variant a name maps to is decided once, by the resource's capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Primitive {
    /// Capacity-1 resource with exclusive ownership.
    Mutex(MutexState),
    /// Counting resource with the capacity as its initial count.
    Semaphore(SemaphoreState),
}

impl Primitive {
    /// Build the primitive a resource description calls for.
    pub(crate) fn for_resource(spec: &ResourceSpec) -> Self {
        if spec.is_mutex() {
            Self::Mutex(MutexState::default())
        } else {
            Self::Semaphore(SemaphoreState::new(spec.capacity))
        }
    }

    /// Whether this primitive carries mutex semantics.
    pub fn is_mutex(&self) -> bool {
        matches!(self, Self::Mutex(_))
    }

    /// The mutex state, if this is a mutex.
    pub fn as_mutex(&self) -> Option<&MutexState> {
        match self {
            Self::Mutex(m) => Some(m),
            Self::Semaphore(_) => None,
        }
    }

    /// The semaphore state, if this is a semaphore.
    pub fn as_semaphore(&self) -> Option<&SemaphoreState> {
        match self {
            Self::Semaphore(s) => Some(s),
            Self::Mutex(_) => None,
        }
    }
}
