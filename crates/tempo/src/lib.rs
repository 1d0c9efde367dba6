//! Tempo: a deterministic, cycle-stepped simulator of operating-system
//! process scheduling and inter-process synchronization.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Tempo sub-crates. For most users, adding `tempo` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tempo::prelude::*;
//!
//! let config = EngineConfig::new(
//!     vec![
//!         ProcessSpec { pid: "A".into(), burst: 3, arrival: 0, priority: 0 },
//!         ProcessSpec { pid: "B".into(), burst: 2, arrival: 0, priority: 0 },
//!     ],
//!     vec![],
//!     vec![],
//!     SchedPolicy::Fifo,
//! );
//! let mut engine = Engine::new(config).unwrap();
//! while !engine.is_finished() {
//!     engine.tick();
//! }
//! assert_eq!(engine.history_labels(), ["A", "A", "A", "B", "B"]);
//! assert_eq!(engine.current_cycle(), Cycle(4));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tempo-core` | Handles, records, enums, events, faults |
//! | [`engine`] | `tempo-engine` | The engine facade and primitive state |
//! | [`parse`] | `tempo-parse` | Input-file loaders |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, records, and IDs (`tempo-core`).
pub use tempo_core as types;

/// The simulation engine (`tempo-engine`).
pub use tempo_engine as engine;

/// Input-file loaders (`tempo-parse`).
pub use tempo_parse as parse;

/// The most commonly used items, re-exported flat.
pub mod prelude {
    pub use tempo_core::{
        ActionSpec, Cycle, EventAction, Outcome, ProcId, ProcState, ProcessSpec, ResourceSpec,
        SchedPolicy, SimMode, SyncEvent, SyncFault, SyncOp,
    };
    pub use tempo_engine::{Engine, EngineConfig};
    pub use tempo_parse::{load_actions, load_processes, load_resources, LoadError};
}

pub use prelude::*;
