//! Tempo quickstart — one workload through both engine modes.
//!
//! Demonstrates:
//!   1. Describing processes, resources, and a timed action script
//!   2. Running a scheduling pass and printing the Gantt row
//!   3. Switching to synchronization mode and printing the event timeline
//!
//! Run with:
//!   cargo run --example quickstart

use tempo_core::{ActionSpec, ProcessSpec, ResourceSpec, SchedPolicy, SimMode, SyncOp};
use tempo_engine::{Engine, EngineConfig};

fn main() {
    let processes = vec![
        ProcessSpec {
            pid: "editor".into(),
            burst: 4,
            arrival: 0,
            priority: 2,
        },
        ProcessSpec {
            pid: "compiler".into(),
            burst: 6,
            arrival: 1,
            priority: 1,
        },
        ProcessSpec {
            pid: "indexer".into(),
            burst: 2,
            arrival: 3,
            priority: 3,
        },
    ];
    let resources = vec![
        ResourceSpec {
            name: "symbol-table".into(),
            capacity: 1,
        },
        ResourceSpec {
            name: "worker-pool".into(),
            capacity: 2,
        },
    ];
    let actions = vec![
        ActionSpec {
            pid: "editor".into(),
            op: SyncOp::Acquire,
            resource: "symbol-table".into(),
            cycle: 0,
        },
        ActionSpec {
            pid: "compiler".into(),
            op: SyncOp::Acquire,
            resource: "symbol-table".into(),
            cycle: 1,
        },
        ActionSpec {
            pid: "indexer".into(),
            op: SyncOp::Wait,
            resource: "worker-pool".into(),
            cycle: 1,
        },
        ActionSpec {
            pid: "editor".into(),
            op: SyncOp::Write,
            resource: "symbol-table".into(),
            cycle: 2,
        },
        ActionSpec {
            pid: "editor".into(),
            op: SyncOp::Release,
            resource: "symbol-table".into(),
            cycle: 3,
        },
        ActionSpec {
            pid: "indexer".into(),
            op: SyncOp::Signal,
            resource: "worker-pool".into(),
            cycle: 4,
        },
    ];

    // ── Scheduling pass ─────────────────────────────────────────

    let mut config = EngineConfig::new(
        processes,
        resources,
        actions,
        SchedPolicy::Srt,
    );
    config.rr_quantum = 2;
    let mut engine = Engine::new(config).expect("valid configuration");

    while !engine.is_finished() {
        engine.tick();
    }
    println!("Gantt row ({}):", engine.policy());
    println!("  {}", engine.history_labels().join(" | "));
    println!("  average waiting time: {:.2}", engine.average_waiting_time());

    // ── Synchronization pass ────────────────────────────────────

    engine.set_mode(SimMode::Synchronization);
    engine.reset();
    while engine.current_cycle().0 < 4 {
        engine.tick();
    }

    println!("\nSynchronization timeline:");
    for event in engine.sync_log() {
        println!("  {event}");
    }
    if !engine.faults().is_empty() {
        println!("\nDiagnostics:");
        for fault in engine.faults() {
            println!("  {fault}");
        }
    }
}
