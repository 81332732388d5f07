//! Monte-Carlo simulation and its statistics.
//!
//! - [`engine`]: round loop, cancellation, worker-thread and batch execution
//! - [`statistics`]: per-run aggregate statistics

pub mod engine;
pub mod statistics;

pub use engine::{
    draw_round, run_simulation, run_simulation_with_token, simulate_batch, spawn_simulation,
    BatchSummary, CancelToken, MatchResult, SimulationHandle, SimulationResult, SimulationRound,
};
pub use statistics::{aggregate_statistics, SimulationStatistics};
