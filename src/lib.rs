//! # Lotto — fixed-payout lottery mathematics and simulation
//!
//! Computes exact win probabilities and expected value for fixed-payout
//! lotteries, plans ticket-buying strategies with predictable coverage,
//! generates concrete ticket sets, and Monte-Carlo simulates long-run
//! outcomes.
//!
//! ## Module overview
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`combinatorics`] | Binomial coefficients, exhaustive enumeration, sampling without replacement |
//! | [`probability`] | Hypergeometric match probabilities and distributions |
//! | [`prize`] | Symmetric pattern normalization, prize-table lookup, pool-share splitting |
//! | [`expected_value`] | Per-ticket EV, profitability, break-even superprice |
//! | [`strategy`] | Strategy schemas, parameter validation, ticket-count planning |
//! | [`generator`] | Random, full-wheel, and key-wheel ticket generation |
//! | [`coverage`] | Combination coverage, guarantee bounds, diversity metrics |
//! | [`simulation`] | Monte-Carlo round loop, cancellation, batch replay, statistics |
//! | [`stats`] | Descriptive statistics, percentiles, confidence intervals |
//!
//! ## Design
//!
//! The engine is a pile of pure transforms: callers own every piece of
//! configuration (a [`types::Lottery`], a [`types::PrizeTable`], money
//! parameters) and pass it into each call together with a seedable RNG, so
//! any result can be reproduced from its inputs. There is no global state,
//! no I/O, and no formatting — outputs are plain serializable data.

pub mod combinatorics;
pub mod coverage;
pub mod error;
pub mod expected_value;
pub mod generator;
pub mod prize;
pub mod probability;
pub mod simulation;
pub mod stats;
pub mod strategy;
pub mod types;

pub use error::{EngineError, ValidationReport};
pub use expected_value::{break_even_superprice, calculate_ev, EvCalculation};
pub use prize::PrizeMoney;
pub use simulation::{run_simulation, simulate_batch, spawn_simulation, SimulationResult};
pub use strategy::{execute_strategy, required_ticket_count, StrategyResult};
pub use types::{DrawResult, Field, Lottery, MatchSymmetry, PrizeRow, PrizeTable, PrizeValue, Ticket};
