//! Monte-Carlo simulation engine — replays many drawings against a fixed
//! ticket set and tracks the bankroll trajectory.
//!
//! Each round draws every field uniformly without replacement, scores every
//! ticket against the drawn pattern through the prize resolver, and folds
//! the net into a cumulative bankroll (wins minus costs, never reset).
//!
//! Long runs are CPU-bound, so besides the synchronous [`run_simulation`]
//! there is [`spawn_simulation`], which executes the loop on a dedicated
//! worker thread and delivers the result through a channel, and
//! [`simulate_batch`], which replays many independent runs in parallel with
//! per-run derived seeds. A [`CancelToken`] threaded through the round loop
//! lets a caller abort early; a cancelled run returns the rounds finished
//! so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combinatorics::unique_random_numbers;
use crate::prize::{category_key, find_prize_row, resolve_prize_value, PrizeMoney};
use crate::stats::{describe, Descriptive};
use crate::types::{count_matches, DrawResult, Lottery, PrizeTable, Ticket};

use super::statistics::{aggregate_statistics, SimulationStatistics};

// ── Cancellation ──────────────────────────────────────────────────────────

/// Shared abort flag checked once per round.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

// ── Round records ─────────────────────────────────────────────────────────

/// One ticket's outcome in one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub ticket_index: usize,
    pub field1_matches: usize,
    pub field2_matches: Option<usize>,
    pub prize_won: f64,
    /// Normalized prize category, `None` for a losing ticket.
    pub prize_category: Option<String>,
}

/// One simulated drawing and every ticket's outcome against it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationRound {
    pub round_number: u64,
    pub draw: DrawResult,
    pub matches: Vec<MatchResult>,
    pub total_prize_this_round: f64,
    /// Cumulative net across all rounds so far (wins − costs).
    pub bankroll: f64,
}

/// Full outcome of one simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub tickets: Vec<Ticket>,
    pub ticket_cost: f64,
    /// Requested round count (rounds.len() can be smaller after a cancel).
    pub rounds_count: u64,
    pub rounds: Vec<SimulationRound>,
    pub statistics: SimulationStatistics,
}

// ── Engine ────────────────────────────────────────────────────────────────

/// Draw one round's winning numbers: each field uniform without replacement.
pub fn draw_round(lottery: &Lottery, rng: &mut SmallRng) -> DrawResult {
    let f1 = lottery.field1();
    DrawResult {
        field1: unique_random_numbers(1, f1.from, f1.count, rng),
        field2: lottery
            .field2()
            .map(|f| unique_random_numbers(1, f.from, f.count, rng)),
    }
}

/// Score every ticket against one draw. Returns the per-ticket outcomes and
/// the round's total prize.
fn score_round(
    lottery: &Lottery,
    tickets: &[Ticket],
    draw: &DrawResult,
    prize_table: &PrizeTable,
    money: &PrizeMoney,
) -> (Vec<MatchResult>, f64) {
    let mut matches = Vec::with_capacity(tickets.len());
    let mut total = 0.0;
    for (i, ticket) in tickets.iter().enumerate() {
        let f1 = count_matches(&ticket.field1, &draw.field1);
        let f2 = match (&ticket.field2, &draw.field2) {
            (Some(t), Some(d)) => Some(count_matches(t, d)),
            _ => None,
        };
        let pattern: Vec<usize> = std::iter::once(f1).chain(f2).collect();
        let (prize_won, prize_category) = match find_prize_row(prize_table, lottery, &pattern) {
            Some(row) => (
                resolve_prize_value(&row.value, lottery, &pattern, money),
                Some(category_key(lottery, &pattern)),
            ),
            None => (0.0, None),
        };
        total += prize_won;
        matches.push(MatchResult {
            ticket_index: i,
            field1_matches: f1,
            field2_matches: f2,
            prize_won,
            prize_category,
        });
    }
    (matches, total)
}

/// Run `rounds_count` simulated drawings against `tickets`, checking
/// `token` before each round.
///
/// `rounds_count == 0` or an empty ticket set executes no rounds and yields
/// all-zero statistics — not an error.
pub fn run_simulation_with_token(
    lottery: &Lottery,
    tickets: &[Ticket],
    rounds_count: u64,
    prize_table: &PrizeTable,
    money: &PrizeMoney,
    seed: u64,
    token: &CancelToken,
) -> SimulationResult {
    let mut rounds = Vec::new();
    if rounds_count > 0 && !tickets.is_empty() {
        let mut rng = SmallRng::seed_from_u64(seed);
        let round_cost = money.ticket_cost * tickets.len() as f64;
        let mut bankroll = 0.0;
        rounds.reserve(rounds_count as usize);
        for round_number in 1..=rounds_count {
            if token.is_cancelled() {
                debug!(completed = rounds.len(), "simulation cancelled");
                break;
            }
            let draw = draw_round(lottery, &mut rng);
            let (matches, total_prize_this_round) =
                score_round(lottery, tickets, &draw, prize_table, money);
            bankroll += total_prize_this_round - round_cost;
            rounds.push(SimulationRound {
                round_number,
                draw,
                matches,
                total_prize_this_round,
                bankroll,
            });
        }
    }
    let statistics = aggregate_statistics(&rounds, tickets.len(), money.ticket_cost);
    info!(
        lottery = %lottery.id,
        tickets = tickets.len(),
        rounds = rounds.len(),
        net_return = statistics.net_return,
        "simulation finished"
    );
    SimulationResult {
        tickets: tickets.to_vec(),
        ticket_cost: money.ticket_cost,
        rounds_count,
        rounds,
        statistics,
    }
}

/// [`run_simulation_with_token`] with a fresh (never-cancelled) token.
pub fn run_simulation(
    lottery: &Lottery,
    tickets: &[Ticket],
    rounds_count: u64,
    prize_table: &PrizeTable,
    money: &PrizeMoney,
    seed: u64,
) -> SimulationResult {
    run_simulation_with_token(
        lottery,
        tickets,
        rounds_count,
        prize_table,
        money,
        seed,
        &CancelToken::new(),
    )
}

// ── Worker-thread execution ───────────────────────────────────────────────

/// Handle to a simulation running on a worker thread.
pub struct SimulationHandle {
    token: CancelToken,
    rx: mpsc::Receiver<SimulationResult>,
    thread: std::thread::JoinHandle<()>,
}

impl SimulationHandle {
    /// Ask the running simulation to stop after its current round.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Non-blocking poll for the finished result.
    pub fn try_result(&self) -> Option<SimulationResult> {
        self.rx.try_recv().ok()
    }

    /// Block until the run completes and return its result.
    pub fn wait(self) -> SimulationResult {
        let _ = self.thread.join();
        self.rx.recv().unwrap_or_default()
    }
}

/// Run the simulation on a dedicated worker thread so a long run never
/// blocks the caller's thread; the result arrives through the handle.
pub fn spawn_simulation(
    lottery: Lottery,
    tickets: Vec<Ticket>,
    rounds_count: u64,
    prize_table: PrizeTable,
    money: PrizeMoney,
    seed: u64,
) -> SimulationHandle {
    let token = CancelToken::new();
    let worker_token = token.clone();
    let (tx, rx) = mpsc::channel();
    let thread = std::thread::spawn(move || {
        let result = run_simulation_with_token(
            &lottery,
            &tickets,
            rounds_count,
            &prize_table,
            &money,
            seed,
            &worker_token,
        );
        let _ = tx.send(result);
    });
    SimulationHandle { token, rx, thread }
}

// ── Batch replay ──────────────────────────────────────────────────────────

/// Long-run outcome summary over many independent simulation runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub rounds_per_run: u64,
    /// Final-bankroll distribution across runs.
    pub final_bankroll: Descriptive,
    /// Fraction of runs ending with a negative bankroll.
    pub ruin_rate: f64,
    /// Fraction of runs ending with a positive bankroll.
    pub profitable_rate: f64,
}

/// Replay `num_runs` independent simulations in parallel, seeding run `i`
/// with `seed + i`, and summarize the final bankrolls.
pub fn simulate_batch(
    lottery: &Lottery,
    tickets: &[Ticket],
    rounds_count: u64,
    prize_table: &PrizeTable,
    money: &PrizeMoney,
    num_runs: usize,
    seed: u64,
) -> BatchSummary {
    let finals: Vec<f64> = (0..num_runs)
        .into_par_iter()
        .map(|i| {
            let result = run_simulation(
                lottery,
                tickets,
                rounds_count,
                prize_table,
                money,
                seed.wrapping_add(i as u64),
            );
            result.rounds.last().map(|r| r.bankroll).unwrap_or(0.0)
        })
        .collect();

    let ruined = finals.iter().filter(|&&b| b < 0.0).count();
    let profitable = finals.iter().filter(|&&b| b > 0.0).count();
    let n = finals.len().max(1) as f64;
    BatchSummary {
        runs: num_runs,
        rounds_per_run: rounds_count,
        final_bankroll: describe(&finals),
        ruin_rate: ruined as f64 / n,
        profitable_rate: profitable as f64 / n,
    }
}
