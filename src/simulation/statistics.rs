//! Per-run statistics aggregated from simulation rounds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stats::{describe, Descriptive};

use super::engine::SimulationRound;

/// Aggregate outcome of one simulation run. All-zero when no rounds were
/// executed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// `ticket_cost · ticket_count · executed_rounds`. Cancelled runs count
    /// only the rounds that actually happened.
    pub total_investment: f64,
    pub total_won: f64,
    pub net_return: f64,
    /// `net_return / total_investment · 100`; 0 when nothing was invested.
    pub roi: f64,
    pub zero_win_rounds: u64,
    pub zero_win_percent: f64,
    pub avg_nonzero_prize: f64,
    pub max_nonzero_prize: f64,
    pub min_nonzero_prize: f64,
    /// Winning tickets per normalized prize category (e.g. `"3+4"`).
    pub prize_distribution: BTreeMap<String, u64>,
    /// Descriptive summary of per-round total prizes.
    pub round_prize: Descriptive,
}

/// Aggregate statistics from a run's rounds.
pub fn aggregate_statistics(
    rounds: &[SimulationRound],
    ticket_count: usize,
    ticket_cost: f64,
) -> SimulationStatistics {
    if rounds.is_empty() {
        return SimulationStatistics::default();
    }
    let n = rounds.len() as f64;

    let round_totals: Vec<f64> = rounds.iter().map(|r| r.total_prize_this_round).collect();
    let total_won: f64 = round_totals.iter().sum();
    let total_investment = ticket_cost * ticket_count as f64 * n;
    let net_return = total_won - total_investment;
    let roi = if total_investment > 0.0 {
        net_return / total_investment * 100.0
    } else {
        0.0
    };

    let zero_win_rounds = round_totals.iter().filter(|&&t| t == 0.0).count() as u64;
    let nonzero: Vec<f64> = round_totals.iter().copied().filter(|&t| t > 0.0).collect();
    let (avg_nonzero, max_nonzero, min_nonzero) = if nonzero.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let d = describe(&nonzero);
        (d.mean, d.max, d.min)
    };

    let mut prize_distribution: BTreeMap<String, u64> = BTreeMap::new();
    for round in rounds {
        for m in &round.matches {
            if let Some(category) = &m.prize_category {
                *prize_distribution.entry(category.clone()).or_insert(0) += 1;
            }
        }
    }

    SimulationStatistics {
        total_investment,
        total_won,
        net_return,
        roi,
        zero_win_rounds,
        zero_win_percent: zero_win_rounds as f64 / n * 100.0,
        avg_nonzero_prize: avg_nonzero,
        max_nonzero_prize: max_nonzero,
        min_nonzero_prize: min_nonzero,
        prize_distribution,
        round_prize: describe(&round_totals),
    }
}
