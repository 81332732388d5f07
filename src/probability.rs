//! Hypergeometric match probabilities.
//!
//! The core law: when `drawn` numbers are drawn from a pool of `total` and
//! the player picked `chosen`, the probability of matching exactly `m` is
//!
//! ```text
//! P(m) = C(chosen, m) · C(total - chosen, drawn - m) / C(total, drawn)
//! ```
//!
//! Domain violations yield 0 rather than an error.

use std::collections::BTreeMap;

use crate::combinatorics::binomial;

/// Probability of matching exactly `matched` of `chosen` picks when `drawn`
/// numbers are drawn from `total`.
pub fn match_probability(total: u32, chosen: usize, drawn: usize, matched: usize) -> f64 {
    if matched > chosen || matched > drawn {
        return 0.0;
    }
    if chosen as u64 > total as u64 || drawn as u64 > total as u64 {
        return 0.0;
    }
    let all = binomial(total as u64, drawn as u64);
    if all <= 0.0 {
        return 0.0;
    }
    let ways = binomial(chosen as u64, matched as u64)
        * binomial(total as u64 - chosen as u64, (drawn - matched) as u64);
    ways / all
}

/// P(match >= at_least): upper tail of the hypergeometric.
pub fn cumulative_probability(total: u32, chosen: usize, drawn: usize, at_least: usize) -> f64 {
    let upper = chosen.min(drawn);
    (at_least..=upper)
        .map(|m| match_probability(total, chosen, drawn, m))
        .sum()
}

/// Full distribution `m → P(m)` for `m ∈ [0, min(chosen, drawn)]`.
/// Sums to 1 (±1e-6) for any valid geometry.
pub fn probability_distribution(total: u32, chosen: usize, drawn: usize) -> BTreeMap<usize, f64> {
    let upper = chosen.min(drawn);
    (0..=upper)
        .map(|m| (m, match_probability(total, chosen, drawn, m)))
        .collect()
}

/// Probability of at least one win across `count` tickets each winning with
/// probability `p`: `1 - (1 - p)^count`.
///
/// Assumes independence across tickets — an approximation when tickets
/// share numbers, accepted as-is.
pub fn multi_ticket_probability(p: f64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powf(count as f64)
}

/// Tickets needed so the chance of at least one win reaches `target`:
/// `ceil(ln(1 - target) / ln(1 - p))`.
///
/// Sentinels: `f64::INFINITY` when `p <= 0` or `target >= 1`; 0 when the
/// target is already non-positive; 1 when a single ticket is certain.
pub fn tickets_for_probability(p: f64, target: f64) -> f64 {
    if p <= 0.0 || target >= 1.0 {
        return f64::INFINITY;
    }
    if target <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    ((1.0 - target).ln() / (1.0 - p).ln()).ceil()
}
