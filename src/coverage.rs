//! Coverage analysis for ticket sets: how much of the draw space a set of
//! combinations addresses, and how evenly it spreads over the number pool.

use crate::combinatorics::binomial;
use crate::types::Ticket;

/// Number of draws that would yield exactly `must_match` matches against one
/// fixed ticket: `C(count, m) · C(from - count, count - m)`.
pub fn combinations_covered(from: u32, count: usize, must_match: usize) -> f64 {
    if must_match > count || count as u32 > from {
        return 0.0;
    }
    binomial(count as u64, must_match as u64)
        * binomial(from as u64 - count as u64, (count - must_match) as u64)
}

/// Approximate number of distinct combinations covered by `ticket_count`
/// random tickets: `total · (1 - (1 - 1/total)^ticket_count)`.
///
/// A union-bound style estimate that ignores the tickets' actual overlap —
/// exact for disjoint sets, optimistic otherwise.
pub fn estimate_coverage(ticket_count: u64, from: u32, selected: usize) -> f64 {
    let total = binomial(from as u64, selected as u64);
    if total <= 0.0 {
        return 0.0;
    }
    total * (1.0 - (1.0 - 1.0 / total).powf(ticket_count as f64))
}

/// Covering-design lower bound on the tickets needed to guarantee at least
/// `guaranteed` matches: `C(from - selected, selected - guaranteed)`.
/// `f64::INFINITY` when the request is infeasible.
pub fn tickets_for_guarantee(from: u32, selected: usize, guaranteed: usize) -> f64 {
    if guaranteed > selected || selected as u32 > from {
        return f64::INFINITY;
    }
    let bound = binomial(
        from as u64 - selected as u64,
        (selected - guaranteed) as u64,
    );
    if bound < 1.0 {
        f64::INFINITY
    } else {
        bound
    }
}

/// How uniformly a ticket set spreads over the number pool, in `[0, 1]`
/// (1 = perfectly even appearance counts).
///
/// Chi-square distance of per-number appearance frequency from the uniform
/// expectation, normalized by the empirical divisor `2 · from`.
pub fn coverage_diversity(tickets: &[Ticket], from: u32) -> f64 {
    if tickets.is_empty() || from == 0 {
        return 0.0;
    }
    let mut counts = vec![0u64; from as usize];
    let mut total = 0u64;
    for ticket in tickets {
        for &n in &ticket.field1 {
            if n >= 1 && n <= from {
                counts[(n - 1) as usize] += 1;
                total += 1;
            }
        }
    }
    if total == 0 {
        return 0.0;
    }
    let expected = total as f64 / from as f64;
    let chi2: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();
    1.0 - (chi2 / (2.0 * from as f64)).min(1.0)
}

/// Mean number of shared field-1 numbers across all ticket pairs.
/// 0 for fewer than two tickets.
pub fn mean_pairwise_overlap(tickets: &[Ticket]) -> f64 {
    if tickets.len() < 2 {
        return 0.0;
    }
    let mut sum = 0usize;
    let mut pairs = 0usize;
    for i in 0..tickets.len() {
        for j in i + 1..tickets.len() {
            sum += crate::types::count_matches(&tickets[i].field1, &tickets[j].field1);
            pairs += 1;
        }
    }
    sum as f64 / pairs as f64
}
