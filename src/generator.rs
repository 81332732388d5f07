//! Ticket generation: random picks, full wheels, key wheels.
//!
//! Every produced ticket's field arrays are sorted, unique, and within the
//! field's declared range. Random mode draws tickets independently, so
//! duplicate tickets can occur — they are deliberately not suppressed (the
//! buyer paid for each line).

use rand::rngs::SmallRng;
use tracing::debug;

use crate::combinatorics::{combinations, unique_random_numbers};
use crate::error::EngineError;
use crate::types::{Lottery, Ticket};

/// `count` independent random tickets, each field drawn uniformly without
/// replacement from its own pool.
pub fn random_tickets(lottery: &Lottery, count: u64, rng: &mut SmallRng) -> Vec<Ticket> {
    let f1 = *lottery.field1();
    let f2 = lottery.field2().copied();
    let tickets: Vec<Ticket> = (0..count)
        .map(|_| Ticket {
            field1: unique_random_numbers(1, f1.from, f1.count, rng),
            field2: f2.map(|f| unique_random_numbers(1, f.from, f.count, rng)),
        })
        .collect();
    debug!(lottery = %lottery.id, count = tickets.len(), "generated random tickets");
    tickets
}

/// Keep only in-range values, sorted and deduplicated.
fn sanitize_pool(pool: &[u32], from: u32) -> Vec<u32> {
    let mut pool: Vec<u32> = pool.iter().copied().filter(|&n| n >= 1 && n <= from).collect();
    pool.sort_unstable();
    pool.dedup();
    pool
}

/// Every `count`-subset of `pool` as a ticket — exhaustive, so the output
/// length always equals `C(pool.len(), count)` (the planner's full-wheel
/// count). Empty when the pool is smaller than the field.
///
/// Wheels enumerate a single pool, so two-field lotteries are rejected.
pub fn full_wheel(lottery: &Lottery, pool: &[u32]) -> Result<Vec<Ticket>, EngineError> {
    if lottery.field_count() != 1 {
        return Err(EngineError::UnsupportedStrategy {
            strategy: "full-wheel".to_string(),
            lottery: lottery.id.clone(),
        });
    }
    let field = lottery.field1();
    let pool = sanitize_pool(pool, field.from);
    let tickets: Vec<Ticket> = combinations(&pool, field.count)
        .into_iter()
        .map(Ticket::single)
        .collect();
    debug!(lottery = %lottery.id, pool = pool.len(), count = tickets.len(), "generated full wheel");
    Ok(tickets)
}

/// Wheel with `keys` fixed in every ticket and the remaining slots filled
/// from `pool \ keys`.
///
/// Degenerate cases: more keys than slots → one ticket of the first
/// `count` keys; a remaining pool too small for the open slots → empty.
pub fn key_wheel(lottery: &Lottery, keys: &[u32], pool: &[u32]) -> Result<Vec<Ticket>, EngineError> {
    if lottery.field_count() != 1 {
        return Err(EngineError::UnsupportedStrategy {
            strategy: "key-wheel".to_string(),
            lottery: lottery.id.clone(),
        });
    }
    let field = lottery.field1();
    let keys = sanitize_pool(keys, field.from);

    if keys.len() >= field.count {
        return Ok(vec![Ticket::single(keys[..field.count].to_vec())]);
    }

    let rest: Vec<u32> = sanitize_pool(pool, field.from)
        .into_iter()
        .filter(|n| !keys.contains(n))
        .collect();
    let open_slots = field.count - keys.len();
    let tickets: Vec<Ticket> = combinations(&rest, open_slots)
        .into_iter()
        .map(|combo| {
            let mut numbers = keys.clone();
            numbers.extend(combo);
            numbers.sort_unstable();
            Ticket::single(numbers)
        })
        .collect();
    debug!(lottery = %lottery.id, keys = keys.len(), count = tickets.len(), "generated key wheel");
    Ok(tickets)
}
