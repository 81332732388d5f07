//! Prize resolution: symmetric pattern normalization, table lookup, and
//! prize-value materialization.
//!
//! Lookup runs over normalized match patterns so a table needs one row per
//! payout class. Probability queries sum over the whole symmetry orbit of a
//! pattern — both orderings for a swap-symmetric pair, both `m` and
//! `count - m` for a complement variant.

use crate::probability::match_probability;
use crate::types::{Field, Lottery, MatchSymmetry, PrizeRow, PrizeTable, PrizeValue};

/// Caller-owned money parameters for one resolution pass. The engine holds
/// no current-lottery state; this struct travels with every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrizeMoney {
    pub superprice: f64,
    pub secondary_prize: f64,
    pub ticket_cost: f64,
    /// Prize pool backing `PoolPercent` rows. 0 when unknown.
    pub pool_amount: f64,
}

impl PrizeMoney {
    /// Money parameters from a lottery's defaults.
    pub fn from_lottery(lottery: &Lottery) -> Self {
        Self {
            superprice: lottery.default_superprice,
            secondary_prize: lottery.default_secondary_prize,
            ticket_cost: lottery.default_ticket_cost,
            pool_amount: 0.0,
        }
    }
}

/// Canonical form of a match pattern under the lottery's symmetry class.
pub fn normalize_matches(lottery: &Lottery, matches: &[usize]) -> Vec<usize> {
    match lottery.symmetry {
        MatchSymmetry::FieldSwap if matches.len() == 2 => {
            vec![matches[0].min(matches[1]), matches[0].max(matches[1])]
        }
        MatchSymmetry::Complement if matches.len() == 1 => {
            let count = lottery.field1().count;
            vec![matches[0].max(count.saturating_sub(matches[0]))]
        }
        _ => matches.to_vec(),
    }
}

/// Stable histogram key for a pattern, e.g. `"3+4"` or `"11"`.
pub fn category_key(lottery: &Lottery, matches: &[usize]) -> String {
    let normalized = normalize_matches(lottery, matches);
    normalized
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("+")
}

fn field_probability(field: &Field, matched: usize) -> f64 {
    match_probability(field.from, field.count, field.count, matched)
}

/// Probability that one ticket lands in the payout class of `matches`,
/// summed over the symmetry orbit.
pub fn pattern_probability(lottery: &Lottery, matches: &[usize]) -> f64 {
    if matches.len() != lottery.field_count() {
        return 0.0;
    }
    match lottery.symmetry {
        MatchSymmetry::FieldSwap => {
            let (a, b) = (matches[0], matches[1]);
            let f1 = lottery.field1();
            let f2 = &lottery.fields[1];
            let direct = field_probability(f1, a) * field_probability(f2, b);
            if a == b {
                direct
            } else {
                direct + field_probability(f1, b) * field_probability(f2, a)
            }
        }
        MatchSymmetry::Complement => {
            let field = lottery.field1();
            let m = matches[0];
            let mirror = field.count.saturating_sub(m);
            let direct = field_probability(field, m);
            if m == mirror {
                direct
            } else {
                direct + field_probability(field, mirror)
            }
        }
        MatchSymmetry::None => matches
            .iter()
            .zip(&lottery.fields)
            .map(|(&m, f)| field_probability(f, m))
            .product(),
    }
}

/// First table row whose normalized pattern equals the query's.
pub fn find_prize_row<'a>(
    table: &'a PrizeTable,
    lottery: &Lottery,
    matches: &[usize],
) -> Option<&'a PrizeRow> {
    let query = normalize_matches(lottery, matches);
    table
        .rows
        .iter()
        .find(|row| normalize_matches(lottery, &row.matches) == query)
}

/// Materialize a row's prize as an amount.
///
/// `PoolPercent` shares the category's slice of the pool among estimated
/// co-winners: `estimated_tickets_sold = (pool / ticket_cost) · 2` (the
/// pool is assumed to be ~50% of gross revenue), `expected_winners =
/// estimated_tickets_sold · pattern_probability`, per-winner prize is the
/// floored quotient. When the winner estimate degenerates (zero pool, zero
/// cost, zero probability) the undivided category total is returned.
pub fn resolve_prize_value(
    value: &PrizeValue,
    lottery: &Lottery,
    matches: &[usize],
    money: &PrizeMoney,
) -> f64 {
    match value {
        PrizeValue::Fixed(v) => *v,
        PrizeValue::Jackpot => money.superprice,
        PrizeValue::Secondary => money.secondary_prize,
        PrizeValue::PoolPercent(pct) => {
            let category_total = pct / 100.0 * money.pool_amount;
            if money.ticket_cost <= 0.0 {
                return category_total;
            }
            let estimated_sold = money.pool_amount / money.ticket_cost * 2.0;
            let expected_winners = estimated_sold * pattern_probability(lottery, matches);
            if !expected_winners.is_finite() || expected_winners <= 0.0 {
                category_total
            } else {
                (category_total / expected_winners).floor()
            }
        }
    }
}

/// Lookup + materialize in one step; 0 when the pattern wins nothing.
pub fn resolve_prize(
    table: &PrizeTable,
    lottery: &Lottery,
    matches: &[usize],
    money: &PrizeMoney,
) -> f64 {
    match find_prize_row(table, lottery, matches) {
        Some(row) => resolve_prize_value(&row.value, lottery, matches, money),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Lottery;

    #[test]
    fn test_normalize_field_swap() {
        let lottery = Lottery::two_field_4x20();
        assert_eq!(normalize_matches(&lottery, &[3, 4]), vec![3, 4]);
        assert_eq!(normalize_matches(&lottery, &[4, 3]), vec![3, 4]);
        assert_eq!(normalize_matches(&lottery, &[2, 2]), vec![2, 2]);
    }

    #[test]
    fn test_normalize_complement() {
        let lottery = Lottery::single_field_12x24();
        assert_eq!(normalize_matches(&lottery, &[2]), vec![10]);
        assert_eq!(normalize_matches(&lottery, &[10]), vec![10]);
        assert_eq!(normalize_matches(&lottery, &[6]), vec![6]);
        assert_eq!(normalize_matches(&lottery, &[0]), vec![12]);
    }

    #[test]
    fn test_symmetric_lookup_agrees() {
        let lottery = Lottery::two_field_4x20();
        let table = PrizeTable::two_field_4x20_default();
        let a = find_prize_row(&table, &lottery, &[3, 4]).expect("row");
        let b = find_prize_row(&table, &lottery, &[4, 3]).expect("row");
        assert_eq!(a.matches, b.matches);

        let lottery = Lottery::single_field_12x24();
        let table = PrizeTable::single_field_12x24_default();
        let a = find_prize_row(&table, &lottery, &[2]).expect("row");
        let b = find_prize_row(&table, &lottery, &[10]).expect("row");
        assert_eq!(a.matches, b.matches);
    }

    #[test]
    fn test_no_row_for_losing_pattern() {
        let lottery = Lottery::two_field_4x20();
        let table = PrizeTable::two_field_4x20_default();
        assert!(find_prize_row(&table, &lottery, &[0, 0]).is_none());
        assert!(find_prize_row(&table, &lottery, &[1, 2]).is_none());
    }

    #[test]
    fn test_pattern_probability_orbit_sum() {
        let lottery = Lottery::two_field_4x20();
        let p3 = match_probability(20, 4, 4, 3);
        let p4 = match_probability(20, 4, 4, 4);
        let orbit = pattern_probability(&lottery, &[3, 4]);
        assert!((orbit - 2.0 * p3 * p4).abs() < 1e-15);
        // Diagonal pattern has no mirror.
        let diag = pattern_probability(&lottery, &[3, 3]);
        assert!((diag - p3 * p3).abs() < 1e-15);
    }

    #[test]
    fn test_pattern_probability_complement_doubles() {
        let lottery = Lottery::single_field_12x24();
        let p10 = match_probability(24, 12, 12, 10);
        let p2 = match_probability(24, 12, 12, 2);
        // The hypergeometric itself is symmetric here, so the orbit is 2·P.
        assert!((p10 - p2).abs() < 1e-15);
        let orbit = pattern_probability(&lottery, &[10]);
        assert!((orbit - 2.0 * p10).abs() < 1e-15);
        // Midpoint m = 6 is its own mirror.
        let mid = pattern_probability(&lottery, &[6]);
        assert!((mid - match_probability(24, 12, 12, 6)).abs() < 1e-15);
    }

    #[test]
    fn test_resolve_markers() {
        let lottery = Lottery::two_field_4x20();
        let money = PrizeMoney {
            superprice: 5_000_000.0,
            secondary_prize: 777.0,
            ticket_cost: 100.0,
            pool_amount: 0.0,
        };
        assert_eq!(
            resolve_prize_value(&PrizeValue::Jackpot, &lottery, &[4, 4], &money),
            5_000_000.0
        );
        assert_eq!(
            resolve_prize_value(&PrizeValue::Secondary, &lottery, &[0, 4], &money),
            777.0
        );
        assert_eq!(
            resolve_prize_value(&PrizeValue::Fixed(300.0), &lottery, &[2, 3], &money),
            300.0
        );
    }

    #[test]
    fn test_resolve_pool_percent_split() {
        let lottery = Lottery::single_field_6x45();
        let money = PrizeMoney {
            superprice: 0.0,
            secondary_prize: 0.0,
            ticket_cost: 100.0,
            pool_amount: 10_000_000.0,
        };
        // estimated sold = (1e7 / 100) · 2 = 200_000 tickets
        let p5 = pattern_probability(&lottery, &[5]);
        let expected_winners = 200_000.0 * p5;
        let expected = (2.0 / 100.0 * 10_000_000.0 / expected_winners).floor();
        let got = resolve_prize_value(&PrizeValue::PoolPercent(2.0), &lottery, &[5], &money);
        assert_eq!(got, expected);
        assert!(got > 0.0);
    }

    #[test]
    fn test_resolve_pool_percent_degenerate_falls_back() {
        let lottery = Lottery::single_field_6x45();
        // Zero pool → zero winners estimate → undivided total (also zero).
        let money = PrizeMoney {
            ticket_cost: 100.0,
            ..Default::default()
        };
        assert_eq!(
            resolve_prize_value(&PrizeValue::PoolPercent(2.0), &lottery, &[5], &money),
            0.0
        );
        // Zero ticket cost → sold estimate undefined → undivided total.
        let money = PrizeMoney {
            pool_amount: 1_000.0,
            ..Default::default()
        };
        assert_eq!(
            resolve_prize_value(&PrizeValue::PoolPercent(10.0), &lottery, &[5], &money),
            100.0
        );
    }

    #[test]
    fn test_resolve_prize_losing_pattern_is_zero() {
        let lottery = Lottery::two_field_4x20();
        let table = PrizeTable::two_field_4x20_default();
        let money = PrizeMoney::from_lottery(&lottery);
        assert_eq!(resolve_prize(&table, &lottery, &[1, 1], &money), 0.0);
    }

    #[test]
    fn test_category_key() {
        let lottery = Lottery::two_field_4x20();
        assert_eq!(category_key(&lottery, &[4, 3]), "3+4");
        let lottery = Lottery::single_field_12x24();
        assert_eq!(category_key(&lottery, &[2]), "10");
    }
}
