//! Expected value of one ticket: Σ prize·probability over the prize table,
//! minus the ticket cost.
//!
//! Rows are walked in table order; a row whose normalized pattern was
//! already accounted for is skipped, so a table listing both orderings of a
//! swap-symmetric pattern is not double-counted (probability queries already
//! cover the whole orbit).

use serde::{Deserialize, Serialize};

use crate::prize::{normalize_matches, pattern_probability, resolve_prize_value, PrizeMoney};
use crate::types::{Lottery, PrizeTable, PrizeValue};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvCalculation {
    /// Net expectation of one ticket (prize expectation minus cost).
    pub expected_value: f64,
    /// `expected_value / ticket_cost · 100`; 0 when the cost is 0.
    pub ev_percent: f64,
    pub is_profitable: bool,
}

/// Expected value of a single ticket under the given money parameters.
///
/// Rows with zero probability or a non-positive resolved value contribute
/// nothing — no error.
pub fn calculate_ev(lottery: &Lottery, table: &PrizeTable, money: &PrizeMoney) -> EvCalculation {
    let mut gross = 0.0;
    let mut seen: Vec<Vec<usize>> = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let normalized = normalize_matches(lottery, &row.matches);
        if seen.contains(&normalized) {
            continue;
        }
        seen.push(normalized);

        let p = pattern_probability(lottery, &row.matches);
        if p <= 0.0 {
            continue;
        }
        let value = resolve_prize_value(&row.value, lottery, &row.matches, money);
        if value <= 0.0 {
            continue;
        }
        gross += value * p;
    }
    let expected_value = gross - money.ticket_cost;
    let ev_percent = if money.ticket_cost > 0.0 {
        expected_value / money.ticket_cost * 100.0
    } else {
        0.0
    };
    EvCalculation {
        expected_value,
        ev_percent,
        is_profitable: expected_value > 0.0,
    }
}

/// Jackpot amount at which the ticket's EV crosses zero, holding every other
/// row fixed. `None` when the table has no jackpot row or the jackpot
/// pattern has zero probability.
pub fn break_even_superprice(
    lottery: &Lottery,
    table: &PrizeTable,
    money: &PrizeMoney,
) -> Option<f64> {
    let jackpot_row = table
        .rows
        .iter()
        .find(|row| row.value == PrizeValue::Jackpot)?;
    let p_jackpot = pattern_probability(lottery, &jackpot_row.matches);
    if p_jackpot <= 0.0 {
        return None;
    }
    let zeroed = PrizeMoney {
        superprice: 0.0,
        ..*money
    };
    let base = calculate_ev(lottery, table, &zeroed).expected_value;
    Some((-base / p_jackpot).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Lottery;

    #[test]
    fn test_house_edge_configuration_not_profitable() {
        let lottery = Lottery::two_field_4x20();
        let table = PrizeTable::two_field_4x20_default();
        let money = PrizeMoney {
            superprice: 100_000_000.0,
            secondary_prize: 1_000.0,
            ticket_cost: 100.0,
            pool_amount: 0.0,
        };
        let ev = calculate_ev(&lottery, &table, &money);
        assert!(!ev.is_profitable);
        assert!(ev.expected_value < 0.0);
        assert!(ev.ev_percent < 0.0);
        // A ticket still returns something in expectation.
        assert!(ev.expected_value > -money.ticket_cost);
    }

    #[test]
    fn test_ev_grows_with_superprice() {
        let lottery = Lottery::two_field_4x20();
        let table = PrizeTable::two_field_4x20_default();
        let mut money = PrizeMoney::from_lottery(&lottery);
        let low = calculate_ev(&lottery, &table, &money).expected_value;
        money.superprice *= 100.0;
        let high = calculate_ev(&lottery, &table, &money).expected_value;
        assert!(high > low);
    }

    #[test]
    fn test_absurd_superprice_is_profitable() {
        let lottery = Lottery::two_field_4x20();
        let table = PrizeTable::two_field_4x20_default();
        let money = PrizeMoney {
            superprice: 1e13,
            secondary_prize: 1_000.0,
            ticket_cost: 100.0,
            pool_amount: 0.0,
        };
        // P(jackpot) ≈ 4.3e-8, so 1e13 · P ≈ 4.3e5 ≫ 100.
        assert!(calculate_ev(&lottery, &table, &money).is_profitable);
    }

    #[test]
    fn test_duplicate_symmetric_rows_not_double_counted() {
        let lottery = Lottery::two_field_4x20();
        let canonical = PrizeTable::two_field_4x20_default();
        let mut doubled = canonical.clone();
        // Append the mirrored orderings; EV must not change.
        let mirrored: Vec<_> = canonical
            .rows
            .iter()
            .filter(|r| r.matches[0] != r.matches[1])
            .map(|r| {
                let mut row = r.clone();
                row.matches.reverse();
                row
            })
            .collect();
        doubled.rows.extend(mirrored);

        let money = PrizeMoney::from_lottery(&lottery);
        let a = calculate_ev(&lottery, &canonical, &money);
        let b = calculate_ev(&lottery, &doubled, &money);
        assert!((a.expected_value - b.expected_value).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cost_ev_percent_is_zero() {
        let lottery = Lottery::single_field_12x24();
        let table = PrizeTable::single_field_12x24_default();
        let money = PrizeMoney {
            superprice: 1_000_000.0,
            ticket_cost: 0.0,
            ..Default::default()
        };
        let ev = calculate_ev(&lottery, &table, &money);
        assert_eq!(ev.ev_percent, 0.0);
        assert!(ev.expected_value > 0.0);
    }

    #[test]
    fn test_break_even_superprice() {
        let lottery = Lottery::two_field_4x20();
        let table = PrizeTable::two_field_4x20_default();
        let money = PrizeMoney::from_lottery(&lottery);
        let s = break_even_superprice(&lottery, &table, &money).expect("jackpot row");
        // EV at the break-even superprice is ~0.
        let at_break_even = calculate_ev(
            &lottery,
            &table,
            &PrizeMoney {
                superprice: s,
                ..money
            },
        );
        assert!(at_break_even.expected_value.abs() < 1e-6);
        // And the default configuration sits below it.
        assert!(money.superprice < s);
    }

    #[test]
    fn test_break_even_none_without_jackpot_row() {
        let lottery = Lottery::single_field_12x24();
        let mut table = PrizeTable::single_field_12x24_default();
        table.rows.retain(|r| r.value != PrizeValue::Jackpot);
        let money = PrizeMoney::from_lottery(&lottery);
        assert!(break_even_superprice(&lottery, &table, &money).is_none());
    }
}
