//! Core data structures: lottery definitions, prize tables, tickets, and draws.
//!
//! Everything here is a plain immutable value object. The engine keeps no
//! state between calls — callers own the configuration (lottery variant,
//! prize table, money parameters) and pass it into every entry point.
//! All shapes derive `Serialize`/`Deserialize` so callers can persist them
//! verbatim.

use serde::{Deserialize, Serialize};

/// One independently-drawn number pool: choose `count` distinct integers
/// from `[1, from]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub count: usize,
    pub from: u32,
}

impl Field {
    pub fn new(count: usize, from: u32) -> Self {
        Self { count, from }
    }

    /// Number of distinct draws for this field: C(from, count).
    pub fn total_combinations(&self) -> f64 {
        crate::combinatorics::binomial(self.from as u64, self.count as u64)
    }
}

/// Payout symmetry class of a lottery variant.
///
/// Some variants pay identically for distinct match patterns because the
/// scoring rule is combinatorially symmetric:
///
/// - `FieldSwap`: both fields of a two-field lottery share `(count, from)`,
///   so pattern `[a, b]` pays the same as `[b, a]`.
/// - `Complement`: a single-field lottery where the machine draws as many
///   numbers as the player picks, so matching `m` is equivalent to matching
///   `count - m`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSymmetry {
    #[default]
    None,
    FieldSwap,
    Complement,
}

/// A lottery variant: 1 or 2 fields plus default money parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lottery {
    pub id: String,
    /// 1 or 2 fields; `fields.len() == 2` only for two-field variants.
    pub fields: Vec<Field>,
    pub symmetry: MatchSymmetry,
    pub default_ticket_cost: f64,
    pub default_superprice: f64,
    pub has_secondary_prize: bool,
    pub default_secondary_prize: f64,
}

impl Lottery {
    /// Derive the symmetry class implied by the field layout. `Complement`
    /// cannot be inferred from shape alone — variants opt in explicitly.
    pub fn infer_symmetry(fields: &[Field]) -> MatchSymmetry {
        match fields {
            [a, b] if a == b => MatchSymmetry::FieldSwap,
            _ => MatchSymmetry::None,
        }
    }

    pub fn field1(&self) -> &Field {
        &self.fields[0]
    }

    pub fn field2(&self) -> Option<&Field> {
        self.fields.get(1)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    // ── Canonical variants ────────────────────────────────────────────
    //
    // The variants the engine is routinely pointed at. Callers may define
    // arbitrary ones; these exist so tests and the planner's win-rate table
    // agree on ids.

    /// Two identical 4-of-20 fields, swap-symmetric.
    pub fn two_field_4x20() -> Self {
        let fields = vec![Field::new(4, 20), Field::new(4, 20)];
        Self {
            id: "4x20".to_string(),
            symmetry: Self::infer_symmetry(&fields),
            fields,
            default_ticket_cost: 100.0,
            default_superprice: 100_000_000.0,
            has_secondary_prize: true,
            default_secondary_prize: 1_000.0,
        }
    }

    /// Single 12-of-24 field where 12 numbers are drawn: matching `m` pays
    /// like matching `12 - m`.
    pub fn single_field_12x24() -> Self {
        Self {
            id: "12x24".to_string(),
            fields: vec![Field::new(12, 24)],
            symmetry: MatchSymmetry::Complement,
            default_ticket_cost: 50.0,
            default_superprice: 10_000_000.0,
            has_secondary_prize: false,
            default_secondary_prize: 0.0,
        }
    }

    /// Classic single 6-of-45 field, pari-mutuel mid tiers.
    pub fn single_field_6x45() -> Self {
        Self {
            id: "6x45".to_string(),
            fields: vec![Field::new(6, 45)],
            symmetry: MatchSymmetry::None,
            default_ticket_cost: 100.0,
            default_superprice: 50_000_000.0,
            has_secondary_prize: false,
            default_secondary_prize: 0.0,
        }
    }
}

/// Prize of one table row, resolved by the prize resolver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PrizeValue {
    /// Flat amount.
    Fixed(f64),
    /// Caller-supplied superprice.
    Jackpot,
    /// Caller-supplied secondary prize.
    Secondary,
    /// Percentage of the prize pool, split among estimated co-winners.
    PoolPercent(f64),
}

/// One prize-table row: a match pattern (one count per field) and its prize.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrizeRow {
    pub matches: Vec<usize>,
    pub value: PrizeValue,
    pub note: Option<String>,
}

impl PrizeRow {
    pub fn new(matches: Vec<usize>, value: PrizeValue) -> Self {
        Self {
            matches,
            value,
            note: None,
        }
    }
}

/// Ordered prize table; lookups return the first row whose normalized
/// match pattern equals the query's.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrizeTable {
    pub rows: Vec<PrizeRow>,
    pub currency: String,
}

impl PrizeTable {
    pub fn new(rows: Vec<PrizeRow>) -> Self {
        Self {
            rows,
            currency: "RUB".to_string(),
        }
    }

    /// Default table for [`Lottery::two_field_4x20`]. Patterns are stored
    /// normalized (`[min, max]`).
    pub fn two_field_4x20_default() -> Self {
        use PrizeValue::*;
        Self::new(vec![
            PrizeRow::new(vec![4, 4], Jackpot),
            PrizeRow::new(vec![3, 4], Fixed(30_000.0)),
            PrizeRow::new(vec![2, 4], Fixed(1_000.0)),
            PrizeRow::new(vec![1, 4], Fixed(700.0)),
            PrizeRow::new(vec![0, 4], Secondary),
            PrizeRow::new(vec![3, 3], Fixed(3_000.0)),
            PrizeRow::new(vec![2, 3], Fixed(300.0)),
            PrizeRow::new(vec![1, 3], Fixed(150.0)),
            PrizeRow::new(vec![0, 3], Fixed(100.0)),
            PrizeRow::new(vec![2, 2], Fixed(100.0)),
        ])
    }

    /// Default table for [`Lottery::single_field_12x24`]. Patterns are
    /// stored normalized (`max(m, 12 - m)`).
    pub fn single_field_12x24_default() -> Self {
        use PrizeValue::*;
        Self::new(vec![
            PrizeRow::new(vec![12], Jackpot),
            PrizeRow::new(vec![11], Fixed(10_000.0)),
            PrizeRow::new(vec![10], Fixed(1_000.0)),
            PrizeRow::new(vec![9], Fixed(200.0)),
            PrizeRow::new(vec![8], Fixed(100.0)),
            PrizeRow::new(vec![7], Fixed(75.0)),
        ])
    }

    /// Default table for [`Lottery::single_field_6x45`]: fixed low tiers,
    /// pool-percentage mid tiers.
    pub fn single_field_6x45_default() -> Self {
        use PrizeValue::*;
        Self::new(vec![
            PrizeRow::new(vec![6], Jackpot),
            PrizeRow::new(vec![5], PoolPercent(2.0)),
            PrizeRow::new(vec![4], PoolPercent(4.5)),
            PrizeRow::new(vec![3], Fixed(150.0)),
            PrizeRow::new(vec![2], Fixed(50.0)),
        ])
    }
}

/// One played combination. Field arrays are sorted, unique, in range.
/// Immutable once generated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub field1: Vec<u32>,
    pub field2: Option<Vec<u32>>,
}

impl Ticket {
    pub fn single(field1: Vec<u32>) -> Self {
        Self {
            field1,
            field2: None,
        }
    }

    pub fn two_field(field1: Vec<u32>, field2: Vec<u32>) -> Self {
        Self {
            field1,
            field2: Some(field2),
        }
    }
}

/// One drawing's winning numbers — same shape as a ticket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub field1: Vec<u32>,
    pub field2: Option<Vec<u32>>,
}

/// Count common elements of two sorted unique slices.
pub fn count_matches(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut n) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                n += 1;
                i += 1;
                j += 1;
            }
        }
    }
    n
}
