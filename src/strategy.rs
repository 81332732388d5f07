//! Ticket-buying strategies: declarative parameter schemas, validation, and
//! the closed-form planners that turn user intent (risk tolerance, coverage
//! target, wheel pools) into a required ticket count.
//!
//! Planned counts are lower bounds — an explicit `tickets` parameter
//! overrides the plan and is honored as-is by [`execute_strategy`].

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combinatorics::binomial;
use crate::coverage::{estimate_coverage, mean_pairwise_overlap};
use crate::error::{EngineError, ValidationError, ValidationReport};
use crate::generator::{full_wheel, key_wheel, random_tickets};
use crate::types::{Lottery, Ticket};

// ── Parameter schema ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    Number,
    Range,
    Text,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

pub type StrategyParams = BTreeMap<String, ParamValue>;

/// One declarative parameter of a strategy's schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyParameter {
    pub name: String,
    pub kind: ParameterKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default: Option<ParamValue>,
}

impl StrategyParameter {
    fn number(name: &str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: ParameterKind::Number,
            min: Some(min),
            max: Some(max),
            default: Some(ParamValue::Number(default)),
        }
    }

    fn range(name: &str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: ParameterKind::Range,
            min: Some(min),
            max: Some(max),
            default: Some(ParamValue::Number(default)),
        }
    }

    fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ParameterKind::Text,
            min: None,
            max: None,
            default: None,
        }
    }
}

/// A strategy's identity and parameter schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub parameters: Vec<StrategyParameter>,
}

/// Outcome of planning + generation for one strategy invocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyResult {
    pub tickets: Vec<Ticket>,
    pub ticket_count: u64,
    pub total_cost: f64,
    /// Estimated fraction of the field-1 draw space addressed, `[0, 1]`.
    pub coverage: Option<f64>,
    pub metadata: BTreeMap<String, String>,
}

// ── Registry ──────────────────────────────────────────────────────────────

pub const MIN_RISK: &str = "min-risk";
pub const MAX_COVERAGE: &str = "max-coverage";
pub const FULL_WHEEL: &str = "full-wheel";
pub const KEY_WHEEL: &str = "key-wheel";
pub const RISK_STRATEGY: &str = "risk-strategy";

/// Every ticket count planner accepts an explicit override.
const TICKETS_OVERRIDE: &str = "tickets";

/// Single-ticket any-prize win rates per lottery id, used by the min-risk
/// planner. Empirical values; unknown ids fall back to
/// [`DEFAULT_WIN_PROB`].
const LOTTERY_WIN_RATES: &[(&str, f64)] = &[("4x20", 0.13), ("12x24", 0.26), ("6x45", 0.02)];

const DEFAULT_WIN_PROB: f64 = 0.05;

/// The built-in strategy catalog with parameter schemas.
pub fn builtin_strategies() -> Vec<Strategy> {
    vec![
        Strategy {
            id: MIN_RISK.to_string(),
            name: "Minimal risk".to_string(),
            parameters: vec![
                StrategyParameter::number("guaranteed-wins", 1.0, 100.0, 1.0),
                StrategyParameter::number(TICKETS_OVERRIDE, 1.0, 1_000_000.0, 0.0),
            ],
        },
        Strategy {
            id: MAX_COVERAGE.to_string(),
            name: "Maximal coverage".to_string(),
            parameters: vec![
                StrategyParameter::range("coverage", 1.0, 99.0, 50.0),
                StrategyParameter::number(TICKETS_OVERRIDE, 1.0, 1_000_000.0, 0.0),
            ],
        },
        Strategy {
            id: FULL_WHEEL.to_string(),
            name: "Full wheel".to_string(),
            parameters: vec![StrategyParameter::text("numbers")],
        },
        Strategy {
            id: KEY_WHEEL.to_string(),
            name: "Key wheel".to_string(),
            parameters: vec![
                StrategyParameter::text("keys"),
                StrategyParameter::text("numbers"),
            ],
        },
        Strategy {
            id: RISK_STRATEGY.to_string(),
            name: "Risk dial".to_string(),
            parameters: vec![
                StrategyParameter::range("risk", 1.0, 99.0, 50.0),
                StrategyParameter::number(TICKETS_OVERRIDE, 1.0, 1_000_000.0, 0.0),
            ],
        },
    ]
}

pub fn find_strategy(id: &str) -> Option<Strategy> {
    builtin_strategies().into_iter().find(|s| s.id == id)
}

// ── Validation ────────────────────────────────────────────────────────────

/// Check `params` against the strategy's schema. Structured result — this
/// never panics and never raises.
pub fn validate_params(strategy: &Strategy, params: &StrategyParams) -> ValidationReport {
    let mut errors = Vec::new();

    for schema in &strategy.parameters {
        match params.get(&schema.name) {
            None => {
                if schema.default.is_none() {
                    errors.push(ValidationError {
                        parameter: schema.name.clone(),
                        message: "required parameter is missing".to_string(),
                    });
                }
            }
            Some(ParamValue::Number(v)) => {
                if schema.kind == ParameterKind::Text {
                    errors.push(ValidationError {
                        parameter: schema.name.clone(),
                        message: "expected text, got a number".to_string(),
                    });
                } else {
                    if let Some(min) = schema.min {
                        if *v < min {
                            errors.push(ValidationError {
                                parameter: schema.name.clone(),
                                message: format!("{v} is below the minimum {min}"),
                            });
                        }
                    }
                    if let Some(max) = schema.max {
                        if *v > max {
                            errors.push(ValidationError {
                                parameter: schema.name.clone(),
                                message: format!("{v} is above the maximum {max}"),
                            });
                        }
                    }
                }
            }
            Some(ParamValue::Text(_)) => {
                if schema.kind != ParameterKind::Text {
                    errors.push(ValidationError {
                        parameter: schema.name.clone(),
                        message: "expected a number, got text".to_string(),
                    });
                }
            }
        }
    }

    for name in params.keys() {
        if !strategy.parameters.iter().any(|p| &p.name == name) {
            errors.push(ValidationError {
                parameter: name.clone(),
                message: "unknown parameter".to_string(),
            });
        }
    }

    if errors.is_empty() {
        ValidationReport::ok()
    } else {
        ValidationReport::invalid(errors)
    }
}

// ── Planning ──────────────────────────────────────────────────────────────

fn param_number(params: &StrategyParams, name: &str, default: f64) -> f64 {
    match params.get(name) {
        Some(ParamValue::Number(v)) => *v,
        _ => default,
    }
}

fn param_numbers(params: &StrategyParams, name: &str) -> Vec<u32> {
    match params.get(name) {
        Some(ParamValue::Text(s)) => s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .filter_map(|t| t.parse().ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn win_rate_for(lottery: &Lottery) -> f64 {
    LOTTERY_WIN_RATES
        .iter()
        .find(|(id, _)| *id == lottery.id)
        .map(|(_, p)| *p)
        .unwrap_or(DEFAULT_WIN_PROB)
}

/// Tickets needed to reach coverage fraction `f` of `total` combinations by
/// random buying: `ceil(-total · ln(1 - f))`, capped at `total`.
fn coverage_ticket_count(total: f64, f: f64) -> u64 {
    if total < 1.0 {
        return 0;
    }
    if f <= 0.0 {
        return 1;
    }
    if f >= 0.99 {
        return total as u64;
    }
    let raw = (-total * (1.0 - f).ln()).ceil();
    (raw as u64).min(total as u64)
}

fn ensure_single_field(lottery: &Lottery, strategy: &str) -> Result<(), EngineError> {
    if lottery.field_count() == 1 {
        Ok(())
    } else {
        Err(EngineError::UnsupportedStrategy {
            strategy: strategy.to_string(),
            lottery: lottery.id.clone(),
        })
    }
}

/// Lower-bound ticket count for one strategy. Hard-fails only on an
/// unknown strategy id or a wheel applied to a two-field lottery.
pub fn required_ticket_count(
    lottery: &Lottery,
    strategy_id: &str,
    params: &StrategyParams,
) -> Result<u64, EngineError> {
    let field = lottery.field1();
    match strategy_id {
        MIN_RISK => {
            let guaranteed = param_number(params, "guaranteed-wins", 1.0).max(1.0);
            let p = win_rate_for(lottery);
            Ok((guaranteed / p * 1.5).ceil() as u64)
        }
        MAX_COVERAGE => {
            let f = param_number(params, "coverage", 50.0) / 100.0;
            let total = binomial(field.from as u64, field.count as u64);
            Ok(coverage_ticket_count(total, f))
        }
        FULL_WHEEL => {
            ensure_single_field(lottery, FULL_WHEEL)?;
            let pool = param_numbers(params, "numbers");
            Ok(binomial(pool.len() as u64, field.count as u64) as u64)
        }
        KEY_WHEEL => {
            ensure_single_field(lottery, KEY_WHEEL)?;
            let key_count = param_numbers(params, "keys").len();
            if key_count > field.count {
                return Ok(1);
            }
            Ok(binomial(
                field.from as u64 - key_count as u64,
                (field.count - key_count) as u64,
            ) as u64)
        }
        RISK_STRATEGY => {
            let risk = param_number(params, "risk", 50.0).clamp(1.0, 99.0);
            let safety = (101.0 - risk).ln() / 100.0f64.ln();
            let target = (safety * 90.0).min(90.0);
            let total = binomial(field.from as u64, field.count as u64);
            Ok(coverage_ticket_count(total, target / 100.0))
        }
        other => Err(EngineError::UnknownStrategy(other.to_string())),
    }
}

// ── Execution ─────────────────────────────────────────────────────────────

/// Plan a ticket count and materialize the tickets in one step: the glue
/// between the planner and the generator. An explicit `tickets` parameter
/// overrides the planned count for the random-buy strategies; wheels are
/// exhaustive and ignore it.
pub fn execute_strategy(
    lottery: &Lottery,
    strategy_id: &str,
    params: &StrategyParams,
    ticket_cost: f64,
    rng: &mut SmallRng,
) -> Result<StrategyResult, EngineError> {
    let planned = required_ticket_count(lottery, strategy_id, params)?;

    let tickets = match strategy_id {
        FULL_WHEEL => full_wheel(lottery, &param_numbers(params, "numbers"))?,
        KEY_WHEEL => key_wheel(
            lottery,
            &param_numbers(params, "keys"),
            &param_numbers(params, "numbers"),
        )?,
        _ => {
            let override_count = param_number(params, TICKETS_OVERRIDE, 0.0);
            let count = if override_count >= 1.0 {
                override_count as u64
            } else {
                planned
            };
            random_tickets(lottery, count, rng)
        }
    };

    let field = lottery.field1();
    let total = binomial(field.from as u64, field.count as u64);
    let coverage = if tickets.is_empty() || total < 1.0 {
        None
    } else {
        Some(estimate_coverage(tickets.len() as u64, field.from, field.count) / total)
    };

    let mut metadata = BTreeMap::new();
    metadata.insert("strategy".to_string(), strategy_id.to_string());
    metadata.insert("planned_tickets".to_string(), planned.to_string());
    metadata.insert(
        "mean_pairwise_overlap".to_string(),
        format!("{:.3}", mean_pairwise_overlap(&tickets)),
    );

    let ticket_count = tickets.len() as u64;
    debug!(
        lottery = %lottery.id,
        strategy = strategy_id,
        planned,
        generated = ticket_count,
        "executed strategy"
    );
    Ok(StrategyResult {
        total_cost: ticket_count as f64 * ticket_cost,
        ticket_count,
        tickets,
        coverage,
        metadata,
    })
}
