//! End-to-end tests: the planner → generator → simulation → statistics
//! pipeline against the canonical lottery variants.

use lotto::expected_value::calculate_ev;
use lotto::generator::random_tickets;
use lotto::prize::PrizeMoney;
use lotto::simulation::{run_simulation, simulate_batch, spawn_simulation, CancelToken};
use lotto::strategy::{
    execute_strategy, required_ticket_count, ParamValue, StrategyParams, FULL_WHEEL, MIN_RISK,
    RISK_STRATEGY,
};
use lotto::types::{Lottery, PrizeTable};

use rand::rngs::SmallRng;
use rand::SeedableRng;

fn params(entries: &[(&str, ParamValue)]) -> StrategyParams {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn canonical_jackpot_lottery_has_house_edge() {
    let lottery = Lottery::two_field_4x20();
    let table = PrizeTable::two_field_4x20_default();
    let money = PrizeMoney {
        superprice: 100_000_000.0,
        secondary_prize: lottery.default_secondary_prize,
        ticket_cost: 100.0,
        pool_amount: 0.0,
    };
    let ev = calculate_ev(&lottery, &table, &money);
    assert!(!ev.is_profitable);
    assert!(ev.ev_percent < 0.0 && ev.ev_percent > -100.0);
}

#[test]
fn simulation_rounds_are_byte_identical_for_same_seed() {
    let lottery = Lottery::single_field_12x24();
    let table = PrizeTable::single_field_12x24_default();
    let money = PrizeMoney::from_lottery(&lottery);
    let mut rng = SmallRng::seed_from_u64(2);
    let tickets = random_tickets(&lottery, 3, &mut rng);

    let a = run_simulation(&lottery, &tickets, 150, &table, &money, 31337);
    let b = run_simulation(&lottery, &tickets, 150, &table, &money, 31337);
    let bytes_a = serde_json::to_vec(&a.rounds).unwrap();
    let bytes_b = serde_json::to_vec(&b.rounds).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn simulation_degenerate_round_count() {
    let lottery = Lottery::two_field_4x20();
    let table = PrizeTable::two_field_4x20_default();
    let money = PrizeMoney::from_lottery(&lottery);
    let mut rng = SmallRng::seed_from_u64(4);
    let tickets = random_tickets(&lottery, 4, &mut rng);

    let result = run_simulation(&lottery, &tickets, 0, &table, &money, 1);
    assert!(result.rounds.is_empty());
    assert_eq!(result.statistics.total_investment, 0.0);
    assert_eq!(result.statistics.total_won, 0.0);
}

#[test]
fn full_wheel_plan_and_generation_agree() {
    let lottery = Lottery::single_field_6x45();
    let p = params(&[(
        "numbers",
        ParamValue::Text("3,7,11,19,23,31,40,45".to_string()),
    )]);
    let planned = required_ticket_count(&lottery, FULL_WHEEL, &p).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let result = execute_strategy(&lottery, FULL_WHEEL, &p, 100.0, &mut rng).unwrap();
    // The wheel is exhaustive, so the plan must match generation 1:1.
    assert_eq!(planned, result.ticket_count);
    assert_eq!(result.ticket_count, 28); // C(8, 6)
    for t in &result.tickets {
        assert_eq!(t.field1.len(), 6);
    }
}

#[test]
fn planned_strategy_survives_simulation() {
    let lottery = Lottery::two_field_4x20();
    let table = PrizeTable::two_field_4x20_default();
    let money = PrizeMoney::from_lottery(&lottery);
    let mut rng = SmallRng::seed_from_u64(77);

    let p = params(&[("risk", ParamValue::Number(95.0))]);
    let strategy = execute_strategy(&lottery, RISK_STRATEGY, &p, money.ticket_cost, &mut rng).unwrap();
    assert!(strategy.ticket_count > 0);
    assert_eq!(strategy.total_cost, strategy.ticket_count as f64 * 100.0);

    let result = run_simulation(&lottery, &strategy.tickets, 50, &table, &money, 8);
    assert_eq!(result.rounds.len(), 50);
    assert_eq!(
        result.statistics.total_investment,
        money.ticket_cost * strategy.ticket_count as f64 * 50.0
    );
}

#[test]
fn min_risk_plan_is_positive_for_every_canonical_variant() {
    let p = params(&[("guaranteed-wins", ParamValue::Number(1.0))]);
    for lottery in [
        Lottery::two_field_4x20(),
        Lottery::single_field_12x24(),
        Lottery::single_field_6x45(),
    ] {
        let count = required_ticket_count(&lottery, MIN_RISK, &p).unwrap();
        assert!(count > 0, "{}", lottery.id);
    }
}

#[test]
fn cancelled_worker_returns_partial_run() {
    let lottery = Lottery::two_field_4x20();
    let table = PrizeTable::two_field_4x20_default();
    let money = PrizeMoney::from_lottery(&lottery);
    let mut rng = SmallRng::seed_from_u64(9);
    let tickets = random_tickets(&lottery, 2, &mut rng);

    // A token cancelled before the run starts yields zero rounds even
    // through the worker-thread path.
    let token = CancelToken::new();
    token.cancel();
    let result = lotto::simulation::run_simulation_with_token(
        &lottery, &tickets, 10_000, &table, &money, 5, &token,
    );
    assert!(result.rounds.is_empty());

    // An uncancelled spawn completes normally.
    let handle = spawn_simulation(lottery, tickets, 50, table, money, 5);
    let result = handle.wait();
    assert_eq!(result.rounds.len(), 50);
}

#[test]
fn batch_replay_reflects_house_edge() {
    let lottery = Lottery::two_field_4x20();
    let table = PrizeTable::two_field_4x20_default();
    let money = PrizeMoney::from_lottery(&lottery);
    let mut rng = SmallRng::seed_from_u64(21);
    let tickets = random_tickets(&lottery, 5, &mut rng);

    let summary = simulate_batch(&lottery, &tickets, 500, &table, &money, 32, 42);
    assert_eq!(summary.runs, 32);
    // A jackpot in 500 rounds is vanishingly unlikely: the mean final
    // bankroll must be negative and most runs end ruined.
    assert!(summary.final_bankroll.mean < 0.0);
    assert!(summary.ruin_rate > 0.5);
}

#[test]
fn simulation_result_round_trips_through_serde() {
    let lottery = Lottery::single_field_12x24();
    let table = PrizeTable::single_field_12x24_default();
    let money = PrizeMoney::from_lottery(&lottery);
    let mut rng = SmallRng::seed_from_u64(6);
    let tickets = random_tickets(&lottery, 2, &mut rng);

    let result = run_simulation(&lottery, &tickets, 25, &table, &money, 99);
    let json = serde_json::to_string(&result).unwrap();
    let back: lotto::SimulationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);
}
