use super::engine::simulate;
use super::types::{CashFlow, Projections, ScenarioProjection};

pub fn project(
    starting_value: f64,
    horizon_years: u32,
    expected_annual_return: f64,
    cash_flows: &[CashFlow],
    optimistic_bonus: f64,
    pessimistic_penalty: f64,
) -> Projections {
    let base = expected_annual_return;
    let optimistic = base + optimistic_bonus;
    let pessimistic = (base - pessimistic_penalty).max(0.0);

    let run = |annual_return: f64| {
        scenario(starting_value, horizon_years, annual_return, cash_flows)
    };

    Projections {
        optimistic: run(optimistic),
        base_case: run(base),
        pessimistic: run(pessimistic),
    }
}

fn scenario(
    starting_value: f64,
    horizon_years: u32,
    annual_return: f64,
    cash_flows: &[CashFlow],
) -> ScenarioProjection {
    let projections = simulate(starting_value, horizon_years, annual_return, cash_flows);
    let final_value = projections
        .last()
        .map_or(starting_value.round(), |point| point.value);

    ScenarioProjection {
        expected_return: annual_return,
        projections,
        final_value,
        growth: growth_percent(starting_value, final_value),
    }
}

fn growth_percent(starting_value: f64, final_value: f64) -> f64 {
    if starting_value <= 0.0 {
        return 0.0;
    }
    (final_value - starting_value) / starting_value * 100.0
}
