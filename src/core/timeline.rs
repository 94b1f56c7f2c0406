use super::config::RiskProfileReturns;
use super::engine::simulate;
use super::types::{CashFlow, NaturalTimelineResult, WealthGoalInputs};

pub fn natural_timeline(
    inputs: &WealthGoalInputs,
    returns: &RiskProfileReturns,
    max_years: u32,
) -> NaturalTimelineResult {
    timeline_with_return(
        inputs.current_wealth,
        inputs.target_wealth,
        returns.annual_return(inputs.risk_profile),
        max_years,
    )
}

// A non-positive target reports the capped horizon rather than "already
// achieved"; callers render that as the not-achievable state.
pub fn timeline_with_return(
    current_wealth: f64,
    target_wealth: f64,
    annual_return: f64,
    max_years: u32,
) -> NaturalTimelineResult {
    if let Some(sentinel) =
        sentinel_timeline(current_wealth, target_wealth, annual_return, max_years)
    {
        return sentinel;
    }
    if current_wealth <= 0.0 || annual_return <= 0.0 {
        return capped(current_wealth, annual_return, max_years);
    }

    let rate = annual_return / 100.0;
    let raw_years = (target_wealth / current_wealth).ln() / (1.0 + rate).ln();
    let years = if raw_years.is_finite() {
        raw_years.ceil().clamp(0.0, f64::from(max_years)) as u32
    } else {
        max_years
    };

    NaturalTimelineResult {
        years,
        annual_return,
        projected_value: (current_wealth * (1.0 + rate).powf(f64::from(years))).round(),
        is_already_achieved: false,
    }
}

pub fn timeline_with_cash_flows(
    current_wealth: f64,
    target_wealth: f64,
    annual_return: f64,
    cash_flows: &[CashFlow],
    max_years: u32,
) -> NaturalTimelineResult {
    if let Some(sentinel) =
        sentinel_timeline(current_wealth, target_wealth, annual_return, max_years)
    {
        return sentinel;
    }

    let points = simulate(current_wealth, max_years, annual_return, cash_flows);
    let reached = points
        .iter()
        .skip(1)
        .find(|point| point.value >= target_wealth);

    match reached {
        Some(point) => NaturalTimelineResult {
            years: point.year,
            annual_return,
            projected_value: point.value,
            is_already_achieved: false,
        },
        None => NaturalTimelineResult {
            years: max_years,
            annual_return,
            projected_value: points.last().map_or(0.0, |point| point.value),
            is_already_achieved: false,
        },
    }
}

fn sentinel_timeline(
    current_wealth: f64,
    target_wealth: f64,
    annual_return: f64,
    max_years: u32,
) -> Option<NaturalTimelineResult> {
    if target_wealth <= 0.0 {
        return Some(capped(current_wealth, annual_return, max_years));
    }
    if current_wealth >= target_wealth {
        return Some(NaturalTimelineResult {
            years: 0,
            annual_return,
            projected_value: current_wealth.round(),
            is_already_achieved: true,
        });
    }
    None
}

fn capped(current_wealth: f64, annual_return: f64, max_years: u32) -> NaturalTimelineResult {
    NaturalTimelineResult {
        years: max_years,
        annual_return,
        projected_value: current_wealth.max(0.0).round(),
        is_already_achieved: false,
    }
}
