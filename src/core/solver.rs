use super::engine::simulate_final_value;
use super::types::{AcceleratedRequirementsResult, CashFlow, ReverseTimelineResult};

// The lump sum, monthly SIP and yearly SIP are alternative ways to close the
// same gap, not parts of one plan.
pub fn accelerate(
    current_wealth: f64,
    target_wealth: f64,
    desired_timeline_years: u32,
    annual_return: f64,
    existing_cash_flows: &[CashFlow],
) -> AcceleratedRequirementsResult {
    let projected = simulate_final_value(
        current_wealth,
        desired_timeline_years,
        annual_return,
        existing_cash_flows,
    );

    if projected >= target_wealth {
        return AcceleratedRequirementsResult {
            required_monthly_sip: 0.0,
            required_yearly_sip: 0.0,
            required_lumpsum: 0.0,
            projected_value_with_cash_flows: projected,
            remaining_target: 0.0,
            is_achievable_with_cash_flows: true,
        };
    }

    let gap = target_wealth - projected;
    let rate = annual_return / 100.0;

    // With no periods left, or a rate that wipes out the balance, nothing can
    // compound and the whole gap is due now.
    let (lumpsum, monthly, yearly) = if desired_timeline_years == 0 || 1.0 + rate <= 0.0 {
        (gap, gap, gap)
    } else {
        let years = f64::from(desired_timeline_years);
        (
            gap / (1.0 + rate).powf(years),
            annuity_payment(gap, rate / 12.0, years * 12.0),
            annuity_payment(gap, rate, years),
        )
    };

    AcceleratedRequirementsResult {
        required_monthly_sip: settle(monthly),
        required_yearly_sip: settle(yearly),
        required_lumpsum: settle(lumpsum),
        projected_value_with_cash_flows: projected,
        remaining_target: settle(gap),
        is_achievable_with_cash_flows: false,
    }
}

pub fn reverse(
    current_wealth: f64,
    target_wealth: f64,
    current_age: u32,
    desired_retirement_age: u32,
    annual_return: f64,
    existing_cash_flows: &[CashFlow],
) -> ReverseTimelineResult {
    let desired_timeline = desired_retirement_age.saturating_sub(current_age).max(1);
    ReverseTimelineResult {
        requirements: accelerate(
            current_wealth,
            target_wealth,
            desired_timeline,
            annual_return,
            existing_cash_flows,
        ),
        desired_timeline,
    }
}

fn annuity_payment(future_value: f64, rate_per_period: f64, periods: f64) -> f64 {
    if rate_per_period == 0.0 {
        return future_value / periods;
    }
    future_value * rate_per_period / ((1.0 + rate_per_period).powf(periods) - 1.0)
}

fn settle(amount: f64) -> f64 {
    amount.max(0.0).round()
}
