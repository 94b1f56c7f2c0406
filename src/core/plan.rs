use tracing::debug;

use super::allocation::weighted_return;
use super::config::EngineConfig;
use super::scenarios::project;
use super::solver::{accelerate, reverse};
use super::timeline::{natural_timeline, timeline_with_cash_flows, timeline_with_return};
use super::types::{AllocationEntry, CashFlow, GoalPlan, WealthGoalInputs};

#[derive(Debug, Clone)]
pub struct GoalPlanRequest {
    pub inputs: WealthGoalInputs,
    pub allocations: Vec<AllocationEntry>,
    pub cash_flows: Vec<CashFlow>,
    pub desired_retirement_age: Option<u32>,
}

pub fn build_plan(request: &GoalPlanRequest, config: &EngineConfig) -> GoalPlan {
    let inputs = &request.inputs;
    let risk_profile_return = config.risk_returns.annual_return(inputs.risk_profile);
    let weighted = weighted_return(&request.allocations);
    let effective_return = if weighted > 0.0 {
        weighted
    } else {
        risk_profile_return
    };
    debug!(
        risk_profile = ?inputs.risk_profile,
        risk_profile_return,
        weighted_return = weighted,
        effective_return,
        "resolved plan return"
    );

    let natural = natural_timeline(inputs, &config.risk_returns, config.max_years);

    let accelerated = timeline_with_return(
        inputs.current_wealth,
        inputs.target_wealth,
        effective_return,
        config.max_years,
    );
    let with_cash_flows = timeline_with_cash_flows(
        inputs.current_wealth,
        inputs.target_wealth,
        effective_return,
        &request.cash_flows,
        config.max_years,
    );

    let requirements = accelerate(
        inputs.current_wealth,
        inputs.target_wealth,
        inputs.desired_timeline_years,
        effective_return,
        &request.cash_flows,
    );

    let projections = project(
        inputs.current_wealth,
        inputs.desired_timeline_years,
        effective_return,
        &request.cash_flows,
        config.optimistic_bonus,
        config.pessimistic_penalty,
    );

    let reverse_timeline = request.desired_retirement_age.map(|retirement_age| {
        reverse(
            inputs.current_wealth,
            inputs.target_wealth,
            inputs.current_age,
            retirement_age,
            effective_return,
            &request.cash_flows,
        )
    });

    GoalPlan {
        risk_profile: inputs.risk_profile,
        risk_profile_return,
        weighted_return: weighted,
        effective_return,
        natural_timeline: natural,
        accelerated_timeline: accelerated,
        timeline_with_cash_flows: with_cash_flows,
        requirements,
        projections,
        reverse: reverse_timeline,
    }
}
