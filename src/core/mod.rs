mod allocation;
mod config;
mod engine;
mod plan;
mod scenarios;
mod solver;
mod timeline;
mod types;

pub use allocation::weighted_return;
pub use config::{
    DEFAULT_MAX_YEARS, DEFAULT_SCENARIO_SPREAD, EngineConfig, MAX_HORIZON_CAP, RiskProfileReturns,
};
pub use engine::{simulate, simulate_final_value};
pub use plan::{GoalPlanRequest, build_plan};
pub use scenarios::project;
pub use solver::{accelerate, reverse};
pub use timeline::{natural_timeline, timeline_with_cash_flows, timeline_with_return};
pub use types::{
    AcceleratedRequirementsResult, AllocationEntry, CashFlow, CashFlowKind, GoalPlan,
    NaturalTimelineResult, ProjectionPoint, Projections, ReverseTimelineResult, RiskProfile,
    ScenarioProjection, WealthGoalInputs,
};
