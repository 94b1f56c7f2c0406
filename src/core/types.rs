use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CashFlowKind {
    Sip,
    Lumpsum,
    Swp,
    Withdrawal,
}

impl CashFlowKind {
    pub fn is_recurring(self) -> bool {
        matches!(self, CashFlowKind::Sip | CashFlowKind::Swp)
    }

    pub fn sign(self) -> f64 {
        match self {
            CashFlowKind::Sip | CashFlowKind::Lumpsum => 1.0,
            CashFlowKind::Swp | CashFlowKind::Withdrawal => -1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WealthGoalInputs {
    pub current_wealth: f64,
    pub target_wealth: f64,
    pub risk_profile: RiskProfile,
    pub desired_timeline_years: u32,
    pub current_age: u32,
}

#[derive(Debug, Clone)]
pub struct AllocationEntry {
    pub asset_class_id: String,
    pub allocation_percentage: f64,
    pub return_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlow {
    pub kind: CashFlowKind,
    pub amount: f64,
    /// 1-based; year 1 covers months 1..=12.
    pub start_year: u32,
    /// Only read for recurring flows. `None` runs to the simulation horizon.
    pub end_year: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalTimelineResult {
    pub years: u32,
    pub annual_return: f64,
    pub projected_value: f64,
    pub is_already_achieved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceleratedRequirementsResult {
    #[serde(rename = "requiredMonthlySIP")]
    pub required_monthly_sip: f64,
    #[serde(rename = "requiredYearlySIP")]
    pub required_yearly_sip: f64,
    pub required_lumpsum: f64,
    pub projected_value_with_cash_flows: f64,
    pub remaining_target: f64,
    pub is_achievable_with_cash_flows: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseTimelineResult {
    #[serde(flatten)]
    pub requirements: AcceleratedRequirementsResult,
    pub desired_timeline: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub expected_return: f64,
    pub projections: Vec<ProjectionPoint>,
    pub final_value: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projections {
    pub optimistic: ScenarioProjection,
    pub base_case: ScenarioProjection,
    pub pessimistic: ScenarioProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    pub risk_profile: RiskProfile,
    pub risk_profile_return: f64,
    pub weighted_return: f64,
    pub effective_return: f64,
    pub natural_timeline: NaturalTimelineResult,
    pub accelerated_timeline: NaturalTimelineResult,
    pub timeline_with_cash_flows: NaturalTimelineResult,
    pub requirements: AcceleratedRequirementsResult,
    pub projections: Projections,
    pub reverse: Option<ReverseTimelineResult>,
}
