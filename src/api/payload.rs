use serde::Deserialize;

use super::error::ApiError;
use crate::core::{
    AllocationEntry, CashFlow, CashFlowKind, EngineConfig, GoalPlanRequest, RiskProfile,
    WealthGoalInputs, weighted_return,
};

const DEFAULT_TIMELINE_YEARS: u32 = 10;
const DEFAULT_CURRENT_AGE: u32 = 35;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ApiRiskProfile {
    #[serde(alias = "Conservative", alias = "CONSERVATIVE")]
    Conservative,
    #[serde(alias = "Moderate", alias = "MODERATE", alias = "balanced")]
    Moderate,
    #[serde(alias = "Aggressive", alias = "AGGRESSIVE")]
    Aggressive,
}

impl From<ApiRiskProfile> for RiskProfile {
    fn from(value: ApiRiskProfile) -> Self {
        match value {
            ApiRiskProfile::Conservative => RiskProfile::Conservative,
            ApiRiskProfile::Moderate => RiskProfile::Moderate,
            ApiRiskProfile::Aggressive => RiskProfile::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
pub(crate) enum ApiCashFlowKind {
    #[serde(rename = "SIP", alias = "sip", alias = "Sip")]
    Sip,
    #[serde(alias = "lumpsum", alias = "lump-sum", alias = "LUMPSUM")]
    Lumpsum,
    #[serde(rename = "SWP", alias = "swp", alias = "Swp")]
    Swp,
    #[serde(alias = "withdrawal", alias = "WITHDRAWAL")]
    Withdrawal,
}

impl From<ApiCashFlowKind> for CashFlowKind {
    fn from(value: ApiCashFlowKind) -> Self {
        match value {
            ApiCashFlowKind::Sip => CashFlowKind::Sip,
            ApiCashFlowKind::Lumpsum => CashFlowKind::Lumpsum,
            ApiCashFlowKind::Swp => CashFlowKind::Swp,
            ApiCashFlowKind::Withdrawal => CashFlowKind::Withdrawal,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CashFlowPayload {
    #[serde(rename = "type")]
    kind: ApiCashFlowKind,
    amount: f64,
    start_year: u32,
    #[serde(default)]
    end_year: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AllocationPayload {
    #[serde(default)]
    asset_class_id: String,
    #[serde(default)]
    allocation_percentage: f64,
    #[serde(default)]
    return_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct GoalPayload {
    current_wealth: Option<f64>,
    target_wealth: Option<f64>,
    risk_profile: Option<ApiRiskProfile>,
    desired_timeline_years: Option<u32>,
    current_age: Option<u32>,
    desired_retirement_age: Option<u32>,
    annual_return: Option<f64>,
    allocations: Vec<AllocationPayload>,
    cash_flows: Vec<CashFlowPayload>,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    pub(crate) plan: GoalPlanRequest,
    /// Explicit return override for the single-solver endpoints.
    pub(crate) annual_return: Option<f64>,
}

impl ApiRequest {
    pub(crate) fn resolved_return(&self, config: &EngineConfig) -> f64 {
        if let Some(rate) = self.annual_return {
            return rate;
        }
        let weighted = weighted_return(&self.plan.allocations);
        if weighted > 0.0 {
            weighted
        } else {
            config
                .risk_returns
                .annual_return(self.plan.inputs.risk_profile)
        }
    }
}

pub(crate) fn api_request_from_json(
    json: &str,
    config: &EngineConfig,
) -> Result<ApiRequest, ApiError> {
    let payload = serde_json::from_str::<GoalPayload>(json)?;
    api_request_from_payload(payload, config)
}

pub(crate) fn api_request_from_payload(
    payload: GoalPayload,
    config: &EngineConfig,
) -> Result<ApiRequest, ApiError> {
    let Some(current_wealth) = payload.current_wealth else {
        return Err(ApiError::invalid("currentWealth", "is required"));
    };
    let Some(target_wealth) = payload.target_wealth else {
        return Err(ApiError::invalid("targetWealth", "is required"));
    };
    if !current_wealth.is_finite() || current_wealth < 0.0 {
        return Err(ApiError::invalid("currentWealth", "must be a finite amount >= 0"));
    }
    if !target_wealth.is_finite() {
        return Err(ApiError::invalid("targetWealth", "must be a finite amount"));
    }

    let desired_timeline_years = payload
        .desired_timeline_years
        .unwrap_or(DEFAULT_TIMELINE_YEARS);
    if desired_timeline_years == 0 || desired_timeline_years > config.max_years {
        return Err(ApiError::invalid(
            "desiredTimelineYears",
            format!("must be between 1 and {}", config.max_years),
        ));
    }

    let current_age = payload.current_age.unwrap_or(DEFAULT_CURRENT_AGE);
    if current_age == 0 {
        return Err(ApiError::invalid("currentAge", "must be > 0"));
    }

    if payload
        .annual_return
        .is_some_and(|rate| !rate.is_finite() || rate <= -100.0)
    {
        return Err(ApiError::invalid("annualReturn", "must be a finite rate > -100"));
    }

    let allocations = payload
        .allocations
        .into_iter()
        .map(allocation_from_payload)
        .collect::<Result<Vec<_>, _>>()?;
    let cash_flows = payload
        .cash_flows
        .into_iter()
        .map(cash_flow_from_payload)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiRequest {
        plan: GoalPlanRequest {
            inputs: WealthGoalInputs {
                current_wealth,
                target_wealth,
                risk_profile: payload
                    .risk_profile
                    .map_or(RiskProfile::Moderate, RiskProfile::from),
                desired_timeline_years,
                current_age,
            },
            allocations,
            cash_flows,
            desired_retirement_age: payload.desired_retirement_age,
        },
        annual_return: payload.annual_return,
    })
}

fn allocation_from_payload(payload: AllocationPayload) -> Result<AllocationEntry, ApiError> {
    if !(0.0..=100.0).contains(&payload.allocation_percentage) {
        return Err(ApiError::invalid(
            "allocationPercentage",
            format!("must be between 0 and 100 for '{}'", payload.asset_class_id),
        ));
    }
    if payload.return_rate.is_some_and(|rate| !rate.is_finite()) {
        return Err(ApiError::invalid(
            "returnRate",
            format!("must be finite for '{}'", payload.asset_class_id),
        ));
    }
    Ok(AllocationEntry {
        asset_class_id: payload.asset_class_id,
        allocation_percentage: payload.allocation_percentage,
        return_rate: payload.return_rate,
    })
}

fn cash_flow_from_payload(payload: CashFlowPayload) -> Result<CashFlow, ApiError> {
    if !payload.amount.is_finite() || payload.amount <= 0.0 {
        return Err(ApiError::invalid("cashFlows.amount", "must be a finite amount > 0"));
    }
    if payload.start_year == 0 {
        return Err(ApiError::invalid("cashFlows.startYear", "must be >= 1"));
    }
    Ok(CashFlow {
        kind: payload.kind.into(),
        amount: payload.amount,
        start_year: payload.start_year,
        end_year: payload.end_year,
    })
}
