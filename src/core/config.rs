use serde::{Deserialize, Serialize};

use super::types::RiskProfile;

pub const DEFAULT_MAX_YEARS: u32 = 80;
// Simulations step monthly up to the cap, so it has a ceiling.
pub const MAX_HORIZON_CAP: u32 = 200;
pub const DEFAULT_SCENARIO_SPREAD: f64 = 2.0;

/// Default annual return, in percent, for each risk profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskProfileReturns {
    pub conservative: f64,
    pub moderate: f64,
    pub aggressive: f64,
}

impl Default for RiskProfileReturns {
    fn default() -> Self {
        Self {
            conservative: 8.0,
            moderate: 10.0,
            aggressive: 12.0,
        }
    }
}

impl RiskProfileReturns {
    pub fn annual_return(&self, profile: RiskProfile) -> f64 {
        match profile {
            RiskProfile::Conservative => self.conservative,
            RiskProfile::Moderate => self.moderate,
            RiskProfile::Aggressive => self.aggressive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub risk_returns: RiskProfileReturns,
    pub max_years: u32,
    pub optimistic_bonus: f64,
    pub pessimistic_penalty: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_returns: RiskProfileReturns::default(),
            max_years: DEFAULT_MAX_YEARS,
            optimistic_bonus: DEFAULT_SCENARIO_SPREAD,
            pessimistic_penalty: DEFAULT_SCENARIO_SPREAD,
        }
    }
}
