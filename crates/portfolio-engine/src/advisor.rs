//! Advisor
//!
//! Income-based recommendation: a tier from the debt ratio, one of two
//! configured advice texts, and the remaining borrowing headroom.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{EngineError, EngineResult, Recommendation, Tier};

/// Thresholds and copy for the advisor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Debt ratio (percent) below which the profile is premium
    pub premium_ratio_ceiling: f64,
    /// Income strictly above this gets the high-income advice
    pub high_income_threshold: f64,
    /// Share of monthly income that may go to installments
    pub headroom_ratio: f64,
    /// Simulated analysis time
    pub latency_ms: u64,
    pub high_income_advice: String,
    pub standard_advice: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            premium_ratio_ceiling: 33.0,
            high_income_threshold: 60_000.0,
            headroom_ratio: 0.35,
            latency_ms: 1_500,
            high_income_advice: "Tranche marginale élevée : une structure soumise à l'impôt sur \
                                 les sociétés permet de capitaliser les loyers sans alourdir \
                                 l'impôt sur le revenu."
                .to_string(),
            standard_advice: "Le statut de loueur meublé au régime réel permet d'amortir les \
                              biens et de neutraliser l'imposition des loyers."
                .to_string(),
        }
    }
}

impl AdvisorConfig {
    /// Parse a (possibly partial) JSON override; absent keys keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Build a recommendation. `debt_ratio` is the unrounded percentage so a
/// ratio displayed as 33.0 but actually below 33 stays premium.
pub fn compute_recommendation(
    annual_income: f64,
    debt_ratio: f64,
    total_monthly_installments: f64,
    config: &AdvisorConfig,
) -> EngineResult<Recommendation> {
    if annual_income <= 0.0 {
        return Err(EngineError::MissingIncome);
    }

    let tier = if debt_ratio < config.premium_ratio_ceiling {
        Tier::Premium
    } else {
        Tier::Restricted
    };
    let advice = if annual_income > config.high_income_threshold {
        config.high_income_advice.clone()
    } else {
        config.standard_advice.clone()
    };
    let monthly_income = annual_income / 12.0;
    let borrowing_headroom =
        (monthly_income * config.headroom_ratio - total_monthly_installments).max(0.0);

    Ok(Recommendation { tier, advice, borrowing_headroom })
}
