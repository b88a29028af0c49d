//! Advisor output

use serde::{Deserialize, Serialize};

/// Coarse creditworthiness class derived from the debt ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Premium,
    Restricted,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Premium => "Profil Premium",
            Tier::Restricted => "Profil Restreint",
        }
    }
}

/// Ephemeral result of one advisor run. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tier: Tier,
    pub advice: String,
    /// Extra monthly installment the income can still carry
    pub borrowing_headroom: f64,
}

/// Advisor lifecycle as seen by the screens
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecommendationState {
    #[default]
    Idle,
    Computing,
    Ready(Recommendation),
}

impl RecommendationState {
    pub fn is_computing(&self) -> bool {
        matches!(self, RecommendationState::Computing)
    }

    pub fn ready(&self) -> Option<&Recommendation> {
        match self {
            RecommendationState::Ready(rec) => Some(rec),
            _ => None,
        }
    }
}
