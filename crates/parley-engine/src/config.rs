//! Policy constants for valuation and recommendation
//!
//! Every threshold the engines apply lives here so that a firm can tune
//! them without touching the computation.

use parley_domain::ValidationError;
use serde::{Deserialize, Serialize};

/// Share of projected future costs still spent if the case settles now
pub const FUTURE_COST_EXPOSURE: f64 = 0.3;

/// Likelihood an adverse costs order materializes on a loss
pub const ADVERSE_COSTS_PROBABILITY: f64 = 0.7;

/// Policy for the valuation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationPolicy {
    /// Fraction of future costs counted toward break-even.
    /// Settling now salvages the remainder.
    pub future_cost_exposure: f64,

    /// Fraction of recoverable costs assumed payable to the other side on a loss
    pub adverse_costs_probability: f64,
}

impl Default for ValuationPolicy {
    fn default() -> Self {
        Self {
            future_cost_exposure: FUTURE_COST_EXPOSURE,
            adverse_costs_probability: ADVERSE_COSTS_PROBABILITY,
        }
    }
}

impl ValuationPolicy {
    /// Check that both factors are fractions in [0, 1]
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fraction("future_cost_exposure", self.future_cost_exposure)?;
        check_fraction("adverse_costs_probability", self.adverse_costs_probability)
    }
}

/// Thresholds for the recommendation cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    /// Accept when the offer reaches this share of risk-adjusted value
    pub accept_ratio: f64,

    /// Accept when the offer reaches this share of present value
    pub present_value_accept_ratio: f64,

    /// Counter at the midpoint when the offer reaches this multiple of break-even
    pub strong_counter_multiple: f64,

    /// Counter at this share of risk-adjusted value when the offer only just clears break-even
    pub fallback_counter_ratio: f64,

    /// Win probability (percent) below which a rejection is softened to a counter
    pub low_win_probability: f64,

    /// Win probability (percent) above which harder negotiation is advised
    pub high_win_probability: f64,

    /// Range floor as a multiple of break-even
    pub range_floor_break_even_multiple: f64,

    /// Range floor as a share of risk-adjusted value
    pub range_floor_value_ratio: f64,

    /// Range ceiling as a share of risk-adjusted value
    pub range_ceiling_value_ratio: f64,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            accept_ratio: 0.9,
            present_value_accept_ratio: 0.85,
            strong_counter_multiple: 1.5,
            fallback_counter_ratio: 0.85,
            low_win_probability: 40.0,
            high_win_probability: 75.0,
            range_floor_break_even_multiple: 1.2,
            range_floor_value_ratio: 0.7,
            range_ceiling_value_ratio: 0.95,
        }
    }
}

impl RecommendationPolicy {
    /// Check factors are non-negative and probability thresholds lie in [0, 100]
    pub fn validate(&self) -> Result<(), ValidationError> {
        let factors = [
            ("accept_ratio", self.accept_ratio),
            ("present_value_accept_ratio", self.present_value_accept_ratio),
            ("strong_counter_multiple", self.strong_counter_multiple),
            ("fallback_counter_ratio", self.fallback_counter_ratio),
            ("range_floor_break_even_multiple", self.range_floor_break_even_multiple),
            ("range_floor_value_ratio", self.range_floor_value_ratio),
            ("range_ceiling_value_ratio", self.range_ceiling_value_ratio),
        ];
        for (field, value) in factors {
            check_non_negative(field, value)?;
        }

        for (field, value) in [
            ("low_win_probability", self.low_win_probability),
            ("high_win_probability", self.high_win_probability),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::InvalidPolicy {
                    field,
                    reason: format!("{} is outside [0, 100]", value),
                });
            }
        }

        if self.low_win_probability > self.high_win_probability {
            return Err(ValidationError::InvalidPolicy {
                field: "low_win_probability",
                reason: format!(
                    "{} is above high_win_probability {}",
                    self.low_win_probability, self.high_win_probability
                ),
            });
        }

        Ok(())
    }
}

/// Complete engine policy, as stored in the `[policy]` table of a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    /// Valuation constants
    pub valuation: ValuationPolicy,

    /// Recommendation thresholds
    pub recommendation: RecommendationPolicy,
}

impl EnginePolicy {
    /// Validate both halves of the policy
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.valuation.validate()?;
        self.recommendation.validate()
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidPolicy {
            field,
            reason: format!("{} must be a finite, non-negative number", value),
        });
    }
    Ok(())
}

fn check_fraction(field: &'static str, value: f64) -> Result<(), ValidationError> {
    check_non_negative(field, value)?;
    if value > 1.0 {
        return Err(ValidationError::InvalidPolicy {
            field,
            reason: format!("{} is above 1.0", value),
        });
    }
    Ok(())
}
