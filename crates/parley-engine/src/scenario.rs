//! Risk and time parameters for a valuation

use parley_domain::{clamp_probability, ValidationError};
use serde::{Deserialize, Serialize};

/// Parameters that apply to the case as a whole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Overall chance of winning at trial, in percent [0, 100]
    pub win_probability: f64,

    /// Expected months until trial
    pub months_to_trial: f64,

    /// Annual discount rate, in percent
    pub annual_discount_rate_percent: f64,
}

impl Scenario {
    /// Create a validated scenario
    ///
    /// Win probability is clamped into `[0, 100]`. Negative or non-finite
    /// months and discount rates are rejected.
    pub fn new(
        win_probability: f64,
        months_to_trial: f64,
        annual_discount_rate_percent: f64,
    ) -> Result<Self, ValidationError> {
        Scenario {
            win_probability,
            months_to_trial,
            annual_discount_rate_percent,
        }
        .validated()
    }

    /// Check a scenario that may have been built directly, clamping its win probability
    pub fn validated(&self) -> Result<Self, ValidationError> {
        if !self.months_to_trial.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "months_to_trial",
            });
        }
        if self.months_to_trial < 0.0 {
            return Err(ValidationError::NegativeMonths(self.months_to_trial));
        }
        if !self.annual_discount_rate_percent.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "annual_discount_rate_percent",
            });
        }
        if self.annual_discount_rate_percent < 0.0 {
            return Err(ValidationError::NegativeDiscountRate(
                self.annual_discount_rate_percent,
            ));
        }

        Ok(Self {
            win_probability: clamp_probability("win_probability", self.win_probability)?,
            ..*self
        })
    }

    /// Discount factor `1 / (1 + rate)^(months / 12)`
    ///
    /// Exactly 1 when either the rate or the horizon is zero.
    pub fn time_value_factor(&self) -> f64 {
        if self.annual_discount_rate_percent == 0.0 || self.months_to_trial == 0.0 {
            return 1.0;
        }
        let years = self.months_to_trial / 12.0;
        1.0 / (1.0 + self.annual_discount_rate_percent / 100.0).powf(years)
    }
}
