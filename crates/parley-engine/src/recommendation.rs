//! Accept/counter/reject recommendation for a pending offer

use crate::{RecommendationPolicy, ValuationSnapshot};
use parley_domain::{clamp_probability, Money, ValidationError};
use serde::Serialize;
use std::fmt;

/// Recommended response to an offer
///
/// Variants are ordered from least to most settlement-inclined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Proceed to trial. Part of the taxonomy; no rule currently produces it.
    Litigate,

    /// Turn the offer down
    Reject,

    /// Make a counter-offer
    Counter,

    /// Take the offer
    Accept,
}

impl Recommendation {
    /// Get the recommendation name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Litigate => "litigate",
            Recommendation::Reject => "reject",
            Recommendation::Counter => "counter",
            Recommendation::Accept => "accept",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested negotiating range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterRange {
    /// Lowest figure worth settling at
    pub min: Money,
    /// Highest realistic figure
    pub max: Money,
}

impl CounterRange {
    /// True when the floor does not exceed the ceiling
    ///
    /// High costs against a weak claim can push the break-even floor above
    /// the value ceiling; such a range has nothing in it.
    pub fn is_viable(&self) -> bool {
        self.min <= self.max
    }
}

/// Outcome of [`RecommendationEngine::recommend`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    /// Recommended response
    pub recommendation: Recommendation,
    /// Justification, in the order the rules were evaluated
    pub reasoning: Vec<String>,
    /// Negotiating range, computed whatever the recommendation
    pub recommended_range: CounterRange,
    /// Counter-offer figure, when a counter rule matched directly
    pub suggested_counter: Option<Money>,
    /// Copied from the snapshot
    pub risk_adjusted_value: Money,
    /// Copied from the snapshot
    pub break_even_point: Money,
    /// Value lost to waiting for trial (risk-adjusted less present value)
    pub time_value_adjustment: Money,
}

/// Maps an offer and a valuation to a recommendation
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    policy: RecommendationPolicy,
}

impl RecommendationEngine {
    /// Create an engine with a validated policy
    pub fn new(policy: RecommendationPolicy) -> Result<Self, ValidationError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// The policy in use
    pub fn policy(&self) -> &RecommendationPolicy {
        &self.policy
    }

    /// Recommend a response to `current_offer`
    ///
    /// Rules are evaluated top-down and the first match sets the base
    /// recommendation. A low win probability then softens a rejection to a
    /// counter, and a high one adds advice to negotiate harder.
    ///
    /// A zero offer never clears a threshold, so an all-zero valuation with
    /// a zero offer is rejected rather than accepted on `0 >= 0`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a negative offer, an offer above
    /// [`Money::MAX`], or a NaN win probability.
    pub fn recommend(
        &self,
        snapshot: &ValuationSnapshot,
        current_offer: Money,
        win_probability: f64,
    ) -> Result<RecommendationResult, ValidationError> {
        let offer = current_offer.ensure_in_range("current_offer")?;
        let win_probability = clamp_probability("win_probability", win_probability)?;
        let policy = &self.policy;

        let risk_adjusted = snapshot.risk_adjusted_value;
        let present_value = snapshot.present_value;
        let break_even = snapshot.break_even;

        let clears = |threshold: Money| offer.is_positive() && offer >= threshold;

        let mut reasoning = Vec::new();
        let mut suggested_counter = None;

        let mut recommendation = if clears(risk_adjusted.scale(policy.accept_ratio)) {
            reasoning.push(match offer.ratio_to(risk_adjusted) {
                Some(ratio) => format!(
                    "Offer of {} is {:.1}% of the risk-adjusted value of {}",
                    offer,
                    ratio * 100.0,
                    risk_adjusted
                ),
                None => format!(
                    "Offer of {} exceeds a risk-adjusted value of {}",
                    offer, risk_adjusted
                ),
            });
            reasoning.push(format!(
                "Settling removes litigation risk and exposure to {} in future costs",
                snapshot.future_costs
            ));
            Recommendation::Accept
        } else if clears(present_value.scale(policy.present_value_accept_ratio)) {
            reasoning.push(format!(
                "Offer of {} is close to the present value of {} once the time value of money is taken into account",
                offer, present_value
            ));
            reasoning.push(format!(
                "Accepting avoids {} months of litigation",
                snapshot.months_to_trial
            ));
            Recommendation::Accept
        } else if clears(break_even.scale(policy.strong_counter_multiple)) {
            let counter = risk_adjusted.midpoint_to_major(offer);
            suggested_counter = Some(counter);
            reasoning.push(format!(
                "Offer of {} is well above break-even of {}, leaving room for negotiation",
                offer, break_even
            ));
            reasoning.push(format!(
                "Counter at {}, midway between the offer and the risk-adjusted value",
                counter
            ));
            Recommendation::Counter
        } else if clears(break_even) {
            let counter = risk_adjusted.scale_to_major(policy.fallback_counter_ratio);
            suggested_counter = Some(counter);
            reasoning.push(format!(
                "Offer of {} only just clears break-even of {}",
                offer, break_even
            ));
            reasoning.push(format!(
                "Upside of {} justifies continued negotiation; counter at {}",
                risk_adjusted, counter
            ));
            Recommendation::Counter
        } else {
            reasoning.push(format!(
                "Offer of {} does not clear break-even of {}",
                offer, break_even
            ));
            reasoning.push(format!(
                "Settling at this level would not recover the {} in costs already incurred",
                snapshot.incurred_costs
            ));
            Recommendation::Reject
        };

        if win_probability < policy.low_win_probability && recommendation == Recommendation::Reject {
            recommendation = Recommendation::Counter;
            reasoning.push(format!(
                "Win probability of {}% is low; negotiating a settlement is prudent",
                win_probability
            ));
        }

        if win_probability > policy.high_win_probability {
            reasoning.push(format!(
                "Win probability of {}% indicates a strong case that supports negotiating harder",
                win_probability
            ));
        }

        let recommended_range = CounterRange {
            min: std::cmp::max(
                break_even.scale(policy.range_floor_break_even_multiple),
                risk_adjusted.scale(policy.range_floor_value_ratio),
            ),
            max: risk_adjusted.scale(policy.range_ceiling_value_ratio),
        };

        tracing::debug!(
            %offer,
            win_probability,
            recommendation = %recommendation,
            reasons = reasoning.len(),
            "Evaluated settlement offer"
        );

        Ok(RecommendationResult {
            recommendation,
            reasoning,
            recommended_range,
            suggested_counter,
            risk_adjusted_value: risk_adjusted,
            break_even_point: break_even,
            time_value_adjustment: risk_adjusted - present_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn snapshot(risk_adjusted: i64, present_value: i64, break_even: i64) -> ValuationSnapshot {
        ValuationSnapshot {
            total_claim: Money::from_major(risk_adjusted * 2),
            expected_value: Money::from_major(risk_adjusted * 2),
            total_costs: Money::from_major(break_even),
            incurred_costs: Money::from_major(break_even),
            future_costs: Money::ZERO,
            recoverable_costs: Money::ZERO,
            non_recoverable_costs: Money::from_major(break_even),
            risk_adjusted_value: Money::from_major(risk_adjusted),
            time_value_factor: 1.0,
            present_value: Money::from_major(present_value),
            break_even: Money::from_major(break_even),
            net_expected_value: Money::from_major(risk_adjusted - break_even),
            worst_case: Money::from_major(-break_even),
            best_case: Money::from_major(risk_adjusted * 2 - break_even),
            months_to_trial: 18.0,
            cost_breakdown: BTreeMap::new(),
        }
    }

    fn zero_snapshot() -> ValuationSnapshot {
        snapshot(0, 0, 0)
    }

    fn recommend(snapshot: &ValuationSnapshot, offer: i64, win: f64) -> RecommendationResult {
        RecommendationEngine::default()
            .recommend(snapshot, Money::from_major(offer), win)
            .unwrap()
    }

    #[test]
    fn test_zero_offer_against_zero_valuation_is_rejected() {
        let result = recommend(&zero_snapshot(), 0, 50.0);
        assert_eq!(result.recommendation, Recommendation::Reject);
        assert_eq!(result.reasoning[0], "Offer of 0.00 does not clear break-even of 0.00");
        assert_eq!(result.suggested_counter, None);
    }

    #[test]
    fn test_positive_offer_against_zero_valuation_is_accepted() {
        let result = recommend(&zero_snapshot(), 1, 50.0);
        assert_eq!(result.recommendation, Recommendation::Accept);
        assert_eq!(result.reasoning[0], "Offer of 1.00 exceeds a risk-adjusted value of 0.00");
    }

    #[test]
    fn test_accept_on_risk_adjusted_value() {
        let result = recommend(&snapshot(100_000, 90_000, 20_000), 90_000, 50.0);
        assert_eq!(result.recommendation, Recommendation::Accept);
        assert_eq!(
            result.reasoning[0],
            "Offer of 90000.00 is 90.0% of the risk-adjusted value of 100000.00"
        );
        assert_eq!(result.reasoning.len(), 2);
    }

    #[test]
    fn test_accept_on_present_value() {
        // 0.9 × 100,000 = 90,000 not reached; 0.85 × 80,000 = 68,000 reached
        let result = recommend(&snapshot(100_000, 80_000, 20_000), 70_000, 50.0);
        assert_eq!(result.recommendation, Recommendation::Accept);
        assert_eq!(result.reasoning[1], "Accepting avoids 18 months of litigation");
    }

    #[test]
    fn test_counter_at_midpoint() {
        // 1.5 × 20,000 = 30,000 reached
        let result = recommend(&snapshot(100_000, 95_000, 20_000), 31_001, 50.0);
        assert_eq!(result.recommendation, Recommendation::Counter);
        // (100,000 + 31,001) / 2 = 65,500.5, rounded half up
        assert_eq!(result.suggested_counter, Some(Money::from_major(65_501)));
    }

    #[test]
    fn test_midpoint_counter_rounds_once() {
        let mut snapshot = snapshot(300_000, 300_000, 50_000);
        snapshot.risk_adjusted_value = Money::from_minor(30_000_099);
        snapshot.present_value = snapshot.risk_adjusted_value;
        let result = RecommendationEngine::default()
            .recommend(&snapshot, Money::from_major(100_000), 50.0)
            .unwrap();
        assert_eq!(result.recommendation, Recommendation::Counter);
        // (300,000.99 + 100,000) / 2 = 200,000.495
        assert_eq!(result.suggested_counter, Some(Money::from_major(200_000)));
    }

    #[test]
    fn test_fallback_counter_rounds_once() {
        let engine = RecommendationEngine::new(RecommendationPolicy {
            fallback_counter_ratio: 0.5,
            ..RecommendationPolicy::default()
        })
        .unwrap();
        let mut snapshot = snapshot(200_000, 200_000, 50_000);
        snapshot.risk_adjusted_value = Money::from_minor(20_000_099);
        snapshot.present_value = snapshot.risk_adjusted_value;
        let result = engine.recommend(&snapshot, Money::from_major(60_000), 50.0).unwrap();
        assert_eq!(result.recommendation, Recommendation::Counter);
        // 200,000.99 × 0.5 = 100,000.495
        assert_eq!(result.suggested_counter, Some(Money::from_major(100_000)));
    }

    #[test]
    fn test_counter_near_break_even() {
        let result = recommend(&snapshot(100_000, 95_000, 20_000), 20_000, 50.0);
        assert_eq!(result.recommendation, Recommendation::Counter);
        assert_eq!(result.suggested_counter, Some(Money::from_major(85_000)));
        assert!(result.reasoning[0].contains("only just clears break-even"));
    }

    #[test]
    fn test_reject_below_break_even() {
        let result = recommend(&snapshot(100_000, 95_000, 20_000), 19_999, 50.0);
        assert_eq!(result.recommendation, Recommendation::Reject);
        assert_eq!(
            result.reasoning[1],
            "Settling at this level would not recover the 20000.00 in costs already incurred"
        );
    }

    #[test]
    fn test_low_win_probability_softens_reject() {
        let result = recommend(&snapshot(100_000, 95_000, 20_000), 10_000, 30.0);
        assert_eq!(result.recommendation, Recommendation::Counter);
        assert_eq!(result.reasoning.len(), 3);
        assert!(result.reasoning[2].contains("is low"));
        assert_eq!(result.suggested_counter, None);
    }

    #[test]
    fn test_low_win_probability_leaves_accept_alone() {
        let result = recommend(&snapshot(100_000, 95_000, 20_000), 95_000, 30.0);
        assert_eq!(result.recommendation, Recommendation::Accept);
        assert_eq!(result.reasoning.len(), 2);
    }

    #[test]
    fn test_high_win_probability_adds_note_only() {
        let result = recommend(&snapshot(100_000, 95_000, 20_000), 10_000, 80.0);
        assert_eq!(result.recommendation, Recommendation::Reject);
        assert_eq!(result.reasoning.len(), 3);
        assert!(result.reasoning[2].contains("strong case"));
    }

    #[test]
    fn test_thresholds_are_strict_at_boundaries() {
        assert_eq!(recommend(&snapshot(100_000, 95_000, 20_000), 40_000, 40.0).recommendation, Recommendation::Counter);
        // Exactly 40 is not "low", exactly 75 is not "high"
        assert_eq!(recommend(&snapshot(100_000, 95_000, 20_000), 10_000, 40.0).recommendation, Recommendation::Reject);
        assert_eq!(recommend(&snapshot(100_000, 95_000, 20_000), 10_000, 75.0).reasoning.len(), 2);
    }

    #[test]
    fn test_recommended_range() {
        let result = recommend(&snapshot(100_000, 95_000, 20_000), 10_000, 50.0);
        // max(20,000 × 1.2, 100,000 × 0.7) .. 100,000 × 0.95
        assert_eq!(
            result.recommended_range,
            CounterRange { min: Money::from_major(70_000), max: Money::from_major(95_000) }
        );
        assert!(result.recommended_range.is_viable());

        let underwater = recommend(&snapshot(10_000, 9_000, 50_000), 10_000, 50.0);
        assert_eq!(underwater.recommended_range.min, Money::from_major(60_000));
        assert!(!underwater.recommended_range.is_viable());
    }

    #[test]
    fn test_copied_fields() {
        let result = recommend(&snapshot(100_000, 95_000, 20_000), 10_000, 50.0);
        assert_eq!(result.risk_adjusted_value, Money::from_major(100_000));
        assert_eq!(result.break_even_point, Money::from_major(20_000));
        assert_eq!(result.time_value_adjustment, Money::from_major(5_000));
    }

    #[test]
    fn test_invalid_inputs() {
        let engine = RecommendationEngine::default();
        assert!(engine.recommend(&zero_snapshot(), Money::from_major(-1), 50.0).is_err());
        assert!(engine.recommend(&zero_snapshot(), Money::ZERO, f64::NAN).is_err());
        let err = engine
            .recommend(&zero_snapshot(), Money::from_minor(i64::MAX), 50.0)
            .unwrap_err();
        assert_eq!(err.field(), "current_offer");
    }

    #[test]
    fn test_litigate_is_least_settlement_inclined() {
        assert!(Recommendation::Litigate < Recommendation::Reject);
        assert!(Recommendation::Reject < Recommendation::Counter);
        assert!(Recommendation::Counter < Recommendation::Accept);
        assert_eq!(Recommendation::Litigate.to_string(), "litigate");
    }
}
