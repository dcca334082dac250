//! Valuation of a claim portfolio against its litigation costs
//!
//! Implements the nine-step valuation:
//! 1. Total claim
//! 2. Expected value (per-component probability weighting)
//! 3. Cost aggregates
//! 4. Risk adjustment by overall win probability
//! 5. Time-value discounting
//! 6. Break-even
//! 7. Net expected value
//! 8. Worst case
//! 9. Best case

use crate::{Scenario, ValuationPolicy};
use parley_domain::{category_totals, ClaimComponent, CostCategory, CostItem, Money, ValidationError};
use serde::Serialize;
use std::collections::BTreeMap;

/// Valuation of a case at one set of inputs
///
/// Derived data: recompute it whenever an input changes rather than storing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationSnapshot {
    /// Sum of all claimed amounts
    pub total_claim: Money,
    /// Sum of probability-weighted claim amounts
    pub expected_value: Money,
    /// Sum of all costs
    pub total_costs: Money,
    /// Costs already spent
    pub incurred_costs: Money,
    /// Projected costs
    pub future_costs: Money,
    /// Costs claimable from the other side on success
    pub recoverable_costs: Money,
    /// Costs that are never recovered
    pub non_recoverable_costs: Money,
    /// Expected value scaled by the overall win probability
    pub risk_adjusted_value: Money,
    /// Discount factor applied to reach present value
    pub time_value_factor: f64,
    /// Risk-adjusted value discounted to today
    pub present_value: Money,
    /// Minimum settlement that avoids a net loss
    pub break_even: Money,
    /// Risk-adjusted value less all costs
    pub net_expected_value: Money,
    /// Loss including an adverse costs order
    pub worst_case: Money,
    /// Full recovery of claim and recoverable costs
    pub best_case: Money,
    /// Months to trial the valuation was discounted over
    pub months_to_trial: f64,
    /// Cost totals per category
    pub cost_breakdown: BTreeMap<CostCategory, Money>,
}

/// Computes [`ValuationSnapshot`]s
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    policy: ValuationPolicy,
}

impl ValuationEngine {
    /// Create an engine with a validated policy
    pub fn new(policy: ValuationPolicy) -> Result<Self, ValidationError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// The policy in use
    pub fn policy(&self) -> &ValuationPolicy {
        &self.policy
    }

    /// Value a case
    ///
    /// Every record is re-validated first; component probabilities and the
    /// win probability are clamped into `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a negative amount, negative months
    /// or discount rate, or a NaN probability. Claim and cost totals above
    /// [`Money::MAX`] are rejected, which keeps every later step in range.
    pub fn compute(
        &self,
        claims: &[ClaimComponent],
        costs: &[CostItem],
        scenario: &Scenario,
    ) -> Result<ValuationSnapshot, ValidationError> {
        let scenario = scenario.validated()?;
        let claims = claims
            .iter()
            .map(ClaimComponent::validated)
            .collect::<Result<Vec<_>, _>>()?;
        costs.iter().try_for_each(CostItem::validate)?;

        // Step 1: Total claim
        let total_claim = Money::checked_total(claims.iter().map(|c| c.amount), "total_claim")?;

        // Step 2: Expected value
        let expected_value: Money = claims.iter().map(ClaimComponent::weighted_amount).sum();

        // Step 3: Cost aggregates
        let total_costs = Money::checked_total(costs.iter().map(|c| c.amount), "total_costs")?;
        let incurred_costs: Money = costs.iter().filter(|c| c.incurred).map(|c| c.amount).sum();
        let future_costs = total_costs - incurred_costs;
        let recoverable_costs: Money =
            costs.iter().filter(|c| c.recoverable).map(|c| c.amount).sum();
        let non_recoverable_costs = total_costs - recoverable_costs;

        let cost_breakdown = category_totals(costs);

        // Step 4: Risk adjustment
        let risk_adjusted_value = expected_value.percent(scenario.win_probability);

        // Step 5: Time value
        let time_value_factor = scenario.time_value_factor();
        let present_value = risk_adjusted_value.scale(time_value_factor);

        // Step 6: Break-even
        let break_even = incurred_costs + future_costs.scale(self.policy.future_cost_exposure);

        // Step 7: Net expected value
        let net_expected_value = risk_adjusted_value - total_costs;

        // Step 8: Worst case
        let worst_case =
            -(total_costs + recoverable_costs.scale(self.policy.adverse_costs_probability));

        // Step 9: Best case
        let best_case = total_claim + recoverable_costs - non_recoverable_costs;

        tracing::debug!(
            claims = claims.len(),
            costs = costs.len(),
            %expected_value,
            %risk_adjusted_value,
            %present_value,
            %break_even,
            "Computed valuation snapshot"
        );

        Ok(ValuationSnapshot {
            total_claim,
            expected_value,
            total_costs,
            incurred_costs,
            future_costs,
            recoverable_costs,
            non_recoverable_costs,
            risk_adjusted_value,
            time_value_factor,
            present_value,
            break_even,
            net_expected_value,
            worst_case,
            best_case,
            months_to_trial: scenario.months_to_trial,
            cost_breakdown,
        })
    }
}
