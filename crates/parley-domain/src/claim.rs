//! Claim components and the portfolio that groups them

use crate::{Money, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

/// Clamp a success probability (percent) into `[0, 100]`
///
/// Probabilities often come from sliders that can transiently overshoot,
/// so out-of-range values are clamped rather than rejected. NaN carries no
/// usable value and is rejected.
pub fn clamp_probability(field: &'static str, percent: f64) -> Result<f64, ValidationError> {
    if percent.is_nan() {
        return Err(ValidationError::NonFinite { field });
    }
    Ok(percent.clamp(0.0, 100.0))
}

/// One severable head of claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimComponent {
    /// Unique identifier
    #[serde(default)]
    pub id: RecordId,

    /// Label shown to the user
    pub name: String,

    /// Amount claimed (non-negative)
    pub amount: Money,

    /// Likelihood this head succeeds, in percent [0, 100]
    pub probability: f64,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ClaimComponent {
    /// Create a validated claim component
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeAmount`] for a negative amount,
    /// [`ValidationError::AmountTooLarge`] above [`Money::MAX`] and
    /// [`ValidationError::NonFinite`] for a NaN probability. Probabilities
    /// outside `[0, 100]` are clamped.
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        probability: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: RecordId::new(),
            name: name.into(),
            amount: amount.ensure_in_range("amount")?,
            probability: clamp_probability("probability", probability)?,
            notes: None,
        })
    }

    /// Check the invariants of a component that may have been built directly
    ///
    /// Returns the component with its probability clamped.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        let mut checked = self.clone();
        checked.amount = self.amount.ensure_in_range("amount")?;
        checked.probability = clamp_probability("probability", self.probability)?;
        Ok(checked)
    }

    /// Amount weighted by this component's success probability
    pub fn weighted_amount(&self) -> Money {
        self.amount.percent(self.probability.clamp(0.0, 100.0))
    }
}

/// Ordered collection of claim components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimPortfolio {
    components: Vec<ClaimComponent>,
}

impl ClaimPortfolio {
    /// Create an empty portfolio
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component, validating it first
    pub fn add(&mut self, component: ClaimComponent) -> Result<RecordId, ValidationError> {
        let component = component.validated()?;
        let id = component.id;
        self.components.push(component);
        Ok(id)
    }

    /// Remove a component by id
    pub fn remove(&mut self, id: RecordId) -> Option<ClaimComponent> {
        let index = self.components.iter().position(|c| c.id == id)?;
        Some(self.components.remove(index))
    }

    /// Look up a component by id
    pub fn get(&self, id: RecordId) -> Option<&ClaimComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Iterate components in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ClaimComponent> {
        self.components.iter()
    }

    /// Components as a slice
    pub fn as_slice(&self) -> &[ClaimComponent] {
        &self.components
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when the portfolio has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Sum of all claimed amounts
    pub fn total_claim(&self) -> Money {
        self.components.iter().map(|c| c.amount).sum()
    }

    /// Sum of probability-weighted amounts
    pub fn expected_value(&self) -> Money {
        self.components.iter().map(ClaimComponent::weighted_amount).sum()
    }
}

impl FromIterator<ClaimComponent> for ClaimPortfolio {
    fn from_iter<I: IntoIterator<Item = ClaimComponent>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(amount: i64, probability: f64) -> ClaimComponent {
        ClaimComponent::new("head", Money::from_major(amount), probability).unwrap()
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = ClaimComponent::new("loss", Money::from_major(-1), 50.0).unwrap_err();
        assert!(matches!(err, ValidationError::NegativeAmount { field: "amount", .. }));
    }

    #[test]
    fn test_probability_clamped() {
        assert_eq!(component(100, 130.0).probability, 100.0);
        assert_eq!(component(100, -5.0).probability, 0.0);
        assert!(ClaimComponent::new("x", Money::ZERO, f64::NAN).is_err());
    }

    #[test]
    fn test_weighted_amount() {
        assert_eq!(component(750_000, 70.0).weighted_amount(), Money::from_major(525_000));
    }

    #[test]
    fn test_portfolio_aggregates() {
        let mut portfolio = ClaimPortfolio::new();
        portfolio.add(component(5_000_000, 85.0)).unwrap();
        portfolio.add(component(750_000, 70.0)).unwrap();
        portfolio.add(component(1_500_000, 40.0)).unwrap();
        portfolio.add(component(800_000, 60.0)).unwrap();

        assert_eq!(portfolio.len(), 4);
        assert_eq!(portfolio.total_claim(), Money::from_major(8_050_000));
        assert_eq!(portfolio.expected_value(), Money::from_major(5_855_000));
    }

    #[test]
    fn test_add_validates_direct_construction() {
        let mut portfolio = ClaimPortfolio::new();
        let mut bad = component(10, 50.0);
        bad.amount = Money::from_major(-10);
        assert!(portfolio.add(bad).is_err());
        assert!(portfolio.is_empty());

        let mut overshoot = component(10, 50.0);
        overshoot.probability = 140.0;
        let id = portfolio.add(overshoot).unwrap();
        assert_eq!(portfolio.get(id).unwrap().probability, 100.0);
    }

    #[test]
    fn test_remove() {
        let mut portfolio = ClaimPortfolio::new();
        let id = portfolio.add(component(10, 50.0)).unwrap();
        assert!(portfolio.remove(RecordId::from_value(1)).is_none());
        assert_eq!(portfolio.remove(id).map(|c| c.id), Some(id));
        assert!(portfolio.is_empty());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"[{"name": "Lost profits", "amount": 5000000, "probability": 85}]"#;
        let portfolio: ClaimPortfolio = serde_json::from_str(json).unwrap();
        let first = portfolio.iter().next().unwrap();
        assert_eq!(first.amount, Money::from_major(5_000_000));
        assert!(first.notes.is_none());
    }
}
