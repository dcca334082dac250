//! Parley Engine
//!
//! Settlement valuation and recommendation.
//!
//! The engine provides:
//! - Valuation: expected, risk-adjusted and present value, break-even, best/worst case
//! - Recommendation: accept/counter/reject cascade with an ordered reasoning trace
//! - Tunable policy constants with serde-backed configuration
//!
//! Both engines are pure: each call borrows its inputs and returns a fresh
//! value, so results can be recomputed on every input change.
//!
//! # Examples
//!
//! ```
//! use parley_domain::{ClaimComponent, CostCategory, CostItem, Money};
//! use parley_engine::{RecommendationEngine, Scenario, ValuationEngine, Recommendation};
//!
//! let claims = vec![ClaimComponent::new("Damages", Money::from_major(100_000), 80.0).unwrap()];
//! let costs = vec![
//!     CostItem::new(CostCategory::LegalFees, "Counsel", Money::from_major(10_000), true, true).unwrap(),
//! ];
//! let scenario = Scenario::new(60.0, 12.0, 5.0).unwrap();
//!
//! let snapshot = ValuationEngine::default().compute(&claims, &costs, &scenario).unwrap();
//! let result = RecommendationEngine::default()
//!     .recommend(&snapshot, Money::from_major(50_000), 60.0)
//!     .unwrap();
//! assert_eq!(result.recommendation, Recommendation::Accept);
//! ```

#![warn(missing_docs)]

mod config;
mod recommendation;
mod scenario;
mod valuation;

pub use config::{EnginePolicy, RecommendationPolicy, ValuationPolicy};
pub use parley_domain::ValidationError;
pub use recommendation::{CounterRange, Recommendation, RecommendationEngine, RecommendationResult};
pub use scenario::Scenario;
pub use valuation::{ValuationEngine, ValuationSnapshot};
