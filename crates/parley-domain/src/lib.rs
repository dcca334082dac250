//! Parley Domain Layer
//!
//! This crate holds the leaf data the settlement engines consume: claim
//! components, litigation costs, and the history of exchanged offers.
//! It contains no computation beyond simple aggregates.
//!
//! ## Key Concepts
//!
//! - **Money**: Fixed-point amount in minor units (never floating point)
//! - **ClaimPortfolio**: Severable heads of claim, each with a success probability
//! - **CostLedger**: Incurred and projected costs, recoverable or not
//! - **OfferLedger**: Append-only record of offers from either side
//!
//! ## Validation
//!
//! Records are validated at construction. Negative amounts are rejected
//! with a [`ValidationError`] naming the field; probabilities are clamped
//! into `[0, 100]`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod cost;
pub mod error;
pub mod id;
pub mod money;
pub mod offer;

// Re-exports for convenience
pub use claim::{clamp_probability, ClaimComponent, ClaimPortfolio};
pub use cost::{category_totals, CostCategory, CostItem, CostLedger};
pub use error::ValidationError;
pub use id::RecordId;
pub use money::{Money, MAX_MAJOR};
pub use offer::{OfferLedger, OfferParty, SettlementOffer};
