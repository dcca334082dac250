//! Validation errors for domain records and engine parameters

use thiserror::Error;

/// Malformed input rejected at the boundary
///
/// This is the only error category: once inputs are valid the
/// computation itself cannot fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A monetary field was negative
    #[error("{field} must not be negative (got {value})")]
    NegativeAmount {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value, in major units
        value: String,
    },

    /// A monetary field or total exceeded the largest supported amount
    #[error("{field} exceeds the largest supported amount (got {value})")]
    AmountTooLarge {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value, in major units
        value: String,
    },

    /// A numeric field was NaN or infinite
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Name of the offending field
        field: &'static str,
    },

    /// Months to trial was negative
    #[error("months_to_trial must not be negative (got {0})")]
    NegativeMonths(f64),

    /// Annual discount rate was negative
    #[error("annual_discount_rate_percent must not be negative (got {0})")]
    NegativeDiscountRate(f64),

    /// An offer expired before it was made
    #[error("offer expiry {expiry} is before offer date {date}")]
    ExpiryBeforeDate {
        /// Offer date (unix millis)
        date: u64,
        /// Offer expiry (unix millis)
        expiry: u64,
    },

    /// An engine policy value was out of range
    #[error("invalid policy value for {field}: {reason}")]
    InvalidPolicy {
        /// Name of the offending policy field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl ValidationError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NegativeAmount { field, .. } => *field,
            ValidationError::AmountTooLarge { field, .. } => *field,
            ValidationError::NonFinite { field } => *field,
            ValidationError::NegativeMonths(_) => "months_to_trial",
            ValidationError::NegativeDiscountRate(_) => "annual_discount_rate_percent",
            ValidationError::ExpiryBeforeDate { .. } => "expiry",
            ValidationError::InvalidPolicy { field, .. } => *field,
        }
    }
}
