//! Case files: the structured input the CLI hands to the engines.

use crate::error::Result;
use parley_domain::{ClaimPortfolio, CostLedger, Money, OfferLedger, OfferParty};
use parley_engine::Scenario;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything needed to value a case and review an offer.
///
/// ```json
/// {
///   "name": "Acme v Widgets",
///   "claims": [{ "name": "Breach", "amount": 5000000, "probability": 85 }],
///   "costs": [{ "category": "legal_fees", "amount": 250000, "incurred": true, "recoverable": true }],
///   "offers": [{ "amount": 2000000, "date": 1700000000000, "from": "opponent" }],
///   "scenario": { "win_probability": 50, "months_to_trial": 12, "annual_discount_rate_percent": 5 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFile {
    /// Case label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Heads of claim
    #[serde(default)]
    pub claims: ClaimPortfolio,

    /// Litigation costs
    #[serde(default)]
    pub costs: CostLedger,

    /// Offer history
    #[serde(default)]
    pub offers: OfferLedger,

    /// Risk and time parameters
    pub scenario: Scenario,

    /// Offer to evaluate; defaults to the opponent's latest offer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_offer: Option<Money>,
}

impl CaseFile {
    /// Read and parse a case file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a case from JSON, validating the offer history.
    ///
    /// Claims, costs and the scenario are validated by the engine when the
    /// case is valued.
    pub fn from_json(json: &str) -> Result<Self> {
        let case: CaseFile = serde_json::from_str(json)?;
        case.offers.validate()?;
        Ok(case)
    }

    /// The offer under review: explicit `current_offer`, else the opponent's latest.
    pub fn offer_under_review(&self) -> Option<Money> {
        self.current_offer.or_else(|| {
            self.offers
                .latest_from(OfferParty::Opponent)
                .map(|offer| offer.amount)
        })
    }

    /// Label for display.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed case")
    }
}
