//! Settlement offers and the append-only ledger that records them

use crate::{Money, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

/// Which side made an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferParty {
    /// Our side
    #[serde(alias = "self")]
    Ours,

    /// The opposing side
    Opponent,
}

impl OfferParty {
    /// Get the party name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferParty::Ours => "ours",
            OfferParty::Opponent => "opponent",
        }
    }
}

/// A settlement offer exchanged between the parties
///
/// Offers are historical records: a revised offer is a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementOffer {
    /// Unique identifier
    #[serde(default)]
    pub id: RecordId,

    /// Amount offered
    pub amount: Money,

    /// When the offer was made (unix millis)
    pub date: u64,

    /// Who made the offer
    pub from: OfferParty,

    /// Conditions attached to the offer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,

    /// When the offer lapses (unix millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<u64>,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SettlementOffer {
    /// Create an offer with no conditions, expiry or notes
    pub fn new(amount: Money, date: u64, from: OfferParty) -> Self {
        Self {
            id: RecordId::new(),
            amount,
            date,
            from,
            conditions: None,
            expiry: None,
            notes: None,
        }
    }

    /// Set the expiry
    pub fn with_expiry(mut self, expiry: u64) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Set the conditions
    pub fn with_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }

    /// Check the offer's invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.amount.ensure_in_range("amount")?;
        if let Some(expiry) = self.expiry {
            if expiry < self.date {
                return Err(ValidationError::ExpiryBeforeDate {
                    date: self.date,
                    expiry,
                });
            }
        }
        Ok(())
    }

    /// True when the offer has an expiry at or before `now`
    pub fn is_expired(&self, now: u64) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= now)
    }
}

/// Append-only history of offers
///
/// There is no way to edit or remove a recorded offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferLedger {
    offers: Vec<SettlementOffer>,
}

impl OfferLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an offer
    pub fn record(&mut self, offer: SettlementOffer) -> Result<&SettlementOffer, ValidationError> {
        offer.validate()?;
        self.offers.push(offer);
        Ok(&self.offers[self.offers.len() - 1])
    }

    /// Check every recorded offer (ledgers read from disk skip `record`)
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.offers.iter().try_for_each(SettlementOffer::validate)
    }

    /// Iterate offers in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = &SettlementOffer> {
        self.offers.iter()
    }

    /// Number of offers
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// True when no offers have been recorded
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Most recently recorded offer
    pub fn latest(&self) -> Option<&SettlementOffer> {
        self.offers.last()
    }

    /// Most recently recorded offer from one party
    pub fn latest_from(&self, party: OfferParty) -> Option<&SettlementOffer> {
        self.offers.iter().rev().find(|o| o.from == party)
    }

    /// Offers that have not lapsed at `now`
    pub fn open_offers(&self, now: u64) -> impl Iterator<Item = &SettlementOffer> {
        self.offers.iter().filter(move |o| !o.is_expired(now))
    }

    /// Our latest figure minus the opponent's latest figure
    ///
    /// `None` until both sides have made an offer.
    pub fn negotiation_gap(&self) -> Option<Money> {
        let ours = self.latest_from(OfferParty::Ours)?;
        let theirs = self.latest_from(OfferParty::Opponent)?;
        Some(ours.amount - theirs.amount)
    }
}
