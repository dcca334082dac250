//! Litigation cost items and the ledger that totals them

use crate::{Money, RecordId, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category of a litigation cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    /// Solicitor and counsel fees
    LegalFees,

    /// Court and filing fees
    CourtFees,

    /// Expert witness fees
    Expert,

    /// Travel and accommodation
    Travel,

    /// Anything else
    Other,
}

impl CostCategory {
    /// All categories in display order
    pub const ALL: [CostCategory; 5] = [
        CostCategory::LegalFees,
        CostCategory::CourtFees,
        CostCategory::Expert,
        CostCategory::Travel,
        CostCategory::Other,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CostCategory::LegalFees => "legal_fees",
            CostCategory::CourtFees => "court_fees",
            CostCategory::Expert => "expert",
            CostCategory::Travel => "travel",
            CostCategory::Other => "other",
        }
    }

    /// Parse a category from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "legal_fees" => Some(CostCategory::LegalFees),
            "court_fees" => Some(CostCategory::CourtFees),
            "expert" => Some(CostCategory::Expert),
            "travel" => Some(CostCategory::Travel),
            "other" => Some(CostCategory::Other),
            _ => None,
        }
    }
}

impl std::str::FromStr for CostCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cost category: {}", s))
    }
}

/// One litigation cost line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    /// Unique identifier
    #[serde(default)]
    pub id: RecordId,

    /// Cost category
    pub category: CostCategory,

    /// What the cost is for
    #[serde(default)]
    pub description: String,

    /// Amount (non-negative)
    pub amount: Money,

    /// Already spent (true) or projected (false)
    pub incurred: bool,

    /// Claimable from the losing side if the case succeeds
    pub recoverable: bool,
}

impl CostItem {
    /// Create a validated cost item
    pub fn new(
        category: CostCategory,
        description: impl Into<String>,
        amount: Money,
        incurred: bool,
        recoverable: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: RecordId::new(),
            category,
            description: description.into(),
            amount: amount.ensure_in_range("amount")?,
            incurred,
            recoverable,
        })
    }

    /// Check the invariants of an item that may have been built directly
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.amount.ensure_in_range("amount")?;
        Ok(())
    }
}

/// Ordered collection of cost items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostLedger {
    items: Vec<CostItem>,
}

impl CostLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, validating it first
    pub fn add(&mut self, item: CostItem) -> Result<RecordId, ValidationError> {
        item.validate()?;
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    /// Remove an item by id
    pub fn remove(&mut self, id: RecordId) -> Option<CostItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Look up an item by id
    pub fn get(&self, id: RecordId) -> Option<&CostItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Iterate items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CostItem> {
        self.items.iter()
    }

    /// Items as a slice
    pub fn as_slice(&self) -> &[CostItem] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the ledger has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all costs
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Sum of costs already spent
    pub fn incurred(&self) -> Money {
        self.sum_where(|i| i.incurred)
    }

    /// Sum of projected costs
    pub fn future(&self) -> Money {
        self.total() - self.incurred()
    }

    /// Sum of costs claimable from the other side
    pub fn recoverable(&self) -> Money {
        self.sum_where(|i| i.recoverable)
    }

    /// Sum of costs that stay with us whatever the outcome
    pub fn non_recoverable(&self) -> Money {
        self.total() - self.recoverable()
    }

    /// Totals per category, omitting categories with no items
    pub fn by_category(&self) -> BTreeMap<CostCategory, Money> {
        category_totals(&self.items)
    }

    fn sum_where(&self, predicate: impl Fn(&CostItem) -> bool) -> Money {
        self.items.iter().filter(|i| predicate(i)).map(|i| i.amount).sum()
    }
}

/// Totals per category over `items`, omitting categories with no items
pub fn category_totals(items: &[CostItem]) -> BTreeMap<CostCategory, Money> {
    let mut totals = BTreeMap::new();
    for item in items {
        *totals.entry(item.category).or_insert(Money::ZERO) += item.amount;
    }
    totals
}

impl FromIterator<CostItem> for CostLedger {
    fn from_iter<I: IntoIterator<Item = CostItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
