//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use parley_domain::{CostCategory, Money, OfferLedger, SettlementOffer};
use parley_engine::{Recommendation, RecommendationResult, ValuationSnapshot};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Columns, object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a valuation and its recommendation.
    pub fn format_evaluation(
        &self,
        case_name: &str,
        offer: Money,
        snapshot: &ValuationSnapshot,
        result: &RecommendationResult,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "case": case_name,
                "offer": offer,
                "valuation": snapshot,
                "recommendation": result,
            }))?),
            OutputFormat::Table => Ok(self.format_evaluation_table(case_name, offer, snapshot, result)),
            OutputFormat::Quiet => Ok(result.recommendation.to_string()),
        }
    }

    fn format_evaluation_table(
        &self,
        case_name: &str,
        offer: Money,
        snapshot: &ValuationSnapshot,
        result: &RecommendationResult,
    ) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        let rows = [
            ("Total claim", snapshot.total_claim),
            ("Expected value", snapshot.expected_value),
            ("Risk-adjusted value", snapshot.risk_adjusted_value),
            ("Present value", snapshot.present_value),
            ("Total costs", snapshot.total_costs),
            ("  incurred", snapshot.incurred_costs),
            ("  future", snapshot.future_costs),
            ("  recoverable", snapshot.recoverable_costs),
            ("  non-recoverable", snapshot.non_recoverable_costs),
            ("Break-even", snapshot.break_even),
            ("Net expected value", snapshot.net_expected_value),
            ("Best case", snapshot.best_case),
            ("Worst case", snapshot.worst_case),
        ];
        for (label, value) in rows {
            builder.push_record([label.to_string(), value.to_string()]);
        }
        for category in CostCategory::ALL {
            if let Some(total) = snapshot.cost_breakdown.get(&category) {
                builder.push_record([format!("  {}", category.as_str()), total.to_string()]);
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Modify::new(Columns::single(1)).with(Alignment::right()));

        let mut out = Vec::new();
        out.push(self.colorize(case_name, "cyan"));
        out.push(table.to_string());
        out.push(format!(
            "Offer {}: {}",
            offer,
            self.recommendation_label(result.recommendation)
        ));
        for reason in &result.reasoning {
            out.push(format!("  - {}", reason));
        }
        if let Some(counter) = result.suggested_counter {
            out.push(format!("Suggested counter-offer: {}", counter));
        }
        let range = result.recommended_range;
        let range_line = format!("Recommended range: {} - {}", range.min, range.max);
        if range.is_viable() {
            out.push(range_line);
        } else {
            out.push(self.warning(&format!("{} (floor exceeds ceiling)", range_line)));
        }

        out.join("\n")
    }

    /// Format an offer history.
    pub fn format_offers<'a>(
        &self,
        offers: impl IntoIterator<Item = &'a SettlementOffer>,
        ledger: &OfferLedger,
    ) -> Result<String> {
        let offers: Vec<&SettlementOffer> = offers.into_iter().collect();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "offers": offers,
                "negotiation_gap": ledger.negotiation_gap(),
            }))?),
            OutputFormat::Table => Ok(self.format_offers_table(&offers, ledger)),
            OutputFormat::Quiet => Ok(offers
                .iter()
                .map(|o| o.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_offers_table(&self, offers: &[&SettlementOffer], ledger: &OfferLedger) -> String {
        if offers.is_empty() {
            return self.colorize("No offers found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Date (ms)", "From", "Amount", "Expiry (ms)", "Conditions"]);
        for offer in offers {
            builder.push_record([
                offer.date.to_string(),
                offer.from.as_str().to_string(),
                offer.amount.to_string(),
                offer.expiry.map(|e| e.to_string()).unwrap_or_default(),
                offer.conditions.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        match ledger.negotiation_gap() {
            Some(gap) => format!("{}\nNegotiation gap: {}", table, gap),
            None => table.to_string(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn recommendation_label(&self, recommendation: Recommendation) -> String {
        let label = recommendation.as_str().to_uppercase();
        let color = match recommendation {
            Recommendation::Accept => "green",
            Recommendation::Counter => "yellow",
            Recommendation::Reject => "red",
            Recommendation::Litigate => "magenta",
        };
        self.colorize(&label, color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
