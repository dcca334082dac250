//! Evaluate command implementation.

use crate::case::CaseFile;
use crate::cli::EvaluateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use parley_domain::Money;
use parley_engine::{RecommendationEngine, ValuationEngine};
use std::path::Path;

/// Execute the evaluate command.
pub fn execute_evaluate(args: EvaluateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let case = CaseFile::load(Path::new(&args.case))?;
    let output = evaluate_case(&case, &args, config, formatter)?;
    println!("{}", output);
    Ok(())
}

/// Value a loaded case, applying command-line overrides, and format the result.
pub fn evaluate_case(
    case: &CaseFile,
    args: &EvaluateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let mut scenario = case.scenario;
    if let Some(win) = args.win_probability {
        scenario.win_probability = win;
    }
    if let Some(months) = args.months {
        scenario.months_to_trial = months;
    }
    if let Some(rate) = args.discount_rate {
        scenario.annual_discount_rate_percent = rate;
    }
    let scenario = scenario.validated()?;

    let offer = match args.offer {
        Some(amount) => Money::from_major_f64(amount)
            .ok_or_else(|| CliError::InvalidInput(format!("Invalid offer amount: {}", amount)))?,
        None => case.offer_under_review().ok_or_else(|| {
            CliError::InvalidInput(
                "No offer to evaluate. Pass --offer or record an opponent offer in the case file"
                    .to_string(),
            )
        })?,
    };

    let valuation = ValuationEngine::new(config.policy.valuation.clone())?;
    let recommender = RecommendationEngine::new(config.policy.recommendation.clone())?;

    let snapshot = valuation.compute(case.claims.as_slice(), case.costs.as_slice(), &scenario)?;
    let result = recommender.recommend(&snapshot, offer, scenario.win_probability)?;

    tracing::info!(
        case = case.display_name(),
        %offer,
        recommendation = %result.recommendation,
        "Evaluated case"
    );

    formatter.format_evaluation(case.display_name(), offer, &snapshot, &result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    const CASE: &str = r#"{
        "claims": [
            { "name": "Breach", "amount": 5000000, "probability": 85 },
            { "name": "Consequential", "amount": 750000, "probability": 70 },
            { "name": "Lost profits", "amount": 1500000, "probability": 40 },
            { "name": "Reputation", "amount": 800000, "probability": 60 }
        ],
        "costs": [
            { "category": "legal_fees", "amount": 250000, "incurred": true, "recoverable": true },
            { "category": "legal_fees", "amount": 500000, "incurred": false, "recoverable": true },
            { "category": "expert", "amount": 50000, "incurred": true, "recoverable": true },
            { "category": "expert", "amount": 150000, "incurred": false, "recoverable": true },
            { "category": "travel", "amount": 30000, "incurred": true, "recoverable": false }
        ],
        "offers": [
            { "amount": 2000000, "date": 1000, "from": "opponent" }
        ],
        "scenario": { "win_probability": 50, "months_to_trial": 12, "annual_discount_rate_percent": 5 }
    }"#;

    fn args() -> EvaluateArgs {
        EvaluateArgs {
            case: "case.json".to_string(),
            offer: None,
            win_probability: None,
            months: None,
            discount_rate: None,
        }
    }

    fn quiet() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    #[test]
    fn test_uses_opponent_offer() {
        let case = CaseFile::from_json(CASE).unwrap();
        let output = evaluate_case(&case, &args(), &Config::default(), &quiet()).unwrap();
        assert_eq!(output, "counter");
    }

    #[test]
    fn test_offer_override() {
        let case = CaseFile::from_json(CASE).unwrap();
        let args = EvaluateArgs {
            offer: Some(3_000_000.0),
            ..args()
        };
        let output = evaluate_case(&case, &args, &Config::default(), &quiet()).unwrap();
        assert_eq!(output, "accept");
    }

    #[test]
    fn test_scenario_override_validated() {
        let case = CaseFile::from_json(CASE).unwrap();
        let args = EvaluateArgs {
            months: Some(-3.0),
            ..args()
        };
        let err = evaluate_case(&case, &args, &Config::default(), &quiet()).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_no_offer() {
        let mut case = CaseFile::from_json(CASE).unwrap();
        case.offers = Default::default();
        let err = evaluate_case(&case, &args(), &Config::default(), &quiet()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_oversized_offer_rejected() {
        let case = CaseFile::from_json(CASE).unwrap();
        let args = EvaluateArgs {
            offer: Some(1e17),
            ..args()
        };
        let err = evaluate_case(&case, &args, &Config::default(), &quiet()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_policy_from_config() {
        let case = CaseFile::from_json(CASE).unwrap();
        let mut config = Config::default();
        // Accept anything at or above 60% of risk-adjusted value
        config.policy.recommendation.accept_ratio = 0.6;
        let output = evaluate_case(&case, &args(), &config, &quiet()).unwrap();
        assert_eq!(output, "accept");
    }
}
