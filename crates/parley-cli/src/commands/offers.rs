//! Offers command implementation.

use crate::case::CaseFile;
use crate::cli::OffersArgs;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the offers command.
pub fn execute_offers(args: OffersArgs, formatter: &Formatter) -> Result<()> {
    let case = CaseFile::load(Path::new(&args.case))?;

    let output = match args.open_at {
        Some(now) => formatter.format_offers(case.offers.open_offers(now), &case.offers)?,
        None => formatter.format_offers(case.offers.iter(), &case.offers)?,
    };

    println!("{}", output);
    Ok(())
}
