#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
pub fn run() -> Result<(), crate::error::AppError> {
    use crate::adapters::cli::{Args, parse_inputs, print_output};
    use crate::balance::calculator::compute_report;
    use chrono::Datelike;

    let args = Args::parse();
    let (reading, mut settings) = parse_inputs(&args)?;

    // The engine requires an explicit month; only the adapter consults the
    // wall clock.
    if settings.month.is_none() {
        settings.month = Some(chrono::Local::now().month());
    }

    let report = compute_report(&reading, &settings)?;

    print_output(&report, &args)?;

    Ok(())
}
