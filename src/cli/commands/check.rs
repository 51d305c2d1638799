use anyhow::{ anyhow, Result };
use std::fs;
use std::path::Path;

use factcheck::{ Claim, FactChecker };

use crate::cli::ui;

/// Fact-check command
pub async fn execute<F: FactChecker>(
    checker: &F,
    claim_arg: Option<&str>,
    claim_file: Option<&Path>,
    output_format: &str
) -> Result<()> {
    let text = match (claim_arg, claim_file) {
        (Some(claim), _) => claim.to_string(),
        (None, Some(path)) => fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read claim file {}: {}", path.display(), e))?,
        (None, None) => ui::get_claim()?,
    };

    let claim = Claim::new(text.trim());
    if claim.is_blank() {
        return Err(anyhow!("Claim must not be empty"));
    }

    let spinner = ui::spinner_with_message("Running fact-checking pipeline...");
    let report = checker.run_fact_check(&claim).await;
    spinner.finish_and_clear();

    if output_format.eq_ignore_ascii_case("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::print_header("Fact-Checking Claim");
        ui::print_text(claim.as_str());
        ui::display_report(&report);
    }

    if let Some(error) = report.error() {
        return Err(anyhow!("Fact check failed: {}", error));
    }
    Ok(())
}
