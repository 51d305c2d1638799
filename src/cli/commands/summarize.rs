use anyhow::{ anyhow, Result };
use std::fs;
use std::path::Path;

use factcheck::FactChecker;

use crate::cli::ui;

/// Transcript summary command
pub async fn execute<F: FactChecker>(
    checker: &F,
    transcript_path: &Path,
    output_format: &str
) -> Result<()> {
    let transcript = fs::read_to_string(transcript_path)
        .map_err(|e| anyhow!("Failed to read transcript {}: {}", transcript_path.display(), e))?;

    let spinner = ui::spinner_with_message("Generating summary...");
    let summary = checker.summarize(&transcript).await;
    spinner.finish_and_clear();
    let summary = summary?;

    if output_format.eq_ignore_ascii_case("json") {
        println!("{}", serde_json::json!({ "summary": summary }));
    } else {
        ui::print_header("Summary");
        ui::print_text(&summary);
        ui::print_success("Summary generated");
    }
    Ok(())
}
