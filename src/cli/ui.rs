use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Input };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use factcheck::{ ArticleContent, ContentStatus, Report, Verdict };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn term_width() -> usize {
    (Term::stdout().size().1 as usize).max(40)
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping
pub fn print_text(text: &str) {
    let width = term_width();
    for line in text.lines() {
        for wrapped_line in wrap(line, width.saturating_sub(10)) {
            println!("{}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Ask for the claim interactively
pub fn get_claim() -> std::io::Result<String> {
    Input::<String>::with_theme(&get_theme())
        .with_prompt("Enter context to fact-check")
        .interact_text()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print a verdict with color
pub fn print_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Judged { confidence, explanation, .. } => {
            let label = if verdict.is_supported() {
                "✓ Supported".green().bold()
            } else {
                "✗ Not supported".red().bold()
            };
            println!("{}", label);
            print_result("Confidence", &format!("{:.0}%", confidence * 100.0));
            print_result("Explanation", "");
            print_text(if explanation.is_empty() { "No explanation provided." } else { explanation.as_str() });
        }
        Verdict::Unparseable { raw } => {
            print_warning("The model's verdict could not be parsed; raw answer follows");
            print_text(raw);
        }
    }
}

fn print_article(index: usize, article: &ArticleContent) {
    let status = match article.status {
        ContentStatus::Ok => "OK".green(),
        ContentStatus::Empty => "EMPTY".yellow(),
        ContentStatus::Failed => "FAILED".red(),
    };
    let url = if article.url.is_empty() { "(no url)" } else { article.url.as_str() };
    println!("{:>3}. [{}] {}", index + 1, status, url);
    if let Some(error) = &article.error {
        println!("       {}", error.dimmed());
    }
}

/// Render a full report as text
pub fn display_report(report: &Report) {
    print_header("Refined Context");
    print_text(&report.refined.context);
    if !report.refined.keywords.is_empty() {
        print_result("Keywords", &report.refined.keywords.join(", "));
    }

    print_header("Sources");
    if report.articles.is_empty() {
        print_info("No sources found");
    }
    for (index, article) in report.articles.iter().enumerate() {
        print_article(index, article);
    }
    print_result(
        "Usable evidence",
        &format!("{}/{}", report.usable_evidence_count(), report.articles.len())
    );

    print_header("Fact-Check Result");
    match &report.verdict {
        Ok(verdict) => print_verdict(verdict),
        Err(error) => print_error(error),
    }

    print_header("Further Resources");
    print_text(&report.resources.join(", "));
    println!();
    print_result("Elapsed", &format!("{:.1}s", report.elapsed.as_secs_f32()));
}
