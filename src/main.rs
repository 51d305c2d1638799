use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::{ info, warn };

use factcheck::{ CheckerConfig, FactCheckPipeline };

mod cli;
use cli::{ Commands, FactCheckCli };

#[tokio::main]
async fn main() -> Result<()> {
    let cli = FactCheckCli::parse();

    setup_logging(&cli.log_level);

    if let Err(e) = dotenv::dotenv() {
        warn!("Could not load .env file: {}", e);
    }

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            CheckerConfig::from_file(path)?
        }
        None => CheckerConfig::default(),
    };

    run(&cli, config).await
}

async fn run(cli: &FactCheckCli, config: CheckerConfig) -> Result<()> {
    let pipeline = FactCheckPipeline::new(config)?;

    match &cli.command {
        Commands::Check { claim, claim_file, deadline } => {
            let pipeline = match deadline {
                Some(secs) => pipeline.with_deadline(Duration::from_secs(*secs)),
                None => pipeline,
            };
            cli::commands::check::execute(
                &pipeline,
                claim.as_deref(),
                claim_file.as_deref(),
                &cli.output_format
            ).await?;
        }

        Commands::Summarize { transcript } => {
            cli::commands::summarize::execute(&pipeline, transcript, &cli.output_format).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
