use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "factcheck",
    about = "Verifies short claims against news evidence using language models",
    version,
    author,
    long_about = None
)]
pub struct FactCheckCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refine, search for evidence and verify a claim
    Check {
        /// Claim to verify; prompted for when omitted
        claim: Option<String>,

        /// Read the claim from a file instead
        #[arg(short = 'f', long, conflicts_with = "claim")]
        claim_file: Option<PathBuf>,

        /// Overall deadline in seconds
        #[arg(short, long)]
        deadline: Option<u64>,
    },

    /// Summarize a transcript
    Summarize {
        /// Path to the transcript text
        #[arg(short, long)]
        transcript: PathBuf,
    },
}
