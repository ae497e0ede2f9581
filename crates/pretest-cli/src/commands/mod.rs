//! CLI command definitions and handlers.

pub mod analyze;

use clap::{Parser, Subcommand};

/// Pretest - Pre-flight scoring for ad creatives
#[derive(Parser)]
#[command(name = "pretest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared analyze arguments (paths, placement, flags).
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Score creatives and emit reports
    Analyze(analyze::AnalyzeArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every processed creative passed (no STOP verdicts).
    Success = 0,
    /// At least one creative received a STOP verdict.
    StopFound = 1,
    /// The run itself failed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
