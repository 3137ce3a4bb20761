//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Prospect CLI - Find sales opportunities in call transcripts.
#[derive(Debug, Parser)]
#[command(name = "prospect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PROSPECT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract keyword opportunities from a transcript
    Extract(ExtractArgs),

    /// List the stored opportunities of a recording
    List(ListArgs),

    /// Change status, priority or notes of an opportunity
    Update(UpdateArgs),

    /// Delete opportunities
    Delete(DeleteArgs),

    /// Manage stored audio files
    Audio(AudioArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Transcript file, or `-` for stdin
    #[arg(short, long)]
    pub transcript: String,

    /// Keyword to search for (repeatable)
    #[arg(short, long = "keyword", required = true)]
    pub keywords: Vec<String>,

    /// Persist results under this recording
    #[arg(short, long)]
    pub recording: Option<String>,

    /// Collapse repeated keywords before scanning
    #[arg(long)]
    pub dedupe: bool,

    /// Tokens of context on each side of a match
    #[arg(short, long)]
    pub window: Option<usize>,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Recording identifier
    pub recording: String,
}

/// Arguments for the update command.
#[derive(Debug, Parser)]
pub struct UpdateArgs {
    /// Opportunity ID
    pub id: String,

    /// New status (e.g. reviewed, in_progress, won)
    #[arg(short, long)]
    pub status: Option<String>,

    /// New priority (low, medium, high)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Replace the notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Opportunity IDs to delete
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for audio management.
#[derive(Debug, Parser)]
pub struct AudioArgs {
    #[command(subcommand)]
    pub action: AudioAction,
}

/// Audio management actions.
#[derive(Debug, Subcommand)]
pub enum AudioAction {
    /// Copy an audio file into the store
    Save {
        /// Path of the audio file
        file: PathBuf,
        /// Store under a different name
        #[arg(long)]
        name: Option<String>,
    },

    /// List stored audio files
    List,

    /// Delete a stored audio file
    Delete {
        /// Stored filename
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
