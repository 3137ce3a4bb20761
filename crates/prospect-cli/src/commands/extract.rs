//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use prospect_domain::traits::OpportunityStore;
use prospect_domain::Opportunity;
use prospect_extractor::{ExtractorConfig, KeywordPolicy, OpportunityExtractor};
use prospect_store::StoreError;
use std::fs;
use std::io::{self, Read, Write};
use tracing::info;

/// Execute the extract command.
///
/// Opportunities are persisted only when `--recording` is given, in which
/// case `store` must be provided.
pub fn execute_extract<S, W>(
    args: ExtractArgs,
    base: &ExtractorConfig,
    store: Option<&mut S>,
    formatter: &Formatter,
    out: &mut W,
) -> Result<Vec<Opportunity>>
where
    S: OpportunityStore<Error = StoreError>,
    W: Write,
{
    let config = effective_config(&args, base);
    let transcript = read_transcript(&args.transcript)?;

    let extractor = OpportunityExtractor::new(config);
    let mut opportunities = extractor.extract(&transcript, &args.keywords);

    if let (Some(recording), Some(store)) = (args.recording.as_deref(), store) {
        let recording = super::parse_recording(recording)?;
        opportunities = opportunities
            .into_iter()
            .map(|o| o.with_recording(recording.clone()))
            .collect();
        let ids = store.save_opportunities(&recording, &opportunities)?;
        info!("Persisted {} opportunities under '{}'", ids.len(), recording);

        if formatter.format() == OutputFormat::Table {
            writeln!(
                out,
                "{}",
                formatter.success(&format!("Saved {} opportunities to '{}'", ids.len(), recording))
            )?;
        }
    }

    writeln!(out, "{}", formatter.format_opportunities(&opportunities)?)?;
    Ok(opportunities)
}

/// Command-line flags layered over the configured extractor settings.
fn effective_config(args: &ExtractArgs, base: &ExtractorConfig) -> ExtractorConfig {
    let mut config = base.clone();
    if let Some(window) = args.window {
        config.context_window = window;
    }
    if args.dedupe {
        config.keyword_policy = KeywordPolicy::Dedupe;
    }
    config
}

/// Read a transcript from a file, or from stdin when `source` is `-`.
fn read_transcript(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(source)?)
    }
}
