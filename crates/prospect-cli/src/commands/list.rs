//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use prospect_domain::traits::OpportunityStore;
use prospect_store::StoreError;
use std::io::Write;

/// Execute the list command.
pub fn execute_list<S, W>(args: ListArgs, store: &S, formatter: &Formatter, out: &mut W) -> Result<()>
where
    S: OpportunityStore<Error = StoreError>,
    W: Write,
{
    let recording = super::parse_recording(&args.recording)?;
    let opportunities = store.list_opportunities(&recording)?;
    writeln!(out, "{}", formatter.format_opportunities(&opportunities)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use prospect_domain::{Opportunity, RecordingId};
    use prospect_store::SqliteStore;

    #[test]
    fn test_list_in_insertion_order() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let recording = RecordingId::new("rec").unwrap();
        let opps = vec![
            Opportunity::new("b", 1, "", "", 1),
            Opportunity::new("a", 1, "", "", 1),
        ];
        store.save_opportunities(&recording, &opps).unwrap();

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let mut out = Vec::new();
        execute_list(ListArgs { recording: "rec".to_string() }, &store, &formatter, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let ids: Vec<&str> = text.lines().collect();
        assert_eq!(ids, vec![opps[0].id.to_string(), opps[1].id.to_string()]);
    }

    #[test]
    fn test_list_rejects_bad_recording() {
        let store = SqliteStore::new(":memory:").unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = execute_list(
            ListArgs { recording: "../etc".to_string() },
            &store,
            &formatter,
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(crate::CliError::InvalidInput(_))));
    }
}
