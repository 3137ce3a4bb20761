//! Delete command implementation.

use crate::cli::DeleteArgs;
use crate::error::Result;
use crate::output::Formatter;
use prospect_domain::traits::OpportunityStore;
use prospect_domain::OpportunityId;
use prospect_store::StoreError;
use std::io::{BufRead, Write};

/// Execute the delete command.
///
/// Without `--yes` the user is asked to confirm on `input`.
pub fn execute_delete<S, R, W>(
    args: DeleteArgs,
    store: &mut S,
    formatter: &Formatter,
    input: &mut R,
    out: &mut W,
) -> Result<usize>
where
    S: OpportunityStore<Error = StoreError>,
    R: BufRead,
    W: Write,
{
    let ids: Vec<OpportunityId> = args
        .ids
        .iter()
        .map(|id| super::parse_id(id))
        .collect::<Result<Vec<_>>>()?;

    if !args.yes {
        writeln!(out, "About to delete {} opportunity(ies):", ids.len())?;
        for id in &ids {
            writeln!(out, "  - {}", id)?;
        }
        write!(out, "Continue? [y/N] ")?;
        out.flush()?;

        let mut response = String::new();
        input.read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            writeln!(out, "{}", formatter.info("Operation cancelled"))?;
            return Ok(0);
        }
    }

    let mut deleted = 0;
    for id in &ids {
        if store.delete_opportunity(*id)? {
            deleted += 1;
        } else {
            writeln!(out, "{}", formatter.warning(&format!("Opportunity {} not found", id)))?;
        }
    }

    writeln!(out, "{}", formatter.success(&format!("Deleted {} opportunity(ies)", deleted)))?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use prospect_domain::{Opportunity, RecordingId};
    use prospect_store::SqliteStore;

    fn seeded() -> (SqliteStore, Vec<Opportunity>) {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let opps = vec![Opportunity::new("a", 1, "", "", 1), Opportunity::new("b", 1, "", "", 1)];
        store
            .save_opportunities(&RecordingId::new("rec").unwrap(), &opps)
            .unwrap();
        (store, opps)
    }

    #[test]
    fn test_delete_with_yes() {
        let (mut store, opps) = seeded();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = DeleteArgs {
            ids: vec![opps[0].id.to_string(), OpportunityId::new().to_string()],
            yes: true,
        };

        let deleted = execute_delete(args, &mut store, &formatter, &mut &b""[..], &mut Vec::new()).unwrap();
        assert_eq!(deleted, 1);
        assert!(store.get_opportunity(opps[0].id).unwrap().is_none());
        assert!(store.get_opportunity(opps[1].id).unwrap().is_some());
    }

    #[test]
    fn test_delete_cancelled() {
        let (mut store, opps) = seeded();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = DeleteArgs {
            ids: vec![opps[0].id.to_string()],
            yes: false,
        };
        let mut out = Vec::new();

        let deleted = execute_delete(args, &mut store, &formatter, &mut &b"n\n"[..], &mut out).unwrap();
        assert_eq!(deleted, 0);
        assert!(String::from_utf8(out).unwrap().contains("Operation cancelled"));
        assert!(store.get_opportunity(opps[0].id).unwrap().is_some());
    }

    #[test]
    fn test_delete_confirmed() {
        let (mut store, opps) = seeded();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = DeleteArgs {
            ids: vec![opps[1].id.to_string()],
            yes: false,
        };

        let deleted = execute_delete(args, &mut store, &formatter, &mut &b"Y\n"[..], &mut Vec::new()).unwrap();
        assert_eq!(deleted, 1);
    }
}
