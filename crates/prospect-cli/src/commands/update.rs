//! Update command implementation.

use crate::cli::UpdateArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use prospect_domain::traits::OpportunityStore;
use prospect_domain::{OpportunityUpdate, Priority, Status};
use prospect_store::StoreError;
use std::io::Write;

/// Execute the update command.
pub fn execute_update<S, W>(args: UpdateArgs, store: &mut S, formatter: &Formatter, out: &mut W) -> Result<()>
where
    S: OpportunityStore<Error = StoreError>,
    W: Write,
{
    let id = super::parse_id(&args.id)?;
    let update = build_update(&args)?;

    if !store.update_opportunity(id, &update)? {
        return Err(CliError::NotFound(format!("Opportunity {}", id)));
    }

    writeln!(out, "{}", formatter.success(&format!("Updated opportunity {}", id)))?;
    Ok(())
}

/// Canonicalize the requested changes.
fn build_update(args: &UpdateArgs) -> Result<OpportunityUpdate> {
    let priority = match args.priority.as_deref() {
        Some(p) => Some(
            Priority::parse(p)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown priority '{}' (use low, medium or high)", p)))?
                .as_str()
                .to_string(),
        ),
        None => None,
    };

    let update = OpportunityUpdate {
        status: args.status.as_deref().map(|s| Status::parse(s).as_str().to_string()),
        priority,
        notes: args.notes.clone(),
    };

    if update.is_empty() {
        return Err(CliError::InvalidInput(
            "Nothing to update; pass --status, --priority or --notes".to_string(),
        ));
    }
    Ok(update)
}
