//! Audio command implementation.

use crate::cli::{AudioAction, AudioArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use prospect_domain::traits::{AudioSaveOutcome, AudioStore};
use prospect_store::{content_hash, StoreError};
use std::fs;
use std::io::Write;

/// Execute an audio management action.
pub fn execute_audio<A, W>(args: AudioArgs, store: &mut A, formatter: &Formatter, out: &mut W) -> Result<()>
where
    A: AudioStore<Error = StoreError>,
    W: Write,
{
    match args.action {
        AudioAction::Save { file, name } => {
            let name = match name {
                Some(n) => n,
                None => file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
                    .ok_or_else(|| CliError::InvalidInput(format!("No filename in '{}'", file.display())))?,
            };
            let bytes = fs::read(&file)?;
            let hash = content_hash(&bytes);

            match store.save_audio(&name, &bytes, &hash)? {
                AudioSaveOutcome::Saved(entry) => writeln!(
                    out,
                    "{}",
                    formatter.success(&format!("Saved audio '{}' ({} bytes)", entry.filename, entry.size))
                )?,
                AudioSaveOutcome::Duplicate { existing } => writeln!(
                    out,
                    "{}",
                    formatter.warning(&format!("Same audio already stored as '{}'", existing.filename))
                )?,
            }
        }
        AudioAction::List => {
            let entries = store.list_audio()?;
            writeln!(out, "{}", formatter.format_audio(&entries)?)?;
        }
        AudioAction::Delete { name } => {
            if !store.delete_audio(&name)? {
                return Err(CliError::NotFound(format!("Audio '{}'", name)));
            }
            writeln!(out, "{}", formatter.success(&format!("Deleted audio '{}'", name)))?;
        }
    }
    Ok(())
}
