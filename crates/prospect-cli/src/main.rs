//! Prospect CLI - Command-line interface for keyword opportunity extraction.

use clap::Parser;
use prospect_cli::commands::{self, AppStore};
use prospect_cli::{Cli, Command, Config, Formatter};
use prospect_store::FsAudioStore;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so table/JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> prospect_cli::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Extract(args) => {
            if args.recording.is_some() {
                let mut store = commands::open_store(&config.storage)?;
                commands::execute_extract(args, &config.extractor, Some(&mut store), &formatter, &mut out)?;
            } else {
                commands::execute_extract::<AppStore, _>(args, &config.extractor, None, &formatter, &mut out)?;
            }
        }
        Command::List(args) => {
            let store = commands::open_store(&config.storage)?;
            commands::execute_list(args, &store, &formatter, &mut out)?;
        }
        Command::Update(args) => {
            let mut store = commands::open_store(&config.storage)?;
            commands::execute_update(args, &mut store, &formatter, &mut out)?;
        }
        Command::Delete(args) => {
            let mut store = commands::open_store(&config.storage)?;
            let stdin = io::stdin();
            commands::execute_delete(args, &mut store, &formatter, &mut stdin.lock(), &mut out)?;
        }
        Command::Audio(args) => {
            let mut store = FsAudioStore::new(&config.storage.audio_dir)?;
            commands::execute_audio(args, &mut store, &formatter, &mut out)?;
        }
    }

    Ok(())
}
