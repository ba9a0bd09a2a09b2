use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tasklist::{Shell, TaskStore, DEFAULT_FILENAME};

/// Personal task tracker backed by a JSON file
#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about)]
struct Cli {
    /// Task file to load and save
    #[arg(short, long, env = "TASKLIST_FILE", default_value = DEFAULT_FILENAME)]
    file: PathBuf,
}

fn main() -> Result<()> {
    if std::env::var("TASKLIST_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("tasklist=debug")
            .with_writer(io::stderr)
            .init();
    }

    let cli = Cli::parse();

    let mut store = TaskStore::new(&cli.file)
        .with_context(|| format!("Failed to load tasks from {}", cli.file.display()))?;

    let board = io::stdin().is_terminal() && io::stdout().is_terminal();
    let stdin = io::stdin();
    Shell::new(&mut store, stdin.lock(), io::stdout())
        .with_board(board)
        .run()
}
