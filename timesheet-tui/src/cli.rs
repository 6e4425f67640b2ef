use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "timesheet-tui")]
#[command(about = "Terminal UI for timesheet entry and invoice export")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the back-office org configured in config.toml
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}
