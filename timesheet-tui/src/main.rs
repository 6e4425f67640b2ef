mod app;
mod backend;
mod bootstrap;
mod cli;
mod config;
mod dev_backend;
mod downloads;
mod logging;
mod runtime;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = config::TimesheetConfig::config_path()?;
            if !path.exists() {
                config::TimesheetConfig::default().save()?;
                println!("Created default config at {}", path.display());
            }
            println!("{}", path.display());
            Ok(())
        }
        Commands::Run => {
            dotenvy::from_filename(".env.timesheet").ok();
            let cfg = config::TimesheetConfig::load()?;
            logging::init(&cfg.log_path()?)?;
            let backend = backend::remote(&cfg)?;
            run(cfg, backend).await
        }
        Commands::Dev => {
            let cfg = config::TimesheetConfig::load()?;
            logging::init(&cfg.log_path()?)?;
            println!("Running in dev mode with local data.");
            run(cfg, backend::dev()).await
        }
    }
}

async fn run(cfg: config::TimesheetConfig, backend: backend::SharedBackend) -> Result<()> {
    tracing::info!(api_url = %cfg.api_url, "starting timesheet-tui");

    let mut app = App::new(&cfg);
    bootstrap::initialize_app_state(&mut app, &backend).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, backend).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("{:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
