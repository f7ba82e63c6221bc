//! clockin library root.
//! Exposes the CLI parser, the high-level run() function, and the managers
//! behind every command.

pub mod cli;
pub mod clock;
pub mod config;
pub mod core;
pub mod errors;
pub mod holidays;
pub mod models;
pub mod storage;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::context::Context;
use cli::parser::{Cli, Commands};
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli) -> AppResult<()> {
    // These two work on the configuration file itself.
    match &cli.command {
        Commands::Init { .. } => return commands::init::handle(&cli.command, cli),
        Commands::Config { .. } => return commands::config::handle(&cli.command, cli),
        _ => {}
    }

    let mut ctx = Context::load(cli)?;
    let cmd = &cli.command;
    match cmd {
        Commands::Init { .. } | Commands::Config { .. } => Ok(()),
        Commands::Start { .. } => commands::start::handle(cmd, &mut ctx),
        Commands::Pause => commands::pause::handle(&mut ctx),
        Commands::Resume { .. } => commands::resume::handle(cmd, &mut ctx),
        Commands::Stop { .. } => commands::stop::handle(cmd, &mut ctx),
        Commands::Timer => commands::timer::handle(&mut ctx),
        Commands::Add { .. } => commands::add::handle(cmd, &mut ctx),
        Commands::Amend { .. } => commands::amend::handle(cmd, &mut ctx),
        Commands::Del { .. } => commands::del::handle(cmd, &mut ctx),
        Commands::List { .. } => commands::list::handle(cmd, &mut ctx),
        Commands::Summary { .. } => commands::summary::handle(cmd, &mut ctx),
        Commands::Vacation { .. } => commands::vacation::handle(cmd, &mut ctx),
        Commands::Sick { .. } => commands::sick::handle(cmd, &mut ctx),
        Commands::Holidays { .. } => commands::holidays::handle(cmd, &mut ctx),
        Commands::Export { .. } => commands::export::handle(cmd, &mut ctx),
        Commands::Backup { .. } => commands::backup::handle(cmd, &mut ctx),
    }
}

/// Diagnostics go to stderr; `CLOCKIN_LOG` sets the filter, `--verbose`
/// forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("clockin=debug")
    } else {
        EnvFilter::try_from_env("CLOCKIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
///
/// Business-rule failures are reported here and count as success; anything
/// else is returned to the caller.
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(&cli) {
        Err(e) if e.is_user_facing() => {
            tracing::debug!(error = ?e, "command refused");
            ui::messages::report(&e);
            Ok(())
        }
        other => other,
    }
}
