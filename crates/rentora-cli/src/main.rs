//! Rentora CLI entry point.
//!
//! Binary name: `rentora`
//!
//! Parses CLI arguments, wires the storage backend and services, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{CalcCommand, Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,rentora=debug",
        _ => "trace",
    };

    if let Err(err) = rentora_observe::tracing_setup::init_tracing(filter, cli.trace_export) {
        eprintln!("Warning: failed to initialize tracing: {err}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "rentora", &mut std::io::stdout());
        return Ok(());
    }

    // Calculators are pure and don't need storage either
    if let Commands::Calc { action } = &cli.command {
        match action {
            CalcCommand::Affordability {
                income,
                obligations,
                target_rent,
            } => {
                cli::calc::run_affordability(
                    income,
                    obligations,
                    target_rent.as_deref(),
                    cli.json,
                )?;
            }
            CalcCommand::Earnings {
                rent,
                occupancy,
                outgoings,
                fee,
                value,
            } => {
                cli::calc::run_earnings(
                    rent,
                    *occupancy,
                    outgoings,
                    *fee,
                    value.as_deref(),
                    cli.json,
                )?;
            }
        }
        rentora_observe::tracing_setup::shutdown_tracing();
        return Ok(());
    }

    // Initialize application state (storage, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::New { role } => {
            cli::wizard::run_create(&state, role.as_deref(), cli.json).await?;
        }

        Commands::Edit { id } => {
            cli::wizard::run_edit(&state, &id, cli.json).await?;
        }

        Commands::List { args } => {
            cli::listing::list_listings(&state, args, cli.json).await?;
        }

        Commands::Show { id } => {
            cli::listing::show_listing(&state, &id, cli.json).await?;
        }

        Commands::Delete { id, force } => {
            cli::listing::delete_listing(&state, &id, force, cli.json).await?;
        }

        Commands::Roles => {
            cli::roles::show_roles(&state, cli.json)?;
        }

        Commands::Calc { .. } | Commands::Completions { .. } => {
            unreachable!("handled above")
        }
    }

    rentora_observe::tracing_setup::shutdown_tracing();
    Ok(())
}
