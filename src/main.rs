mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::commands::shared::Globals;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose, args.quiet);
    cli::context::init(args.config.as_deref());

    let globals = Globals::from_cli(&args);

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(&globals),
        Commands::Issues { level, last } => {
            cli::commands::issues::execute(&globals, level.as_deref(), *last)
        }
        Commands::Show { uuid } => cli::commands::show::execute(&globals, uuid),
        Commands::Stats { by, json } => cli::commands::stats::execute(&globals, by.as_deref(), *json),
        Commands::Series { json } => cli::commands::series::execute(&globals, *json),
        Commands::Projects { action } => cli::commands::projects::execute(&globals, action.as_ref()),
        Commands::Notifications { action } => cli::commands::notifications::execute(&globals, action),
        Commands::Members { action } => cli::commands::members::execute(&globals, action),
        Commands::Export { output, fields } => {
            cli::commands::export::execute(&globals, output.as_deref(), fields)
        }
        Commands::Import { file } => cli::commands::import::execute(&globals, file),
        Commands::Log {
            action,
            since,
            last,
        } => cli::commands::log::execute(action.as_deref(), since.as_deref(), *last),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("issuelens={default_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
