mod cli;
mod commands;
mod error;
mod output;

use std::io;

use clap::Parser;
use cli::Command;
use error::CliError;
use tracing::error;

fn main() {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Quote(args) => commands::load_active_table(&cli.source).and_then(|table| {
            commands::quote(
                &table,
                &args.amounts,
                args.json,
                io::stdin().lock(),
                &mut io::stdout().lock(),
            )
        }),

        Command::Table(args) => commands::load_active_table(&cli.source)
            .and_then(|table| output::write_table(&table, args.json, &mut io::stdout().lock()))
            .map(|()| true),

        Command::Check(args) => commands::check(&args.path, cli.source.sort),

        Command::Presets => output::write_presets(&mut io::stdout().lock()).map(|()| true),
    };

    std::process::exit(exit_code(result));
}

/// 0 on success or a closed stdout, 1 on a rejected input or any other error.
fn exit_code(result: Result<bool, CliError>) -> i32 {
    match result {
        Ok(true) | Err(CliError::OutputClosed) => 0,
        Ok(false) => 1,
        Err(e) => {
            error!(error = %e, "ratecalc failed");
            1
        }
    }
}
