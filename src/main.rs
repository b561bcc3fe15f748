//! ewtrace CLI - keeps the Akamai-EW-Trace request header fresh

use clap::{CommandFactory, Parser};

mod cli;
mod config;
mod credential;
mod error;
mod header;
mod output;
mod refresh;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `--debug` overrides `RUST_LOG`
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Refresh => cli::refresh::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("ewtrace version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ewtrace", &mut std::io::stdout());
            Ok(())
        }
    }
}
