//! deepeq CLI
//!
//! Command-line front end for deep structural comparison.
//!
//! Exit codes: 0 when every comparison matched, 1 when values differ (or a
//! demo scenario did not behave as expected), 2 on any other error.

use clap::{Parser, Subcommand};
use deepeq_core::logging_facility::{init, Profile};

mod commands;

use commands::Outcome;

#[derive(Debug, Parser)]
#[command(name = "deepeq")]
#[command(about = "deepeq - structural equality with explanations", long_about = None)]
struct Cli {
    /// Emit development logs to stderr
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the built-in comparison scenarios
    Demo(commands::demo::DemoArgs),
    /// Compare two JSON documents
    Json(commands::json::JsonArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.log {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Demo(args) => commands::demo::execute(args),
        Commands::Json(args) => commands::json::execute(args),
    };

    match result {
        Ok(Outcome::Equal) => {}
        Ok(Outcome::Different) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
