//! JSON command
//!
//! Usage: deepeq json <LEFT> <RIGHT> [--config <FILE>] [--strict-cycles] [--max-depth <N>]

use clap::Args;
use deepeq_core::{deep_equal_with, CompareOptions, CyclePolicy};
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::Outcome;

#[derive(Debug, Args)]
pub struct JsonArgs {
    /// Left-hand JSON document
    pub left: PathBuf,

    /// Right-hand JSON document
    pub right: PathBuf,

    /// TOML file with comparison options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report cycles that cannot be verified instead of assuming equality
    #[arg(long)]
    pub strict_cycles: bool,

    /// Maximum nesting depth to descend into
    #[arg(long)]
    pub max_depth: Option<usize>,
}

fn read_document(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))?;
    Ok(value)
}

/// Options from the config file, with command-line flags taking precedence
fn resolve_options(args: &JsonArgs) -> Result<CompareOptions, Box<dyn std::error::Error>> {
    let mut options = match &args.config {
        Some(path) => CompareOptions::load(path)?,
        None => CompareOptions::default(),
    };
    if args.strict_cycles {
        options = options.with_cycle_policy(CyclePolicy::Strict);
    }
    if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(max_depth);
    }
    Ok(options)
}

/// Execute json command
pub fn execute(args: JsonArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let options = resolve_options(&args)?;
    let left = read_document(&args.left)?;
    let right = read_document(&args.right)?;

    match deep_equal_with(&left, &right, &options) {
        Ok(()) => {
            println!("equal");
            Ok(Outcome::Equal)
        }
        Err(divergence) => {
            println!("different");
            println!("  path: {}", divergence.path_string());
            println!("  code: {}", divergence.code());
            println!("  reason: {}", divergence);
            Ok(Outcome::Different)
        }
    }
}
