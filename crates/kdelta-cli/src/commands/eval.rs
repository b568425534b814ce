//! Eval command
//!
//! Usage: kdelta eval --object <FILE> <SELECTOR>

use super::input::load_object;
use clap::Args;
use kdelta_core::{evaluate, ExError};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Snapshot to evaluate against
    #[arg(long)]
    pub object: PathBuf,

    /// Selector to evaluate
    pub selector: String,
}

/// Execute eval command
pub fn execute(args: EvalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let object = load_object(&args.object)?;
    let result = evaluate(&object, &args.selector).map_err(ExError::from)?;
    println!("{}", result.render());
    Ok(())
}
