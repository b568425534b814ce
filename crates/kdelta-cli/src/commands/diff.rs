//! Diff command
//!
//! Usage: kdelta diff --old <FILE> --new <FILE> [--settings <FILE>] [--field <SELECTOR>]...

use super::input::load_object;
use clap::Args;
use kdelta_core::{diff_values, ExError, UpdateSetting};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot before the update
    #[arg(long)]
    pub old: PathBuf,

    /// Snapshot after the update
    #[arg(long)]
    pub new: PathBuf,

    /// Settings file (.toml, .json, .yaml or .yml)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Extra selector, compared after the settings file's fields
    #[arg(short, long = "field", value_name = "SELECTOR")]
    pub fields: Vec<String>,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = match &args.settings {
        Some(path) => UpdateSetting::load(path).map_err(ExError::from)?,
        None => UpdateSetting::default(),
    };
    settings.fields.extend(args.fields);

    let old = load_object(&args.old)?;
    let new = load_object(&args.new)?;

    let text = diff_values(&old, &new, &settings)?;
    print!("{}", text);

    Ok(())
}
