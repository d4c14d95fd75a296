//! Check command - Verify the index on disk is current

use anyhow::Result;
use colored::Colorize;

use delegates_index::core::index::{check, CheckOutcome};
use delegates_index::IndexPaths;

pub fn run(paths: &IndexPaths, json: bool) -> Result<()> {
    let (outcome, warnings) = check(paths)?;

    if json {
        let value = match &outcome {
            CheckOutcome::RootMissing { root } => serde_json::json!({
                "status": "skipped",
                "root": root.display().to_string(),
            }),
            CheckOutcome::UpToDate { output, entries } => serde_json::json!({
                "status": "up-to-date",
                "output": output.display().to_string(),
                "entries": entries,
                "warnings": warnings,
            }),
            CheckOutcome::Stale { output, entries } => serde_json::json!({
                "status": "stale",
                "output": output.display().to_string(),
                "entries": entries,
                "warnings": warnings,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match &outcome {
            CheckOutcome::RootMissing { root } => println!(
                "{} Delegates directory not found: {}. Skipping check.",
                "!".yellow().bold(),
                root.display()
            ),
            CheckOutcome::UpToDate { output, entries } => println!(
                "{} {} is up to date ({} entries)",
                "✓".green().bold(),
                output.display(),
                entries
            ),
            CheckOutcome::Stale { output, .. } => {
                eprintln!(
                    "{} {} is out of date. Run {} to regenerate.",
                    "✗".red().bold(),
                    output.display(),
                    "delegates-index".cyan()
                );
            }
        }
    }

    if matches!(outcome, CheckOutcome::Stale { .. }) {
        std::process::exit(1);
    }

    Ok(())
}
