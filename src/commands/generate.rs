//! Generate command - Write the aggregated index

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use delegates_index::core::index::{generate, IndexOutcome};
use delegates_index::core::metrics::MetricsWarning;
use delegates_index::IndexPaths;

#[derive(Serialize)]
struct GenerateSummary {
    status: &'static str,
    root: String,
    output: Option<String>,
    entries: usize,
    warnings: Vec<MetricsWarning>,
}

pub fn run(paths: &IndexPaths, json: bool) -> Result<()> {
    if !json && paths.root_exists() {
        println!(
            "{} Searching for markdown files in: {}",
            "→".dimmed(),
            paths.root.display()
        );
    }

    let outcome = generate(paths)?;

    if json {
        let summary = summarize(paths, &outcome);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    match outcome {
        IndexOutcome::RootMissing { root } => {
            println!(
                "{} Delegates directory not found: {}. Skipping generation.",
                "!".yellow().bold(),
                root.display()
            );
        }
        IndexOutcome::NoDocuments { output } => {
            println!(
                "{} No markdown files found in the delegates directory.",
                "!".yellow().bold()
            );
            println!("  {} Empty index written to: {}", "→".dimmed(), output.display());
        }
        IndexOutcome::Written {
            output,
            entries,
            warnings,
        } => {
            println!(
                "{} Indexed {} documents",
                "✓".green().bold(),
                entries.to_string().cyan()
            );
            if !warnings.is_empty() {
                println!(
                    "  {} {} metrics files could not be parsed",
                    "✗".red(),
                    warnings.len()
                );
            }
            println!(
                "  {} Successfully generated delegates index file at: {}",
                "→".dimmed(),
                output.display()
            );
        }
    }

    Ok(())
}

fn summarize(paths: &IndexPaths, outcome: &IndexOutcome) -> GenerateSummary {
    let root = paths.root.display().to_string();
    match outcome {
        IndexOutcome::RootMissing { .. } => GenerateSummary {
            status: "skipped",
            root,
            output: None,
            entries: 0,
            warnings: Vec::new(),
        },
        IndexOutcome::NoDocuments { output } => GenerateSummary {
            status: "empty",
            root,
            output: Some(output.display().to_string()),
            entries: 0,
            warnings: Vec::new(),
        },
        IndexOutcome::Written {
            output,
            entries,
            warnings,
        } => GenerateSummary {
            status: "written",
            root,
            output: Some(output.display().to_string()),
            entries: *entries,
            warnings: warnings.clone(),
        },
    }
}
