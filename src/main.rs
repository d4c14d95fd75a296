mod commands;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use delegates_index::IndexPaths;

#[derive(Parser)]
#[command(name = "delegates-index")]
#[command(about = "Build index.json from delegate markdown front matter and metrics", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(help = "Delegates directory to scan (default: current directory)")]
    root: Option<PathBuf>,
    #[arg(short, long, help = "Index file to write (default: <ROOT>/index.json)")]
    output: Option<PathBuf>,
    #[arg(long, help = "Check only, exit 1 if the index is out of date")]
    check: bool,
    #[arg(long, help = "JSON output")]
    json: bool,
    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut paths = match cli.root {
        Some(root) => IndexPaths::from_root(root),
        None => IndexPaths::new(),
    };
    if let Some(output) = cli.output {
        paths = paths.with_output(output);
    }

    let result = if cli.check {
        commands::check::run(&paths, cli.json)
    } else {
        commands::generate::run(&paths, cli.json)
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error generating index:".red().bold(), err);
        std::process::exit(1);
    }
}
