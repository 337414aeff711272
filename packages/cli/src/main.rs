mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, init, new, show, ApplyArgs, InitArgs, NewArgs, ShowArgs};
use tracing_subscriber::EnvFilter;

/// Sitecraft CLI - edit the CSS selectors of a saved site
#[derive(Parser, Debug)]
#[command(name = "sitecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default sitecraft.config.json
    Init(InitArgs),

    /// Create a fresh project state file
    New(NewArgs),

    /// Replay a JSON action script against a state file
    Apply(ApplyArgs),

    /// List selectors and rules of a state file
    Show(ShowArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Show(args) => show(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
