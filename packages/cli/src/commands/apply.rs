use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_editor::{EditSession, EditorConfig, EditorState, Outcome, SelectorAction};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// State file to edit
    pub state: PathBuf,

    /// JSON array of selector actions
    pub script: PathBuf,

    /// Write the result here instead of back to the state file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the resulting state to stdout instead of saving it
    #[arg(long)]
    pub stdout: bool,

    /// Fail on the first skipped action; nothing is written
    #[arg(long)]
    pub strict: bool,

    /// Session key (seeds sequential ids)
    #[arg(long, default_value = "sitecraft")]
    pub session: String,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let state_path = cwd.join(&args.state);
    let state = EditorState::load(&state_path)
        .with_context(|| format!("Failed to load {}", args.state.display()))?;

    let actions = read_script(&cwd.join(&args.script))?;
    let mut session = EditSession::with_state(args.session.as_str(), state, config);

    if !args.stdout {
        println!(
            "{} {} actions from {}",
            "▶".bright_blue(),
            actions.len(),
            args.script.display()
        );
    }

    if args.strict {
        for (index, action) in actions.into_iter().enumerate() {
            let name = action.name();
            session
                .try_dispatch(action)
                .with_context(|| format!("Action #{} ({}) was skipped", index + 1, name))?;
        }
    } else {
        let names: Vec<&'static str> = actions.iter().map(SelectorAction::name).collect();
        let description = args.script.display().to_string();
        let outcomes = session.dispatch_all(&description, actions);

        if !args.stdout {
            for (index, (name, outcome)) in names.iter().zip(&outcomes).enumerate() {
                match outcome {
                    Outcome::Applied => println!("  {} #{} {}", "✓".green(), index + 1, name),
                    Outcome::Skipped(reason) => println!(
                        "  {} #{} {} ({})",
                        "-".yellow(),
                        index + 1,
                        name,
                        reason.to_string().dimmed()
                    ),
                }
            }
        }
    }

    if args.stdout {
        println!("{}", session.state().to_json_pretty()?);
        return Ok(());
    }

    let out_path = args
        .out
        .as_ref()
        .map(|out| cwd.join(out))
        .unwrap_or(state_path);
    session.state().save(&out_path)?;

    println!();
    println!(
        "{} {} selectors written to {}",
        "✅".green(),
        session.state().css_selectors.len(),
        out_path.display()
    );

    Ok(())
}

fn read_script(path: &Path) -> Result<Vec<SelectorAction>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid action script {}", path.display()))
}
