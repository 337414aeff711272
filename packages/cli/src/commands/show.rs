use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_editor::EditorState;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// State file to read
    #[arg(default_value = "site.json")]
    pub state: PathBuf,

    /// Print the stylesheet instead of the selector list
    #[arg(long)]
    pub css: bool,
}

pub fn show(args: ShowArgs) -> Result<()> {
    let state = EditorState::load(&args.state)?;

    if args.css {
        println!("{}", state.to_stylesheet());
        return Ok(());
    }

    println!(
        "{} {}",
        "Project".bright_blue().bold(),
        state.project_id().bright_white()
    );

    if state.css_selectors.is_empty() {
        println!("{}", "  No selectors".yellow());
        return Ok(());
    }

    let selected = state.selected_selector_id();
    for selector in &state.css_selectors {
        let marker = if Some(selector.id.as_str()) == selected {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "{} .{} {}",
            marker,
            selector.display_name().bold(),
            selector.id.dimmed()
        );
        for (name, value) in selector.css_rules() {
            println!("      {}: {}", name, value);
        }
    }

    if let Some(id) = selected {
        if state.selector(id).is_none() {
            println!("{} selection points at missing selector {}", "⚠️".yellow(), id);
        }
    }

    Ok(())
}
