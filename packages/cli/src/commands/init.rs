use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_editor::{EditorConfig, IdStrategy, RenameCheck, DEFAULT_CONFIG_NAME};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Id strategy for new selectors (uuid, sequential)
    #[arg(long, default_value = "uuid")]
    pub ids: String,

    /// Which id the rename gate checks (selected, target)
    #[arg(long, default_value = "selected")]
    pub rename_check: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = EditorConfig {
        id_strategy: parse_id_strategy(&args.ids)?,
        rename_check: parse_rename_check(&args.rename_check)?,
        ..EditorConfig::default()
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: sitecraft new site.json");
    println!("  2. Run: sitecraft apply site.json actions.json");

    Ok(())
}

fn parse_id_strategy(value: &str) -> Result<IdStrategy> {
    match value {
        "uuid" => Ok(IdStrategy::Uuid),
        "sequential" => Ok(IdStrategy::Sequential),
        other => Err(anyhow!(
            "Invalid id strategy: {}. Use: uuid or sequential",
            other
        )),
    }
}

fn parse_rename_check(value: &str) -> Result<RenameCheck> {
    match value {
        "selected" => Ok(RenameCheck::Selected),
        "target" => Ok(RenameCheck::Target),
        other => Err(anyhow!(
            "Invalid rename check: {}. Use: selected or target",
            other
        )),
    }
}
