use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_editor::{EditSession, EditorConfig};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// State file to create
    #[arg(default_value = "site.json")]
    pub path: PathBuf,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Session key (seeds sequential ids)
    #[arg(long, default_value = "sitecraft")]
    pub session: String,

    /// Force overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn new(args: NewArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.path);
    if path.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists. Use --force to overwrite",
            args.path.display()
        ));
    }

    let config = EditorConfig::load(cwd)?;
    let session = EditSession::new(args.session, config);

    let mut state = session.state().clone();
    if let Some(name) = args.name {
        std::sync::Arc::make_mut(&mut state.project).project_name = name;
    }

    info!(project_id = %state.project_id(), path = %path.display(), "Writing new project");
    state.save(&path)?;

    println!(
        "  {} Created {} (project {})",
        "✓".green(),
        args.path.display(),
        state.project_id().bright_white()
    );

    Ok(())
}
