use crate::args::DupeArgs;
use crate::commands::client;
use anyhow::{bail, Result};
use colored::Colorize;
use gitbulk_lib::{load_roster, Duplicator, GitTool};

pub async fn run(args: &DupeArgs) -> Result<()> {
    let client = client(&args.auth)?;
    let roster = load_roster(&args.roster, &args.id_col, &args.url_col)?;
    if roster.is_empty() {
        bail!("no usable rows in {}", args.roster.display());
    }

    let principal = client.resolve_context(args.orgname.as_deref()).await?;
    let git = GitTool::locate().await?;

    println!(
        "duplicating {} repos under {}",
        roster.len(),
        principal.login().yellow()
    );

    Duplicator::new(&client, git, principal, &args.stem)
        .duplicate_all(&roster)
        .await?;

    Ok(())
}
