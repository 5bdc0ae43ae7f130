use crate::args::TeamReposArgs;
use crate::commands::{client, log_or_fail};
use anyhow::{bail, Result};
use colored::Colorize;
use gitbulk_lib::{load_team_roster, ops};
use std::collections::HashSet;

pub async fn run(args: &TeamReposArgs) -> Result<()> {
    let client = client(&args.auth)?;
    let rows = load_team_roster(&args.roster, None, &args.team_col, args.name_col.as_deref())?;
    if rows.is_empty() {
        bail!("no usable rows in {}", args.roster.display());
    }

    let principal = client.resolve_context(Some(&args.orgname)).await?;
    let login = principal.login().to_string();

    let mut seen = HashSet::new();
    for row in &rows {
        let repo_name = ops::team_repo_name(&args.stem, &row.team, row.name.as_deref());
        if !seen.insert(repo_name.clone()) {
            continue;
        }

        client.check_rate_limit().await?;

        match client.get_repo(&login, &repo_name).await {
            Ok(Some(_)) => {
                println!("{} already exists", repo_name.dimmed());
            }
            Ok(None) => {
                println!("creating {}/{}", login, repo_name.yellow());
                if let Err(e) = client
                    .create_repo(&principal, &repo_name, args.private, true)
                    .await
                {
                    log_or_fail(&repo_name, e)?;
                }
            }
            Err(e) => log_or_fail(&repo_name, e)?,
        }
    }

    Ok(())
}
