use crate::args::PatternArgs;
use crate::commands::{client, log_or_fail};
use crate::confirm::confirm_or_abort;
use anyhow::{bail, Result};
use colored::Colorize;
use gitbulk_lib::ops;

pub async fn run(args: &PatternArgs) -> Result<()> {
    let client = client(&args.auth)?;
    client.check_rate_limit().await?;

    let principal = client.resolve_owner(&args.owner).await?;
    let repos = client.list_repos(&principal).await?;
    let to_act = ops::select_unarchived(&repos, &args.pattern);
    if to_act.is_empty() {
        bail!(
            "no unarchived repos matching {}/{}*",
            args.owner,
            args.pattern
        );
    }

    println!("NOTE: unarchiving is only possible through the website, by hand.");
    let names = to_act
        .iter()
        .map(|r| r.full_name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    confirm_or_abort(
        &format!("these repos will be ARCHIVED (made read-only):\n{names}"),
        "yes",
    )?;

    for repo in to_act {
        client.check_rate_limit().await?;
        match client.set_archived(&repo.owner.login, &repo.name, true).await {
            Ok(()) => println!("archived: {}", repo.full_name.yellow()),
            Err(e) => log_or_fail(&repo.full_name, e)?,
        }
    }

    Ok(())
}
