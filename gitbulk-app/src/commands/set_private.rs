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
    let to_act = ops::select_public(&repos, &args.pattern);
    if to_act.is_empty() {
        bail!("no public repos matching {}/{}*", args.owner, args.pattern);
    }

    let names = to_act
        .iter()
        .map(|r| r.full_name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    confirm_or_abort(
        &format!("these repos will be made PRIVATE:\n{names}"),
        "affirmative",
    )?;

    for repo in to_act {
        client.check_rate_limit().await?;
        match client.set_private(&repo.owner.login, &repo.name, true).await {
            Ok(()) => println!("private: {}", repo.full_name.yellow()),
            Err(e) => log_or_fail(&repo.full_name, e)?,
        }
    }

    Ok(())
}
