use crate::args::UnwatchArgs;
use crate::commands::{client, log_or_fail};
use crate::confirm::confirm_or_abort;
use anyhow::{bail, Result};
use colored::Colorize;
use gitbulk_lib::ops;

pub async fn run(args: &UnwatchArgs) -> Result<()> {
    let client = client(&args.auth)?;
    client.check_rate_limit().await?;

    let watched = client.list_watched().await?;
    let to_act = ops::select_watched(&watched, &args.orgname, &args.stem);
    if to_act.is_empty() {
        bail!(
            "no watched repos matching {}/{}*",
            args.orgname,
            args.stem
        );
    }

    let names = to_act
        .iter()
        .map(|r| r.full_name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    confirm_or_abort(
        &format!("these repos will be UNWATCHED:\n{names}"),
        "affirmative",
    )?;

    for repo in to_act {
        client.check_rate_limit().await?;
        match client.unwatch(&repo.owner.login, &repo.name).await {
            Ok(()) => println!("unwatched: {}", repo.full_name.yellow()),
            Err(e) => log_or_fail(&repo.full_name, e)?,
        }
    }

    Ok(())
}
