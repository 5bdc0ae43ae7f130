use crate::args::SecurityAlertsArgs;
use crate::commands::{client, log_or_fail};
use anyhow::Result;
use colored::Colorize;
use gitbulk_lib::{ops, GitHubClient, Repo};

pub async fn run(args: &SecurityAlertsArgs) -> Result<()> {
    let client = client(&args.auth)?;
    client.check_rate_limit().await?;

    let principal = client.resolve_owner(&args.owner).await?;
    let repos = client.list_repos(&principal).await?;

    for repo in ops::select_unarchived(&repos, &args.stem) {
        client.check_rate_limit().await?;
        if let Err(e) = apply(&client, repo, args.disable).await {
            log_or_fail(&repo.full_name, e)?;
        }
    }

    Ok(())
}

async fn apply(
    client: &GitHubClient,
    repo: &Repo,
    disable: bool,
) -> gitbulk_lib::GitBulkResult<()> {
    let enable = !disable;

    if enable
        && client
            .vulnerability_alerts_enabled(&repo.owner.login, &repo.name)
            .await?
    {
        return Ok(());
    }

    client
        .set_vulnerability_alerts(&repo.owner.login, &repo.name, enable)
        .await?;
    client
        .set_automated_security_fixes(&repo.owner.login, &repo.name, enable)
        .await?;

    let verb = if enable { "enabled" } else { "disabled" };
    println!(
        "{verb} vulnerability alerts and automated fixes: {}",
        repo.full_name.yellow()
    );

    Ok(())
}
