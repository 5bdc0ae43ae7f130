use crate::args::InviteArgs;
use crate::commands::{client, log_or_fail};
use anyhow::{bail, Result};
use colored::Colorize;
use gitbulk_lib::{load_team_roster, GitHubClient, Principal, TeamRow};

pub async fn run(args: &InviteArgs) -> Result<()> {
    let client = client(&args.auth)?;
    let rows = load_team_roster(&args.roster, Some(&args.user_col), &args.team_col, None)?;
    if rows.is_empty() {
        bail!("no usable rows in {}", args.roster.display());
    }

    let principal = client.resolve_context(Some(&args.orgname)).await?;

    for row in &rows {
        client.check_rate_limit().await?;
        let repo_name = format!("{}{}", args.stem, row.team);
        if let Err(e) = invite_one(&client, &principal, args, row, &repo_name).await {
            log_or_fail(&repo_name, e)?;
        }
    }

    Ok(())
}

async fn invite_one(
    client: &GitHubClient,
    principal: &Principal,
    args: &InviteArgs,
    row: &TeamRow,
    repo_name: &str,
) -> gitbulk_lib::GitBulkResult<()> {
    let org = principal.login();
    let username = row.require_username()?;

    if client.get_repo(org, repo_name).await?.is_none() {
        println!("creating {}/{}", org, repo_name.yellow());
        client
            .create_repo(principal, repo_name, args.private, true)
            .await?;
    }

    if !client.is_collaborator(org, repo_name, username).await? {
        client.add_collaborator(org, repo_name, username).await?;
        println!("{} invited to {}", username.green(), repo_name);
    }

    Ok(())
}
