use crate::args::TeamMembersArgs;
use crate::commands::{client, log_or_fail};
use anyhow::{bail, Result};
use colored::Colorize;
use gitbulk_lib::{load_team_roster, ops, GitHubClient, Principal, TeamRow};

pub async fn run(args: &TeamMembersArgs) -> Result<()> {
    let client = client(&args.auth)?;
    let rows = load_team_roster(
        &args.roster,
        Some(&args.user_col),
        &args.team_col,
        args.name_col.as_deref(),
    )?;
    if rows.is_empty() {
        bail!("no usable rows in {}", args.roster.display());
    }

    let principal = client.resolve_context(Some(&args.orgname)).await?;

    for row in &rows {
        client.check_rate_limit().await?;
        let repo_name = ops::team_repo_name(&args.stem, &row.team, row.name.as_deref());
        if let Err(e) = add_member(&client, &principal, args, row, &repo_name).await {
            log_or_fail(&repo_name, e)?;
        }
    }

    Ok(())
}

async fn add_member(
    client: &GitHubClient,
    principal: &Principal,
    args: &TeamMembersArgs,
    row: &TeamRow,
    repo_name: &str,
) -> gitbulk_lib::GitBulkResult<()> {
    let org = principal.login();
    let username = row.require_username()?;

    if args.create {
        if client.get_repo(org, repo_name).await?.is_none() {
            println!("creating repository {}/{}", org, repo_name.yellow());
            client
                .create_repo(principal, repo_name, args.private, true)
                .await?;
        }
        // one team per repo, sharing the repo's name
        if client.get_team(org, repo_name).await?.is_none() {
            println!("creating team {}", repo_name.yellow());
            client.create_team(org, repo_name, repo_name).await?;
        }
    }

    if client
        .get_team_membership(org, repo_name, username)
        .await?
        .is_none()
    {
        println!("adding {} to team {}", username.green(), repo_name);
        client.add_team_membership(org, repo_name, username).await?;
    }

    Ok(())
}
