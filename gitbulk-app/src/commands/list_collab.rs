use crate::args::ListCollabArgs;
use crate::commands::{client, log_or_fail};
use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;
use std::collections::HashSet;

pub async fn run(args: &ListCollabArgs) -> Result<()> {
    let pattern = args
        .pattern
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("invalid --pattern regex")?;

    let client = client(&args.auth)?;
    client.check_rate_limit().await?;

    let principal = client.resolve_context(Some(&args.orgname)).await?;
    let members = client
        .list_org_members(principal.login())
        .await?
        .into_iter()
        .map(|m| m.login)
        .collect::<HashSet<_>>();

    let repos = client.list_repos(&principal).await?;
    for repo in &repos {
        if let Some(pattern) = &pattern {
            if !pattern.is_match(&repo.name) {
                continue;
            }
        }

        client.check_rate_limit().await?;
        match client.list_collaborators(&repo.owner.login, &repo.name).await {
            Ok(collabs) => {
                let outside = collabs
                    .iter()
                    .filter(|c| !members.contains(&c.login))
                    .map(|c| c.login.as_str())
                    .collect::<Vec<_>>();
                println!("{}: {}", repo.name.yellow(), outside.join(", "));
            }
            Err(e) => log_or_fail(&repo.full_name, e)?,
        }
    }

    Ok(())
}
