use crate::args::OrgMembersArgs;
use crate::commands::{client, log_or_fail};
use anyhow::{bail, Result};
use colored::Colorize;
use gitbulk_lib::load_column;
use std::collections::HashSet;

pub async fn run(args: &OrgMembersArgs) -> Result<()> {
    let client = client(&args.auth)?;
    let usernames = load_column(&args.roster, &args.user_col)?;
    if usernames.is_empty() {
        bail!("no usable rows in {}", args.roster.display());
    }

    let principal = client.resolve_context(Some(&args.orgname)).await?;
    let org = principal.login();

    let members = client
        .list_org_members(org)
        .await?
        .into_iter()
        .map(|m| m.login)
        .collect::<HashSet<_>>();
    let invited = client
        .list_org_invitations(org)
        .await?
        .into_iter()
        .filter_map(|i| i.login)
        .collect::<HashSet<_>>();

    for login in &usernames {
        client.check_rate_limit().await?;
        if members.contains(login) || invited.contains(login) {
            continue;
        }

        // a typo in the roster should stop the run, not half-invite it
        if client.get_user(login).await?.is_none() {
            bail!("unknown GitHub username {login}");
        }

        match client.add_org_membership(org, login).await {
            Ok(()) => println!("invited: {}", login.green()),
            Err(e) => log_or_fail(login, e)?,
        }
    }

    Ok(())
}
