use crate::args::RemoveCollaboratorsArgs;
use crate::commands::{client, log_or_fail};
use crate::confirm::confirm_or_abort;
use anyhow::{bail, Result};
use colored::Colorize;
use gitbulk_lib::{ops, GitHubClient, Repo};

pub async fn run(args: &RemoveCollaboratorsArgs) -> Result<()> {
    let client = client(&args.auth)?;
    client.check_rate_limit().await?;

    let principal = client.resolve_owner(&args.owner).await?;
    let repos = client.list_repos(&principal).await?;
    let to_act = repos
        .iter()
        .filter(|r| r.name.starts_with(&args.pattern))
        .collect::<Vec<_>>();
    if to_act.is_empty() {
        bail!("no repos matching {}/{}*", args.owner, args.pattern);
    }

    let names = to_act
        .iter()
        .map(|r| r.full_name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    confirm_or_abort(
        &format!("all collaborators (except --omit) will be REMOVED from:\n{names}"),
        "affirmative",
    )?;

    for repo in to_act {
        client.check_rate_limit().await?;
        if let Err(e) = strip_repo(&client, args, repo).await {
            log_or_fail(&repo.full_name, e)?;
        }
    }

    Ok(())
}

async fn strip_repo(
    client: &GitHubClient,
    args: &RemoveCollaboratorsArgs,
    repo: &Repo,
) -> gitbulk_lib::GitBulkResult<()> {
    let collabs = client
        .list_collaborators(&repo.owner.login, &repo.name)
        .await?;
    let removable = ops::removable_collaborators(&collabs, &args.omit);
    if removable.is_empty() {
        return Ok(());
    }

    println!("collaborators of {}: {}", repo.full_name, removable.join(" "));

    if repo.archived {
        // archived repos reject collaborator changes; this needs the
        // website, so put the settings page in front of the operator
        log::error!("cannot remove collaborators from archived {}", repo.full_name);
        let settings = format!("https://github.com/{}/settings", repo.full_name);
        if webbrowser::open(&settings).is_err() {
            log::warn!("could not open a browser; visit {settings}");
        }
        return Ok(());
    }

    for login in removable {
        client
            .remove_collaborator(&repo.owner.login, &repo.name, login)
            .await?;
        println!("removed {} from {}", login.red(), repo.full_name);
    }

    Ok(())
}
