use crate::args::CopyFileArgs;
use crate::commands::{client, log_or_fail};
use anyhow::{Context, Result};
use colored::Colorize;
use gitbulk_lib::{GitHubClient, Repo};

pub async fn run(args: &CopyFileArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    let client = client(&args.auth)?;
    client.check_rate_limit().await?;

    let principal = client.resolve_owner(&args.owner).await?;
    let repos = client.list_repos(&principal).await?;

    for repo in repos.iter().filter(|r| r.name.starts_with(&args.stem)) {
        client.check_rate_limit().await?;
        if let Err(e) = copy_into(&client, args, repo, &text).await {
            log_or_fail(&repo.full_name, e)?;
        }
    }

    Ok(())
}

async fn copy_into(
    client: &GitHubClient,
    args: &CopyFileArgs,
    repo: &Repo,
    text: &str,
) -> gitbulk_lib::GitBulkResult<()> {
    // the dominant language can be misleading (generated HTML, docs);
    // any nonzero share of the requested language counts
    let languages = client.repo_languages(&repo.owner.login, &repo.name).await?;
    if !languages.contains_key(&args.language) {
        return Ok(());
    }

    match client
        .get_content(&repo.owner.login, &repo.name, &args.dest_path)
        .await?
    {
        Some(existing) => {
            if existing.decoded_text()?.trim() != text.trim() {
                println!("{}: {} drifted, updating", repo.full_name.yellow(), args.dest_path);
                client
                    .put_content(
                        &repo.owner.login,
                        &repo.name,
                        &args.dest_path,
                        "update CI",
                        text,
                        Some(&existing.sha),
                    )
                    .await?;
            }
        }
        None => {
            println!("copying {} into {}", args.dest_path, repo.full_name.yellow());
            client
                .put_content(
                    &repo.owner.login,
                    &repo.name,
                    &args.dest_path,
                    "init CI",
                    text,
                    None,
                )
                .await?;
        }
    }

    Ok(())
}
