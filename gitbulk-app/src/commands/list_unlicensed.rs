use crate::args::ListUnlicensedArgs;
use crate::commands::{client, log_or_fail};
use anyhow::Result;
use gitbulk_lib::ops;

pub async fn run(args: &ListUnlicensedArgs) -> Result<()> {
    let client = client(&args.auth)?;
    client.check_rate_limit().await?;

    let principal = client.resolve_owner(&args.owner).await?;
    let repos = client.list_repos(&principal).await?;

    for repo in ops::select_license_candidates(&repos, principal.login(), &args.stem) {
        client.check_rate_limit().await?;
        match client.get_license(&repo.owner.login, &repo.name).await {
            Ok(None) => println!("{}", repo.full_name),
            Ok(Some(_)) => {}
            Err(e) => log_or_fail(&repo.full_name, e)?,
        }
    }

    Ok(())
}
