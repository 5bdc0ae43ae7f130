use crate::args::CountStarsArgs;
use crate::commands::client;
use anyhow::Result;
use colored::Colorize;
use gitbulk_lib::ops;

pub async fn run(args: &CountStarsArgs) -> Result<()> {
    let client = client(&args.auth)?;

    let mut grand_total = 0;
    for username in &args.usernames {
        client.check_rate_limit().await?;
        let response = client.graphql(&ops::star_query(username)).await?;
        let total = ops::star_total(&response);
        grand_total += total;
        println!("{}: {} stars", username.yellow(), total);
    }

    if args.usernames.len() > 1 {
        println!("total: {grand_total} stars");
    }

    Ok(())
}
