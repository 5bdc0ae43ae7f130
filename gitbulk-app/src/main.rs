mod args;
mod commands;
mod confirm;

use crate::args::{Args, Command};
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Dupe(args) => commands::dupe::run(&args).await,
        Command::TeamRepos(args) => commands::team_repos::run(&args).await,
        Command::TeamMembers(args) => commands::team_members::run(&args).await,
        Command::Invite(args) => commands::invite::run(&args).await,
        Command::OrgMembers(args) => commands::org_members::run(&args).await,
        Command::Unwatch(args) => commands::unwatch::run(&args).await,
        Command::RemoveCollaborators(args) => commands::remove_collaborators::run(&args).await,
        Command::SecurityAlerts(args) => commands::security_alerts::run(&args).await,
        Command::SetPrivate(args) => commands::set_private::run(&args).await,
        Command::Archive(args) => commands::archive::run(&args).await,
        Command::CopyFile(args) => commands::copy_file::run(&args).await,
        Command::CountStars(args) => commands::count_stars::run(&args).await,
        Command::ListCollab(args) => commands::list_collab::run(&args).await,
        Command::ListUnlicensed(args) => commands::list_unlicensed::run(&args).await,
    }
}
