use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gitbulk", about = "Bulk administration of GitHub repos, teams and collaborators")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    #[clap(
        short = 't',
        long = "token",
        help = "GitHub REST API token",
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    #[clap(
        short = 'a',
        long = "oauth",
        help = "Path to a file holding a GitHub token (trailing newline ignored)"
    )]
    pub oauth: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Duplicate repos and their wikis from a roster
    Dupe(DupeArgs),
    /// Create one repo per team from a roster
    TeamRepos(TeamReposArgs),
    /// Add roster users to teams, optionally creating repos and teams
    TeamMembers(TeamMembersArgs),
    /// Invite roster users as repo collaborators, creating missing repos
    Invite(InviteArgs),
    /// Make matching public repos private
    SetPrivate(PatternArgs),
    /// Archive matching repos (unarchiving is manual, via the website)
    Archive(PatternArgs),
    /// Invite roster users into an organization
    OrgMembers(OrgMembersArgs),
    /// Stop watching matching repos of an organization
    Unwatch(UnwatchArgs),
    /// Remove collaborators from matching repos
    RemoveCollaborators(RemoveCollaboratorsArgs),
    /// Enable or disable vulnerability alerts and automated fixes
    SecurityAlerts(SecurityAlertsArgs),
    /// Copy a template file into every repo written in a language
    CopyFile(CopyFileArgs),
    /// Total the stars received by one or more users (GraphQL)
    CountStars(CountStarsArgs),
    /// List outside collaborators per org repo
    ListCollab(ListCollabArgs),
    /// List repos without a license
    ListUnlicensed(ListUnlicensedArgs),
}

#[derive(Debug, clap::Args)]
pub struct DupeArgs {
    #[clap(help = "csv roster mapping identifiers to source repo URLs")]
    pub roster: PathBuf,

    #[clap(long, help = "Create destination repos under this organization")]
    pub orgname: Option<String>,

    #[clap(long, default_value = "", help = "Prefix for destination repo names")]
    pub stem: String,

    #[clap(long = "id-col", default_value = "Email", help = "Roster identifier column")]
    pub id_col: String,

    #[clap(long = "url-col", default_value = "Url", help = "Roster source URL column")]
    pub url_col: String,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct TeamReposArgs {
    #[clap(help = "csv roster with team info")]
    pub roster: PathBuf,

    #[clap(long, help = "GitHub organization")]
    pub orgname: String,

    #[clap(long, default_value = "", help = "Prefix for repo names")]
    pub stem: String,

    #[clap(long = "team-col", default_value = "Team", help = "Team number/name column")]
    pub team_col: String,

    #[clap(long = "name-col", help = "Optional team name column")]
    pub name_col: Option<String>,

    #[clap(long, help = "Create private repos")]
    pub private: bool,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct TeamMembersArgs {
    #[clap(help = "csv roster with usernames and team info")]
    pub roster: PathBuf,

    #[clap(long, help = "GitHub organization")]
    pub orgname: String,

    #[clap(long, default_value = "", help = "Prefix for repo names")]
    pub stem: String,

    #[clap(long = "user-col", default_value = "GitHub", help = "Username column")]
    pub user_col: String,

    #[clap(long = "team-col", default_value = "Team", help = "Team number/name column")]
    pub team_col: String,

    #[clap(long = "name-col", help = "Optional team name column")]
    pub name_col: Option<String>,

    #[clap(long, help = "Create private repos")]
    pub private: bool,

    #[clap(long, help = "Create repo and team when missing")]
    pub create: bool,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct InviteArgs {
    #[clap(help = "csv roster with usernames and team info")]
    pub roster: PathBuf,

    #[clap(long, help = "GitHub organization")]
    pub orgname: String,

    #[clap(long, default_value = "", help = "Prefix for repo names")]
    pub stem: String,

    #[clap(long = "user-col", default_value = "GitHub", help = "Username column")]
    pub user_col: String,

    #[clap(long = "team-col", default_value = "Team", help = "Team number/name column")]
    pub team_col: String,

    #[clap(long, help = "Create private repos")]
    pub private: bool,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct OrgMembersArgs {
    #[clap(help = "csv roster with usernames")]
    pub roster: PathBuf,

    #[clap(long, help = "GitHub organization")]
    pub orgname: String,

    #[clap(long = "user-col", default_value = "GitHub", help = "Username column")]
    pub user_col: String,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct UnwatchArgs {
    #[clap(help = "GitHub organization whose repos to unwatch")]
    pub orgname: String,

    #[clap(long, default_value = "", help = "Only repos whose name starts with this string")]
    pub stem: String,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct RemoveCollaboratorsArgs {
    #[clap(help = "GitHub username or organization")]
    pub owner: String,

    #[clap(help = "Act on repos whose name starts with this string")]
    pub pattern: String,

    #[clap(long, num_args = 1.., help = "Keep these accounts as collaborators")]
    pub omit: Vec<String>,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct SecurityAlertsArgs {
    #[clap(help = "GitHub username or organization")]
    pub owner: String,

    #[clap(long, default_value = "", help = "Only repos whose name starts with this string")]
    pub stem: String,

    #[clap(long, help = "Disable alerts instead of enabling them")]
    pub disable: bool,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct PatternArgs {
    #[clap(help = "GitHub username or organization")]
    pub owner: String,

    #[clap(help = "Act on repos whose name starts with this string")]
    pub pattern: String,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct CopyFileArgs {
    #[clap(help = "Local file to copy into repos")]
    pub file: PathBuf,

    #[clap(help = "Path to write inside each repo, e.g. .github/workflows/ci.yml")]
    pub dest_path: String,

    #[clap(help = "Only repos with this language (case-sensitive)")]
    pub language: String,

    #[clap(help = "GitHub username or organization")]
    pub owner: String,

    #[clap(long, default_value = "", help = "Only repos whose name starts with this string")]
    pub stem: String,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct CountStarsArgs {
    #[clap(required = true, help = "GitHub username(s) to count stars for")]
    pub usernames: Vec<String>,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct ListCollabArgs {
    #[clap(help = "GitHub organization")]
    pub orgname: String,

    #[clap(long, help = "Only repos whose name matches this regex")]
    pub pattern: Option<String>,

    #[clap(flatten)]
    pub auth: AuthArgs,
}

#[derive(Debug, clap::Args)]
pub struct ListUnlicensedArgs {
    #[clap(help = "GitHub username or organization")]
    pub owner: String,

    #[clap(long, default_value = "", help = "Only repos whose name starts with this string")]
    pub stem: String,

    #[clap(flatten)]
    pub auth: AuthArgs,
}
