mod dupe;
mod error;
mod git;
mod github_client;
mod logging_middleware;
mod object_model;
pub mod ops;
mod paging;
mod principal;
mod result;
mod roster;

pub use self::dupe::{
    main_repo_up_to_date, mirror_targets, plan_main_mirror, plan_wiki_mirror, split_repo_path,
    ssh_url, Duplicator, MirrorKind, MirrorPlan, MirrorTarget, SkipReason,
};
pub use self::error::GitBulkError;
pub use self::git::GitTool;
pub use self::github_client::GitHubClient;
pub use self::logging_middleware::LoggingMiddleware;
pub use self::object_model::{
    AuthenticatedUser, ContentFile, LicenseInfo, Membership, OrgInvitation, Owner, Rate,
    RateLimit, Repo, RepoLicense, Team,
};
pub use self::principal::Principal;
pub use self::result::GitBulkResult;
pub use self::roster::{load_column, load_roster, load_team_roster, RosterEntry, TeamRow};
