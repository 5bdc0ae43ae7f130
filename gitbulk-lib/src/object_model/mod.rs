mod content;
mod invitation;
mod license;
mod membership;
mod owner;
mod rate_limit;
mod repo;
mod team;
mod user;

pub use self::content::ContentFile;
pub use self::invitation::OrgInvitation;
pub use self::license::{LicenseInfo, RepoLicense};
pub use self::membership::Membership;
pub use self::owner::Owner;
pub use self::rate_limit::{Rate, RateLimit};
pub use self::repo::Repo;
pub use self::team::Team;
pub use self::user::AuthenticatedUser;
