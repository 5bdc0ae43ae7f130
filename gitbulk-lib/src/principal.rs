/// The authenticated entity under which repos are listed and created:
/// either an individual account or an organization. Callers go through
/// the accessors here instead of branching on the kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Principal {
    User { login: String },
    Organization { login: String },
}

impl Principal {
    pub fn login(&self) -> &str {
        match self {
            Self::User { login } | Self::Organization { login } => login,
        }
    }

    pub fn is_organization(&self) -> bool {
        matches!(self, Self::Organization { .. })
    }

    /// Path for listing every repo visible under this principal.
    pub(crate) fn repos_path(&self) -> String {
        match self {
            Self::User { login } => format!("/users/{login}/repos"),
            Self::Organization { login } => format!("/orgs/{login}/repos"),
        }
    }

    /// Path for creating a repo owned by this principal.
    pub(crate) fn create_repo_path(&self) -> String {
        match self {
            Self::User { .. } => "/user/repos".to_string(),
            Self::Organization { login } => format!("/orgs/{login}/repos"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Principal;

    #[test]
    fn org_paths_are_scoped_to_the_org() {
        let p = Principal::Organization {
            login: "myorg".to_string(),
        };
        assert_eq!(p.repos_path(), "/orgs/myorg/repos");
        assert_eq!(p.create_repo_path(), "/orgs/myorg/repos");
    }

    #[test]
    fn user_repo_creation_goes_through_the_authenticated_user() {
        let p = Principal::User {
            login: "alice".to_string(),
        };
        assert_eq!(p.repos_path(), "/users/alice/repos");
        assert_eq!(p.create_repo_path(), "/user/repos");
    }
}
