use crate::object_model::{Owner, Repo};

/// Repos that would be flipped private: name matches the pattern and the
/// repo is still public.
pub fn select_public<'a>(repos: &'a [Repo], pattern: &str) -> Vec<&'a Repo> {
    repos
        .iter()
        .filter(|r| r.name.starts_with(pattern) && !r.private)
        .collect()
}

/// Repos that would be archived: name matches and not yet archived.
pub fn select_unarchived<'a>(repos: &'a [Repo], pattern: &str) -> Vec<&'a Repo> {
    repos
        .iter()
        .filter(|r| r.name.starts_with(pattern) && !r.archived)
        .collect()
}

/// Repos worth a license probe: owned by the principal itself, not a
/// fork, not archived, not the `.github` meta repo.
pub fn select_license_candidates<'a>(
    repos: &'a [Repo],
    owner_login: &str,
    stem: &str,
) -> Vec<&'a Repo> {
    repos
        .iter()
        .filter(|r| {
            r.name.starts_with(stem)
                && r.name != ".github"
                && !r.fork
                && !r.archived
                && r.owner.login == owner_login
        })
        .collect()
}

/// Watched repos belonging to an org, name matching the stem.
pub fn select_watched<'a>(watched: &'a [Repo], org: &str, stem: &str) -> Vec<&'a Repo> {
    watched
        .iter()
        .filter(|r| r.owner.login == org && r.name.starts_with(stem))
        .collect()
}

/// Collaborator logins eligible for removal: everyone except the omitted
/// accounts (typically the operator and co-admins).
pub fn removable_collaborators<'a>(collabs: &'a [Owner], omit: &[String]) -> Vec<&'a str> {
    collabs
        .iter()
        .map(|c| c.login.as_str())
        .filter(|login| !omit.iter().any(|o| o == login))
        .collect()
}

/// Repo name for a team row: `{stem}{team:02}-{name}` when a team name is
/// present (numeric teams zero-padded to two digits), `{stem}{team}`
/// otherwise.
pub fn team_repo_name(stem: &str, team: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => {
            let team = team
                .parse::<u32>()
                .map(|t| format!("{t:02}"))
                .unwrap_or_else(|_| team.to_string());
            format!("{stem}{team}-{name}")
        }
        None => format!("{stem}{team}"),
    }
}

/// GraphQL query totalling the stars a user has received.
pub fn star_query(username: &str) -> String {
    format!(
        r#"query {{
  search(type: REPOSITORY, query: "user:{username} sort:stars stars:>1", first: 100) {{
    repositoryCount
    edges {{
      node {{
        ... on Repository {{
          name
          stargazers {{
            totalCount
          }}
        }}
      }}
    }}
  }}
}}"#
    )
}

/// Sums `stargazers.totalCount` over the search edges of a star-query
/// response.
pub fn star_total(response: &serde_json::Value) -> u64 {
    response["data"]["search"]["edges"]
        .as_array()
        .map(|edges| {
            edges
                .iter()
                .filter_map(|e| e["node"]["stargazers"]["totalCount"].as_u64())
                .sum()
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_model::{Owner, Repo};

    fn repo(name: &str, private: bool, archived: bool, fork: bool, owner: &str) -> Repo {
        Repo {
            id: 0,
            name: name.to_string(),
            full_name: format!("{owner}/{name}"),
            private,
            archived,
            fork,
            has_wiki: false,
            html_url: String::new(),
            ssh_url: String::new(),
            pushed_at: None,
            owner: Owner {
                login: owner.to_string(),
            },
        }
    }

    #[test]
    fn selects_public_repos_matching_pattern() {
        let repos = vec![
            repo("sw01-widgets", false, false, false, "myorg"),
            repo("sw02-gadgets", true, false, false, "myorg"),
            repo("hw01-boards", false, false, false, "myorg"),
        ];
        let picked = select_public(&repos, "sw");
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "sw01-widgets");
    }

    #[test]
    fn archive_selection_ignores_already_archived() {
        let repos = vec![
            repo("sw01-widgets", true, true, false, "myorg"),
            repo("sw02-gadgets", true, false, false, "myorg"),
        ];
        let picked = select_unarchived(&repos, "sw");
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "sw02-gadgets");
    }

    #[test]
    fn license_candidates_exclude_forks_and_meta_repo() {
        let repos = vec![
            repo("proj", false, false, false, "myorg"),
            repo("proj-fork", false, false, true, "myorg"),
            repo(".github", false, false, false, "myorg"),
            repo("elsewhere", false, false, false, "other"),
        ];
        let picked = select_license_candidates(&repos, "myorg", "");
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "proj");
    }

    #[test]
    fn watched_selection_is_scoped_to_the_org() {
        let watched = vec![
            repo("sw01-widgets", false, false, false, "myorg"),
            repo("sw02-gadgets", false, false, false, "otherorg"),
            repo("hw01-boards", false, false, false, "myorg"),
        ];
        let picked = select_watched(&watched, "myorg", "sw");
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "sw01-widgets");
    }

    #[test]
    fn omitted_collaborators_are_kept() {
        let collabs = vec![
            Owner {
                login: "alice".to_string(),
            },
            Owner {
                login: "instructor".to_string(),
            },
        ];
        let removable = removable_collaborators(&collabs, &["instructor".to_string()]);
        assert_eq!(removable, vec!["alice"]);

        let removable = removable_collaborators(&collabs, &[]);
        assert_eq!(removable, vec!["alice", "instructor"]);
    }

    #[test]
    fn team_repo_names_pad_numeric_teams() {
        assert_eq!(team_repo_name("sw", "3", Some("widgets")), "sw03-widgets");
        assert_eq!(team_repo_name("sw", "12", Some("widgets")), "sw12-widgets");
        assert_eq!(team_repo_name("sw", "red", Some("widgets")), "swred-widgets");
        assert_eq!(team_repo_name("sw", "3", None), "sw3");
    }

    #[test]
    fn star_total_sums_edges() {
        let response = serde_json::json!({
            "data": { "search": { "edges": [
                { "node": { "stargazers": { "totalCount": 5 } } },
                { "node": { "stargazers": { "totalCount": 7 } } },
            ]}}
        });
        assert_eq!(star_total(&response), 12);
        assert_eq!(star_total(&serde_json::json!({})), 0);
    }
}
