use crate::error::GitBulkError;
use crate::git::GitTool;
use crate::github_client::GitHubClient;
use crate::object_model::Repo;
use crate::principal::Principal;
use crate::result::GitBulkResult;
use crate::roster::RosterEntry;
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirrorKind {
    MainRepo,
    Wiki,
}

/// One mirror unit: the main repo of a roster entry, or its wiki.
#[derive(Clone, Debug)]
pub struct MirrorTarget {
    pub kind: MirrorKind,
    pub source_url: String,
    pub dest_name: String,
    pub source_push_time: Option<DateTime<Utc>>,
}

/// What a mirror target needs: nothing, or a clone-and-push (creating
/// the destination repo first when it does not exist yet).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirrorPlan {
    Skip(SkipReason),
    Push { create_destination: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    UpToDate,
    NoSourceWiki,
    WikiAlreadyMirrored,
}

/// Duplicates repos and their wikis under a destination principal.
///
/// Wikis are a pseudo-repo with no REST representation: existence is
/// probed with `ls-remote` against the wiki remote, and a wiki that was
/// mirrored once is never refreshed, because no push timestamp is
/// available to compare against.
pub struct Duplicator<'a> {
    client: &'a GitHubClient,
    git: GitTool,
    principal: Principal,
    stem: String,
    entry_pause: Duration,
    wiki_init_pause: Duration,
}

impl<'a> Duplicator<'a> {
    pub fn new(client: &'a GitHubClient, git: GitTool, principal: Principal, stem: &str) -> Self {
        Self {
            client,
            git,
            principal,
            stem: stem.to_string(),
            entry_pause: Duration::from_millis(100),
            wiki_init_pause: Duration::from_secs(10),
        }
    }

    /// Walks the roster in order. A bad entry is logged and skipped; only
    /// rate-limit exhaustion stops the run.
    pub async fn duplicate_all(&self, roster: &[RosterEntry]) -> GitBulkResult<()> {
        for entry in roster {
            self.client.check_rate_limit().await?;
            if let Err(e) = self.duplicate_entry(entry).await {
                if e.is_fatal() {
                    return Err(e);
                }
                error!("{}: {e}; continuing with next entry", entry.identifier);
            }
            // courtesy pause, keeps abuse-rate protections quiet
            sleep(self.entry_pause).await;
        }
        Ok(())
    }

    async fn duplicate_entry(&self, entry: &RosterEntry) -> GitBulkResult<()> {
        let source_url = ssh_url(&entry.url);
        let (owner, repo) = split_repo_path(&source_url).ok_or_else(|| {
            GitBulkError::Format(format!("cannot derive owner/repo from {}", entry.url))
        })?;

        let pushed = self.client.last_push_time(&owner, &repo).await?;
        let targets = mirror_targets(&self.stem, &entry.identifier, &source_url, pushed);
        if targets.is_empty() {
            warn!("{owner}/{repo} is empty, skipping");
            return Ok(());
        }

        // Independent failure domains: a broken wiki must not stop the
        // main repo mirror, and vice versa.
        for target in targets {
            if let Err(e) = self.mirror(&target).await {
                if e.is_fatal() {
                    return Err(e);
                }
                error!(
                    "{} mirror of {} failed: {e}",
                    kind_label(target.kind),
                    target.dest_name
                );
            }
        }
        Ok(())
    }

    pub async fn mirror(&self, target: &MirrorTarget) -> GitBulkResult<()> {
        match target.kind {
            MirrorKind::MainRepo => self.mirror_main(target).await,
            MirrorKind::Wiki => self.mirror_wiki(target).await,
        }
    }

    async fn mirror_main(&self, target: &MirrorTarget) -> GitBulkResult<()> {
        let login = self.principal.login();
        let dest = self.client.get_repo(login, &target.dest_name).await?;

        let create_destination = match plan_main_mirror(dest.as_ref(), target.source_push_time) {
            MirrorPlan::Skip(_) => {
                info!("{login}/{} is up to date", target.dest_name);
                return Ok(());
            }
            MirrorPlan::Push { create_destination } => create_destination,
        };

        let dest_url = format!("ssh://github.com/{login}/{}", target.dest_name);
        info!("mirroring {} -> {login}/{}", target.source_url, target.dest_name);

        let tmp = TempDir::new().map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        self.git.clone(&target.source_url, tmp.path(), true).await?;

        if create_destination {
            self.client
                .create_repo(&self.principal, &target.dest_name, true, true)
                .await?;
        }

        let workdir = tmp
            .path()
            .join(clone_dir_name(&target.source_url, MirrorKind::MainRepo));
        self.git.push_mirror(&workdir, &dest_url).await
    }

    async fn mirror_wiki(&self, target: &MirrorTarget) -> GitBulkResult<()> {
        let source_wiki = format!("{}.wiki.git", target.source_url);
        let login = self.principal.login();
        let dest_wiki = format!("ssh://github.com/{login}/{}.wiki.git", target.dest_name);

        let source_has_wiki = self.git.remote_exists(&source_wiki).await?;
        let dest_wiki_exists = if source_has_wiki {
            self.git.remote_exists(&dest_wiki).await?
        } else {
            false
        };

        match plan_wiki_mirror(source_has_wiki, dest_wiki_exists) {
            MirrorPlan::Skip(SkipReason::NoSourceWiki) => {
                info!("{} has no wiki", target.source_url);
                return Ok(());
            }
            MirrorPlan::Skip(_) => {
                info!(
                    "wiki of {login}/{} already mirrored, not refreshed",
                    target.dest_name
                );
                return Ok(());
            }
            MirrorPlan::Push { .. } => {}
        }

        info!("mirroring wiki {source_wiki} -> {dest_wiki}");

        let tmp = TempDir::new().map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        self.git.clone(&source_wiki, tmp.path(), false).await?;

        let workdir = tmp.path().join(clone_dir_name(&source_wiki, MirrorKind::Wiki));
        self.git.set_remote_url(&workdir, &dest_wiki).await?;

        // A wiki rejects pushes until it has been initialized once through
        // the web UI, so hand the operator the page and wait.
        let browse = wiki_browse_url(&dest_wiki);
        if webbrowser::open(&browse).is_err() {
            warn!("could not open a browser; visit {browse} and create the first wiki page");
        }
        sleep(self.wiki_init_pause).await;

        self.git.push_force(&workdir).await
    }
}

/// Mirror units for one roster entry. An empty source (no push time)
/// yields no targets at all: no destination is created and no git
/// subprocess runs for that entry.
pub fn mirror_targets(
    stem: &str,
    identifier: &str,
    source_url: &str,
    source_push_time: Option<DateTime<Utc>>,
) -> Vec<MirrorTarget> {
    let Some(pushed) = source_push_time else {
        return Vec::new();
    };
    let dest_name = format!("{stem}{identifier}");
    vec![
        MirrorTarget {
            kind: MirrorKind::MainRepo,
            source_url: source_url.to_string(),
            dest_name: dest_name.clone(),
            source_push_time: Some(pushed),
        },
        MirrorTarget {
            kind: MirrorKind::Wiki,
            source_url: source_url.to_string(),
            dest_name,
            source_push_time: None,
        },
    ]
}

/// Main-repo decision: skip when the destination already holds pushes at
/// least as new as the source; otherwise clone and push, creating the
/// destination first when it does not exist.
pub fn plan_main_mirror(dest: Option<&Repo>, source_push_time: Option<DateTime<Utc>>) -> MirrorPlan {
    match dest {
        Some(existing) if main_repo_up_to_date(existing, source_push_time) => {
            MirrorPlan::Skip(SkipReason::UpToDate)
        }
        Some(_) => MirrorPlan::Push {
            create_destination: false,
        },
        None => MirrorPlan::Push {
            create_destination: true,
        },
    }
}

/// Wiki decision: nothing to do without a source wiki, and a destination
/// wiki that exists is left alone (no timestamp is available to compare).
/// The wiki pass never creates the destination repo; the main-repo pass
/// already did, with the wiki feature enabled.
pub fn plan_wiki_mirror(source_has_wiki: bool, dest_wiki_exists: bool) -> MirrorPlan {
    if !source_has_wiki {
        MirrorPlan::Skip(SkipReason::NoSourceWiki)
    } else if dest_wiki_exists {
        MirrorPlan::Skip(SkipReason::WikiAlreadyMirrored)
    } else {
        MirrorPlan::Push {
            create_destination: false,
        }
    }
}

/// Destination needs no push when its recorded push time is at least the
/// source's. A destination with no recorded push time is stale.
pub fn main_repo_up_to_date(dest: &Repo, source_push_time: Option<DateTime<Utc>>) -> bool {
    match (dest.pushed_at, source_push_time) {
        (Some(dest_time), Some(source_time)) => dest_time >= source_time,
        _ => false,
    }
}

/// Scheme rewrite only: `https://host/...` becomes `ssh://host/...`.
pub fn ssh_url(url: &str) -> String {
    match url.strip_prefix("https://") {
        Some(rest) => format!("ssh://{rest}"),
        None => url.to_string(),
    }
}

/// owner/repo from the last two path segments, `.git` suffix dropped.
pub fn split_repo_path(url: &str) -> Option<(String, String)> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let repo = segments.next()?.trim_end_matches(".git");
    let owner = segments.next()?;
    if owner.is_empty() || repo.is_empty() || owner.contains(':') {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

/// Directory name `git clone` produces inside the temp dir: `repo.git`
/// for a bare clone, `repo.wiki` for a working clone of `repo.wiki.git`.
fn clone_dir_name(url: &str, kind: MirrorKind) -> String {
    let last = url.trim_end_matches('/').rsplit('/').next().unwrap_or(url);
    match kind {
        MirrorKind::MainRepo => {
            if last.ends_with(".git") {
                last.to_string()
            } else {
                format!("{last}.git")
            }
        }
        MirrorKind::Wiki => last.trim_end_matches(".git").to_string(),
    }
}

/// Web page for a wiki remote: scheme back to https, `.wiki.git` tail to
/// `/wiki`.
fn wiki_browse_url(wiki_ssh_url: &str) -> String {
    let https = match wiki_ssh_url.strip_prefix("ssh://") {
        Some(rest) => format!("https://{rest}"),
        None => wiki_ssh_url.to_string(),
    };
    match https.strip_suffix(".wiki.git") {
        Some(base) => format!("{base}/wiki"),
        None => https,
    }
}

fn kind_label(kind: MirrorKind) -> &'static str {
    match kind {
        MirrorKind::MainRepo => "repo",
        MirrorKind::Wiki => "wiki",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_model::{Owner, Repo};
    use chrono::TimeZone;

    fn repo_pushed_at(pushed_at: Option<DateTime<Utc>>) -> Repo {
        Repo {
            id: 1,
            name: "swalice".to_string(),
            full_name: "myorg/swalice".to_string(),
            private: true,
            archived: false,
            fork: false,
            has_wiki: true,
            html_url: "https://github.com/myorg/swalice".to_string(),
            ssh_url: "git@github.com:myorg/swalice.git".to_string(),
            pushed_at,
            owner: Owner {
                login: "myorg".to_string(),
            },
        }
    }

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn rewrites_https_scheme_only() {
        assert_eq!(
            ssh_url("https://github.com/org/repoA"),
            "ssh://github.com/org/repoA"
        );
        assert_eq!(
            ssh_url("ssh://github.com/org/repoA"),
            "ssh://github.com/org/repoA"
        );
    }

    #[test]
    fn derives_owner_and_repo_from_url_tail() {
        assert_eq!(
            split_repo_path("ssh://github.com/org/repoA"),
            Some(("org".to_string(), "repoA".to_string()))
        );
        assert_eq!(
            split_repo_path("https://github.com/org/repoA.git"),
            Some(("org".to_string(), "repoA".to_string()))
        );
        assert_eq!(split_repo_path("repoA"), None);
    }

    #[test]
    fn roster_entry_yields_main_and_wiki_targets() {
        let targets = mirror_targets("sw", "alice", "ssh://github.com/org/repoA", Some(t(1000)));
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].kind, MirrorKind::MainRepo);
        assert_eq!(targets[0].dest_name, "swalice");
        assert_eq!(targets[0].source_push_time, Some(t(1000)));
        assert_eq!(targets[1].kind, MirrorKind::Wiki);
        assert_eq!(targets[1].dest_name, "swalice");
        assert_eq!(targets[1].source_push_time, None);
    }

    #[test]
    fn empty_source_yields_no_targets() {
        let targets = mirror_targets("sw", "alice", "ssh://github.com/org/repoA", None);
        assert!(targets.is_empty());
    }

    #[test]
    fn missing_destination_is_created_then_pushed() {
        assert_eq!(
            plan_main_mirror(None, Some(t(1000))),
            MirrorPlan::Push {
                create_destination: true
            }
        );
    }

    #[test]
    fn stale_destination_is_pushed_without_creation() {
        let dest = repo_pushed_at(Some(t(500)));
        assert_eq!(
            plan_main_mirror(Some(&dest), Some(t(1000))),
            MirrorPlan::Push {
                create_destination: false
            }
        );
    }

    #[test]
    fn up_to_date_destination_skips_push_but_wiki_is_still_planned() {
        let dest = repo_pushed_at(Some(t(2000)));
        assert_eq!(
            plan_main_mirror(Some(&dest), Some(t(1000))),
            MirrorPlan::Skip(SkipReason::UpToDate)
        );
        // the wiki decision does not look at timestamps at all
        assert_eq!(
            plan_wiki_mirror(true, false),
            MirrorPlan::Push {
                create_destination: false
            }
        );
    }

    #[test]
    fn absent_source_wiki_skips_only_the_wiki() {
        assert_eq!(
            plan_wiki_mirror(false, false),
            MirrorPlan::Skip(SkipReason::NoSourceWiki)
        );
        assert_eq!(
            plan_main_mirror(None, Some(t(1000))),
            MirrorPlan::Push {
                create_destination: true
            }
        );
    }

    #[test]
    fn mirrored_wiki_is_never_refreshed() {
        assert_eq!(
            plan_wiki_mirror(true, true),
            MirrorPlan::Skip(SkipReason::WikiAlreadyMirrored)
        );
    }

    #[test]
    fn newer_destination_needs_no_push() {
        let dest = repo_pushed_at(Some(t(2000)));
        assert!(main_repo_up_to_date(&dest, Some(t(1000))));
        assert!(main_repo_up_to_date(&dest, Some(t(2000))));
        assert!(!main_repo_up_to_date(&dest, Some(t(3000))));
    }

    #[test]
    fn destination_without_push_time_is_stale() {
        let dest = repo_pushed_at(None);
        assert!(!main_repo_up_to_date(&dest, Some(t(1000))));
    }

    #[test]
    fn clone_dir_names_match_git_defaults() {
        assert_eq!(
            clone_dir_name("ssh://github.com/org/repoA", MirrorKind::MainRepo),
            "repoA.git"
        );
        assert_eq!(
            clone_dir_name("ssh://github.com/org/repoA.wiki.git", MirrorKind::Wiki),
            "repoA.wiki"
        );
    }

    #[test]
    fn wiki_browse_url_points_at_the_wiki_page() {
        assert_eq!(
            wiki_browse_url("ssh://github.com/me/swalice.wiki.git"),
            "https://github.com/me/swalice/wiki"
        );
    }
}
