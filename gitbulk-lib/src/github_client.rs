use crate::error::GitBulkError;
use crate::object_model::{
    AuthenticatedUser, ContentFile, Membership, OrgInvitation, Owner, RateLimit, Repo,
    RepoLicense, Team,
};
use crate::paging::next_page_url;
use crate::principal::Principal;
use crate::result::GitBulkResult;
use crate::LoggingMiddleware;
use anyhow::anyhow;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use chrono::{DateTime, TimeZone, Utc};
use log::{info, warn, Level};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, IntoUrl, Method, Response, StatusCode, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;

pub struct GitHubClient {
    url: Url,
    token: String,
    http: ClientWithMiddleware,
}

impl GitHubClient {
    pub fn new<U>(url: U, token: &str) -> GitBulkResult<Self>
    where
        U: IntoUrl,
    {
        let http = ClientBuilder::new(Client::new())
            .with(LoggingMiddleware::new(Level::Debug))
            .build();
        Ok(Self {
            url: url
                .into_url()
                .map_err(|e| GitBulkError::Other(anyhow!(e)))?,
            token: String::from(token),
            http,
        })
    }

    /// Reads a bearer token from a plain-text file. The token is trimmed:
    /// GitHub rejects credentials carrying a trailing newline.
    pub fn from_token_file<U>(url: U, path: &Path) -> GitBulkResult<Self>
    where
        U: IntoUrl,
    {
        let token = std::fs::read_to_string(path)
            .map_err(|e| GitBulkError::Auth(format!("cannot read {}: {e}", path.display())))?;
        let token = token.trim();
        if token.is_empty() {
            return Err(GitBulkError::Auth(format!("{} is empty", path.display())));
        }
        Self::new(url, token)
    }

    pub async fn authenticated_user(&self) -> GitBulkResult<AuthenticatedUser> {
        self.get_json("/user").await
    }

    pub async fn user_orgs(&self) -> GitBulkResult<Vec<Owner>> {
        self.get_paged(self.url_for("/user/orgs")?).await
    }

    /// Resolves the principal API calls run under: the named organization
    /// when the authenticated identity belongs to it, otherwise the
    /// authenticated user itself.
    pub async fn resolve_context(&self, org_name: Option<&str>) -> GitBulkResult<Principal> {
        let user = self.authenticated_user().await?;
        let Some(org_name) = org_name else {
            return Ok(Principal::User { login: user.login });
        };

        let orgs = self.user_orgs().await?;
        if orgs.iter().any(|o| o.login == org_name) {
            Ok(Principal::Organization {
                login: org_name.to_string(),
            })
        } else {
            Err(GitBulkError::NotFound(format!(
                "organization {org_name} (membership of {})",
                user.login
            )))
        }
    }

    /// Determines whether a bare name is an organization or a user.
    pub async fn resolve_owner(&self, name: &str) -> GitBulkResult<Principal> {
        if self
            .get_optional::<Owner>(&format!("/orgs/{name}"))
            .await?
            .is_some()
        {
            return Ok(Principal::Organization {
                login: name.to_string(),
            });
        }
        match self.get_optional::<Owner>(&format!("/users/{name}")).await? {
            Some(owner) => Ok(Principal::User { login: owner.login }),
            None => Err(GitBulkError::NotFound(format!("user or org {name}"))),
        }
    }

    /// Fails the run when the API quota is exhausted; warns when it is
    /// nearly so. Bulk loops call this per iteration, not just at startup,
    /// because a long run can exhaust the quota midway.
    pub async fn check_rate_limit(&self) -> GitBulkResult<()> {
        let limits: RateLimit = self.get_json("/rate_limit").await?;
        let rate = limits.rate;
        let reset = Utc
            .timestamp_opt(rate.reset, 0)
            .single()
            .unwrap_or_else(Utc::now);

        if rate.remaining == 0 {
            return Err(GitBulkError::RateLimit {
                limit: rate.limit,
                reset,
            });
        }
        if rate.remaining < 10 {
            warn!(
                "approaching GitHub API limit, {} / {} remaining until {reset} UTC",
                rate.remaining, rate.limit
            );
        } else {
            info!(
                "GitHub API limit: {} / {} remaining until {reset} UTC",
                rate.remaining, rate.limit
            );
        }
        Ok(())
    }

    pub async fn get_repo(&self, owner: &str, name: &str) -> GitBulkResult<Option<Repo>> {
        self.get_optional(&format!("/repos/{owner}/{name}")).await
    }

    /// A repo with no retrievable content at its root is empty.
    pub async fn repo_is_empty(&self, owner: &str, name: &str) -> GitBulkResult<bool> {
        Ok(self
            .get_optional::<serde_json::Value>(&format!("/repos/{owner}/{name}/contents/"))
            .await?
            .is_none())
    }

    /// Last push time of a repo, or `None` when the repo is empty.
    /// Fails with NotFound when the repo itself is absent.
    pub async fn last_push_time(
        &self,
        owner: &str,
        name: &str,
    ) -> GitBulkResult<Option<DateTime<Utc>>> {
        let repo = self
            .get_repo(owner, name)
            .await?
            .ok_or_else(|| GitBulkError::NotFound(format!("repo {owner}/{name}")))?;
        if self.repo_is_empty(owner, name).await? {
            return Ok(None);
        }
        Ok(repo.pushed_at)
    }

    pub async fn list_repos(&self, principal: &Principal) -> GitBulkResult<Vec<Repo>> {
        let mut url = self.url_for(&principal.repos_path())?;
        url.query_pairs_mut()
            .append_pair("type", "all")
            .append_pair("per_page", "100");
        self.get_paged(url).await
    }

    pub async fn create_repo(
        &self,
        principal: &Principal,
        name: &str,
        private: bool,
        has_wiki: bool,
    ) -> GitBulkResult<Repo> {
        let url = self.url_for(&principal.create_repo_path())?;
        let body = serde_json::json!({
            "name": name,
            "private": private,
            "has_wiki": has_wiki,
        });
        let response = self
            .request(Method::POST, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Self::expect_success(response)
            .await?
            .json::<Repo>()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))
    }

    pub async fn set_private(&self, owner: &str, name: &str, private: bool) -> GitBulkResult<()> {
        self.patch_repo(owner, name, serde_json::json!({ "private": private }))
            .await
    }

    pub async fn set_archived(&self, owner: &str, name: &str, archived: bool) -> GitBulkResult<()> {
        self.patch_repo(owner, name, serde_json::json!({ "archived": archived }))
            .await
    }

    pub async fn list_collaborators(&self, owner: &str, name: &str) -> GitBulkResult<Vec<Owner>> {
        let mut url = self.url_for(&format!("/repos/{owner}/{name}/collaborators"))?;
        url.query_pairs_mut().append_pair("per_page", "100");
        self.get_paged(url).await
    }

    pub async fn is_collaborator(
        &self,
        owner: &str,
        name: &str,
        username: &str,
    ) -> GitBulkResult<bool> {
        self.probe(&format!("/repos/{owner}/{name}/collaborators/{username}"))
            .await
    }

    pub async fn remove_collaborator(
        &self,
        owner: &str,
        name: &str,
        username: &str,
    ) -> GitBulkResult<()> {
        let url = self.url_for(&format!("/repos/{owner}/{name}/collaborators/{username}"))?;
        self.send_no_body(Method::DELETE, url).await
    }

    pub async fn add_collaborator(
        &self,
        owner: &str,
        name: &str,
        username: &str,
    ) -> GitBulkResult<()> {
        let url = self.url_for(&format!("/repos/{owner}/{name}/collaborators/{username}"))?;
        self.send_no_body(Method::PUT, url).await
    }

    /// Repos the authenticated user watches.
    pub async fn list_watched(&self) -> GitBulkResult<Vec<Repo>> {
        let mut url = self.url_for("/user/subscriptions")?;
        url.query_pairs_mut().append_pair("per_page", "100");
        self.get_paged(url).await
    }

    pub async fn unwatch(&self, owner: &str, name: &str) -> GitBulkResult<()> {
        let url = self.url_for(&format!("/repos/{owner}/{name}/subscription"))?;
        self.send_no_body(Method::DELETE, url).await
    }

    pub async fn vulnerability_alerts_enabled(
        &self,
        owner: &str,
        name: &str,
    ) -> GitBulkResult<bool> {
        self.probe(&format!("/repos/{owner}/{name}/vulnerability-alerts"))
            .await
    }

    pub async fn set_vulnerability_alerts(
        &self,
        owner: &str,
        name: &str,
        enabled: bool,
    ) -> GitBulkResult<()> {
        let url = self.url_for(&format!("/repos/{owner}/{name}/vulnerability-alerts"))?;
        let method = if enabled { Method::PUT } else { Method::DELETE };
        self.send_no_body(method, url).await
    }

    pub async fn set_automated_security_fixes(
        &self,
        owner: &str,
        name: &str,
        enabled: bool,
    ) -> GitBulkResult<()> {
        let url = self.url_for(&format!("/repos/{owner}/{name}/automated-security-fixes"))?;
        let method = if enabled { Method::PUT } else { Method::DELETE };
        self.send_no_body(method, url).await
    }

    pub async fn get_user(&self, login: &str) -> GitBulkResult<Option<Owner>> {
        self.get_optional(&format!("/users/{login}")).await
    }

    pub async fn list_org_invitations(&self, org: &str) -> GitBulkResult<Vec<OrgInvitation>> {
        let mut url = self.url_for(&format!("/orgs/{org}/invitations"))?;
        url.query_pairs_mut().append_pair("per_page", "100");
        self.get_paged(url).await
    }

    pub async fn add_org_membership(&self, org: &str, username: &str) -> GitBulkResult<()> {
        let url = self.url_for(&format!("/orgs/{org}/memberships/{username}"))?;
        let response = self
            .request(Method::PUT, url)
            .json(&serde_json::json!({ "role": "member" }))
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Self::expect_success(response).await?;
        Ok(())
    }

    pub async fn list_org_members(&self, org: &str) -> GitBulkResult<Vec<Owner>> {
        let mut url = self.url_for(&format!("/orgs/{org}/members"))?;
        url.query_pairs_mut().append_pair("per_page", "100");
        self.get_paged(url).await
    }

    pub async fn get_team(&self, org: &str, slug: &str) -> GitBulkResult<Option<Team>> {
        self.get_optional(&format!("/orgs/{org}/teams/{slug}")).await
    }

    pub async fn create_team(&self, org: &str, name: &str, repo: &str) -> GitBulkResult<Team> {
        let url = self.url_for(&format!("/orgs/{org}/teams"))?;
        let body = serde_json::json!({
            "name": name,
            "repo_names": [format!("{org}/{repo}")],
        });
        let response = self
            .request(Method::POST, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Self::expect_success(response)
            .await?
            .json::<Team>()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))
    }

    pub async fn get_team_membership(
        &self,
        org: &str,
        slug: &str,
        username: &str,
    ) -> GitBulkResult<Option<Membership>> {
        self.get_optional(&format!("/orgs/{org}/teams/{slug}/memberships/{username}"))
            .await
    }

    pub async fn add_team_membership(
        &self,
        org: &str,
        slug: &str,
        username: &str,
    ) -> GitBulkResult<()> {
        let url = self.url_for(&format!("/orgs/{org}/teams/{slug}/memberships/{username}"))?;
        let response = self
            .request(Method::PUT, url)
            .json(&serde_json::json!({ "role": "member" }))
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Self::expect_success(response).await?;
        Ok(())
    }

    pub async fn repo_languages(
        &self,
        owner: &str,
        name: &str,
    ) -> GitBulkResult<HashMap<String, u64>> {
        self.get_json(&format!("/repos/{owner}/{name}/languages"))
            .await
    }

    pub async fn get_license(
        &self,
        owner: &str,
        name: &str,
    ) -> GitBulkResult<Option<RepoLicense>> {
        self.get_optional(&format!("/repos/{owner}/{name}/license"))
            .await
    }

    pub async fn get_content(
        &self,
        owner: &str,
        name: &str,
        path: &str,
    ) -> GitBulkResult<Option<ContentFile>> {
        self.get_optional(&format!("/repos/{owner}/{name}/contents/{path}"))
            .await
    }

    /// Creates the file when `sha` is `None`, updates the existing blob
    /// otherwise.
    pub async fn put_content(
        &self,
        owner: &str,
        name: &str,
        path: &str,
        message: &str,
        text: &str,
        sha: Option<&str>,
    ) -> GitBulkResult<()> {
        let url = self.url_for(&format!("/repos/{owner}/{name}/contents/{path}"))?;
        let mut body = serde_json::json!({
            "message": message,
            "content": BASE64_STANDARD.encode(text),
        });
        if let Some(sha) = sha {
            body["sha"] = serde_json::json!(sha);
        }
        let response = self
            .request(Method::PUT, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Self::expect_success(response).await?;
        Ok(())
    }

    pub async fn graphql(&self, query: &str) -> GitBulkResult<serde_json::Value> {
        let url = self.url_for("/graphql")?;
        let response = self
            .request(Method::POST, url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Self::expect_success(response)
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))
    }

    async fn patch_repo(
        &self,
        owner: &str,
        name: &str,
        body: serde_json::Value,
    ) -> GitBulkResult<()> {
        let url = self.url_for(&format!("/repos/{owner}/{name}"))?;
        let response = self
            .request(Method::PATCH, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Self::expect_success(response).await?;
        Ok(())
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(USER_AGENT, "gitbulk")
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(&self.token)
    }

    fn url_for(&self, path: &str) -> GitBulkResult<Url> {
        self.url
            .join(path)
            .map_err(|e| GitBulkError::Other(anyhow!(e)))
    }

    async fn get_json<T>(&self, path: &str) -> GitBulkResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, self.url_for(path)?)
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Self::expect_success(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))
    }

    /// Boolean probe for endpoints that answer 204 for "yes" and 404 for
    /// "no"; any other status is a failure.
    async fn probe(&self, path: &str) -> GitBulkResult<bool> {
        let response = self
            .request(Method::GET, self.url_for(path)?)
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(GitBulkError::Api {
                status,
                url: response.url().to_string(),
            }),
        }
    }

    async fn send_no_body(&self, method: Method, url: Url) -> GitBulkResult<()> {
        let response = self
            .request(method, url)
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// GET where a 404 means "absent" rather than failure. Any other
    /// non-success status is still an error, so absence and failure are
    /// never conflated.
    async fn get_optional<T>(&self, path: &str) -> GitBulkResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, self.url_for(path)?)
            .send()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(
            Self::expect_success(response)
                .await?
                .json::<T>()
                .await
                .map_err(|e| GitBulkError::Other(anyhow!(e)))?,
        ))
    }

    async fn get_paged<T>(&self, url: Url) -> GitBulkResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut all_items = Vec::new();
        let mut next = Some(url);
        while let Some(url) = next.take() {
            let response = self
                .request(Method::GET, url)
                .send()
                .await
                .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
            let response = Self::expect_success(response).await?;
            next = next_page_url(&response)?;
            all_items.extend(
                response
                    .json::<Vec<T>>()
                    .await
                    .map_err(|e| GitBulkError::Other(anyhow!(e)))?,
            );
        }
        Ok(all_items)
    }

    async fn expect_success(response: Response) -> GitBulkResult<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(GitBulkError::Api {
                status: response.status(),
                url: response.url().to_string(),
            })
        }
    }
}
