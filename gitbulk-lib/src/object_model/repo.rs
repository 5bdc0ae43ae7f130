use super::owner::Owner;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Repo {
    #[serde(rename = "id")]
    pub id: i64,

    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "full_name")]
    pub full_name: String,

    #[serde(rename = "private")]
    pub private: bool,

    #[serde(rename = "archived", default)]
    pub archived: bool,

    #[serde(rename = "fork", default)]
    pub fork: bool,

    #[serde(rename = "has_wiki", default)]
    pub has_wiki: bool,

    #[serde(rename = "html_url")]
    pub html_url: String,

    #[serde(rename = "ssh_url", default)]
    pub ssh_url: String,

    #[serde(rename = "pushed_at")]
    pub pushed_at: Option<DateTime<Utc>>,

    #[serde(rename = "owner")]
    pub owner: Owner,
}
