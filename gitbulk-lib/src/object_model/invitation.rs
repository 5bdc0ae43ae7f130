use serde::Deserialize;

/// A pending organization invitation. `login` is absent for invitations
/// sent to an email address rather than an existing account.
#[derive(Clone, Debug, Deserialize)]
pub struct OrgInvitation {
    #[serde(rename = "id")]
    pub id: i64,

    #[serde(rename = "login")]
    pub login: Option<String>,
}
