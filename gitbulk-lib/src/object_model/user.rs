use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct AuthenticatedUser {
    #[serde(rename = "login")]
    pub login: String,
}
