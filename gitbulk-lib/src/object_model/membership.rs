use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Membership {
    #[serde(rename = "state")]
    pub state: String,

    #[serde(rename = "role")]
    pub role: String,
}
