use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct RateLimit {
    #[serde(rename = "rate")]
    pub rate: Rate,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Rate {
    #[serde(rename = "limit")]
    pub limit: u32,

    #[serde(rename = "remaining")]
    pub remaining: u32,

    /// Unix epoch seconds at which the quota resets.
    #[serde(rename = "reset")]
    pub reset: i64,
}
