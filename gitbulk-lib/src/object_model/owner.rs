use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Owner {
    #[serde(rename = "login")]
    pub login: String,
}
