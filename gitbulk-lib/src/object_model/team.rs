use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Team {
    #[serde(rename = "id")]
    pub id: i64,

    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "slug")]
    pub slug: String,
}
