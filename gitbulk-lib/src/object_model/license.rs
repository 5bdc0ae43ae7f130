use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct RepoLicense {
    #[serde(rename = "license")]
    pub license: LicenseInfo,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LicenseInfo {
    #[serde(rename = "key")]
    pub key: String,

    #[serde(rename = "name")]
    pub name: String,
}
