use crate::error::GitBulkError;
use crate::result::GitBulkResult;
use anyhow::anyhow;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct ContentFile {
    #[serde(rename = "path")]
    pub path: String,

    #[serde(rename = "sha")]
    pub sha: String,

    #[serde(rename = "content", default)]
    pub content: String,

    #[serde(rename = "encoding", default)]
    pub encoding: String,
}

impl ContentFile {
    /// The contents API returns base64 with embedded newlines.
    pub fn decoded_text(&self) -> GitBulkResult<String> {
        let raw = self
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>();
        let bytes = BASE64_STANDARD
            .decode(raw)
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        String::from_utf8(bytes).map_err(|e| GitBulkError::Other(anyhow!(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::ContentFile;

    #[test]
    fn decodes_wrapped_base64() {
        let file = ContentFile {
            path: "ci.yml".to_string(),
            sha: "abc".to_string(),
            content: "aGVsbG8g\nd29ybGQ=\n".to_string(),
            encoding: "base64".to_string(),
        };
        assert_eq!(file.decoded_text().unwrap(), "hello world");
    }
}
