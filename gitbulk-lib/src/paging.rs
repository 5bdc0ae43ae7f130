use crate::error::GitBulkError;
use crate::result::GitBulkResult;
use anyhow::anyhow;
use reqwest::{Response, Url};

/// Extracts the `rel="next"` URL from a response's `Link` header, if any.
/// Pages are walked one at a time; bulk jobs here are rate-limit-paced,
/// so there is nothing to gain from fetching pages concurrently.
pub(crate) fn next_page_url(response: &Response) -> GitBulkResult<Option<Url>> {
    let Some(link_header) = response.headers().get("link") else {
        return Ok(None);
    };

    let header = link_header
        .to_str()
        .map_err(|e| GitBulkError::Other(anyhow!(e)))?;

    let Some(next) = rel_url(header, "next") else {
        return Ok(None);
    };

    Ok(Some(
        next.parse::<Url>()
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?,
    ))
}

fn rel_url<'a>(header: &'a str, rel: &str) -> Option<&'a str> {
    let want = format!("rel=\"{rel}\"");
    header.split(',').find_map(|part| {
        let (url_part, rel_part) = part.split_once(';')?;
        if rel_part.trim() != want {
            return None;
        }
        url_part
            .trim()
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
    })
}

#[cfg(test)]
mod tests {
    use super::rel_url;

    const HEADER: &str = "<https://api.github.com/user/repos?page=2>; rel=\"next\", \
                          <https://api.github.com/user/repos?page=7>; rel=\"last\"";

    #[test]
    fn finds_next_relation() {
        assert_eq!(
            rel_url(HEADER, "next"),
            Some("https://api.github.com/user/repos?page=2")
        );
    }

    #[test]
    fn finds_last_relation() {
        assert_eq!(
            rel_url(HEADER, "last"),
            Some("https://api.github.com/user/repos?page=7")
        );
    }

    #[test]
    fn missing_relation_is_none() {
        assert_eq!(rel_url(HEADER, "prev"), None);
        assert_eq!(rel_url("", "next"), None);
    }
}
