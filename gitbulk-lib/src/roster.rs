use crate::error::GitBulkError;
use crate::result::GitBulkResult;
use anyhow::anyhow;
use std::path::Path;

/// One row of a duplication roster: the identifier becomes the destination
/// repo name suffix, the url points at the repo to duplicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub identifier: String,
    pub url: String,
}

/// One row of a team/member roster. `team` is required; the others depend
/// on which columns the caller selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamRow {
    pub username: Option<String>,
    pub team: String,
    pub name: Option<String>,
}

impl TeamRow {
    /// The username, for callers that loaded the roster with a username
    /// column. A row without one is a Format error, never an empty string.
    pub fn require_username(&self) -> GitBulkResult<&str> {
        self.username.as_deref().ok_or_else(|| {
            GitBulkError::Format(format!("row for team {} has no username", self.team))
        })
    }
}

/// Loads an identifier→url roster from a csv file, selecting two named
/// columns. Rows missing either value are dropped; file order is kept.
pub fn load_roster(path: &Path, id_column: &str, url_column: &str) -> GitBulkResult<Vec<RosterEntry>> {
    let mut reader = open(path)?;
    let id_idx = column_index(&mut reader, path, id_column)?;
    let url_idx = column_index(&mut reader, path, url_column)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        let identifier = cell(&record, id_idx);
        let url = cell(&record, url_idx);
        if let (Some(identifier), Some(url)) = (identifier, url) {
            entries.push(RosterEntry { identifier, url });
        }
    }
    Ok(entries)
}

/// Loads a team roster. `team_column` must exist; username and team-name
/// columns are looked up only when requested. Rows missing any requested
/// value are dropped.
pub fn load_team_roster(
    path: &Path,
    user_column: Option<&str>,
    team_column: &str,
    name_column: Option<&str>,
) -> GitBulkResult<Vec<TeamRow>> {
    let mut reader = open(path)?;
    let user_idx = user_column
        .map(|c| column_index(&mut reader, path, c))
        .transpose()?;
    let team_idx = column_index(&mut reader, path, team_column)?;
    let name_idx = name_column
        .map(|c| column_index(&mut reader, path, c))
        .transpose()?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        let Some(team) = cell(&record, team_idx) else {
            continue;
        };
        let username = match user_idx {
            Some(i) => match cell(&record, i) {
                Some(u) => Some(u),
                None => continue,
            },
            None => None,
        };
        let name = match name_idx {
            Some(i) => match cell(&record, i) {
                Some(n) => Some(n),
                None => continue,
            },
            None => None,
        };
        rows.push(TeamRow {
            username,
            team,
            name,
        });
    }
    Ok(rows)
}

/// Loads a single named column, dropping empty cells; file order is kept.
pub fn load_column(path: &Path, column: &str) -> GitBulkResult<Vec<String>> {
    let mut reader = open(path)?;
    let idx = column_index(&mut reader, path, column)?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        if let Some(value) = cell(&record, idx) {
            values.push(value);
        }
    }
    Ok(values)
}

fn open(path: &Path) -> GitBulkResult<csv::Reader<std::fs::File>> {
    csv::Reader::from_path(path)
        .map_err(|e| GitBulkError::Format(format!("cannot read {}: {e}", path.display())))
}

fn column_index(
    reader: &mut csv::Reader<std::fs::File>,
    path: &Path,
    column: &str,
) -> GitBulkResult<usize> {
    let headers = reader
        .headers()
        .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| {
            GitBulkError::Format(format!("column {column} not found in {}", path.display()))
        })
}

fn cell(record: &csv::StringRecord, index: usize) -> Option<String> {
    let value = record.get(index)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{load_roster, load_team_roster};
    use crate::error::GitBulkError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(text: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(text.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn keeps_file_order_and_drops_incomplete_rows() {
        let f = write_csv(
            "Email,Extra,Url\n\
             bob@example.com,x,https://github.com/org/repoB\n\
             ,x,https://github.com/org/skipped\n\
             alice@example.com,x,https://github.com/org/repoA\n\
             carol@example.com,x,\n",
        );
        let roster = load_roster(f.path(), "Email", "Url").unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].identifier, "bob@example.com");
        assert_eq!(roster[1].identifier, "alice@example.com");
        assert_eq!(roster[1].url, "https://github.com/org/repoA");
    }

    #[test]
    fn missing_column_is_a_format_error() {
        let f = write_csv("Email,Url\na,b\n");
        let err = load_roster(f.path(), "Email", "Repository").unwrap_err();
        assert!(matches!(err, GitBulkError::Format(_)));
    }

    #[test]
    fn team_roster_with_optional_columns() {
        let f = write_csv(
            "GitHub,Team,Name\n\
             alice,1,widgets\n\
             bob,1,widgets\n\
             nobody,,widgets\n",
        );
        let rows = load_team_roster(f.path(), Some("GitHub"), "Team", Some("Name")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].username.as_deref(), Some("alice"));
        assert_eq!(rows[0].team, "1");
        assert_eq!(rows[0].name.as_deref(), Some("widgets"));

        let rows = load_team_roster(f.path(), None, "Team", None).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].username.is_none());
    }

    #[test]
    fn single_column_load_drops_empty_cells() {
        let f = write_csv("Username,Extra\nalice,x\n,x\nbob,\n");
        let users = super::load_column(f.path(), "Username").unwrap();
        assert_eq!(users, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn username_is_required_not_defaulted() {
        let f = write_csv("GitHub,Team\nalice,1\n");
        let rows = load_team_roster(f.path(), Some("GitHub"), "Team", None).unwrap();
        assert_eq!(rows[0].require_username().unwrap(), "alice");

        let rows = load_team_roster(f.path(), None, "Team", None).unwrap();
        let err = rows[0].require_username().unwrap_err();
        assert!(matches!(err, GitBulkError::Format(_)));
    }
}
