use crate::error::GitBulkError;

pub type GitBulkResult<T> = std::result::Result<T, GitBulkError>;
