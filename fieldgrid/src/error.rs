use thiserror::Error;

/// Problems with a table's column set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("duplicate column key '{0}'")]
    DuplicateKey(String),

    #[error("table has no columns")]
    Empty,
}
