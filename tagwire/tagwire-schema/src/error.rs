use thiserror::Error;

/// A syntax error in schema text, tied to the 1-based line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {detail}")]
pub struct SchemaParseError {
    pub line: usize,
    pub detail: String,
}

impl SchemaParseError {
    pub(crate) fn new(line: usize, detail: impl Into<String>) -> Self {
        Self {
            line,
            detail: detail.into(),
        }
    }
}
