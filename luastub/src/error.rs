use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the generators; the caller decides whether to skip or abort.
#[derive(Debug, Error)]
pub enum StubError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown document type `{kind}` for {name}")]
    UnknownKind { name: String, kind: String },

    #[error("{name} declares multiple return types where only one is supported")]
    MultipleReturns { name: String },

    #[error("{} syntax error(s) in {}\n\n{}", .errors.len(), .path.display(), join_errors(.errors))]
    Syntax {
        path: PathBuf,
        errors: Vec<SyntaxError>,
    },
}

/// One parser diagnostic, 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

fn join_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T, E = StubError> = std::result::Result<T, E>;
