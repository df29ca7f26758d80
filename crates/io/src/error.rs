use std::fmt;
use std::path::PathBuf;

/// Failure to turn the expected inventory source into a host map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// File could not be opened or read.
    Open { path: PathBuf, message: String },
    /// Source has no header row.
    MissingHeader,
    /// A data row has fewer than two columns. `line` is 1-based and counts the header.
    MalformedRow { line: u64, columns: usize },
    /// Hostname or address cell is blank while the other is not.
    EmptyField { line: u64, field: &'static str },
    /// Underlying CSV reader error (bad quoting, invalid UTF-8 in reader input, ...).
    Csv(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            Self::MissingHeader => write!(f, "input is empty (expected a hostname,ip header row)"),
            Self::MalformedRow { line, columns } => {
                write!(f, "line {line}: expected 2 columns (hostname, ip), found {columns}")
            }
            Self::EmptyField { line, field } => write!(f, "line {line}: empty {field}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}
