use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config file at any of the searched locations.
    NotFound(Vec<PathBuf>),
    /// File exists but could not be read.
    Read { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    Parse(String),
    /// Required value absent from file and environment.
    Missing(&'static str),
    /// Value present but unusable.
    Invalid { field: &'static str, message: String },
    /// `openapi.enabled = false`.
    Disabled,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(searched) => {
                let paths: Vec<String> = searched.iter().map(|p| p.display().to_string()).collect();
                write!(f, "no config file found (searched: {})", paths.join(", "))
            }
            Self::Read { path, message } => {
                write!(f, "cannot read config {}: {message}", path.display())
            }
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Missing(field) => write!(f, "missing required setting: {field}"),
            Self::Invalid { field, message } => write!(f, "invalid {field}: {message}"),
            Self::Disabled => write!(f, "monitoring API access is disabled (openapi.enabled = false)"),
        }
    }
}

impl std::error::Error for ConfigError {}
