// error.rs - Crate-wide error type

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while building or joining distance matrices
#[derive(Error, Debug)]
pub enum AsdistError {
    /// Missing or inconsistent command line / configuration values
    #[error("{message}")]
    Usage { message: String },

    /// Unexpected token in the genotype file
    #[error("{message} (file '{}', line {line}, column {column}, value '{value}')", path.display())]
    Format {
        path: PathBuf,
        line: usize,
        column: usize,
        value: String,
        message: String,
    },

    /// Malformed file written by a previous run or by an external tool
    #[error("Malformed file '{}': {message}", path.display())]
    Persisted { path: PathBuf, message: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, AsdistError>;

impl AsdistError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    pub fn persisted(path: &Path, message: impl Into<String>) -> Self {
        Self::Persisted {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Usage and configuration errors end the run quietly; everything else is fatal
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. } | Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let error = AsdistError::Format {
            path: PathBuf::from("genes.txt"),
            line: 3,
            column: 7,
            value: "x".to_string(),
            message: "unknown genotype".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "unknown genotype (file 'genes.txt', line 3, column 7, value 'x')"
        );
    }

    #[test]
    fn test_usage_classification() {
        assert!(AsdistError::usage("--input is required").is_usage());
        assert!(AsdistError::Config {
            path: PathBuf::from("run.toml"),
            message: "bad".to_string()
        }
        .is_usage());
        assert!(!AsdistError::persisted(Path::new("Counts1_0.csv"), "empty").is_usage());
        let io = AsdistError::io(
            Path::new("missing.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(!io.is_usage());
        assert!(io.to_string().contains("missing.txt"));
    }
}
