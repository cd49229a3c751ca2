//! PST-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, PstError>;

/// Top-level error type for paperstat.
#[derive(Debug, Error)]
pub enum PstError {
    #[error("[PST-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[PST-1002] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[PST-1101] unsupported platform: {details}")]
    UnsupportedPlatform { details: String },

    #[error("[PST-2001] telemetry command failed ({command}): {details}")]
    CommandFailed { command: String, details: String },

    #[error("[PST-2002] disk listing layout violation: expected exactly one root-mount line, found {matches}")]
    DiskLayout { matches: usize },

    #[error("[PST-3001] display device failure during {stage}: {details}")]
    Device {
        stage: &'static str,
        details: String,
    },

    #[error("[PST-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[PST-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl PstError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "PST-1001",
            Self::ConfigParse { .. } => "PST-1002",
            Self::UnsupportedPlatform { .. } => "PST-1101",
            Self::CommandFailed { .. } => "PST-2001",
            Self::DiskLayout { .. } => "PST-2002",
            Self::Device { .. } => "PST-3001",
            Self::Io { .. } => "PST-3002",
            Self::Runtime { .. } => "PST-3900",
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for PstError {
    fn from(value: serde_json::Error) -> Self {
        Self::ConfigParse {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for PstError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> Vec<PstError> {
        vec![
            PstError::InvalidConfig {
                details: String::new(),
            },
            PstError::ConfigParse {
                context: "",
                details: String::new(),
            },
            PstError::UnsupportedPlatform {
                details: String::new(),
            },
            PstError::CommandFailed {
                command: String::new(),
                details: String::new(),
            },
            PstError::DiskLayout { matches: 0 },
            PstError::Device {
                stage: "",
                details: String::new(),
            },
            PstError::Io {
                path: PathBuf::new(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "test"),
            },
            PstError::Runtime {
                details: String::new(),
            },
        ]
    }

    #[test]
    fn error_codes_are_unique() {
        let codes: Vec<&str> = sample_errors().iter().map(PstError::code).collect();
        let unique: std::collections::HashSet<&&str> = codes.iter().collect();
        assert_eq!(
            codes.len(),
            unique.len(),
            "error codes must be unique: {codes:?}"
        );
    }

    #[test]
    fn error_codes_have_pst_prefix() {
        for err in &sample_errors() {
            assert!(
                err.code().starts_with("PST-"),
                "code {} must start with PST-",
                err.code()
            );
        }
    }

    #[test]
    fn error_display_includes_code() {
        let err = PstError::CommandFailed {
            command: "free".to_string(),
            details: "exit status 1".to_string(),
        };
        let msg = err.to_string();
        assert!(
            msg.contains("PST-2001"),
            "display should contain error code: {msg}"
        );
        assert!(
            msg.contains("free"),
            "display should contain failing command: {msg}"
        );
    }

    #[test]
    fn disk_layout_reports_match_count() {
        let err = PstError::DiskLayout { matches: 2 };
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn io_convenience_constructor() {
        let err = PstError::io(
            "/tmp/status.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.code(), "PST-3002");
        assert!(err.to_string().contains("/tmp/status.png"));
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= invalid").unwrap_err();
        let err: PstError = toml_err.into();
        assert_eq!(err.code(), "PST-1002");
    }
}
