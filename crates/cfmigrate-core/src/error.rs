//! Error types for style configuration migration.

use crate::diagnostic::{DiagnosticLog, Transition};
use crate::version::Version;
use thiserror::Error;

/// The error type shared by every cfmigrate crate.
///
/// Only fatal conditions live here. Lossy but recoverable situations (a value
/// with no equivalent at an older version, a removed field) are reported as
/// Warning entries in the [`DiagnosticLog`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MigrationError {
    /// Neither the style hint nor the requested preset is accepted at a version
    #[error(
        "No usable style for version {version}: {} (accepted: {})",
        describe_candidates(candidates),
        accepted.join(", ")
    )]
    UnknownPreset {
        version: Version,
        candidates: Vec<String>,
        accepted: Vec<String>,
    },

    /// An enumerated value in use has no successor at the next version
    #[error("{transition}: {field} uses value {value} which was removed")]
    RemovedEnumValueInUse {
        transition: Transition,
        field: String,
        value: String,
        /// Everything logged up to and including the failing step
        diagnostics: DiagnosticLog,
    },

    /// The codec rejected the input text
    #[error("Failed to decode configuration for version {version}: {message}")]
    DecodeFailure { version: Version, message: String },

    /// The codec could not render a record
    #[error("Failed to encode configuration for version {version}: {message}")]
    EncodeFailure { version: Version, message: String },

    /// A version label that does not parse or is not part of the catalog
    #[error("Unknown version: {0}")]
    UnknownVersion(String),

    /// The version exists but cannot take part in the requested operation
    #[error("Version {version} is not supported here: {reason}")]
    UnsupportedVersion { version: Version, reason: String },

    /// A step table does not cover the fields of its two versions
    #[error("Incomplete migration step {transition}: {}", problems.join("; "))]
    SchemaCompletenessViolation {
        transition: Transition,
        problems: Vec<String>,
    },

    /// Malformed catalog data
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_candidates(candidates: &[String]) -> String {
    if candidates.is_empty() {
        "no style given".to_string()
    } else {
        candidates
            .iter()
            .map(|c| format!("'{}'", c))
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

impl MigrationError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnknownPreset error
    pub fn unknown_preset(
        version: Version,
        candidates: Vec<String>,
        accepted: &[String],
    ) -> Self {
        Self::UnknownPreset {
            version,
            candidates,
            accepted: accepted.to_vec(),
        }
    }

    /// Creates a RemovedEnumValueInUse error
    pub fn removed_enum_value_in_use(
        transition: Transition,
        field: impl Into<String>,
        value: impl Into<String>,
        diagnostics: DiagnosticLog,
    ) -> Self {
        Self::RemovedEnumValueInUse {
            transition,
            field: field.into(),
            value: value.into(),
            diagnostics,
        }
    }

    /// Creates a DecodeFailure error
    pub fn decode_failure(version: Version, message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            version,
            message: message.into(),
        }
    }

    /// Creates an EncodeFailure error
    pub fn encode_failure(version: Version, message: impl Into<String>) -> Self {
        Self::EncodeFailure {
            version,
            message: message.into(),
        }
    }

    /// Creates an UnsupportedVersion error
    pub fn unsupported_version(version: Version, reason: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            version,
            reason: reason.into(),
        }
    }

    /// Creates a Catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an UnknownPreset error
    pub fn is_unknown_preset(&self) -> bool {
        matches!(self, Self::UnknownPreset { .. })
    }

    /// Check if this is a RemovedEnumValueInUse error
    pub fn is_removed_enum_value(&self) -> bool {
        matches!(self, Self::RemovedEnumValueInUse { .. })
    }

    /// Check if this is a DecodeFailure error
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::DecodeFailure { .. })
    }

    /// Diagnostics attached to the error, if any.
    pub fn diagnostics(&self) -> Option<&DiagnosticLog> {
        match self {
            Self::RemovedEnumValueInUse { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<toml::de::Error> for MigrationError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, MigrationError>`.
pub type Result<T> = std::result::Result<T, MigrationError>;
