//! Schema version identifiers.
//!
//! A [`Version`] is a `major.minor` pair. Ordering follows the numeric
//! components, which is also the order of the catalog. Patch releases are
//! accepted when parsing (`"3.4.2"`) but carry no meaning for migration.

use crate::error::{MigrationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A totally ordered schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u16,
    minor: u16,
}

impl Version {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u16 {
        self.minor
    }

    /// Enum-style label, e.g. `V3_5` or `V19` for a `.0` release after 3.x.
    pub fn label(&self) -> String {
        if self.major > 3 && self.minor == 0 {
            format!("V{}", self.major)
        } else {
            format!("V{}_{}", self.major, self.minor)
        }
    }

    /// Parses `3.5`, `3.5.2`, `V3_5`, `v19` or `19`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let unprefixed = trimmed
            .strip_prefix('V')
            .or_else(|| trimmed.strip_prefix('v'))
            .unwrap_or(trimmed);
        let normalized = unprefixed.replace('_', ".");
        let unknown = || MigrationError::UnknownVersion(input.to_string());

        match normalized.split('.').count() {
            1 => {
                let major = normalized.parse::<u16>().map_err(|_| unknown())?;
                Ok(Self::new(major, 0))
            }
            2 => {
                let (major, minor) = normalized.split_once('.').ok_or_else(unknown)?;
                Ok(Self::new(
                    major.parse().map_err(|_| unknown())?,
                    minor.parse().map_err(|_| unknown())?,
                ))
            }
            3 => {
                let release = semver::Version::parse(&normalized).map_err(|_| unknown())?;
                let major = u16::try_from(release.major).map_err(|_| unknown())?;
                let minor = u16::try_from(release.minor).map_err(|_| unknown())?;
                Ok(Self::new(major, minor))
            }
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = MigrationError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
