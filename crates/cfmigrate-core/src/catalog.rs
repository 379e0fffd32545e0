//! The schema catalog contract.
//!
//! A catalog owns the ordered list of known versions, each version's field
//! vocabulary, and its named presets. Implementations are immutable lookup
//! tables shared by reference between concurrent migration calls.

use crate::error::{MigrationError, Result};
use crate::record::Record;
use crate::schema::Schema;
use crate::version::Version;
use std::fmt::Debug;

pub trait SchemaCatalog: Send + Sync + Debug {
    /// All versions, ascending. Adjacent entries are migration neighbours.
    fn versions(&self) -> &[Version];

    fn schema(&self, version: Version) -> Option<&Schema>;

    /// The default-valued record of a preset, optionally scoped to a
    /// sub-language. Preset names match case-insensitively.
    fn preset_defaults(
        &self,
        version: Version,
        preset: &str,
        language: Option<&str>,
    ) -> Option<Record>;

    /// Preset names accepted at `version`, in catalog order. Empty for an
    /// unknown version.
    fn accepted_preset_names(&self, version: Version) -> &[String];

    /// The preset a decoder falls back to when nothing else is named.
    fn default_preset(&self, version: Version) -> Option<&str>;

    fn contains(&self, version: Version) -> bool {
        self.versions().contains(&version)
    }

    fn successor(&self, version: Version) -> Option<Version> {
        let versions = self.versions();
        let index = versions.iter().position(|v| *v == version)?;
        versions.get(index + 1).copied()
    }

    /// The catalog's own spelling of a preset name, matched case-insensitively.
    fn canonical_preset_name(&self, version: Version, name: &str) -> Option<&str> {
        self.accepted_preset_names(version)
            .iter()
            .find(|accepted| accepted.eq_ignore_ascii_case(name))
            .map(|s| s.as_str())
    }

    fn require_schema(&self, version: Version) -> Result<&Schema> {
        self.schema(version)
            .ok_or_else(|| MigrationError::UnknownVersion(version.to_string()))
    }
}
