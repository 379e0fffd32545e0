//! Picks the preset that seeds each hop of a migration.

use cfmigrate_core::{MigrationError, Result, SchemaCatalog, Version};

/// Matches a style hint and a requested preset against the names a version
/// accepts, ignoring case.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    catalog: &'a dyn SchemaCatalog,
}

impl<'a> StyleResolver<'a> {
    pub fn new(catalog: &'a dyn SchemaCatalog) -> Self {
        Self { catalog }
    }

    /// The accepted spelling of the first usable candidate at `version`.
    ///
    /// `hint` is tried before `preset`. Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// `UnknownPreset` naming both candidates and the accepted names when
    /// neither matches.
    pub fn resolve(&self, version: Version, hint: Option<&str>, preset: &str) -> Result<&'a str> {
        let candidates: Vec<&str> = hint
            .into_iter()
            .chain(std::iter::once(preset))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();

        for candidate in &candidates {
            if let Some(name) = self.catalog.canonical_preset_name(version, candidate) {
                tracing::debug!("Style for {}: {} (from '{}')", version, name, candidate);
                return Ok(name);
            }
        }

        Err(MigrationError::unknown_preset(
            version,
            candidates.iter().map(|c| c.to_string()).collect(),
            self.catalog.accepted_preset_names(version),
        ))
    }

    /// Resolves every version of `versions` up front, so an unusable name
    /// fails the whole request before any record is touched.
    pub fn resolve_all(
        &self,
        versions: &[Version],
        hint: Option<&str>,
        preset: &str,
    ) -> Result<Vec<&'a str>> {
        versions
            .iter()
            .map(|version| self.resolve(*version, hint, preset))
            .collect()
    }

    /// Preset names accepted at every version between `start` and `end`
    /// inclusive, in the order `end` lists them.
    pub fn names_for_range(&self, start: Version, end: Version) -> Vec<&'a str> {
        let (low, high) = if start <= end { (start, end) } else { (end, start) };
        let range: Vec<Version> = self
            .catalog
            .versions()
            .iter()
            .copied()
            .filter(|v| *v >= low && *v <= high)
            .collect();

        self.catalog
            .accepted_preset_names(end)
            .iter()
            .filter(|name| {
                range
                    .iter()
                    .all(|v| self.catalog.canonical_preset_name(*v, name).is_some())
            })
            .map(|name| name.as_str())
            .collect()
    }
}
