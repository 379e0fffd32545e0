//! Entry points for migrating style configurations.
//!
//! `MigrationManager` ties the catalog, the codec and the migration chain
//! together. It is immutable once built and can be shared between threads;
//! every call gets its own diagnostic log.

use super::chain::MigrationChain;
use super::compat::CompatibilityDetector;
use super::resolver::StyleResolver;
use cfmigrate_core::{
    DiagnosticLog, MigrationError, Record, Result, SchemaCatalog, StyleCodec, Version,
};
use std::sync::Arc;

/// Result of a text-to-text migration.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    /// The encoded configuration at the end version
    pub text: String,
    /// The migrated record the text was encoded from
    pub record: Record,
    /// Everything noted along the way
    pub diagnostics: DiagnosticLog,
    /// The preset the output is based on
    pub style: String,
}

/// Central coordinator for style migrations.
///
/// # Example
///
/// ```ignore
/// let manager = MigrationManager::builder()
///     .with_catalog(catalog.clone())
///     .with_codec(Arc::new(ClangFormatYamlCodec::new(catalog)))
///     .with_chain(chain)
///     .build()?;
///
/// let outcome = manager.migrate_to(v3_4, v3_8, &text, "llvm", false)?;
/// ```
#[derive(Debug, Clone)]
pub struct MigrationManager {
    catalog: Arc<dyn SchemaCatalog>,
    codec: Arc<dyn StyleCodec>,
    chain: MigrationChain,
}

impl MigrationManager {
    /// Creates a new builder for constructing a `MigrationManager`.
    pub fn builder() -> MigrationManagerBuilder {
        MigrationManagerBuilder::new()
    }

    pub fn catalog(&self) -> &dyn SchemaCatalog {
        self.catalog.as_ref()
    }

    pub fn codec(&self) -> &dyn StyleCodec {
        self.codec.as_ref()
    }

    pub fn chain(&self) -> &MigrationChain {
        &self.chain
    }

    /// The catalog's versions, oldest first.
    pub fn versions(&self) -> &[Version] {
        self.catalog.versions()
    }

    /// Decodes `text` at `start`, migrates it to `end` and encodes the result.
    ///
    /// The document's own `BasedOnStyle` is preferred over `preset` at every
    /// hop. With `skip_defaulted_fields` only fields that differ from the
    /// output preset are written.
    ///
    /// # Errors
    ///
    /// `DecodeFailure` before anything is migrated, then any fatal error of
    /// the chain; no partial output is produced.
    pub fn migrate_to(
        &self,
        start: Version,
        end: Version,
        text: &str,
        preset: &str,
        skip_defaulted_fields: bool,
    ) -> Result<MigrationOutcome> {
        self.require_version(start)?;
        self.require_version(end)?;

        let hint = self.codec.style_hint(start, text);
        let record = self.codec.decode_with_fallback(start, text, Some(preset))?;
        let (record, diagnostics) = self.migrate_record(start, end, record, hint.as_deref(), preset)?;

        let style = StyleResolver::new(self.catalog.as_ref())
            .resolve(end, hint.as_deref(), preset)?
            .to_string();
        let text = self.codec.encode(&record, &style, skip_defaulted_fields)?;

        Ok(MigrationOutcome {
            text,
            record,
            diagnostics,
            style,
        })
    }

    /// Record-level entry point; see [`MigrationChain::migrate`].
    pub fn migrate_record(
        &self,
        start: Version,
        end: Version,
        record: Record,
        style_hint: Option<&str>,
        preset: &str,
    ) -> Result<(Record, DiagnosticLog)> {
        self.chain
            .migrate(self.catalog.as_ref(), start, end, record, style_hint, preset)
    }

    /// Versions that could have produced `text`, oldest first.
    pub fn compatible_versions(&self, text: &str) -> Vec<Version> {
        CompatibilityDetector::new(self.catalog.as_ref(), self.codec.as_ref())
            .compatible_versions(text)
    }

    /// Presets accepted at `version`.
    pub fn style_names(&self, version: Version) -> Result<&[String]> {
        self.require_version(version)?;
        Ok(self.catalog.accepted_preset_names(version))
    }

    /// Presets accepted at every version from `start` to `end` inclusive.
    pub fn style_names_range(&self, start: Version, end: Version) -> Result<Vec<&str>> {
        self.require_version(start)?;
        self.require_version(end)?;
        Ok(StyleResolver::new(self.catalog.as_ref()).names_for_range(start, end))
    }

    fn require_version(&self, version: Version) -> Result<()> {
        if self.catalog.contains(version) {
            Ok(())
        } else {
            Err(MigrationError::UnknownVersion(version.to_string()))
        }
    }

    /// Checks every step of the chain against the catalog.
    pub fn validate(&self) -> Result<()> {
        if self.chain.is_empty() {
            tracing::warn!("Migration chain is empty");
            return Ok(());
        }

        for step in self.chain.steps() {
            step.validate(self.catalog.as_ref())?;
        }

        let versions = self.catalog.versions();
        if self.chain.start_version() != versions.first().copied()
            || self.chain.end_version() != versions.last().copied()
        {
            tracing::warn!(
                "Migration chain covers {:?} to {:?}, catalog has {} versions",
                self.chain.start_version(),
                self.chain.end_version(),
                versions.len()
            );
        } else {
            tracing::debug!("Migration chain: {} steps registered", self.chain.len());
        }
        Ok(())
    }
}

/// Builder for constructing a `MigrationManager`.
///
/// All three parts must be provided. Missing parts cause errors in
/// `build()`.
#[derive(Default)]
pub struct MigrationManagerBuilder {
    catalog: Option<Arc<dyn SchemaCatalog>>,
    codec: Option<Arc<dyn StyleCodec>>,
    chain: Option<MigrationChain>,
}

impl MigrationManagerBuilder {
    /// Creates a new builder with all parts unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn SchemaCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_codec(mut self, codec: Arc<dyn StyleCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn with_chain(mut self, chain: MigrationChain) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Builds the `MigrationManager`, ensuring all parts are set.
    ///
    /// # Errors
    ///
    /// Returns an error if any part is missing, or if a step of the chain
    /// does not cover its two versions of the catalog.
    pub fn build(self) -> Result<MigrationManager> {
        let catalog = self
            .catalog
            .ok_or_else(|| MigrationError::config("Schema catalog not set"))?;
        let codec = self
            .codec
            .ok_or_else(|| MigrationError::config("Style codec not set"))?;
        let chain = self
            .chain
            .ok_or_else(|| MigrationError::config("Migration chain not set"))?;

        let manager = MigrationManager {
            catalog,
            codec,
            chain,
        };

        manager.validate()?;

        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::codec::ClangFormatYamlCodec;
    use crate::migration::build_migration_manager;
    use crate::migration::step::StepMigrator;
    use cfmigrate_core::{FieldValue, Severity};

    fn v(major: u16, minor: u16) -> Version {
        Version::new(major, minor)
    }

    #[test]
    fn test_builder_requires_all_parts() {
        let catalog = builtin_catalog().unwrap();
        let result = MigrationManagerBuilder::new()
            .with_catalog(catalog.clone())
            .with_chain(MigrationChain::new())
            .build();

        let err = result.unwrap_err().to_string();
        assert!(err.contains("codec"), "Error should mention the missing codec");
    }

    #[test]
    fn test_builder_accepts_empty_chain() {
        let catalog = builtin_catalog().unwrap();
        let manager = MigrationManagerBuilder::new()
            .with_catalog(catalog.clone())
            .with_codec(Arc::new(ClangFormatYamlCodec::new(catalog)))
            .with_chain(MigrationChain::new())
            .build()
            .unwrap();
        assert!(manager.chain().is_empty());
    }

    #[test]
    fn test_builder_rejects_incomplete_step() {
        let catalog = builtin_catalog().unwrap();
        let mut chain = MigrationChain::new();
        chain.register(Arc::new(StepMigrator::new(v(3, 3), v(3, 4), "empty table")));

        let err = MigrationManagerBuilder::new()
            .with_catalog(catalog.clone())
            .with_codec(Arc::new(ClangFormatYamlCodec::new(catalog)))
            .with_chain(chain)
            .build()
            .unwrap_err();
        assert!(matches!(err, MigrationError::SchemaCompletenessViolation { .. }));
    }

    #[test]
    fn test_migrate_to_upgrades_text() {
        let manager = build_migration_manager().unwrap();
        let outcome = manager
            .migrate_to(
                v(3, 4),
                v(3, 5),
                "BasedOnStyle: Google\nPointerBindsToType: false\n",
                "llvm",
                true,
            )
            .unwrap();

        assert_eq!(outcome.style, "google");
        assert_eq!(
            outcome.record.get("PointerAlignment"),
            Some(&FieldValue::tag("Right"))
        );
        assert!(outcome.text.starts_with("---\n"));
        assert!(outcome.text.contains("BasedOnStyle: google"));
        assert!(outcome.text.contains("PointerAlignment: Right"));
        assert!(!outcome.text.contains("PointerBindsToType"));
        assert_eq!(outcome.diagnostics.count(Severity::Error), 0);
    }

    #[test]
    fn test_migrate_to_rejects_bad_input_first() {
        let manager = build_migration_manager().unwrap();
        let err = manager
            .migrate_to(v(3, 4), v(3, 8), "IndentWidth: wide\n", "llvm", false)
            .unwrap_err();
        assert!(err.is_decode_failure());

        let err = manager
            .migrate_to(v(3, 4), Version::new(99, 0), "", "llvm", false)
            .unwrap_err();
        assert!(matches!(err, MigrationError::UnknownVersion(_)));
    }

    #[test]
    fn test_style_names() {
        let manager = build_migration_manager().unwrap();
        assert_eq!(manager.style_names(v(3, 4)).unwrap().len(), 5);
        assert_eq!(
            manager.style_names_range(v(3, 5), v(3, 3)).unwrap(),
            vec!["chromium", "google", "llvm", "mozilla"]
        );
        assert!(manager.style_names(v(2, 9)).is_err());
        assert_eq!(manager.versions().len(), 18);
    }
}
