//! Core traits for the migration chain.
//!
//! A step connects two adjacent catalog versions and can be walked in both
//! directions. The chain only relies on these traits, so bespoke steps can
//! sit next to the table-driven [`StepMigrator`](super::step::StepMigrator).

use cfmigrate_core::{DiagnosticLog, Record, Result, SchemaCatalog, Transition, Version};

/// Base trait for all migration steps.
///
/// Provides version information and metadata about a step.
pub trait Migration: Send + Sync {
    /// The older of the two versions.
    fn from_version(&self) -> Version;

    /// The newer of the two versions.
    fn to_version(&self) -> Version;

    /// Checks if this step can take a record of the given version.
    fn can_migrate(&self, version: Version) -> bool {
        version == self.from_version() || version == self.to_version()
    }

    /// The hop in upgrade orientation.
    fn transition(&self) -> Transition {
        Transition::new(self.from_version(), self.to_version())
    }

    /// Returns a human-readable description of this step.
    ///
    /// Used for logging and debugging purposes.
    fn description(&self) -> &str;
}

/// A bidirectional mapping between two adjacent versions.
pub trait StepMigration: Migration + std::fmt::Debug {
    /// Carries a `from_version` record to `to_version`, seeding the result
    /// from `preset` resolved at `to_version`.
    ///
    /// # Errors
    ///
    /// Fails with `RemovedEnumValueInUse` when a value in use has no
    /// successor; no partial record is returned.
    fn upgrade(
        &self,
        catalog: &dyn SchemaCatalog,
        record: Record,
        preset: &str,
        log: &mut DiagnosticLog,
    ) -> Result<Record>;

    /// Carries a `to_version` record back to `from_version`, seeding the
    /// result from `preset` resolved at `from_version`. Lossy cases are
    /// logged as warnings, never raised.
    fn downgrade(
        &self,
        catalog: &dyn SchemaCatalog,
        record: Record,
        preset: &str,
        log: &mut DiagnosticLog,
    ) -> Result<Record>;

    /// Checks the step against the catalog it will run with.
    fn validate(&self, _catalog: &dyn SchemaCatalog) -> Result<()> {
        Ok(())
    }
}
