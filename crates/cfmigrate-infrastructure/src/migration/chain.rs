//! Migration chain for walking records across version ranges.
//!
//! This module implements a simple, linear chain where each version
//! migrates through all intermediate versions, in either direction.
//! There is exactly one path between any two versions.

use super::resolver::StyleResolver;
use super::traits::StepMigration;
use cfmigrate_core::{
    DiagnosticLog, Direction, MigrationError, Record, Result, SchemaCatalog, Transition, Version,
};
use std::sync::Arc;

/// A linear chain of adjacent steps.
///
/// Steps are stored oldest first and must form a continuous chain:
/// 3.3 → 3.4 → 3.5 → ...
///
/// When adding steps via `register()`, the chain validates that each new
/// step's `from_version()` matches the previous step's `to_version()`.
///
/// # Example
///
/// ```ignore
/// let mut chain = MigrationChain::new();
/// chain.register(Arc::new(v3_4::step()));  // 3.3 → 3.4
/// chain.register(Arc::new(v3_5::step()));  // 3.4 → 3.5
///
/// // Walks both steps, downgrading: 3.5 → 3.4 → 3.3
/// let (record, log) = chain.migrate(catalog, v3_5, v3_3, record, None, "llvm")?;
/// ```
#[derive(Debug, Default, Clone)]
pub struct MigrationChain {
    /// Steps in order, forming a linear chain.
    steps: Vec<Arc<dyn StepMigration>>,
}

impl MigrationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a single step, validating chain continuity.
    ///
    /// # Panics
    ///
    /// Panics if the step doesn't connect to the existing chain, or does not
    /// move forward.
    pub fn register(&mut self, step: Arc<dyn StepMigration>) {
        assert!(
            step.from_version() < step.to_version(),
            "Step must go from an older to a newer version, got {}",
            step.transition()
        );
        if let Some(last) = self.steps.last() {
            assert_eq!(
                last.to_version(),
                step.from_version(),
                "Migration chain broken: expected step from {} (previous to_version), but got step from {}. \
                 Description: '{}' (previous) -> '{}' (current)",
                last.to_version(),
                step.from_version(),
                last.description(),
                step.description()
            );
        }

        self.steps.push(step);
    }

    /// Registers multiple steps at once, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if any step breaks the chain continuity.
    pub fn register_all(&mut self, steps: Vec<Arc<dyn StepMigration>>) {
        for step in steps {
            self.register(step);
        }
    }

    pub fn steps(&self) -> &[Arc<dyn StepMigration>] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Oldest version the chain reaches, if any.
    pub fn start_version(&self) -> Option<Version> {
        self.steps.first().map(|s| s.from_version())
    }

    /// Newest version the chain reaches, if any.
    pub fn end_version(&self) -> Option<Version> {
        self.steps.last().map(|s| s.to_version())
    }

    /// Whether `version` is one of the versions the chain connects.
    pub fn covers(&self, version: Version) -> bool {
        self.steps.iter().any(|s| s.can_migrate(version))
    }

    /// The hops between `start` and `end`, oriented in walking direction.
    pub fn path(&self, start: Version, end: Version) -> Result<Vec<Transition>> {
        Ok(self
            .walk(start, end)?
            .into_iter()
            .map(|(_, transition)| transition)
            .collect())
    }

    fn walk(&self, start: Version, end: Version) -> Result<Vec<(&Arc<dyn StepMigration>, Transition)>> {
        if start == end {
            return Ok(Vec::new());
        }
        for version in [start, end] {
            if !self.covers(version) {
                return Err(self.not_covered(version));
            }
        }

        if start < end {
            Ok(self
                .steps
                .iter()
                .filter(|s| s.from_version() >= start && s.to_version() <= end)
                .map(|s| (s, s.transition()))
                .collect())
        } else {
            Ok(self
                .steps
                .iter()
                .rev()
                .filter(|s| s.to_version() <= start && s.from_version() >= end)
                .map(|s| (s, s.transition().reversed()))
                .collect())
        }
    }

    fn not_covered(&self, version: Version) -> MigrationError {
        match (self.start_version(), self.end_version()) {
            (Some(first), Some(last)) => MigrationError::unsupported_version(
                version,
                format!("the migration chain covers {} to {}", first, last),
            ),
            _ => MigrationError::unsupported_version(version, "the migration chain is empty"),
        }
    }

    /// Carries `record` from `start` to `end`.
    ///
    /// Each hop is seeded from the preset the [`StyleResolver`] picks for
    /// the hop's target version, preferring `style_hint` over `preset`.
    /// Every hop's preset is resolved before the first one runs.
    ///
    /// When `start == end` the record is canonicalized against the resolved
    /// preset instead.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole walk; no partial record is returned.
    pub fn migrate(
        &self,
        catalog: &dyn SchemaCatalog,
        start: Version,
        end: Version,
        record: Record,
        style_hint: Option<&str>,
        preset: &str,
    ) -> Result<(Record, DiagnosticLog)> {
        if record.version() != start {
            return Err(MigrationError::unsupported_version(
                record.version(),
                format!("record was expected at version {}", start),
            ));
        }

        let resolver = StyleResolver::new(catalog);
        let mut log = DiagnosticLog::new();

        if start == end {
            catalog.require_schema(start)?;
            let style = resolver.resolve(start, style_hint, preset)?;
            tracing::debug!(
                "Record is already at version {}, canonicalizing with {}",
                start,
                style
            );
            return Ok((canonicalize(catalog, &record, style)?, log));
        }

        let hops = self.walk(start, end)?;
        let targets: Vec<Version> = hops.iter().map(|(_, t)| t.to).collect();
        let styles = resolver.resolve_all(&targets, style_hint, preset)?;

        tracing::info!(
            "Starting migration from {} to {} ({} steps)",
            start,
            end,
            hops.len()
        );

        let mut record = record;
        for (i, ((step, transition), style)) in hops.iter().zip(styles).enumerate() {
            tracing::info!(
                "Migration step {}/{}: {} ({})",
                i + 1,
                hops.len(),
                transition,
                step.description()
            );

            record = match transition.direction() {
                Direction::Upgrade => step.upgrade(catalog, record, style, &mut log)?,
                Direction::Downgrade => step.downgrade(catalog, record, style, &mut log)?,
            };
        }

        tracing::info!(
            "Migration completed successfully: {} -> {} ({} diagnostics)",
            start,
            end,
            log.len()
        );

        Ok((record, log))
    }
}

/// Re-seeds `record` from `preset` at its own version and lays every field
/// the schema accepts back on top.
///
/// Unknown fields and ill-typed values are dropped; missing fields take the
/// preset's value.
pub fn canonicalize(catalog: &dyn SchemaCatalog, record: &Record, preset: &str) -> Result<Record> {
    let version = record.version();
    let schema = catalog.require_schema(version)?;
    let mut canonical = catalog
        .preset_defaults(version, preset, record.language())
        .ok_or_else(|| {
            MigrationError::unknown_preset(
                version,
                vec![preset.to_string()],
                catalog.accepted_preset_names(version),
            )
        })?;

    for (name, value) in record.iter() {
        if schema.field(name).is_some_and(|kind| kind.accepts(value)) {
            canonical.set(name, value.clone());
        }
    }
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::migration::steps::builtin_steps;
    use crate::migration::traits::Migration;
    use cfmigrate_core::{FieldValue, Severity};

    // Mock step for testing: re-tags the record and counts hops
    #[derive(Debug)]
    struct MockStep {
        from: Version,
        to: Version,
        desc: &'static str,
    }

    impl MockStep {
        fn carry(record: &Record, version: Version, hops: &str) -> Record {
            let mut next = Record::new(version);
            for (name, value) in record.iter() {
                next.set(name, value.clone());
            }
            let trail = match record.get("Trail") {
                Some(FieldValue::Str(trail)) => format!("{} {}", trail, hops),
                _ => hops.to_string(),
            };
            next.set("Trail", FieldValue::Str(trail));
            next
        }
    }

    impl Migration for MockStep {
        fn from_version(&self) -> Version {
            self.from
        }

        fn to_version(&self) -> Version {
            self.to
        }

        fn description(&self) -> &str {
            self.desc
        }
    }

    impl StepMigration for MockStep {
        fn upgrade(
            &self,
            _catalog: &dyn SchemaCatalog,
            record: Record,
            preset: &str,
            _log: &mut DiagnosticLog,
        ) -> Result<Record> {
            Ok(Self::carry(&record, self.to, &format!("up:{}@{}", preset, self.to)))
        }

        fn downgrade(
            &self,
            _catalog: &dyn SchemaCatalog,
            record: Record,
            preset: &str,
            _log: &mut DiagnosticLog,
        ) -> Result<Record> {
            Ok(Self::carry(&record, self.from, &format!("down:{}@{}", preset, self.from)))
        }
    }

    fn v(major: u16, minor: u16) -> Version {
        Version::new(major, minor)
    }

    fn mock(from: Version, to: Version, desc: &'static str) -> Arc<dyn StepMigration> {
        Arc::new(MockStep { from, to, desc })
    }

    fn mock_chain() -> MigrationChain {
        let mut chain = MigrationChain::new();
        chain.register_all(vec![
            mock(v(3, 4), v(3, 5), "first"),
            mock(v(3, 5), v(3, 6), "second"),
        ]);
        chain
    }

    fn builtin_chain() -> MigrationChain {
        let mut chain = MigrationChain::new();
        for step in builtin_steps() {
            chain.register(Arc::new(step));
        }
        chain
    }

    #[test]
    fn test_empty_chain() {
        let chain = MigrationChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert_eq!(chain.start_version(), None);
        assert!(chain.path(v(3, 4), v(3, 5)).unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_register_single_step() {
        let mut chain = MigrationChain::new();
        chain.register(mock(v(3, 4), v(3, 5), "Test step"));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.start_version(), Some(v(3, 4)));
        assert_eq!(chain.end_version(), Some(v(3, 5)));
    }

    #[test]
    #[should_panic(expected = "Migration chain broken")]
    fn test_register_broken_chain() {
        let mut chain = MigrationChain::new();
        chain.register(mock(v(3, 4), v(3, 5), "First"));
        // 3.5 != 3.6
        chain.register(mock(v(3, 6), v(3, 7), "Second (broken)"));
    }

    #[test]
    #[should_panic(expected = "older to a newer")]
    fn test_register_backwards_step() {
        let mut chain = MigrationChain::new();
        chain.register(mock(v(3, 5), v(3, 4), "Backwards"));
    }

    #[test]
    fn test_paths_in_both_directions() {
        let chain = mock_chain();
        let up = chain.path(v(3, 4), v(3, 6)).unwrap();
        assert_eq!(
            up,
            vec![Transition::new(v(3, 4), v(3, 5)), Transition::new(v(3, 5), v(3, 6))]
        );
        let down = chain.path(v(3, 6), v(3, 4)).unwrap();
        assert_eq!(
            down,
            vec![Transition::new(v(3, 6), v(3, 5)), Transition::new(v(3, 5), v(3, 4))]
        );
        assert!(chain.path(v(3, 5), v(3, 5)).unwrap().is_empty());
        assert!(chain.path(v(3, 4), v(3, 7)).is_err());
    }

    #[test]
    fn test_migrate_through_all_steps() {
        let catalog = builtin_catalog().unwrap();
        let chain = mock_chain();
        let (record, _) = chain
            .migrate(catalog.as_ref(), v(3, 4), v(3, 6), Record::new(v(3, 4)), None, "LLVM")
            .unwrap();
        assert_eq!(record.version(), v(3, 6));
        assert_eq!(
            record.get("Trail"),
            Some(&FieldValue::str("up:llvm@3.5 up:llvm@3.6"))
        );

        let (record, _) = chain
            .migrate(catalog.as_ref(), v(3, 6), v(3, 4), record, Some("none"), "llvm")
            .unwrap();
        // "none" is not accepted at 3.4, so that hop falls back
        assert_eq!(
            record.get("Trail"),
            Some(&FieldValue::str("up:llvm@3.5 up:llvm@3.6 down:none@3.5 down:llvm@3.4"))
        );
    }

    #[test]
    fn test_unusable_style_fails_before_any_step() {
        let catalog = builtin_catalog().unwrap();
        let chain = mock_chain();
        let err = chain
            .migrate(catalog.as_ref(), v(3, 6), v(3, 4), Record::new(v(3, 6)), None, "gnu")
            .unwrap_err();
        match err {
            MigrationError::UnknownPreset { version, .. } => assert_eq!(version, v(3, 4)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_record_must_be_at_start_version() {
        let catalog = builtin_catalog().unwrap();
        let err = mock_chain()
            .migrate(catalog.as_ref(), v(3, 5), v(3, 6), Record::new(v(3, 4)), None, "llvm")
            .unwrap_err();
        assert!(matches!(err, MigrationError::UnsupportedVersion { .. }));
    }

    #[test]
    fn test_same_version_canonicalizes() {
        let catalog = builtin_catalog().unwrap();
        let chain = builtin_chain();
        let record = Record::new(v(3, 5))
            .with("ColumnLimit", 100)
            .with("NotAField", true)
            .with("UseTab", true);

        let (canonical, log) = chain
            .migrate(catalog.as_ref(), v(3, 5), v(3, 5), record, Some("google"), "llvm")
            .unwrap();

        let google = catalog.preset_defaults(v(3, 5), "google", None).unwrap();
        assert!(log.is_empty());
        assert_eq!(canonical.len(), google.len());
        assert_eq!(canonical.get("ColumnLimit"), Some(&FieldValue::Int(100)));
        assert!(!canonical.contains("NotAField"));
        // a bare boolean is not a UseTab tag
        assert_eq!(canonical.get("UseTab"), google.get("UseTab"));

        let (again, _) = chain
            .migrate(catalog.as_ref(), v(3, 5), v(3, 5), canonical.clone(), Some("google"), "llvm")
            .unwrap();
        assert_eq!(again, canonical);
    }

    #[test]
    fn test_builtin_chain_spans_catalog() {
        let catalog = builtin_catalog().unwrap();
        let chain = builtin_chain();
        assert_eq!(chain.start_version(), catalog.versions().first().copied());
        assert_eq!(chain.end_version(), catalog.versions().last().copied());

        let record = catalog.preset_defaults(v(3, 3), "mozilla", None).unwrap();
        let (record, log) = chain
            .migrate(catalog.as_ref(), v(3, 3), v(14, 0), record, None, "mozilla")
            .unwrap();
        assert_eq!(record.version(), v(14, 0));
        assert_eq!(log.count(Severity::Error), 0);
        assert_eq!(log.count(Severity::Warning), 0);
    }
}
