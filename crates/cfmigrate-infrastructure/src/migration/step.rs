//! Table-driven migration step between two adjacent versions.

use super::traits::{Migration, StepMigration};
use super::transform::{FieldTransform, RemovedValue, StepContext};
use cfmigrate_core::{
    DiagnosticLog, MigrationError, Record, Result, SchemaCatalog, Severity, Transition, Version,
};
use std::collections::BTreeMap;

/// An ordered list of [`FieldTransform`]s covering every field of two
/// adjacent versions.
#[derive(Debug, Clone)]
pub struct StepMigrator {
    from: Version,
    to: Version,
    description: String,
    transforms: Vec<FieldTransform>,
}

impl StepMigrator {
    pub fn new(from: Version, to: Version, description: impl Into<String>) -> Self {
        Self {
            from,
            to,
            description: description.into(),
            transforms: Vec::new(),
        }
    }

    pub fn with(mut self, transform: FieldTransform) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Adds a CopySame transform per field.
    pub fn copy_same<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transforms
            .extend(fields.into_iter().map(FieldTransform::copy_same));
        self
    }

    /// Adds a NewField transform per field.
    pub fn new_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transforms
            .extend(fields.into_iter().map(FieldTransform::new_field));
        self
    }

    pub fn transforms(&self) -> &[FieldTransform] {
        &self.transforms
    }

    /// Seeds a record for `version` from `preset`, scoped to the language of
    /// the record being migrated.
    fn seed(
        catalog: &dyn SchemaCatalog,
        version: Version,
        preset: &str,
        language: Option<&str>,
    ) -> Result<Record> {
        tracing::debug!("Seeding {} from preset {}", version, preset);
        catalog
            .preset_defaults(version, preset, language)
            .ok_or_else(|| {
                MigrationError::unknown_preset(
                    version,
                    vec![preset.to_string()],
                    catalog.accepted_preset_names(version),
                )
            })
    }

    fn expect_version(&self, record: &Record, expected: Version) -> Result<()> {
        if record.version() == expected {
            Ok(())
        } else {
            Err(MigrationError::unsupported_version(
                record.version(),
                format!("step {} expects a {} record", self.transition(), expected),
            ))
        }
    }

    /// Completeness and type agreement against the catalog.
    ///
    /// Every field of the older version must be read by some transform,
    /// every field of the newer version must be written by exactly one.
    pub fn check(&self, catalog: &dyn SchemaCatalog) -> Vec<String> {
        let (older, newer) = match (catalog.schema(self.from), catalog.schema(self.to)) {
            (Some(older), Some(newer)) => (older, newer),
            _ => return vec![format!("{} is not part of the catalog", self.transition())],
        };
        if catalog.successor(self.from) != Some(self.to) {
            return vec![format!("{} are not adjacent versions", self.transition())];
        }

        let mut problems = Vec::new();
        let mut writers: BTreeMap<&str, usize> = BTreeMap::new();
        for transform in &self.transforms {
            problems.extend(transform.check(older, newer));
            for field in transform.writes() {
                *writers.entry(field).or_default() += 1;
            }
        }

        for field in older.field_names() {
            if !self.transforms.iter().any(|t| t.reads().contains(&field)) {
                problems.push(format!("{} ({}) has no transform", field, self.from));
            }
        }
        for field in newer.field_names() {
            match writers.get(field).copied().unwrap_or(0) {
                0 => problems.push(format!("{} ({}) has no transform", field, self.to)),
                1 => {}
                n => problems.push(format!("{} ({}) is written by {} transforms", field, self.to, n)),
            }
        }
        problems
    }
}

impl Migration for StepMigrator {
    fn from_version(&self) -> Version {
        self.from
    }

    fn to_version(&self) -> Version {
        self.to
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl StepMigration for StepMigrator {
    fn upgrade(
        &self,
        catalog: &dyn SchemaCatalog,
        record: Record,
        preset: &str,
        log: &mut DiagnosticLog,
    ) -> Result<Record> {
        self.expect_version(&record, self.from)?;
        let ctx = StepContext {
            transition: self.transition(),
            older: catalog.require_schema(self.from)?,
            newer: catalog.require_schema(self.to)?,
        };
        let mut next = Self::seed(catalog, self.to, preset, record.language())?;

        let mut removed: Option<RemovedValue> = None;
        for transform in &self.transforms {
            if let Err(value) = transform.upgrade(&ctx, &record, &mut next, log) {
                removed.get_or_insert(value);
            }
        }

        match removed {
            Some(RemovedValue { field, value }) => Err(MigrationError::removed_enum_value_in_use(
                ctx.transition,
                field,
                value,
                log.clone(),
            )),
            None => Ok(next),
        }
    }

    fn downgrade(
        &self,
        catalog: &dyn SchemaCatalog,
        record: Record,
        preset: &str,
        log: &mut DiagnosticLog,
    ) -> Result<Record> {
        self.expect_version(&record, self.to)?;
        let ctx = StepContext {
            transition: self.transition().reversed(),
            older: catalog.require_schema(self.from)?,
            newer: catalog.require_schema(self.to)?,
        };
        let mut previous = Self::seed(catalog, self.from, preset, record.language())?;

        let warnings_before = log.count(Severity::Warning);
        for transform in &self.transforms {
            transform.downgrade(&ctx, &record, &mut previous, log);
        }
        let warnings = log.count(Severity::Warning) - warnings_before;
        if warnings > 0 {
            tracing::warn!("{} produced {} lossy change(s)", ctx.transition, warnings);
        }

        Ok(previous)
    }

    fn validate(&self, catalog: &dyn SchemaCatalog) -> Result<()> {
        let problems = self.check(catalog);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(MigrationError::SchemaCompletenessViolation {
                transition: Transition::new(self.from, self.to),
                problems,
            })
        }
    }
}
