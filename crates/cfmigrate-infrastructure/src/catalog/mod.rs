//! TOML-backed schema catalogs.
//!
//! A [`TomlCatalog`] is built from one document per version (see
//! [`document`] for the format). The catalog of released versions is
//! compiled into the binary and parsed once on first use through
//! [`builtin_catalog`].

mod document;

use cfmigrate_core::{FieldKind, FieldValue, MigrationError, Record, Result, Schema, SchemaCatalog, Version};
use document::{ResolvedPreset, VersionDocument};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;

const BUILTIN_DOCUMENTS: [&str; 18] = [
    include_str!("data/v3_3.toml"),
    include_str!("data/v3_4.toml"),
    include_str!("data/v3_5.toml"),
    include_str!("data/v3_6.toml"),
    include_str!("data/v3_7.toml"),
    include_str!("data/v3_8.toml"),
    include_str!("data/v3_9.toml"),
    include_str!("data/v4_0.toml"),
    include_str!("data/v5_0.toml"),
    include_str!("data/v6_0.toml"),
    include_str!("data/v7_0.toml"),
    include_str!("data/v8_0.toml"),
    include_str!("data/v9_0.toml"),
    include_str!("data/v10_0.toml"),
    include_str!("data/v11_0.toml"),
    include_str!("data/v12_0.toml"),
    include_str!("data/v13_0.toml"),
    include_str!("data/v14_0.toml"),
];

static BUILTIN: OnceCell<Arc<TomlCatalog>> = OnceCell::new();

/// Returns the catalog of built-in versions.
///
/// Parsed on first access and shared afterwards.
pub fn builtin_catalog() -> Result<Arc<TomlCatalog>> {
    BUILTIN
        .get_or_try_init(|| {
            let catalog = TomlCatalog::from_documents(&BUILTIN_DOCUMENTS)?;
            tracing::debug!(
                "Loaded built-in catalog with {} versions",
                catalog.versions().len()
            );
            Ok(Arc::new(catalog))
        })
        .cloned()
}

#[derive(Debug)]
struct VersionEntry {
    release: semver::Version,
    schema: Schema,
    styles: Vec<String>,
    default_preset: String,
    presets: BTreeMap<String, ResolvedPreset>,
}

/// A catalog assembled from version documents.
#[derive(Debug)]
pub struct TomlCatalog {
    versions: Vec<Version>,
    entries: BTreeMap<Version, VersionEntry>,
}

impl TomlCatalog {
    /// Parses and validates one document per version. Order of `documents`
    /// does not matter; versions are sorted.
    pub fn from_documents<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for text in documents {
            let doc = VersionDocument::parse(text.as_ref())?;
            let version = doc.version;
            let entry = Self::build_entry(doc)?;
            if entries.insert(version, entry).is_some() {
                return Err(MigrationError::catalog(format!(
                    "Version {} is defined twice",
                    version
                )));
            }
        }

        if entries.is_empty() {
            return Err(MigrationError::catalog("No versions defined"));
        }

        Ok(Self {
            versions: entries.keys().copied().collect(),
            entries,
        })
    }

    fn build_entry(doc: VersionDocument) -> Result<VersionEntry> {
        let release = semver::Version::parse(&doc.release).map_err(|e| {
            MigrationError::catalog(format!("{}: bad release {}: {}", doc.version, doc.release, e))
        })?;
        if release.major != u64::from(doc.version.major())
            || release.minor != u64::from(doc.version.minor())
        {
            return Err(MigrationError::catalog(format!(
                "{}: release {} belongs to another version",
                doc.version, release
            )));
        }

        let schema = doc.build_schema()?;
        let presets = doc.resolve_presets(&schema)?;

        let mut declared: Vec<&str> = presets.keys().map(|s| s.as_str()).collect();
        let mut styles: Vec<&str> = doc.styles.iter().map(|s| s.as_str()).collect();
        declared.sort_unstable();
        styles.sort_unstable();
        if declared != styles {
            return Err(MigrationError::catalog(format!(
                "{}: styles [{}] do not match presets [{}]",
                doc.version,
                styles.join(", "),
                declared.join(", ")
            )));
        }
        if !doc.styles.contains(&doc.default_preset) {
            return Err(MigrationError::catalog(format!(
                "{}: default preset {} is not a style",
                doc.version, doc.default_preset
            )));
        }

        Ok(VersionEntry {
            release,
            schema,
            styles: doc.styles,
            default_preset: doc.default_preset,
            presets,
        })
    }

    /// The full release number a version's data was taken from.
    pub fn release(&self, version: Version) -> Option<&semver::Version> {
        self.entries.get(&version).map(|e| &e.release)
    }
}

impl SchemaCatalog for TomlCatalog {
    fn versions(&self) -> &[Version] {
        &self.versions
    }

    fn schema(&self, version: Version) -> Option<&Schema> {
        self.entries.get(&version).map(|e| &e.schema)
    }

    fn preset_defaults(
        &self,
        version: Version,
        preset: &str,
        language: Option<&str>,
    ) -> Option<Record> {
        let entry = self.entries.get(&version)?;
        let name = self.canonical_preset_name(version, preset)?;
        let resolved = entry.presets.get(name)?;

        let Some(language) = language else {
            return Some(resolved.base.clone());
        };
        if let Some(record) = resolved.languages.get(language) {
            return Some(record.clone());
        }

        let mut record = resolved.base.clone();
        let known = entry
            .schema
            .field("Language")
            .and_then(FieldKind::as_enum)
            .is_some_and(|spec| spec.contains(language));
        if known {
            record.set("Language", FieldValue::tag(language));
        }
        Some(record)
    }

    fn accepted_preset_names(&self, version: Version) -> &[String] {
        self.entries
            .get(&version)
            .map(|e| e.styles.as_slice())
            .unwrap_or(&[])
    }

    fn default_preset(&self, version: Version) -> Option<&str> {
        self.entries.get(&version).map(|e| e.default_preset.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u16, minor: u16) -> Version {
        Version::new(major, minor)
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin_catalog().unwrap();
        let labels: Vec<String> = catalog.versions().iter().map(|v| v.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "3.3", "3.4", "3.5", "3.6", "3.7", "3.8", "3.9", "4.0", "5.0", "6.0", "7.0", "8.0",
                "9.0", "10.0", "11.0", "12.0", "13.0", "14.0"
            ]
        );
        assert_eq!(catalog.release(v(3, 5)).map(|r| r.to_string()), Some("3.5.2".to_string()));
        assert_eq!(catalog.release(v(14, 0)).map(|r| r.to_string()), Some("14.0.6".to_string()));
    }

    #[test]
    fn test_builtin_catalog_is_shared() {
        let a = builtin_catalog().unwrap();
        let b = builtin_catalog().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_style_names_per_version() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(
            catalog.accepted_preset_names(v(3, 3)),
            ["chromium", "google", "llvm", "mozilla"]
        );
        assert!(catalog.accepted_preset_names(v(3, 4)).contains(&"webkit".to_string()));
        assert!(!catalog.accepted_preset_names(v(3, 4)).contains(&"gnu".to_string()));
        assert_eq!(catalog.accepted_preset_names(v(3, 8)).len(), 7);
        assert!(!catalog.accepted_preset_names(v(8, 0)).contains(&"microsoft".to_string()));
        assert!(catalog.accepted_preset_names(v(9, 0)).contains(&"microsoft".to_string()));
        assert!(catalog.accepted_preset_names(v(9, 9)).is_empty());
    }

    #[test]
    fn test_first_version_has_no_text_format() {
        let catalog = builtin_catalog().unwrap();
        assert!(!catalog.schema(v(3, 3)).unwrap().is_serializable());
        assert!(catalog.schema(v(3, 4)).unwrap().is_serializable());
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        let catalog = builtin_catalog().unwrap();
        let google = catalog.preset_defaults(v(3, 4), "GoOgLe", None).unwrap();
        assert_eq!(google.get("PointerBindsToType"), Some(&FieldValue::Bool(true)));
        assert_eq!(google.get("AccessModifierOffset"), Some(&FieldValue::Int(-1)));
        assert!(catalog.preset_defaults(v(3, 4), "gnu", None).is_none());
    }

    #[test]
    fn test_presets_cover_every_field() {
        let catalog = builtin_catalog().unwrap();
        for version in catalog.versions() {
            let schema = catalog.schema(*version).unwrap();
            for style in catalog.accepted_preset_names(*version) {
                let record = catalog.preset_defaults(*version, style, None).unwrap();
                assert_eq!(record.len(), schema.len(), "{} {}", version, style);
                for (name, value) in record.iter() {
                    let kind = schema.field(name).unwrap();
                    assert!(kind.accepts(value), "{} {} {}", version, style, name);
                }
            }
        }
    }

    #[test]
    fn test_language_overlays() {
        let catalog = builtin_catalog().unwrap();
        let java = catalog.preset_defaults(v(3, 6), "google", Some("Java")).unwrap();
        assert_eq!(java.get("ColumnLimit"), Some(&FieldValue::Int(100)));
        assert_eq!(java.get("Language"), Some(&FieldValue::tag("Java")));

        let chromium_java = catalog
            .preset_defaults(v(3, 6), "chromium", Some("Java"))
            .unwrap();
        assert_eq!(chromium_java.get("IndentWidth"), Some(&FieldValue::Int(4)));
        assert_eq!(chromium_java.get("ColumnLimit"), Some(&FieldValue::Int(100)));

        // no overlay: base values with the language tag applied
        let llvm_js = catalog
            .preset_defaults(v(3, 6), "llvm", Some("JavaScript"))
            .unwrap();
        assert_eq!(llvm_js.get("Language"), Some(&FieldValue::tag("JavaScript")));
        assert_eq!(llvm_js.get("ColumnLimit"), Some(&FieldValue::Int(80)));
    }

    #[test]
    fn test_duplicate_versions_are_rejected() {
        let err = TomlCatalog::from_documents(&[BUILTIN_DOCUMENTS[1], BUILTIN_DOCUMENTS[1]])
            .unwrap_err();
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn test_documents_may_come_in_any_order() {
        let catalog =
            TomlCatalog::from_documents(&[BUILTIN_DOCUMENTS[2], BUILTIN_DOCUMENTS[1]]).unwrap();
        assert_eq!(catalog.versions(), [v(3, 4), v(3, 5)]);
        assert_eq!(catalog.successor(v(3, 4)), Some(v(3, 5)));
        assert_eq!(catalog.successor(v(3, 5)), None);
        assert_eq!(catalog.default_preset(v(3, 5)), Some("llvm"));
    }
}
