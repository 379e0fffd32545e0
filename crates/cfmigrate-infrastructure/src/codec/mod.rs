//! YAML codec for the style configuration file.
//!
//! Decoding seeds a record from a preset (the document's `BasedOnStyle`, the
//! caller's fallback, or the version's default) and lays the document's keys
//! on top. Encoding emits `Language`, `BasedOnStyle` and then every field in
//! schema order, re-nesting dotted names such as `BraceWrapping.AfterClass`.

mod value;

use cfmigrate_core::{MigrationError, Record, Result, Schema, SchemaCatalog, StyleCodec, Version};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::sync::Arc;

const BASED_ON_STYLE: &str = "BasedOnStyle";
const LANGUAGE: &str = "Language";

static BASED_ON_STYLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*BasedOnStyle:\s*['"]?([^'"\s#]+)"#).expect("valid regex")
});

/// One decoded document, flattened to `(dotted name, node)` pairs.
type Entries = Vec<(String, Value)>;

#[derive(Debug, Clone)]
pub struct ClangFormatYamlCodec {
    catalog: Arc<dyn SchemaCatalog>,
}

impl ClangFormatYamlCodec {
    pub fn new(catalog: Arc<dyn SchemaCatalog>) -> Self {
        Self { catalog }
    }

    fn textual_schema(&self, version: Version) -> Result<&Schema> {
        let schema = self.catalog.require_schema(version)?;
        if schema.is_serializable() {
            Ok(schema)
        } else {
            Err(MigrationError::unsupported_version(
                version,
                "this version has no configuration file format",
            ))
        }
    }

    /// Splits `text` into its YAML documents. Empty documents are empty
    /// mappings; an empty text is a single empty document.
    fn documents(version: Version, text: &str) -> Result<Vec<Entries>> {
        let mut documents = Vec::new();
        for document in serde_yaml::Deserializer::from_str(text) {
            let node = Value::deserialize(document)
                .map_err(|e| MigrationError::decode_failure(version, e.to_string()))?;
            let mapping = match node {
                Value::Null => Mapping::new(),
                Value::Mapping(mapping) => mapping,
                other => {
                    return Err(MigrationError::decode_failure(
                        version,
                        format!("expected a mapping, found {}", value::describe(&other)),
                    ));
                }
            };
            let mut entries = Vec::new();
            flatten(version, "", mapping, &mut entries)?;
            documents.push(entries);
        }
        if documents.is_empty() {
            documents.push(Vec::new());
        }
        Ok(documents)
    }

    /// Picks the document for the default language.
    ///
    /// Only the first document may omit `Language`, and no language may
    /// appear twice. A `Cpp` document wins; otherwise the first document is
    /// used. A first document without `Language` supplies defaults for the
    /// one selected.
    fn select(version: Version, documents: Vec<Entries>) -> Result<Entries> {
        let languages: Vec<Option<String>> = documents
            .iter()
            .map(|entries| {
                entries
                    .iter()
                    .find(|(name, _)| name == LANGUAGE)
                    .map(|(_, node)| value::render_key(node))
            })
            .collect();

        for (i, language) in languages.iter().enumerate() {
            match language {
                None if i > 0 => {
                    return Err(MigrationError::decode_failure(
                        version,
                        format!("document {} does not declare a Language", i + 1),
                    ));
                }
                Some(language) if languages[..i].iter().flatten().any(|l| l == language) => {
                    return Err(MigrationError::decode_failure(
                        version,
                        format!("Language {} is configured more than once", language),
                    ));
                }
                _ => {}
            }
        }

        let selected = languages
            .iter()
            .position(|l| l.as_deref() == Some("Cpp"))
            .unwrap_or(0);
        let template_applies = selected > 0 && languages[0].is_none();

        let mut documents = documents;
        let chosen = documents.swap_remove(selected);
        if template_applies {
            let mut merged = documents.swap_remove(0);
            merged.extend(chosen);
            Ok(merged)
        } else {
            Ok(chosen)
        }
    }

    fn base_preset<'a>(
        &'a self,
        version: Version,
        entries: &Entries,
        fallback: Option<&str>,
    ) -> Result<&'a str> {
        let named = entries
            .iter()
            .rev()
            .find(|(name, _)| name == BASED_ON_STYLE)
            .map(|(_, node)| value::render_key(node));

        if let Some(named) = named {
            return self
                .catalog
                .canonical_preset_name(version, &named)
                .ok_or_else(|| {
                    MigrationError::decode_failure(
                        version,
                        format!(
                            "unknown style {} (accepted: {})",
                            named,
                            self.catalog.accepted_preset_names(version).join(", ")
                        ),
                    )
                });
        }

        fallback
            .and_then(|f| self.catalog.canonical_preset_name(version, f))
            .or_else(|| self.catalog.default_preset(version))
            .ok_or_else(|| MigrationError::decode_failure(version, "no style to start from"))
    }
}

fn flatten(version: Version, prefix: &str, mapping: Mapping, out: &mut Entries) -> Result<()> {
    for (key, node) in mapping {
        let Value::String(key) = key else {
            return Err(MigrationError::decode_failure(
                version,
                format!("keys must be strings, found {}", value::render_key(&key)),
            ));
        };
        let name = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };
        match node {
            Value::Mapping(nested) => flatten(version, &name, nested, out)?,
            node => out.push((name, node)),
        }
    }
    Ok(())
}

/// Inserts `node` under a dotted `name`, creating intermediate mappings.
fn insert_nested(root: &mut Mapping, name: &str, node: Value) {
    match name.split_once('.') {
        None => {
            root.insert(Value::String(name.to_string()), node);
        }
        Some((group, rest)) => {
            let entry = root
                .entry(Value::String(group.to_string()))
                .or_insert(Value::Mapping(Mapping::new()));
            if !entry.is_mapping() {
                *entry = Value::Mapping(Mapping::new());
            }
            if let Value::Mapping(nested) = entry {
                insert_nested(nested, rest, node);
            }
        }
    }
}

impl StyleCodec for ClangFormatYamlCodec {
    fn decode_with_fallback(
        &self,
        version: Version,
        text: &str,
        fallback_preset: Option<&str>,
    ) -> Result<Record> {
        let schema = self.textual_schema(version)?;
        let entries = Self::select(version, Self::documents(version, text)?)?;
        let preset = self.base_preset(version, &entries, fallback_preset)?;

        let mut decoded = Vec::with_capacity(entries.len());
        for (key, node) in &entries {
            if key == BASED_ON_STYLE {
                continue;
            }
            let name = schema.resolve_input_name(key).ok_or_else(|| {
                MigrationError::decode_failure(version, format!("unknown key {}", key))
            })?;
            let kind = schema.field(name).ok_or_else(|| {
                MigrationError::decode_failure(version, format!("unknown key {}", key))
            })?;
            let field = value::from_yaml(kind, node)
                .map_err(|reason| MigrationError::decode_failure(version, format!("{}: {}", key, reason)))?;
            decoded.push((name.to_string(), field));
        }

        let language = decoded
            .iter()
            .rev()
            .find(|(name, _)| name == LANGUAGE)
            .and_then(|(_, v)| v.as_tag())
            .filter(|tag| !matches!(*tag, "Cpp" | "None"));
        let mut record = self
            .catalog
            .preset_defaults(version, preset, language)
            .ok_or_else(|| {
                MigrationError::decode_failure(version, format!("style {} has no defaults", preset))
            })?;

        tracing::debug!(
            "Decoded {} keys at {} on top of {}",
            decoded.len(),
            version,
            preset
        );
        for (name, field) in decoded {
            record.set(name, field);
        }
        Ok(record)
    }

    fn encode(&self, record: &Record, preset: &str, skip_defaulted_fields: bool) -> Result<String> {
        let version = record.version();
        let schema = self.textual_schema(version)?;
        let base = self.catalog.canonical_preset_name(version, preset);
        let defaults = if skip_defaulted_fields {
            base.and_then(|b| self.catalog.preset_defaults(version, b, record.language()))
        } else {
            None
        };

        let mut root = Mapping::new();
        if let Some(language) = record.get(LANGUAGE) {
            root.insert(Value::String(LANGUAGE.to_string()), value::to_yaml(language));
        }
        if let Some(base) = base {
            root.insert(
                Value::String(BASED_ON_STYLE.to_string()),
                Value::String(base.to_string()),
            );
        }

        for (name, kind) in schema.fields() {
            if name == LANGUAGE {
                continue;
            }
            let Some(field) = record.get(name) else {
                continue;
            };
            if !kind.accepts(field) {
                return Err(MigrationError::encode_failure(
                    version,
                    format!("{} = {} is not a valid {}", name, field, kind.name()),
                ));
            }
            let defaulted = defaults
                .as_ref()
                .is_some_and(|d| d.get(name) == Some(field));
            if !defaulted {
                insert_nested(&mut root, name, value::to_yaml(field));
            }
        }

        let body = serde_yaml::to_string(&Value::Mapping(root))
            .map_err(|e| MigrationError::encode_failure(version, e.to_string()))?;
        Ok(format!("---\n{}...\n", body))
    }

    fn style_hint(&self, version: Version, text: &str) -> Option<String> {
        match Self::documents(version, text).and_then(|d| Self::select(version, d)) {
            Ok(entries) => entries
                .iter()
                .rev()
                .find(|(name, _)| name == BASED_ON_STYLE)
                .map(|(_, node)| value::render_key(node)),
            // unreadable text: the first declaration is the best guess
            Err(_) => BASED_ON_STYLE_LINE
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
        }
    }
}
