//! On-disk shape of a catalog version document.
//!
//! One TOML document describes one version: its field vocabulary, the
//! preset names it accepts, and the values of every preset. Presets may be
//! declared relative to another preset of the same document (`based_on`)
//! and may carry per-language overlays.

use cfmigrate_core::{
    AttrSpec, EnumSpec, FieldKind, FieldValue, Item, MigrationError, Record, Result, Schema,
    Version,
};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct VersionDocument {
    pub version: Version,
    /// Full release number the data was taken from
    pub release: String,
    #[serde(default = "serializable_by_default")]
    pub serializable: bool,
    pub default_preset: String,
    pub styles: Vec<String>,
    #[serde(default)]
    pub legacy: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FieldDecl>,
    #[serde(default)]
    pub preset: BTreeMap<String, PresetDecl>,
}

fn serializable_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ScalarDecl {
    Bool,
    Int,
    Unsigned,
    String,
    List,
}

impl From<ScalarDecl> for FieldKind {
    fn from(decl: ScalarDecl) -> Self {
        match decl {
            ScalarDecl::Bool => FieldKind::Bool,
            ScalarDecl::Int => FieldKind::Int,
            ScalarDecl::Unsigned => FieldKind::Unsigned,
            ScalarDecl::String => FieldKind::Str,
            ScalarDecl::List => FieldKind::StrList,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FieldDecl {
    Scalar(ScalarDecl),
    Enum {
        #[serde(rename = "enum")]
        tags: Vec<String>,
        #[serde(default)]
        aliases: BTreeMap<String, String>,
    },
    Items {
        items: BTreeMap<String, ScalarDecl>,
    },
}

impl FieldDecl {
    fn to_kind(&self) -> FieldKind {
        match self {
            Self::Scalar(scalar) => (*scalar).into(),
            Self::Enum { tags, aliases } => {
                let spec = aliases
                    .iter()
                    .fold(EnumSpec::new(tags.iter().cloned()), |spec, (alias, tag)| {
                        spec.with_alias(alias.clone(), tag.clone())
                    });
                FieldKind::Enum(spec)
            }
            Self::Items { items } => FieldKind::Items(
                items
                    .iter()
                    .map(|(name, kind)| AttrSpec::new(name.clone(), (*kind).into()))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct PresetDecl {
    pub based_on: Option<String>,
    #[serde(default)]
    pub values: BTreeMap<String, toml::Value>,
    #[serde(default)]
    pub languages: BTreeMap<String, BTreeMap<String, toml::Value>>,
}

/// A preset with inheritance and language overlays applied.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedPreset {
    pub base: Record,
    pub languages: BTreeMap<String, Record>,
}

impl VersionDocument {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| MigrationError::catalog(format!("Invalid version document: {}", e)))
    }

    pub fn build_schema(&self) -> Result<Schema> {
        let mut schema = self
            .fields
            .iter()
            .fold(Schema::new(self.version), |schema, (name, decl)| {
                schema.with_field(name.clone(), decl.to_kind())
            });

        for (old, current) in &self.legacy {
            if !schema.contains(current) {
                return Err(MigrationError::catalog(format!(
                    "{}: legacy name {} points at unknown field {}",
                    self.version, old, current
                )));
            }
            schema = schema.with_legacy_name(old.clone(), current.clone());
        }

        for (name, kind) in schema.fields() {
            if let FieldKind::Enum(spec) = kind {
                if let Some((alias, tag)) =
                    spec.aliases().iter().find(|(_, tag)| !spec.contains(tag))
                {
                    return Err(MigrationError::catalog(format!(
                        "{}: alias {} of {} names unknown value {}",
                        self.version, alias, name, tag
                    )));
                }
            }
        }

        if self.serializable {
            Ok(schema)
        } else {
            Ok(schema.without_serialization())
        }
    }

    /// Resolves every preset, checking that each one defines every field.
    pub fn resolve_presets(&self, schema: &Schema) -> Result<BTreeMap<String, ResolvedPreset>> {
        let mut resolved = BTreeMap::new();
        for name in self.preset.keys() {
            self.resolve_one(name, schema, &mut resolved, &mut Vec::new())?;
        }

        for (name, preset) in &resolved {
            let missing: Vec<&str> = schema
                .field_names()
                .filter(|field| !preset.base.contains(field))
                .collect();
            if !missing.is_empty() {
                return Err(MigrationError::catalog(format!(
                    "{}: preset {} does not define {}",
                    self.version,
                    name,
                    missing.join(", ")
                )));
            }
        }

        Ok(resolved)
    }

    fn resolve_one(
        &self,
        name: &str,
        schema: &Schema,
        resolved: &mut BTreeMap<String, ResolvedPreset>,
        stack: &mut Vec<String>,
    ) -> Result<()> {
        if resolved.contains_key(name) {
            return Ok(());
        }
        if stack.iter().any(|n| n == name) {
            return Err(MigrationError::catalog(format!(
                "{}: preset inheritance cycle through {}",
                self.version, name
            )));
        }
        let decl = self.preset.get(name).ok_or_else(|| {
            MigrationError::catalog(format!("{}: unknown base preset {}", self.version, name))
        })?;

        let (mut base, mut languages) = match &decl.based_on {
            Some(parent) => {
                stack.push(name.to_string());
                self.resolve_one(parent, schema, resolved, stack)?;
                stack.pop();
                let parent = &resolved[parent.as_str()];
                (parent.base.clone(), parent.languages.clone())
            }
            None => (Record::new(self.version), BTreeMap::new()),
        };

        self.apply(&mut base, &decl.values, schema, name)?;
        for record in languages.values_mut() {
            self.apply(record, &decl.values, schema, name)?;
        }
        for (language, overrides) in &decl.languages {
            let accepted = schema
                .field("Language")
                .and_then(FieldKind::as_enum)
                .is_some_and(|spec| spec.contains(language));
            if !accepted {
                return Err(MigrationError::catalog(format!(
                    "{}: preset {} has an overlay for unknown language {}",
                    self.version, name, language
                )));
            }
            let record = languages
                .entry(language.clone())
                .or_insert_with(|| base.clone());
            self.apply(record, overrides, schema, name)?;
            record.set("Language", FieldValue::tag(language.clone()));
        }

        resolved.insert(name.to_string(), ResolvedPreset { base, languages });
        Ok(())
    }

    fn apply(
        &self,
        record: &mut Record,
        values: &BTreeMap<String, toml::Value>,
        schema: &Schema,
        preset: &str,
    ) -> Result<()> {
        for (field, raw) in values {
            let kind = schema.field(field).ok_or_else(|| {
                MigrationError::catalog(format!(
                    "{}: preset {} sets unknown field {}",
                    self.version, preset, field
                ))
            })?;
            let value = value_from_toml(kind, raw).map_err(|reason| {
                MigrationError::catalog(format!(
                    "{}: preset {} field {}: {}",
                    self.version, preset, field, reason
                ))
            })?;
            record.set(field.clone(), value);
        }
        Ok(())
    }
}

fn value_from_toml(kind: &FieldKind, value: &toml::Value) -> std::result::Result<FieldValue, String> {
    use toml::Value;

    match (kind, value) {
        (FieldKind::Bool, Value::Boolean(b)) => Ok(FieldValue::Bool(*b)),
        (FieldKind::Int, Value::Integer(i)) => Ok(FieldValue::Int(*i)),
        (FieldKind::Unsigned, Value::Integer(i)) if *i >= 0 => Ok(FieldValue::Int(*i)),
        (FieldKind::Str, Value::String(s)) => Ok(FieldValue::Str(s.clone())),
        (FieldKind::StrList, Value::Array(values)) => values
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                other => Err(format!("list entries must be strings, found {}", other.type_str())),
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(FieldValue::List),
        (FieldKind::Enum(spec), Value::String(token)) => spec
            .canonicalize(token)
            .map(FieldValue::tag)
            .ok_or_else(|| format!("{} is not one of {}", token, spec.tags().join(", "))),
        (FieldKind::Items(attrs), Value::Array(values)) => values
            .iter()
            .map(|v| item_from_toml(attrs, v))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(FieldValue::Items),
        (kind, other) => Err(format!(
            "expected {} but found {}",
            kind.name(),
            other.type_str()
        )),
    }
}

fn item_from_toml(attrs: &[AttrSpec], value: &toml::Value) -> std::result::Result<Item, String> {
    let table = value
        .as_table()
        .ok_or_else(|| format!("list items must be tables, found {}", value.type_str()))?;

    let mut item = Item::new();
    for attr in attrs {
        let value = match table.get(&attr.name) {
            Some(raw) => value_from_toml(&attr.kind, raw)?,
            None => attr.kind.zero_value(),
        };
        item.set(attr.name.clone(), value);
    }
    if let Some(unknown) = table.keys().find(|k| !attrs.iter().any(|a| &a.name == *k)) {
        return Err(format!("unknown item attribute {}", unknown));
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"
version = "1.0"
release = "1.0.3"
default_preset = "base"
styles = ["base", "child"]

[legacy]
OldWidth = "Width"

[fields]
Width = "unsigned"
Mode = { enum = ["Off", "On"], aliases = { "false" = "Off", "true" = "On" } }
Language = { enum = ["None", "Cpp", "Java"] }

[preset.base.values]
Width = 80
Mode = "false"
Language = "Cpp"

[preset.child]
based_on = "base"

[preset.child.values]
Width = 100

[preset.child.languages.Java]
Mode = "On"
"#;

    #[test]
    fn test_schema_from_document() {
        let doc = VersionDocument::parse(DOCUMENT).unwrap();
        let schema = doc.build_schema().unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.field("Width"), Some(&FieldKind::Unsigned));
        assert_eq!(schema.resolve_input_name("OldWidth"), Some("Width"));
        let mode = schema.field("Mode").and_then(FieldKind::as_enum).unwrap();
        assert_eq!(mode.canonicalize("true"), Some("On"));
    }

    #[test]
    fn test_presets_inherit_and_overlay() {
        let doc = VersionDocument::parse(DOCUMENT).unwrap();
        let schema = doc.build_schema().unwrap();
        let presets = doc.resolve_presets(&schema).unwrap();

        let base = &presets["base"];
        assert_eq!(base.base.get("Mode"), Some(&FieldValue::tag("Off")));

        let child = &presets["child"];
        assert_eq!(child.base.get("Width"), Some(&FieldValue::Int(100)));
        assert_eq!(child.base.get("Mode"), Some(&FieldValue::tag("Off")));

        let java = &child.languages["Java"];
        assert_eq!(java.get("Width"), Some(&FieldValue::Int(100)));
        assert_eq!(java.get("Mode"), Some(&FieldValue::tag("On")));
        assert_eq!(java.get("Language"), Some(&FieldValue::tag("Java")));
    }

    #[test]
    fn test_incomplete_preset_is_rejected() {
        let text = DOCUMENT.replace("Width = 80\n", "");
        let doc = VersionDocument::parse(&text).unwrap();
        let schema = doc.build_schema().unwrap();
        let err = doc.resolve_presets(&schema).unwrap_err();
        assert!(err.to_string().contains("does not define Width"));
    }

    #[test]
    fn test_bad_value_is_rejected() {
        let text = DOCUMENT.replace("Mode = \"false\"", "Mode = \"Sometimes\"");
        let doc = VersionDocument::parse(&text).unwrap();
        let schema = doc.build_schema().unwrap();
        let err = doc.resolve_presets(&schema).unwrap_err();
        assert!(matches!(err, MigrationError::Catalog(_)));
        assert!(err.to_string().contains("Sometimes"));
    }

    #[test]
    fn test_inheritance_cycle_is_rejected() {
        let text = DOCUMENT.replace(
            "[preset.base.values]",
            "[preset.base]\nbased_on = \"child\"\n\n[preset.base.values]",
        );
        let doc = VersionDocument::parse(&text).unwrap();
        let schema = doc.build_schema().unwrap();
        let err = doc.resolve_presets(&schema).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_item_lists_fill_missing_attributes() {
        let kind = FieldKind::Items(vec![
            AttrSpec::new("Priority", FieldKind::Int),
            AttrSpec::new("Regex", FieldKind::Str),
        ]);
        let value: toml::Value = toml::from_str::<toml::Table>("v = [{ Regex = '.*' }]")
            .unwrap()
            .remove("v")
            .unwrap();

        let items = value_from_toml(&kind, &value).unwrap();
        let items = items.as_items().unwrap();
        assert_eq!(items[0].get("Priority"), Some(&FieldValue::Int(0)));
        assert_eq!(items[0].get("Regex"), Some(&FieldValue::str(".*")));
    }
}
