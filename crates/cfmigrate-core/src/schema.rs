//! Per-version field vocabularies.

use crate::record::{FieldValue, Item};
use crate::version::Version;
use std::collections::BTreeMap;

/// The vocabulary of an enumerated field at one version.
///
/// `tags` are the canonical spellings in declaration order; `aliases` are
/// extra tokens the textual format accepts for a tag (`true`, `C++11`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumSpec {
    tags: Vec<String>,
    aliases: Vec<(String, String)>,
}

impl EnumSpec {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>, tag: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), tag.into()));
        self
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn aliases(&self) -> &[(String, String)] {
        &self.aliases
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Maps a token of the textual format to its canonical tag.
    pub fn canonicalize(&self, token: &str) -> Option<&str> {
        if let Some(tag) = self.tags.iter().find(|t| *t == token) {
            return Some(tag);
        }
        self.aliases
            .iter()
            .find(|(alias, _)| alias == token)
            .map(|(_, tag)| tag.as_str())
    }
}

/// An attribute of a structured list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl AttrSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Unsigned,
    Str,
    StrList,
    Enum(EnumSpec),
    Items(Vec<AttrSpec>),
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Unsigned => "unsigned",
            Self::Str => "string",
            Self::StrList => "string list",
            Self::Enum(_) => "enum",
            Self::Items(_) => "item list",
        }
    }

    pub fn as_enum(&self) -> Option<&EnumSpec> {
        match self {
            Self::Enum(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn attributes(&self) -> &[AttrSpec] {
        match self {
            Self::Items(attrs) => attrs,
            _ => &[],
        }
    }

    /// Whether a value is well-typed for this kind.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::Bool, FieldValue::Bool(_)) => true,
            (Self::Int, FieldValue::Int(_)) => true,
            (Self::Unsigned, FieldValue::Int(i)) => *i >= 0,
            (Self::Str, FieldValue::Str(_)) => true,
            (Self::StrList, FieldValue::List(_)) => true,
            (Self::Enum(spec), FieldValue::Tag(tag)) => spec.contains(tag),
            (Self::Items(attrs), FieldValue::Items(items)) => {
                items.iter().all(|item| item_matches(attrs, item))
            }
            _ => false,
        }
    }

    /// Whether a value can be copied verbatim between the two kinds.
    ///
    /// Enumerations only qualify when their vocabularies are identical, and
    /// item lists only when their attributes are.
    pub fn is_copy_compatible(&self, other: &FieldKind) -> bool {
        match (self, other) {
            (Self::Int, Self::Unsigned) | (Self::Unsigned, Self::Int) => true,
            (Self::Enum(a), Self::Enum(b)) => a.tags == b.tags,
            _ => self == other,
        }
    }

    /// The value a missing attribute or unset field takes.
    pub fn zero_value(&self) -> FieldValue {
        match self {
            Self::Bool => FieldValue::Bool(false),
            Self::Int | Self::Unsigned => FieldValue::Int(0),
            Self::Str => FieldValue::Str(String::new()),
            Self::StrList => FieldValue::List(Vec::new()),
            Self::Enum(spec) => {
                FieldValue::Tag(spec.tags.first().cloned().unwrap_or_default())
            }
            Self::Items(_) => FieldValue::Items(Vec::new()),
        }
    }
}

fn item_matches(attrs: &[AttrSpec], item: &Item) -> bool {
    item.iter().all(|(name, value)| {
        attrs
            .iter()
            .find(|a| a.name == name)
            .is_some_and(|a| a.kind.accepts(value))
    })
}

/// The field vocabulary of one catalog version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    version: Version,
    fields: BTreeMap<String, FieldKind>,
    /// Old spellings still accepted on input, mapped to the current field
    legacy_names: BTreeMap<String, String>,
    serializable: bool,
}

impl Schema {
    pub fn new(version: Version) -> Self {
        Self {
            version,
            fields: BTreeMap::new(),
            legacy_names: BTreeMap::new(),
            serializable: true,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    pub fn with_legacy_name(mut self, old: impl Into<String>, current: impl Into<String>) -> Self {
        self.legacy_names.insert(old.into(), current.into());
        self
    }

    /// Marks the version as having no textual configuration format.
    pub fn without_serialization(mut self) -> Self {
        self.serializable = false;
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: FieldKind) {
        self.fields.insert(name.into(), kind);
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn is_serializable(&self) -> bool {
        self.serializable
    }

    pub fn field(&self, name: &str) -> Option<&FieldKind> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The field an input key refers to, following legacy spellings.
    pub fn resolve_input_name<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        if self.fields.contains_key(key) {
            return Some(key);
        }
        self.legacy_names
            .get(key)
            .map(|s| s.as_str())
            .filter(|current| self.fields.contains_key(*current))
    }

    pub fn legacy_names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.legacy_names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldKind)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
