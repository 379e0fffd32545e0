//! Versioned style records.
//!
//! A [`Record`] is the generic, version-tagged mapping from field name to
//! [`FieldValue`] that every migration step consumes and produces. Nested
//! groups of the textual format are flattened into dotted names such as
//! `BraceWrapping.AfterClass`.

use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Str(String),
    /// A canonical enumeration tag
    Tag(String),
    List(Vec<String>),
    Items(Vec<Item>),
}

impl FieldValue {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Self::Tag(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[Item]> {
        match self {
            Self::Items(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the value's type, used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::Tag(_) => "enum",
            Self::List(_) => "list",
            Self::Items(_) => "items",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "'{}'", s),
            Self::Tag(t) => write!(f, "{}", t),
            Self::List(values) => write!(f, "[{}]", values.join(", ")),
            Self::Items(items) => {
                let rendered: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

/// One element of a list-of-structures field (e.g. an include category).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    attributes: BTreeMap<String, FieldValue>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.attributes.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.attributes.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.attributes.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .attributes
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}

/// A version-tagged mapping from field name to value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    version: Version,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(version: Version) -> Self {
        Self {
            version,
            fields: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Builder-style field setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    /// The sub-language tag of the record, if it has a concrete one.
    ///
    /// `Cpp` and `None` are the default scope and yield `None`.
    pub fn language(&self) -> Option<&str> {
        match self.get("Language").and_then(FieldValue::as_tag) {
            Some("Cpp") | Some("None") | None => None,
            Some(other) => Some(other),
        }
    }

    /// Names of fields whose values differ from `other` (either side missing
    /// counts as a difference), sorted.
    pub fn diff(&self, other: &Record) -> Vec<String> {
        let mut names: Vec<String> = self
            .fields
            .iter()
            .filter(|(k, v)| other.get(k) != Some(*v))
            .map(|(k, _)| k.clone())
            .collect();
        for name in other.fields.keys() {
            if !self.fields.contains_key(name) {
                names.push(name.clone());
            }
        }
        names.sort();
        names
    }
}
