//! Field transform primitives.
//!
//! A [`FieldTransform`] moves one field, or a small fixed group of fields,
//! across one version boundary. Transforms are plain data; the same value
//! knows how to walk the boundary upward and downward.
//!
//! Every transform reads from a *source* record and writes into a *target*
//! record that has already been seeded with preset defaults, so anything a
//! transform leaves alone keeps its preset value.

use cfmigrate_core::{
    DiagnosticClass, DiagnosticLog, EnumSpec, FieldKind, FieldValue, Record, Schema, Transition,
};
use std::fmt;

/// What a transform sees while it runs.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// The hop, oriented in the walking direction
    pub transition: Transition,
    /// Schema of the older version
    pub older: &'a Schema,
    /// Schema of the newer version
    pub newer: &'a Schema,
}

/// An enumerated value in use that has no successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedValue {
    pub field: String,
    pub value: String,
}

/// Correspondence between the tags of an enumeration at two versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMapping {
    by_name: bool,
    pairs: Vec<(String, String)>,
}

impl TagMapping {
    /// Tags that keep their spelling map onto themselves.
    pub fn by_name() -> Self {
        Self {
            by_name: true,
            pairs: Vec::new(),
        }
    }

    /// Only the listed `(old, new)` pairs.
    pub fn explicit<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            by_name: false,
            pairs: pairs
                .into_iter()
                .map(|(a, b)| (a.into(), b.into()))
                .collect(),
        }
    }

    /// Adds a pair, taking precedence over a same-name match.
    pub fn with_pair(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.pairs.push((old.into(), new.into()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// The concrete `(old, new)` pairs for two vocabularies.
    pub fn resolve(&self, old: &EnumSpec, new: &EnumSpec) -> Vec<(String, String)> {
        let mut pairs = self.pairs.clone();
        if self.by_name {
            for tag in old.tags() {
                if new.contains(tag) && !pairs.iter().any(|(o, _)| o == tag) {
                    pairs.push((tag.clone(), tag.clone()));
                }
            }
        }
        pairs
    }
}

/// Signature of the two halves of a [`CompositeRule`].
pub type CompositeFn = fn(&StepContext<'_>, &Record, &mut Record, &mut DiagnosticLog);

/// A hand-written rule for a boundary the primitives cannot express.
#[derive(Clone)]
pub struct CompositeRule {
    pub name: &'static str,
    /// Fields of the older version the rule consumes
    pub reads: Vec<String>,
    /// Fields of the newer version the rule produces
    pub writes: Vec<String>,
    pub upgrade: CompositeFn,
    pub downgrade: CompositeFn,
}

impl fmt::Debug for CompositeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeRule")
            .field("name", &self.name)
            .field("reads", &self.reads)
            .field("writes", &self.writes)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum FieldTransform {
    /// Same name, same type on both sides
    CopySame { field: String },
    /// Same type, new name
    Rename { from: String, to: String },
    /// Enumeration whose vocabulary changed, optionally under a new name
    EnumRemap {
        from: String,
        to: String,
        mapping: TagMapping,
    },
    /// Boolean promoted to an enumeration
    BooleanToEnum {
        from: String,
        to: String,
        when_false: String,
        when_true: String,
    },
    /// Field that only exists at the newer version
    NewField { field: String },
    /// Item list whose items gained attributes, with their defaults
    ListElement {
        field: String,
        introduced: Vec<(String, FieldValue)>,
    },
    Composite(CompositeRule),
}

impl FieldTransform {
    // ============================================================================
    // Constructors
    // ============================================================================

    pub fn copy_same(field: impl Into<String>) -> Self {
        Self::CopySame {
            field: field.into(),
        }
    }

    pub fn rename(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Rename {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn enum_remap(field: impl Into<String>, mapping: TagMapping) -> Self {
        let field = field.into();
        Self::EnumRemap {
            from: field.clone(),
            to: field,
            mapping,
        }
    }

    pub fn rename_and_enum_remap(
        from: impl Into<String>,
        to: impl Into<String>,
        mapping: TagMapping,
    ) -> Self {
        Self::EnumRemap {
            from: from.into(),
            to: to.into(),
            mapping,
        }
    }

    pub fn boolean_to_enum(
        from: impl Into<String>,
        to: impl Into<String>,
        when_false: impl Into<String>,
        when_true: impl Into<String>,
    ) -> Self {
        Self::BooleanToEnum {
            from: from.into(),
            to: to.into(),
            when_false: when_false.into(),
            when_true: when_true.into(),
        }
    }

    pub fn new_field(field: impl Into<String>) -> Self {
        Self::NewField {
            field: field.into(),
        }
    }

    pub fn list_element<I, S>(field: impl Into<String>, introduced: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldValue)>,
        S: Into<String>,
    {
        Self::ListElement {
            field: field.into(),
            introduced: introduced
                .into_iter()
                .map(|(name, default)| (name.into(), default))
                .collect(),
        }
    }

    pub fn composite(rule: CompositeRule) -> Self {
        Self::Composite(rule)
    }

    // ============================================================================
    // Coverage
    // ============================================================================

    /// Fields of the older version this transform accounts for.
    pub fn reads(&self) -> Vec<&str> {
        match self {
            Self::CopySame { field } | Self::ListElement { field, .. } => vec![field.as_str()],
            Self::Rename { from, .. }
            | Self::EnumRemap { from, .. }
            | Self::BooleanToEnum { from, .. } => vec![from.as_str()],
            Self::NewField { .. } => vec![],
            Self::Composite(rule) => rule.reads.iter().map(|s| s.as_str()).collect(),
        }
    }

    /// Fields of the newer version this transform accounts for.
    pub fn writes(&self) -> Vec<&str> {
        match self {
            Self::CopySame { field }
            | Self::ListElement { field, .. }
            | Self::NewField { field } => vec![field.as_str()],
            Self::Rename { to, .. } | Self::EnumRemap { to, .. } | Self::BooleanToEnum { to, .. } => {
                vec![to.as_str()]
            }
            Self::Composite(rule) => rule.writes.iter().map(|s| s.as_str()).collect(),
        }
    }

    /// Type and vocabulary problems against the two schemas.
    pub fn check(&self, older: &Schema, newer: &Schema) -> Vec<String> {
        let mut problems = Vec::new();
        for field in self.reads() {
            if !older.contains(field) {
                problems.push(format!("{} is not a field of {}", field, older.version()));
            }
        }
        for field in self.writes() {
            if !newer.contains(field) {
                problems.push(format!("{} is not a field of {}", field, newer.version()));
            }
        }
        if !problems.is_empty() {
            return problems;
        }

        match self {
            Self::CopySame { field } => {
                check_copy(field, field, older, newer, &mut problems);
            }
            Self::Rename { from, to } => check_copy(from, to, older, newer, &mut problems),
            Self::EnumRemap { from, to, mapping } => {
                match (enum_of(older, from), enum_of(newer, to)) {
                    (Some(old), Some(new)) => {
                        for (o, n) in mapping.pairs() {
                            if !old.contains(o) {
                                problems.push(format!("{}: {} is not a value at {}", from, o, older.version()));
                            }
                            if !new.contains(n) {
                                problems.push(format!("{}: {} is not a value at {}", to, n, newer.version()));
                            }
                        }
                    }
                    _ => problems.push(format!("{} -> {} is not an enumeration on both sides", from, to)),
                }
            }
            Self::BooleanToEnum {
                from,
                to,
                when_false,
                when_true,
            } => {
                if older.field(from) != Some(&FieldKind::Bool) {
                    problems.push(format!("{} is not a boolean at {}", from, older.version()));
                }
                match enum_of(newer, to) {
                    Some(new) => {
                        for tag in [when_false, when_true] {
                            if !new.contains(tag) {
                                problems.push(format!("{}: {} is not a value at {}", to, tag, newer.version()));
                            }
                        }
                    }
                    None => problems.push(format!("{} is not an enumeration at {}", to, newer.version())),
                }
            }
            Self::NewField { field } => {
                if older.contains(field) {
                    problems.push(format!("{} already exists at {}", field, older.version()));
                }
            }
            Self::ListElement { field, introduced } => {
                let old_attrs = older.field(field).map(FieldKind::attributes).unwrap_or(&[]);
                let new_attrs = newer.field(field).map(FieldKind::attributes).unwrap_or(&[]);
                for attr in new_attrs {
                    let carried = old_attrs.iter().any(|a| a == attr);
                    let added = introduced.iter().any(|(name, default)| {
                        name == &attr.name && attr.kind.accepts(default)
                    });
                    if carried == added {
                        problems.push(format!("{}: attribute {} is not accounted for", field, attr.name));
                    }
                }
                for attr in old_attrs {
                    if !new_attrs.contains(attr) {
                        problems.push(format!("{}: attribute {} disappears", field, attr.name));
                    }
                }
            }
            Self::Composite(_) => {}
        }
        problems
    }

    // ============================================================================
    // Application
    // ============================================================================

    /// Older to newer. `source` is at the older version, `target` at the newer.
    pub fn upgrade(
        &self,
        ctx: &StepContext<'_>,
        source: &Record,
        target: &mut Record,
        log: &mut DiagnosticLog,
    ) -> Result<(), RemovedValue> {
        let transition = ctx.transition;
        match self {
            Self::CopySame { field } => {
                copy_value(source, field, target, field);
            }
            Self::Rename { from, to } => {
                copy_value(source, from, target, to);
                log.info(
                    DiagnosticClass::Renamed,
                    transition,
                    [from, to],
                    format!("Field {} has been renamed to {}", from, to),
                );
            }
            Self::EnumRemap { .. } | Self::BooleanToEnum { .. } => match self.remap(ctx) {
                Some(remap) => return remap.upgrade(transition, source, target, log),
                None => tracing::warn!("Skipping ill-typed transform {:?} in {}", self, transition),
            },
            Self::NewField { field } => {
                let value = target
                    .get(field)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "unset".to_string());
                log.info(
                    DiagnosticClass::NewField,
                    transition,
                    [field],
                    format!("New field {} with value {}", field, value),
                );
            }
            Self::ListElement { field, introduced } => {
                if let Some(FieldValue::Items(items)) = source.get(field) {
                    let items = items
                        .iter()
                        .map(|item| {
                            let mut item = item.clone();
                            for (name, default) in introduced {
                                if item.get(name).is_none() {
                                    item.set(name.clone(), default.clone());
                                }
                            }
                            item
                        })
                        .collect();
                    target.set(field.clone(), FieldValue::Items(items));
                }
            }
            Self::Composite(rule) => (rule.upgrade)(ctx, source, target, log),
        }
        Ok(())
    }

    /// Newer to older. `source` is at the newer version, `target` at the older.
    pub fn downgrade(
        &self,
        ctx: &StepContext<'_>,
        source: &Record,
        target: &mut Record,
        log: &mut DiagnosticLog,
    ) {
        let transition = ctx.transition;
        match self {
            Self::CopySame { field } => {
                copy_value(source, field, target, field);
            }
            Self::Rename { from, to } => {
                copy_value(source, to, target, from);
                log.info(
                    DiagnosticClass::Renamed,
                    transition,
                    [to, from],
                    format!("Field {} has been renamed to {}", to, from),
                );
            }
            Self::EnumRemap { .. } | Self::BooleanToEnum { .. } => match self.remap(ctx) {
                Some(remap) => remap.downgrade(transition, source, target, log),
                None => tracing::warn!("Skipping ill-typed transform {:?} in {}", self, transition),
            },
            Self::NewField { field } => {
                if let Some(value) = source.get(field) {
                    log.warning(
                        DiagnosticClass::RemovedField,
                        transition,
                        [field],
                        format!("Removed field {} with value {}", field, value),
                    );
                }
            }
            Self::ListElement { field, introduced } => {
                let Some(FieldValue::Items(items)) = source.get(field) else {
                    return;
                };
                let mut lost: Vec<&str> = Vec::new();
                let mut affected = 0;
                let items = items
                    .iter()
                    .map(|item| {
                        let mut item = item.clone();
                        let mut changed = false;
                        for (name, default) in introduced {
                            if let Some(value) = item.remove(name) {
                                if &value != default {
                                    changed = true;
                                    if !lost.contains(&name.as_str()) {
                                        lost.push(name.as_str());
                                    }
                                }
                            }
                        }
                        if changed {
                            affected += 1;
                        }
                        item
                    })
                    .collect();
                target.set(field.clone(), FieldValue::Items(items));
                if !lost.is_empty() {
                    log.warning(
                        DiagnosticClass::ListAttribute,
                        transition,
                        [field],
                        format!(
                            "Dropped {} from {} item(s) of {}",
                            lost.join(", "),
                            affected,
                            field
                        ),
                    );
                }
            }
            Self::Composite(rule) => (rule.downgrade)(ctx, source, target, log),
        }
    }

    fn remap<'a>(&'a self, ctx: &StepContext<'a>) -> Option<Remap<'a>> {
        match self {
            Self::EnumRemap { from, to, mapping } => {
                let old = enum_of(ctx.older, from)?;
                let new = enum_of(ctx.newer, to)?;
                Some(Remap {
                    from,
                    to,
                    pairs: mapping
                        .resolve(old, new)
                        .into_iter()
                        .map(|(o, n)| (FieldValue::Tag(o), n))
                        .collect(),
                    old_domain: old.tags().iter().cloned().map(FieldValue::Tag).collect(),
                    new_tags: new.tags(),
                })
            }
            Self::BooleanToEnum {
                from,
                to,
                when_false,
                when_true,
            } => {
                let new = enum_of(ctx.newer, to)?;
                Some(Remap {
                    from,
                    to,
                    pairs: vec![
                        (FieldValue::Bool(false), when_false.clone()),
                        (FieldValue::Bool(true), when_true.clone()),
                    ],
                    old_domain: vec![FieldValue::Bool(false), FieldValue::Bool(true)],
                    new_tags: new.tags(),
                })
            }
            _ => None,
        }
    }
}

/// A resolved value correspondence between an older field and a newer
/// enumerated field.
struct Remap<'a> {
    from: &'a str,
    to: &'a str,
    pairs: Vec<(FieldValue, String)>,
    old_domain: Vec<FieldValue>,
    new_tags: &'a [String],
}

impl Remap<'_> {
    fn fields(&self) -> Vec<&str> {
        if self.from == self.to {
            vec![self.from]
        } else {
            vec![self.from, self.to]
        }
    }

    fn upgrade(
        &self,
        transition: Transition,
        source: &Record,
        target: &mut Record,
        log: &mut DiagnosticLog,
    ) -> Result<(), RemovedValue> {
        if self.from != self.to {
            log.info(
                DiagnosticClass::Renamed,
                transition,
                [self.from, self.to],
                format!("Field {} has been renamed to {}", self.from, self.to),
            );
        }
        for tag in self.new_tags {
            if !self.pairs.iter().any(|(_, new)| new == tag) {
                log.info(
                    DiagnosticClass::NewEnumValue,
                    transition,
                    [self.to],
                    format!("Field {} has a new value {}", self.to, tag),
                );
            }
        }

        let current = source.get(self.from);
        let mut outcome = Ok(());
        for value in &self.old_domain {
            if self.pairs.iter().any(|(old, _)| old == value) {
                continue;
            }
            if current == Some(value) {
                log.error(
                    DiagnosticClass::RemovedEnumValueInUse,
                    transition,
                    [self.from],
                    format!("{}::{} is removed and was used", self.from, value),
                );
                outcome = Err(RemovedValue {
                    field: self.from.to_string(),
                    value: value.to_string(),
                });
            } else {
                log.info(
                    DiagnosticClass::DroppedEnumValue,
                    transition,
                    [self.from],
                    format!("{}::{} is removed but was not used", self.from, value),
                );
            }
        }

        if let Some((_, tag)) = current.and_then(|c| self.pairs.iter().find(|(old, _)| old == c)) {
            target.set(self.to, FieldValue::tag(tag.clone()));
        }
        outcome
    }

    fn downgrade(
        &self,
        transition: Transition,
        source: &Record,
        target: &mut Record,
        log: &mut DiagnosticLog,
    ) {
        let Some(tag) = source.get(self.to).and_then(FieldValue::as_tag) else {
            return;
        };
        let seed = target
            .get(self.from)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unset".to_string());

        match self.pairs.iter().find(|(_, new)| new == tag) {
            Some((old, _)) => {
                if target.get(self.from) != Some(old) {
                    log.info(
                        DiagnosticClass::Override,
                        transition,
                        self.fields(),
                        format!(
                            "Overriding {} from {} to {} based on {} value {}",
                            self.from, seed, old, self.to, tag
                        ),
                    );
                    target.set(self.from, old.clone());
                }
            }
            None => {
                log.warning(
                    DiagnosticClass::UnrepresentableDowngrade,
                    transition,
                    self.fields(),
                    format!(
                        "{} value {} cannot be represented at {}; keeping {} = {}",
                        self.to, tag, transition.to, self.from, seed
                    ),
                );
            }
        }
    }
}

fn copy_value(source: &Record, from: &str, target: &mut Record, to: &str) {
    if let Some(value) = source.get(from) {
        target.set(to, value.clone());
    }
}

fn enum_of<'a>(schema: &'a Schema, field: &str) -> Option<&'a EnumSpec> {
    schema.field(field).and_then(FieldKind::as_enum)
}

fn check_copy(from: &str, to: &str, older: &Schema, newer: &Schema, problems: &mut Vec<String>) {
    if let (Some(a), Some(b)) = (older.field(from), newer.field(to)) {
        if !a.is_copy_compatible(b) {
            problems.push(format!(
                "{} ({}) cannot be copied to {} ({})",
                from,
                a.name(),
                to,
                b.name()
            ));
        }
    }
}
