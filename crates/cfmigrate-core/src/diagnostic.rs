//! The per-call diagnostic log.
//!
//! Every migration call creates its own [`DiagnosticLog`] and hands it back
//! to the caller together with the result. Nothing here is shared between
//! calls.

use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Which way a step is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Direction {
    Upgrade,
    Downgrade,
}

/// What kind of change a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum DiagnosticClass {
    Renamed,
    NewField,
    RemovedField,
    NewEnumValue,
    DroppedEnumValue,
    Override,
    RemovedEnumValueInUse,
    UnrepresentableDowngrade,
    ListAttribute,
    Composite,
}

/// The version hop a diagnostic was produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub from: Version,
    pub to: Version,
}

impl Transition {
    pub fn new(from: Version, to: Version) -> Self {
        Self { from, to }
    }

    pub fn direction(&self) -> Direction {
        if self.to >= self.from {
            Direction::Upgrade
        } else {
            Direction::Downgrade
        }
    }

    /// The same hop walked the other way.
    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.from)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub class: DiagnosticClass,
    pub transition: Transition,
    pub fields: Vec<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn involves(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}: {}",
            self.severity,
            self.transition,
            self.fields.join(", "),
            self.message
        )
    }
}

/// Ordered accumulator of diagnostics for one migration call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    fn record<I, S>(
        &mut self,
        severity: Severity,
        class: DiagnosticClass,
        transition: Transition,
        fields: I,
        message: impl Into<String>,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push(Diagnostic {
            severity,
            class,
            transition,
            fields: fields.into_iter().map(Into::into).collect(),
            message: message.into(),
        });
    }

    pub fn info<I, S>(
        &mut self,
        class: DiagnosticClass,
        transition: Transition,
        fields: I,
        message: impl Into<String>,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record(Severity::Info, class, transition, fields, message);
    }

    pub fn warning<I, S>(
        &mut self,
        class: DiagnosticClass,
        transition: Transition,
        fields: I,
        message: impl Into<String>,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record(Severity::Warning, class, transition, fields, message);
    }

    pub fn error<I, S>(
        &mut self,
        class: DiagnosticClass,
        transition: Transition,
        fields: I,
        message: impl Into<String>,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record(Severity::Error, class, transition, fields, message);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity == severity).count()
    }

    pub fn count_class(&self, class: DiagnosticClass) -> usize {
        self.entries.iter().filter(|d| d.class == class).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Entries that name `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.entries.iter().filter(move |d| d.involves(field))
    }

    /// Entries produced in the given hop.
    pub fn for_transition(&self, transition: Transition) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(move |d| d.transition == transition)
    }
}

impl fmt::Display for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DiagnosticLog {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn hop() -> Transition {
        Transition::new(Version::new(3, 4), Version::new(3, 5))
    }

    #[test]
    fn test_direction_follows_version_order() {
        assert_eq!(hop().direction(), Direction::Upgrade);
        assert_eq!(hop().reversed().direction(), Direction::Downgrade);
        assert_eq!(hop().to_string(), "3.4 -> 3.5");
    }

    #[test]
    fn test_counts_by_severity() {
        let mut log = DiagnosticLog::new();
        log.info(DiagnosticClass::NewField, hop(), ["Language"], "New field Language with value Cpp");
        log.warning(
            DiagnosticClass::RemovedField,
            hop().reversed(),
            ["DisableFormat"],
            "Removed field DisableFormat with value true",
        );
        log.info(
            DiagnosticClass::Renamed,
            hop(),
            ["PointerBindsToType", "PointerAlignment"],
            "renamed",
        );

        assert_eq!(log.count(Severity::Info), 2);
        assert_eq!(log.count(Severity::Warning), 1);
        assert!(!log.has_errors());
        assert_eq!(log.for_field("PointerAlignment").count(), 1);
        assert_eq!(log.for_transition(hop()).count(), 2);
        assert_eq!(log.count_class(DiagnosticClass::Renamed), 1);
    }

    #[test]
    fn test_display_one_line_per_entry() {
        let mut log = DiagnosticLog::new();
        log.error(
            DiagnosticClass::RemovedEnumValueInUse,
            hop(),
            ["Standard"],
            "removed and was used",
        );
        assert_eq!(
            log.to_string(),
            "[Error] 3.4 -> 3.5: Standard: removed and was used\n"
        );
    }

    #[test]
    fn test_severity_order() {
        let all: Vec<Severity> = Severity::iter().collect();
        assert_eq!(all, vec![Severity::Info, Severity::Warning, Severity::Error]);
        assert!(Severity::Error > Severity::Warning);
    }
}
