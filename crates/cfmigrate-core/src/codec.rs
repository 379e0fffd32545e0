//! The textual codec contract.

use crate::error::Result;
use crate::record::Record;
use crate::version::Version;
use std::fmt::Debug;

/// Converts between configuration text and [`Record`]s of a given version.
pub trait StyleCodec: Send + Sync + Debug {
    /// Decodes `text` as a configuration of `version`.
    ///
    /// Fields absent from the text take their values from the base preset:
    /// the one the document names itself, else `fallback_preset`, else the
    /// catalog default. Unknown fields or values are a decode failure.
    fn decode_with_fallback(
        &self,
        version: Version,
        text: &str,
        fallback_preset: Option<&str>,
    ) -> Result<Record>;

    /// Renders a record, relative to `preset` when `skip_defaulted_fields`
    /// is set (only values differing from the preset are written).
    fn encode(&self, record: &Record, preset: &str, skip_defaulted_fields: bool)
    -> Result<String>;

    /// The style name the selected document of `text` declares it is based
    /// on, read with the document rules of `version`.
    fn style_hint(&self, version: Version, text: &str) -> Option<String>;

    fn decode(&self, version: Version, text: &str) -> Result<Record> {
        self.decode_with_fallback(version, text, None)
    }
}
