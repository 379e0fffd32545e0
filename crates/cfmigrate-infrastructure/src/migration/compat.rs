//! Which versions could have written a given document.

use cfmigrate_core::{SchemaCatalog, StyleCodec, Version};

/// Tries every version of the catalog by decoding the text with it.
///
/// Read-only: nothing is migrated and nothing is logged to a diagnostic log.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityDetector<'a> {
    catalog: &'a dyn SchemaCatalog,
    codec: &'a dyn StyleCodec,
}

impl<'a> CompatibilityDetector<'a> {
    pub fn new(catalog: &'a dyn SchemaCatalog, codec: &'a dyn StyleCodec) -> Self {
        Self { catalog, codec }
    }

    /// Versions that accept every key and value of `text`, ascending.
    ///
    /// Versions without a textual format are never reported.
    pub fn compatible_versions(&self, text: &str) -> Vec<Version> {
        self.catalog
            .versions()
            .iter()
            .copied()
            .filter(|version| self.accepts(*version, text))
            .collect()
    }

    fn accepts(&self, version: Version, text: &str) -> bool {
        let serializable = self
            .catalog
            .schema(version)
            .is_some_and(|schema| schema.is_serializable());
        if !serializable {
            return false;
        }

        match self.codec.decode(version, text) {
            Ok(_) => {
                tracing::debug!("Decoded at {}: compatible", version);
                true
            }
            Err(e) => {
                tracing::debug!("Not decodable at {}: {}", version, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::codec::ClangFormatYamlCodec;

    fn v(major: u16, minor: u16) -> Version {
        Version::new(major, minor)
    }

    /// Every built-in version from `first` on.
    fn since(first: Version) -> Vec<Version> {
        let catalog = builtin_catalog().unwrap();
        catalog.versions().iter().copied().filter(|v| *v >= first).collect()
    }

    fn detect(text: &str) -> Vec<Version> {
        let catalog = builtin_catalog().unwrap();
        let codec = ClangFormatYamlCodec::new(catalog.clone());
        CompatibilityDetector::new(catalog.as_ref(), &codec).compatible_versions(text)
    }

    #[test]
    fn test_legacy_pointer_option() {
        // accepted as-is at 3.4, and under its old name from 3.5 on
        let versions = detect("PointerBindsToType: true\n");
        assert_eq!(versions, since(v(3, 4)));
        assert_eq!(versions.last(), Some(&v(14, 0)));
    }

    #[test]
    fn test_new_option_narrows_range() {
        assert_eq!(detect("SortIncludes: false\n"), since(v(3, 8)));
        assert_eq!(detect("Language: Java\nColumnLimit: 100\n"), since(v(3, 6)));
        assert_eq!(detect("PackConstructorInitializers: NextLine\n"), vec![v(14, 0)]);
    }

    #[test]
    fn test_new_enum_value_narrows_range() {
        assert_eq!(
            detect("UseTab: ForContinuationAndIndentation\n"),
            since(v(3, 7))
        );
        assert_eq!(detect("Standard: c++17\n"), since(v(10, 0)));
        assert_eq!(detect("BreakBeforeBraces: GNU\n").first(), Some(&v(3, 5)));
    }

    #[test]
    fn test_style_only_accepted_later() {
        assert_eq!(detect("BasedOnStyle: gnu\n").first(), Some(&v(3, 5)));
    }

    #[test]
    fn test_nothing_matches() {
        assert!(detect("NoSuchOption: 1\n").is_empty());
        assert!(detect("ColumnLimit: [1, 2]\n").is_empty());
    }

    #[test]
    fn test_empty_document_fits_every_textual_version() {
        // 3.3 has no configuration file
        assert_eq!(detect("").len(), 17);
        assert_eq!(detect("---\n...\n").first(), Some(&v(3, 4)));
    }
}
