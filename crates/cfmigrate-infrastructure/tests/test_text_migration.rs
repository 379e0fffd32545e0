mod common;

use cfmigrate_core::{FieldValue, MigrationError, SchemaCatalog, Severity, StyleCodec};
use cfmigrate_infrastructure::build_migration_manager;
use common::{manager, v};

const GOOGLE_3_4: &str = "\
# project style
BasedOnStyle: Google
ColumnLimit: 100
PointerBindsToType: false
DerivePointerBinding: false
";

#[test]
fn test_upgrade_text_to_latest() {
    let manager = build_migration_manager().unwrap();
    let outcome = manager
        .migrate_to(v(3, 4), v(3, 8), GOOGLE_3_4, "llvm", true)
        .unwrap();

    assert_eq!(outcome.style, "google");
    assert_eq!(outcome.record.version(), v(3, 8));
    assert!(outcome.text.starts_with("---\nLanguage: Cpp\nBasedOnStyle: google\n"));
    assert!(outcome.text.contains("ColumnLimit: 100\n"));
    assert!(outcome.text.contains("PointerAlignment: Right\n"));
    assert!(outcome.text.contains("DerivePointerAlignment: false\n"));
    assert!(!outcome.text.contains("PointerBindsToType"));
    assert!(outcome.text.ends_with("...\n"));
    assert!(!outcome.diagnostics.has_errors());

    // the output reads back as the same record
    let decoded = manager.codec().decode(v(3, 8), &outcome.text).unwrap();
    assert_eq!(decoded, outcome.record);
}

#[test]
fn test_downgrade_text_warns_about_new_fields() {
    let manager = build_migration_manager().unwrap();
    let text = "BasedOnStyle: LLVM\nSortIncludes: false\nColumnLimit: 90\n";
    let outcome = manager
        .migrate_to(v(3, 8), v(3, 7), text, "llvm", false)
        .unwrap();

    assert!(!outcome.text.contains("SortIncludes"));
    assert!(outcome.text.contains("ColumnLimit: 90\n"));
    assert!(
        outcome
            .diagnostics
            .for_field("SortIncludes")
            .any(|d| d.severity == Severity::Warning)
    );
}

#[test]
fn test_preset_argument_is_used_without_based_on_style() {
    let manager = build_migration_manager().unwrap();
    let outcome = manager
        .migrate_to(v(3, 5), v(3, 6), "IndentWidth: 4\n", "Mozilla", true)
        .unwrap();

    assert_eq!(outcome.style, "mozilla");
    assert_eq!(outcome.record.get("IndentWidth"), Some(&FieldValue::Int(4)));
    assert!(outcome.text.contains("BasedOnStyle: mozilla\n"));
}

#[test]
fn test_style_comes_from_the_selected_document() {
    let manager = build_migration_manager().unwrap();
    let text = "\
---
Language: Java
BasedOnStyle: Google
---
Language: Cpp
BasedOnStyle: Mozilla
...
";
    let outcome = manager
        .migrate_to(v(3, 7), v(3, 8), text, "llvm", true)
        .unwrap();

    assert_eq!(outcome.style, "mozilla");
    assert!(outcome.text.contains("BasedOnStyle: mozilla\n"));

    // fields new in 3.8 are seeded from the Cpp document's style
    let mozilla = manager
        .catalog()
        .preset_defaults(v(3, 8), "mozilla", None)
        .unwrap();
    for name in ["BraceWrapping.AfterClass", "IncludeCategories", "SortIncludes"] {
        assert_eq!(outcome.record.get(name), mozilla.get(name), "{}", name);
    }
    assert_ne!(
        outcome.record.get("IncludeCategories"),
        manager
            .catalog()
            .preset_defaults(v(3, 8), "google", None)
            .unwrap()
            .get("IncludeCategories")
    );
}

#[test]
fn test_style_missing_at_an_older_version_fails_up_front() {
    let manager = build_migration_manager().unwrap();
    let err = manager
        .migrate_to(v(3, 5), v(3, 4), "BasedOnStyle: GNU\n", "gnu", false)
        .unwrap_err();
    assert!(err.is_unknown_preset());
}

#[test]
fn test_same_version_text_is_normalized() {
    let manager = build_migration_manager().unwrap();
    let outcome = manager
        .migrate_to(v(3, 6), v(3, 6), "BasedOnStyle: WebKit\nUseTab: true\n", "llvm", true)
        .unwrap();

    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.style, "webkit");
    assert!(outcome.text.contains("UseTab: Always\n"));
}

#[test]
fn test_compatible_versions_end_to_end() {
    let manager = build_migration_manager().unwrap();
    let since = |first| {
        manager
            .versions()
            .iter()
            .copied()
            .filter(|version| *version >= first)
            .collect::<Vec<_>>()
    };

    assert_eq!(manager.compatible_versions(GOOGLE_3_4), since(v(3, 4)));
    assert_eq!(
        manager.compatible_versions("BasedOnStyle: GNU\nBreakBeforeBraces: GNU\n"),
        since(v(3, 5))
    );
    assert_eq!(
        manager.compatible_versions("AlwaysBreakAfterReturnType: TopLevelDefinitions\n"),
        since(v(3, 8))
    );
    assert_eq!(
        manager.compatible_versions("BasedOnStyle: Microsoft\nSortIncludes: CaseSensitive\n"),
        since(v(13, 0))
    );
    assert!(manager.compatible_versions("NotAnOption: 1\n").is_empty());
}

#[test]
fn test_fixture_text_migration() {
    let manager = manager();
    let outcome = manager
        .migrate_to(
            v(1, 0),
            v(1, 2),
            "BasedOnStyle: wide\nAllowShortBlocks: true\nIncludeCategories:\n  - Regex: '^<'\n    Priority: 2\n",
            "base",
            true,
        )
        .unwrap();

    assert_eq!(outcome.style, "wide");
    assert_eq!(outcome.record.get("ShortBlocks"), Some(&FieldValue::tag("Always")));
    assert!(outcome.text.contains("ShortBlocks: Always\n"));
    assert!(outcome.text.contains("SortPriority: 0"));

    let err = manager
        .migrate_to(v(1, 0), v(1, 2), "Standard: Cpp03\n", "base", false)
        .unwrap_err();
    assert!(err.is_removed_enum_value());
    assert!(matches!(err, MigrationError::RemovedEnumValueInUse { .. }));
}
