mod common;

use cfmigrate_core::{DiagnosticClass, FieldValue, SchemaCatalog, Severity};
use cfmigrate_infrastructure::builtin_catalog;
use cfmigrate_infrastructure::migration::{MigrationChain, builtin_steps};
use common::{chain, preset, v};
use std::sync::Arc;

fn builtin_chain() -> MigrationChain {
    let mut chain = MigrationChain::new();
    for step in builtin_steps() {
        chain.register(Arc::new(step));
    }
    chain
}

#[test]
fn test_fixture_presets_survive_a_round_trip() {
    let chain = chain();
    let catalog = common::catalog();

    for name in ["base", "wide"] {
        let original = preset(v(1, 0), name);
        let (upgraded, log) = chain
            .migrate(catalog.as_ref(), v(1, 0), v(1, 2), original.clone(), None, name)
            .unwrap();
        assert_eq!(log.count(Severity::Warning), 0);

        let (back, log) = chain
            .migrate(catalog.as_ref(), v(1, 2), v(1, 0), upgraded, None, name)
            .unwrap();
        assert_eq!(back, original, "{} should come back unchanged", name);
        assert_eq!(log.count(Severity::Warning), 0);
    }
}

#[test]
fn test_collapsed_booleans_are_the_known_lossy_case() {
    let chain = chain();
    let catalog = common::catalog();
    let original = preset(v(1, 0), "base")
        .with("AllowShortBlocks", true)
        .with("AllowShortEmptyBlocks", false);

    let (upgraded, _) = chain
        .migrate(catalog.as_ref(), v(1, 0), v(1, 1), original.clone(), None, "base")
        .unwrap();
    assert_eq!(upgraded.get("ShortBlocks"), Some(&FieldValue::tag("Always")));

    let (back, _) = chain
        .migrate(catalog.as_ref(), v(1, 1), v(1, 0), upgraded, None, "base")
        .unwrap();
    assert_eq!(back.diff(&original), vec!["AllowShortEmptyBlocks".to_string()]);
    assert_eq!(back.get("AllowShortEmptyBlocks"), Some(&FieldValue::Bool(true)));
}

#[test]
fn test_builtin_presets_survive_every_boundary() {
    let catalog = builtin_catalog().unwrap();
    let chain = builtin_chain();

    for pair in catalog.versions().windows(2) {
        let (older, newer) = (pair[0], pair[1]);
        let shared: Vec<&String> = catalog
            .accepted_preset_names(older)
            .iter()
            .filter(|name| catalog.accepted_preset_names(newer).contains(*name))
            .collect();

        for name in shared {
            if older == v(3, 7) && name == "mozilla" {
                continue;
            }
            let original = catalog.preset_defaults(older, name, None).unwrap();
            let (upgraded, _) = chain
                .migrate(catalog.as_ref(), older, newer, original.clone(), None, name)
                .unwrap();
            let (back, log) = chain
                .migrate(catalog.as_ref(), newer, older, upgraded, None, name)
                .unwrap();

            assert_eq!(
                back.diff(&original),
                Vec::<String>::new(),
                "{} at {} changed across {}",
                name,
                older,
                newer
            );
            // dropping the newer version's own fields is the only loss
            assert_eq!(
                log.count(Severity::Warning),
                log.count_class(DiagnosticClass::RemovedField),
                "{} {} -> {}",
                name,
                newer,
                older
            );
        }
    }
}

#[test]
fn test_mozilla_definition_return_type_is_not_restored() {
    let catalog = builtin_catalog().unwrap();
    let chain = builtin_chain();
    let original = catalog.preset_defaults(v(3, 7), "mozilla", None).unwrap();
    assert_eq!(
        original.get("AlwaysBreakAfterDefinitionReturnType"),
        Some(&FieldValue::tag("None"))
    );

    let (upgraded, _) = chain
        .migrate(catalog.as_ref(), v(3, 7), v(3, 8), original.clone(), None, "mozilla")
        .unwrap();
    assert_eq!(
        upgraded.get("AlwaysBreakAfterReturnType"),
        Some(&FieldValue::tag("TopLevelDefinitions"))
    );

    let (back, log) = chain
        .migrate(catalog.as_ref(), v(3, 8), v(3, 7), upgraded, None, "mozilla")
        .unwrap();
    assert_eq!(
        back.diff(&original),
        vec!["AlwaysBreakAfterDefinitionReturnType".to_string()]
    );
    assert_eq!(
        back.get("AlwaysBreakAfterDefinitionReturnType"),
        Some(&FieldValue::tag("TopLevel"))
    );
    assert_eq!(log.count_class(DiagnosticClass::Override), 1);
}

#[test]
fn test_java_sections_survive_the_whole_range() {
    let catalog = builtin_catalog().unwrap();
    let chain = builtin_chain();
    let (first, last) = (v(3, 6), v(14, 0));

    for name in ["google", "chromium"] {
        let original = catalog.preset_defaults(first, name, Some("Java")).unwrap();
        assert_eq!(original.language(), Some("Java"));

        let (upgraded, log) = chain
            .migrate(catalog.as_ref(), first, last, original.clone(), None, name)
            .unwrap();
        assert_eq!(log.count(Severity::Warning), 0);
        // carried Java values win over the newer base preset
        let java = catalog.preset_defaults(last, name, Some("Java")).unwrap();
        assert_eq!(upgraded.language(), Some("Java"));
        assert_eq!(upgraded.get("ColumnLimit"), java.get("ColumnLimit"));
        assert_eq!(
            upgraded.get("ColumnLimit"),
            original.get("ColumnLimit"),
            "{}",
            name
        );

        let (back, log) = chain
            .migrate(catalog.as_ref(), last, first, upgraded, None, name)
            .unwrap();
        assert_eq!(back.diff(&original), Vec::<String>::new(), "{}", name);
        assert_eq!(
            log.count(Severity::Warning),
            log.count_class(DiagnosticClass::RemovedField)
        );
    }
}
