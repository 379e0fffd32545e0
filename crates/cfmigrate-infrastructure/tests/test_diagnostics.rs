mod common;

use cfmigrate_core::{DiagnosticClass, FieldValue, MigrationError, SchemaCatalog, Severity, Transition};
use cfmigrate_infrastructure::{build_migration_manager, builtin_catalog};
use common::{chain, preset, v};

#[test]
fn test_removed_value_in_use_fails_with_one_error() {
    let chain = chain();
    let catalog = common::catalog();
    let record = preset(v(1, 0), "base").with("Standard", FieldValue::tag("Cpp03"));

    let err = chain
        .migrate(catalog.as_ref(), v(1, 0), v(1, 2), record, None, "base")
        .unwrap_err();

    match &err {
        MigrationError::RemovedEnumValueInUse {
            transition,
            field,
            value,
            diagnostics,
        } => {
            assert_eq!(*transition, Transition::new(v(1, 1), v(1, 2)));
            assert_eq!(field, "Standard");
            assert_eq!(value, "Cpp03");
            assert_eq!(diagnostics.count(Severity::Error), 1);
            assert_eq!(diagnostics.count(Severity::Warning), 0);
            // the first hop's notices are kept
            assert_eq!(
                diagnostics
                    .for_transition(Transition::new(v(1, 0), v(1, 1)))
                    .filter(|d| d.class == DiagnosticClass::NewEnumValue)
                    .count(),
                1
            );
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_added_value_is_an_info() {
    let chain = chain();
    let catalog = common::catalog();
    let record = preset(v(1, 0), "base").with("Standard", FieldValue::tag("Cpp03"));

    let (upgraded, log) = chain
        .migrate(catalog.as_ref(), v(1, 0), v(1, 1), record, None, "base")
        .unwrap();

    assert_eq!(upgraded.get("Standard"), Some(&FieldValue::tag("Cpp03")));
    let added: Vec<_> = log
        .iter()
        .filter(|d| d.class == DiagnosticClass::NewEnumValue)
        .collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].severity, Severity::Info);
    assert!(added[0].message.contains("Latest"));
    assert!(!log.has_errors());
}

#[test]
fn test_unused_removed_value_is_an_info() {
    let chain = chain();
    let catalog = common::catalog();

    let (_, log) = chain
        .migrate(catalog.as_ref(), v(1, 1), v(1, 2), preset(v(1, 1), "base"), None, "base")
        .unwrap();

    let dropped: Vec<_> = log
        .iter()
        .filter(|d| d.class == DiagnosticClass::DroppedEnumValue)
        .collect();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].severity, Severity::Info);
    assert!(dropped[0].message.contains("Cpp03"));
}

#[test]
fn test_every_new_field_is_announced() {
    let catalog = builtin_catalog().unwrap();
    let manager = build_migration_manager().unwrap();
    let older = catalog.schema(v(3, 7)).unwrap();
    let newer = catalog.schema(v(3, 8)).unwrap();
    let new_fields: Vec<&str> = newer.field_names().filter(|f| !older.contains(f)).collect();

    let record = catalog.preset_defaults(v(3, 7), "llvm", None).unwrap();
    let (_, log) = manager
        .migrate_record(v(3, 7), v(3, 8), record, None, "llvm")
        .unwrap();

    assert_eq!(log.count_class(DiagnosticClass::NewField), new_fields.len());
    for field in new_fields {
        assert!(
            log.for_field(field)
                .any(|d| d.class == DiagnosticClass::NewField && d.severity == Severity::Info),
            "{} was not announced",
            field
        );
    }
}

#[test]
fn test_pointer_binding_becomes_alignment() {
    let catalog = builtin_catalog().unwrap();
    let manager = build_migration_manager().unwrap();
    let record = catalog
        .preset_defaults(v(3, 4), "google", None)
        .unwrap()
        .with("PointerBindsToType", true);

    let (upgraded, log) = manager
        .migrate_record(v(3, 4), v(3, 5), record.clone(), None, "google")
        .unwrap();
    assert_eq!(upgraded.get("PointerAlignment"), Some(&FieldValue::tag("Left")));
    assert!(!upgraded.contains("PointerBindsToType"));

    let notices: Vec<_> = log.for_field("PointerBindsToType").collect();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Info);
    assert_eq!(notices[0].class, DiagnosticClass::Renamed);

    let (back, log) = manager
        .migrate_record(v(3, 5), v(3, 4), upgraded, None, "google")
        .unwrap();
    assert_eq!(back.get("PointerBindsToType"), Some(&FieldValue::Bool(true)));
    assert_eq!(log.for_field("PointerBindsToType").count(), 0);
    assert_eq!(log.for_field("PointerAlignment").count(), 0);
}

#[test]
fn test_downgrade_to_a_different_style_reports_overrides() {
    let catalog = builtin_catalog().unwrap();
    let manager = build_migration_manager().unwrap();
    let record = catalog
        .preset_defaults(v(3, 5), "llvm", None)
        .unwrap()
        .with("PointerAlignment", FieldValue::tag("Left"));

    let (back, log) = manager
        .migrate_record(v(3, 5), v(3, 4), record, None, "llvm")
        .unwrap();
    assert_eq!(back.get("PointerBindsToType"), Some(&FieldValue::Bool(true)));
    let overrides: Vec<_> = log
        .for_field("PointerBindsToType")
        .filter(|d| d.class == DiagnosticClass::Override)
        .collect();
    assert_eq!(overrides.len(), 1);
    assert!(overrides[0].message.contains("Left"));
}

#[test]
fn test_middle_alignment_cannot_go_back() {
    let catalog = builtin_catalog().unwrap();
    let manager = build_migration_manager().unwrap();
    let record = catalog
        .preset_defaults(v(3, 5), "google", None)
        .unwrap()
        .with("PointerAlignment", FieldValue::tag("Middle"));

    let (back, log) = manager
        .migrate_record(v(3, 5), v(3, 4), record, None, "google")
        .unwrap();

    assert_eq!(back.get("PointerBindsToType"), Some(&FieldValue::Bool(true)));
    let warnings: Vec<_> = log
        .for_field("PointerAlignment")
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].class, DiagnosticClass::UnrepresentableDowngrade);
}
