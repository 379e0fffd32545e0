#![allow(dead_code)]

use cfmigrate_core::{DiagnosticClass, DiagnosticLog, FieldValue, Record, Version};
use cfmigrate_infrastructure::migration::{
    CompositeRule, FieldTransform, MigrationChain, MigrationManager, StepContext, StepMigrator,
    TagMapping,
};
use cfmigrate_infrastructure::{ClangFormatYamlCodec, TomlCatalog};
use std::sync::Arc;

/// Two booleans that later collapse into one enumeration.
pub const V1_0: &str = r#"
version = "1.0"
release = "1.0.0"
default_preset = "base"
styles = ["base", "wide"]

[fields]
ColumnLimit = "unsigned"
Standard = { enum = ["Cpp03", "Cpp11", "Auto"] }
AllowShortBlocks = "bool"
AllowShortEmptyBlocks = "bool"
IncludeCategories = { items = { Regex = "string", Priority = "int" } }

[preset.base.values]
ColumnLimit = 80
Standard = "Cpp11"
AllowShortBlocks = false
AllowShortEmptyBlocks = true
IncludeCategories = [{ Regex = "^<.*", Priority = 1 }]

[preset.wide]
based_on = "base"

[preset.wide.values]
ColumnLimit = 120
Standard = "Auto"
"#;

/// `ShortBlocks` replaces both booleans and `Standard` gains `Latest`.
pub const V1_1: &str = r#"
version = "1.1"
release = "1.1.0"
default_preset = "base"
styles = ["base", "wide"]

[fields]
ColumnLimit = "unsigned"
Standard = { enum = ["Cpp03", "Cpp11", "Auto", "Latest"] }
ShortBlocks = { enum = ["Never", "Empty", "Always"] }
IncludeCategories = { items = { Regex = "string", Priority = "int" } }

[preset.base.values]
ColumnLimit = 80
Standard = "Cpp11"
ShortBlocks = "Empty"
IncludeCategories = [{ Regex = "^<.*", Priority = 1 }]

[preset.wide]
based_on = "base"

[preset.wide.values]
ColumnLimit = 120
Standard = "Auto"
"#;

/// `Standard` drops `Cpp03`; include categories gain `SortPriority`.
pub const V1_2: &str = r#"
version = "1.2"
release = "1.2.1"
default_preset = "base"
styles = ["base", "wide"]

[fields]
ColumnLimit = "unsigned"
Standard = { enum = ["Cpp11", "Auto", "Latest"] }
ShortBlocks = { enum = ["Never", "Empty", "Always"] }
IncludeCategories = { items = { Regex = "string", Priority = "int", SortPriority = "int" } }

[preset.base.values]
ColumnLimit = 80
Standard = "Latest"
ShortBlocks = "Empty"
IncludeCategories = [{ Regex = "^<.*", Priority = 1 }]

[preset.wide]
based_on = "base"

[preset.wide.values]
ColumnLimit = 120
Standard = "Auto"
"#;

pub fn v(major: u16, minor: u16) -> Version {
    Version::new(major, minor)
}

pub fn catalog() -> Arc<TomlCatalog> {
    Arc::new(TomlCatalog::from_documents(&[V1_0, V1_1, V1_2]).expect("fixture catalog is valid"))
}

fn short_blocks_rule() -> CompositeRule {
    CompositeRule {
        name: "ShortBlocks",
        reads: vec![
            "AllowShortBlocks".to_string(),
            "AllowShortEmptyBlocks".to_string(),
        ],
        writes: vec!["ShortBlocks".to_string()],
        upgrade: upgrade_short_blocks,
        downgrade: downgrade_short_blocks,
    }
}

fn upgrade_short_blocks(
    ctx: &StepContext<'_>,
    source: &Record,
    target: &mut Record,
    log: &mut DiagnosticLog,
) {
    let blocks = source.get("AllowShortBlocks").and_then(FieldValue::as_bool);
    let empty = source.get("AllowShortEmptyBlocks").and_then(FieldValue::as_bool);
    let tag = match (blocks, empty) {
        (Some(true), _) => "Always",
        (_, Some(true)) => "Empty",
        _ => "Never",
    };
    target.set("ShortBlocks", FieldValue::tag(tag));
    log.info(
        DiagnosticClass::Composite,
        ctx.transition,
        ["AllowShortBlocks", "AllowShortEmptyBlocks", "ShortBlocks"],
        format!("ShortBlocks set to {}", tag),
    );
}

fn downgrade_short_blocks(
    _ctx: &StepContext<'_>,
    source: &Record,
    target: &mut Record,
    _log: &mut DiagnosticLog,
) {
    let (blocks, empty) = match source.get("ShortBlocks").and_then(FieldValue::as_tag) {
        Some("Always") => (true, true),
        Some("Empty") => (false, true),
        Some("Never") => (false, false),
        _ => return,
    };
    target.set("AllowShortBlocks", FieldValue::Bool(blocks));
    target.set("AllowShortEmptyBlocks", FieldValue::Bool(empty));
}

pub fn steps() -> Vec<StepMigrator> {
    vec![
        StepMigrator::new(v(1, 0), v(1, 1), "ShortBlocks")
            .copy_same(["ColumnLimit", "IncludeCategories"])
            .with(FieldTransform::enum_remap("Standard", TagMapping::by_name()))
            .with(FieldTransform::composite(short_blocks_rule())),
        StepMigrator::new(v(1, 1), v(1, 2), "SortPriority, Standard without Cpp03")
            .copy_same(["ColumnLimit", "ShortBlocks"])
            .with(FieldTransform::enum_remap("Standard", TagMapping::by_name()))
            .with(FieldTransform::list_element(
                "IncludeCategories",
                [("SortPriority", FieldValue::Int(0))],
            )),
    ]
}

pub fn chain() -> MigrationChain {
    let mut chain = MigrationChain::new();
    for step in steps() {
        chain.register(Arc::new(step));
    }
    chain
}

pub fn manager() -> MigrationManager {
    let catalog = catalog();
    MigrationManager::builder()
        .with_codec(Arc::new(ClangFormatYamlCodec::new(catalog.clone())))
        .with_catalog(catalog)
        .with_chain(chain())
        .build()
        .expect("fixture manager is valid")
}

pub fn preset(version: Version, name: &str) -> Record {
    use cfmigrate_core::SchemaCatalog;
    catalog()
        .preset_defaults(version, name, None)
        .expect("fixture preset exists")
}
