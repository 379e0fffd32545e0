//! 3.7 -> 3.8: custom brace wrapping, include sorting, and the return
//! type breaking option that also covers declarations.

use crate::migration::step::StepMigrator;
use crate::migration::transform::{CompositeRule, FieldTransform, StepContext, TagMapping};
use cfmigrate_core::{DiagnosticClass, DiagnosticLog, FieldValue, Record, Version};

const SHARED: &[&str] = &[
    "AccessModifierOffset",
    "AlignConsecutiveAssignments",
    "AlignEscapedNewlinesLeft",
    "AlignOperands",
    "AlignTrailingComments",
    "AllowAllParametersOfDeclarationOnNextLine",
    "AllowShortBlocksOnASingleLine",
    "AllowShortCaseLabelsOnASingleLine",
    "AllowShortFunctionsOnASingleLine",
    "AllowShortIfStatementsOnASingleLine",
    "AllowShortLoopsOnASingleLine",
    "AlwaysBreakAfterDefinitionReturnType",
    "AlwaysBreakBeforeMultilineStrings",
    "AlwaysBreakTemplateDeclarations",
    "BinPackArguments",
    "BinPackParameters",
    "BreakBeforeBinaryOperators",
    "BreakBeforeTernaryOperators",
    "BreakConstructorInitializersBeforeComma",
    "ColumnLimit",
    "CommentPragmas",
    "ConstructorInitializerAllOnOneLineOrOnePerLine",
    "ConstructorInitializerIndentWidth",
    "ContinuationIndentWidth",
    "Cpp11BracedListStyle",
    "DerivePointerAlignment",
    "DisableFormat",
    "ExperimentalAutoDetectBinPacking",
    "ForEachMacros",
    "IndentCaseLabels",
    "IndentWidth",
    "IndentWrappedFunctionNames",
    "KeepEmptyLinesAtTheStartOfBlocks",
    "Language",
    "MacroBlockBegin",
    "MacroBlockEnd",
    "MaxEmptyLinesToKeep",
    "NamespaceIndentation",
    "ObjCBlockIndentWidth",
    "ObjCSpaceAfterProperty",
    "ObjCSpaceBeforeProtocolList",
    "PenaltyBreakBeforeFirstCallParameter",
    "PenaltyBreakComment",
    "PenaltyBreakFirstLessLess",
    "PenaltyBreakString",
    "PenaltyExcessCharacter",
    "PenaltyReturnTypeOnItsOwnLine",
    "PointerAlignment",
    "SpaceAfterCStyleCast",
    "SpaceBeforeAssignmentOperators",
    "SpaceBeforeParens",
    "SpaceInEmptyParentheses",
    "SpacesBeforeTrailingComments",
    "SpacesInAngles",
    "SpacesInCStyleCastParentheses",
    "SpacesInContainerLiterals",
    "SpacesInParentheses",
    "SpacesInSquareBrackets",
    "Standard",
    "TabWidth",
    "UseTab",
];

const INTRODUCED: &[&str] = &[
    "AlignConsecutiveDeclarations",
    "BraceWrapping.AfterClass",
    "BraceWrapping.AfterControlStatement",
    "BraceWrapping.AfterEnum",
    "BraceWrapping.AfterFunction",
    "BraceWrapping.AfterNamespace",
    "BraceWrapping.AfterObjCDeclaration",
    "BraceWrapping.AfterStruct",
    "BraceWrapping.AfterUnion",
    "BraceWrapping.BeforeCatch",
    "BraceWrapping.BeforeElse",
    "BraceWrapping.IndentBraces",
    "BreakAfterJavaFieldAnnotations",
    "IncludeCategories",
    "ReflowComments",
    "SortIncludes",
];

const DEFINITION: &str = "AlwaysBreakAfterDefinitionReturnType";
const RETURN_TYPE: &str = "AlwaysBreakAfterReturnType";

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(3, 7),
        Version::new(3, 8),
        "BraceWrapping, IncludeCategories, AlwaysBreakAfterReturnType",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::boolean_to_enum(
        "AlignAfterOpenBracket",
        "AlignAfterOpenBracket",
        "DontAlign",
        "Align",
    ))
    .with(FieldTransform::enum_remap("BreakBeforeBraces", TagMapping::by_name()))
    .with(FieldTransform::composite(return_type_rule()))
    .new_fields(INTRODUCED.iter().copied())
}

/// Derives AlwaysBreakAfterReturnType from the definition-only option.
///
/// Runs after the definition field itself has been copied, so on the way
/// down it can overwrite what the copy produced.
fn return_type_rule() -> CompositeRule {
    CompositeRule {
        name: "AlwaysBreakAfterReturnType",
        reads: vec![DEFINITION.to_string()],
        writes: vec![RETURN_TYPE.to_string()],
        upgrade: upgrade_return_type,
        downgrade: downgrade_return_type,
    }
}

fn upgrade_return_type(
    ctx: &StepContext<'_>,
    source: &Record,
    target: &mut Record,
    log: &mut DiagnosticLog,
) {
    let derived = match source.get(DEFINITION).and_then(FieldValue::as_tag) {
        Some("All") => Some("AllDefinitions"),
        Some("TopLevel") => Some("TopLevelDefinitions"),
        _ => None,
    };

    let Some(derived) = derived else {
        let seeded = target
            .get(RETURN_TYPE)
            .map(|v| v.to_string())
            .unwrap_or_default();
        log.info(
            DiagnosticClass::NewField,
            ctx.transition,
            [RETURN_TYPE],
            format!("New field {} with value {}", RETURN_TYPE, seeded),
        );
        return;
    };

    let previous = target.set(RETURN_TYPE, FieldValue::tag(derived));
    let message = if previous.as_ref().and_then(FieldValue::as_tag) == Some(derived) {
        format!("{} is {} as implied by {}", RETURN_TYPE, derived, DEFINITION)
    } else {
        format!("{} set to {} from {}", RETURN_TYPE, derived, DEFINITION)
    };
    log.info(
        DiagnosticClass::Composite,
        ctx.transition,
        [DEFINITION, RETURN_TYPE],
        message,
    );
}

fn downgrade_return_type(
    ctx: &StepContext<'_>,
    source: &Record,
    target: &mut Record,
    log: &mut DiagnosticLog,
) {
    let Some(value) = source.get(RETURN_TYPE).and_then(FieldValue::as_tag) else {
        return;
    };
    let definition = match value {
        "AllDefinitions" => "All",
        "TopLevelDefinitions" => "TopLevel",
        "None" => return,
        other => {
            let kept = target
                .get(DEFINITION)
                .map(|v| v.to_string())
                .unwrap_or_default();
            log.warning(
                DiagnosticClass::UnrepresentableDowngrade,
                ctx.transition,
                [RETURN_TYPE, DEFINITION],
                format!(
                    "{} {} also breaks after declarations and cannot be expressed; {} stays {}",
                    RETURN_TYPE, other, DEFINITION, kept
                ),
            );
            return;
        }
    };

    let previous = target.set(DEFINITION, FieldValue::tag(definition));
    if previous.as_ref().and_then(FieldValue::as_tag) != Some(definition) {
        log.info(
            DiagnosticClass::Override,
            ctx.transition,
            [RETURN_TYPE, DEFINITION],
            format!("{} set to {} from {} {}", DEFINITION, definition, RETURN_TYPE, value),
        );
    }
}
