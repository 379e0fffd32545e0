//! 6.0 -> 7.0: raw string formats match several delimiters and enclosing
//! functions, template and inheritance breaking become enumerations.

use crate::migration::step::StepMigrator;
use crate::migration::transform::{CompositeRule, FieldTransform, StepContext};
use cfmigrate_core::{DiagnosticClass, DiagnosticLog, FieldValue, Item, Record, Version};

const SHARED: &[&str] = &[
    "AccessModifierOffset",
    "AlignAfterOpenBracket",
    "AlignConsecutiveAssignments",
    "AlignConsecutiveDeclarations",
    "AlignOperands",
    "AlignTrailingComments",
    "AllowAllParametersOfDeclarationOnNextLine",
    "AllowShortBlocksOnASingleLine",
    "AllowShortCaseLabelsOnASingleLine",
    "AllowShortFunctionsOnASingleLine",
    "AllowShortIfStatementsOnASingleLine",
    "AllowShortLoopsOnASingleLine",
    "AlwaysBreakAfterDefinitionReturnType",
    "AlwaysBreakAfterReturnType",
    "AlwaysBreakBeforeMultilineStrings",
    "BinPackArguments",
    "BinPackParameters",
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
    "BreakBeforeBinaryOperators",
    "BreakBeforeBraces",
    "BreakBeforeTernaryOperators",
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
    "IncludeCategories",
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
    "ReflowComments",
    "SortIncludes",
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
    "BreakStringLiterals",
    "IncludeIsMainRegex",
    "JavaScriptQuotes",
    "JavaScriptWrapImports",
    "SpaceAfterTemplateKeyword",
    "AlignEscapedNewlines",
    "BreakConstructorInitializers",
    "BraceWrapping.SplitEmptyFunction",
    "BraceWrapping.SplitEmptyRecord",
    "BraceWrapping.SplitEmptyNamespace",
    "CompactNamespaces",
    "FixNamespaceComments",
    "PenaltyBreakAssignment",
    "SortUsingDeclarations",
    "BraceWrapping.AfterExternBlock",
    "IncludeBlocks",
    "IndentPPDirectives",
];

const INTRODUCED: &[&str] = &[
    "ObjCBinPackProtocolList",
    "PenaltyBreakTemplateDeclaration",
    "SpaceBeforeCpp11BracedList",
    "SpaceBeforeCtorInitializerColon",
    "SpaceBeforeInheritanceColon",
    "SpaceBeforeRangeBasedForLoopColon",
];

const RAW_STRING_FORMATS: &str = "RawStringFormats";

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(6, 0),
        Version::new(7, 0),
        "RawStringFormats delimiters, BreakInheritanceList, template breaking",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::boolean_to_enum(
        "AlwaysBreakTemplateDeclarations",
        "AlwaysBreakTemplateDeclarations",
        "MultiLine",
        "Yes",
    ))
    .with(FieldTransform::boolean_to_enum(
        "BreakBeforeInheritanceComma",
        "BreakInheritanceList",
        "BeforeColon",
        "BeforeComma",
    ))
    .with(FieldTransform::composite(raw_string_formats_rule()))
    .new_fields(INTRODUCED.iter().copied())
}

/// Each format used to name a single delimiter; now it names a list of
/// delimiters, a list of enclosing functions and a canonical delimiter.
fn raw_string_formats_rule() -> CompositeRule {
    CompositeRule {
        name: RAW_STRING_FORMATS,
        reads: vec![RAW_STRING_FORMATS.to_string()],
        writes: vec![RAW_STRING_FORMATS.to_string()],
        upgrade: upgrade_raw_string_formats,
        downgrade: downgrade_raw_string_formats,
    }
}

fn upgrade_raw_string_formats(
    ctx: &StepContext<'_>,
    source: &Record,
    target: &mut Record,
    log: &mut DiagnosticLog,
) {
    let Some(items) = source.get(RAW_STRING_FORMATS).and_then(FieldValue::as_items) else {
        return;
    };

    let formats: Vec<Item> = items
        .iter()
        .map(|item| {
            let mut format = item.clone();
            let delimiters = match format.remove("Delimiter") {
                Some(FieldValue::Str(delimiter)) => vec![delimiter],
                _ => Vec::new(),
            };
            format.set("Delimiters", FieldValue::List(delimiters));
            format.set("EnclosingFunctions", FieldValue::List(Vec::new()));
            format.set("CanonicalDelimiter", FieldValue::str(""));
            format
        })
        .collect();

    if !formats.is_empty() {
        log.info(
            DiagnosticClass::Composite,
            ctx.transition,
            [RAW_STRING_FORMATS],
            format!(
                "{} format(s) of {} now list their delimiter under Delimiters",
                formats.len(),
                RAW_STRING_FORMATS
            ),
        );
    }
    target.set(RAW_STRING_FORMATS, FieldValue::Items(formats));
}

fn downgrade_raw_string_formats(
    ctx: &StepContext<'_>,
    source: &Record,
    target: &mut Record,
    log: &mut DiagnosticLog,
) {
    let Some(items) = source.get(RAW_STRING_FORMATS).and_then(FieldValue::as_items) else {
        return;
    };

    let mut formats = Vec::new();
    let mut lost = Vec::new();
    for item in items {
        let mut base = item.clone();
        let delimiters = match base.remove("Delimiters") {
            Some(FieldValue::List(delimiters)) => delimiters,
            _ => Vec::new(),
        };
        let functions = base.remove("EnclosingFunctions");
        let canonical = base.remove("CanonicalDelimiter");

        if delimiters.is_empty() {
            lost.push(item.to_string());
            continue;
        }
        if matches!(&functions, Some(FieldValue::List(f)) if !f.is_empty())
            || matches!(&canonical, Some(FieldValue::Str(c)) if !c.is_empty())
        {
            lost.push(item.to_string());
        }
        // one old format per delimiter
        for delimiter in delimiters {
            let mut format = base.clone();
            format.set("Delimiter", FieldValue::Str(delimiter));
            formats.push(format);
        }
    }

    if !lost.is_empty() {
        log.warning(
            DiagnosticClass::UnrepresentableDowngrade,
            ctx.transition,
            [RAW_STRING_FORMATS],
            format!(
                "{} format(s) of {} do not fit a single delimiter: {}",
                lost.len(),
                RAW_STRING_FORMATS,
                lost.join(", ")
            ),
        );
    }
    target.set(RAW_STRING_FORMATS, FieldValue::Items(formats));
}
