//! 3.4 -> 3.5: pointer and parenthesis options become enumerations,
//! per-language configuration appears.

use crate::migration::step::StepMigrator;
use crate::migration::transform::{FieldTransform, TagMapping};
use cfmigrate_core::Version;

const SHARED: &[&str] = &[
    "AccessModifierOffset",
    "AlignEscapedNewlinesLeft",
    "AlignTrailingComments",
    "AllowAllParametersOfDeclarationOnNextLine",
    "AllowShortIfStatementsOnASingleLine",
    "AllowShortLoopsOnASingleLine",
    "AlwaysBreakBeforeMultilineStrings",
    "AlwaysBreakTemplateDeclarations",
    "BinPackParameters",
    "BreakBeforeBinaryOperators",
    "BreakBeforeTernaryOperators",
    "BreakConstructorInitializersBeforeComma",
    "ColumnLimit",
    "ConstructorInitializerAllOnOneLineOrOnePerLine",
    "ConstructorInitializerIndentWidth",
    "ContinuationIndentWidth",
    "Cpp11BracedListStyle",
    "ExperimentalAutoDetectBinPacking",
    "IndentCaseLabels",
    "IndentWidth",
    "MaxEmptyLinesToKeep",
    "ObjCSpaceBeforeProtocolList",
    "PenaltyBreakBeforeFirstCallParameter",
    "PenaltyBreakComment",
    "PenaltyBreakFirstLessLess",
    "PenaltyBreakString",
    "PenaltyExcessCharacter",
    "PenaltyReturnTypeOnItsOwnLine",
    "SpaceBeforeAssignmentOperators",
    "SpaceInEmptyParentheses",
    "SpacesBeforeTrailingComments",
    "SpacesInAngles",
    "SpacesInCStyleCastParentheses",
    "SpacesInParentheses",
    "TabWidth",
];

const INTRODUCED: &[&str] = &[
    "AllowShortBlocksOnASingleLine",
    "AllowShortFunctionsOnASingleLine",
    "CommentPragmas",
    "DisableFormat",
    "ForEachMacros",
    "KeepEmptyLinesAtTheStartOfBlocks",
    "Language",
    "ObjCSpaceAfterProperty",
    "SpacesInContainerLiterals",
];

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(3, 4),
        Version::new(3, 5),
        "PointerAlignment and SpaceBeforeParens, language sections",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::boolean_to_enum(
        "PointerBindsToType",
        "PointerAlignment",
        "Right",
        "Left",
    ))
    .with(FieldTransform::rename(
        "DerivePointerBinding",
        "DerivePointerAlignment",
    ))
    .with(FieldTransform::rename(
        "IndentFunctionDeclarationAfterType",
        "IndentWrappedFunctionNames",
    ))
    .with(FieldTransform::boolean_to_enum(
        "SpaceAfterControlStatementKeyword",
        "SpaceBeforeParens",
        "Never",
        "ControlStatements",
    ))
    .with(FieldTransform::enum_remap("BreakBeforeBraces", TagMapping::by_name()))
    .with(FieldTransform::enum_remap("NamespaceIndentation", TagMapping::by_name()))
    .with(FieldTransform::enum_remap("Standard", TagMapping::by_name()))
    .with(FieldTransform::enum_remap("UseTab", TagMapping::by_name()))
    .new_fields(INTRODUCED.iter().copied())
}
