//! 3.6 -> 3.7

use crate::migration::step::StepMigrator;
use crate::migration::transform::{FieldTransform, TagMapping};
use cfmigrate_core::Version;

const SHARED: &[&str] = &[
    "AccessModifierOffset",
    "AlignAfterOpenBracket",
    "AlignEscapedNewlinesLeft",
    "AlignOperands",
    "AlignTrailingComments",
    "AllowAllParametersOfDeclarationOnNextLine",
    "AllowShortBlocksOnASingleLine",
    "AllowShortCaseLabelsOnASingleLine",
    "AllowShortFunctionsOnASingleLine",
    "AllowShortIfStatementsOnASingleLine",
    "AllowShortLoopsOnASingleLine",
    "AlwaysBreakBeforeMultilineStrings",
    "AlwaysBreakTemplateDeclarations",
    "BinPackArguments",
    "BinPackParameters",
    "BreakBeforeBinaryOperators",
    "BreakBeforeBraces",
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
];

const INTRODUCED: &[&str] = &[
    "AlignConsecutiveAssignments",
    "MacroBlockBegin",
    "MacroBlockEnd",
];

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(3, 6),
        Version::new(3, 7),
        "Top-level return type breaking, macro blocks, assignment alignment",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::boolean_to_enum(
        "AlwaysBreakAfterDefinitionReturnType",
        "AlwaysBreakAfterDefinitionReturnType",
        "None",
        "All",
    ))
    .with(FieldTransform::enum_remap("UseTab", TagMapping::by_name()))
    .new_fields(INTRODUCED.iter().copied())
}
