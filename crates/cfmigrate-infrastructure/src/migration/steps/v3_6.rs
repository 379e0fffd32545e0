//! 3.5 -> 3.6

use crate::migration::step::StepMigrator;
use crate::migration::transform::{FieldTransform, TagMapping};
use cfmigrate_core::Version;

const SHARED: &[&str] = &[
    "AccessModifierOffset",
    "AlignEscapedNewlinesLeft",
    "AlignTrailingComments",
    "AllowAllParametersOfDeclarationOnNextLine",
    "AllowShortBlocksOnASingleLine",
    "AllowShortIfStatementsOnASingleLine",
    "AllowShortLoopsOnASingleLine",
    "AlwaysBreakBeforeMultilineStrings",
    "AlwaysBreakTemplateDeclarations",
    "BinPackParameters",
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
    "MaxEmptyLinesToKeep",
    "NamespaceIndentation",
    "ObjCSpaceAfterProperty",
    "ObjCSpaceBeforeProtocolList",
    "PenaltyBreakBeforeFirstCallParameter",
    "PenaltyBreakComment",
    "PenaltyBreakFirstLessLess",
    "PenaltyBreakString",
    "PenaltyExcessCharacter",
    "PenaltyReturnTypeOnItsOwnLine",
    "PointerAlignment",
    "SpaceBeforeAssignmentOperators",
    "SpaceBeforeParens",
    "SpaceInEmptyParentheses",
    "SpacesBeforeTrailingComments",
    "SpacesInAngles",
    "SpacesInCStyleCastParentheses",
    "SpacesInContainerLiterals",
    "SpacesInParentheses",
    "Standard",
    "TabWidth",
    "UseTab",
];

const INTRODUCED: &[&str] = &[
    "AlignAfterOpenBracket",
    "AlignOperands",
    "AllowShortCaseLabelsOnASingleLine",
    "AlwaysBreakAfterDefinitionReturnType",
    "BinPackArguments",
    "ObjCBlockIndentWidth",
    "SpaceAfterCStyleCast",
    "SpacesInSquareBrackets",
];

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(3, 5),
        Version::new(3, 6),
        "Operator breaking modes, Java support, argument bin-packing",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::boolean_to_enum(
        "BreakBeforeBinaryOperators",
        "BreakBeforeBinaryOperators",
        "None",
        "All",
    ))
    .with(FieldTransform::enum_remap("Language", TagMapping::by_name()))
    .with(FieldTransform::enum_remap(
        "AllowShortFunctionsOnASingleLine",
        TagMapping::by_name(),
    ))
    .new_fields(INTRODUCED.iter().copied())
}
