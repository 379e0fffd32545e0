//! 3.3 -> 3.4: first release with a configuration file.

use crate::migration::step::StepMigrator;
use crate::migration::transform::{FieldTransform, TagMapping};
use cfmigrate_core::Version;

const SHARED: &[&str] = &[
    "AccessModifierOffset",
    "AlignEscapedNewlinesLeft",
    "AllowAllParametersOfDeclarationOnNextLine",
    "AllowShortIfStatementsOnASingleLine",
    "BinPackParameters",
    "ColumnLimit",
    "ConstructorInitializerAllOnOneLineOrOnePerLine",
    "DerivePointerBinding",
    "IndentCaseLabels",
    "MaxEmptyLinesToKeep",
    "ObjCSpaceBeforeProtocolList",
    "PenaltyExcessCharacter",
    "PenaltyReturnTypeOnItsOwnLine",
    "PointerBindsToType",
    "SpacesBeforeTrailingComments",
];

const INTRODUCED: &[&str] = &[
    "AlignTrailingComments",
    "AllowShortLoopsOnASingleLine",
    "AlwaysBreakBeforeMultilineStrings",
    "AlwaysBreakTemplateDeclarations",
    "BreakBeforeBinaryOperators",
    "BreakBeforeBraces",
    "BreakBeforeTernaryOperators",
    "BreakConstructorInitializersBeforeComma",
    "ConstructorInitializerIndentWidth",
    "ContinuationIndentWidth",
    "Cpp11BracedListStyle",
    "ExperimentalAutoDetectBinPacking",
    "IndentFunctionDeclarationAfterType",
    "IndentWidth",
    "NamespaceIndentation",
    "PenaltyBreakBeforeFirstCallParameter",
    "PenaltyBreakComment",
    "PenaltyBreakFirstLessLess",
    "PenaltyBreakString",
    "SpaceAfterControlStatementKeyword",
    "SpaceBeforeAssignmentOperators",
    "SpaceInEmptyParentheses",
    "SpacesInAngles",
    "SpacesInCStyleCastParentheses",
    "SpacesInParentheses",
    "TabWidth",
    "UseTab",
];

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(3, 3),
        Version::new(3, 4),
        "Indentation, penalties, braces and spacing options",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::enum_remap("Standard", TagMapping::by_name()))
    .new_fields(INTRODUCED.iter().copied())
}
