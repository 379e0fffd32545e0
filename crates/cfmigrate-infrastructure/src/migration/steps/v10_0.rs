//! 9.0 -> 10.0: language standards get their current spelling, include
//! categories gain a sort priority, line ending options appear.

use crate::migration::step::StepMigrator;
use crate::migration::transform::{FieldTransform, TagMapping};
use cfmigrate_core::{FieldValue, Version};

const SHARED: &[&str] = &[
    "AccessModifierOffset",
    "AlignAfterOpenBracket",
    "AlignConsecutiveAssignments",
    "AlignConsecutiveDeclarations",
    "AlignOperands",
    "AlignTrailingComments",
    "AllowAllParametersOfDeclarationOnNextLine",
    "AllowShortCaseLabelsOnASingleLine",
    "AllowShortFunctionsOnASingleLine",
    "AllowShortLoopsOnASingleLine",
    "AlwaysBreakAfterDefinitionReturnType",
    "AlwaysBreakAfterReturnType",
    "AlwaysBreakBeforeMultilineStrings",
    "BinPackArguments",
    "BinPackParameters",
    "BraceWrapping.AfterClass",
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
    "IndentCaseLabels",
    "IndentWidth",
    "IndentWrappedFunctionNames",
    "KeepEmptyLinesAtTheStartOfBlocks",
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
    "RawStringFormats",
    "AlwaysBreakTemplateDeclarations",
    "BreakInheritanceList",
    "ObjCBinPackProtocolList",
    "PenaltyBreakTemplateDeclaration",
    "SpaceBeforeCpp11BracedList",
    "SpaceBeforeCtorInitializerColon",
    "SpaceBeforeInheritanceColon",
    "SpaceBeforeRangeBasedForLoopColon",
    "JavaImportGroups",
    "StatementMacros",
    "AllowShortIfStatementsOnASingleLine",
    "AlignConsecutiveMacros",
    "AllowAllArgumentsOnNextLine",
    "AllowAllConstructorInitializersOnNextLine",
    "AllowShortLambdasOnASingleLine",
    "BraceWrapping.AfterCaseLabel",
    "NamespaceMacros",
    "SpaceAfterLogicalNot",
    "TypenameMacros",
];

const INTRODUCED: &[&str] = &[
    "DeriveLineEnding",
    "IncludeIsMainSourceRegex",
    "IndentGotoLabels",
    "SpaceBeforeSquareBrackets",
    "SpaceInEmptyBlock",
    "SpacesInConditionalStatement",
    "UseCRLF",
];

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(9, 0),
        Version::new(10, 0),
        "Standard spellings, SortPriority, line endings",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::boolean_to_enum(
        "AllowShortBlocksOnASingleLine",
        "AllowShortBlocksOnASingleLine",
        "Never",
        "Always",
    ))
    .with(FieldTransform::boolean_to_enum(
        "BraceWrapping.AfterControlStatement",
        "BraceWrapping.AfterControlStatement",
        "Never",
        "Always",
    ))
    .with(FieldTransform::enum_remap("BreakBeforeBraces", TagMapping::by_name()))
    .with(FieldTransform::enum_remap("Language", TagMapping::by_name()))
    .with(FieldTransform::enum_remap(
        "Standard",
        TagMapping::explicit([
            ("Cpp03", "c++03"),
            ("Cpp11", "Latest"),
            ("Auto", "Auto"),
        ]),
    ))
    .with(FieldTransform::list_element(
        "IncludeCategories",
        [("SortPriority", FieldValue::Int(0))],
    ))
    .new_fields(INTRODUCED.iter().copied())
}
