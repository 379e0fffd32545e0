//! 10.0 -> 11.0: operand alignment becomes an enumeration.

use crate::migration::step::StepMigrator;
use crate::migration::transform::{FieldTransform, TagMapping};
use cfmigrate_core::Version;

const SHARED: &[&str] = &[
    "AccessModifierOffset",
    "AlignAfterOpenBracket",
    "AlignConsecutiveAssignments",
    "AlignConsecutiveDeclarations",
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
    "SpaceInEmptyParentheses",
    "SpacesBeforeTrailingComments",
    "SpacesInAngles",
    "SpacesInCStyleCastParentheses",
    "SpacesInContainerLiterals",
    "SpacesInParentheses",
    "SpacesInSquareBrackets",
    "Standard",
    "TabWidth",
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
    "AllowShortBlocksOnASingleLine",
    "BraceWrapping.AfterControlStatement",
    "DeriveLineEnding",
    "IncludeIsMainSourceRegex",
    "IndentGotoLabels",
    "SpaceInEmptyBlock",
    "SpacesInConditionalStatement",
    "SpaceBeforeSquareBrackets",
    "UseCRLF",
];

const INTRODUCED: &[&str] = &[
    "AlignConsecutiveBitFields",
    "AllowShortEnumsOnASingleLine",
    "BraceWrapping.BeforeLambdaBody",
    "BraceWrapping.BeforeWhile",
    "IndentCaseBlocks",
    "IndentExternBlock",
    "InsertTrailingCommas",
    "ObjCBreakBeforeNestedBlockParam",
    "WhitespaceSensitiveMacros",
];

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(10, 0),
        Version::new(11, 0),
        "AlignOperands, bit field alignment, trailing commas",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::boolean_to_enum(
        "AlignOperands",
        "AlignOperands",
        "DontAlign",
        "Align",
    ))
    .with(FieldTransform::enum_remap("SpaceBeforeParens", TagMapping::by_name()))
    .with(FieldTransform::enum_remap("UseTab", TagMapping::by_name()))
    .new_fields(INTRODUCED.iter().copied())
}
