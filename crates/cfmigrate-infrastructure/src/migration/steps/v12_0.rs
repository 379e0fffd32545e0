//! 11.0 -> 12.0: consecutive alignment options become enumerations, include
//! categories gain case sensitivity.

use crate::migration::step::StepMigrator;
use crate::migration::transform::FieldTransform;
use cfmigrate_core::{FieldValue, Version};

const SHARED: &[&str] = &[
    "AccessModifierOffset",
    "AlignAfterOpenBracket",
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
    "AlignOperands",
    "AllowShortEnumsOnASingleLine",
    "InsertTrailingCommas",
    "BraceWrapping.BeforeLambdaBody",
    "BraceWrapping.BeforeWhile",
    "WhitespaceSensitiveMacros",
    "IndentCaseBlocks",
    "IndentExternBlock",
    "ObjCBreakBeforeNestedBlockParam",
];

const INTRODUCED: &[&str] = &[
    "AttributeMacros",
    "BitFieldColonSpacing",
    "BreakBeforeConceptDeclarations",
    "EmptyLineBeforeAccessModifier",
    "IndentRequires",
    "PenaltyIndentedWhitespace",
    "SortJavaStaticImport",
    "SpaceAroundPointerQualifiers",
    "SpaceBeforeCaseColon",
    "StatementAttributeLikeMacros",
];

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(11, 0),
        Version::new(12, 0),
        "AlignConsecutive* enumerations, CaseSensitive include categories",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::boolean_to_enum(
        "AlignConsecutiveAssignments",
        "AlignConsecutiveAssignments",
        "None",
        "Consecutive",
    ))
    .with(FieldTransform::boolean_to_enum(
        "AlignConsecutiveBitFields",
        "AlignConsecutiveBitFields",
        "None",
        "Consecutive",
    ))
    .with(FieldTransform::boolean_to_enum(
        "AlignConsecutiveDeclarations",
        "AlignConsecutiveDeclarations",
        "None",
        "Consecutive",
    ))
    .with(FieldTransform::boolean_to_enum(
        "AlignConsecutiveMacros",
        "AlignConsecutiveMacros",
        "None",
        "Consecutive",
    ))
    .with(FieldTransform::list_element(
        "IncludeCategories",
        [("CaseSensitive", FieldValue::Bool(false))],
    ))
    .new_fields(INTRODUCED.iter().copied())
}
