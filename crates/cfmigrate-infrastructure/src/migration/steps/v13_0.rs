//! 12.0 -> 13.0: include sorting and angle bracket spacing become
//! enumerations, a few tags are respelled.

use crate::migration::step::StepMigrator;
use crate::migration::transform::{FieldTransform, TagMapping};
use cfmigrate_core::Version;

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
    "SpaceAfterCStyleCast",
    "SpaceBeforeAssignmentOperators",
    "SpaceInEmptyParentheses",
    "SpacesBeforeTrailingComments",
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
    "ObjCBinPackProtocolList",
    "PenaltyBreakTemplateDeclaration",
    "SpaceBeforeCpp11BracedList",
    "SpaceBeforeCtorInitializerColon",
    "SpaceBeforeInheritanceColon",
    "SpaceBeforeRangeBasedForLoopColon",
    "JavaImportGroups",
    "StatementMacros",
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
    "AlignConsecutiveAssignments",
    "AlignConsecutiveBitFields",
    "AlignConsecutiveDeclarations",
    "AlignConsecutiveMacros",
    "AttributeMacros",
    "BreakBeforeConceptDeclarations",
    "EmptyLineBeforeAccessModifier",
    "IndentRequires",
    "PenaltyIndentedWhitespace",
    "SortJavaStaticImport",
    "SpaceAroundPointerQualifiers",
    "SpaceBeforeCaseColon",
    "BitFieldColonSpacing",
    "StatementAttributeLikeMacros",
];

const INTRODUCED: &[&str] = &[
    "AlignArrayOfStructures",
    "EmptyLineAfterAccessModifier",
    "IfMacros",
    "IndentAccessModifiers",
    "LambdaBodyIndentation",
    "PPIndentWidth",
    "ReferenceAlignment",
    "ShortNamespaceLines",
    "SpacesInLineCommentPrefix.Maximum",
    "SpacesInLineCommentPrefix.Minimum",
];

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(12, 0),
        Version::new(13, 0),
        "SortIncludes, SpacesInAngles, access modifier indentation",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::boolean_to_enum(
        "SortIncludes",
        "SortIncludes",
        "Never",
        "CaseSensitive",
    ))
    .with(FieldTransform::boolean_to_enum(
        "SpacesInAngles",
        "SpacesInAngles",
        "Never",
        "Always",
    ))
    .with(FieldTransform::enum_remap(
        "SpaceBeforeParens",
        TagMapping::by_name().with_pair(
            "ControlStatementsExceptForEachMacros",
            "ControlStatementsExceptControlMacros",
        ),
    ))
    .with(FieldTransform::enum_remap("BreakInheritanceList", TagMapping::by_name()))
    .with(FieldTransform::enum_remap(
        "AllowShortIfStatementsOnASingleLine",
        TagMapping::by_name().with_pair("Always", "OnlyFirstIf"),
    ))
    .new_fields(INTRODUCED.iter().copied())
}
