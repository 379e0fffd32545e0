//! 13.0 -> 14.0: constructor initializer packing replaces two booleans,
//! qualifier ordering and per-case parenthesis spacing appear.

use crate::migration::step::StepMigrator;
use crate::migration::transform::{CompositeRule, FieldTransform, StepContext, TagMapping};
use cfmigrate_core::{DiagnosticClass, DiagnosticLog, FieldValue, Record, Version};

const SHARED: &[&str] = &[
    "AccessModifierOffset",
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
    "SortIncludes",
    "SpacesInAngles",
    "AlignArrayOfStructures",
    "EmptyLineAfterAccessModifier",
    "IfMacros",
    "IndentAccessModifiers",
    "LambdaBodyIndentation",
    "PPIndentWidth",
    "ReferenceAlignment",
    "ShortNamespaceLines",
    "SpacesInLineCommentPrefix.Minimum",
    "SpacesInLineCommentPrefix.Maximum",
];

const INTRODUCED: &[&str] = &[
    "PenaltyBreakOpenParenthesis",
    "QualifierAlignment",
    "QualifierOrder",
    "RemoveBracesLLVM",
    "SeparateDefinitionBlocks",
    "SpaceBeforeParensOptions.AfterControlStatements",
    "SpaceBeforeParensOptions.AfterForeachMacros",
    "SpaceBeforeParensOptions.AfterFunctionDeclarationName",
    "SpaceBeforeParensOptions.AfterFunctionDefinitionName",
    "SpaceBeforeParensOptions.AfterIfMacros",
    "SpaceBeforeParensOptions.AfterOverloadedOperator",
    "SpaceBeforeParensOptions.BeforeNonEmptyParentheses",
];

const ONE_PER_LINE: &str = "ConstructorInitializerAllOnOneLineOrOnePerLine";
const NEXT_LINE: &str = "AllowAllConstructorInitializersOnNextLine";
const PACK: &str = "PackConstructorInitializers";

pub fn step() -> StepMigrator {
    StepMigrator::new(
        Version::new(13, 0),
        Version::new(14, 0),
        "PackConstructorInitializers, QualifierAlignment, SpaceBeforeParensOptions",
    )
    .copy_same(SHARED.iter().copied())
    .with(FieldTransform::enum_remap("AlignAfterOpenBracket", TagMapping::by_name()))
    .with(FieldTransform::enum_remap("SpaceBeforeParens", TagMapping::by_name()))
    .with(FieldTransform::composite(pack_constructor_initializers_rule()))
    .new_fields(INTRODUCED.iter().copied())
}

/// Folds the two constructor initializer booleans into one enumeration.
///
/// | one per line | next line | packing       |
/// |--------------|-----------|---------------|
/// | false        | any       | `BinPack`     |
/// | true         | false     | `CurrentLine` |
/// | true         | true      | `NextLine`    |
///
/// `Never` has no older spelling.
fn pack_constructor_initializers_rule() -> CompositeRule {
    CompositeRule {
        name: PACK,
        reads: vec![ONE_PER_LINE.to_string(), NEXT_LINE.to_string()],
        writes: vec![PACK.to_string()],
        upgrade: upgrade_packing,
        downgrade: downgrade_packing,
    }
}

fn upgrade_packing(
    ctx: &StepContext<'_>,
    source: &Record,
    target: &mut Record,
    log: &mut DiagnosticLog,
) {
    let one_per_line = source.get(ONE_PER_LINE).and_then(FieldValue::as_bool);
    let next_line = source.get(NEXT_LINE).and_then(FieldValue::as_bool);
    let packing = match (one_per_line, next_line) {
        (Some(false), _) => "BinPack",
        (Some(true), Some(false)) => "CurrentLine",
        (Some(true), Some(true)) => "NextLine",
        _ => return,
    };

    target.set(PACK, FieldValue::tag(packing));
    log.info(
        DiagnosticClass::Composite,
        ctx.transition,
        [ONE_PER_LINE, NEXT_LINE, PACK],
        format!(
            "{} set to {} from {} and {}",
            PACK, packing, ONE_PER_LINE, NEXT_LINE
        ),
    );
}

fn downgrade_packing(
    ctx: &StepContext<'_>,
    source: &Record,
    target: &mut Record,
    log: &mut DiagnosticLog,
) {
    let Some(packing) = source.get(PACK).and_then(FieldValue::as_tag) else {
        return;
    };
    let (one_per_line, next_line) = match packing {
        "BinPack" => (false, None),
        "CurrentLine" => (true, Some(false)),
        "NextLine" => (true, Some(true)),
        other => {
            log.warning(
                DiagnosticClass::UnrepresentableDowngrade,
                ctx.transition,
                [PACK, ONE_PER_LINE, NEXT_LINE],
                format!(
                    "{} {} cannot be expressed; {} and {} keep their preset values",
                    PACK, other, ONE_PER_LINE, NEXT_LINE
                ),
            );
            return;
        }
    };

    let mut changed = target.set(ONE_PER_LINE, FieldValue::Bool(one_per_line))
        != Some(FieldValue::Bool(one_per_line));
    // BinPack says nothing about the next line
    if let Some(next_line) = next_line {
        changed |= target.set(NEXT_LINE, FieldValue::Bool(next_line))
            != Some(FieldValue::Bool(next_line));
    }
    if changed {
        log.info(
            DiagnosticClass::Override,
            ctx.transition,
            [PACK, ONE_PER_LINE, NEXT_LINE],
            format!(
                "{} and {} set from {} {}",
                ONE_PER_LINE, NEXT_LINE, PACK, packing
            ),
        );
    }
}
