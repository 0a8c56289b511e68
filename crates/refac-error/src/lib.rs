//! Closed error taxonomy for the refactoring engine.
//!
//! Every fallible path in this workspace returns `Result<T, RefactoringError>`.
//! `RefactoringError` is deliberately *not* an open `Box<dyn Error>`: the
//! tool-call boundary needs a finite, stable set of machine-readable codes,
//! so `ErrorCode` is a closed enum grouped into five ranges (input, resource,
//! semantic, system, environment). Validation errors are fatal for the call
//! that raised them and surface verbatim; only the Commit Layer recovers
//! locally (see `refac-commit`).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Coarse grouping of an [`ErrorCode`] into one of five numeric ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 1000-1099: malformed input (path, identifier, range, selection, ...).
    Input,
    /// 2000-2099: a referenced resource does not exist.
    Resource,
    /// 3000-3199: the request is well-formed but semantically unsafe.
    Semantic,
    /// 4000-4099: the engine itself failed (filesystem, timeout, ...).
    System,
    /// 5000-5099: the hosting environment is missing something the engine needs.
    Environment,
}

macro_rules! error_codes {
    ($($variant:ident = $numeric:expr, $str:expr;)+) => {
        /// A closed, machine-readable error code.
        ///
        /// `numeric()` returns the range-correct numeric code; `as_str()`
        /// returns the `SCREAMING_SNAKE_CASE` identifier used as `error.code`
        /// in tool-call responses.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum ErrorCode {
            $(#[allow(missing_docs)] $variant,)+
        }

        impl ErrorCode {
            /// The numeric code in its documented range.
            pub fn numeric(self) -> u32 {
                match self {
                    $(ErrorCode::$variant => $numeric,)+
                }
            }

            /// The `SCREAMING_SNAKE_CASE` string code.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $str,)+
                }
            }

            /// The range this code belongs to.
            pub fn kind(self) -> ErrorKind {
                match self.numeric() {
                    1000..=1099 => ErrorKind::Input,
                    2000..=2099 => ErrorKind::Resource,
                    3000..=3199 => ErrorKind::Semantic,
                    4000..=4099 => ErrorKind::System,
                    _ => ErrorKind::Environment,
                }
            }
        }

        impl fmt::Display for ErrorCode {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

error_codes! {
    // 1000-1099: input validation
    InvalidSourcePath = 1000, "INVALID_SOURCE_PATH";
    InvalidTargetPath = 1001, "INVALID_TARGET_PATH";
    InvalidIdentifier = 1002, "INVALID_IDENTIFIER";
    InvalidNamespace = 1003, "INVALID_NAMESPACE";
    InvalidLineNumber = 1004, "INVALID_LINE_NUMBER";
    InvalidColumnNumber = 1005, "INVALID_COLUMN_NUMBER";
    InvalidSelection = 1006, "INVALID_SELECTION";
    EmptySelection = 1007, "EMPTY_SELECTION";
    InvalidParameterPosition = 1008, "INVALID_PARAMETER_POSITION";
    InvalidVisibility = 1009, "INVALID_VISIBILITY";
    InvalidDefaultValueType = 1010, "INVALID_DEFAULT_VALUE_TYPE";

    // 2000-2099: resource not found
    SourceFileNotFound = 2000, "SOURCE_FILE_NOT_FOUND";
    WorkspaceNotFound = 2001, "WORKSPACE_NOT_FOUND";
    SymbolNotFound = 2002, "SYMBOL_NOT_FOUND";
    MethodNotFound = 2003, "METHOD_NOT_FOUND";
    VariableNotFound = 2004, "VARIABLE_NOT_FOUND";
    FieldNotFound = 2005, "FIELD_NOT_FOUND";
    InterfaceNotFound = 2006, "INTERFACE_NOT_FOUND";
    BaseClassNotFound = 2007, "BASE_CLASS_NOT_FOUND";
    DerivedNotFound = 2008, "DERIVED_NOT_FOUND";
    MemberNotFound = 2009, "MEMBER_NOT_FOUND";
    ExpressionNotFound = 2010, "EXPRESSION_NOT_FOUND";
    StatementNotFound = 2011, "STATEMENT_NOT_FOUND";
    TypeNotFound = 2012, "TYPE_NOT_FOUND";
    ParameterNotFound = 2013, "PARAMETER_NOT_FOUND";
    ConstructorNotFound = 2014, "CONSTRUCTOR_NOT_FOUND";
    OverrideTargetNotFound = 2015, "OVERRIDE_TARGET_NOT_FOUND";
    SourceNotInWorkspace = 2016, "SOURCE_NOT_IN_WORKSPACE";
    Ambiguous = 2017, "AMBIGUOUS";

    // 3000-3199: semantic
    SymbolNotMoveable = 3000, "SYMBOL_NOT_MOVEABLE";
    SymbolIsNested = 3001, "SYMBOL_IS_NESTED";
    NameCollision = 3002, "NAME_COLLISION";
    SameLocation = 3003, "SAME_LOCATION";
    SameNamespace = 3004, "SAME_NAMESPACE";
    CircularReference = 3005, "CIRCULAR_REFERENCE";
    BreaksAccessibility = 3006, "BREAKS_ACCESSIBILITY";
    SplitFileRequired = 3007, "SPLIT_FILE_REQUIRED";

    // 3010-3018: rename-specific
    CannotRenameExternal = 3010, "CANNOT_RENAME_EXTERNAL";
    ReservedKeyword = 3011, "RESERVED_KEYWORD";
    NameConflictScope = 3012, "NAME_CONFLICT_SCOPE";
    CannotRenameConstructorDirectly = 3013, "CANNOT_RENAME_CONSTRUCTOR_DIRECTLY";
    CannotRenameSynthesized = 3014, "CANNOT_RENAME_SYNTHESIZED";
    CannotRenameDestructor = 3015, "CANNOT_RENAME_DESTRUCTOR";
    CannotRenameOperator = 3016, "CANNOT_RENAME_OPERATOR";
    CannotRenameIndexer = 3017, "CANNOT_RENAME_INDEXER";

    // 3030-3039: extract-specific
    ContainsYield = 3030, "CONTAINS_YIELD";
    MultipleExitPoints = 3031, "MULTIPLE_EXIT_POINTS";
    UnresolvableControlFlow = 3032, "UNRESOLVABLE_CONTROL_FLOW";
    CannotExtractVoidExpression = 3033, "CANNOT_EXTRACT_VOID_EXPRESSION";
    ExpressionNotConstant = 3034, "EXPRESSION_NOT_CONSTANT";

    // 3050-3059: inline-specific
    ExpressionHasSideEffects = 3050, "EXPRESSION_HAS_SIDE_EFFECTS";
    CannotInlineVirtual = 3051, "CANNOT_INLINE_VIRTUAL";
    CannotInlineRecursive = 3052, "CANNOT_INLINE_RECURSIVE";
    CannotInlineNoBody = 3053, "CANNOT_INLINE_NO_BODY";
    CannotInlineReassigned = 3054, "CANNOT_INLINE_REASSIGNED";
    CannotInlineModifiedAfter = 3055, "CANNOT_INLINE_MODIFIED_AFTER";
    ConstantUsedInAttribute = 3056, "CONSTANT_USED_IN_ATTRIBUTE";

    // 3060-3065: generate-specific
    ConstructorSignatureConflict = 3060, "CONSTRUCTOR_SIGNATURE_CONFLICT";
    NoUnimplementedMembers = 3061, "NO_UNIMPLEMENTED_MEMBERS";
    NoEligibleMembers = 3062, "NO_ELIGIBLE_MEMBERS";

    // 3080-3084: change-signature-specific
    SignatureUnchanged = 3080, "SIGNATURE_UNCHANGED";
    ParameterIndexOutOfRange = 3081, "PARAMETER_INDEX_OUT_OF_RANGE";

    // 3090-3095: convert-specific
    CannotConvert = 3090, "CANNOT_CONVERT";

    // 3105-3108: hierarchy-specific
    CircularHierarchy = 3105, "CIRCULAR_HIERARCHY";
    BaseClassConflict = 3106, "BASE_CLASS_CONFLICT";
    InterfaceAlreadyImplemented = 3107, "INTERFACE_ALREADY_IMPLEMENTED";
    HierarchyDepthExceeded = 3108, "HIERARCHY_DEPTH_EXCEEDED";

    // 4000-4099: system
    WorkspaceBusy = 4000, "WORKSPACE_BUSY";
    FilesystemError = 4001, "FILESYSTEM_ERROR";
    SemanticLibraryError = 4002, "SEMANTIC_LIBRARY_ERROR";
    CompilationError = 4003, "COMPILATION_ERROR";
    Timeout = 4004, "TIMEOUT";

    // 5000-5099: environment
    BuildInfrastructureNotFound = 5000, "BUILD_INFRASTRUCTURE_NOT_FOUND";
    SemanticLibraryMissing = 5001, "SEMANTIC_LIBRARY_MISSING";
    SdkNotFound = 5002, "SDK_NOT_FOUND";
    SolutionLoadFailed = 5003, "SOLUTION_LOAD_FAILED";
}

/// Structured, order-preserving error detail payload.
///
/// Keys follow `camelCase` (`existingTypeLocation`, `conflictingSymbolPath`, ...).
pub type Details = BTreeMap<String, String>;

/// The engine's uniform error type.
///
/// Carries a machine-readable [`ErrorCode`], a one-line human message,
/// structured `details`, and a short list of `suggestions` for the caller's
/// next action.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct RefactoringError {
    /// The error code.
    pub code: ErrorCode,
    /// A one-line human-readable message.
    pub message: String,
    /// Structured detail payload (conflicting symbol path, candidate lines, ...).
    pub details: Details,
    /// Suggested next actions for the caller.
    pub suggestions: Vec<String>,
}

impl RefactoringError {
    /// Construct an error with no details or suggestions.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), details: Details::new(), suggestions: Vec::new() }
    }

    /// Attach a detail entry, builder-style.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Attach a suggested next action, builder-style.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// The engine's standard result alias.
pub type Result<T> = std::result::Result<T, RefactoringError>;
