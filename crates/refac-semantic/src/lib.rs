//! The required collaborator surface: a syntax tree, a semantic model, a
//! symbol model, and a workspace loader for the target language. The engine
//! is generic over [`Language`]; it never hardcodes a grammar or a compiler.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use std::collections::BTreeMap;
use std::sync::Arc;

/// Opaque document identity within one `Language` snapshot.
///
/// The engine's own `Document` (in `refac-workspace`) owns the mapping from
/// filesystem path to `DocumentId`; the collaborator only ever sees the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u32);

/// Opaque handle to a node within a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A half-open byte range `[start, end)` within a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: u32,
    /// Exclusive end byte offset.
    pub end: u32,
}

impl Span {
    /// Construct a span, swapping endpoints if given in reverse order.
    pub fn new(start: u32, end: u32) -> Self {
        if start <= end { Self { start, end } } else { Self { start: end, end: start } }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// `true` if the span covers zero bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `true` if `self` and `other` share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Structural classification of a syntax node.
///
/// Covers both the moveable top-level kinds (the declarations that can be
/// moved between files/namespaces) and the finer-grained structural kinds
/// operations need to walk a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top-level or nested class declaration.
    Class,
    /// Struct declaration.
    Struct,
    /// Interface declaration.
    Interface,
    /// Enum declaration.
    Enum,
    /// Record declaration.
    Record,
    /// Delegate declaration.
    Delegate,
    /// Method declaration.
    Method,
    /// Constructor declaration.
    Constructor,
    /// Destructor/finalizer declaration.
    Destructor,
    /// Operator overload declaration.
    Operator,
    /// Indexer declaration.
    Indexer,
    /// Property declaration.
    Property,
    /// Field declaration.
    Field,
    /// Event declaration.
    Event,
    /// Parameter declaration.
    Parameter,
    /// Local variable declaration.
    Local,
    /// Constant declaration.
    Constant,
    /// Namespace declaration.
    Namespace,
    /// Generic type parameter.
    TypeParameter,
    /// `using`/import directive.
    UsingDirective,
    /// A statement node.
    Statement,
    /// An expression node.
    Expression,
    /// A block (brace-delimited statement list).
    Block,
    /// An attribute/annotation list.
    Attribute,
    /// A documentation comment attached to a declaration.
    DocComment,
}

/// Accessibility modifier, independent of the target language's exact keyword set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    /// Visible everywhere.
    Public,
    /// Visible within the containing assembly/project only.
    Internal,
    /// Visible within the containing type and its derived types.
    Protected,
    /// Visible within the containing type only.
    Private,
    /// Visible within the containing type, derived types, or the same assembly.
    ProtectedInternal,
    /// Visible within the containing type and derived types in the same assembly only.
    PrivateProtected,
}

/// Modifiers relevant to refactoring safety checks (virtual dispatch,
/// recursion, staticness, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SymbolModifiers {
    /// Declared `virtual`.
    pub is_virtual: bool,
    /// Declared `override`.
    pub is_override: bool,
    /// Declared `abstract`.
    pub is_abstract: bool,
    /// Declared `static`.
    pub is_static: bool,
    /// Declared `extern`.
    pub is_extern: bool,
    /// Declared `async`.
    pub is_async: bool,
    /// Declared `partial`.
    pub is_partial: bool,
}

/// A stable symbol identity that outlives any single snapshot. Two `Symbol`
/// values with equal keys denote the same logical symbol even across
/// solution snapshots; never compare symbols by anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey(pub String);

/// A declaration site for a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationLocation {
    /// Document containing the declaration.
    pub document: DocumentId,
    /// Span of the declaration's name token.
    pub span: Span,
}

/// A resolved symbol handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Stable cross-snapshot identity.
    pub key: SymbolKey,
    /// Unqualified name.
    pub simple_name: String,
    /// Fully qualified name (namespace + containing types + simple name).
    pub fully_qualified_name: String,
    /// Structural kind.
    pub kind: NodeKind,
    /// Enclosing namespace, if any.
    pub containing_namespace: Option<String>,
    /// Enclosing type's fully qualified name, if any (nested symbols only).
    pub containing_type: Option<String>,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// All declaration sites (partial types may have more than one).
    pub declarations: Vec<DeclarationLocation>,
    /// `true` if compiler-synthesized (never user-renameable).
    pub is_synthesized: bool,
    /// `true` if declared in a referenced assembly rather than the loaded solution.
    pub is_external: bool,
    /// Modifiers relevant to refactoring safety checks.
    pub modifiers: SymbolModifiers,
}

impl Symbol {
    /// `true` if this symbol is one of the moveable top-level kinds (a
    /// namespace member that can be relocated between files/namespaces on
    /// its own, as opposed to a member nested inside one).
    pub fn is_moveable_type(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Class
                | NodeKind::Struct
                | NodeKind::Interface
                | NodeKind::Enum
                | NodeKind::Record
                | NodeKind::Delegate
        )
    }
}

/// A syntactic usage of a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSite {
    /// Document containing the usage.
    pub document: DocumentId,
    /// Span of the referencing token.
    pub span: Span,
    /// `true` if this usage is an assignment target.
    pub is_write: bool,
    /// `true` if the reference is implicit (e.g. an extension-method receiver).
    pub is_implicit: bool,
    /// The symbol referenced.
    pub symbol: SymbolKey,
}

/// A compile-time constant value, as produced by Extract-Constant and
/// constant-folding queries.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    /// Integer literal.
    Int(i64),
    /// Floating-point literal.
    Float(f64),
    /// String literal.
    Str(String),
    /// Boolean literal.
    Bool(bool),
    /// `null`/`None` literal.
    Null,
}

/// Result of a data-flow analysis over a statement range or single
/// expression, as consumed by Extract-Method and similar operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFlowResult {
    /// Variables read inside the range whose value originates outside it.
    pub flows_in: Vec<String>,
    /// Variables whose value is used after the range but not before it.
    pub flows_out: Vec<String>,
    /// Variables declared inside the range.
    pub declared_in_range: Vec<String>,
    /// Subset of `declared_in_range` that is read after the range ends.
    pub used_after_range: Vec<String>,
    /// `true` if the range contains at least one `await` expression.
    pub contains_await: bool,
    /// `true` if the range contains a `yield` statement.
    pub contains_yield: bool,
    /// Number of distinct `return` statements reachable from the range.
    pub return_points: usize,
    /// `true` if a `break`/`continue`/`goto` inside the range targets a
    /// label outside it (the range cannot be extracted as a single call).
    pub has_unstructured_exit: bool,
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Compilation-breaking.
    Error,
    /// Non-fatal but notable.
    Warning,
    /// Informational.
    Info,
    /// Editor-only hint.
    Hint,
}

/// A single compiler/analyzer diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Stable diagnostic code, e.g. `"CS0246"`-shaped.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Document the diagnostic applies to.
    pub document: DocumentId,
    /// Span the diagnostic covers.
    pub span: Span,
}

/// A read-only view over a parsed document's syntax.
///
/// Object-safe: the engine holds `Arc<dyn SyntaxTree>` and never needs to
/// name the collaborator's concrete tree type.
pub trait SyntaxTree: Send + Sync + std::fmt::Debug {
    /// The document's full source text.
    fn text(&self) -> &str;

    /// The node whose span most tightly contains `offset`, if any.
    fn node_at_offset(&self, offset: u32) -> Option<NodeId>;

    /// All descendants of the given structural kind, in source order.
    fn descendants_of_kind(&self, kind: NodeKind) -> Vec<NodeId>;

    /// The byte span of a node.
    fn node_span(&self, node: NodeId) -> Option<Span>;

    /// The structural kind of a node.
    fn node_kind(&self, node: NodeId) -> Option<NodeKind>;

    /// The simple name of a node, for nodes that declare or reference one.
    fn simple_name(&self, node: NodeId) -> Option<&str>;

    /// The nearest enclosing node of the given kind, walking up from `node`.
    fn enclosing(&self, node: NodeId, kind: NodeKind) -> Option<NodeId>;

    /// The immediate containing node, if any. `None` at the root of the tree.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Modifier tokens declared on a node (`public`, `static`, `virtual`, ...).
    ///
    /// Empty for nodes that do not carry modifiers.
    fn modifiers(&self, node: NodeId) -> Vec<String>;

    /// Base-list entries (base class, implemented interfaces) for a type
    /// declaration node, nearest-listed first. Empty for non-type nodes.
    fn base_list(&self, node: NodeId) -> Vec<String>;
}

/// A whole-solution semantic model.
///
/// One `SemanticModel` is derived per `Solution` snapshot (see
/// `refac-workspace`); it is re-derived whenever the snapshot is replaced.
pub trait SemanticModel: Send + Sync {
    /// The symbol declared by `node`, if `node` is a declaration.
    fn declared_symbol_at(&self, document: DocumentId, node: NodeId) -> Option<Symbol>;

    /// The symbol referenced or declared at a byte offset.
    fn symbol_at_offset(&self, document: DocumentId, offset: u32) -> Option<Symbol>;

    /// All declarations in a document whose simple name equals `name`.
    fn declarations_named(&self, document: DocumentId, name: &str) -> Vec<Symbol>;

    /// The static type of an expression node, as a display string.
    fn type_of_expression(&self, document: DocumentId, node: NodeId) -> Option<String>;

    /// The compile-time constant value of an expression, if it is one.
    fn constant_value_of(&self, document: DocumentId, node: NodeId) -> Option<ConstantValue>;

    /// Data-flow analysis over a span (statement range or single expression).
    fn data_flow_analysis(&self, document: DocumentId, span: Span) -> DataFlowResult;

    /// Every syntactic reference to `symbol` reachable from this snapshot.
    fn find_references(&self, symbol: &SymbolKey) -> Vec<ReferenceSite>;

    /// Diagnostics for one document.
    fn diagnostics(&self, document: DocumentId) -> Vec<Diagnostic>;

    /// All symbols this symbol directly overrides (empty if none).
    fn overridden_symbols(&self, symbol: &SymbolKey) -> Vec<Symbol>;

    /// All symbols that directly override or implement this symbol.
    fn overriding_symbols(&self, symbol: &SymbolKey) -> Vec<Symbol>;

    /// Base types and implemented interfaces, nearest first.
    fn base_types(&self, symbol: &SymbolKey) -> Vec<Symbol>;

    /// Direct subtypes known within the loaded solution.
    fn derived_types(&self, symbol: &SymbolKey) -> Vec<Symbol>;

    /// Members declared directly on a type symbol.
    fn members(&self, symbol: &SymbolKey) -> Vec<Symbol>;
}

/// One loaded project's raw (unparsed) documents, as returned by a
/// [`Language`]'s workspace loader.
#[derive(Debug, Clone)]
pub struct RawProject {
    /// Display name.
    pub name: String,
    /// Absolute path to the project file.
    pub path: std::path::PathBuf,
    /// Document paths and their source text, in declaration order.
    pub documents: Vec<(std::path::PathBuf, String)>,
    /// Paths of projects this project references.
    pub project_references: Vec<std::path::PathBuf>,
}

/// Diagnostics produced while loading a solution: missing projects, target
/// mismatches, and other project-level problems that stop short of a hard
/// I/O failure.
#[derive(Debug, Clone, Default)]
pub struct LoadDiagnostics {
    /// Human-readable messages, one per problem found.
    pub messages: Vec<String>,
}

impl LoadDiagnostics {
    /// `true` if loading should be considered a hard failure.
    pub fn is_fatal(&self) -> bool {
        !self.messages.is_empty()
    }
}

/// A target language's pluggable parser + semantic-analysis surface. The
/// engine is generic over `Arc<dyn Language>` and never defines a grammar
/// itself.
pub trait Language: Send + Sync {
    /// The file extension this language's documents use, without a leading dot.
    fn file_extension(&self) -> &'static str;

    /// Load a solution file into its raw, unparsed projects and documents.
    ///
    /// # Errors
    ///
    /// Returns [`LoadDiagnostics`] describing what could not be loaded.
    fn load_solution(
        &self,
        solution_path: &std::path::Path,
    ) -> Result<BTreeMap<std::path::PathBuf, RawProject>, LoadDiagnostics>;

    /// Parse one document's text into a syntax tree.
    fn parse(&self, text: &str) -> Arc<dyn SyntaxTree>;

    /// Build a whole-solution semantic model from every document's parsed tree.
    fn analyze(
        &self,
        documents: &[(DocumentId, std::path::PathBuf, Arc<dyn SyntaxTree>)],
    ) -> Arc<dyn SemanticModel>;
}
