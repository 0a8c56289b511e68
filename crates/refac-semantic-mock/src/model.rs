//! Whole-solution semantic model built over one or more parsed syntax trees.
//!
//! Symbol identity is a fully qualified name string; nothing here compares
//! nodes across documents by anything else. `find_references` and
//! `data_flow_analysis` are textual heuristics, not real binding: good
//! enough to exercise the operations above this crate, not a stand-in for a
//! real compiler's binder.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use refac_semantic::{
    Accessibility, ConstantValue, DataFlowResult, DeclarationLocation, Diagnostic, DocumentId, NodeId, NodeKind,
    ReferenceSite, SemanticModel, Span, Symbol, SymbolKey, SymbolModifiers, SyntaxTree,
};

const TYPE_KINDS: &[NodeKind] =
    &[NodeKind::Class, NodeKind::Struct, NodeKind::Interface, NodeKind::Enum, NodeKind::Record, NodeKind::Delegate];

const MEMBER_KINDS: &[NodeKind] = &[
    NodeKind::Method,
    NodeKind::Constructor,
    NodeKind::Destructor,
    NodeKind::Operator,
    NodeKind::Indexer,
    NodeKind::Property,
    NodeKind::Field,
    NodeKind::Event,
    NodeKind::Constant,
];

struct Entry {
    symbol: Symbol,
    document: DocumentId,
    node: NodeId,
}

/// A [`SemanticModel`] over the documents parsed by [`crate::MockLanguage`].
pub struct MockSemanticModel {
    documents: Vec<(DocumentId, PathBuf, Arc<dyn SyntaxTree>)>,
    entries: Vec<Entry>,
    by_key: BTreeMap<SymbolKey, usize>,
}

impl MockSemanticModel {
    /// Index every type and member declaration across `documents`.
    pub fn build(documents: Vec<(DocumentId, PathBuf, Arc<dyn SyntaxTree>)>) -> Self {
        let mut entries: Vec<Entry> = Vec::new();
        let mut by_key: BTreeMap<SymbolKey, usize> = BTreeMap::new();

        for (doc_id, _path, tree) in &documents {
            let tree = tree.as_ref();
            for kind in TYPE_KINDS.iter().chain(MEMBER_KINDS.iter()).copied() {
                for node in tree.descendants_of_kind(kind) {
                    let Some(name) = tree.simple_name(node).map(str::to_string) else { continue };
                    let fqn = fully_qualified_name(tree, node, &name);
                    let key = SymbolKey(fqn.clone());
                    let span = tree.node_span(node).unwrap_or(Span::new(0, 0));
                    let raw_modifiers = tree.modifiers(node);
                    let containing_type = enclosing_type_name(tree, node);
                    let accessibility = accessibility_of(&raw_modifiers, containing_type.is_none());
                    let decl = DeclarationLocation { document: *doc_id, span };

                    if let Some(&idx) = by_key.get(&key) {
                        entries[idx].symbol.declarations.push(decl);
                        continue;
                    }

                    let symbol = Symbol {
                        key: key.clone(),
                        simple_name: name,
                        fully_qualified_name: fqn,
                        kind,
                        containing_namespace: enclosing_namespace(tree, node),
                        containing_type,
                        accessibility,
                        declarations: vec![decl],
                        is_synthesized: false,
                        is_external: false,
                        modifiers: symbol_modifiers(&raw_modifiers),
                    };
                    let idx = entries.len();
                    entries.push(Entry { symbol, document: *doc_id, node });
                    by_key.insert(key, idx);
                }
            }
        }

        Self { documents, entries, by_key }
    }

    fn tree_for(&self, document: DocumentId) -> Option<&dyn SyntaxTree> {
        self.documents.iter().find(|(id, _, _)| *id == document).map(|(_, _, t)| t.as_ref())
    }

    fn resolve_type_name(&self, name: &str) -> Symbol {
        if let Some(found) = self.entries.iter().find(|e| e.symbol.fully_qualified_name == name || e.symbol.simple_name == name)
        {
            return found.symbol.clone();
        }
        let looks_like_interface = name.len() > 1 && name.starts_with('I') && name[1..2].chars().all(|c| c.is_uppercase());
        Symbol {
            key: SymbolKey(name.to_string()),
            simple_name: name.to_string(),
            fully_qualified_name: name.to_string(),
            kind: if looks_like_interface { NodeKind::Interface } else { NodeKind::Class },
            containing_namespace: None,
            containing_type: None,
            accessibility: Accessibility::Public,
            declarations: Vec::new(),
            is_synthesized: false,
            is_external: true,
            modifiers: SymbolModifiers::default(),
        }
    }
}

fn fully_qualified_name(tree: &dyn SyntaxTree, node: NodeId, simple_name: &str) -> String {
    let mut segments = vec![simple_name.to_string()];
    let mut current = tree.parent(node);
    while let Some(idx) = current {
        if matches!(
            tree.node_kind(idx),
            Some(NodeKind::Namespace) | Some(NodeKind::Class) | Some(NodeKind::Struct) | Some(NodeKind::Interface) | Some(NodeKind::Record)
        ) {
            if let Some(name) = tree.simple_name(idx) {
                segments.push(name.to_string());
            }
        }
        current = tree.parent(idx);
    }
    segments.reverse();
    segments.join(".")
}

fn enclosing_namespace(tree: &dyn SyntaxTree, node: NodeId) -> Option<String> {
    tree.enclosing(node, NodeKind::Namespace).and_then(|n| tree.simple_name(n)).map(str::to_string)
}

fn enclosing_type_name(tree: &dyn SyntaxTree, node: NodeId) -> Option<String> {
    let parent = tree.parent(node)?;
    match tree.node_kind(parent) {
        Some(NodeKind::Class) | Some(NodeKind::Struct) | Some(NodeKind::Interface) | Some(NodeKind::Record) => {
            let name = tree.simple_name(parent)?;
            Some(fully_qualified_name(tree, parent, name))
        }
        _ => None,
    }
}

fn accessibility_of(modifiers: &[String], is_top_level: bool) -> Accessibility {
    let has = |m: &str| modifiers.iter().any(|x| x == m);
    match (has("public"), has("private"), has("protected"), has("internal")) {
        (true, ..) => Accessibility::Public,
        (_, true, true, _) => Accessibility::PrivateProtected,
        (_, _, true, true) => Accessibility::ProtectedInternal,
        (_, true, false, false) => Accessibility::Private,
        (_, false, true, false) => Accessibility::Protected,
        (_, false, false, true) => Accessibility::Internal,
        _ if is_top_level => Accessibility::Internal,
        _ => Accessibility::Private,
    }
}

fn symbol_modifiers(modifiers: &[String]) -> SymbolModifiers {
    let has = |m: &str| modifiers.iter().any(|x| x == m);
    SymbolModifiers {
        is_virtual: has("virtual"),
        is_override: has("override"),
        is_abstract: has("abstract"),
        is_static: has("static"),
        is_extern: has("extern"),
        is_async: has("async"),
        is_partial: has("partial"),
    }
}

// Compiled lazily and stored as `Option`: a bad literal is a bug in this
// module's own tests, not something to panic over at call time.
fn compiled(lock: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    lock.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn identifier_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"[A-Za-z_]\w*")
}

fn local_decl_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"^\s*(?:var|[A-Za-z_][\w<>\[\],.]*)\s+([A-Za-z_]\w*)\s*(?:=[^;]*)?;\s*$")
}

fn return_point_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"\breturn\b")
}

fn unstructured_exit_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"\b(?:break|continue|goto)\b")
}

fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "var" | "int"
            | "string"
            | "bool"
            | "double"
            | "float"
            | "long"
            | "decimal"
            | "object"
            | "char"
            | "void"
            | "return"
            | "if"
            | "else"
            | "for"
            | "foreach"
            | "while"
            | "do"
            | "switch"
            | "case"
            | "new"
            | "true"
            | "false"
            | "null"
            | "await"
            | "async"
            | "yield"
            | "break"
            | "continue"
            | "goto"
            | "public"
            | "private"
            | "protected"
            | "internal"
            | "static"
            | "readonly"
            | "const"
            | "class"
            | "struct"
            | "interface"
            | "this"
            | "base"
            | "in"
            | "out"
            | "ref"
    )
}

fn identifiers(text: &str) -> HashSet<String> {
    let Some(re) = identifier_re() else { return HashSet::new() };
    re.find_iter(text).map(|m| m.as_str().to_string()).filter(|w| !is_keyword(w)).collect()
}

fn contains_word(text: &str, word: &str) -> bool {
    // Small, fixed set of callers; building the pattern per call keeps the
    // keyword out of the static-regex cache key.
    Regex::new(&format!(r"\b{word}\b")).map(|re| re.is_match(text)).unwrap_or(false)
}

impl SemanticModel for MockSemanticModel {
    fn declared_symbol_at(&self, document: DocumentId, node: NodeId) -> Option<Symbol> {
        self.entries.iter().find(|e| e.document == document && e.node == node).map(|e| e.symbol.clone())
    }

    fn symbol_at_offset(&self, document: DocumentId, offset: u32) -> Option<Symbol> {
        let tree = self.tree_for(document)?;
        if let Some(node) = tree.node_at_offset(offset) {
            if let Some(symbol) = self.declared_symbol_at(document, node) {
                return Some(symbol);
            }
        }
        let text = tree.text();
        let word = identifier_re()?.find_iter(text).find(|m| m.start() <= offset as usize && (offset as usize) < m.end())?;
        let word = word.as_str();
        self.entries
            .iter()
            .find(|e| e.document == document && e.symbol.simple_name == word)
            .or_else(|| self.entries.iter().find(|e| e.symbol.simple_name == word))
            .map(|e| e.symbol.clone())
    }

    fn declarations_named(&self, document: DocumentId, name: &str) -> Vec<Symbol> {
        self.entries
            .iter()
            .filter(|e| e.document == document && e.symbol.simple_name == name)
            .map(|e| e.symbol.clone())
            .collect()
    }

    fn type_of_expression(&self, _document: DocumentId, _node: NodeId) -> Option<String> {
        // This mock never infers expression types; real collaborators do.
        None
    }

    fn constant_value_of(&self, document: DocumentId, node: NodeId) -> Option<ConstantValue> {
        let tree = self.tree_for(document)?;
        let span = tree.node_span(node)?;
        let text = tree.text().get(span.start as usize..span.end as usize)?;
        parse_constant(text)
    }

    fn data_flow_analysis(&self, document: DocumentId, span: Span) -> DataFlowResult {
        let Some(tree) = self.tree_for(document) else { return DataFlowResult::default() };
        let full_text = tree.text();

        let method_span = tree
            .node_at_offset(span.start)
            .and_then(|node| {
                if matches!(tree.node_kind(node), Some(NodeKind::Method) | Some(NodeKind::Constructor)) {
                    tree.node_span(node)
                } else {
                    tree.enclosing(node, NodeKind::Method).or_else(|| tree.enclosing(node, NodeKind::Constructor)).and_then(|m| tree.node_span(m))
                }
            })
            .unwrap_or(Span::new(0, full_text.len() as u32));

        let method_start = method_span.start as usize;
        let method_end = (method_span.end as usize).min(full_text.len());
        let sel_start = (span.start as usize).clamp(method_start, method_end);
        let sel_end = (span.end as usize).clamp(method_start, method_end);

        let before_text = &full_text[method_start..sel_start];
        let range_text = &full_text[sel_start..sel_end];
        let after_text = &full_text[sel_end..method_end];

        let declared_in_range: Vec<String> = match local_decl_re() {
            Some(re) => range_text.lines().filter_map(|line| re.captures(line).map(|c| c[1].to_string())).collect(),
            None => Vec::new(),
        };
        let declared_set: HashSet<&str> = declared_in_range.iter().map(String::as_str).collect();

        let range_idents = identifiers(range_text);
        let before_idents = identifiers(before_text);
        let after_idents = identifiers(after_text);

        let mut flows_in: Vec<String> =
            range_idents.iter().filter(|n| !declared_set.contains(n.as_str()) && before_idents.contains(*n)).cloned().collect();
        flows_in.sort();

        let mut flows_out: Vec<String> = range_idents
            .iter()
            .filter(|n| !declared_set.contains(n.as_str()) && after_idents.contains(*n) && !before_idents.contains(*n))
            .cloned()
            .collect();
        flows_out.sort();

        let mut used_after_range: Vec<String> =
            declared_in_range.iter().filter(|n| after_idents.contains(n.as_str())).cloned().collect();
        used_after_range.sort();

        DataFlowResult {
            flows_in,
            flows_out,
            declared_in_range,
            used_after_range,
            contains_await: contains_word(range_text, "await"),
            contains_yield: contains_word(range_text, "yield"),
            return_points: return_point_re().map(|re| re.find_iter(&full_text[method_start..method_end]).count()).unwrap_or(0),
            has_unstructured_exit: unstructured_exit_re().is_some_and(|re| re.is_match(range_text)),
        }
    }

    fn find_references(&self, symbol: &SymbolKey) -> Vec<ReferenceSite> {
        let Some(&idx) = self.by_key.get(symbol) else { return Vec::new() };
        let name = &self.entries[idx].symbol.simple_name;
        let Ok(word_re) = Regex::new(&format!(r"\b{}\b", regex::escape(name))) else { return Vec::new() };

        let mut sites = Vec::new();
        for (doc_id, _path, tree) in &self.documents {
            let text = tree.text();
            for m in word_re.find_iter(text) {
                let trailing = text[m.end()..].trim_start();
                let is_write = trailing.starts_with('=') && !trailing.starts_with("==");
                sites.push(ReferenceSite {
                    document: *doc_id,
                    span: Span::new(m.start() as u32, m.end() as u32),
                    is_write,
                    is_implicit: false,
                    symbol: symbol.clone(),
                });
            }
        }
        sites
    }

    fn diagnostics(&self, _document: DocumentId) -> Vec<Diagnostic> {
        // This mock never runs a compiler; it has no diagnostics of its own
        // to report. `refac-query`'s diagnostics query simply returns empty.
        Vec::new()
    }

    fn overridden_symbols(&self, symbol: &SymbolKey) -> Vec<Symbol> {
        let Some(&idx) = self.by_key.get(symbol) else { return Vec::new() };
        let entry = &self.entries[idx];
        if !entry.symbol.modifiers.is_override {
            return Vec::new();
        }
        let Some(containing) = entry.symbol.containing_type.clone() else { return Vec::new() };
        let Some(&type_idx) = self.by_key.get(&SymbolKey(containing)) else { return Vec::new() };
        let base_key = self.entries[type_idx].symbol.key.clone();
        self.base_types(&base_key)
            .into_iter()
            .filter_map(|base| self.members(&base.key).into_iter().find(|m| m.simple_name == entry.symbol.simple_name))
            .collect()
    }

    fn overriding_symbols(&self, symbol: &SymbolKey) -> Vec<Symbol> {
        let Some(&idx) = self.by_key.get(symbol) else { return Vec::new() };
        let entry = &self.entries[idx];
        let Some(containing) = entry.symbol.containing_type.clone() else { return Vec::new() };
        let Some(&type_idx) = self.by_key.get(&SymbolKey(containing)) else { return Vec::new() };
        let type_key = self.entries[type_idx].symbol.key.clone();
        self.derived_types(&type_key)
            .into_iter()
            .filter_map(|derived| {
                self.members(&derived.key).into_iter().find(|m| m.simple_name == entry.symbol.simple_name && m.modifiers.is_override)
            })
            .collect()
    }

    fn base_types(&self, symbol: &SymbolKey) -> Vec<Symbol> {
        let Some(&idx) = self.by_key.get(symbol) else { return Vec::new() };
        let entry = &self.entries[idx];
        let Some(tree) = self.tree_for(entry.document) else { return Vec::new() };
        tree.base_list(entry.node).iter().map(|name| self.resolve_type_name(name)).collect()
    }

    fn derived_types(&self, symbol: &SymbolKey) -> Vec<Symbol> {
        let Some(&idx) = self.by_key.get(symbol) else { return Vec::new() };
        let target_simple = self.entries[idx].symbol.simple_name.clone();
        let target_fqn = self.entries[idx].symbol.fully_qualified_name.clone();

        let mut out = Vec::new();
        for entry in &self.entries {
            if !TYPE_KINDS.contains(&entry.symbol.kind) {
                continue;
            }
            let Some(tree) = self.tree_for(entry.document) else { continue };
            let bases = tree.base_list(entry.node);
            if bases.iter().any(|b| *b == target_simple || *b == target_fqn) {
                out.push(entry.symbol.clone());
            }
        }
        out
    }

    fn members(&self, symbol: &SymbolKey) -> Vec<Symbol> {
        let Some(&idx) = self.by_key.get(symbol) else { return Vec::new() };
        let fqn = &self.entries[idx].symbol.fully_qualified_name;
        self.entries.iter().filter(|e| e.symbol.containing_type.as_deref() == Some(fqn.as_str())).map(|e| e.symbol.clone()).collect()
    }
}

fn parse_constant(text: &str) -> Option<ConstantValue> {
    // Field/constant nodes span the whole declaration line in this mock, not
    // just the initializer expression; take the text after the last `=` so a
    // full `public const int Max = 42;` line still yields its literal.
    let source = text.rsplit('=').next().unwrap_or(text);
    let t = source.trim().trim_end_matches(';').trim();
    match t {
        "null" => return Some(ConstantValue::Null),
        "true" => return Some(ConstantValue::Bool(true)),
        "false" => return Some(ConstantValue::Bool(false)),
        _ => {}
    }
    if let Some(inner) = t.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return Some(ConstantValue::Str(inner.to_string()));
    }
    if let Ok(i) = t.parse::<i64>() {
        return Some(ConstantValue::Int(i));
    }
    if let Ok(f) = t.parse::<f64>() {
        return Some(ConstantValue::Float(f));
    }
    None
}
