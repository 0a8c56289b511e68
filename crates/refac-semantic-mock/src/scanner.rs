//! Line-oriented scanner that turns brace-on-same-line, C#-shaped source
//! text into a shallow tree of [`NodeKind`]-tagged records.
//!
//! The scanner never looks inside a method body beyond finding its
//! matching closing brace: statement-level detail is out of scope for this
//! mock and is handled as opaque text by the operations that need it.

use std::sync::OnceLock;

use regex::Regex;

use refac_semantic::{NodeId, NodeKind, Span, SyntaxTree};

#[derive(Debug, Clone)]
pub(crate) struct RawNode {
    pub kind: NodeKind,
    pub name: Option<String>,
    pub span: Span,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Raw modifier tokens (`public`, `static`, `virtual`, ...).
    pub modifiers: Vec<String>,
    /// For types: the base-list text after `:` (possibly empty).
    pub base_list: Vec<String>,
}

#[derive(Debug)]
pub struct MockTree {
    text: String,
    pub(crate) nodes: Vec<RawNode>,
}

// Compiled lazily and stored as `Option`: a bad literal is a bug in this
// module's own tests, not something to panic over at scan time. A line that
// fails to match a None pattern simply falls through as unrecognized text,
// same as a line that fails to match a compiled one.
fn compiled(lock: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    lock.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn using_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"^\s*using\s+(static\s+)?([A-Za-z_][\w.]*)(\s*=\s*([A-Za-z_][\w.]*))?\s*;\s*$")
}

fn namespace_block_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"^\s*namespace\s+([A-Za-z_][\w.]*)\s*\{\s*$")
}

fn namespace_file_scoped_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"^\s*namespace\s+([A-Za-z_][\w.]*)\s*;\s*$")
}

fn type_open_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(
        &RE,
        r"^\s*((?:(?:public|internal|private|protected|static|partial|sealed|abstract)\s+)*)(class|struct|interface|enum|record)\s+([A-Za-z_]\w*)(?:\s*:\s*([^\{]+))?\{\s*$",
    )
}

fn delegate_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(
        &RE,
        r"^\s*((?:(?:public|internal|private|protected)\s+)*)delegate\s+([\w<>\[\],. ]+?)\s+([A-Za-z_]\w*)\s*\(([^)]*)\)\s*;\s*$",
    )
}

fn method_open_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(
        &RE,
        r"^\s*((?:(?:public|internal|private|protected|static|virtual|override|abstract|async|extern|sealed)\s+)*)([\w<>\[\],. ]+?)\s+([A-Za-z_]\w*)\s*\(([^)]*)\)\s*\{\s*$",
    )
}

fn ctor_open_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"^\s*((?:(?:public|internal|private|protected|static)\s+)*)([A-Za-z_]\w*)\s*\(([^)]*)\)\s*\{\s*$")
}

fn auto_property_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(
        &RE,
        r"^\s*((?:(?:public|internal|private|protected|static|virtual|override|abstract)\s+)*)([\w<>\[\],. ]+?)\s+([A-Za-z_]\w*)\s*\{\s*get;(\s*set;)?\s*\}\s*$",
    )
}

fn interface_method_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"^\s*([\w<>\[\],. ]+?)\s+([A-Za-z_]\w*)\s*\(([^)]*)\)\s*;\s*$")
}

fn field_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(
        &RE,
        r"^\s*((?:(?:public|internal|private|protected|static|readonly|const)\s+)*)([\w<>\[\],. ]+?)\s+([A-Za-z_]\w*)\s*(=[^;]*)?;\s*$",
    )
}

struct Line {
    text: String,
    start: u32,
}

fn split_lines(text: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut offset = 0u32;
    for raw in text.split_inclusive('\n') {
        let trimmed_end = raw.trim_end_matches(['\n', '\r']);
        lines.push(Line { text: trimmed_end.to_string(), start: offset });
        offset += raw.len() as u32;
    }
    lines
}

fn split_modifiers(modifiers: &str) -> Vec<String> {
    modifiers.split_whitespace().map(str::to_string).collect()
}

fn split_base_list(base_list: Option<&str>) -> Vec<String> {
    base_list
        .map(|s| s.split(',').map(|part| part.trim().to_string()).filter(|p| !p.is_empty()).collect())
        .unwrap_or_default()
}

/// Parse `text` into a [`MockTree`].
///
/// Unrecognized lines (statements inside method bodies, blank lines,
/// comments, closing braces) are simply skipped; they remain part of the
/// enclosing node's span as opaque text.
pub fn parse(text: &str) -> MockTree {
    let lines = split_lines(text);
    let mut nodes: Vec<RawNode> = Vec::new();
    // Stack of (node index, brace_depth_at_open) for block-scoped constructs.
    let mut stack: Vec<usize> = Vec::new();
    let mut depth: i32 = 0;
    // depth at which each open node should close.
    let mut close_depth: Vec<i32> = Vec::new();

    let mut i = 0usize;
    while i < lines.len() {
        let line = &lines[i];
        let opens_brace = line.text.contains('{');
        let closes_brace = line.text.trim() == "}";

        if closes_brace {
            depth -= 1;
            if let Some(&top) = stack.last() {
                if close_depth.last() == Some(&depth) {
                    stack.pop();
                    close_depth.pop();
                    let end = line.start + line.text.len() as u32 + 1;
                    nodes[top].span.end = end;
                }
            }
            i += 1;
            continue;
        }

        let parent = stack.last().copied();

        if let Some(name) = using_re().and_then(|re| re.captures(&line.text)).and_then(|caps| {
            let is_static = caps.get(1).is_some();
            let target = caps.get(2)?.as_str().to_string();
            let alias = caps.get(4).map(|m| m.as_str().to_string());
            Some(match (is_static, alias) {
                (true, _) => format!("static {target}"),
                (false, Some(a)) => format!("{a} = {target}"),
                (false, None) => target,
            })
        }) {
            push_leaf(&mut nodes, parent, NodeKind::UsingDirective, Some(name), &line, Vec::new(), Vec::new());
        } else if let Some(name) = namespace_file_scoped_re().and_then(|re| re.captures(&line.text)).and_then(|c| c.get(1).map(|m| m.as_str().to_string())) {
            // File-scoped namespace: spans to end of file.
            let span = Span::new(line.start, text.len() as u32);
            let idx = nodes.len();
            nodes.push(RawNode {
                kind: NodeKind::Namespace,
                name: Some(name),
                span,
                parent,
                children: Vec::new(),
                modifiers: Vec::new(),
                base_list: Vec::new(),
            });
            attach_child(&mut nodes, parent, idx);
            stack.push(idx);
            close_depth.push(i32::MIN); // never closed by a brace
        } else if let Some(name) = namespace_block_re().and_then(|re| re.captures(&line.text)).and_then(|c| c.get(1).map(|m| m.as_str().to_string())) {
            push_open(&mut nodes, &mut stack, &mut close_depth, depth, parent, NodeKind::Namespace, Some(name), &line, Vec::new(), Vec::new());
            depth += 1;
        } else if let Some(caps) = type_open_re().and_then(|re| re.captures(&line.text)) {
            let modifiers = split_modifiers(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
            let Some(kind) = caps.get(2).and_then(|m| match m.as_str() {
                "class" => Some(NodeKind::Class),
                "struct" => Some(NodeKind::Struct),
                "interface" => Some(NodeKind::Interface),
                "enum" => Some(NodeKind::Enum),
                "record" => Some(NodeKind::Record),
                _ => None,
            }) else {
                i += 1;
                continue;
            };
            let name = caps.get(3).map_or(String::new(), |m| m.as_str().to_string());
            let base_list = split_base_list(caps.get(4).map(|m| m.as_str()));
            push_open(&mut nodes, &mut stack, &mut close_depth, depth, parent, kind, Some(name), &line, modifiers, base_list);
            depth += 1;
        } else if let Some(caps) = delegate_re().and_then(|re| re.captures(&line.text)) {
            let modifiers = split_modifiers(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
            let name = caps.get(3).map_or(String::new(), |m| m.as_str().to_string());
            push_leaf(&mut nodes, parent, NodeKind::Delegate, Some(name), &line, modifiers, Vec::new());
        } else if !opens_brace
            && type_is_member_context(&nodes, parent)
            && interface_method_re().is_some_and(|re| re.is_match(&line.text))
        {
            // Body-less member signature, e.g. an interface method declaration.
            let Some(caps) = interface_method_re().and_then(|re| re.captures(&line.text)) else {
                i += 1;
                continue;
            };
            let name = caps.get(2).map_or(String::new(), |m| m.as_str().to_string());
            push_leaf(&mut nodes, parent, NodeKind::Method, Some(name), &line, vec!["abstract".to_string()], Vec::new());
        } else if opens_brace && type_is_member_context(&nodes, parent) {
            if let Some(caps) = ctor_open_re().and_then(|re| re.captures(&line.text)) {
                let modifiers = split_modifiers(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
                let name = caps.get(2).map_or(String::new(), |m| m.as_str().to_string());
                if parent.and_then(|p| nodes[p].name.clone()).as_deref() == Some(name.as_str()) {
                    push_open(&mut nodes, &mut stack, &mut close_depth, depth, parent, NodeKind::Constructor, Some(name), &line, modifiers, Vec::new());
                    depth += 1;
                } else {
                    push_member_method(&mut nodes, &mut stack, &mut close_depth, &mut depth, parent, &line);
                }
            } else {
                push_member_method(&mut nodes, &mut stack, &mut close_depth, &mut depth, parent, &line);
            }
        } else if let Some(caps) = auto_property_re().and_then(|re| re.captures(&line.text)) {
            let modifiers = split_modifiers(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
            let name = caps.get(3).map_or(String::new(), |m| m.as_str().to_string());
            push_leaf(&mut nodes, parent, NodeKind::Property, Some(name), &line, modifiers, Vec::new());
        } else if let Some(caps) = field_re().and_then(|re| re.captures(&line.text)) {
            let modifiers = split_modifiers(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
            let name = caps.get(3).map_or(String::new(), |m| m.as_str().to_string());
            let kind = if modifiers.iter().any(|m| m == "const") { NodeKind::Constant } else { NodeKind::Field };
            push_leaf(&mut nodes, parent, kind, Some(name), &line, modifiers, Vec::new());
        } else if opens_brace {
            // An unrecognized block opener (e.g. a bare `{` starting a method
            // body already consumed above, or a nested statement block).
            // Treat it as an anonymous Block so brace depth stays balanced.
            push_open(&mut nodes, &mut stack, &mut close_depth, depth, parent, NodeKind::Block, None, &line, Vec::new(), Vec::new());
            depth += 1;
        }

        i += 1;
    }

    MockTree { text: text.to_string(), nodes }
}

fn type_is_member_context(nodes: &[RawNode], parent: Option<usize>) -> bool {
    matches!(
        parent.map(|p| nodes[p].kind),
        Some(NodeKind::Class) | Some(NodeKind::Struct) | Some(NodeKind::Interface) | Some(NodeKind::Record)
    )
}

fn push_member_method(
    nodes: &mut Vec<RawNode>,
    stack: &mut Vec<usize>,
    close_depth: &mut Vec<i32>,
    depth: &mut i32,
    parent: Option<usize>,
    line: &Line,
) {
    if let Some(caps) = method_open_re().and_then(|re| re.captures(&line.text)) {
        let modifiers = split_modifiers(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
        let name = caps.get(3).map_or(String::new(), |m| m.as_str().to_string());
        push_open(nodes, stack, close_depth, *depth, parent, NodeKind::Method, Some(name), line, modifiers, Vec::new());
        *depth += 1;
    } else {
        push_open(nodes, stack, close_depth, *depth, parent, NodeKind::Block, None, line, Vec::new(), Vec::new());
        *depth += 1;
    }
}

#[allow(clippy::too_many_arguments)]
fn push_open(
    nodes: &mut Vec<RawNode>,
    stack: &mut Vec<usize>,
    close_depth: &mut Vec<i32>,
    depth: i32,
    parent: Option<usize>,
    kind: NodeKind,
    name: Option<String>,
    line: &Line,
    modifiers: Vec<String>,
    base_list: Vec<String>,
) {
    let span = Span::new(line.start, line.start + line.text.len() as u32 + 1);
    let idx = nodes.len();
    nodes.push(RawNode { kind, name, span, parent, children: Vec::new(), modifiers, base_list });
    attach_child(nodes, parent, idx);
    stack.push(idx);
    close_depth.push(depth);
}

fn push_leaf(
    nodes: &mut Vec<RawNode>,
    parent: Option<usize>,
    kind: NodeKind,
    name: Option<String>,
    line: &Line,
    modifiers: Vec<String>,
    base_list: Vec<String>,
) {
    let span = Span::new(line.start, line.start + line.text.len() as u32 + 1);
    let idx = nodes.len();
    nodes.push(RawNode { kind, name, span, parent, children: Vec::new(), modifiers, base_list });
    attach_child(nodes, parent, idx);
}

fn attach_child(nodes: &mut [RawNode], parent: Option<usize>, child: usize) {
    if let Some(p) = parent {
        nodes[p].children.push(child);
    }
}

impl SyntaxTree for MockTree {
    fn text(&self) -> &str {
        &self.text
    }

    fn node_at_offset(&self, offset: u32) -> Option<NodeId> {
        let mut best: Option<(usize, u32)> = None;
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.span.start <= offset && offset < node.span.end {
                let width = node.span.len();
                if best.map(|(_, w)| width < w).unwrap_or(true) {
                    best = Some((idx, width));
                }
            }
        }
        best.map(|(idx, _)| NodeId(idx as u32))
    }

    fn descendants_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind == kind)
            .map(|(idx, _)| NodeId(idx as u32))
            .collect()
    }

    fn node_span(&self, node: NodeId) -> Option<Span> {
        self.nodes.get(node.0 as usize).map(|n| n.span)
    }

    fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(node.0 as usize).map(|n| n.kind)
    }

    fn simple_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0 as usize).and_then(|n| n.name.as_deref())
    }

    fn enclosing(&self, node: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut current = self.nodes.get(node.0 as usize)?.parent;
        while let Some(idx) = current {
            if self.nodes[idx].kind == kind {
                return Some(NodeId(idx as u32));
            }
            current = self.nodes[idx].parent;
        }
        None
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0 as usize)?.parent.map(|idx| NodeId(idx as u32))
    }

    fn modifiers(&self, node: NodeId) -> Vec<String> {
        self.nodes.get(node.0 as usize).map(|n| n.modifiers.clone()).unwrap_or_default()
    }

    fn base_list(&self, node: NodeId) -> Vec<String> {
        self.nodes.get(node.0 as usize).map(|n| n.base_list.clone()).unwrap_or_default()
    }
}
