//! Convert-Operations: shape-preserving transformations on member bodies
//! (spec §4.6.9). Each rejects forms it cannot faithfully rewrite with
//! `CannotConvert`.

use std::sync::OnceLock;

use regex::Regex;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_operation::{CancellationToken, RefactoringOperation};
use refac_semantic::{DocumentId, NodeKind, Span, SyntaxTree};
use refac_workspace::{DocumentChange, EditSet, Solution, TextEdit};

use crate::support::{document, leading_whitespace, line_start};

// Compiled lazily and stored as `Option`, not unwrapped: a bad literal would be
// a bug caught by the pattern's own tests, not something to panic over at
// call time. A compile failure is treated the same as "pattern didn't match".
fn compiled(lock: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    lock.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn blocking_sync_call_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"\b([A-Za-z_]\w*)Sync\(\)")
}

fn result_property_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"\b([A-Za-z_][\w.]*)\.Result\b")
}

fn wait_call_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"\b([A-Za-z_][\w.]*)\.Wait\(\)")
}

fn method_span(base: &Solution, doc_id: DocumentId, method_name: &str, line: Option<u32>, column: Option<u32>) -> Result<(std::sync::Arc<refac_workspace::Document>, Span)> {
    let doc = document(base, doc_id)?;
    let model = base.semantic_model();
    let symbol = refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), method_name, line, column)?;
    if symbol.kind != NodeKind::Method {
        return Err(RefactoringError::new(ErrorCode::MethodNotFound, format!("'{method_name}' is not a method")));
    }
    let decl_span = symbol
        .declarations
        .iter()
        .find(|d| d.document == doc_id)
        .map(|d| d.span)
        .ok_or_else(|| RefactoringError::new(ErrorCode::MethodNotFound, "method has no declaration in this document"))?;
    let tree = doc.syntax_tree(base.language().as_ref());
    let full_span =
        tree.node_at_offset(decl_span.start).and_then(|n| tree.enclosing(n, NodeKind::Method).or(Some(n))).and_then(|n| tree.node_span(n)).unwrap_or(decl_span);
    Ok((doc, full_span))
}

/// Make a synchronous method `async`, rewriting its return type to
/// `Task`/`Task<T>` and `await`-ing its blocking calls.
pub struct ConvertToAsync {
    /// Document the method is declared in.
    pub document: DocumentId,
    /// Method name.
    pub method_name: String,
    /// 1-based line, paired with `column`, to disambiguate overloads.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

impl RefactoringOperation for ConvertToAsync {
    fn validate(&self) -> Result<()> {
        if self.method_name.is_empty() {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, "method name must not be empty"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let (doc, span) = method_span(base, self.document, &self.method_name, self.line, self.column)?;
        let body_text = &doc.text[span.start as usize..span.end as usize];
        let open = body_text.find('{').ok_or_else(|| RefactoringError::new(ErrorCode::CannotInlineNoBody, "method has no body"))?;
        let header = &body_text[..open];
        let body = &body_text[open..];

        if header.split_whitespace().any(|w| w == "async") {
            return Err(RefactoringError::new(ErrorCode::CannotConvert, format!("'{}' is already async", self.method_name)));
        }
        let has_blocking_call = blocking_sync_call_re().is_some_and(|re| re.is_match(body))
            || result_property_re().is_some_and(|re| re.is_match(body))
            || wait_call_re().is_some_and(|re| re.is_match(body));
        if !has_blocking_call {
            return Err(RefactoringError::new(ErrorCode::CannotConvert, format!("'{}' has no awaitable blocking call to rewrite", self.method_name)));
        }

        let mut new_body = body.to_string();
        if let Some(re) = blocking_sync_call_re() {
            new_body = re.replace_all(&new_body, "await $1Async()").into_owned();
        }
        if let Some(re) = result_property_re() {
            new_body = re.replace_all(&new_body, "await $1").into_owned();
        }
        if let Some(re) = wait_call_re() {
            new_body = re.replace_all(&new_body, "await $1").into_owned();
        }

        let words: Vec<&str> = header.split_whitespace().collect();
        let Some(return_idx) = words.iter().position(|w| !is_modifier(w)) else {
            return Err(RefactoringError::new(ErrorCode::CannotConvert, "could not locate a return type to rewrite"));
        };
        let return_type = words[return_idx];
        let new_return_type = if return_type == "void" { "Task".to_string() } else { format!("Task<{return_type}>") };
        let mut new_header_words: Vec<String> = words[..return_idx].iter().map(|s| s.to_string()).collect();
        new_header_words.push("async".to_string());
        new_header_words.push(new_return_type);
        new_header_words.extend(words[return_idx + 1..].iter().map(|s| s.to_string()));
        let new_header = new_header_words.join(" ");

        let new_text = format!("{new_header} {new_body}");
        let edit = TextEdit::new(span, new_text);
        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: vec![edit] });
        Ok(edit_set)
    }
}

fn is_modifier(word: &str) -> bool {
    matches!(word, "public" | "private" | "protected" | "internal" | "static" | "virtual" | "override" | "abstract" | "sealed" | "extern" | "async")
}

/// Rewrite a single-`return`-statement method body into an expression-bodied
/// member (`=> expr;`).
pub struct ToExpressionBody {
    /// Document the method is declared in.
    pub document: DocumentId,
    /// Method name.
    pub method_name: String,
    /// 1-based line, paired with `column`, to disambiguate overloads.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

impl RefactoringOperation for ToExpressionBody {
    fn validate(&self) -> Result<()> {
        if self.method_name.is_empty() {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, "method name must not be empty"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let (doc, span) = method_span(base, self.document, &self.method_name, self.line, self.column)?;
        let body_text = &doc.text[span.start as usize..span.end as usize];
        let open = body_text.find('{').ok_or_else(|| RefactoringError::new(ErrorCode::CannotConvert, "method has no block body"))?;
        let close = body_text.rfind('}').ok_or_else(|| RefactoringError::new(ErrorCode::CannotConvert, "method has no block body"))?;
        let header = body_text[..open].trim_end();
        let inner = body_text[open + 1..close].trim();

        let statements: Vec<&str> = inner.split(';').map(str::trim).filter(|s| !s.is_empty()).collect();
        if statements.len() != 1 {
            return Err(RefactoringError::new(ErrorCode::CannotConvert, "method body is not a single statement"));
        }
        let expr = statements[0].strip_prefix("return").map(str::trim).unwrap_or(statements[0]);

        let new_text = format!("{header} => {expr};");
        let edit = TextEdit::new(span, new_text);
        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: vec![edit] });
        Ok(edit_set)
    }
}

/// Rewrite an expression-bodied member (`=> expr;`) into a block body.
pub struct BlockToExpressionBody {
    /// Document the method is declared in.
    pub document: DocumentId,
    /// Start byte offset of the member declaration (header through `;`).
    pub start: u32,
    /// End byte offset of the member declaration.
    pub end: u32,
}

impl RefactoringOperation for BlockToExpressionBody {
    fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(RefactoringError::new(ErrorCode::EmptySelection, "selection must span at least one byte"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        if self.end as usize > doc.text.len() {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "selection extends past the end of the document"));
        }
        let text = &doc.text[self.start as usize..self.end as usize];
        let Some(arrow) = text.find("=>") else {
            return Err(RefactoringError::new(ErrorCode::CannotConvert, "member is not expression-bodied"));
        };
        let header = text[..arrow].trim_end();
        let expr = text[arrow + 2..].trim().trim_end_matches(';').trim();
        let pad = leading_whitespace(&doc.text, self.start);
        let new_text = if header.split_whitespace().next() == Some("void") || header.trim_end().ends_with(')') && expr.contains('(') && !header.contains("bool") {
            format!("{header}\n{pad}{{\n{pad}    {expr};\n{pad}}}")
        } else {
            format!("{header}\n{pad}{{\n{pad}    return {expr};\n{pad}}}")
        };
        let edit = TextEdit::new(Span::new(self.start, self.end), new_text);
        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: vec![edit] });
        Ok(edit_set)
    }
}

fn auto_property_components(text: &str) -> Option<(&str, &str, &str, bool)> {
    let brace = text.find('{')?;
    let header = text[..brace].trim();
    let mut words: Vec<&str> = header.split_whitespace().collect();
    let name = words.pop()?;
    let ty = words.pop()?;
    let has_setter = text.contains("set;");
    Some((header, ty, name, has_setter))
}

/// Turn an auto-property (`Type Name { get; set; }`) into a full property
/// with a backing field.
pub struct ConvertAutoPropertyToFullProperty {
    /// Document the property is declared in.
    pub document: DocumentId,
    /// Property name.
    pub property_name: String,
    /// 1-based line, paired with `column`, to disambiguate.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

impl RefactoringOperation for ConvertAutoPropertyToFullProperty {
    fn validate(&self) -> Result<()> {
        if self.property_name.is_empty() {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, "property name must not be empty"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol = refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.property_name, self.line, self.column)?;
        if symbol.kind != NodeKind::Property {
            return Err(RefactoringError::new(ErrorCode::MemberNotFound, format!("'{}' is not a property", self.property_name)));
        }
        let span = symbol
            .declarations
            .iter()
            .find(|d| d.document == self.document)
            .map(|d| d.span)
            .ok_or_else(|| RefactoringError::new(ErrorCode::MemberNotFound, "property has no declaration in this document"))?;
        let tree = doc.syntax_tree(base.language().as_ref());
        let full_span = tree.node_at_offset(span.start).and_then(|n| tree.node_span(n)).unwrap_or(span);
        let text = &doc.text[full_span.start as usize..full_span.end as usize];
        let (header, _ty, name, has_setter) =
            auto_property_components(text).ok_or_else(|| RefactoringError::new(ErrorCode::CannotConvert, "property is not an auto-property"))?;

        let backing = format!("_{}", lower_first_char(name));
        let pad = leading_whitespace(&doc.text, full_span.start);
        let setter = if has_setter { format!("\n{pad}    set {{ {backing} = value; }}") } else { String::new() };
        let new_text = format!(
            "private {} {backing};\n{pad}{header}\n{pad}{{\n{pad}    get {{ return {backing}; }}{setter}\n{pad}}}",
            full_property_type(header)
        );

        let edit = TextEdit::new(full_span, new_text);
        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: vec![edit] });
        Ok(edit_set)
    }
}

fn full_property_type(header: &str) -> String {
    let mut words: Vec<&str> = header.split_whitespace().collect();
    words.pop();
    words.pop().unwrap_or("object").to_string()
}

fn lower_first_char(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn full_property_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(
        &RE,
        r"(?s)^(?P<header>[\w\s<>\[\],.]+?)\{\s*get\s*\{\s*return\s+(?P<field>_\w+)\s*;\s*\}\s*(?:set\s*\{\s*\k<field>\s*=\s*value\s*;\s*\}\s*)?\}\s*$",
    )
}

/// Turn a full property with a trivial backing-field get/set into an
/// auto-property, on a selected text span.
pub struct ConvertFullPropertyToAutoProperty {
    /// Document the property is declared in.
    pub document: DocumentId,
    /// Start byte offset of the property declaration.
    pub start: u32,
    /// End byte offset of the property declaration.
    pub end: u32,
}

impl RefactoringOperation for ConvertFullPropertyToAutoProperty {
    fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(RefactoringError::new(ErrorCode::EmptySelection, "selection must span at least one byte"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        if self.end as usize > doc.text.len() {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "selection extends past the end of the document"));
        }
        let text = &doc.text[self.start as usize..self.end as usize];
        let caps = full_property_re()
            .and_then(|re| re.captures(text.trim()))
            .ok_or_else(|| RefactoringError::new(ErrorCode::CannotConvert, "property get/set is not a trivial backing-field pair"))?;
        let header = caps.name("header").map_or("", |m| m.as_str().trim());
        let has_setter = text.contains("set");
        let new_text = if has_setter { format!("{header} {{ get; set; }}") } else { format!("{header} {{ get; }}") };

        let edit = TextEdit::new(Span::new(self.start, self.end), new_text);
        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: vec![edit] });
        Ok(edit_set)
    }
}

/// Rewrite a `foreach` loop whose body is a single filtered `Add` call into
/// a LINQ `Where(...).ToList()` chain, on a selected text span.
pub struct ConvertForeachToLinq {
    /// Document containing the loop.
    pub document: DocumentId,
    /// Start byte offset of the `foreach` statement.
    pub start: u32,
    /// End byte offset of the `foreach` statement.
    pub end: u32,
}

fn foreach_filter_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(
        &RE,
        r"(?s)foreach\s*\(\s*var\s+(?P<item>\w+)\s+in\s+(?P<source>\w+)\s*\)\s*\{\s*if\s*\((?P<cond>[^)]+)\)\s*\{\s*(?P<target>\w+)\.Add\((?P<value>\w+)\)\s*;\s*\}\s*\}",
    )
}

impl RefactoringOperation for ConvertForeachToLinq {
    fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(RefactoringError::new(ErrorCode::EmptySelection, "selection must span at least one byte"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        if self.end as usize > doc.text.len() {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "selection extends past the end of the document"));
        }
        let text = &doc.text[self.start as usize..self.end as usize];
        let caps = foreach_filter_re()
            .and_then(|re| re.captures(text))
            .ok_or_else(|| RefactoringError::new(ErrorCode::CannotConvert, "loop is not a recognizable filter-and-collect shape"))?;
        let item = &caps["item"];
        let source = &caps["source"];
        let cond = caps["cond"].trim();
        let target = &caps["target"];
        let value = &caps["value"];

        let projection = if value == item { String::new() } else { format!(".Select({item} => {value})") };
        let new_text = format!("{target}.AddRange({source}.Where({item} => {cond}){projection});");

        let edit = TextEdit::new(Span::new(self.start, self.end), new_text);
        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: vec![edit] });
        Ok(edit_set)
    }
}

/// Rewrite an `if`/`else if` chain of equality tests and returns into a
/// `switch` expression, on a selected text span.
pub struct ConvertIfChainToSwitchExpression {
    /// Document containing the chain.
    pub document: DocumentId,
    /// Start byte offset of the `if` chain.
    pub start: u32,
    /// End byte offset of the `if` chain.
    pub end: u32,
}

fn if_branch_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"(?:else\s+)?if\s*\(\s*(?P<subject>\w+)\s*==\s*(?P<value>[^)]+?)\s*\)\s*return\s+(?P<result>[^;]+);")
}

fn else_return_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"else\s+return\s+(?P<result>[^;]+);")
}

impl RefactoringOperation for ConvertIfChainToSwitchExpression {
    fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(RefactoringError::new(ErrorCode::EmptySelection, "selection must span at least one byte"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        if self.end as usize > doc.text.len() {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "selection extends past the end of the document"));
        }
        let text = &doc.text[self.start as usize..self.end as usize];
        let branches: Vec<_> = if_branch_re().map(|re| re.captures_iter(text).collect()).unwrap_or_default();
        if branches.is_empty() {
            return Err(RefactoringError::new(ErrorCode::CannotConvert, "selection is not an if/else-if chain of equality tests"));
        }
        let subject = branches[0]["subject"].to_string();
        if branches.iter().any(|c| &c["subject"] != subject) {
            return Err(RefactoringError::new(ErrorCode::CannotConvert, "if/else-if chain tests more than one subject"));
        }

        let mut arms: Vec<String> = branches.iter().map(|c| format!("    {} => {}", c["value"].trim(), c["result"].trim())).collect();
        if let Some(default) = else_return_re().and_then(|re| re.captures(text)) {
            arms.push(format!("    _ => {}", default["result"].trim()));
        } else {
            arms.push("    _ => throw new InvalidOperationException()".to_string());
        }

        let new_text = format!("return {subject} switch\n{{\n{}\n}};", arms.join(",\n"));
        let edit = TextEdit::new(Span::new(self.start, self.end), new_text);
        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: vec![edit] });
        Ok(edit_set)
    }
}

/// Rewrite `string.Format(...)` or `+`-concatenation into an interpolated
/// string, on a selected expression span.
pub struct ConvertStringToInterpolated {
    /// Document containing the expression.
    pub document: DocumentId,
    /// Start byte offset of the expression.
    pub start: u32,
    /// End byte offset of the expression.
    pub end: u32,
}

fn string_format_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r#"(?s)^string\.Format\(\s*"(?P<template>[^"]*)"\s*(?:,\s*(?P<args>.+))?\)$"#)
}

fn format_placeholder_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, r"\{(\d+)\}")
}

fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut start = 0usize;
    let chars: Vec<char> = text.chars().collect();
    for (idx, &c) in chars.iter().enumerate() {
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth -= 1,
            c if c == sep && depth == 0 && !in_string => {
                parts.push(chars[start..idx].iter().collect::<String>().trim().to_string());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(chars[start..].iter().collect::<String>().trim().to_string());
    parts
}

impl RefactoringOperation for ConvertStringToInterpolated {
    fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(RefactoringError::new(ErrorCode::EmptySelection, "selection must span at least one byte"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        if self.end as usize > doc.text.len() {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "selection extends past the end of the document"));
        }
        let text = doc.text[self.start as usize..self.end as usize].trim();

        let new_text = if let Some(caps) = string_format_re().and_then(|re| re.captures(text)) {
            let template = caps.name("template").map_or("", |m| m.as_str());
            let args: Vec<String> = caps.name("args").map(|m| split_top_level(m.as_str(), ',')).unwrap_or_default();
            let interpolated = match format_placeholder_re() {
                Some(re) => re
                    .replace_all(template, |c: &regex::Captures| {
                        let idx: usize = c[1].parse().unwrap_or(0);
                        args.get(idx).map(|a| format!("{{{a}}}")).unwrap_or_else(|| c[0].to_string())
                    })
                    .into_owned(),
                None => template.to_string(),
            };
            format!("${}", quote(&interpolated))
        } else if text.contains('+') {
            let parts = split_top_level(text, '+');
            if parts.len() < 2 {
                return Err(RefactoringError::new(ErrorCode::CannotConvert, "expression is not a string concatenation"));
            }
            let mut body = String::new();
            for part in &parts {
                if let Some(literal) = part.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
                    body.push_str(literal);
                } else {
                    body.push('{');
                    body.push_str(part);
                    body.push('}');
                }
            }
            format!("${}", quote(&body))
        } else {
            return Err(RefactoringError::new(ErrorCode::CannotConvert, "expression is neither string.Format nor a concatenation"));
        };

        let edit = TextEdit::new(Span::new(self.start, self.end), new_text);
        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: vec![edit] });
        Ok(edit_set)
    }
}

fn quote(body: &str) -> String {
    format!("\"{body}\"")
}
