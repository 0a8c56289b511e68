//! Inline-Variable, Inline-Method, and Inline-Constant (spec §4.6.6).

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_operation::{CancellationToken, RefactoringOperation};
use refac_semantic::{ConstantValue, DocumentId, NodeKind, Span, SyntaxTree};
use refac_workspace::{DocumentChange, EditSet, Solution, TextEdit};

use crate::support::{document, full_line_span, line_start};

fn initializer_text(line_text: &str) -> Option<String> {
    let trimmed = line_text.trim_end_matches(['\n', '\r']);
    let semi = trimmed.rfind(';')?;
    let body = &trimmed[..semi];
    let eq = body.find('=')?;
    Some(body[eq + 1..].trim().to_string())
}

fn is_declaration_token(site_span: Span, decl_span: Span) -> bool {
    site_span.overlaps(&decl_span)
}

fn looks_side_effecting(expr: &str) -> bool {
    expr.contains('(') || expr.contains("new ") || expr.contains("++") || expr.contains("--")
}

fn starts_attribute_line(text: &str, offset: u32) -> bool {
    let start = line_start(text, offset) as usize;
    text[start..offset as usize].trim_start().starts_with('[')
}

fn literal_text(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Int(n) => n.to_string(),
        ConstantValue::Float(f) => {
            if f.fract() == 0.0 { format!("{f:.1}") } else { f.to_string() }
        }
        ConstantValue::Str(s) => format!("\"{s}\""),
        ConstantValue::Bool(b) => b.to_string(),
        ConstantValue::Null => "null".to_string(),
    }
}

/// Substitute every read of a local variable with its initializer expression
/// and remove the declaration.
pub struct InlineVariable {
    /// Document the variable is declared in.
    pub document: DocumentId,
    /// Variable name.
    pub variable_name: String,
    /// 1-based line, paired with `column`, to disambiguate.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

impl RefactoringOperation for InlineVariable {
    fn validate(&self) -> Result<()> {
        if self.variable_name.is_empty() {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, "variable name must not be empty"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol =
            refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.variable_name, self.line, self.column)?;
        if symbol.kind != NodeKind::Local {
            return Err(RefactoringError::new(ErrorCode::VariableNotFound, format!("'{}' is not a local variable", self.variable_name)));
        }

        let decl_span = symbol
            .declarations
            .iter()
            .find(|d| d.document == self.document)
            .map(|d| d.span)
            .ok_or_else(|| RefactoringError::new(ErrorCode::VariableNotFound, "variable has no declaration in this document"))?;
        let decl_line = full_line_span(&doc.text, decl_span.start);
        let decl_line_text = &doc.text[decl_line.start as usize..decl_line.end as usize];
        let expr = initializer_text(decl_line_text)
            .ok_or_else(|| RefactoringError::new(ErrorCode::CannotInlineNoBody, format!("'{}' has no initializer to inline", self.variable_name)))?;

        if looks_side_effecting(&expr) {
            return Err(RefactoringError::new(
                ErrorCode::ExpressionHasSideEffects,
                format!("'{}' is initialized with a non-trivial expression", self.variable_name),
            ));
        }

        let refs = refac_refs::find_all(base, model.as_ref(), &symbol.key);
        let sites = refs.by_document.get(&self.document).cloned().unwrap_or_default();
        let uses: Vec<_> = sites.into_iter().filter(|s| !is_declaration_token(s.span, decl_span)).collect();
        if uses.iter().any(|s| s.is_write) {
            return Err(RefactoringError::new(ErrorCode::CannotInlineReassigned, format!("'{}' is reassigned after its declaration", self.variable_name)));
        }

        let replacement = if expr.contains(' ') { format!("({expr})") } else { expr };
        let mut edits: Vec<TextEdit> = uses.into_iter().map(|s| TextEdit::new(s.span, replacement.clone())).collect();
        edits.push(TextEdit::new(decl_line, String::new()));

        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits });
        Ok(edit_set)
    }
}

/// Substitute every call to a parameterless method with its single return
/// expression and remove the method.
pub struct InlineMethod {
    /// Document the method is declared in.
    pub document: DocumentId,
    /// Method name.
    pub method_name: String,
    /// 1-based line, paired with `column`, to disambiguate.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

impl RefactoringOperation for InlineMethod {
    fn validate(&self) -> Result<()> {
        if self.method_name.is_empty() {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, "method name must not be empty"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol = refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.method_name, self.line, self.column)?;
        if symbol.kind != NodeKind::Method {
            return Err(RefactoringError::new(ErrorCode::MethodNotFound, format!("'{}' is not a method", self.method_name)));
        }
        if symbol.modifiers.is_virtual || symbol.modifiers.is_override || symbol.modifiers.is_abstract {
            return Err(RefactoringError::new(ErrorCode::CannotInlineVirtual, format!("'{}' participates in virtual dispatch", self.method_name)));
        }

        let decl_span = symbol
            .declarations
            .iter()
            .find(|d| d.document == self.document)
            .map(|d| d.span)
            .ok_or_else(|| RefactoringError::new(ErrorCode::MethodNotFound, "method has no declaration in this document"))?;

        let tree = doc.syntax_tree(base.language().as_ref());
        let full_span = tree
            .node_at_offset(decl_span.start)
            .and_then(|n| tree.enclosing(n, NodeKind::Method).or(Some(n)))
            .and_then(|n| tree.node_span(n))
            .unwrap_or(decl_span);
        let body_text = &doc.text[full_span.start as usize..full_span.end as usize];

        if body_text.contains(&format!("{}(", self.method_name)) && body_text.matches(&format!("{}(", self.method_name)).count() > 1 {
            return Err(RefactoringError::new(ErrorCode::CannotInlineRecursive, format!("'{}' calls itself", self.method_name)));
        }

        let open = body_text.find('{').ok_or_else(|| RefactoringError::new(ErrorCode::CannotInlineNoBody, "method has no body"))?;
        let close = body_text
            .rfind('}')
            .ok_or_else(|| RefactoringError::new(ErrorCode::CannotInlineNoBody, "method has no body"))?;
        let inner = body_text[open + 1..close].trim();
        let expr = inner
            .strip_prefix("return")
            .map(str::trim)
            .and_then(|s| s.strip_suffix(';'))
            .map(str::trim)
            .ok_or_else(|| RefactoringError::new(ErrorCode::CannotInlineNoBody, "method body is not a single return expression"))?;

        let header = &body_text[..open];
        if !header.trim_end().ends_with("()") {
            return Err(RefactoringError::new(ErrorCode::CannotInlineNoBody, "only parameterless methods can be inlined"));
        }

        let refs = refac_refs::find_all(base, model.as_ref(), &symbol.key);
        let mut edit_set = EditSet::new();
        for (document_id, sites) in &refs.by_document {
            let mut edits = Vec::new();
            for site in sites {
                if *document_id == self.document && site.span.overlaps(&decl_span) {
                    continue;
                }
                let after = &doc.text[site.span.end as usize..];
                if !after.starts_with("()") {
                    return Err(RefactoringError::new(ErrorCode::CannotInlineNoBody, "call site is not a simple no-argument invocation"));
                }
                let call_span = Span::new(site.span.start, site.span.end + 2);
                let replacement = if expr.contains(' ') { format!("({expr})") } else { expr.to_string() };
                edits.push(TextEdit::new(call_span, replacement));
            }
            if *document_id == self.document {
                edits.push(TextEdit::new(full_span, String::new()));
            }
            if !edits.is_empty() {
                edit_set.push(DocumentChange::Modify { document: *document_id, edits });
            }
        }
        Ok(edit_set)
    }
}

/// Substitute every read of a constant with its literal value and remove
/// the declaration.
pub struct InlineConstant {
    /// Document the constant is declared in.
    pub document: DocumentId,
    /// Constant name.
    pub constant_name: String,
    /// 1-based line, paired with `column`, to disambiguate.
    pub line: Option<u32>,
    /// 1-based column, paired with `line`.
    pub column: Option<u32>,
}

impl RefactoringOperation for InlineConstant {
    fn validate(&self) -> Result<()> {
        if self.constant_name.is_empty() {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, "constant name must not be empty"));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol = refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.constant_name, self.line, self.column)?;
        if symbol.kind != NodeKind::Constant {
            return Err(RefactoringError::new(ErrorCode::VariableNotFound, format!("'{}' is not a constant", self.constant_name)));
        }

        let decl_span = symbol
            .declarations
            .iter()
            .find(|d| d.document == self.document)
            .map(|d| d.span)
            .ok_or_else(|| RefactoringError::new(ErrorCode::VariableNotFound, "constant has no declaration in this document"))?;
        let tree = doc.syntax_tree(base.language().as_ref());
        let node = tree
            .node_at_offset(decl_span.start)
            .ok_or_else(|| RefactoringError::new(ErrorCode::ExpressionNotConstant, "could not locate the constant's declaration node"))?;
        let value = model
            .constant_value_of(self.document, node)
            .ok_or_else(|| RefactoringError::new(ErrorCode::ExpressionNotConstant, format!("'{}' has no determinable constant value", self.constant_name)))?;
        let literal = literal_text(&value);

        let refs = refac_refs::find_all(base, model.as_ref(), &symbol.key);
        let mut edit_set = EditSet::new();
        for (document_id, sites) in &refs.by_document {
            let doc_text = document(base, *document_id)?.text.clone();
            let mut edits = Vec::new();
            for site in sites {
                if *document_id == self.document && site.span.overlaps(&decl_span) {
                    continue;
                }
                if starts_attribute_line(&doc_text, site.span.start) {
                    return Err(RefactoringError::new(
                        ErrorCode::ConstantUsedInAttribute,
                        format!("'{}' is used inside an attribute and cannot be inlined", self.constant_name),
                    ));
                }
                edits.push(TextEdit::new(site.span, literal.clone()));
            }
            if *document_id == self.document {
                edits.push(TextEdit::new(full_line_span(&doc.text, decl_span.start), String::new()));
            }
            if !edits.is_empty() {
                edit_set.push(DocumentChange::Modify { document: *document_id, edits });
            }
        }
        Ok(edit_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refac_semantic::Language as _;
    use refac_semantic_mock::MockLanguage;
    use refac_workspace::{Document, Project};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn solution(text: &str) -> Arc<Solution> {
        let doc = Document::new(DocumentId(0), PathBuf::from("/ws/Src/A.cs"), text);
        let mut documents = BTreeMap::new();
        documents.insert(doc.id, Arc::new(doc));
        let project = Project {
            name: "Ws".into(),
            path: "/ws/Ws.csproj".into(),
            documents: vec![DocumentId(0)],
            project_references: Vec::new(),
            language_tag: "cs".into(),
        };
        Arc::new(Solution::new(Arc::new(MockLanguage), vec![project], documents))
    }

    #[test]
    fn inline_variable_substitutes_and_removes_the_declaration() {
        const SRC: &str = "namespace App {\n    public class Calc {\n        public int Run() {\n            var total = 1 + 2;\n            return total;\n        }\n    }\n}\n";
        let base = solution(SRC);
        let op = InlineVariable { document: DocumentId(0), variable_name: "total".into(), line: None, column: None };
        let edits = op.compute(&base, &CancellationToken::new()).unwrap();
        let DocumentChange::Modify { edits, .. } = &edits.changes[0] else { panic!("expected Modify") };
        assert!(edits.iter().any(|e| e.new_text.contains("1 + 2")));
        assert!(edits.iter().any(|e| e.new_text.is_empty()));
    }

    #[test]
    fn inline_constant_requires_a_constant_kind() {
        const SRC: &str = "namespace App {\n    public class Calc {\n        public int Run() {\n            return 1;\n        }\n    }\n}\n";
        let base = solution(SRC);
        let op = InlineConstant { document: DocumentId(0), constant_name: "Run".into(), line: None, column: None };
        let err = op.compute(&base, &CancellationToken::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::VariableNotFound);
    }
}
