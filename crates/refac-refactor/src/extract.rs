//! Extract-Method, Extract-Variable, Extract-Constant, Extract-Interface,
//! and Extract-Base-Class (spec §4.6.4, §4.6.5).

use std::path::PathBuf;

use refac_error::{ErrorCode, RefactoringError, Result};
use refac_ident::{is_valid_absolute_path, is_valid_identifier};
use refac_operation::{CancellationToken, RefactoringOperation};
use refac_semantic::{ConstantValue, DocumentId, NodeKind, SemanticModel, Span, SyntaxTree};
use refac_workspace::{DocumentChange, EditSet, Solution, TextEdit};
use tracing::{debug, instrument};

use crate::support::{document, first_declaration_span, header_signature, indent, insert_base_list_entry, leading_whitespace, line_start};

fn const_type_name(value: &ConstantValue) -> &'static str {
    match value {
        ConstantValue::Int(_) => "int",
        ConstantValue::Float(_) => "double",
        ConstantValue::Str(_) => "string",
        ConstantValue::Bool(_) => "bool",
        ConstantValue::Null => "object",
    }
}

/// Extract a contiguous statement range into a new method, wiring up its
/// parameters and return value from a data-flow analysis of the range.
pub struct ExtractMethod {
    /// Document containing the selection.
    pub document: DocumentId,
    /// Start byte offset of the selected statement range.
    pub start: u32,
    /// End byte offset of the selected statement range.
    pub end: u32,
    /// Name for the new method.
    pub method_name: String,
    /// Access modifier for the new method (`"public"`, `"internal"`, ...).
    pub visibility: String,
    /// Mark the new method `static` regardless of the enclosing member.
    pub force_static: bool,
}

impl RefactoringOperation for ExtractMethod {
    fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.method_name) || self.method_name.contains('.') {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, format!("'{}' is not a valid method name", self.method_name)));
        }
        if self.start >= self.end {
            return Err(RefactoringError::new(ErrorCode::EmptySelection, "selection must span at least one byte"));
        }
        if !matches!(self.visibility.as_str(), "public" | "internal" | "protected" | "private") {
            return Err(RefactoringError::new(ErrorCode::InvalidVisibility, format!("'{}' is not a valid visibility", self.visibility)));
        }
        Ok(())
    }

    #[instrument(skip(self, base, _cancel), fields(method_name = %self.method_name))]
    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        if self.end as usize > doc.text.len() {
            return Err(RefactoringError::new(ErrorCode::InvalidSelection, "selection extends past the end of the document"));
        }

        let model = base.semantic_model();
        let span = Span::new(self.start, self.end);
        let flow = model.data_flow_analysis(self.document, span);
        debug!(contains_await = flow.contains_await, outputs = flow.flows_out.len(), "analyzed extraction range");

        if flow.contains_yield {
            return Err(RefactoringError::new(ErrorCode::ContainsYield, "a `yield` statement cannot be extracted into a method"));
        }
        if flow.has_unstructured_exit {
            return Err(RefactoringError::new(ErrorCode::UnresolvableControlFlow, "selection contains a break/continue/goto targeting outside it"));
        }
        if flow.return_points > 1 {
            return Err(RefactoringError::new(ErrorCode::MultipleExitPoints, "selection contains more than one `return`"));
        }

        let tree = doc.syntax_tree(base.language().as_ref());
        let enclosing = tree.node_at_offset(self.start).and_then(|node| tree.enclosing(node, NodeKind::Method).or_else(|| tree.enclosing(node, NodeKind::Constructor)));
        let enclosing_span = enclosing.and_then(|m| tree.node_span(m));
        let insert_at = enclosing_span.map(|s| s.end).unwrap_or(doc.text.len() as u32);
        let pad = leading_whitespace(&doc.text, line_start(&doc.text, self.start));

        let is_static = self.force_static
            || enclosing.and_then(|m| model.declared_symbol_at(self.document, m)).is_some_and(|s| s.modifiers.is_static);

        let body = doc.text[self.start as usize..self.end as usize].to_string();
        let params = flow.flows_in.iter().map(|n| format!("object {n}")).collect::<Vec<_>>().join(", ");
        let args = flow.flows_in.join(", ");
        let call_args = if flow.contains_await { format!("await {}({args})", self.method_name) } else { format!("{}({args})", self.method_name) };

        let (return_type, call_stmt, return_stmt) = match flow.flows_out.len() {
            0 => ("void".to_string(), format!("{call_args};"), String::new()),
            1 => {
                let out = &flow.flows_out[0];
                ("object".to_string(), format!("{out} = {call_args};"), format!("\n{pad}    return {out};"))
            }
            _ => {
                let names = flow.flows_out.join(", ");
                let tuple_fields = flow.flows_out.iter().map(|n| format!("object {n}")).collect::<Vec<_>>().join(", ");
                (format!("({tuple_fields})"), format!("({names}) = {call_args};"), format!("\n{pad}    return ({names});"))
            }
        };

        let return_type = if flow.contains_await {
            if return_type == "void" { "Task".to_string() } else { format!("Task<{return_type}>") }
        } else {
            return_type
        };
        let static_kw = if is_static { "static " } else { "" };
        let async_kw = if flow.contains_await { "async " } else { "" };

        let method_text = format!(
            "\n\n{pad}{} {async_kw}{static_kw}{return_type} {}({params})\n{pad}{{\n{}{return_stmt}\n{pad}}}",
            self.visibility,
            self.method_name,
            indent(&body, &format!("{pad}    "))
        );

        let mut edits = vec![TextEdit::new(span, call_stmt)];
        edits.push(TextEdit::new(Span::new(insert_at, insert_at), method_text));

        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits });
        Ok(edit_set)
    }
}

/// Introduce a local variable for a selected expression and replace the
/// expression with a reference to it.
pub struct ExtractVariable {
    /// Document containing the selection.
    pub document: DocumentId,
    /// Start byte offset of the selected expression.
    pub start: u32,
    /// End byte offset of the selected expression.
    pub end: u32,
    /// Name for the new local variable.
    pub variable_name: String,
}

impl RefactoringOperation for ExtractVariable {
    fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.variable_name) || self.variable_name.contains('.') {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, format!("'{}' is not a valid variable name", self.variable_name)));
        }
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
        let expr = doc.text[self.start as usize..self.end as usize].trim();
        if expr.is_empty() {
            return Err(RefactoringError::new(ErrorCode::EmptySelection, "selection contains no expression"));
        }

        let line_start_offset = line_start(&doc.text, self.start);
        let pad = leading_whitespace(&doc.text, self.start);
        let decl = format!("var {} = {expr};\n{pad}", self.variable_name);

        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify {
            document: self.document,
            edits: vec![
                TextEdit::new(Span::new(self.start, self.end), self.variable_name.clone()),
                TextEdit::new(Span::new(line_start_offset, line_start_offset), decl),
            ],
        });
        Ok(edit_set)
    }
}

/// Lift a compile-time constant expression into a named `const` field on
/// its enclosing type.
pub struct ExtractConstant {
    /// Document containing the selection.
    pub document: DocumentId,
    /// Start byte offset of the selected expression.
    pub start: u32,
    /// End byte offset of the selected expression.
    pub end: u32,
    /// Name for the new constant.
    pub constant_name: String,
}

impl RefactoringOperation for ExtractConstant {
    fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.constant_name) || self.constant_name.contains('.') {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, format!("'{}' is not a valid constant name", self.constant_name)));
        }
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

        let tree = doc.syntax_tree(base.language().as_ref());
        let node = tree
            .node_at_offset(self.start)
            .ok_or_else(|| RefactoringError::new(ErrorCode::ExpressionNotFound, "no expression at the given offset"))?;
        let model = base.semantic_model();
        let value = model
            .constant_value_of(self.document, node)
            .ok_or_else(|| RefactoringError::new(ErrorCode::ExpressionNotConstant, "selection is not a compile-time constant"))?;

        let enclosing_type = [NodeKind::Class, NodeKind::Struct, NodeKind::Record]
            .into_iter()
            .find_map(|kind| tree.enclosing(node, kind))
            .ok_or_else(|| RefactoringError::new(ErrorCode::TypeNotFound, "selection has no enclosing type to host the constant"))?;
        let type_span = tree
            .node_span(enclosing_type)
            .ok_or_else(|| RefactoringError::new(ErrorCode::TypeNotFound, "enclosing type has no span"))?;
        let type_text = &doc.text[type_span.start as usize..type_span.end as usize];
        let brace_offset = type_text.find('{').ok_or_else(|| RefactoringError::new(ErrorCode::TypeNotFound, "enclosing type has no body"))?;
        let insert_at = type_span.start + brace_offset as u32 + 1;
        let pad = leading_whitespace(&doc.text, type_span.start);

        let expr = doc.text[self.start as usize..self.end as usize].trim();
        let field = format!("\n{pad}    private const {} {} = {expr};\n", const_type_name(&value), self.constant_name);

        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify {
            document: self.document,
            edits: vec![
                TextEdit::new(Span::new(self.start, self.end), self.constant_name.clone()),
                TextEdit::new(Span::new(insert_at, insert_at), field),
            ],
        });
        Ok(edit_set)
    }
}

/// Generate an interface carrying the signatures of a type's public
/// members and make the type implement it.
pub struct ExtractInterface {
    /// Document the source type is declared in.
    pub document: DocumentId,
    /// Name of the type to extract an interface from.
    pub type_name: String,
    /// Name for the new interface.
    pub interface_name: String,
    /// Absolute path of the file to create for the interface.
    pub target_path: PathBuf,
}

impl RefactoringOperation for ExtractInterface {
    fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.type_name) {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, format!("'{}' is not a valid identifier", self.type_name)));
        }
        if !is_valid_identifier(&self.interface_name) {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, format!("'{}' is not a valid identifier", self.interface_name)));
        }
        if !is_valid_absolute_path(&self.target_path.to_string_lossy()) {
            return Err(RefactoringError::new(ErrorCode::InvalidTargetPath, format!("{} is not a valid absolute path", self.target_path.display())));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol = refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.type_name, None, None)?;
        if !symbol.is_moveable_type() {
            return Err(RefactoringError::new(ErrorCode::SymbolNotMoveable, format!("'{}' is not a type declaration", self.type_name)));
        }

        let members: Vec<_> = model
            .members(&symbol.key)
            .into_iter()
            .filter(|m| matches!(m.kind, NodeKind::Method | NodeKind::Property) && m.accessibility == refac_semantic::Accessibility::Public)
            .collect();
        if members.is_empty() {
            return Err(RefactoringError::new(ErrorCode::NoEligibleMembers, format!("'{}' has no public members to extract", self.type_name)));
        }

        let signatures: Vec<String> = members
            .iter()
            .filter_map(|m| {
                let span = m.declarations.first()?.span;
                Some(header_signature(&doc.text[span.start as usize..span.end as usize]))
            })
            .collect();

        let body = signatures.iter().map(|s| format!("    {s}")).collect::<Vec<_>>().join("\n");
        let interface_text = match &symbol.containing_namespace {
            Some(ns) => format!("namespace {ns}\n{{\n    public interface {} \n    {{\n{}\n    }}\n}}\n", self.interface_name, indent(&body, "    ")),
            None => format!("public interface {}\n{{\n{body}\n}}\n", self.interface_name),
        };

        let type_span = first_declaration_span(&symbol)?;
        let decl_text = &doc.text[type_span.start as usize..type_span.end as usize];
        let bases = {
            let tree = doc.syntax_tree(base.language().as_ref());
            let node = tree.descendants_of_kind(symbol.kind).into_iter().find(|n| tree.simple_name(*n) == Some(symbol.simple_name.as_str()));
            node.map(|n| tree.base_list(n)).unwrap_or_default()
        };
        let (offset, insertion) = insert_base_list_entry(decl_text, !bases.is_empty(), &self.interface_name)
            .ok_or_else(|| RefactoringError::new(ErrorCode::TypeNotFound, "type declaration has no body"))?;
        let insert_at = type_span.start + offset as u32;

        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: vec![TextEdit::new(Span::new(insert_at, insert_at), insertion)] });
        edit_set.push(DocumentChange::Create { path: self.target_path.clone(), text: interface_text, based_on: Some(self.document) });
        Ok(edit_set)
    }
}

/// Move a subset of a type's members into a new base class and make the
/// type inherit from it.
pub struct ExtractBaseClass {
    /// Document the source type is declared in.
    pub document: DocumentId,
    /// Name of the type to extract a base class from.
    pub type_name: String,
    /// Simple names of the members to move onto the new base class.
    pub member_names: Vec<String>,
    /// Name for the new base class.
    pub base_class_name: String,
    /// Absolute path of the file to create for the base class.
    pub target_path: PathBuf,
}

impl RefactoringOperation for ExtractBaseClass {
    fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.type_name) || !is_valid_identifier(&self.base_class_name) {
            return Err(RefactoringError::new(ErrorCode::InvalidIdentifier, "type and base class names must be valid identifiers"));
        }
        if self.member_names.is_empty() {
            return Err(RefactoringError::new(ErrorCode::NoEligibleMembers, "at least one member must be selected"));
        }
        if !is_valid_absolute_path(&self.target_path.to_string_lossy()) {
            return Err(RefactoringError::new(ErrorCode::InvalidTargetPath, format!("{} is not a valid absolute path", self.target_path.display())));
        }
        Ok(())
    }

    fn compute(&self, base: &Solution, _cancel: &CancellationToken) -> Result<EditSet> {
        let doc = document(base, self.document)?;
        let model = base.semantic_model();
        let symbol = refac_resolve::resolve_in_file(&doc, base.language().as_ref(), model.as_ref(), &self.type_name, None, None)?;
        if !symbol.is_moveable_type() {
            return Err(RefactoringError::new(ErrorCode::SymbolNotMoveable, format!("'{}' is not a type declaration", self.type_name)));
        }

        let all_members = model.members(&symbol.key);
        let mut selected = Vec::new();
        for name in &self.member_names {
            let member = all_members
                .iter()
                .find(|m| &m.simple_name == name)
                .ok_or_else(|| RefactoringError::new(ErrorCode::MemberNotFound, format!("'{name}' is not a member of '{}'", self.type_name)))?;
            selected.push(member.clone());
        }

        let mut removal_edits = Vec::new();
        let mut moved_text = Vec::new();
        for member in &selected {
            let span = first_declaration_span(member)?;
            moved_text.push(doc.text[span.start as usize..span.end as usize].to_string());
            removal_edits.push(TextEdit::new(span, String::new()));
        }
        let body = moved_text.join("\n\n");

        let base_text = match &symbol.containing_namespace {
            Some(ns) => format!("namespace {ns}\n{{\n    public class {}\n    {{\n{}\n    }}\n}}\n", self.base_class_name, indent(&body, "        ")),
            None => format!("public class {}\n{{\n{}\n}}\n", self.base_class_name, indent(&body, "    ")),
        };

        let type_span = first_declaration_span(&symbol)?;
        let decl_text = &doc.text[type_span.start as usize..type_span.end as usize];
        let (offset, insertion) = insert_base_list_entry(decl_text, false, &self.base_class_name)
            .ok_or_else(|| RefactoringError::new(ErrorCode::TypeNotFound, "type declaration has no body"))?;
        let insert_at = type_span.start + offset as u32;
        removal_edits.push(TextEdit::new(Span::new(insert_at, insert_at), insertion));

        let mut edit_set = EditSet::new();
        edit_set.push(DocumentChange::Modify { document: self.document, edits: removal_edits });
        edit_set.push(DocumentChange::Create { path: self.target_path.clone(), text: base_text, based_on: Some(self.document) });
        Ok(edit_set)
    }
}
