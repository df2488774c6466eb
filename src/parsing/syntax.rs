//! Grammar-accurate parser built on tree-sitter.
//!
//! Parses with the TSX grammar (a superset that also covers plain TypeScript
//! and JavaScript) and reads exact declaration boundaries off the tree. Each
//! call registers the content as a uniquely named virtual file in an
//! in-memory workspace; the registration is released on every exit path,
//! including parse failure, so a long-running indexer never accumulates
//! stale parse contexts.

use super::{ParseStrategy, is_hook_name, is_pascal_case, signature_of};
use crate::types::{ParseError, SemanticUnit, UnitKind};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};
use tree_sitter::{Node, Parser};

/// In-memory registry of transient parse documents.
///
/// Paths are suffixed with a timestamp and a per-instance sequence number so
/// repeated parses of the same file never collide. Entries live only for the
/// duration of one `parse_file` call.
struct VirtualWorkspace {
    files: RefCell<HashSet<String>>,
    seq: Cell<u64>,
}

impl VirtualWorkspace {
    fn new() -> Self {
        Self {
            files: RefCell::new(HashSet::new()),
            seq: Cell::new(0),
        }
    }

    fn open(&self, file_path: &str) -> VirtualFile<'_> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seq = self.seq.get();
        self.seq.set(seq.wrapping_add(1));
        let path = format!("{file_path}.{stamp}.{seq}.vf.tsx");
        self.files.borrow_mut().insert(path.clone());
        VirtualFile {
            registry: &self.files,
            path,
        }
    }
}

/// Guard for one registered virtual file. Dropping it removes the registry
/// entry, which is what guarantees release on early returns and panics.
struct VirtualFile<'a> {
    registry: &'a RefCell<HashSet<String>>,
    path: String,
}

impl VirtualFile<'_> {
    fn path(&self) -> &str {
        &self.path
    }
}

impl Drop for VirtualFile<'_> {
    fn drop(&mut self) {
        self.registry.borrow_mut().remove(&self.path);
    }
}

/// Tree-sitter-backed segmentation strategy.
///
/// Reuses one grammar context and one virtual workspace across calls, so the
/// type is intentionally `!Sync`: concurrent callers hold one instance per
/// worker rather than sharing one behind a lock.
pub struct SyntaxTreeParser {
    parser: RefCell<Parser>,
    workspace: VirtualWorkspace,
}

impl Default for SyntaxTreeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTreeParser {
    pub fn new() -> Self {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .expect("TSX grammar must be compatible with the linked tree-sitter runtime");
        Self {
            parser: RefCell::new(parser),
            workspace: VirtualWorkspace::new(),
        }
    }

    /// Number of virtual files currently registered. Zero whenever no
    /// `parse_file` call is in flight; exposed so leak regressions are
    /// testable.
    pub fn open_virtual_files(&self) -> usize {
        self.workspace.files.borrow().len()
    }
}

impl ParseStrategy for SyntaxTreeParser {
    fn name(&self) -> &'static str {
        "syntax-tree"
    }

    fn parse_file(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<Vec<SemanticUnit>, ParseError> {
        let scratch = self.workspace.open(file_path);
        tracing::trace!(
            file = file_path,
            virtual_file = scratch.path(),
            "parsing in virtual context"
        );

        let tree = self
            .parser
            .borrow_mut()
            .parse(content, None)
            .ok_or_else(|| ParseError::Syntax {
                path: file_path.to_string(),
                detail: "grammar produced no tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::Syntax {
                path: file_path.to_string(),
                detail: match first_error_line(root) {
                    Some(line) => format!("syntax error near line {line}"),
                    None => "syntax error".to_string(),
                },
            });
        }

        let lines: Vec<&str> = content.lines().collect();
        let mut units = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "export_statement" {
                if let Some(decl) = child.child_by_field_name("declaration") {
                    if let Some(unit) = unit_for(decl, child, true, content, &lines) {
                        units.push(unit);
                    }
                }
            } else if let Some(unit) = unit_for(child, child, false, content, &lines) {
                units.push(unit);
            }
        }

        units.sort_by_key(|u| u.start_line);
        tracing::debug!(
            file = file_path,
            units = units.len(),
            "syntax-tree segmentation complete"
        );
        Ok(units)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn text_of<'a>(src: &'a str, node: Node) -> &'a str {
    src.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(line) = first_error_line(child) {
            return Some(line);
        }
    }
    None
}

fn has_async_modifier(node: Node) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == "async")
}

/// Contiguous leading `/** ... */` comment siblings, concatenated in source
/// order.
fn doc_comment_for(node: Node, src: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    let mut prev = node.prev_sibling();
    while let Some(p) = prev {
        if p.kind() == "comment" {
            let text = text_of(src, p);
            if text.starts_with("/**") {
                parts.push(text);
                prev = p.prev_sibling();
                continue;
            }
        }
        break;
    }
    if parts.is_empty() {
        None
    } else {
        parts.reverse();
        Some(parts.join("\n"))
    }
}

/// Build a unit for one top-level declaration node, or `None` for node kinds
/// this strategy does not emit (bare statements, enums, `export default`
/// expressions).
///
/// `span` is the node whose extent defines the unit: the `export_statement`
/// wrapper when the declaration is exported, the declaration itself
/// otherwise.
fn unit_for(
    decl: Node,
    span: Node,
    is_exported: bool,
    src: &str,
    lines: &[&str],
) -> Option<SemanticUnit> {
    match decl.kind() {
        "function_declaration" | "generator_function_declaration" => {
            let name = decl
                .child_by_field_name("name")
                .map(|n| text_of(src, n).to_string())
                .unwrap_or_else(|| "anonymous".to_string());
            Some(build_unit(
                span,
                name,
                UnitKind::Function,
                is_exported,
                has_async_modifier(decl),
                src,
                lines,
            ))
        }
        "class_declaration" | "abstract_class_declaration" => {
            let name = text_of(src, decl.child_by_field_name("name")?).to_string();
            Some(build_unit(
                span,
                name,
                UnitKind::Class,
                is_exported,
                false,
                src,
                lines,
            ))
        }
        // Type aliases are folded into the interface kind for broad
        // categorization.
        "interface_declaration" | "type_alias_declaration" => {
            let name = text_of(src, decl.child_by_field_name("name")?).to_string();
            Some(build_unit(
                span,
                name,
                UnitKind::Interface,
                is_exported,
                false,
                src,
                lines,
            ))
        }
        "lexical_declaration" | "variable_declaration" => {
            variable_unit(decl, span, is_exported, src, lines)
        }
        _ => None,
    }
}

/// One unit per variable statement: the first declarator with a plain
/// identifier name and an initializer. Destructuring patterns and
/// uninitialized declarations are skipped.
fn variable_unit(
    decl: Node,
    span: Node,
    is_exported: bool,
    src: &str,
    lines: &[&str],
) -> Option<SemanticUnit> {
    let mut cursor = decl.walk();
    for declarator in decl.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let name_node = match declarator.child_by_field_name("name") {
            Some(n) if n.kind() == "identifier" => n,
            _ => continue,
        };
        let value = match declarator.child_by_field_name("value") {
            Some(v) => v,
            None => continue,
        };

        let name = text_of(src, name_node).to_string();
        // Mirrors the structural matcher table so both strategies classify
        // variable statements identically: hooks are `const` declarations
        // only, while PascalCase reclassification covers let/var as well.
        let is_const = decl.child(0).is_some_and(|c| c.kind() == "const");
        let kind = if is_const && is_hook_name(&name) {
            UnitKind::Hook
        } else if is_pascal_case(&name) {
            UnitKind::Component
        } else {
            UnitKind::Variable
        };
        let is_async = matches!(
            value.kind(),
            "arrow_function" | "function_expression" | "function"
        ) && has_async_modifier(value);

        return Some(build_unit(span, name, kind, is_exported, is_async, src, lines));
    }
    None
}

fn build_unit(
    span: Node,
    name: String,
    kind: UnitKind,
    is_exported: bool,
    is_async: bool,
    src: &str,
    lines: &[&str],
) -> SemanticUnit {
    let start_line = span.start_position().row + 1;
    let end_line = span.end_position().row + 1;
    let content = lines
        .get(start_line - 1..end_line)
        .unwrap_or_default()
        .join("\n");

    SemanticUnit {
        id: SemanticUnit::make_id(&name, start_line),
        name,
        kind,
        content,
        start_line,
        end_line,
        dependencies: Vec::new(),
        is_exported,
        is_async,
        signature: signature_of(text_of(src, span)),
        doc_comment: doc_comment_for(span, src),
    }
}
