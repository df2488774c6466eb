//! Core types for the semantic unit extractor.
//!
//! This module defines the result record both parsing strategies produce and
//! the typed error the syntax-tree strategy can surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of top-level declaration a unit represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Function,
    Class,
    Interface,
    Variable,
    Component,
    Hook,
    /// Reserved for non-declaration spans; neither strategy emits it today.
    Block,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Variable => "variable",
            Self::Component => "component",
            Self::Hook => "hook",
            Self::Block => "block",
        }
    }
}

/// One top-level declaration extracted from a source file.
///
/// Units are finalized once and never mutated afterwards; ownership of the
/// result list passes entirely to the caller. The serde projection uses
/// camelCase field names (`startLine`, `isExported`, ...) because that is the
/// row shape the downstream index consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticUnit {
    /// Derived from `name` and `start_line`; unique within one parse result.
    pub id: String,
    /// Identifier text, or `"anonymous"` for a nameless function declaration.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: UnitKind,
    /// Source lines spanned by `[start_line, end_line]`. The structural
    /// strategy omits comment-skipped lines from this text.
    pub content: String,
    /// 1-based, inclusive. `start_line <= end_line` always holds.
    pub start_line: usize,
    pub end_line: usize,
    /// Referenced-symbol names. Reserved for call-graph population; currently
    /// always empty.
    pub dependencies: Vec<String>,
    pub is_exported: bool,
    pub is_async: bool,
    /// Declaration header up to (not including) the body's opening brace.
    pub signature: String,
    /// Concatenated leading doc-comment text. Only the syntax-tree strategy
    /// fills this in.
    pub doc_comment: Option<String>,
}

impl SemanticUnit {
    /// Unit id as persisted by the index: `"{name}:{start_line}"`.
    pub fn make_id(name: &str, start_line: usize) -> String {
        format!("{name}:{start_line}")
    }
}

/// Errors surfaced by a parsing strategy.
///
/// The structural strategy never constructs one; it degrades to a best-effort
/// segmentation instead. The syntax-tree strategy surfaces `Syntax` when the
/// grammar cannot produce a usable tree, so callers can tell "no top-level
/// declarations" apart from "unparseable input".
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unparseable source in {path}: {detail}")]
    Syntax { path: String, detail: String },
}
