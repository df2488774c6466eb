//! Parsing strategies for segmenting source files into semantic units.
//!
//! Two interchangeable strategies implement the same contract:
//!
//! - [`structural::StructuralParser`]: line-oriented pattern matching with
//!   brace-depth tracking. Approximate boundaries, never fails.
//! - [`syntax::SyntaxTreeParser`]: tree-sitter parse tree over a disposable
//!   in-memory virtual file. Exact boundaries, typed error on unparseable
//!   input.
//!
//! On syntactically valid input both strategies agree on the count, names,
//! kinds, and export/async flags of top-level units; only line precision and
//! `content`/`signature` exactness differ.
//!
//! # Concurrency
//!
//! Parsing is synchronous and CPU-bound. `StructuralParser` keeps no state
//! between calls and is `Sync`. `SyntaxTreeParser` reuses one grammar context
//! and a virtual-file registry across calls and is deliberately `!Sync`:
//! concurrent callers hold one instance per worker instead of sharing one.

pub mod structural;
pub mod syntax;

use crate::types::{ParseError, SemanticUnit};
use serde::{Deserialize, Serialize};

/// Contract shared by both parsing strategies.
pub trait ParseStrategy {
    /// Stable strategy name, used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Segment `content` into top-level semantic units.
    ///
    /// `file_path` is an opaque identifier; no file-system access happens
    /// here. The returned list is sorted by `start_line` ascending and an
    /// empty list is a valid result, not an error. Identical inputs yield
    /// structurally identical output on every call.
    fn parse_file(&self, file_path: &str, content: &str)
    -> Result<Vec<SemanticUnit>, ParseError>;
}

/// Tag for selecting a parsing strategy via configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Structural,
    #[default]
    SyntaxTree,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::SyntaxTree => "syntax-tree",
        }
    }

    /// Parse a CLI/config tag. Accepts the serde names plus `syntax` as a
    /// shorthand.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "structural" => Some(Self::Structural),
            "syntax-tree" | "syntax" => Some(Self::SyntaxTree),
            _ => None,
        }
    }
}

/// Construct the strategy selected by `kind`.
pub fn strategy_for(kind: StrategyKind) -> Box<dyn ParseStrategy> {
    match kind {
        StrategyKind::Structural => Box::new(structural::StructuralParser::new()),
        StrategyKind::SyntaxTree => Box::new(syntax::SyntaxTreeParser::new()),
    }
}

/// `Button`, `UserCard`: first character uppercase. Used to classify UI
/// component constants.
pub(crate) fn is_pascal_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// `useCounter`, `useFetch`: `use` prefix followed by an uppercase letter.
pub(crate) fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Declaration header up to (not including) the body's opening brace.
pub(crate) fn signature_of(text: &str) -> String {
    match text.find('{') {
        Some(idx) => text[..idx].trim().to_string(),
        None => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_detection() {
        assert!(is_pascal_case("Button"));
        assert!(is_pascal_case("UserCard"));
        assert!(!is_pascal_case("useCounter"));
        assert!(!is_pascal_case("handleClick"));
        assert!(!is_pascal_case(""));
    }

    #[test]
    fn hook_name_requires_uppercase_after_prefix() {
        assert!(is_hook_name("useCounter"));
        assert!(is_hook_name("useX"));
        assert!(!is_hook_name("user"));
        assert!(!is_hook_name("use"));
        assert!(!is_hook_name("Button"));
    }

    #[test]
    fn signature_stops_at_body_brace() {
        assert_eq!(
            signature_of("export function add(a, b) { return a + b; }"),
            "export function add(a, b)"
        );
        assert_eq!(signature_of("const x = 1;"), "const x = 1;");
    }

    #[test]
    fn strategy_kind_from_name() {
        assert_eq!(
            StrategyKind::from_name("structural"),
            Some(StrategyKind::Structural)
        );
        assert_eq!(
            StrategyKind::from_name("syntax"),
            Some(StrategyKind::SyntaxTree)
        );
        assert_eq!(StrategyKind::from_name("magic"), None);
    }
}
