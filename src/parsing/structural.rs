//! Heuristic line-oriented parser.
//!
//! Segments a file with pattern matching and brace-depth counting instead of
//! a grammar. Boundaries are approximate: nested declarations inside another
//! unit's body are invisible, and a brace-less single-line arrow function
//! stays open until the next unit start or end of input. Both are accepted
//! trade-offs of this strategy, not defects to correct here.

use super::{ParseStrategy, is_pascal_case, signature_of};
use crate::types::{ParseError, SemanticUnit, UnitKind};
use regex::Regex;
use std::sync::LazyLock;

/// One entry in the prioritized unit-start table.
struct Matcher {
    name: &'static str,
    kind: UnitKind,
    regex: Regex,
}

/// Unit-start patterns, tried in order; the first match wins. Priority is
/// load-bearing: `component` must win over `variable` for PascalCase arrow
/// constants, and `hook` must be tried before the generic variable fallback.
static MATCHERS: LazyLock<Vec<Matcher>> = LazyLock::new(|| {
    let matcher = |name: &'static str, kind: UnitKind, pattern: &str| Matcher {
        name,
        kind,
        regex: Regex::new(pattern).expect("unit-start pattern must compile"),
    };
    vec![
        matcher(
            "component",
            UnitKind::Component,
            r"^(?:export\s+)?const\s+([A-Z]\w*)\s*(?::[^=]+)?=\s*(?:React\.FC|(?:async\s+)?\([^)]*\)[^=]*=>)",
        ),
        matcher(
            "class",
            UnitKind::Class,
            r"^(?:export\s+)?(?:abstract\s+)?class\s+([A-Z]\w*)",
        ),
        matcher(
            "function",
            UnitKind::Function,
            r"^(?:export\s+)?(?:async\s+)?function\b\s*\*?\s*([A-Za-z_$][\w$]*)?",
        ),
        matcher(
            "interface",
            UnitKind::Interface,
            r"^(?:export\s+)?(?:interface|type)\s+([A-Z]\w*)",
        ),
        matcher(
            "hook",
            UnitKind::Hook,
            r"^(?:export\s+)?const\s+(use[A-Z]\w*)\b",
        ),
        // The initializer requirement keeps `let pending;` from becoming a
        // unit; the tree-based strategy skips uninitialized declarations too.
        matcher(
            "variable",
            UnitKind::Variable,
            r"^(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+)?=",
        ),
    ]
});

static ASYNC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\basync\b").expect("async pattern must compile"));

/// A unit that started but has not closed yet.
struct OpenUnit {
    name: String,
    kind: UnitKind,
    start_line: usize,
    last_line: usize,
    lines: Vec<String>,
    signature: String,
    is_exported: bool,
    is_async: bool,
}

impl OpenUnit {
    fn start(name: String, kind: UnitKind, line_no: usize, raw: &str, trimmed: &str) -> Self {
        Self {
            name,
            kind,
            start_line: line_no,
            last_line: line_no,
            lines: vec![raw.to_string()],
            signature: signature_of(trimmed),
            is_exported: trimmed.starts_with("export"),
            is_async: ASYNC_RE.is_match(trimmed),
        }
    }

    fn push_line(&mut self, line_no: usize, raw: &str) {
        self.last_line = line_no;
        self.lines.push(raw.to_string());
    }

    fn finish(self) -> SemanticUnit {
        SemanticUnit {
            id: SemanticUnit::make_id(&self.name, self.start_line),
            name: self.name,
            kind: self.kind,
            content: self.lines.join("\n"),
            start_line: self.start_line,
            end_line: self.last_line,
            dependencies: Vec::new(),
            is_exported: self.is_exported,
            is_async: self.is_async,
            signature: self.signature,
            doc_comment: None,
        }
    }
}

/// Heuristic segmentation strategy. Stateless between calls, so one instance
/// is safe to share across threads.
#[derive(Debug, Default)]
pub struct StructuralParser;

impl StructuralParser {
    pub fn new() -> Self {
        Self
    }
}

/// Remove block-comment spans from one line, updating the open-comment flag.
/// Returns the remaining code text, which is empty for comment-only lines.
fn strip_block_comments(raw: &str, in_comment: &mut bool) -> String {
    let mut code = String::new();
    let mut rest = raw;
    loop {
        if *in_comment {
            match rest.find("*/") {
                Some(idx) => {
                    *in_comment = false;
                    rest = &rest[idx + 2..];
                }
                None => return code,
            }
        } else {
            match rest.find("/*") {
                Some(idx) => {
                    code.push_str(&rest[..idx]);
                    *in_comment = true;
                    rest = &rest[idx + 2..];
                }
                None => {
                    code.push_str(rest);
                    return code;
                }
            }
        }
    }
}

/// Try the matcher table against a trimmed line. Returns the winning entry's
/// kind and the captured name, reclassifying PascalCase generic variables as
/// components so HOC-wrapped constants land in the right bucket.
fn match_unit_start(trimmed: &str) -> Option<(UnitKind, String)> {
    for m in MATCHERS.iter() {
        if let Some(caps) = m.regex.captures(trimmed) {
            let name = caps
                .get(1)
                .map(|g| g.as_str().to_string())
                .unwrap_or_else(|| "anonymous".to_string());
            let kind = if m.name == "variable" && is_pascal_case(&name) {
                UnitKind::Component
            } else {
                m.kind
            };
            return Some((kind, name));
        }
    }
    None
}

impl ParseStrategy for StructuralParser {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn parse_file(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<Vec<SemanticUnit>, ParseError> {
        let mut units = Vec::new();
        let mut current: Option<OpenUnit> = None;
        let mut brace_depth: i64 = 0;
        let mut in_comment = false;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;

            // Comment spans contribute to nothing: no detection, no content,
            // no brace counting. Code on either side of a block comment is
            // still scanned, so `/* x */ function f() {}` keeps `f`.
            let code = if in_comment || raw.contains("/*") {
                let stripped = strip_block_comments(raw, &mut in_comment);
                if stripped.trim().is_empty() {
                    continue;
                }
                stripped
            } else {
                raw.to_string()
            };
            let trimmed = code.trim();
            if trimmed.starts_with("//") {
                continue;
            }

            let started = if brace_depth == 0 {
                match_unit_start(trimmed)
            } else {
                None
            };
            let is_start = started.is_some();

            if let Some((kind, name)) = started {
                if let Some(open) = current.take() {
                    units.push(open.finish());
                }
                current = Some(OpenUnit::start(name, kind, line_no, &code, trimmed));
            } else if let Some(open) = current.as_mut() {
                open.push_line(line_no, &code);
            }

            let depth_before = brace_depth;
            brace_depth += code.matches('{').count() as i64;
            brace_depth -= code.matches('}').count() as i64;

            // A unit closes when depth falls back to zero on a line that did
            // not itself start one.
            if depth_before > 0 && brace_depth == 0 && !is_start {
                if let Some(open) = current.take() {
                    units.push(open.finish());
                }
            }
        }

        if let Some(open) = current.take() {
            units.push(open.finish());
        }

        units.sort_by_key(|u| u.start_line);
        tracing::debug!(
            file = file_path,
            units = units.len(),
            "structural segmentation complete"
        );
        Ok(units)
    }
}
