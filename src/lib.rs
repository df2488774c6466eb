#![allow(clippy::collapsible_if)]

//! semunit
//!
//! A semantic code-unit extractor for code indexing pipelines.
//!
//! Given raw TypeScript/TSX/JavaScript source text, semunit segments the file
//! into top-level named declarations (functions, classes, interfaces/types,
//! variables, UI components, hooks) with line ranges, export/async flags,
//! signatures, and doc comments.
//!
//! # Strategies
//!
//! Two interchangeable strategies implement the same [`ParseStrategy`]
//! contract:
//!
//! - **Structural**: line-oriented pattern matching with brace-depth
//!   tracking. Approximate boundaries, never fails, stateless and `Sync`.
//! - **Syntax-tree**: tree-sitter parse tree over a disposable in-memory
//!   virtual file. Exact boundaries, typed error on unparseable input, one
//!   instance per worker thread.
//!
//! # Usage
//!
//! ```ignore
//! use semunit::{StrategyKind, strategy_for};
//!
//! let parser = strategy_for(StrategyKind::SyntaxTree);
//! let units = parser.parse_file("src/button.tsx", &content)?;
//! for unit in &units {
//!     println!("{} {} [{}..{}]", unit.kind.as_str(), unit.name,
//!         unit.start_line, unit.end_line);
//! }
//! ```
//!
//! The core performs no file-system or network I/O; callers supply content
//! already read. Result lists are sorted by start line, units never overlap
//! at the top level, and ownership transfers fully to the caller.

pub mod discovery;
pub mod parsing;
pub mod types;

// Re-exports
pub use discovery::{FileDiscovery, SOURCE_EXTENSIONS};
pub use parsing::structural::StructuralParser;
pub use parsing::syntax::SyntaxTreeParser;
pub use parsing::{ParseStrategy, StrategyKind, strategy_for};
pub use types::*;
