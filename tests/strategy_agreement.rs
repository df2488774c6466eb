//! Cross-strategy contract: on syntactically valid input both strategies
//! report the same units (count, names, kinds, export/async flags). Line
//! precision, content, and signatures are allowed to differ.

use pretty_assertions::assert_eq;
use semunit::{ParseStrategy, StrategyKind, StructuralParser, SyntaxTreeParser, UnitKind, strategy_for};

/// The comparable projection of a unit list: (name, kind, exported, async),
/// sorted so ordering differences cannot mask real mismatches.
fn fingerprint(parser: &dyn ParseStrategy, source: &str) -> Vec<(String, UnitKind, bool, bool)> {
    let mut rows: Vec<_> = parser
        .parse_file("agreement.tsx", source)
        .expect("valid source should parse")
        .into_iter()
        .map(|u| (u.name, u.kind, u.is_exported, u.is_async))
        .collect();
    rows.sort();
    rows
}

fn assert_agreement(source: &str) {
    let structural = StructuralParser::new();
    let syntax = SyntaxTreeParser::new();
    assert_eq!(
        fingerprint(&structural, source),
        fingerprint(&syntax, source),
        "strategies disagree on:\n{source}"
    );
}

#[test]
fn agreement_on_single_declarations() {
    assert_agreement("export function add(a, b) { return a + b; }");
    assert_agreement("const useCounter = () => { return 1; }");
    assert_agreement("const Button = () => x;");
    assert_agreement("export async function fetchUser(id) {\n  return api.get(id);\n}\n");
    assert_agreement("export interface Props {\n  title: string;\n}\n");
    assert_agreement("export type ID = string;\nfunction after() {\n  return 1;\n}\n");
    assert_agreement("const retryLimit = 3;\n");
    assert_agreement("export const Store = withRouter(Base);\n");
    assert_agreement("let pending;\nconst limit = 10;\n");
    assert_agreement("let annotated: number = 10;\n");
    assert_agreement("let useTricky = 1;\n");
    assert_agreement("/* note */ function f() { return 1; }\n");
}

#[test]
fn agreement_on_mixed_module() {
    let source = r#"import React from 'react';

/** Adds two numbers. */
export function add(a: number, b: number) {
  return a + b;
}

export async function fetchUser(id: string) {
  return api.get(id);
}

class Repository {
  find() {
    return null;
  }
}

export interface Props {
  title: string;
}

export const Button = (props: Props) => {
  return null;
}

const useCounter = () => {
  return 1;
}

const retryLimit = 3;
"#;
    assert_agreement(source);

    let expected = vec![
        ("add", UnitKind::Function, true, false),
        ("fetchUser", UnitKind::Function, true, true),
        ("Repository", UnitKind::Class, false, false),
        ("Props", UnitKind::Interface, true, false),
        ("Button", UnitKind::Component, true, false),
        ("useCounter", UnitKind::Hook, false, false),
        ("retryLimit", UnitKind::Variable, false, false),
    ];
    let mut expected: Vec<_> = expected
        .into_iter()
        .map(|(n, k, e, a)| (n.to_string(), k, e, a))
        .collect();
    expected.sort();

    let syntax = SyntaxTreeParser::new();
    assert_eq!(fingerprint(&syntax, source), expected);
}

#[test]
fn both_strategies_are_deterministic() {
    let source = "export function add(a, b) { return a + b; }\nconst useCounter = () => {\n  return 1;\n}\n";
    for kind in [StrategyKind::Structural, StrategyKind::SyntaxTree] {
        let parser = strategy_for(kind);
        let first = parser
            .parse_file("det.tsx", source)
            .expect("valid source should parse");
        let second = parser
            .parse_file("det.tsx", source)
            .expect("valid source should parse");
        let tuples = |units: &[semunit::SemanticUnit]| {
            units
                .iter()
                .map(|u| {
                    (
                        u.name.clone(),
                        u.kind,
                        u.is_exported,
                        u.is_async,
                        u.signature.clone(),
                    )
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(tuples(&first), tuples(&second), "{} not deterministic", parser.name());
    }
}

#[test]
fn selector_builds_the_requested_strategy() {
    assert_eq!(strategy_for(StrategyKind::Structural).name(), "structural");
    assert_eq!(strategy_for(StrategyKind::SyntaxTree).name(), "syntax-tree");
    assert_eq!(StrategyKind::default(), StrategyKind::SyntaxTree);
}
