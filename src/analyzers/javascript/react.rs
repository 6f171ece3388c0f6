//! Scoring for UI components written with JSX.
//!
//! Unlike the general-purpose scorer this one ignores ordinary control flow
//! and only looks at what makes component code hard to follow: conditional
//! rendering inside markup, list rendering, inline closures and literals in
//! props, deep element nesting and effect/hook usage.
//!
//! Functions named with a leading capital (declarations, or variables bound
//! to a function) are components. Everything nested in a component is
//! grouped under its name; a bound component's own scope is grouped too,
//! a declared one's is not.

use super::lang::{is_logical_operator, operator};
use super::{
    call_arguments, callee_name, declared_name, first_named_non_comment, function_name,
    has_descendant, is_function_like, is_optional_chain, location, named_non_comment_children,
    starts_uppercase, string_value, unwrap_parens, walk_tree, Visit,
};
use crate::analyzers::scope_reporter::ScopeReporter;
use crate::analyzers::weights::WeightTable;
use crate::analyzers::{DetectResult, Mode, ModeContext};
use crate::core::parsing::node_text;
use crate::core::{AnalysisReport, DriverMeta};
use crate::errors::Result;
use tree_sitter::Node;

pub const REACT_MODE_ID: &str = "react";

/// Source marker that forces this mode regardless of other detectors.
pub const MODE_PRAGMA: &str = "flog:mode=react";

/// Only the leading part of a unit is searched for the pragma.
const PRAGMA_WINDOW: usize = 512;

/// Markup nesting beyond this depth is penalised once per extra level.
const MAX_JSX_DEPTH: usize = 5;

const MARKUP_EXTENSIONS: &[&str] = &[".jsx", ".tsx", ".mdx"];
const UI_LIBRARY_IMPORTS: &[&str] = &[
    "react",
    "react/jsx-runtime",
    "react/jsx-dev-runtime",
    "preact/compat",
];
const COMPONENT_DIRECTIVES: &[&str] = &["use client", "use server"];

const STRONG_CONFIDENCE: f64 = 0.95;
const MEDIUM_CONFIDENCE: f64 = 0.75;
/// Medium signals needed before they count on their own.
const MEDIUM_SIGNALS_REQUIRED: usize = 2;

#[derive(Clone, Debug)]
pub struct ReactMode {
    weights: WeightTable,
}

impl ReactMode {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Confidence from extension, markup usage, UI imports and directives.
    pub fn detect_tree(root: Node<'_>, source: &str, extension: &str) -> DetectResult {
        if has_pragma(source) {
            return DetectResult::forced(REACT_MODE_ID).with_reason("pragma");
        }

        let mut signals = Signals::default();
        if MARKUP_EXTENSIONS
            .iter()
            .any(|ext| extension.eq_ignore_ascii_case(ext))
        {
            signals.strong("ext".to_string());
        }

        for directive in leading_directives(root, source) {
            if COMPONENT_DIRECTIVES.contains(&directive) {
                signals.medium(format!("directive:{directive}"));
            }
        }

        // walk_tree only fails when the callback does
        let _ = walk_tree(root, |visit| {
            if let Visit::Enter(node) = visit {
                match node.kind() {
                    "jsx_element" | "jsx_self_closing_element" => signals.strong("JSX".to_string()),
                    "import_statement" => {
                        let import = node
                            .child_by_field_name("source")
                            .and_then(|s| string_value(&s, source));
                        if let Some(import) = import.filter(|i| UI_LIBRARY_IMPORTS.contains(i)) {
                            signals.medium(format!("import:{import}"));
                        }
                    }
                    _ => {}
                }
            }
            Ok(())
        });

        signals.into_result()
    }

    /// Walk the tree and feed markup and hook patterns into `reporter`.
    pub fn score(&self, root: Node<'_>, source: &str, reporter: &mut ScopeReporter) -> Result<()> {
        let mut depth = 0usize;
        let mut max_depth = 0usize;

        walk_tree(root, |visit| match visit {
            Visit::Enter(node) => {
                // a declared component's own scope stays ungrouped; a bound one
                // is grouped because its declarator is entered first
                if is_function_like(&node) {
                    reporter.enter_function(function_name(&node, source), location(&node), None);
                }
                if let Some(name) = component_name(node, source) {
                    reporter.enter_class(name);
                }
                match node.kind() {
                    "jsx_element" | "jsx_self_closing_element" if !is_fragment(node) => {
                        depth += 1;
                        max_depth = max_depth.max(depth);
                    }
                    "jsx_expression" => self.score_markup_expression(node, source, reporter),
                    "call_expression" => self.score_hook_call(node, source, reporter),
                    _ => {}
                }
                Ok(())
            }
            Visit::Exit(node) => {
                if matches!(node.kind(), "jsx_element" | "jsx_self_closing_element")
                    && !is_fragment(node)
                {
                    depth = depth.saturating_sub(1);
                }
                if is_function_like(&node) {
                    reporter.exit_function()?;
                }
                if component_name(node, source).is_some() {
                    reporter.exit_class();
                }
                Ok(())
            }
        })?;

        if max_depth > MAX_JSX_DEPTH {
            if let Some(step) = self.weights.get("JSX.DepthStep") {
                let extra = (max_depth - MAX_JSX_DEPTH) as f64;
                reporter.add(
                    extra * step,
                    DriverMeta::new("JSX.Depth").with_message(format!("depth={max_depth}")),
                );
            }
        }
        Ok(())
    }

    /// `{...}` inside markup: conditional rendering, list rendering and
    /// inline closures or literals.
    fn score_markup_expression(&self, container: Node<'_>, source: &str, reporter: &mut ScopeReporter) {
        let Some(expr) = first_named_non_comment(container).map(unwrap_parens) else {
            return;
        };
        match expr.kind() {
            "ternary_expression" => self.add(reporter, "JSX.Ternary"),
            "binary_expression" => {
                if operator(expr, source).is_some_and(|op| op != "??" && is_logical_operator(op)) {
                    self.add(reporter, "JSX.Logical");
                }
            }
            "call_expression" => {
                if is_map_call(expr, source) {
                    self.add(reporter, "JSX.Map");
                }
            }
            "arrow_function" | "function_expression" | "function" | "object" | "array" => {
                self.add(reporter, "JSX.Inline");
            }
            _ => {}
        }
    }

    /// Hook calls are matched by name, whether called bare or through a
    /// namespace (`React.useEffect`).
    fn score_hook_call(&self, call: Node<'_>, source: &str, reporter: &mut ScopeReporter) {
        if is_optional_chain(call) {
            return;
        }
        match callee_name(&call, source) {
            Some("useEffect") => self.score_effect(call, reporter),
            Some("useLayoutEffect") => self.add(reporter, "Hook.useLayoutEffect"),
            Some("useContext") => self.add(reporter, "Hook.useContext"),
            Some("useReducer") => self.add(reporter, "Hook.useReducer"),
            _ => {}
        }
    }

    fn score_effect(&self, call: Node<'_>, reporter: &mut ScopeReporter) {
        self.add(reporter, "Hook.useEffect");
        let args = call_arguments(call);

        if let Some(deps) = args.get(1).map(|d| unwrap_parens(*d)) {
            if deps.kind() == "array" {
                for _ in named_non_comment_children(deps) {
                    self.add(reporter, "Hook.useEffect.dep");
                }
            }
        }

        let callback = args.first().map(|c| unwrap_parens(*c));
        let has_cleanup = callback
            .filter(|cb| is_function_like(cb))
            .and_then(|cb| cb.child_by_field_name("body"))
            .is_some_and(|body| has_descendant(body, "return_statement"));
        if has_cleanup {
            self.add(reporter, "Hook.useEffect.cleanup");
        }
    }

    fn add(&self, reporter: &mut ScopeReporter, kind: &str) {
        if let Some(weight) = self.weights.get(kind) {
            reporter.add(weight, kind);
        }
    }
}

impl Default for ReactMode {
    fn default() -> Self {
        Self::new(WeightTable::react())
    }
}

impl Mode for ReactMode {
    fn id(&self) -> &str {
        REACT_MODE_ID
    }

    fn detect(&self, ctx: &ModeContext<'_>) -> Result<DetectResult> {
        Ok(Self::detect_tree(
            ctx.tree.root_node(),
            ctx.source,
            &ctx.extension,
        ))
    }

    fn analyze(&self, ctx: &ModeContext<'_>, mut reporter: ScopeReporter) -> Result<AnalysisReport> {
        self.score(ctx.tree.root_node(), ctx.source, &mut reporter)?;
        reporter.finalize()
    }
}

#[derive(Default)]
struct Signals {
    strong: usize,
    medium: usize,
    reasons: Vec<String>,
}

impl Signals {
    fn strong(&mut self, reason: String) {
        self.strong += 1;
        self.push_reason(reason);
    }

    fn medium(&mut self, reason: String) {
        self.medium += 1;
        self.push_reason(reason);
    }

    fn push_reason(&mut self, reason: String) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }

    fn into_result(self) -> DetectResult {
        let confidence = if self.strong > 0 {
            STRONG_CONFIDENCE
        } else if self.medium >= MEDIUM_SIGNALS_REQUIRED {
            MEDIUM_CONFIDENCE
        } else {
            0.0
        };
        DetectResult::new(REACT_MODE_ID, confidence).with_reasons(self.reasons)
    }
}

fn has_pragma(source: &str) -> bool {
    let end = source
        .char_indices()
        .nth(PRAGMA_WINDOW)
        .map_or(source.len(), |(i, _)| i);
    source[..end].contains(MODE_PRAGMA)
}

/// String-literal statements at the start of the program (`"use client";`).
fn leading_directives<'a>(root: Node<'_>, source: &'a str) -> Vec<&'a str> {
    let mut directives = Vec::new();
    for statement in named_non_comment_children(root) {
        if statement.kind() == "hash_bang_line" {
            continue;
        }
        let literal = (statement.kind() == "expression_statement")
            .then(|| first_named_non_comment(statement))
            .flatten()
            .and_then(|expr| string_value(&expr, source));
        match literal {
            Some(value) => directives.push(value),
            None => break,
        }
    }
    directives
}

/// Component name for a declaration or a capitalised function binding.
fn component_name<'a>(node: Node<'_>, source: &'a str) -> Option<&'a str> {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            declared_name(&node, source).filter(|name| starts_uppercase(name))
        }
        "variable_declarator" => {
            let name = node
                .child_by_field_name("name")
                .filter(|n| n.kind() == "identifier")
                .map(|n| node_text(&n, source))
                .filter(|name| starts_uppercase(name))?;
            let value = unwrap_parens(node.child_by_field_name("value")?);
            matches!(
                value.kind(),
                "arrow_function" | "function_expression" | "function"
            )
            .then_some(name)
        }
        _ => None,
    }
}

/// `<>...</>` has an opening tag without a name.
fn is_fragment(node: Node<'_>) -> bool {
    node.kind() == "jsx_element"
        && node
            .child_by_field_name("open_tag")
            .is_some_and(|tag| tag.child_by_field_name("name").is_none())
}

/// `items.map(...)` style iteration. `items?.map(...)` does not count.
fn is_map_call(call: Node<'_>, source: &str) -> bool {
    if is_optional_chain(call) {
        return false;
    }
    call.child_by_field_name("function")
        .map(unwrap_parens)
        .filter(|callee| callee.kind() == "member_expression")
        .and_then(|callee| callee.child_by_field_name("property"))
        .is_some_and(|prop| node_text(&prop, source) == "map")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsing::parse_source;
    use indoc::indoc;
    use std::path::Path;

    fn score(source: &str) -> AnalysisReport {
        let ast = parse_source(source, Path::new("test.jsx")).unwrap();
        let mut reporter = ScopeReporter::new();
        ReactMode::default()
            .score(ast.root_node(), &ast.source, &mut reporter)
            .unwrap();
        reporter.finalize().unwrap()
    }

    fn detect(source: &str, path: &str) -> DetectResult {
        let ast = parse_source(source, Path::new(path)).unwrap();
        let ext = crate::analyzers::extension_of(Path::new(path));
        ReactMode::detect_tree(ast.root_node(), &ast.source, &ext)
    }

    fn driver_count(report: &AnalysisReport, kind: &str) -> usize {
        report
            .functions
            .iter()
            .flat_map(|f| f.all_drivers.iter())
            .filter(|d| d.kind == kind)
            .count()
    }

    #[test]
    fn test_scores_jsx_ternary() {
        let report = score("function Component() { return <div>{cond ? <A /> : <B />}</div>; }");
        assert!((report.total - 1.0).abs() < 1e-9);
        assert_eq!(driver_count(&report, "JSX.Ternary"), 1);
    }

    #[test]
    fn test_scores_jsx_logical() {
        let report = score("function Component() { return <div>{cond && <Child />}</div>; }");
        assert!((report.total - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_nullish_in_markup_is_not_conditional_render() {
        let report = score("function Component() { return <div>{label ?? 'none'}</div>; }");
        assert_eq!(report.total, 0.0);
    }

    #[test]
    fn test_scores_map_in_jsx() {
        let report = score(
            "function Component() { return <ul>{items.map(i => <Item key={i} />)}</ul>; }",
        );
        assert_eq!(driver_count(&report, "JSX.Map"), 1);
        assert!((report.total - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_scores_inline_handlers_and_literals() {
        let report = score(indoc! {r#"
            function Button() {
              return <button onClick={() => go()} style={{ color: 'red' }} data={[1]} />;
            }
        "#});
        assert_eq!(driver_count(&report, "JSX.Inline"), 3);
        // the inline arrow is attributed to the component, not to itself
        let button = report.function("Button").unwrap();
        assert!((button.score - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_scores_use_effect_with_dependencies_and_cleanup() {
        let report = score(indoc! {r#"
            function Component() {
              useEffect(() => {
                return () => console.log('cleanup');
              }, [dep1, dep2, dep3]);
            }
        "#});
        let component = report.function("Component").unwrap();
        // 0.8 + 3 × 0.15 + 0.4
        assert!((component.score - 1.65).abs() < 1e-9);
        assert_eq!(component.top_drivers[0].kind, "Hook.useEffect");
        assert_eq!(component.top_drivers[1].kind, "Hook.useEffect.cleanup");
    }

    #[test]
    fn test_use_effect_without_cleanup() {
        let report = score("function C() { useEffect(() => { log('mounted'); }, []); }");
        assert!((report.total - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_other_hooks() {
        let report = score(indoc! {r#"
            function C() {
              React.useLayoutEffect(() => {});
              const theme = useContext(Theme);
              const [s, d] = useReducer(reducer, init);
            }
        "#});
        assert!((report.total - (0.6 + 0.3 + 0.6)).abs() < 1e-9);
    }

    #[test]
    fn test_deep_nesting_penalty() {
        let report = score(indoc! {r#"
            function Component() {
              return (
                <div><div><div><div><div><div><div>Deep</div></div></div></div></div></div></div>
              );
            }
        "#});
        // 7 levels → (7 - 5) × 0.3, recorded outside any scope
        assert!((report.total - 0.6).abs() < 1e-9);
        assert_eq!(report.function("Component").unwrap().score, 0.0);
    }

    #[test]
    fn test_fragments_do_not_count_toward_depth() {
        let report = score(indoc! {r#"
            function C() {
              return <><><><><><><div><div><div><div><div /></div></div></div></div></></></></></></>;
            }
        "#});
        assert_eq!(report.total, 0.0);
    }

    #[test]
    fn test_component_grouping() {
        let report = score(indoc! {r#"
            function Profile() {
              const onSave = () => {};
              return <form />;
            }
            const Card = () => { const inner = function () {}; return null; };
            function helper() {}
        "#});
        let groups: Vec<_> = report
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.group.as_deref()))
            .collect();
        assert_eq!(
            groups,
            vec![
                ("<anonymous>", Some("Profile")),
                ("Profile", None),
                ("<anonymous>", Some("Card")),
                ("<anonymous>", Some("Card")),
                ("helper", None),
            ]
        );
    }

    #[test]
    fn test_declared_component_scope_is_not_self_grouped() {
        let report = score(indoc! {r#"
            function Profile() {
              const onSave = () => {};
              return <form onSubmit={() => go()} />;
            }
            const Card = () => <div />;
        "#});
        let scopes: Vec<_> = report
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.group.as_deref(), f.score))
            .collect();
        assert_eq!(
            scopes,
            vec![
                ("<anonymous>", Some("Profile"), 0.0),
                ("<anonymous>", Some("Profile"), 0.0),
                ("Profile", None, 0.4),
                ("<anonymous>", Some("Card"), 0.0),
            ]
        );
    }

    #[test]
    fn test_optional_calls_are_not_scored() {
        let report = score(indoc! {r#"
            function List({ items }) {
              React?.useEffect(() => {});
              return <ul>{items?.map((i) => <li key={i} />)}</ul>;
            }
        "#});
        assert_eq!(report.total, 0.0);
    }

    #[test]
    fn test_control_flow_is_not_scored() {
        let report = score("function C(x) { if (x) { for (;;) {} } }");
        assert_eq!(report.total, 0.0);
    }

    #[test]
    fn test_detect_jsx_elements() {
        let result = detect("const el = <div>Hello</div>;", "test.js");
        assert_eq!(result.confidence, 0.95);
        assert!(!result.force);
        assert_eq!(result.reasons, vec!["JSX"]);
    }

    #[test]
    fn test_detect_extension() {
        let result = detect("const x = 1;", "test.jsx");
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.reasons, vec!["ext"]);
    }

    #[test]
    fn test_detect_single_import_is_not_enough() {
        let result = detect("import React from 'react';", "test.js");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.reasons, vec!["import:react"]);
    }

    #[test]
    fn test_detect_imports_and_directive() {
        let result = detect("'use client';\nimport { useState } from 'react';", "test.js");
        assert_eq!(result.confidence, 0.75);
        assert_eq!(result.reasons, vec!["directive:use client", "import:react"]);
    }

    #[test]
    fn test_detect_pragma_forces_mode() {
        let result = detect("// flog:mode=react\nconst x = 1;", "test.js");
        assert!(result.force);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.reasons, vec!["pragma"]);
    }

    #[test]
    fn test_pragma_outside_window_is_ignored() {
        let padding = "x".repeat(600);
        let source = format!("const pad = '{padding}';\n// flog:mode=react\n");
        let result = detect(&source, "test.js");
        assert!(!result.force);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_plain_script_has_no_confidence() {
        let result = detect("export const add = (a, b) => a + b;", "math.js");
        assert_eq!(result.confidence, 0.0);
        assert!(result.reasons.is_empty());
    }
}
