//! General-purpose scoring for JavaScript and TypeScript.
//!
//! Every visited node whose kind maps onto a weight table entry adds that
//! weight to the innermost open function scope. On top of the table, three
//! heuristics look at node contents: dynamic evaluation calls, deep member
//! chains and logical assignment operators.

use super::{
    function_name, is_class_like, is_function_like, is_optional_chain, location, unwrap_parens,
    walk_tree, Visit,
};
use crate::analyzers::scope_reporter::{ScopeReporter, ANONYMOUS};
use crate::analyzers::weights::WeightTable;
use crate::analyzers::{DetectResult, Mode, ModeContext};
use crate::core::parsing::node_text;
use crate::core::AnalysisReport;
use crate::errors::Result;
use tree_sitter::Node;

pub const LANG_MODE_ID: &str = "lang";

/// Member chains deeper than this are penalised.
const MAX_MEMBER_DEPTH: usize = 3;

/// Extensions that are most likely plain script sources.
const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".mjs", ".cjs", ".ts"];

const LIKELY_CONFIDENCE: f64 = 0.4;
const FALLBACK_CONFIDENCE: f64 = 0.2;

#[derive(Clone, Debug)]
pub struct LangMode {
    weights: WeightTable,
}

impl LangMode {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Extension-only confidence.
    pub fn detect_extension(extension: &str) -> DetectResult {
        let likely = SCRIPT_EXTENSIONS
            .iter()
            .any(|ext| extension.eq_ignore_ascii_case(ext));
        if likely {
            DetectResult::new(LANG_MODE_ID, LIKELY_CONFIDENCE).with_reason("ext")
        } else {
            DetectResult::new(LANG_MODE_ID, FALLBACK_CONFIDENCE)
        }
    }

    /// Walk the tree and feed every weighted construct into `reporter`.
    pub fn score(&self, root: Node<'_>, source: &str, reporter: &mut ScopeReporter) -> Result<()> {
        walk_tree(root, |visit| match visit {
            Visit::Enter(node) => {
                if is_class_like(&node) {
                    let name = super::declared_name(&node, source).unwrap_or(ANONYMOUS);
                    reporter.enter_class(name);
                }
                if is_function_like(&node) {
                    reporter.enter_function(function_name(&node, source), location(&node), None);
                }
                self.score_node(node, source, reporter);
                Ok(())
            }
            Visit::Exit(node) => {
                if is_function_like(&node) {
                    reporter.exit_function()?;
                }
                if is_class_like(&node) {
                    reporter.exit_class();
                }
                Ok(())
            }
        })
    }

    fn score_node(&self, node: Node<'_>, source: &str, reporter: &mut ScopeReporter) {
        // optional calls and member accesses carry no weight
        if is_optional_chain(node) {
            return;
        }
        if let Some(kind) = driver_kind(node, source) {
            self.add(reporter, kind);
        }

        match node.kind() {
            "call_expression" if is_dynamic_call(node, source) => {
                self.add(reporter, "DynamicCall");
            }
            "member_expression" | "subscript_expression" => {
                if member_depth(node) > MAX_MEMBER_DEPTH {
                    self.add(reporter, "DeepMember");
                }
            }
            "augmented_assignment_expression" => {
                let logical = operator(node, source)
                    .is_some_and(|op| matches!(op, "&&=" | "||=" | "??="));
                if logical {
                    self.add(reporter, "LogicalAssign");
                }
            }
            _ => {}
        }
    }

    fn add(&self, reporter: &mut ScopeReporter, kind: &str) {
        if let Some(weight) = self.weights.get(kind) {
            reporter.add(weight, kind);
        }
    }
}

impl Default for LangMode {
    fn default() -> Self {
        Self::new(WeightTable::lang())
    }
}

impl Mode for LangMode {
    fn id(&self) -> &str {
        LANG_MODE_ID
    }

    fn detect(&self, ctx: &ModeContext<'_>) -> Result<DetectResult> {
        Ok(Self::detect_extension(&ctx.extension))
    }

    fn analyze(&self, ctx: &ModeContext<'_>, mut reporter: ScopeReporter) -> Result<AnalysisReport> {
        self.score(ctx.tree.root_node(), ctx.source, &mut reporter)?;
        reporter.finalize()
    }
}

/// Map a tree-sitter node onto the driver vocabulary of the weight table.
fn driver_kind(node: Node<'_>, source: &str) -> Option<&'static str> {
    let kind = match node.kind() {
        "if_statement" => "IfStatement",
        "ternary_expression" => "ConditionalExpression",
        "binary_expression" => {
            return operator(node, source)
                .filter(|op| is_logical_operator(op))
                .map(|_| "LogicalExpression");
        }
        "for_statement" => "ForStatement",
        "for_in_statement" => {
            return Some(match operator(node, source) {
                Some("of") => "ForOfStatement",
                _ => "ForInStatement",
            });
        }
        "while_statement" => "WhileStatement",
        "do_statement" => "DoWhileStatement",
        "switch_statement" => "SwitchStatement",
        "switch_case" | "switch_default" => "SwitchCase",
        "try_statement" => "TryStatement",
        "catch_clause" => "CatchClause",
        "throw_statement" => "ThrowStatement",
        "await_expression" => "AwaitExpression",
        "yield_expression" => "YieldExpression",
        "call_expression" if !is_tagged_template(node) => "CallExpression",
        _ => return None,
    };
    Some(kind)
}

pub(crate) fn is_logical_operator(op: &str) -> bool {
    matches!(op, "&&" | "||" | "??")
}

pub(crate) fn operator<'a>(node: Node<'_>, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name("operator")
        .map(|op| node_text(&op, source))
}

fn is_tagged_template(call: Node<'_>) -> bool {
    call.child_by_field_name("arguments")
        .is_some_and(|args| args.kind() == "template_string")
}

/// `eval(...)`, `Function(...)` and dynamic `import(...)`.
fn is_dynamic_call(call: Node<'_>, source: &str) -> bool {
    let Some(callee) = call.child_by_field_name("function").map(unwrap_parens) else {
        return false;
    };
    match callee.kind() {
        "import" => true,
        "identifier" => matches!(node_text(&callee, source), "eval" | "Function"),
        _ => false,
    }
}

/// Number of member accesses in the object chain, `a.b.c` → 2.
fn member_depth(node: Node<'_>) -> usize {
    let mut depth = 1;
    let mut current = node.child_by_field_name("object");
    while let Some(object) = current {
        if !matches!(object.kind(), "member_expression" | "subscript_expression") {
            break;
        }
        depth += 1;
        current = object.child_by_field_name("object");
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsing::parse_source;
    use std::path::Path;

    fn score(source: &str) -> AnalysisReport {
        score_path(source, "test.js")
    }

    fn score_path(source: &str, path: &str) -> AnalysisReport {
        let ast = parse_source(source, Path::new(path)).unwrap();
        let mut reporter = ScopeReporter::new();
        LangMode::default()
            .score(ast.root_node(), &ast.source, &mut reporter)
            .unwrap();
        reporter.finalize().unwrap()
    }

    fn kinds(report: &AnalysisReport, function: &str) -> Vec<String> {
        report
            .function(function)
            .unwrap()
            .all_drivers
            .iter()
            .map(|d| d.kind.clone())
            .collect()
    }

    #[test]
    fn test_scores_if_statement() {
        let report = score("function test() { if (true) {} }");
        assert_eq!(report.functions.len(), 1);
        assert_eq!(report.functions[0].name, "test");
        assert!((report.functions[0].score - 1.0).abs() < 1e-9);
        assert!((report.total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_loops() {
        let report = score(
            "function test() { for (let i = 0; i < 10; i++) {} while (true) {} do {} while (x); }",
        );
        assert!((report.total - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_distinguishes_for_of_and_for_in() {
        let report = score("function t(o) { for (const k in o) {} for (const v of o) {} }");
        let kinds = kinds(&report, "t");
        assert!(kinds.contains(&"ForInStatement".to_string()));
        assert!(kinds.contains(&"ForOfStatement".to_string()));
    }

    #[test]
    fn test_scores_try_catch_throw() {
        let report = score("function t() { try { throw new Error(); } catch (e) { log(e); } }");
        // try 1.5 + throw 0.5 + catch 0.5 + call 0.1
        assert!((report.total - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_dynamic_call_penalty() {
        let report = score("function test() { eval('1+1'); }");
        assert!(report.total > 4.0);
        assert_eq!(kinds(&report, "test")[0], "DynamicCall");
    }

    #[test]
    fn test_dynamic_import_and_function_constructor() {
        let report = score("async function load() { await import('./x.js'); Function('a', 'b'); }");
        let kinds = kinds(&report, "load");
        assert_eq!(kinds.iter().filter(|k| *k == "DynamicCall").count(), 2);
    }

    #[test]
    fn test_deep_member_penalty() {
        let shallow = score("function t() { return a.b.c.d; }");
        assert!(!kinds(&shallow, "t").contains(&"DeepMember".to_string()));

        let deep = score("function t() { return a.b.c.d.e; }");
        let kinds = kinds(&deep, "t");
        assert_eq!(kinds.iter().filter(|k| *k == "DeepMember").count(), 1);
    }

    #[test]
    fn test_optional_chains_carry_no_weight() {
        let report = score("function t() { a?.b(); f?.(); return a?.b.c.d.e; }");
        assert_eq!(report.function("t").unwrap().score, 0.0);

        let plain = score("function t() { a.b(); return a.b.c.d.e; }");
        assert_eq!(kinds(&plain, "t"), vec!["DeepMember", "CallExpression"]);
    }

    #[test]
    fn test_logical_assignment_penalty() {
        let report = score("function t(o) { o.a ||= 1; o.b ??= 2; o.c += 3; }");
        let kinds = kinds(&report, "t");
        assert_eq!(kinds.iter().filter(|k| *k == "LogicalAssign").count(), 2);
    }

    #[test]
    fn test_logical_expression_excludes_arithmetic() {
        let report = score("function t(a, b) { return (a && b) + (a ?? 1) + (a * b); }");
        let kinds = kinds(&report, "t");
        assert_eq!(kinds.iter().filter(|k| *k == "LogicalExpression").count(), 2);
    }

    #[test]
    fn test_switch_cases() {
        let report = score("function t(x) { switch (x) { case 1: break; case 2: break; default: } }");
        // switch 1.0 + 3 × 0.2
        assert!((report.total - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_tracks_multiple_functions() {
        let report = score("function a() { if (true) {} }\nfunction b() { for (;;) {} }");
        assert_eq!(report.functions.len(), 2);
    }

    #[test]
    fn test_nested_functions_exit_before_parent() {
        let report = score("function outer() { const inner = () => { if (x) {} }; if (y) {} }");
        let names: Vec<_> = report.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["<anonymous>", "outer"]);
        assert!((report.functions[0].score - 1.0).abs() < 1e-9);
        assert!((report.functions[1].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_class_methods_grouped() {
        let report = score("class Watch { name() { if (a) {} } }\nfunction helper() {}");
        assert_eq!(report.function("name").unwrap().group.as_deref(), Some("Watch"));
        assert_eq!(report.function("helper").unwrap().group, None);
    }

    #[test]
    fn test_unnamed_default_class_groups_methods() {
        let report = score("export default class { m() { if (a) {} } }\nconst C = class { n() {} };");
        assert_eq!(report.function("m").unwrap().group.as_deref(), Some("<anonymous>"));
        assert_eq!(report.function("n").unwrap().group, None);
    }

    #[test]
    fn test_private_and_computed_method_names() {
        let report = score("class P { #priv() { if (a) {} } [key]() {} }");
        let names: Vec<_> = report
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.group.as_deref()))
            .collect();
        assert_eq!(names, vec![("<anonymous>", Some("P")), ("key", Some("P"))]);
    }

    #[test]
    fn test_top_level_code_counts_toward_total_only() {
        let report = score("if (ready) { start(); }");
        assert!(report.functions.is_empty());
        assert!((report.total - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_typescript_source() {
        let report = score_path(
            "abstract class Repo { async find(id: string): Promise<void> { await this.db.get(id); } }",
            "repo.ts",
        );
        let find = report.function("find").unwrap();
        assert_eq!(find.group.as_deref(), Some("Repo"));
        assert!(find.score > 0.5);
    }

    #[test]
    fn test_tagged_template_is_not_a_call() {
        let report = score("function t() { return css`color: red;`; }");
        assert_eq!(report.function("t").unwrap().score, 0.0);
    }

    #[test]
    fn test_detect_extension() {
        assert_eq!(LangMode::detect_extension(".js").confidence, 0.4);
        assert_eq!(LangMode::detect_extension(".ts").confidence, 0.4);
        assert_eq!(LangMode::detect_extension(".jsx").confidence, 0.2);
        assert_eq!(LangMode::detect_extension(".txt").confidence, 0.2);
        assert_eq!(LangMode::detect_extension(".js").reasons, vec!["ext"]);
        assert!(LangMode::detect_extension(".txt").reasons.is_empty());
    }
}
