//! End-to-end scoring of the fixture sources through the public API.

use flog::{
    group_functions, AnalysisSettings, GroupOptions, ModeAnalyzer, UnitReport,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn analyze_fixture(name: &str) -> UnitReport {
    let path = fixture(name);
    let source = fs::read_to_string(&path).unwrap();
    ModeAnalyzer::default().analyze_source(&source, &path).unwrap()
}

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_class_fixture_scores() {
    let unit = analyze_fixture("sample-classes.js");
    assert_eq!(unit.mode, "lang");
    approx(unit.total(), 4.3);

    let reconcile = unit.report.function("reconcile").unwrap();
    // for-of, try, if, two calls, catch
    approx(reconcile.score, 4.2);
    assert_eq!(reconcile.group.as_deref(), Some("Ledger"));
    assert_eq!(reconcile.location.start, 2);
    assert_eq!(reconcile.top_drivers[0].kind, "TryStatement");

    assert_eq!(unit.report.function("formatTotal").unwrap().group, None);
}

#[test]
fn test_class_fixture_grouping_without_zero_suppression() {
    let unit = analyze_fixture("sample-classes.js");
    let options = GroupOptions {
        include_all: true,
        show_zero: true,
    };
    let groups = group_functions(&unit, options);

    let ledger: Vec<_> = groups[0].functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(groups[0].name.as_deref(), Some("Ledger"));
    assert_eq!(ledger, vec!["reconcile", "label", "reset"]);
    assert!(groups.iter().all(|g| g.functions.iter().all(|f| f.name != "<anonymous>")));
}

#[test]
fn test_class_fixture_grouping_with_zero_suppression() {
    let unit = analyze_fixture("sample-classes.js");
    let groups = group_functions(&unit, GroupOptions::default());

    let names: Vec<_> = groups
        .iter()
        .flat_map(|g| g.functions.iter().map(|f| f.name.as_str()))
        .collect();
    assert_eq!(names, vec!["reconcile", "formatTotal"]);
}

#[test]
fn test_component_fixture_scores() {
    let unit = analyze_fixture("sample-components.jsx");
    assert_eq!(unit.mode, "react");
    approx(unit.total(), 4.6);

    let inbox = unit.report.function("Inbox").unwrap();
    approx(inbox.score, 4.2);
    // a declared component's own scope is not grouped under itself
    assert_eq!(inbox.group, None);

    let kinds: Vec<_> = inbox.all_drivers.iter().map(|d| d.kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec![
            "JSX.Ternary",
            "Hook.useEffect",
            "JSX.Map",
            "JSX.Logical",
            "Hook.useEffect.cleanup",
            "Hook.useContext",
            "Hook.useEffect.dep",
            "Hook.useEffect.dep",
        ]
    );
    assert_eq!(inbox.top_drivers.len(), 5);
}

#[test]
fn test_component_fixture_groups_nested_callbacks() {
    let unit = analyze_fixture("sample-components.jsx");
    let inbox_functions = unit
        .report
        .functions
        .iter()
        .filter(|f| f.group.as_deref() == Some("Inbox"))
        .count();
    // cleanup arrow, effect callback, onClick arrow, map callback
    assert_eq!(inbox_functions, 4);

    let badge = unit
        .report
        .functions
        .iter()
        .find(|f| f.group.as_deref() == Some("Badge"))
        .unwrap();
    assert_eq!(badge.name, "<anonymous>");
    assert_eq!(unit.report.function("formatDate").unwrap().group, None);
}

#[test]
fn test_methods_only_excludes_top_level_code() {
    let source = indoc! {r#"
        const config = load() || defaults();
        if (config.debug) {
          enableLogging();
        }

        export function start() {
          if (config.ready) {
            run();
          }
        }
    "#};
    let path = Path::new("main.js");

    let full = ModeAnalyzer::default().analyze_source(source, path).unwrap();
    let methods_only = ModeAnalyzer::new(AnalysisSettings {
        methods_only: true,
        ..AnalysisSettings::default()
    })
    .analyze_source(source, path)
    .unwrap();

    approx(methods_only.total(), 1.1);
    assert!(full.total() > methods_only.total());
    assert_eq!(full.report.functions, methods_only.report.functions);
}

#[test]
fn test_typescript_and_tsx_sources() {
    let ts = ModeAnalyzer::default()
        .analyze_source(
            indoc! {r#"
                export async function fetchAll<T>(urls: string[]): Promise<T[]> {
                  const results: T[] = [];
                  for (const url of urls) {
                    results.push(await get<T>(url));
                  }
                  return results;
                }
            "#},
            Path::new("fetch.ts"),
        )
        .unwrap();
    assert_eq!(ts.mode, "lang");
    // for-of, await, two calls
    approx(ts.total(), 1.7);

    let tsx = ModeAnalyzer::default()
        .analyze_source(
            indoc! {r#"
                export const List = ({ items }: { items: string[] }) => (
                  <ul>{items.map((i) => <li key={i}>{i}</li>)}</ul>
                );
            "#},
            Path::new("List.tsx"),
        )
        .unwrap();
    assert_eq!(tsx.mode, "react");
    approx(tsx.total(), 0.8);
}

#[test]
fn test_parse_error_carries_location() {
    let path = fixture("broken/unclosed.js");
    let source = fs::read_to_string(&path).unwrap();
    let err = ModeAnalyzer::default()
        .analyze_source(&source, &path)
        .unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("unclosed.js:"));
}
