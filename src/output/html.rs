use crate::aggregation::Summary;
use crate::core::{FunctionScore, UnitReport};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Functions listed per unit in the details column.
const MAX_FUNCTIONS: usize = 5;
/// Driver kinds listed per function.
const MAX_DRIVERS: usize = 3;

const HIGH_SCORE: f64 = 20.0;
const MEDIUM_SCORE: f64 = 10.0;

const STYLE: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f5f5; padding: 2rem; line-height: 1.6; }
    .container { max-width: 1200px; margin: 0 auto; }
    header { background: white; padding: 2rem; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); margin-bottom: 2rem; }
    h1 { color: #333; margin-bottom: 1rem; }
    .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1rem; }
    .summary-card { background: #f8f9fa; padding: 1rem; border-radius: 6px; border-left: 4px solid #007bff; }
    .summary-card h3 { font-size: 0.875rem; color: #666; margin-bottom: 0.5rem; }
    .summary-card .value { font-size: 1.5rem; font-weight: bold; color: #333; }
    .files { background: white; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); overflow: hidden; }
    table { width: 100%; border-collapse: collapse; }
    th, td { padding: 1rem; text-align: left; border-bottom: 1px solid #e9ecef; }
    th { font-weight: 600; color: #495057; font-size: 0.875rem; text-transform: uppercase; }
    .file-name { font-family: 'Monaco', 'Courier New', monospace; color: #495057; }
    .score { font-weight: bold; }
    .score.high { color: #dc3545; }
    .score.medium { color: #ffc107; }
    .score.low { color: #28a745; }
    .badge { display: inline-block; padding: 0.25rem 0.5rem; border-radius: 4px; font-size: 0.75rem; font-weight: 600; text-transform: uppercase; background: #eceff1; }
    .badge.lang { background: #e3f2fd; color: #1976d2; }
    .badge.react { background: #e8f5e9; color: #388e3c; }
    .function-item { margin: 0.25rem 0; font-family: 'Monaco', 'Courier New', monospace; font-size: 0.875rem; color: #666; }
    .drivers { padding-left: 1rem; font-size: 0.75rem; color: #999; }
"#;

fn score_class(total: f64) -> &'static str {
    if total > HIGH_SCORE {
        "high"
    } else if total > MEDIUM_SCORE {
        "medium"
    } else {
        "low"
    }
}

fn function_item(out: &mut String, function: &FunctionScore) {
    let name = if function.name.trim().is_empty() {
        "(anonymous)"
    } else {
        function.name.as_str()
    };
    let _ = write!(
        out,
        r#"<div class="function-item">{:.1} - {}:{}-{}"#,
        function.score,
        encode_text(name),
        function.location.start,
        function.location.end
    );
    if !function.top_drivers.is_empty() {
        let kinds: Vec<_> = function
            .top_drivers
            .iter()
            .take(MAX_DRIVERS)
            .map(|d| d.kind.as_str())
            .collect();
        let _ = write!(out, r#"<div class="drivers">{}</div>"#, encode_text(&kinds.join(", ")));
    }
    out.push_str("</div>");
}

/// Standalone HTML page with summary cards and a per-unit table.
pub fn render_html(units: &[UnitReport], details: bool) -> String {
    let summary = Summary::from_units(units);
    let mut rows = String::new();

    for unit in units {
        let file = unit
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let _ = write!(
            rows,
            r#"<tr><td class="file-name" title="{}">{}</td><td><span class="badge {}">{}</span></td><td><span class="score {}">{:.2}</span></td>"#,
            encode_double_quoted_attribute(&unit.path.display().to_string()),
            encode_text(&file),
            encode_double_quoted_attribute(&unit.mode),
            encode_text(&unit.mode),
            score_class(unit.total()),
            unit.total()
        );
        if details {
            rows.push_str("<td>");
            if unit.report.functions.is_empty() {
                rows.push('-');
            }
            for function in unit.report.functions.iter().take(MAX_FUNCTIONS) {
                function_item(&mut rows, function);
            }
            rows.push_str("</td>");
        }
        rows.push_str("</tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>flog Report</title>
  <style>{STYLE}</style>
</head>
<body>
  <div class="container">
    <header>
      <h1>flog Report</h1>
      <div class="summary">
        <div class="summary-card"><h3>Total Files</h3><div class="value">{files}</div></div>
        <div class="summary-card"><h3>Total Score</h3><div class="value">{total:.1}</div></div>
        <div class="summary-card"><h3>Average Score</h3><div class="value">{average:.1}</div></div>
      </div>
    </header>
    <div class="files">
      <table>
        <thead><tr><th>File</th><th>Mode</th><th>Score</th>{functions_header}</tr></thead>
        <tbody>
{rows}        </tbody>
      </table>
    </div>
  </div>
</body>
</html>
"#,
        files = summary.total_units,
        total = summary.total_score,
        average = summary.average_per_unit(),
        functions_header = if details { "<th>Functions</th>" } else { "" },
    )
}
