//! Human-readable renderers for stdout: a summary table and the grouped
//! per-class listing.

use super::RenderOptions;
use crate::aggregation::{group_functions, Summary};
use crate::core::UnitReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::fmt::Write;
use std::path::Path;

/// Width of the function name column in the grouped listing.
const NAME_WIDTH: usize = 30;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One row per unit; with `details` also the unit's top function.
pub fn render_table(units: &[UnitReport], details: bool) -> String {
    let mut header = vec!["File", "Mode", "Total"];
    if details {
        header.extend(["Top function", "Score", "Drivers"]);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for unit in units {
        let mut row = vec![
            file_name(&unit.path),
            unit.mode.clone(),
            format!("{:.2}", unit.total()),
        ];
        if details {
            let top = unit
                .report
                .functions
                .iter()
                .reduce(|best, f| if f.score > best.score { f } else { best });
            match top {
                Some(top) => row.extend([
                    top.name.clone(),
                    format!("{:.2}", top.score),
                    top.top_drivers
                        .iter()
                        .map(|d| d.kind.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                ]),
                None => row.extend([String::new(), String::new(), String::new()]),
            }
        }
        table.add_row(row);
    }

    table.to_string()
}

/// Flog-style listing: overall figures, then each unit's buckets with
/// their functions.
pub fn render_grouped(units: &[UnitReport], options: RenderOptions) -> String {
    let summary = Summary::from_units(units);
    let mut out = String::new();

    // writing to a String cannot fail
    let _ = writeln!(out, "{:.1}: flog total", summary.total_score);
    let _ = writeln!(
        out,
        "  {:.1}: flog/method average\n",
        summary.average_per_function()
    );

    for unit in units {
        let file = file_name(&unit.path);
        for group in group_functions(unit, options.grouping) {
            let _ = writeln!(out, "{:.1}: {} total", group.total, group.display_name(unit));
            for function in &group.functions {
                let location = format!(
                    "{}:{}-{}",
                    file, function.location.start, function.location.end
                );
                let _ = writeln!(
                    out,
                    "{:>6.1}: {:<width$} {}",
                    function.score,
                    group.qualified_name(function),
                    location,
                    width = NAME_WIDTH
                );
                if options.details {
                    for driver in &function.all_drivers {
                        let _ = writeln!(out, "{:>6.1}:   {}", driver.weight, driver.kind);
                    }
                }
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::GroupOptions;
    use crate::core::{AnalysisReport, Driver, FunctionScore, LocationRange};

    fn sample() -> Vec<UnitReport> {
        let complex = FunctionScore {
            name: "complex".to_string(),
            score: 4.0,
            location: LocationRange::new(2, 12),
            top_drivers: vec![Driver {
                kind: "TryStatement".to_string(),
                weight: 1.5,
                message: None,
            }],
            all_drivers: vec![Driver {
                kind: "TryStatement".to_string(),
                weight: 1.5,
                message: None,
            }],
            group: Some("Service".to_string()),
        };
        let simple = FunctionScore {
            name: "simple".to_string(),
            score: 0.0,
            location: LocationRange::new(13, 15),
            top_drivers: vec![],
            all_drivers: vec![],
            group: Some("Service".to_string()),
        };
        vec![UnitReport::new(
            "lib/service.js",
            "lang",
            AnalysisReport {
                total: 4.0,
                functions: vec![complex, simple],
            },
        )]
    }

    #[test]
    fn test_table_lists_units() {
        let table = render_table(&sample(), false);
        assert!(table.contains("service.js"));
        assert!(table.contains("4.00"));
        assert!(!table.contains("Top function"));
    }

    #[test]
    fn test_table_details_show_top_function() {
        let table = render_table(&sample(), true);
        assert!(table.contains("complex"));
        assert!(table.contains("TryStatement"));
    }

    #[test]
    fn test_grouped_listing() {
        let text = render_grouped(&sample(), RenderOptions::default());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "4.0: flog total");
        assert_eq!(lines[1], "  2.0: flog/method average");
        assert_eq!(lines[3], "4.0: Service total");
        assert!(lines[4].starts_with("   4.0: Service#complex"));
        assert!(lines[4].ends_with("service.js:2-12"));
        assert!(!text.contains("Service#simple"));
    }

    #[test]
    fn test_grouped_listing_with_zero_and_details() {
        let options = RenderOptions {
            details: true,
            group: true,
            grouping: GroupOptions {
                include_all: true,
                show_zero: true,
            },
        };
        let text = render_grouped(&sample(), options);
        assert!(text.contains("Service#simple"));
        assert!(text.contains("   1.5:   TryStatement"));
    }
}
