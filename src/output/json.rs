use crate::aggregation::Summary;
use crate::core::{FunctionScore, LocationRange, UnitReport};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    summary: JsonSummary,
    files: Vec<JsonFile<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    total_files: usize,
    total_score: f64,
    average_score: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFile<'a> {
    file: String,
    mode: &'a str,
    total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<Vec<JsonFunction<'a>>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFunction<'a> {
    name: &'a str,
    score: f64,
    loc: LocationRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_name: Option<&'a str>,
    drivers: Vec<JsonDriver<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonDriver<'a> {
    kind: &'a str,
    weight: f64,
}

impl<'a> From<&'a FunctionScore> for JsonFunction<'a> {
    fn from(f: &'a FunctionScore) -> Self {
        Self {
            name: &f.name,
            score: f.score,
            loc: f.location,
            class_name: f.group.as_deref(),
            drivers: f
                .top_drivers
                .iter()
                .map(|d| JsonDriver {
                    kind: &d.kind,
                    weight: d.weight,
                })
                .collect(),
        }
    }
}

/// Pretty JSON document with a summary and one entry per unit.
pub fn render_json(units: &[UnitReport], details: bool) -> Result<String> {
    let summary = Summary::from_units(units);
    let report = JsonReport {
        summary: JsonSummary {
            total_files: summary.total_units,
            total_score: summary.total_score,
            average_score: summary.average_per_unit(),
        },
        files: units
            .iter()
            .map(|unit| JsonFile {
                file: unit.path.display().to_string(),
                mode: &unit.mode,
                total: unit.total(),
                functions: details
                    .then(|| unit.report.functions.iter().map(JsonFunction::from).collect()),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
