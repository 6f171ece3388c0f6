pub mod html;
pub mod json;
pub mod terminal;

use crate::aggregation::GroupOptions;
use crate::cli::OutputFormat;
use crate::core::UnitReport;
use anyhow::Result;
use std::path::Path;

pub use html::render_html;
pub use json::render_json;
pub use terminal::{render_grouped, render_table};

/// Presentation switches shared by every renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Include per-function scores and drivers
    pub details: bool,
    /// Grouped text listing instead of the table
    pub group: bool,
    pub grouping: GroupOptions,
}

/// Pick the output format: explicit flag, else the output file's extension
/// (JSON when unrecognised), else a table on stdout.
pub fn resolve_format(explicit: Option<OutputFormat>, output: Option<&Path>) -> OutputFormat {
    if let Some(format) = explicit {
        return format;
    }
    match output {
        None => OutputFormat::Table,
        Some(path) => match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("html") | Some("htm") => OutputFormat::Html,
            _ => OutputFormat::Json,
        },
    }
}

/// Render ranked, filtered units in the requested format.
pub fn render(units: &[UnitReport], format: OutputFormat, options: RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(units, options.details),
        OutputFormat::Html => Ok(render_html(units, options.details)),
        OutputFormat::Table if options.group => Ok(render_grouped(units, options)),
        OutputFormat::Table => Ok(render_table(units, options.details)),
    }
}

/// Write to `output` (creating parent directories) or print to stdout.
pub fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => Ok(crate::io::write_file(path, content)?),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
