//! Report pipeline: load → rename → filter → sort → figure → PDF.
//!
//! Reports differ only by their [`ReportDefinition`]; this module holds the
//! shared steps.

pub mod definitions;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::chart::{pdf, BarPanel, Figure, Series};
use crate::color::series_colors;
use crate::config::ReportConfig;
use crate::data::filter::filtered_rows;
use crate::data::loader::load_results;
use crate::data::model::{short_label, sort_by_instance_number, ResultTable};
use crate::error::ReportError;

pub use definitions::{ReportDefinition, ReportKind};

/// What happened to one report.
#[derive(Debug)]
pub enum ReportOutcome {
    /// The PDF was written.
    Written { path: PathBuf, figure: Figure },
    /// The input table does not exist; nothing was written.
    MissingInput { path: PathBuf },
    /// Every row was filtered out; nothing was written.
    NothingSolved,
}

/// Run one report end to end.
///
/// A missing input file is not an error: it is logged and reported as
/// [`ReportOutcome::MissingInput`]. Malformed tables are errors.
pub fn run_report(kind: ReportKind, config: &ReportConfig) -> Result<ReportOutcome> {
    let def = kind.definition();
    let input = config.results_dir.join(def.input_file);

    let table = match load_results(&input) {
        Ok(table) => table,
        Err(ReportError::MissingInput { path }) => {
            log::error!("[{kind}] input file '{}' not found, skipping", path.display());
            return Ok(ReportOutcome::MissingInput { path });
        }
        Err(e) => return Err(e).with_context(|| format!("[{kind}] reading {}", input.display())),
    };
    log::info!("[{kind}] loaded {} rows from {}", table.len(), input.display());

    let figure = build_figure(&def, table, config)
        .with_context(|| format!("[{kind}] building chart from {}", input.display()))?;
    let Some(figure) = figure else {
        log::warn!("[{kind}] no instance solved within the time limit, nothing to plot");
        return Ok(ReportOutcome::NothingSolved);
    };

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating output directory {}", config.output_dir.display()))?;
    let output = config.output_dir.join(def.output_file);
    pdf::write_pdf(&figure, &output)?;
    log::info!("[{kind}] chart written to {}", output.display());

    Ok(ReportOutcome::Written {
        path: output,
        figure,
    })
}

/// Turn a loaded table into a figure, or `None` when no row survives the
/// report's row selection.
pub fn build_figure(
    def: &ReportDefinition,
    mut table: ResultTable,
    config: &ReportConfig,
) -> Result<Option<Figure>, ReportError> {
    table.rename_columns(def.renames);

    let filters = def.selection.filters();
    for filter in &filters {
        if !table.has_column(filter.column()) {
            return Err(ReportError::MissingColumn {
                column: filter.column().to_string(),
                path: table.source.clone(),
            });
        }
    }

    let mut rows = filtered_rows(&table, &filters);
    log::debug!(
        "[{}] {} of {} rows kept after filtering",
        def.kind,
        rows.len(),
        table.len()
    );
    if rows.is_empty() {
        return Ok(None);
    }
    sort_by_instance_number(&table, &mut rows);

    let categories: Vec<String> = rows
        .iter()
        .map(|&i| short_label(&table.rows[i].instance).to_string())
        .collect();

    let n_series = def.panels.iter().map(|p| p.series.len()).max().unwrap_or(0);
    let colors = series_colors(&config.colors, n_series)?;

    let panels = def
        .panels
        .iter()
        .map(|spec| {
            let series = spec
                .series
                .iter()
                .zip(&colors)
                .map(|(s, &color)| {
                    Ok(Series {
                        name: s.name.to_string(),
                        values: table.numeric_column(s.column, &rows)?,
                        color,
                    })
                })
                .collect::<Result<Vec<_>, ReportError>>()?;
            Ok(BarPanel {
                title: spec.title.to_string(),
                x_label: def.x_label.to_string(),
                y_label: spec.y_label.to_string(),
                categories: categories.clone(),
                series,
                scale: spec.scale,
            })
        })
        .collect::<Result<Vec<_>, ReportError>>()?;

    Ok(Some(Figure {
        title: def.title.to_string(),
        panels,
        width_mm: config.figure_width_mm,
        height_mm: config.figure_height_mm,
        font_size: config.font_size,
    }))
}
