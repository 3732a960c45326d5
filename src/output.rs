use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::AppError;
use crate::pipeline::analyze::Analysis;
use crate::pipeline::{rasterize, render};
use crate::types::activity::ActivitySummary;
use crate::types::chart::{ChartKind, ChartOptions, OutputConfig, OutputFormat};
use crate::types::zone::ZoneTimeTotals;

pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Serialize)]
struct SummaryOutput<'a> {
    summary: &'a ActivitySummary,
    zone_minutes: &'a ZoneTimeTotals,
    dropped_records: usize,
    hr_max: f64,
}

impl<'a> From<&'a Analysis> for SummaryOutput<'a> {
    fn from(analysis: &'a Analysis) -> Self {
        Self {
            summary: &analysis.summary,
            zone_minutes: &analysis.zone_totals,
            dropped_records: analysis.dropped_records,
            hr_max: analysis.hr_max,
        }
    }
}

pub fn summary_json(analysis: &Analysis) -> Result<String, AppError> {
    serde_json::to_string_pretty(&SummaryOutput::from(analysis))
        .map_err(|e| AppError::Internal(format!("Failed to serialise summary: {}", e)))
}

/// Writes `summary.json` into the output directory, plus one file per chart
/// unless chart rendering is switched off. Returns the paths written.
pub fn write_outputs(analysis: &Analysis, config: &Config) -> Result<Vec<PathBuf>, AppError> {
    let chart_options = if config.render_charts {
        Some(config.chart_options()?)
    } else {
        None
    };

    std::fs::create_dir_all(&config.out_dir).map_err(|source| AppError::Output {
        path: config.out_dir.clone(),
        source,
    })?;

    let mut written = Vec::new();

    let summary_path = config.out_dir.join(SUMMARY_FILE);
    write_file(&summary_path, summary_json(analysis)?.as_bytes())?;
    written.push(summary_path);

    if let Some(options) = chart_options {
        for kind in ChartKind::ALL {
            let path = write_chart(analysis, kind, &options, config.output_format, &config.out_dir)?;
            tracing::info!("Wrote {} chart to {}", kind.as_str(), path.display());
            written.push(path);
        }
    }

    Ok(written)
}

fn write_chart(
    analysis: &Analysis,
    kind: ChartKind,
    options: &ChartOptions,
    format: OutputFormat,
    out_dir: &Path,
) -> Result<PathBuf, AppError> {
    let svg = match kind {
        ChartKind::Activity => render::render_activity_chart(analysis, options)?,
        ChartKind::Zones => render::render_zone_chart(analysis, options)?,
    };
    let path = out_dir.join(format!("{}.{}", kind.as_str(), format.extension()));
    match format {
        OutputFormat::Svg => write_file(&path, svg.as_bytes())?,
        OutputFormat::Png => {
            let png = rasterize::rasterize(&svg, &OutputConfig::for_chart(options))?;
            write_file(&path, &png)?;
        }
    }
    Ok(path)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    std::fs::write(path, contents).map_err(|source| AppError::Output {
        path: path.to_path_buf(),
        source,
    })
}
