use std::path::PathBuf;

use crate::error::ConfigError;
use crate::types::chart::{ChartOptions, OutputFormat};
use crate::types::zone::ZoneTable;

pub const DEFAULT_EMA_SPAN: usize = 10;
pub const DEFAULT_HR_MAX: f64 = 180.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub ema_span: usize,
    pub hr_max: f64,
    pub out_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub output_format: OutputFormat,
    pub render_charts: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let ema_span = std::env::var("RUNVIZ_EMA_SPAN")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_EMA_SPAN);

        let hr_max = std::env::var("RUNVIZ_HR_MAX")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HR_MAX);

        let chart_width = std::env::var("RUNVIZ_CHART_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1600);

        let chart_height = std::env::var("RUNVIZ_CHART_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(900);

        Self {
            input_path: PathBuf::new(),
            ema_span,
            hr_max,
            out_dir: PathBuf::from("."),
            chart_width,
            chart_height,
            output_format: OutputFormat::default(),
            render_charts: true,
        }
    }

    pub fn analysis(&self) -> Result<AnalysisConfig, ConfigError> {
        AnalysisConfig::new(self.ema_span, self.hr_max, ZoneTable::standard())
    }

    pub fn chart_options(&self) -> Result<ChartOptions, ConfigError> {
        ChartOptions::new(self.chart_width, self.chart_height)
    }
}

/// Validated inputs to the derivation and classification stages.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub ema_span: usize,
    pub hr_max: f64,
    pub zones: ZoneTable,
}

impl AnalysisConfig {
    pub fn new(ema_span: usize, hr_max: f64, zones: ZoneTable) -> Result<Self, ConfigError> {
        if ema_span < 1 {
            return Err(ConfigError::InvalidSpan(ema_span));
        }
        if !hr_max.is_finite() || hr_max <= 0.0 {
            return Err(ConfigError::InvalidHrMax(hr_max));
        }
        Ok(Self {
            ema_span,
            hr_max,
            zones,
        })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ema_span: DEFAULT_EMA_SPAN,
            hr_max: DEFAULT_HR_MAX,
            zones: ZoneTable::standard(),
        }
    }
}
