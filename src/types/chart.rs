use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Activity,
    Zones,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Activity, ChartKind::Zones];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Activity => "activity",
            ChartKind::Zones => "zones",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    #[default]
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub stroke_width: f32,
    /// Catmull-Rom tension for the smoothed heart-rate line.
    /// 0.0 = straight segments. Raw heart rate and pace are always drawn straight.
    pub curve_tension: f32,
    pub hr_color: &'static str,
    pub pace_color: &'static str,
    pub show_zone_bands: bool,
}

impl ChartOptions {
    const MIN_DIM: u32 = 320;
    const MAX_DIM: u32 = 4096;

    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if !(Self::MIN_DIM..=Self::MAX_DIM).contains(&width)
            || !(Self::MIN_DIM..=Self::MAX_DIM).contains(&height)
        {
            return Err(ConfigError::InvalidDimensions(width, height));
        }

        Ok(Self {
            width,
            height,
            padding: 64,
            stroke_width: 2.0,
            curve_tension: 0.2,
            hr_color: "#E53935",
            pace_color: "#1E88E5",
            show_zone_bands: true,
        })
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    pub background: Option<(u8, u8, u8, u8)>,
}

impl OutputConfig {
    pub fn for_chart(options: &ChartOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            background: Some((255, 255, 255, 255)),
        }
    }
}
