use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid FIT: {0}")]
    InvalidFit(String),
    #[error("Invalid JSON record dump: {0}")]
    InvalidJson(String),
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("No samples with timestamp, heart rate and speed found in activity")]
    EmptySeries,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("EMA span must be at least 1 (got {0})")]
    InvalidSpan(usize),
    #[error("Maximum heart rate must be a positive number (got {0})")]
    InvalidHrMax(f64),
    #[error("Invalid zone table: {0}")]
    InvalidZones(String),
    #[error("Invalid chart dimensions {0}x{1}")]
    InvalidDimensions(u32, u32),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("PNG rendering failed: {0}")]
    RenderFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("Failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Process exit code: 2 for bad input or configuration, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Parse(_) | AppError::Process(_) | AppError::Config(_) => 2,
            AppError::Render(_)
            | AppError::Raster(_)
            | AppError::Output { .. }
            | AppError::Internal(_) => 1,
        }
    }
}
