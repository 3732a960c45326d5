use crate::config::AnalysisConfig;
use crate::error::ProcessError;
use crate::types::activity::{ActivitySummary, DerivedSample, TimeSeries};

const MS_PER_MINUTE: f64 = 60_000.0;

/// Exponential moving average, seeded with the first value it sees.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    alpha: f64,
    state: Option<f64>,
}

impl Ema {
    pub fn new(alpha: f64) -> Self {
        Self { alpha, state: None }
    }

    pub fn with_span(span: usize) -> Self {
        Self::new(2.0 / (span as f64 + 1.0))
    }

    pub fn next(&mut self, value: f64) -> f64 {
        let smoothed = match self.state {
            None => value,
            Some(prev) => self.alpha * value + (1.0 - self.alpha) * prev,
        };
        self.state = Some(smoothed);
        smoothed
    }
}

/// Minutes per kilometre at `speed` m/s. `None` when not moving.
pub fn pace_min_per_km(speed: f64) -> Option<f64> {
    if speed > 0.0 {
        Some(1000.0 / (speed * 60.0))
    } else {
        None
    }
}

pub fn derive_metrics(
    series: &TimeSeries,
    config: &AnalysisConfig,
) -> Result<Vec<DerivedSample>, ProcessError> {
    let first = series.samples.first().ok_or(ProcessError::EmptySeries)?;
    let start = first.timestamp;
    let mut ema = Ema::with_span(config.ema_span);

    let derived: Vec<DerivedSample> = series
        .samples
        .iter()
        .map(|sample| {
            let elapsed_min = (sample.timestamp - start).num_milliseconds() as f64 / MS_PER_MINUTE;
            let smoothed_hr = ema.next(sample.heart_rate);
            DerivedSample {
                timestamp: sample.timestamp,
                heart_rate: sample.heart_rate,
                speed: sample.speed,
                elapsed_min,
                pace_min_per_km: pace_min_per_km(sample.speed),
                smoothed_hr,
                hr_pct_max: smoothed_hr / config.hr_max * 100.0,
            }
        })
        .collect();

    let stationary = derived
        .iter()
        .filter(|sample| sample.pace_min_per_km.is_none())
        .count();
    if stationary > 0 {
        tracing::debug!("{} stationary samples have no pace", stationary);
    }

    Ok(derived)
}

pub fn summarize(derived: &[DerivedSample]) -> Result<ActivitySummary, ProcessError> {
    let last = derived.last().ok_or(ProcessError::EmptySeries)?;
    let count = derived.len();

    let mut distance_m = 0.0;
    for pair in derived.windows(2) {
        let dt_seconds = (pair[1].elapsed_min - pair[0].elapsed_min).max(0.0) * 60.0;
        distance_m += pair[1].speed.max(0.0) * dt_seconds;
    }

    let hr_sum: f64 = derived.iter().map(|sample| sample.heart_rate).sum();
    let max_heart_rate = derived
        .iter()
        .map(|sample| sample.heart_rate)
        .fold(f64::NEG_INFINITY, f64::max);

    let duration_min = last.elapsed_min;
    let avg_speed_ms = if duration_min > 0.0 {
        distance_m / (duration_min * 60.0)
    } else {
        derived.iter().map(|sample| sample.speed).sum::<f64>() / count as f64
    };

    Ok(ActivitySummary {
        sample_count: count,
        duration_min,
        distance_km: distance_m / 1000.0,
        avg_heart_rate: hr_sum / count as f64,
        max_heart_rate,
        avg_speed_ms,
        avg_pace_min_per_km: pace_min_per_km(avg_speed_ms),
        stationary_samples: derived
            .iter()
            .filter(|sample| sample.pace_min_per_km.is_none())
            .count(),
    })
}
