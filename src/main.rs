use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use runviz_rs::error::{AppError, ParseError};
use runviz_rs::pipeline::analyze;
use runviz_rs::types::activity::FileFormat;
use runviz_rs::types::chart::OutputFormat;
use runviz_rs::{output, Analysis, Config};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Chart heart rate, pace and time in heart-rate zones for a recorded run.
#[derive(Parser)]
#[command(name = "runviz", version)]
struct Cli {
    /// Activity file (.fit, or a .json dump of decoded records)
    input: PathBuf,

    /// Smoothing span of the heart-rate EMA [env: RUNVIZ_EMA_SPAN, default 10]
    #[arg(long)]
    ema_span: Option<usize>,

    /// Maximum heart rate in bpm [env: RUNVIZ_HR_MAX, default 180]
    #[arg(long)]
    hr_max: Option<f64>,

    /// Directory charts and summary.json are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long, value_enum, default_value = "png")]
    format: FormatArg,

    /// Print the analysis summary as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Svg,
    Png,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Png => OutputFormat::Png,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runviz_rs=info,runviz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    let config = apply_cli(Config::from_env(), cli);

    match run(&config, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn apply_cli(mut config: Config, cli: Cli) -> Config {
    config.input_path = cli.input;
    if let Some(span) = cli.ema_span {
        config.ema_span = span;
    }
    if let Some(hr_max) = cli.hr_max {
        config.hr_max = hr_max;
    }
    if let Some(width) = cli.width {
        config.chart_width = width;
    }
    if let Some(height) = cli.height {
        config.chart_height = height;
    }
    config.out_dir = cli.out_dir;
    config.output_format = cli.format.into();
    config.render_charts = !cli.no_charts;
    config
}

fn run(config: &Config, json: bool) -> Result<(), AppError> {
    let analysis_config = config.analysis()?;
    if config.render_charts {
        config.chart_options()?;
    }

    let filename = config.input_path.to_string_lossy();
    let format = FileFormat::from_filename(&filename)
        .ok_or_else(|| ParseError::UnsupportedFormat(filename.to_string()))?;
    let bytes = std::fs::read(&config.input_path).map_err(|source| ParseError::Io {
        path: config.input_path.clone(),
        source,
    })?;

    tracing::info!("Analysing {} ({} bytes)", filename, bytes.len());
    let analysis = analyze::analyze_bytes(&bytes, format, &analysis_config)?;

    output::write_outputs(&analysis, config)?;

    if json {
        println!("{}", output::summary_json(&analysis)?);
    } else {
        print_report(&analysis);
    }

    Ok(())
}

fn print_report(analysis: &Analysis) {
    let summary = &analysis.summary;
    println!(
        "Samples:      {} ({} records dropped)",
        summary.sample_count, analysis.dropped_records
    );
    println!("Duration:     {:.1} min", summary.duration_min);
    println!("Distance:     {:.2} km", summary.distance_km);
    println!(
        "Heart rate:   avg {:.0} bpm, max {:.0} bpm",
        summary.avg_heart_rate, summary.max_heart_rate
    );
    match summary.avg_pace_min_per_km {
        Some(pace) => println!("Avg pace:     {:.2} min/km", pace),
        None => println!("Avg pace:     -"),
    }
    println!("Time in zone:");
    for zone in analysis.zone_table.zones() {
        let minutes = analysis.zone_totals.get(zone.label);
        println!(
            "  {:<22} {:>7.1} min  {:>5.1}%",
            zone.label,
            minutes,
            analysis.zone_totals.share(zone.label) * 100.0
        );
    }
    let unknown = runviz_rs::types::zone::UNKNOWN_ZONE;
    if analysis.zone_totals.contains(unknown) {
        println!(
            "  {:<22} {:>7.1} min",
            unknown,
            analysis.zone_totals.get(unknown)
        );
    }
}
