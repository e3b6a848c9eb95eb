use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jittergraph::charts::TimeAxis;
use jittergraph::{GrapherOptions, JitterGrapher, ReportMode};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jittergraph")]
#[command(about = "Graph inter-sample timestamp jitter of every stream in a recording", long_about = None)]
struct Args {
    /// Decoded recording to analyze
    xdf_input_path: PathBuf,

    /// Directory receiving results.json and the chart PNGs
    output_dir: PathBuf,

    /// Override every stream's nominal sample rate
    #[arg(long)]
    sample_rate_hz: Option<f64>,

    /// Only analyze the first N seconds worth of samples per stream
    #[arg(long)]
    window_seconds: Option<f64>,

    /// Write stream metadata instead of interval sequences
    #[arg(long)]
    metadata_only: bool,

    /// Plot raw timestamps instead of elapsed time
    #[arg(long)]
    raw_time: bool,

    /// JSON options file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    async fn into_options(self) -> Result<GrapherOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let mut config: serde_json::Value = serde_json::from_str(
                    &tokio::fs::read_to_string(path)
                        .await
                        .with_context(|| format!("Failed to read config {:?}", path))?,
                )
                .context("Config file is not valid JSON")?;
                if !config.is_object() {
                    anyhow::bail!("Config file {:?} must contain a JSON object", path);
                }
                config["xdfInputPath"] = serde_json::Value::String(self.xdf_input_path.display().to_string());
                config["outputDir"] = serde_json::Value::String(self.output_dir.display().to_string());
                GrapherOptions::from_json(config)?
            }
            None => GrapherOptions::new(&self.xdf_input_path, &self.output_dir),
        };

        if let Some(rate) = self.sample_rate_hz {
            options = options.with_sample_rate_hz(rate);
        }
        if let Some(window) = self.window_seconds {
            options = options.with_window_seconds(window);
        }
        if self.metadata_only {
            options = options.with_report_mode(ReportMode::Metadata);
        }
        if self.raw_time {
            options = options.with_time_axis(TimeAxis::Raw);
        }
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into()))
        .init();

    let options = Args::parse().into_options().await?;
    let mut grapher = JitterGrapher::create(options)?;
    grapher.run().await?;

    Ok(())
}
