use std::path::{Path, PathBuf};

use crate::charts::{
    intervals_over_time_chart, jitter_distribution_chart, ChartRenderer, ChartSpec, PlottersRenderer,
};
use crate::config::GrapherOptions;
use crate::core::StreamResult;
use crate::engine::state::GrapherState;
use crate::error::GrapherError;
use crate::io::{ArtifactWriter, FsArtifactWriter, JsonRecordingLoader, RecordingLoader};
use crate::jitter::JitterCalculator;
use crate::report::ResultsDocument;

/// Runs the load, compute, report and chart steps for one recording
///
/// The loader is created once with the grapher and reused by every `run()`.
pub struct JitterGrapher {
    options: GrapherOptions,
    loader: Box<dyn RecordingLoader>,
    writer: Box<dyn ArtifactWriter>,
    renderer: Box<dyn ChartRenderer>,
    calculator: JitterCalculator,
    state: GrapherState,
}

impl JitterGrapher {
    /// Grapher backed by the JSON loader, filesystem writer and plotters renderer
    pub fn create(options: GrapherOptions) -> Result<Self, GrapherError> {
        Self::with_collaborators(
            options,
            Box::new(JsonRecordingLoader::new()),
            Box::new(FsArtifactWriter::new()),
            Box::new(PlottersRenderer::new()),
        )
    }

    pub fn with_collaborators(
        options: GrapherOptions,
        loader: Box<dyn RecordingLoader>,
        writer: Box<dyn ArtifactWriter>,
        renderer: Box<dyn ChartRenderer>,
    ) -> Result<Self, GrapherError> {
        options.validate()?;

        let calculator = JitterCalculator::new()
            .with_window(options.window_seconds)
            .with_sample_rate_override(options.sample_rate_hz);

        Ok(Self {
            options,
            loader,
            writer,
            renderer,
            calculator,
            state: GrapherState::Created,
        })
    }

    pub fn options(&self) -> &GrapherOptions {
        &self.options
    }

    pub fn state(&self) -> &GrapherState {
        &self.state
    }

    /// Transition to a new state with validation
    fn transition_to(&mut self, new_state: GrapherState) -> Result<(), GrapherError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(GrapherError::InvalidState {
                from: self.state.name().to_string(),
                to: new_state.name().to_string(),
            });
        }
        self.state = new_state;
        Ok(())
    }

    /// Execute one full run; nothing is written unless every stream is valid
    pub async fn run(&mut self) -> Result<(), GrapherError> {
        if self.state.is_finished() {
            self.transition_to(GrapherState::Created)?;
        }

        match self.execute().await {
            Ok(()) => Ok(()),
            Err(err) => {
                log::error!("Jitter run for {:?} failed: {}", self.options.xdf_input_path, err);
                self.state = GrapherState::Failed { error_msg: err.to_string() };
                Err(err)
            }
        }
    }

    async fn execute(&mut self) -> Result<(), GrapherError> {
        log::info!("Loading recording {:?}", self.options.xdf_input_path);
        let recording = self
            .loader
            .load(&self.options.xdf_input_path)
            .await
            .map_err(GrapherError::Load)?;
        self.transition_to(GrapherState::Loaded { stream_count: recording.streams.len() })?;

        let results = self.calculator.calculate(&recording.streams)?;
        self.transition_to(GrapherState::Computed { stream_count: results.len() })?;
        for result in &results {
            log::debug!("Stream {}: {} intervals", result.name(), result.intervals_ms.len());
        }

        let results_path = self.options.results_json_path();
        let document = ResultsDocument::new(
            self.options.report_mode,
            &self.options.xdf_input_path,
            &self.options.output_dir,
            &results_path,
            &results,
        );
        let json = document.to_json_bytes()?;
        self.write(&results_path, &json).await?;
        self.transition_to(GrapherState::JsonWritten)?;

        let charts = self.build_charts(&results);
        let chart_count = charts.len();
        for (path, chart) in charts {
            let png = self.renderer.render_png(&chart).await.map_err(GrapherError::Render)?;
            self.write(&path, &png).await?;
        }
        self.transition_to(GrapherState::ChartsWritten { charts: chart_count })?;

        self.transition_to(GrapherState::Done)?;
        log::info!("Jitter graphs written to {:?}", self.options.output_dir);
        Ok(())
    }

    fn build_charts(&self, results: &[StreamResult]) -> Vec<(PathBuf, ChartSpec)> {
        let calculator = &self.calculator;
        let over_time = intervals_over_time_chart(
            results,
            &self.options.charts,
            self.options.time_axis,
            |r| calculator.effective_rate_hz(r.metadata.nominal_sample_rate_hz),
        );
        let distribution = jitter_distribution_chart(results, &self.options.charts);

        vec![
            (self.options.intervals_chart_path(), over_time),
            (self.options.jitter_chart_path(), distribution),
        ]
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<(), GrapherError> {
        self.writer.write(path, contents).await.map_err(GrapherError::Write)
    }
}
