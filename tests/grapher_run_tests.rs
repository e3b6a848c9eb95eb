use std::path::PathBuf;

use jittergraph::charts::{ChartLayout, TimeAxis};
use jittergraph::mock::{FakeChartRenderer, FakeRecordingLoader, MemoryWriter, FAKE_PNG};
use jittergraph::{
    GrapherError, GrapherOptions, GrapherState, JitterGrapher, Recording, ReportMode, ResultsDocument,
    Stream, StreamMetadata,
};

const INPUT: &str = "recordings/session-42.xdf";
const OUTPUT: &str = "artifacts/session-42";

fn fake_stream(id: u32, name: &str, rate_hz: f64, count: usize) -> Stream {
    let channel_count = 2;
    Stream {
        metadata: StreamMetadata {
            id,
            name: name.to_string(),
            stream_type: "EEG".to_string(),
            channel_count,
            channel_format: "float32".to_string(),
            nominal_sample_rate_hz: rate_hz,
        },
        data: (0..count)
            .map(|i| (0..channel_count).map(|c| i as f64 + c as f64 * 0.5).collect())
            .collect(),
        timestamps: (0..count)
            .map(|i| i as f64 / rate_hz + if i % 2 == 0 { 0.0003 } else { -0.0001 })
            .collect(),
    }
}

fn fake_recording() -> Recording {
    Recording::new(
        "",
        vec![
            fake_stream(1, "eeg-amp", 100.0, 10),
            fake_stream(2, "ppg-wrist", 64.0, 10),
        ],
    )
}

struct Harness {
    loader: FakeRecordingLoader,
    writer: MemoryWriter,
    renderer: FakeChartRenderer,
    grapher: JitterGrapher,
}

fn harness(options: GrapherOptions) -> Harness {
    let loader = FakeRecordingLoader::new(fake_recording());
    let writer = MemoryWriter::new();
    let renderer = FakeChartRenderer::new();
    let grapher = JitterGrapher::with_collaborators(
        options,
        Box::new(loader.clone()),
        Box::new(writer.clone()),
        Box::new(renderer.clone()),
    )
    .unwrap();

    Harness { loader, writer, renderer, grapher }
}

fn default_harness() -> Harness {
    harness(GrapherOptions::new(INPUT, OUTPUT))
}

fn results_path() -> PathBuf {
    PathBuf::from(OUTPUT).join("results.json")
}

#[tokio::test]
async fn test_creates_instance_in_created_state() {
    let h = default_harness();
    assert_eq!(h.grapher.state(), &GrapherState::Created);
    assert_eq!(h.grapher.options().results_json_path(), results_path());
}

#[tokio::test]
async fn test_run_loads_from_given_path() {
    let mut h = default_harness();
    h.grapher.run().await.unwrap();

    assert_eq!(h.loader.calls_to_load().await, vec![PathBuf::from(INPUT)]);
    assert_eq!(h.grapher.state(), &GrapherState::Done);
}

#[tokio::test]
async fn test_writes_results_json_first() {
    let mut h = default_harness();
    h.grapher.run().await.unwrap();

    let streams = fake_recording().streams;
    let expected = ResultsDocument::new(
        ReportMode::Jitter,
        &PathBuf::from(INPUT),
        &PathBuf::from(OUTPUT),
        &results_path(),
        &jittergraph::JitterCalculator::new().calculate(&streams).unwrap(),
    )
    .to_json_bytes()
    .unwrap();

    let writes = h.writer.writes().await;
    assert_eq!(writes[0].path, results_path());
    assert_eq!(writes[0].contents, expected);
}

#[tokio::test]
async fn test_written_json_matches_computed_intervals() {
    let mut h = default_harness();
    h.grapher.run().await.unwrap();

    let bytes = h.writer.contents_of(results_path()).await.unwrap();
    let doc = ResultsDocument::from_json_slice(&bytes).unwrap();
    let parsed = doc.stream_results.unwrap();

    for (result, stream) in parsed.iter().zip(fake_recording().streams) {
        let expected: Vec<f64> = stream.timestamps.windows(2).map(|w| (w[1] - w[0]) * 1000.0).collect();
        assert_eq!(result.intervals_ms, expected);
    }
    assert_eq!(doc.xdf_input_path, INPUT);
    assert_eq!(doc.output_dir, OUTPUT);
}

#[tokio::test]
async fn test_metadata_mode_writes_stream_metadata() {
    let mut h = harness(GrapherOptions::new(INPUT, OUTPUT).with_report_mode(ReportMode::Metadata));
    h.grapher.run().await.unwrap();

    let bytes = h.writer.contents_of(results_path()).await.unwrap();
    let doc = ResultsDocument::from_json_slice(&bytes).unwrap();
    assert_eq!(doc.streams.unwrap(), fake_recording().stream_metadata());
    assert!(doc.stream_results.is_none());
}

#[tokio::test]
async fn test_writes_both_charts() {
    let mut h = default_harness();
    h.grapher.run().await.unwrap();

    let writes = h.writer.writes().await;
    let paths: Vec<PathBuf> = writes.iter().map(|w| w.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            results_path(),
            PathBuf::from(OUTPUT).join("intervals_over_time.png"),
            PathBuf::from(OUTPUT).join("jitter.png"),
        ]
    );
    assert_eq!(writes[1].contents, FAKE_PNG);
    assert_eq!(writes[2].contents, FAKE_PNG);

    let charts = h.renderer.rendered_charts().await;
    assert_eq!(charts.len(), 2);
    assert!(matches!(charts[0].layout, ChartLayout::FacetedLine { .. }));
    assert!(matches!(charts[1].layout, ChartLayout::Histogram { .. }));
}

#[tokio::test]
async fn test_throws_if_not_enough_data() {
    for count in [0usize, 1] {
        let mut h = default_harness();
        let mut recording = fake_recording();
        for stream in &mut recording.streams {
            stream.data.truncate(count);
            stream.timestamps.truncate(count);
        }
        h.loader.set_response(recording).await;

        let err = h.grapher.run().await.unwrap_err();
        assert!(matches!(err, GrapherError::InsufficientSamples(_)));
        assert_eq!(
            err.to_string(),
            format!(
                "Cannot calculate jitter with less than 2 samples! \n\nFound: {count} samples in stream eeg-amp and {count} samples in stream ppg-wrist.\n"
            )
        );
        assert!(h.writer.writes().await.is_empty());
        assert!(h.renderer.rendered_charts().await.is_empty());
        assert_eq!(h.grapher.state().name(), "Failed");
    }
}

#[tokio::test]
async fn test_single_short_stream_is_named() {
    let mut h = default_harness();
    h.loader
        .set_response(Recording::new("", vec![fake_stream(9, "lonely", 10.0, 1)]))
        .await;

    let message = h.grapher.run().await.unwrap_err().to_string();
    assert!(message.contains("less than 2 samples"));
    assert!(message.contains("1 samples in stream lonely"));
}

#[tokio::test]
async fn test_load_error_is_propagated_verbatim() {
    let mut h = default_harness();
    h.loader.fail_with("container header is corrupt").await;

    let err = h.grapher.run().await.unwrap_err();
    assert!(matches!(err, GrapherError::Load(_)));
    assert_eq!(err.to_string(), "container header is corrupt");
    assert!(h.writer.writes().await.is_empty());
}

#[tokio::test]
async fn test_write_error_is_propagated_verbatim() {
    let mut h = default_harness();
    h.writer.fail_on(results_path()).await;

    let err = h.grapher.run().await.unwrap_err();
    assert!(matches!(err, GrapherError::Write(_)));
    assert_eq!(err.to_string(), format!("permission denied: {:?}", results_path()));
    assert!(h.renderer.rendered_charts().await.is_empty());
}

#[tokio::test]
async fn test_render_error_keeps_earlier_artifacts() {
    let mut h = default_harness();
    h.renderer.fail_with("rasterizer unavailable").await;

    let err = h.grapher.run().await.unwrap_err();
    assert!(matches!(err, GrapherError::Render(_)));
    assert_eq!(err.to_string(), "rasterizer unavailable");

    let writes = h.writer.writes().await;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, results_path());
}

#[tokio::test]
async fn test_window_limits_plotted_points() {
    let mut h = harness(GrapherOptions::new(INPUT, OUTPUT).with_window_seconds(10.0));
    h.loader
        .set_response(Recording::new("", vec![fake_stream(1, "long", 100.0, 5000)]))
        .await;
    h.grapher.run().await.unwrap();

    let bytes = h.writer.contents_of(results_path()).await.unwrap();
    let doc = ResultsDocument::from_json_slice(&bytes).unwrap();
    assert_eq!(doc.stream_results.unwrap()[0].intervals_ms.len(), 1000);

    let charts = h.renderer.rendered_charts().await;
    let ChartLayout::FacetedLine { rows, time_axis } = &charts[0].layout else {
        panic!("expected a faceted chart");
    };
    assert_eq!(*time_axis, TimeAxis::Elapsed);
    assert_eq!(rows[0].points.len(), 1000);
    assert_eq!(rows[0].points[0].time_s, 0.0);
}

#[tokio::test]
async fn test_sample_rate_override_moves_reference_line() {
    let mut h = harness(GrapherOptions::new(INPUT, OUTPUT).with_sample_rate_hz(250.0));
    h.grapher.run().await.unwrap();

    let charts = h.renderer.rendered_charts().await;
    let ChartLayout::FacetedLine { rows, .. } = &charts[0].layout else {
        panic!("expected a faceted chart");
    };
    assert!(rows.iter().all(|r| r.ideal_interval_ms == Some(4.0)));
}

#[tokio::test]
async fn test_runs_again_with_same_loader() {
    let mut h = default_harness();
    h.grapher.run().await.unwrap();
    h.grapher.run().await.unwrap();

    assert_eq!(h.loader.calls_to_load().await.len(), 2);
    assert_eq!(h.writer.writes().await.len(), 6);
    assert_eq!(h.grapher.state(), &GrapherState::Done);
}

#[tokio::test]
async fn test_recovers_after_failed_run() {
    let mut h = default_harness();
    h.loader
        .set_response(Recording::new("", vec![fake_stream(1, "short", 10.0, 1)]))
        .await;
    assert!(h.grapher.run().await.is_err());

    h.loader.set_response(fake_recording()).await;
    h.grapher.run().await.unwrap();
    assert_eq!(h.grapher.state(), &GrapherState::Done);
}

#[test]
fn test_rejects_invalid_options() {
    let result = JitterGrapher::with_collaborators(
        GrapherOptions::new(INPUT, OUTPUT).with_sample_rate_hz(-1.0),
        Box::new(FakeRecordingLoader::default()),
        Box::new(MemoryWriter::new()),
        Box::new(FakeChartRenderer::new()),
    );
    assert!(matches!(result, Err(GrapherError::InvalidConfig(_))));
}
