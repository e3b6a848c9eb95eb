//! Timestamp jitter analysis for multi-stream recordings
//!
//! A [`JitterGrapher`] loads a recording, turns every stream's timestamps
//! into inter-sample intervals and writes three artifacts to the output
//! directory: `results.json`, `intervals_over_time.png` and `jitter.png`.
//!
//! ```no_run
//! use jittergraph::{GrapherOptions, JitterGrapher};
//!
//! # async fn demo() -> Result<(), jittergraph::GrapherError> {
//! let options = GrapherOptions::new("./artifacts/test.json", "./artifacts").with_window_seconds(10.0);
//! let mut grapher = JitterGrapher::create(options)?;
//! grapher.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod charts;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod io;
pub mod jitter;
pub mod mock;
pub mod report;

pub use config::{ChartOptions, GrapherOptions, ReportMode};
pub use core::{Recording, Stream, StreamMetadata, StreamResult};
pub use engine::{GrapherState, JitterGrapher};
pub use error::{GrapherError, InsufficientSamplesError, InsufficientStream};
pub use jitter::JitterCalculator;
pub use report::ResultsDocument;
