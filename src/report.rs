//! The `results.json` document

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::config::ReportMode;
use crate::core::{StreamMetadata, StreamResult};

const INDENT: &[u8] = b"    ";

/// Largest integer an f64 holds exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Pretty printer that writes whole-number floats without a fraction
///
/// `1000.0` becomes `1000`, matching how JavaScript tooling prints numbers,
/// so documents compare byte for byte. Other floats keep their shortest
/// round-trip form.
struct ReportFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> ReportFormatter<'a> {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl Formatter for ReportFormatter<'_> {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            self.pretty.write_i64(writer, value as i64)
        } else {
            self.pretty.write_f64(writer, value)
        }
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object_value(writer)
    }
}

/// Summary of one run; keys serialize in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsDocument {
    pub xdf_input_path: String,
    pub output_dir: String,
    pub results_json_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streams: Option<Vec<StreamMetadata>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_results: Option<Vec<StreamResult>>,
}

impl ResultsDocument {
    pub fn new(
        mode: ReportMode,
        xdf_input_path: &Path,
        output_dir: &Path,
        results_json_path: &Path,
        results: &[StreamResult],
    ) -> Self {
        let (streams, stream_results) = match mode {
            ReportMode::Jitter => (None, Some(results.to_vec())),
            ReportMode::Metadata => (Some(results.iter().map(|r| r.metadata.clone()).collect()), None),
        };

        Self {
            xdf_input_path: xdf_input_path.display().to_string(),
            output_dir: output_dir.display().to_string(),
            results_json_path: results_json_path.display().to_string(),
            streams,
            stream_results,
        }
    }

    /// Pretty-printed UTF-8 JSON with four-space indentation
    ///
    /// Whole-number floats are written as integers (`1000`, not `1000.0`).
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, ReportFormatter::new());
        self.serialize(&mut serializer)?;
        Ok(out)
    }

    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
