//! Writers for processed reports.
//!
//! A report is always fully extracted and rendered before the first byte is
//! written, so a failing report produces no output at all.

use serde::Serialize;
use std::io::Write;

use crate::config::MetricsConfig;
use crate::entity::Entity;
use crate::extraction::ExtractionError;
use crate::render::ReportLine;
use crate::ProcessedReport;

/// Error type for serialization operations
#[derive(Debug)]
pub enum SerializationError {
    JsonError(serde_json::Error),
    IoError(std::io::Error),
    ExtractionError(ExtractionError),
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::JsonError(err)
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(err: std::io::Error) -> Self {
        SerializationError::IoError(err)
    }
}

impl From<ExtractionError> for SerializationError {
    fn from(err: ExtractionError) -> Self {
        SerializationError::ExtractionError(err)
    }
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationError::JsonError(e) => write!(f, "JSON error: {}", e),
            SerializationError::IoError(e) => write!(f, "IO error: {}", e),
            SerializationError::ExtractionError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SerializationError {}

/// Output format for a processed report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One "Label: value" line per field
    #[default]
    Text,
    /// A single pretty-printed JSON document
    Json,
}

/// "Label: value" line writer
pub struct LineWriter<W: Write> {
    writer: W,
}

impl<W: Write> LineWriter<W> {
    /// Create a new line writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single line
    pub fn write(&mut self, line: &ReportLine) -> Result<(), SerializationError> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    /// Write multiple lines
    pub fn write_all(&mut self, lines: &[ReportLine]) -> Result<(), SerializationError> {
        for line in lines {
            self.write(line)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), SerializationError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    observation: serde_json::Value,
    metrics: serde_json::Value,
    lines: &'a [ReportLine],
}

/// Write `processed` as one pretty-printed JSON document.
pub fn write_json<W: Write>(
    mut writer: W,
    processed: &ProcessedReport,
) -> Result<(), SerializationError> {
    let document = JsonDocument {
        observation: processed.observation.to_value()?,
        metrics: processed.metrics.to_value()?,
        lines: &processed.lines,
    };

    serde_json::to_writer_pretty(&mut writer, &document)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Process `text` and write it in `format`.
///
/// Nothing is written unless every field and metric is available.
pub fn write_report<W: Write>(
    text: &str,
    config: &MetricsConfig,
    format: OutputFormat,
    writer: W,
) -> Result<(), SerializationError> {
    let processed = crate::process_report(text, config)?;

    match format {
        OutputFormat::Text => {
            let mut lines = LineWriter::new(writer);
            lines.write_all(&processed.lines)?;
            lines.flush()?;
        }
        OutputFormat::Json => write_json(writer, &processed)?,
    }

    tracing::debug!(lines = processed.lines.len(), ?format, "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../tests/fixtures/sun_moon_earth.txt");

    #[test]
    fn test_line_writer() {
        let mut buf = Vec::new();
        let mut writer = LineWriter::new(&mut buf);

        writer
            .write(&ReportLine {
                label: "Time Zone".to_string(),
                value: "UT + 2:00 h".to_string(),
            })
            .unwrap();
        writer.flush().unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "Time Zone: UT + 2:00 h\n");
    }

    #[test]
    fn test_write_report_text() {
        let mut buf = Vec::new();
        write_report(SAMPLE, &MetricsConfig::default(), OutputFormat::Text, &mut buf).unwrap();

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0], "Latitude: 31.767 (deg)");
        assert_eq!(lines[16], "Lag Time (Moonset - Sunset): 36 minutes");
    }

    #[test]
    fn test_write_report_json() {
        let mut buf = Vec::new();
        write_report(SAMPLE, &MetricsConfig::default(), OutputFormat::Json, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["observation"]["moon_distance_km"], 392633);
        assert_eq!(value["metrics"]["lag_minutes"], 36.0);
        assert_eq!(value["metrics"]["moon_age"]["hours"], 19);
        assert_eq!(value["lines"].as_array().unwrap().len(), 17);
        assert_eq!(value["lines"][3]["value"], "UT + 2:00 h");
    }

    #[test]
    fn test_write_report_failure_writes_nothing() {
        let text = SAMPLE.replace("Geocentric Elong.", "Elongation");
        let mut buf = Vec::new();

        let err = write_report(&text, &MetricsConfig::default(), OutputFormat::Text, &mut buf)
            .unwrap_err();

        assert!(matches!(err, SerializationError::ExtractionError(_)));
        assert!(buf.is_empty());
    }
}
