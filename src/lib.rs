//! # sme-report: Sun, Moon & Earth report extraction
//!
//! Reads the plain-text observation report produced by *Sun, Moon & Earth*,
//! pulls out Sun and Moon positions, rise/set times and illumination, and
//! derives a few comparative metrics.
//!
//! ## Features
//!
//! - **Section-scoped extraction**: labels that repeat per body (`Alt.`, `Az.`,
//!   `Declin.`) are searched only after the `SUN:` or `MOON:` header
//! - **Typed conversion**: decimal degrees, offset timestamps, clock times
//!   anchored to the report date, integers with thousands separators
//! - **Derived metrics**: moon age breakdown, distance and declination
//!   percentages, Sun-minus-Moon differentials, moonset-sunset lag
//! - **Fail-fast**: a missing or malformed field aborts before any output
//!
//! ## Example
//!
//! ```ignore
//! use sme_report::{process_report, MetricsConfig};
//!
//! let text = std::fs::read_to_string("report.txt")?;
//! let processed = process_report(&text, &MetricsConfig::default())?;
//! for line in &processed.lines {
//!     println!("{}", line);
//! }
//! ```

use serde::Serialize;

// Core modules
pub mod entity;
pub mod extraction;
pub mod converters;
pub mod metrics;
pub mod report;
pub mod render;
pub mod serialization;
pub mod config;

// Re-export key types
pub use entity::Entity;
pub use extraction::{ExtractionError, Extractor, FieldPattern, ReportText, Section};
pub use metrics::{
    declination_percentage, differential, distance_percentage, lag_minutes, moon_age_breakdown,
    DerivedMetrics, MoonAge,
};
pub use report::ObservationReport;
pub use render::{render_lines, ReportLine, LABELS};
pub use serialization::{write_report, OutputFormat, SerializationError};
pub use config::{ConfigError, MetricsConfig};

/// Bundled sample report, used by `sme-report --sample`
pub const SAMPLE_REPORT: &str = include_str!("../tests/fixtures/sun_moon_earth.txt");

/// Everything produced from one report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedReport {
    pub observation: ObservationReport,
    pub metrics: DerivedMetrics,
    pub lines: Vec<ReportLine>,
}

/// Parse `text`, derive metrics and render the output lines.
pub fn process_report(text: &str, config: &MetricsConfig) -> Result<ProcessedReport, ExtractionError> {
    let observation = ObservationReport::parse(text)?;
    let metrics = DerivedMetrics::compute(&observation, config);
    let lines = render_lines(&observation, &metrics);

    Ok(ProcessedReport {
        observation,
        metrics,
        lines,
    })
}
