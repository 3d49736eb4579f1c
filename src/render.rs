//! Fixed, ordered "Label: value" lines for a parsed report.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::metrics::DerivedMetrics;
use crate::report::ObservationReport;

/// Output order of the rendered lines
pub const LABELS: [&str; 17] = [
    "Latitude",
    "Longitude",
    "Date/Time",
    "Time Zone",
    "Sun's Altitude",
    "Sun's Azimuth",
    "Moon Age",
    "Illumination Fraction",
    "Distance of Moon from Earth",
    "Moon's Declination",
    "Moon's Altitude",
    "Moon's Azimuth",
    "Moon's Set Time",
    "Geocentric Elongation",
    "Differential Azimuth (Sun - Moon)",
    "Differential Altitude (Sun - Moon)",
    "Lag Time (Moonset - Sunset)",
];

/// One labeled output line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

fn degrees(value: f64) -> String {
    format!("{:.3} (deg)", value)
}

/// Render every field and metric, in [`LABELS`] order.
pub fn render_lines(report: &ObservationReport, metrics: &DerivedMetrics) -> Vec<ReportLine> {
    let values = [
        degrees(report.latitude),
        degrees(report.longitude),
        report.date_time.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
        report.time_zone.clone(),
        degrees(report.sun_altitude),
        degrees(report.sun_azimuth),
        metrics.moon_age.to_string(),
        format!("{:?}%", report.illumination_fraction),
        format!(
            "{} km ({:.3}%)",
            report.moon_distance_km, metrics.moon_distance_percentage
        ),
        format!(
            "{:?} (deg) ({:.3}%)",
            report.moon_declination, metrics.moon_declination_percentage
        ),
        degrees(report.moon_altitude),
        degrees(report.moon_azimuth),
        report.moonset.format("%Y-%m-%d %H:%M:%S").to_string(),
        format!("{} (deg)", report.geocentric_elongation),
        degrees(metrics.differential_azimuth),
        degrees(metrics.differential_altitude),
        format!("{:.0} minutes", metrics.lag_minutes),
    ];

    LABELS
        .iter()
        .zip(values)
        .map(|(label, value)| ReportLine {
            label: label.to_string(),
            value,
        })
        .collect()
}
