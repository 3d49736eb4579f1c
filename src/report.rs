//! Parsed contents of a Sun, Moon & Earth report.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::converters;
use crate::entity::Entity;
use crate::extraction::{ExtractionError, Extractor, FieldPattern, ReportText, Section};

/// Patterns for every field read from a report
pub struct ReportFields {
    pub latitude: FieldPattern,
    pub longitude: FieldPattern,
    pub date_time: FieldPattern,
    pub time_zone: FieldPattern,
    pub sun_altitude: FieldPattern,
    pub sun_azimuth: FieldPattern,
    pub sunset: FieldPattern,
    pub moon_age: FieldPattern,
    pub illumination: FieldPattern,
    pub moon_distance: FieldPattern,
    pub moon_declination: FieldPattern,
    pub moon_altitude: FieldPattern,
    pub moon_azimuth: FieldPattern,
    pub moonset: FieldPattern,
    pub geocentric_elongation: FieldPattern,
}

impl ReportFields {
    fn compile() -> Result<Self, regex::Error> {
        use Section::{Document, Moon, Sun};

        Ok(Self {
            latitude: FieldPattern::new("Latitude", Document, r"Latitude:\s*([\d.]+)° N")?,
            longitude: FieldPattern::new("Longitude", Document, r"Longitude:\s*([\d.]+)° E")?,
            date_time: FieldPattern::new(
                "Date/Time",
                Document,
                r"Date/Time:\s*([A-Za-z]+\s[A-Za-z]+\s\d+\s\d+:\d+:\d+\sGMT[+-]\d+:\d+\s\d+)",
            )?,
            time_zone: FieldPattern::new("Time Zone", Document, r"Time Zone:\s*(UT\s*[+-]\s*\d+:\d+\s*h)")?,
            sun_altitude: FieldPattern::new("Sun's Altitude", Sun, r"Alt\.\s*=\s*([-\d.]+)°")?,
            sun_azimuth: FieldPattern::new("Sun's Azimuth", Sun, r"Az\.\s*=\s*([\d.]+)°")?,
            sunset: FieldPattern::new("Sunset", Sun, r"Sunset\s*([\d:]+)")?,
            moon_age: FieldPattern::new("Moon Age", Moon, r"Moon Age\s*([\d.]+)\s*d")?,
            illumination: FieldPattern::new("Illumination Fraction", Moon, r"Illum\. Frac\.\s*=\s*([\d.]+)")?,
            moon_distance: FieldPattern::new(
                "Distance of Moon from Earth",
                Moon,
                r"Distance from Earth\s*=\s*([\d,]+) km",
            )?,
            moon_declination: FieldPattern::new("Moon's Declination", Moon, r"Declin\.\s*=\s*([\d.]+)° S")?,
            moon_altitude: FieldPattern::new("Moon's Altitude", Moon, r"Alt\.\s*=\s*([-\d.]+)°")?,
            moon_azimuth: FieldPattern::new("Moon's Azimuth", Moon, r"Az\.\s*=\s*([\d.]+)°")?,
            moonset: FieldPattern::new("Moon's Set Time", Moon, r"Set\s*([\d:]+)")?,
            geocentric_elongation: FieldPattern::new(
                "Geocentric Elongation",
                Moon,
                r"Geocentric Elong\.\s*=\s*([\d.]+)°",
            )?,
        })
    }
}

/// Compiled once; the patterns are literals, so failure is a programming error.
pub static FIELDS: Lazy<ReportFields> =
    Lazy::new(|| ReportFields::compile().expect("report field patterns are valid"));

/// Typed values read from one report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationReport {
    pub latitude: f64,
    pub longitude: f64,
    pub date_time: DateTime<FixedOffset>,
    /// Kept verbatim, e.g. `UT + 2:00 h`
    pub time_zone: String,
    pub sun_altitude: f64,
    pub sun_azimuth: f64,
    /// Sunset on the report date
    pub sunset: NaiveDateTime,
    pub moon_age_days: f64,
    /// Percent of the disk illuminated
    pub illumination_fraction: f64,
    pub moon_distance_km: i64,
    pub moon_declination: f64,
    pub moon_altitude: f64,
    pub moon_azimuth: f64,
    /// Moonset on the report date
    pub moonset: NaiveDateTime,
    /// Kept verbatim, in degrees
    pub geocentric_elongation: String,
}

impl Entity for ObservationReport {}

impl ObservationReport {
    /// Parse a report, failing on the first missing or malformed field.
    pub fn parse(text: &str) -> Result<Self, ExtractionError> {
        let report = ReportText::new(text);
        let fields = &*FIELDS;

        let date_time = report.extract_with(&fields.date_time, converters::timestamp)?;
        let date = date_time.date_naive();

        let parsed = Self {
            latitude: report.extract_with(&fields.latitude, converters::decimal)?,
            longitude: report.extract_with(&fields.longitude, converters::decimal)?,
            date_time,
            time_zone: report.extract_with(&fields.time_zone, converters::text)?,
            sun_altitude: report.extract_with(&fields.sun_altitude, converters::decimal)?,
            sun_azimuth: report.extract_with(&fields.sun_azimuth, converters::decimal)?,
            sunset: report.extract_with(&fields.sunset, |name, raw| {
                converters::clock_on(name, raw, date)
            })?,
            moon_age_days: report.extract_with(&fields.moon_age, converters::decimal)?,
            illumination_fraction: report
                .extract_with(&fields.illumination, converters::decimal)?,
            moon_distance_km: report.extract_with(&fields.moon_distance, converters::integer)?,
            moon_declination: report
                .extract_with(&fields.moon_declination, converters::decimal)?,
            moon_altitude: report.extract_with(&fields.moon_altitude, converters::decimal)?,
            moon_azimuth: report.extract_with(&fields.moon_azimuth, converters::decimal)?,
            moonset: report.extract_with(&fields.moonset, |name, raw| {
                converters::clock_on(name, raw, date)
            })?,
            geocentric_elongation: report
                .extract_with(&fields.geocentric_elongation, converters::text)?,
        };

        tracing::debug!(date = %parsed.date_time, "report parsed");
        Ok(parsed)
    }
}
