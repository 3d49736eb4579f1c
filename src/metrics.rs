//! Derived quantities computed from parsed report values.
//!
//! All functions here are pure; none of them touch the report text.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::MetricsConfig;
use crate::entity::Entity;
use crate::report::ObservationReport;

/// Mean lunar perigee distance in km
pub const PERIGEE_KM: f64 = 363_300.0;

/// Mean lunar apogee distance in km
pub const APOGEE_KM: f64 = 405_500.0;

/// Half-width of the lunar declination range in degrees
pub const DECLINATION_SPAN_DEG: f64 = 28.6;

/// Moon age split into whole days, hours and minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonAge {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl fmt::Display for MoonAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes",
            self.days, self.hours, self.minutes
        )
    }
}

/// Split a fractional age in days into components.
///
/// Each component is truncated, not rounded: `0.7966` is 0 d 19 h 7 m.
pub fn moon_age_breakdown(days: f64) -> MoonAge {
    MoonAge {
        days: days.floor() as i64,
        hours: (days * 24.0).rem_euclid(24.0).floor() as i64,
        minutes: (days * 24.0 * 60.0).rem_euclid(60.0).floor() as i64,
    }
}

/// Distance as a percentage of the perigee..apogee range, 100 at perigee.
pub fn distance_percentage(km: f64) -> f64 {
    distance_percentage_in(km, PERIGEE_KM, APOGEE_KM)
}

/// [`distance_percentage`] with an explicit reference range. Not clamped.
pub fn distance_percentage_in(km: f64, perigee: f64, apogee: f64) -> f64 {
    100.0 - (km - perigee) / (apogee - perigee) * 100.0
}

/// Declination as a percentage of the `±28.6°` span, 0 at the southern limit.
pub fn declination_percentage(deg: f64) -> f64 {
    declination_percentage_in(deg, DECLINATION_SPAN_DEG)
}

/// [`declination_percentage`] with an explicit half-span.
pub fn declination_percentage_in(deg: f64, span: f64) -> f64 {
    100.0 * (deg + span) / (span * 2.0)
}

/// `a - b`. Order matters: callers pass the Sun value first.
pub fn differential(a: f64, b: f64) -> f64 {
    a - b
}

/// Signed minutes from `t2` to `t1`; negative when `t1` is earlier.
pub fn lag_minutes(t1: NaiveDateTime, t2: NaiveDateTime) -> f64 {
    (t1 - t2).num_seconds() as f64 / 60.0
}

/// Every quantity derived from an [`ObservationReport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub moon_age: MoonAge,
    pub moon_distance_percentage: f64,
    pub moon_declination_percentage: f64,
    /// Sun azimuth minus Moon azimuth
    pub differential_azimuth: f64,
    /// Sun altitude minus Moon altitude
    pub differential_altitude: f64,
    /// Moonset minus sunset
    pub lag_minutes: f64,
}

impl Entity for DerivedMetrics {}

impl DerivedMetrics {
    pub fn compute(report: &ObservationReport, config: &MetricsConfig) -> Self {
        let metrics = Self {
            moon_age: moon_age_breakdown(report.moon_age_days),
            moon_distance_percentage: distance_percentage_in(
                report.moon_distance_km as f64,
                config.perigee_km,
                config.apogee_km,
            ),
            moon_declination_percentage: declination_percentage_in(
                report.moon_declination,
                config.declination_span_deg,
            ),
            differential_azimuth: differential(report.sun_azimuth, report.moon_azimuth),
            differential_altitude: differential(report.sun_altitude, report.moon_altitude),
            lag_minutes: lag_minutes(report.moonset, report.sunset),
        };

        tracing::debug!(
            lag_minutes = metrics.lag_minutes,
            differential_azimuth = metrics.differential_azimuth,
            differential_altitude = metrics.differential_altitude,
            "metrics derived"
        );

        metrics
    }
}
