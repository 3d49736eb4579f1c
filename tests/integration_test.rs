//! Integration tests for report extraction, metrics and rendering

use sme_report::{
    declination_percentage, differential, distance_percentage, lag_minutes, moon_age_breakdown,
    process_report, write_report, ExtractionError, MetricsConfig, MoonAge, OutputFormat, Section,
    SerializationError, LABELS, SAMPLE_REPORT,
};

use chrono::NaiveDate;

fn without_line(text: &str, needle: &str) -> String {
    text.lines()
        .filter(|line| !line.contains(needle))
        .map(|line| format!("{}\n", line))
        .collect()
}

#[test]
fn test_sample_report_renders_all_lines_in_order() {
    let processed = process_report(SAMPLE_REPORT, &MetricsConfig::default()).unwrap();

    assert_eq!(processed.lines.len(), LABELS.len());
    for (line, label) in processed.lines.iter().zip(LABELS) {
        assert_eq!(line.label, label);
    }
}

#[test]
fn test_sample_report_text_output() {
    let mut buf = Vec::new();
    write_report(SAMPLE_REPORT, &MetricsConfig::default(), OutputFormat::Text, &mut buf).unwrap();

    let expected = "\
Latitude: 31.767 (deg)
Longitude: 36.200 (deg)
Date/Time: 2026-01-19 16:58:00-06:00
Time Zone: UT + 2:00 h
Sun's Altitude: -1.060 (deg)
Sun's Azimuth: 246.400 (deg)
Moon Age: 0 days, 19 hours, 7 minutes
Illumination Fraction: 0.6%
Distance of Moon from Earth: 392633 km (30.491%)
Moon's Declination: 20.6244 (deg) (86.057%)
Moon's Altitude: 5.800 (deg)
Moon's Azimuth: 240.700 (deg)
Moon's Set Time: 2026-01-19 17:34:00
Geocentric Elongation: 9.56 (deg)
Differential Azimuth (Sun - Moon): 5.700 (deg)
Differential Altitude (Sun - Moon): -6.860 (deg)
Lag Time (Moonset - Sunset): 36 minutes
";

    assert_eq!(String::from_utf8(buf).unwrap(), expected);
}

#[test]
fn test_metric_functions() {
    assert_eq!(moon_age_breakdown(0.7966), MoonAge { days: 0, hours: 19, minutes: 7 });
    assert_eq!(distance_percentage(363300.0), 100.0);
    assert_eq!(distance_percentage(405500.0), 0.0);
    assert!((declination_percentage(20.6244) - 86.0566).abs() < 1e-3);
    assert!((differential(246.4, 240.7) - 5.7).abs() < 1e-9);
    assert!((differential(-1.06, 5.8) + 6.86).abs() < 1e-9);

    let date = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
    let moonset = date.and_hms_opt(17, 34, 0).unwrap();
    let sunset = date.and_hms_opt(16, 58, 0).unwrap();
    assert_eq!(lag_minutes(moonset, sunset), 36.0);
}

#[test]
fn test_missing_illumination_aborts_without_output() {
    let text = without_line(SAMPLE_REPORT, "Illum. Frac.");
    let mut buf = Vec::new();

    let err = write_report(&text, &MetricsConfig::default(), OutputFormat::Text, &mut buf)
        .unwrap_err();

    match err {
        SerializationError::ExtractionError(ExtractionError::MissingField { field, section }) => {
            assert_eq!(field, "Illumination Fraction");
            assert_eq!(section, Section::Moon);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(buf.is_empty());
}

#[test]
fn test_malformed_timestamp_is_format_error() {
    let text = SAMPLE_REPORT.replace("Mon Jan 19 16:58:00 GMT-06:00 2026", "Mon Jan 39 16:58:00 GMT-06:00 2026");

    let err = process_report(&text, &MetricsConfig::default()).unwrap_err();

    assert!(matches!(err, ExtractionError::Format { .. }));
    assert_eq!(err.field(), "Date/Time");
}

#[test]
fn test_negative_lag_when_moon_sets_first() {
    let text = SAMPLE_REPORT.replace("Set      17:34", "Set      16:30");

    let processed = process_report(&text, &MetricsConfig::default()).unwrap();

    assert_eq!(processed.metrics.lag_minutes, -28.0);
    assert_eq!(
        processed.lines.last().unwrap().to_string(),
        "Lag Time (Moonset - Sunset): -28 minutes"
    );
}

#[test]
fn test_custom_reference_range() {
    let config = MetricsConfig {
        perigee_km: 356500.0,
        apogee_km: 406700.0,
        declination_span_deg: 28.6,
    };

    let processed = process_report(SAMPLE_REPORT, &config).unwrap();
    let expected = 100.0 - (392633.0 - 356500.0) / (406700.0 - 356500.0) * 100.0;

    assert!((processed.metrics.moon_distance_percentage - expected).abs() < 1e-12);
}

#[test]
fn test_out_of_range_distance_is_not_clamped() {
    let text = SAMPLE_REPORT.replace("392633 km", "410,000 km");

    let processed = process_report(&text, &MetricsConfig::default()).unwrap();

    assert!(processed.metrics.moon_distance_percentage < 0.0);
    assert!(processed.lines[8].value.starts_with("410000 km (-"));
}
