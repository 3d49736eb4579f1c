//! Section-aware field extraction for Sun, Moon & Earth reports.
//!
//! Fields are located by regular expression. Some labels (`Alt.`, `Az.`,
//! `Declin.`) appear once per body, so a field can be scoped to the text that
//! follows a section header such as `SUN:` or `MOON:`.

use regex::Regex;
use std::fmt;

/// Part of the report a field is searched in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The entire report text
    Document,
    /// Text following the `SUN:` header
    Sun,
    /// Text following the `MOON:` header
    Moon,
}

impl Section {
    /// Header marker that opens this section, if any
    pub fn header(&self) -> Option<&'static str> {
        match self {
            Section::Document => None,
            Section::Sun => Some("SUN:"),
            Section::Moon => Some("MOON:"),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.header() {
            Some(header) => write!(f, "{} section", header),
            None => write!(f, "report"),
        }
    }
}

/// Error type for extraction and conversion of report fields
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// Label pattern not found in the section it is required in
    MissingField {
        field: String,
        section: Section,
    },
    /// Field was found but its text could not be converted
    Format {
        field: String,
        value: String,
        expected: &'static str,
    },
}

impl ExtractionError {
    /// Name of the field that failed
    pub fn field(&self) -> &str {
        match self {
            ExtractionError::MissingField { field, .. } => field,
            ExtractionError::Format { field, .. } => field,
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::MissingField { field, section } => {
                write!(f, "Required field '{}' not found in {}", field, section)
            }
            ExtractionError::Format { field, value, expected } => {
                write!(
                    f,
                    "Field '{}' has malformed value '{}': expected {}",
                    field, value, expected
                )
            }
        }
    }
}

impl std::error::Error for ExtractionError {}

/// A labeled field and the pattern that locates it
///
/// The first capture group of `pattern` is the raw value.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    /// Human-readable field name, used in errors
    pub name: &'static str,
    /// Section the search is restricted to
    pub section: Section,
    /// Compiled pattern with one capture group
    pub pattern: Regex,
}

impl FieldPattern {
    /// Build a field pattern from a regex source string
    ///
    /// Returns `regex::Error` if `pattern` does not compile.
    pub fn new(name: &'static str, section: Section, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            section,
            pattern: Regex::new(pattern)?,
        })
    }

    fn missing(&self) -> ExtractionError {
        ExtractionError::MissingField {
            field: self.name.to_string(),
            section: self.section,
        }
    }
}

/// Trait for sources that can locate raw field text
pub trait Extractor {
    /// Return the first match for `field`, or `None` when the label or its
    /// section header is absent
    fn extract(&self, field: &FieldPattern) -> Option<&str>;

    /// Like [`Extractor::extract`] but absence is an error
    fn require(&self, field: &FieldPattern) -> Result<&str, ExtractionError> {
        self.extract(field).ok_or_else(|| field.missing())
    }

    /// Extract a field and convert it with `convert`
    fn extract_with<T, F>(&self, field: &FieldPattern, convert: F) -> Result<T, ExtractionError>
    where
        F: FnOnce(&str, &str) -> Result<T, ExtractionError>,
    {
        let raw = self.require(field)?;
        convert(field.name, raw)
    }
}

/// Borrowed report text
#[derive(Debug, Clone, Copy)]
pub struct ReportText<'a> {
    text: &'a str,
}

impl<'a> ReportText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Slice of the report a section covers
    ///
    /// Returns `None` if the section header is not present. The slice starts
    /// right after the first occurrence of the header and runs to the end of
    /// the report.
    pub fn section(&self, section: Section) -> Option<&'a str> {
        match section.header() {
            None => Some(self.text),
            Some(header) => {
                let start = self.text.find(header)? + header.len();
                tracing::trace!(header, offset = start, "section located");
                Some(&self.text[start..])
            }
        }
    }
}

impl<'a> Extractor for ReportText<'a> {
    fn extract(&self, field: &FieldPattern) -> Option<&str> {
        let haystack = self.section(field.section)?;
        let value = field
            .pattern
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());

        match value {
            Some(v) => tracing::debug!(field = field.name, value = v, "field extracted"),
            None => tracing::debug!(field = field.name, section = %field.section, "field not found"),
        }

        value
    }
}
