//! Parsing of the toolkit's textual certificate summary
//!
//! `openssl x509 -subject -dates -noout` prints one `key=value` pair per
//! line. Dates use the `Aug 30 23:59:59 2016 GMT` layout.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::collections::HashMap;

/// Field holding the end of the validity window
pub const NOT_AFTER: &str = "notAfter";
/// Field holding the start of the validity window
pub const NOT_BEFORE: &str = "notBefore";
/// Field holding the certificate subject
pub const SUBJECT: &str = "subject";

/// Shown in messages when the summary carries no subject
pub const UNKNOWN_SUBJECT: &str = "<unknown subject>";

const DATE_FORMAT: &str = "%b %d %H:%M:%S %Y";

/// Split `key=value` lines into a map.
///
/// Blank lines are skipped, each line is split on its first `=` and later
/// duplicates overwrite earlier ones. Lines without `=` carry no field and
/// are ignored.
pub fn parse_fields(text: &str) -> HashMap<String, String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Parse a toolkit date such as `Aug 30 23:59:59 2016 GMT`.
///
/// Returns `None` for anything that does not match the layout. The
/// timezone token must be alphabetic; the toolkit always prints GMT so the
/// instant is taken as UTC.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    // The toolkit pads single-digit days with a second space
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [month, day, time, year, zone] = parts.as_slice() else {
        return None;
    };

    if year.len() != 4 || zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let normalized = format!("{} {} {} {}", month, day, time, year);
    NaiveDateTime::parse_from_str(&normalized, DATE_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Fields of one certificate summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateInfo {
    fields: HashMap<String, String>,
}

impl CertificateInfo {
    pub fn parse(text: &str) -> Self {
        Self {
            fields: parse_fields(text),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn not_after(&self) -> Option<&str> {
        self.get(NOT_AFTER)
    }

    pub fn not_before(&self) -> Option<&str> {
        self.get(NOT_BEFORE)
    }

    pub fn subject(&self) -> Option<&str> {
        self.get(SUBJECT)
    }

    /// Subject, or a placeholder when the field is missing
    pub fn subject_or_placeholder(&self) -> &str {
        self.subject().unwrap_or(UNKNOWN_SUBJECT)
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_fields_recovers_joined_pairs() {
        let expected: HashMap<String, String> = [
            ("subject", "C = RU, CN = hh.ru"),
            ("notBefore", "Aug 30 00:00:00 2015 GMT"),
            ("notAfter", "Aug 30 23:59:59 2016 GMT"),
            ("serial", "0A1B=2C"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let text = expected
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(parse_fields(&text), expected);
    }

    #[test]
    fn test_parse_fields_skips_blank_lines_and_keeps_last_duplicate() {
        let fields = parse_fields("\nnotAfter=first\n   \nnotAfter=second\n\n");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["notAfter"], "second");
    }

    #[test]
    fn test_parse_fields_splits_on_first_equals_only() {
        let fields = parse_fields("subject=CN = example.com, O = Example\r\n");
        assert_eq!(fields["subject"], "CN = example.com, O = Example");
    }

    #[test]
    fn test_parse_date_openssl_format() {
        let date = parse_date("Aug 30 23:59:59 2016 GMT").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2016, 8, 30));
        assert_eq!((date.hour(), date.minute(), date.second()), (23, 59, 59));
    }

    #[test]
    fn test_parse_date_space_padded_day() {
        let date = parse_date("Mar  3 08:05:01 2031 GMT").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2031, 3, 3));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("Aug 30 23:59:59 2016").is_none());
        assert!(parse_date("Foo 30 23:59:59 2016 GMT").is_none());
        assert!(parse_date("Aug 30 23:59:59 16 GMT").is_none());
    }

    #[test]
    fn test_subject_placeholder() {
        let info = CertificateInfo::parse("notAfter=Aug 30 23:59:59 2016 GMT\n");
        assert_eq!(info.subject_or_placeholder(), UNKNOWN_SUBJECT);
        assert_eq!(info.not_after(), Some("Aug 30 23:59:59 2016 GMT"));
        assert_eq!(info.not_before(), None);
    }
}
