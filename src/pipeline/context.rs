use crate::error::ProcessingError;
use crate::pipeline::config::TimestampSource;
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::time::Duration;

/// A single line read from the input, terminator included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub line_number: usize,
    pub raw: String,
}

impl LogLine {
    pub fn new(line_number: usize, raw: String) -> Self {
        LogLine { line_number, raw }
    }

    /// Line content without the trailing `\n` or `\r\n`
    pub fn content(&self) -> &str {
        let s = self.raw.strip_suffix('\n').unwrap_or(&self.raw);
        s.strip_suffix('\r').unwrap_or(s)
    }

    pub fn is_terminated(&self) -> bool {
        self.raw.ends_with('\n')
    }
}

/// Positional fields of a log line: `date time label message...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFields<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub label: &'a str,
    pub message: String,
}

impl<'a> ParsedFields<'a> {
    /// Split on whitespace. Fewer than three tokens is a malformed line.
    pub fn parse(line: &'a str, line_number: usize) -> Result<Self, ProcessingError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [date, time, label, message @ ..] => Ok(ParsedFields {
                date: *date,
                time: *time,
                label: *label,
                message: message.join(" "),
            }),
            _ => Err(ProcessingError::MalformedLine {
                line_number,
                tokens: tokens.len(),
            }),
        }
    }
}

/// Entry of the JSON sink. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub date: String,
    pub time: String,
    pub keyword: String,
    pub message: String,
}

impl LogRecord {
    pub fn from_fields<Tz>(
        fields: &ParsedFields<'_>,
        source: TimestampSource,
        now: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let (date, time) = match source {
            TimestampSource::ProcessingTime => (
                now.format("%Y-%m-%d").to_string(),
                now.format("%H:%M:%S").to_string(),
            ),
            TimestampSource::Line => (fields.date.to_string(), fields.time.to_string()),
        };

        LogRecord {
            date,
            time,
            keyword: fields.label.to_string(),
            message: fields.message.clone(),
        }
    }
}

/// Runtime statistics
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub lines_read: usize,
    pub lines_matched: usize,
    pub lines_skipped: usize,
    pub malformed: usize,
    pub processing_time: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_content_strips_terminator() {
        let line = LogLine::new(1, "a b c\r\n".to_string());
        assert_eq!(line.content(), "a b c");
        assert!(line.is_terminated());

        let last = LogLine::new(2, "a b c".to_string());
        assert_eq!(last.content(), "a b c");
        assert!(!last.is_terminated());
    }

    #[test]
    fn test_parse_fields() {
        let fields = ParsedFields::parse("2024-01-01 10:00:00 INFO  Service   started", 1).unwrap();
        assert_eq!(fields.date, "2024-01-01");
        assert_eq!(fields.time, "10:00:00");
        assert_eq!(fields.label, "INFO");
        assert_eq!(fields.message, "Service started");
    }

    #[test]
    fn test_parse_three_tokens_has_empty_message() {
        let fields = ParsedFields::parse("2024-01-01 10:00:00 INFO", 1).unwrap();
        assert_eq!(fields.message, "");
    }

    #[test]
    fn test_parse_malformed() {
        let err = ParsedFields::parse("onlytwo tokens", 7).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::MalformedLine {
                line_number: 7,
                tokens: 2
            }
        ));
    }

    #[test]
    fn test_record_uses_processing_time_by_default() {
        let now = NaiveDate::from_ymd_opt(2030, 5, 6)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap()
            .and_utc();
        let fields = ParsedFields::parse("2024-01-01 10:00:00 INFO Service started", 1).unwrap();
        let record = LogRecord::from_fields(&fields, TimestampSource::ProcessingTime, &now);

        assert_eq!(record.date, "2030-05-06");
        assert_eq!(record.time, "07:08:09");
        assert_eq!(record.keyword, "INFO");
        assert_eq!(record.message, "Service started");
    }

    #[test]
    fn test_record_from_line_timestamp() {
        let fields = ParsedFields::parse("2024-01-01 10:00:00 INFO Service started", 1).unwrap();
        let record = LogRecord::from_fields(&fields, TimestampSource::Line, &Utc::now());
        assert_eq!(record.date, "2024-01-01");
        assert_eq!(record.time, "10:00:00");
    }

    #[test]
    fn test_record_key_order() {
        let record = LogRecord {
            date: "d".into(),
            time: "t".into(),
            keyword: "k".into(),
            message: "m".into(),
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"date":"d","time":"t","keyword":"k","message":"m"}"#
        );
    }
}
