use chrono::{DateTime, NaiveDate, Utc};
use core_types::PerformancePoint;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::str::FromStr;

/// Result of parsing an uploaded series file.
///
/// `errors` and `warnings` are human-readable messages prefixed with the 1-based input
/// line they refer to. The caller decides whether a partially valid file is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedSeries {
    pub points: Vec<PerformancePoint>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ParsedSeries {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses `date,value` CSV text into series points.
///
/// - Blank lines are ignored.
/// - The first non-blank line is skipped as a header when it mentions both "date" and
///   "value" (case-insensitive).
/// - Dates must be ISO `YYYY-MM-DD` (RFC 3339 timestamps are reduced to their UTC date).
/// - Values must be numbers greater than zero.
/// - A date seen earlier in the same file is rejected; the first occurrence is kept.
pub fn parse_series_csv(text: &str) -> ParsedSeries {
    if text.trim().is_empty() {
        return ParsedSeries {
            errors: vec!["CSV input is empty".to_string()],
            ..ParsedSeries::default()
        };
    }

    let state = text
        .lines()
        .enumerate()
        .fold(ParseState::default(), |mut state, (index, line)| {
            state.accept(index + 1, line.trim());
            state
        });

    let mut parsed = state.finish();
    if parsed.points.is_empty() && parsed.errors.is_empty() {
        parsed.errors.push("No valid rows found in CSV".to_string());
    }

    tracing::debug!(
        points = parsed.points.len(),
        errors = parsed.errors.len(),
        "Parsed series CSV."
    );

    parsed
}

/// Accumulator threaded through the rows of one parse.
#[derive(Default)]
struct ParseState {
    points: Vec<PerformancePoint>,
    errors: Vec<String>,
    warnings: Vec<String>,
    seen_dates: HashSet<NaiveDate>,
    saw_first_row: bool,
}

impl ParseState {
    fn accept(&mut self, line: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let record = match tokenize(text) {
            Ok(record) => record,
            Err(e) => {
                self.errors.push(format!("Line {line}: Could not read row ({e})"));
                return;
            }
        };

        let is_first_row = !self.saw_first_row;
        self.saw_first_row = true;
        if is_first_row && is_header(&record) {
            return;
        }

        let (date_cell, value_cell) = match split_cells(&record) {
            Some(cells) => cells,
            None => {
                self.errors.push(format!("Line {line}: Expected date,value"));
                return;
            }
        };

        let Some(date) = parse_date(date_cell) else {
            self.errors.push(format!(
                "Line {line}: Invalid date \"{date_cell}\". Use ISO format YYYY-MM-DD."
            ));
            return;
        };

        let value = match parse_value(value_cell) {
            Some(value) if value > Decimal::ZERO => value,
            _ => {
                self.errors.push(format!(
                    "Line {line}: Invalid value \"{value_cell}\". Expected a positive number."
                ));
                return;
            }
        };

        if !self.seen_dates.insert(date) {
            self.errors.push(format!(
                "Line {line}: Duplicate date {}",
                date.format("%Y-%m-%d")
            ));
            return;
        }

        self.points.push(PerformancePoint::new(date, value));
    }

    fn finish(self) -> ParsedSeries {
        ParsedSeries {
            points: self.points,
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

/// Splits one line into cells, honouring quotes and trimming whitespace around each cell.
fn tokenize(line: &str) -> Result<StringRecord, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

fn is_header(record: &StringRecord) -> bool {
    let joined = record.iter().collect::<Vec<_>>().join(",").to_lowercase();
    joined.contains("date") && joined.contains("value")
}

/// Exactly a date cell and a value cell; trailing empty cells (a dangling comma) are allowed.
fn split_cells(record: &StringRecord) -> Option<(&str, &str)> {
    let date = record.get(0).filter(|cell| !cell.is_empty())?;
    let value = record.get(1).filter(|cell| !cell.is_empty())?;
    if record.iter().skip(2).any(|cell| !cell.is_empty()) {
        return None;
    }
    Some((date, value))
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(cell)
                .ok()
                .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
        })
}

fn parse_value(cell: &str) -> Option<Decimal> {
    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_input_is_a_single_error() {
        for text in ["", "   ", "\n\n \r\n"] {
            let parsed = parse_series_csv(text);
            assert!(parsed.points.is_empty());
            assert_eq!(parsed.errors, vec!["CSV input is empty".to_string()]);
        }
    }

    #[test]
    fn header_is_detected_case_insensitively() {
        let parsed = parse_series_csv("Date , NAV Value\n2024-01-01,100\n2024-01-02,101.5\n");
        assert_eq!(
            parsed.points,
            vec![
                PerformancePoint::new(day(2024, 1, 1), dec!(100)),
                PerformancePoint::new(day(2024, 1, 2), dec!(101.5)),
            ]
        );
        assert!(parsed.is_clean());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn first_line_without_header_is_data() {
        let parsed = parse_series_csv("2024-01-01,100");
        assert_eq!(parsed.points.len(), 1);
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn duplicate_dates_keep_the_first_occurrence() {
        let parsed = parse_series_csv("date,value\n2024-01-01,100\n2024-01-02,110\n2024-01-01,90");
        assert_eq!(
            parsed.points,
            vec![
                PerformancePoint::new(day(2024, 1, 1), dec!(100)),
                PerformancePoint::new(day(2024, 1, 2), dec!(110)),
            ]
        );
        assert_eq!(parsed.errors, vec!["Line 4: Duplicate date 2024-01-01".to_string()]);
    }

    #[test]
    fn invalid_calendar_date_is_rejected() {
        let parsed = parse_series_csv("2024-13-40,100");
        assert!(parsed.points.is_empty());
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.errors[0].starts_with("Line 1: Invalid date \"2024-13-40\""));
        assert!(parsed.errors[0].contains("YYYY-MM-DD"));
    }

    #[test]
    fn bad_lines_do_not_discard_good_ones() {
        let text = "date,value\n\
                    2024-01-01,100\n\
                    2024-01-02\n\
                    2024-01-03,abc\n\
                    2024-01-04,0\n\
                    2024-01-05,-3\n\
                    2024-01-06,105\n";
        let parsed = parse_series_csv(text);

        assert_eq!(parsed.points.len(), 2);
        assert_eq!(
            parsed.errors,
            vec![
                "Line 3: Expected date,value".to_string(),
                "Line 4: Invalid value \"abc\". Expected a positive number.".to_string(),
                "Line 5: Invalid value \"0\". Expected a positive number.".to_string(),
                "Line 6: Invalid value \"-3\". Expected a positive number.".to_string(),
            ]
        );
    }

    #[test]
    fn line_numbers_count_blank_lines() {
        let parsed = parse_series_csv("date,value\n\n2024-01-01,100\n\nnot-a-date,5\n");
        assert_eq!(parsed.points.len(), 1);
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.errors[0].starts_with("Line 5:"));
    }

    #[test]
    fn extra_columns_are_rejected_but_trailing_comma_is_not() {
        let parsed = parse_series_csv("2024-01-01,100,\n2024-01-02,101,extra\n");
        assert_eq!(parsed.points.len(), 1);
        assert_eq!(parsed.errors, vec!["Line 2: Expected date,value".to_string()]);
    }

    #[test]
    fn quoted_cells_and_timestamps_are_normalized() {
        let parsed = parse_series_csv("\"2024-02-01\",\"250.75\"\n2024-02-02T23:30:00-02:00,1e3\n");
        assert_eq!(
            parsed.points,
            vec![
                PerformancePoint::new(day(2024, 2, 1), dec!(250.75)),
                PerformancePoint::new(day(2024, 2, 3), dec!(1000)),
            ]
        );
    }

    #[test]
    fn header_only_file_reports_no_rows() {
        let parsed = parse_series_csv("date,value\n");
        assert!(parsed.points.is_empty());
        assert_eq!(parsed.errors, vec!["No valid rows found in CSV".to_string()]);
    }

    #[test]
    fn crlf_line_endings_are_supported() {
        let parsed = parse_series_csv("date,value\r\n2024-01-01,100\r\n2024-01-02,102\r\n");
        assert_eq!(parsed.points.len(), 2);
        assert!(parsed.is_clean());
    }
}
