// src/data_input/calibration_log.rs

//! Reader for the vehicle turn calibration log.
//!
//! Each measurement line has the form
//!
//! ```text
//! line      := direction WS "time:" WS digits WS "pixel:" WS ["-"] digits [anything]
//! direction := "left" | "right"
//! WS        := one or more whitespace characters
//! ```
//!
//! The pixel sign only records which way the camera image moved and is
//! discarded; the magnitude is what gets fitted.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::MeasurementSeries;

/// Direction the vehicle was commanded to turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Plot order: left chart first, right chart second.
    pub const ALL: [TurnDirection; 2] = [TurnDirection::Left, TurnDirection::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed calibration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnMeasurement {
    pub direction: TurnDirection,
    pub time_ms: u64,
    pub pixels: u64,
}

/// What to do with a line that is not blank and does not follow the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedLinePolicy {
    /// Abort with the file name, line number and text.
    #[default]
    Reject,
    /// Log a warning and keep going.
    Skip,
}

/// Why a single line failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected 'left' or 'right' at start of line")]
    UnknownDirection,
    #[error("expected whitespace after {0}")]
    MissingWhitespace(&'static str),
    #[error("expected '{0}'")]
    MissingKeyword(&'static str),
    #[error("expected digits for {0}")]
    MissingDigits(&'static str),
    #[error("{0} value does not fit in 64 bits")]
    OutOfRange(&'static str),
}

/// Minimal forward-only scanner over one line.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn keyword(&mut self, keyword: &'static str) -> Result<(), LineError> {
        match self.rest.strip_prefix(keyword) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(LineError::MissingKeyword(keyword)),
        }
    }

    /// Consumes at least one whitespace character.
    fn whitespace(&mut self, after: &'static str) -> Result<(), LineError> {
        let trimmed = self.rest.trim_start();
        if trimmed.len() == self.rest.len() {
            return Err(LineError::MissingWhitespace(after));
        }
        self.rest = trimmed;
        Ok(())
    }

    fn optional(&mut self, c: char) {
        if let Some(rest) = self.rest.strip_prefix(c) {
            self.rest = rest;
        }
    }

    fn number(&mut self, field: &'static str) -> Result<u64, LineError> {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(LineError::MissingDigits(field));
        }
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        digits.parse().map_err(|_| LineError::OutOfRange(field))
    }
}

/// Parses a single calibration log line into a typed record.
///
/// Text after the pixel digits is ignored.
pub fn parse_calibration_line(text: &str) -> Result<TurnMeasurement, LineError> {
    let mut cursor = Cursor::new(text);

    let direction = if cursor.keyword("left").is_ok() {
        TurnDirection::Left
    } else if cursor.keyword("right").is_ok() {
        TurnDirection::Right
    } else {
        return Err(LineError::UnknownDirection);
    };

    cursor.whitespace("direction")?;
    cursor.keyword("time:")?;
    cursor.whitespace("'time:'")?;
    let time_ms = cursor.number("time")?;
    cursor.whitespace("time value")?;
    cursor.keyword("pixel:")?;
    cursor.whitespace("'pixel:'")?;
    cursor.optional('-');
    let pixels = cursor.number("pixel")?;

    Ok(TurnMeasurement {
        direction,
        time_ms,
        pixels,
    })
}

/// Reads every measurement in the log, in file order.
pub fn read_calibration_log(
    input_file_path: &Path,
    policy: MalformedLinePolicy,
) -> AnalysisResult<Vec<TurnMeasurement>> {
    let mut measurements = Vec::new();
    let mut skipped = 0usize;

    {
        let file =
            File::open(input_file_path).map_err(|e| AnalysisError::io(input_file_path, e))?;
        let reader = BufReader::new(file);

        for (line_index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| AnalysisError::io(input_file_path, e))?;
            if line.trim().is_empty() {
                continue;
            }

            match parse_calibration_line(&line) {
                Ok(measurement) => measurements.push(measurement),
                Err(reason) => match policy {
                    MalformedLinePolicy::Reject => {
                        return Err(AnalysisError::MalformedLine {
                            path: input_file_path.to_path_buf(),
                            line: line_index + 1,
                            text: line,
                            reason: reason.to_string(),
                        });
                    }
                    MalformedLinePolicy::Skip => {
                        warn!(
                            "{}:{}: skipping line ({}): '{}'",
                            input_file_path.display(),
                            line_index + 1,
                            reason,
                            line
                        );
                        skipped += 1;
                    }
                },
            }
        }
    } // File reader is dropped here

    debug!(
        "Read {} measurement(s) from '{}' ({} skipped)",
        measurements.len(),
        input_file_path.display(),
        skipped
    );
    Ok(measurements)
}

/// Extracts the (time, pixel) pairs for one direction, sorted by time.
///
/// The sort is stable: equal times keep their file order.
pub fn series_for(measurements: &[TurnMeasurement], direction: TurnDirection) -> MeasurementSeries {
    let mut series: MeasurementSeries = measurements
        .iter()
        .filter(|m| m.direction == direction)
        .map(|m| (m.time_ms, m.pixels))
        .collect();
    series.sort_by_key(|&(time_ms, _)| time_ms);
    series
}

/// Reads the log and returns the sorted series for `direction`.
pub fn parse_calibration_file(
    input_file_path: &Path,
    direction: TurnDirection,
    policy: MalformedLinePolicy,
) -> AnalysisResult<MeasurementSeries> {
    let measurements = read_calibration_log(input_file_path, policy)?;
    Ok(series_for(&measurements, direction))
}
