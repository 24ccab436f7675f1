// src/data_input/reward_log.rs

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use log::debug;

use crate::constants::{DEFAULT_STRIP_LEADING, DEFAULT_STRIP_TRAILING};
use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{RewardRun, RewardRuns};

/// How many characters of decoration to drop from each reward line.
///
/// Lines are stripped with their terminator still attached, so the default
/// `trailing = 2` removes the closing bracket and the newline. A final line
/// without a newline loses its last reward digit instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripWidth {
    pub leading: usize,
    pub trailing: usize,
}

impl Default for StripWidth {
    fn default() -> Self {
        Self {
            leading: DEFAULT_STRIP_LEADING,
            trailing: DEFAULT_STRIP_TRAILING,
        }
    }
}

impl StripWidth {
    /// Removes `leading` chars from the front and `trailing` chars from the back.
    /// Lines shorter than both together strip to an empty string.
    pub fn strip<'a>(&self, line: &'a str) -> &'a str {
        let char_count = line.chars().count();
        if self.leading + self.trailing >= char_count {
            return "";
        }
        let start = line
            .char_indices()
            .nth(self.leading)
            .map_or(line.len(), |(i, _)| i);
        let end = line
            .char_indices()
            .nth(char_count - self.trailing)
            .map_or(line.len(), |(i, _)| i);
        &line[start..end]
    }
}

/// Parses the comma-separated body of a reward line.
///
/// Whitespace around entries is ignored and a single trailing empty entry
/// (`"1,2,"`) is dropped. Any other entry that is not an integer is returned
/// as the error value.
pub fn parse_reward_values(body: &str) -> Result<RewardRun, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut fields: Vec<String> = Vec::new();
    for record_result in reader.records() {
        let record = record_result.map_err(|e| e.to_string())?;
        fields.extend(record.iter().map(str::to_string));
    }

    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    fields
        .into_iter()
        .map(|field| field.parse::<i64>().map_err(|_| field))
        .collect()
}

/// Parses one raw line (terminator included) into a reward run.
pub fn parse_reward_line(line: &str, strip: StripWidth) -> Result<RewardRun, String> {
    parse_reward_values(strip.strip(line))
}

/// Splits text into lines the way a text-mode `readlines` does: `\r\n` and
/// `\r` become `\n`, and each line keeps its terminator.
fn split_lines_keep_terminator(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    normalized.split_inclusive('\n').map(str::to_string).collect()
}

/// Loads every run in a reward log. Whitespace-only lines are skipped.
pub fn load_reward_runs(input_file_path: &Path, strip: StripWidth) -> AnalysisResult<RewardRuns> {
    let content =
        fs::read_to_string(input_file_path).map_err(|e| AnalysisError::io(input_file_path, e))?;

    let mut runs: RewardRuns = Vec::new();
    for (line_index, line) in split_lines_keep_terminator(&content).iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let run = parse_reward_line(line, strip).map_err(|entry| AnalysisError::InvalidReward {
            path: input_file_path.to_path_buf(),
            line: line_index + 1,
            entry,
        })?;
        runs.push(run);
    }

    debug!(
        "Loaded {} run(s) from '{}' (episodes per run: {:?})",
        runs.len(),
        input_file_path.display(),
        runs.first().map(Vec::len)
    );
    Ok(runs)
}
