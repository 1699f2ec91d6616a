//! Output types for rexscan commands
//!
//! All output structures are designed to be JSON-first.

use serde::{Deserialize, Serialize};

use crate::core::{CursorState, MatchRecord, Pattern};

/// A single participating capture group within a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capture {
    /// Group number (1-indexed)
    pub group: usize,
    /// Named group name (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Captured text
    pub text: String,
    /// Start byte position (0-indexed)
    pub start: usize,
    /// End byte position (exclusive)
    pub end: usize,
}

/// A single match with its cursor boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Full matched text
    pub text: String,
    /// Start byte position of the match
    pub index: usize,
    /// End of the previous match (0 for the first)
    pub prev_last_index: usize,
    /// Position the probe started from
    pub start_index: usize,
    /// End byte position (exclusive)
    pub last_index: usize,
    /// Participating capture groups
    pub captures: Vec<Capture>,
}

impl Match {
    pub fn from_record(record: &MatchRecord<'_>, pattern: &Pattern) -> Self {
        let captures = (1..=record.captures.len())
            .filter_map(|group| {
                let range = record.group_range(group)?;
                Some(Capture {
                    group,
                    name: pattern.capture_name(group).map(str::to_string),
                    text: record.subject()[range.clone()].to_string(),
                    start: range.start,
                    end: range.end,
                })
            })
            .collect();

        Match {
            text: record.as_str().to_string(),
            index: record.index,
            prev_last_index: record.prev_last_index,
            start_index: record.start_index,
            last_index: record.last_index,
            captures,
        }
    }
}

/// Cursor position once iteration stopped
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinalState {
    pub last_index: usize,
    pub index: Option<usize>,
}

impl From<CursorState> for FinalState {
    fn from(state: CursorState) -> Self {
        FinalState {
            last_index: state.last_index,
            index: state.index,
        }
    }
}

/// Result of `rexscan scan`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// The pattern that was scanned with
    pub pattern: String,
    /// Flags in effect
    pub flags: String,
    /// Which engine was used (regex or fancy-regex)
    pub engine: String,
    /// Length of input in bytes
    pub input_length: usize,
    /// Whether any match was found
    pub matched: bool,
    /// Number of matches reported
    pub match_count: usize,
    /// All reported matches
    pub matches: Vec<Match>,
    /// Cursor state after the last reported match
    #[serde(rename = "final")]
    pub final_state: FinalState,
    /// Elapsed time in microseconds
    pub elapsed_us: u64,
}

/// Result of `rexscan replace`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceResult {
    /// The pattern that was used
    pub pattern: String,
    /// Flags in effect
    pub flags: String,
    /// The replacement template
    pub replacement: String,
    /// Original input
    pub original: String,
    /// Result after replacement
    pub result: String,
    /// Number of replacements made
    pub replacements_made: usize,
}

/// Result of `rexscan split`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitResult {
    /// The pattern that was split on
    pub pattern: String,
    /// Flags in effect
    pub flags: String,
    /// Fragment cap, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Fragments and captures in order; `null` for captures that did not participate
    pub pieces: Vec<Option<String>>,
}

/// Generic error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always true for errors
    pub error: bool,
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error codes used throughout rexscan
pub mod error_codes {
    pub const COMMAND_ERROR: &str = "COMMAND_ERROR";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
}
