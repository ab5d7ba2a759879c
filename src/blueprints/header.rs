//! Blueprint header line parsing.
//!
//! The first line of a blueprint may carry metadata:
//!
//! ```text
//! #dig start(3;3;Center tile) Stairs leading down,,,
//! ```
//!
//! which holds the blueprint keyword (`dig`), an optional starting cursor
//! position and a free-text comment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::StartBlockMode;

/// Marks a line as a header line
pub const HEADER_MARKER: char = '#';

const START_PREFIX: &str = "start(";

/// Errors for a malformed `start(...)` block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("start block is missing its closing parenthesis: {0:?}")]
    UnterminatedStart(String),

    #[error("start block expects {expected} ';'-separated fields, got {got}")]
    StartFieldCount { expected: usize, got: usize },

    #[error("start block {axis} coordinate is not an integer: {value:?}")]
    InvalidCoordinate { axis: char, value: String },
}

/// Starting cursor position declared in a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPosition {
    pub x: i32,
    pub y: i32,
    pub comment: Option<String>,
}

/// Metadata parsed from the first blueprint line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Lowercased keyword, `None` when the line is not a header line
    pub command: Option<String>,
    pub start: Option<StartPosition>,
    pub comment: Option<String>,
}

impl Header {
    /// Whether the header names a keyword, which removes its line from the data
    pub fn has_keyword(&self) -> bool {
        self.command.as_deref().is_some_and(|command| !command.is_empty())
    }
}

/// Parse a line as a header.
///
/// A line without the leading marker yields an empty header; only a broken
/// `start(...)` block in strict mode is an error.
pub fn parse_header(line: &str, mode: StartBlockMode) -> Result<Header, HeaderError> {
    let mut header = Header::default();

    let Some(line) = line.trim().strip_prefix(HEADER_MARKER) else {
        return Ok(header);
    };
    let line = line.trim();

    let keyword_end = line.find([' ', ',']).unwrap_or(line.len());
    header.command = Some(line[..keyword_end].trim().to_lowercase());

    let mut rest = line[keyword_end..].trim();

    if let Some(start_text) = rest.strip_prefix(START_PREFIX) {
        let (block, after) = match start_text.find(')') {
            Some(end) => (&start_text[..end], &start_text[end + 1..]),
            None if mode == StartBlockMode::Lenient => (start_text, ""),
            None => return Err(HeaderError::UnterminatedStart(rest.to_string())),
        };

        header.start = Some(parse_start(block, mode)?);
        rest = after.trim();
    }

    // Header lines are often padded out to the grid width with commas
    let comment = rest.trim_matches(',');
    if !comment.is_empty() {
        header.comment = Some(comment.to_string());
    }

    Ok(header)
}

fn parse_start(block: &str, mode: StartBlockMode) -> Result<StartPosition, HeaderError> {
    let fields: Vec<&str> = block.split(';').map(str::trim).collect();

    if mode == StartBlockMode::Strict {
        if fields.len() != 3 {
            return Err(HeaderError::StartFieldCount {
                expected: 3,
                got: fields.len(),
            });
        }

        return Ok(StartPosition {
            x: strict_coordinate('x', fields[0])?,
            y: strict_coordinate('y', fields[1])?,
            comment: non_empty(fields[2]),
        });
    }

    Ok(StartPosition {
        x: fields.first().map_or(0, |field| leading_integer(field)),
        y: fields.get(1).map_or(0, |field| leading_integer(field)),
        comment: fields.get(2).and_then(|field| non_empty(field)),
    })
}

fn strict_coordinate(axis: char, value: &str) -> Result<i32, HeaderError> {
    value.parse().map_err(|_| HeaderError::InvalidCoordinate {
        axis,
        value: value.to_string(),
    })
}

/// Integer prefix of `text` (`"3abc"` -> 3), 0 when there is none
fn leading_integer(text: &str) -> i32 {
    let digits_start = usize::from(text.starts_with(['-', '+']));
    let end = text[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |pos| pos + digits_start);

    text[..end].parse().unwrap_or(0)
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
