//! Narration text segmentation
//!
//! The host stores narration as a packed stream of integer codes with
//! layout control mixed in. [`segment`] decodes the displayable characters
//! and re-splits them into the lines the host shows, using a line-length
//! table per language and segment set.

mod tables;

use serde::{Deserialize, Serialize};

use crate::language::Language;

pub use tables::line_lengths;

/// Terminates the packed stream
pub const TERMINATOR: u16 = 0;
/// Padding between records, never displayed
pub const FILLER: u16 = 0xFFFF;
/// Codes at or below this are layout control
pub const CONTROL_MAX: u16 = 128;
/// Displayable codes are offset by this bias
pub const CHAR_BIAS: u16 = 128;

/// Which portion of the packed narration a table describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentSet {
    Primary,
    Secondary,
}

impl SegmentSet {
    /// Host-side segment set id
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(SegmentSet::Primary),
            1 => Some(SegmentSet::Secondary),
            _ => None,
        }
    }
}

/// Decode the displayable characters of a packed stream
pub fn decode(codes: &[u16]) -> String {
    let mut text = String::with_capacity(codes.len());
    for &code in codes {
        match code {
            TERMINATOR => break,
            FILLER => continue,
            c if c <= CONTROL_MAX => continue,
            c => {
                if let Some(ch) = char::from_u32(u32::from(c - CHAR_BIAS)) {
                    text.push(ch);
                }
            }
        }
    }
    text
}

/// Decode `codes` and split the text into display lines
pub fn segment(codes: &[u16], language: Language, set: SegmentSet) -> Vec<String> {
    split_lines(&decode(codes), line_lengths(language, set))
}

/// Split `text` by consecutive character counts; whatever is left after
/// the table runs out becomes one final line. Lines are trimmed and blank
/// lines are dropped.
pub fn split_lines(text: &str, lengths: &[usize]) -> Vec<String> {
    let mut lines = Vec::with_capacity(lengths.len() + 1);
    let mut rest = text;

    for &len in lengths {
        if rest.is_empty() {
            break;
        }
        let split = rest
            .char_indices()
            .nth(len)
            .map(|(at, _)| at)
            .unwrap_or(rest.len());
        let (line, tail) = rest.split_at(split);
        push_trimmed(&mut lines, line);
        rest = tail;
    }
    push_trimmed(&mut lines, rest);

    lines
}

fn push_trimmed(lines: &mut Vec<String>, line: &str) {
    let line = line.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
}
