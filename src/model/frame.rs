//! Fixed-size text frames and the row helpers that build them

use std::fmt;
use std::time::Duration;

pub const ROWS: usize = 2;

/// The full two-row content sent to the display for one render.
///
/// Every row holds exactly `columns` characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayFrame {
    columns: usize,
    rows: [String; ROWS],
}

impl DisplayFrame {
    pub fn new(columns: usize, top: &str, bottom: &str) -> Self {
        Self {
            columns,
            rows: [fit(top, columns), fit(bottom, columns)],
        }
    }

    pub fn blank(columns: usize) -> Self {
        Self::new(columns, "", "")
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> &[String; ROWS] {
        &self.rows
    }

    pub fn top(&self) -> &str {
        &self.rows[0]
    }

    pub fn bottom(&self) -> &str {
        &self.rows[1]
    }
}

impl fmt::Display for DisplayFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}|{}]", self.rows[0], self.rows[1])
    }
}

/// Left-justify `text` in a row of exactly `columns` characters.
pub fn fit(text: &str, columns: usize) -> String {
    let mut row: String = text.chars().take(columns).collect();
    let len = row.chars().count();
    row.extend(std::iter::repeat_n(' ', columns - len));
    row
}

/// Center `text`, leaning left when the padding is odd.
pub fn center(text: &str, columns: usize) -> String {
    let len = text.chars().count();
    let pad = columns.saturating_sub(len) / 2;
    let mut row = " ".repeat(pad);
    row.push_str(text);
    fit(&row, columns)
}

/// Put `left` at the start and `right` flush with the end of the row.
///
/// Two non-empty fields need at least one space between them. When that does
/// not fit, they are joined by a single space and the result is wider than
/// `columns`, so the row scrolls instead of running the fields together.
pub fn justify(left: &str, right: &str, columns: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let min_gap = usize::from(!left.is_empty() && !right.is_empty());
    if used + min_gap > columns {
        return [left, right]
            .into_iter()
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }
    format!("{left}{}{right}", " ".repeat(columns - used))
}

/// Format as `m:ss`, the way the player shows positions.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}
