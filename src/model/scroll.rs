//! Horizontal scrolling of rows wider than the display

/// Offset of the scroll window into the active row(s).
///
/// Always below the cycle length it was last advanced with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollCursor {
    offset: usize,
}

impl ScrollCursor {
    pub fn offset(self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Move one character forward, returning `true` when the cursor wrapped
    /// back to the start.
    pub fn advance(&mut self, cycle_len: usize) -> bool {
        if cycle_len == 0 {
            self.offset = 0;
            return false;
        }
        self.offset = (self.offset + 1) % cycle_len;
        self.offset == 0
    }
}

/// Number of steps a row needs to scroll through once, or `None` when it
/// fits and stays static.
pub fn cycle_len(text: &str, columns: usize, separator: &str) -> Option<usize> {
    let len = text.chars().count();
    (len > columns).then(|| len + separator.chars().count())
}

/// The `columns`-wide window of `text` starting at `offset`.
///
/// Text that fits is left-justified and padded. Longer text is treated as a
/// loop of `text + separator`.
pub fn window(text: &str, columns: usize, separator: &str, offset: usize) -> String {
    if text.chars().count() <= columns {
        return super::frame::fit(text, columns);
    }
    let looped: Vec<char> = text.chars().chain(separator.chars()).collect();
    let start = offset % looped.len();
    looped.iter().cycle().skip(start).take(columns).collect()
}
