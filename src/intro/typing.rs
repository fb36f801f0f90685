//! Character-by-character reveal of the intro lines.

/// Position of the typing cursor.
///
/// `column` counts Unicode scalar values, not bytes. `line == lines.len()`
/// means typing is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypingCursor {
    /// Index of the line being typed.
    pub line: usize,
    /// Number of characters of that line already visible.
    pub column: usize,
}

/// Advances a [`TypingCursor`] over a fixed list of lines.
#[derive(Debug, Clone)]
pub struct TypingSequencer {
    lines: Vec<String>,
    cursor: TypingCursor,
}

impl TypingSequencer {
    /// Sequencer positioned before the first character of `lines`.
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            cursor: TypingCursor::default(),
        }
    }

    /// The lines being typed.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Current cursor.
    #[must_use]
    pub fn cursor(&self) -> TypingCursor {
        self.cursor
    }

    /// Whether every line has been revealed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor.line >= self.lines.len()
    }

    /// Advance by one tick. Reveals one more character, or moves to the
    /// start of the next line when the current one is fully shown.
    ///
    /// Returns `false` (and changes nothing) once complete.
    pub fn tick(&mut self) -> bool {
        let Some(line) = self.lines.get(self.cursor.line) else {
            return false;
        };
        if self.cursor.column < line.chars().count() {
            self.cursor.column += 1;
        } else {
            self.cursor.line += 1;
            self.cursor.column = 0;
        }
        true
    }

    /// Ticks needed to go from the start to completion.
    #[must_use]
    pub fn total_ticks(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count() + 1).sum()
    }

    /// Visible text of line `index`.
    #[must_use]
    pub fn visible_line(&self, index: usize) -> &str {
        let Some(line) = self.lines.get(index) else {
            return "";
        };
        if self.is_complete() || index < self.cursor.line {
            line
        } else if index == self.cursor.line {
            char_prefix(line, self.cursor.column)
        } else {
            ""
        }
    }

    /// Visible text of every line, in display order.
    #[must_use]
    pub fn visible_lines(&self) -> Vec<&str> {
        (0..self.lines.len()).map(|i| self.visible_line(i)).collect()
    }
}

/// The first `n` characters of `s`.
fn char_prefix(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(i, _)| &s[..i])
}
