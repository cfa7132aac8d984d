//! Line-indexed side tables (breakpoints and error markers).
//!
//! Both tables are keyed by line index and must follow their line when whole lines are inserted
//! or removed. Every re-index goes through [`LineShift::apply`], shared by both tables and both
//! directions.

use std::collections::{BTreeMap, BTreeSet};

/// A whole-line structural edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShift {
    /// `count` lines were inserted before line `at`.
    Inserted {
        /// First new line index.
        at: usize,
        /// Number of inserted lines.
        count: usize,
    },
    /// Lines `start..end` were removed.
    Removed {
        /// First removed line.
        start: usize,
        /// One past the last removed line.
        end: usize,
    },
}

impl LineShift {
    /// Map a line index through the edit. `None` means the line was removed.
    pub fn apply(self, line: usize) -> Option<usize> {
        match self {
            Self::Inserted { at, count } => Some(if line >= at { line + count } else { line }),
            Self::Removed { start, end } => {
                if line < start {
                    Some(line)
                } else if line < end {
                    None
                } else {
                    Some(line - (end - start))
                }
            }
        }
    }
}

/// Breakpoints and error markers attached to lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMarkers {
    breakpoints: BTreeSet<usize>,
    errors: BTreeMap<usize, String>,
}

impl LineMarkers {
    /// Lines carrying a breakpoint.
    pub fn breakpoints(&self) -> &BTreeSet<usize> {
        &self.breakpoints
    }

    /// Error messages by line.
    pub fn errors(&self) -> &BTreeMap<usize, String> {
        &self.errors
    }

    /// Replace all breakpoints.
    pub fn set_breakpoints(&mut self, lines: impl IntoIterator<Item = usize>) {
        self.breakpoints = lines.into_iter().collect();
    }

    /// Toggle a breakpoint; returns `true` if the line now has one.
    pub fn toggle_breakpoint(&mut self, line: usize) -> bool {
        if self.breakpoints.remove(&line) {
            false
        } else {
            self.breakpoints.insert(line);
            true
        }
    }

    /// Remove every breakpoint.
    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Replace all error markers.
    pub fn set_errors(&mut self, errors: impl IntoIterator<Item = (usize, String)>) {
        self.errors = errors.into_iter().collect();
    }

    /// Remove every error marker.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Re-index both tables after a structural edit.
    pub fn shift(&mut self, shift: LineShift) {
        if self.breakpoints.is_empty() && self.errors.is_empty() {
            return;
        }
        self.breakpoints = std::mem::take(&mut self.breakpoints)
            .into_iter()
            .filter_map(|line| shift.apply(line))
            .collect();
        self.errors = std::mem::take(&mut self.errors)
            .into_iter()
            .filter_map(|(line, message)| shift.apply(line).map(|line| (line, message)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_shifts_lines_at_and_after() {
        let mut markers = LineMarkers::default();
        markers.set_breakpoints([1, 3, 5]);
        markers.shift(LineShift::Inserted { at: 3, count: 2 });
        assert_eq!(
            markers.breakpoints().iter().copied().collect::<Vec<_>>(),
            vec![1, 5, 7]
        );
    }

    #[test]
    fn test_remove_drops_inside_and_shifts_after() {
        let mut markers = LineMarkers::default();
        markers.set_errors([
            (0, "a".to_string()),
            (2, "b".to_string()),
            (3, "c".to_string()),
            (6, "d".to_string()),
        ]);
        markers.shift(LineShift::Removed { start: 2, end: 4 });
        let remaining: Vec<(usize, &str)> = markers
            .errors()
            .iter()
            .map(|(line, msg)| (*line, msg.as_str()))
            .collect();
        assert_eq!(remaining, vec![(0, "a"), (4, "d")]);
    }

    #[test]
    fn test_toggle_breakpoint() {
        let mut markers = LineMarkers::default();
        assert!(markers.toggle_breakpoint(4));
        assert!(!markers.toggle_breakpoint(4));
        assert!(markers.breakpoints().is_empty());
    }
}
