//! Undo/redo log.
//!
//! # Overview
//!
//! Every successful mutation appends one [`UndoRecord`] carrying what is needed to reverse and
//! replay it plus the cursor/selection state before and after. The [`UndoLog`] is a linear
//! history with a cursor (`position`): records before it can be undone, records at or after it
//! can be redone. Pushing a new record discards the redo tail.
//!
//! Consecutive keystrokes coalesce at undo time: starting from the record being undone (the
//! anchor), earlier records that are [`similar`](UndoRecord::similar) to the anchor are undone
//! in the same step.
//!
//! The log also tracks the save point, the position at which the document was last saved. A save
//! point that falls inside a discarded redo tail becomes unreachable.

use crate::buffer::Position;

/// Cursor and selection state, copied into every undo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EditorState {
    /// Selection start (never after `selection_end`).
    pub selection_start: Position,
    /// Selection end.
    pub selection_end: Position,
    /// Cursor position.
    pub cursor: Position,
}

impl EditorState {
    /// A state with the cursor at `pos` and no selection.
    pub fn caret(pos: Position) -> Self {
        Self {
            selection_start: pos,
            selection_end: pos,
            cursor: pos,
        }
    }
}

/// Per-line control byte of an indent/unindent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndentOp {
    /// The line was not touched.
    Unchanged,
    /// One leading tab was inserted or removed.
    Tab,
    /// This many leading spaces were removed.
    Spaces(u8),
}

impl IndentOp {
    /// Compact byte form: `0` unchanged, `0xFF` tab, otherwise the space count.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Unchanged => 0,
            Self::Tab => u8::MAX,
            Self::Spaces(n) => n,
        }
    }

    /// Inverse of [`to_byte`](Self::to_byte).
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Unchanged,
            u8::MAX => Self::Tab,
            n => Self::Spaces(n),
        }
    }

    /// Leading whitespace this op adds or removes.
    pub fn whitespace(self) -> String {
        match self {
            Self::Unchanged => String::new(),
            Self::Tab => "\t".to_string(),
            Self::Spaces(n) => " ".repeat(usize::from(n)),
        }
    }
}

/// The reversible payload of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOp {
    /// `text` was inserted at `start`, replacing `overwritten` (selection or overwrite mode).
    Insert {
        /// Inserted text.
        text: String,
        /// Text that occupied `start` before the insert; empty for a plain insert.
        overwritten: String,
    },
    /// `text` was removed from `start..end`.
    Delete {
        /// Removed text.
        text: String,
    },
    /// Lines `start.line..=end.line` were indented.
    Indent {
        /// One op per line.
        ops: Vec<IndentOp>,
    },
    /// Lines `start.line..=end.line` were unindented.
    Unindent {
        /// One op per line.
        ops: Vec<IndentOp>,
    },
}

/// Operation kind of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UndoKind {
    /// Insert.
    Insert,
    /// Delete.
    Delete,
    /// Indent.
    Indent,
    /// Unindent.
    Unindent,
}

/// One reversible edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    /// Payload.
    pub op: UndoOp,
    /// Start of the affected span.
    pub start: Position,
    /// End of the affected span (after the edit for inserts).
    pub end: Position,
    /// State before the edit.
    pub before: EditorState,
    /// State after the edit.
    pub after: EditorState,
}

impl UndoRecord {
    /// Operation kind.
    pub fn kind(&self) -> UndoKind {
        match self.op {
            UndoOp::Insert { .. } => UndoKind::Insert,
            UndoOp::Delete { .. } => UndoKind::Delete,
            UndoOp::Indent { .. } => UndoKind::Indent,
            UndoOp::Unindent { .. } => UndoKind::Unindent,
        }
    }

    /// Inserted or removed text; empty for indent records.
    pub fn payload(&self) -> &str {
        match &self.op {
            UndoOp::Insert { text, .. } | UndoOp::Delete { text } => text,
            UndoOp::Indent { .. } | UndoOp::Unindent { .. } => "",
        }
    }

    /// Whether two records belong to the same burst of typing.
    ///
    /// Both must have the same kind and the same start and end lines, and carry single-character
    /// payloads that are both ASCII letters, both ASCII digits, both blanks, or both non-ASCII
    /// characters of the same encoded length.
    pub fn similar(&self, other: &UndoRecord) -> bool {
        if self.kind() != other.kind()
            || self.start.line != other.start.line
            || self.end.line != other.end.line
        {
            return false;
        }
        match (single_char(self.payload()), single_char(other.payload())) {
            (Some(a), Some(b)) => same_class(a, b),
            _ => false,
        }
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let first = chars.next()?;
    chars.next().is_none().then_some(first)
}

fn same_class(a: char, b: char) -> bool {
    (a.is_ascii_alphabetic() && b.is_ascii_alphabetic())
        || (a.is_ascii_digit() && b.is_ascii_digit())
        || (matches!(a, ' ' | '\t') && matches!(b, ' ' | '\t'))
        || (!a.is_ascii() && !b.is_ascii() && a.len_utf8() == b.len_utf8())
}

/// Linear undo history with a cursor and a save point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoLog {
    records: Vec<UndoRecord>,
    position: usize,
    /// `None` once the save point has been discarded with a redo tail.
    saved: Option<usize>,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoLog {
    /// An empty log whose save point is the initial position.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            position: 0,
            saved: Some(0),
        }
    }

    /// Append a record, discarding any redo tail.
    pub fn push(&mut self, record: UndoRecord) {
        if self.position < self.records.len() {
            if self.saved.is_some_and(|saved| saved > self.position) {
                self.saved = None;
            }
            self.records.truncate(self.position);
        }
        self.records.push(record);
        self.position += 1;
    }

    /// Whether a record can be undone.
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    /// Whether a record can be redone.
    pub fn can_redo(&self) -> bool {
        self.position < self.records.len()
    }

    /// Cursor into the history.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record was ever logged (or the log was cleared).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[UndoRecord] {
        &self.records
    }

    /// The save point, if still reachable.
    pub fn saved_position(&self) -> Option<usize> {
        self.saved
    }

    /// Whether the cursor sits at the save point.
    pub fn is_at_save_point(&self) -> bool {
        self.saved == Some(self.position)
    }

    /// Record the current position as the save point.
    pub fn mark_saved(&mut self) {
        self.saved = Some(self.position);
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.records.clear();
        self.position = 0;
        self.saved = Some(0);
    }

    /// The record the next undo would revert.
    pub fn peek_undo(&self) -> Option<&UndoRecord> {
        self.position.checked_sub(1).and_then(|i| self.records.get(i))
    }

    /// The record the next redo would replay.
    pub fn peek_redo(&self) -> Option<&UndoRecord> {
        self.records.get(self.position)
    }

    /// Move the cursor back one record and return it.
    pub fn step_back(&mut self) -> Option<UndoRecord> {
        let record = self.peek_undo()?.clone();
        self.position -= 1;
        Some(record)
    }

    /// Move the cursor forward one record and return it.
    pub fn step_forward(&mut self) -> Option<UndoRecord> {
        let record = self.peek_redo()?.clone();
        self.position += 1;
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str, line: usize, column: usize) -> UndoRecord {
        let start = Position::new(line, column);
        UndoRecord {
            op: UndoOp::Insert {
                text: text.to_string(),
                overwritten: String::new(),
            },
            start,
            end: Position::new(line, column + 1),
            before: EditorState::caret(start),
            after: EditorState::caret(Position::new(line, column + 1)),
        }
    }

    #[test]
    fn test_similar_classes() {
        assert!(typed("a", 0, 0).similar(&typed("b", 0, 1)));
        assert!(typed("1", 0, 0).similar(&typed("2", 0, 1)));
        assert!(typed(" ", 0, 0).similar(&typed("\t", 0, 1)));
        assert!(typed("\u{e9}", 0, 0).similar(&typed("\u{e8}", 0, 1)));

        assert!(!typed("a", 0, 0).similar(&typed("1", 0, 1)));
        assert!(!typed("a", 0, 0).similar(&typed(" ", 0, 1)));
        assert!(!typed(";", 0, 0).similar(&typed(";", 0, 1)));
        assert!(!typed("\u{e9}", 0, 0).similar(&typed("\u{4e2d}", 0, 1)));
        assert!(!typed("ab", 0, 0).similar(&typed("c", 0, 2)));
        assert!(!typed("a", 0, 0).similar(&typed("b", 1, 0)));
    }

    #[test]
    fn test_push_discards_redo_tail_and_unreachable_save_point() {
        let mut log = UndoLog::new();
        log.push(typed("a", 0, 0));
        log.push(typed("b", 0, 1));
        log.mark_saved();
        assert!(log.is_at_save_point());

        log.step_back();
        assert!(log.can_redo());
        log.push(typed("c", 0, 1));

        assert_eq!(log.len(), 2);
        assert!(!log.can_redo());
        assert_eq!(log.saved_position(), None);
    }

    #[test]
    fn test_indent_op_byte_form() {
        for op in [IndentOp::Unchanged, IndentOp::Tab, IndentOp::Spaces(3)] {
            assert_eq!(IndentOp::from_byte(op.to_byte()), op);
        }
        assert_eq!(IndentOp::Spaces(2).whitespace(), "  ");
    }
}
