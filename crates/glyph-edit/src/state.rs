//! State queries and change notifications.
//!
//! # Overview
//!
//! Hosts read the engine through small snapshot structs ([`DocumentState`], [`CursorState`],
//! [`UndoRedoState`], [`ColorizerState`]) and learn about changes through subscribed callbacks.
//! Every content change bumps the document version by one and carries the affected coordinate
//! range plus its direction (edit, undo or redo), so a host can invalidate just that region.
//! Colorizer progress and line-state resets are notified without a version bump.
//!
//! # Example
//!
//! ```rust
//! use glyph_edit::{CodeEditor, StateChangeType};
//! use std::sync::{Arc, Mutex};
//!
//! let mut editor = CodeEditor::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! editor.subscribe(move |change| sink.lock().unwrap().push(change.change_type));
//!
//! editor.enter_character('a').unwrap();
//! assert_eq!(seen.lock().unwrap().as_slice(), &[StateChangeType::DocumentModified]);
//! assert_eq!(editor.document_state().version, 1);
//! ```

use crate::buffer::Position;
use crate::colorize::ColorizerPhase;
use crate::editor::CodeEditor;
use std::ops::Range;

/// Document state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    /// Line count.
    pub line_count: usize,
    /// Glyph count, not counting line breaks.
    pub char_count: usize,
    /// Version number, bumped by every content change.
    pub version: u64,
    /// Whether the undo log is away from the save point.
    pub is_modified: bool,
    /// Name of the installed language.
    pub language: String,
}

/// Cursor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorState {
    /// Cursor position.
    pub position: Position,
    /// Selection, if non-empty.
    pub selection: Option<(Position, Position)>,
    /// Whether a blinking cursor is currently shown.
    pub visible: bool,
    /// Overwrite mode.
    pub overwrite: bool,
}

/// Undo/redo state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRedoState {
    /// Can undo.
    pub can_undo: bool,
    /// Can redo.
    pub can_redo: bool,
    /// Records before the cursor.
    pub undo_depth: usize,
    /// Records at or after the cursor.
    pub redo_depth: usize,
    /// Save point, if still reachable.
    pub saved_position: Option<usize>,
}

/// Colorizer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorizerState {
    /// Current phase.
    pub phase: ColorizerPhase,
    /// Lines waiting for the token pass.
    pub dirty_lines: Option<Range<usize>>,
    /// Tick after which the multi-line pass runs.
    pub multiline_recheck_at: Option<u64>,
}

/// Which way a content change went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChangeDirection {
    /// A fresh edit.
    #[default]
    Edit,
    /// An undo.
    Undo,
    /// A redo.
    Redo,
}

impl ChangeDirection {
    /// `0` for edits, `-1` for undo, `+1` for redo.
    pub fn offset(self) -> i8 {
        match self {
            Self::Edit => 0,
            Self::Undo => -1,
            Self::Redo => 1,
        }
    }
}

/// State change type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateChangeType {
    /// Document content changed.
    DocumentModified,
    /// Line edit states were saved or cleared.
    LineStatesChanged,
    /// The colorizer did some work.
    Colorized {
        /// `true` for the multi-line pass.
        multiline: bool,
    },
}

/// State change record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Change type.
    pub change_type: StateChangeType,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
    /// Affected coordinate range (before the change for removals).
    pub affected_region: Option<(Position, Position)>,
    /// Direction of a content change.
    pub direction: ChangeDirection,
}

impl StateChange {
    /// Create a change record without a region.
    pub fn new(change_type: StateChangeType, old_version: u64, new_version: u64) -> Self {
        Self {
            change_type,
            old_version,
            new_version,
            affected_region: None,
            direction: ChangeDirection::Edit,
        }
    }

    /// Attach the affected range.
    pub fn with_region(mut self, start: Position, end: Position) -> Self {
        self.affected_region = Some((start, end));
        self
    }

    /// Attach the direction.
    pub fn with_direction(mut self, direction: ChangeDirection) -> Self {
        self.direction = direction;
        self
    }
}

/// State change callback function type.
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

impl CodeEditor {
    /// Current document version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the document changed since `version`.
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// Document state.
    pub fn document_state(&self) -> DocumentState {
        DocumentState {
            line_count: self.buffer.line_count(),
            char_count: self.buffer.char_count(),
            version: self.version,
            is_modified: !self.undo.is_at_save_point(),
            language: self.language.name().to_string(),
        }
    }

    /// Cursor state.
    pub fn cursor_state(&self) -> CursorState {
        CursorState {
            position: self.cursor_position(),
            selection: self.has_selection().then(|| self.selection()),
            visible: self.is_cursor_visible(),
            overwrite: self.overwrite,
        }
    }

    /// Undo/redo state.
    pub fn undo_redo_state(&self) -> UndoRedoState {
        UndoRedoState {
            can_undo: self.undo.can_undo(),
            can_redo: self.undo.can_redo(),
            undo_depth: self.undo.position(),
            redo_depth: self.undo.len() - self.undo.position(),
            saved_position: self.undo.saved_position(),
        }
    }

    /// Colorizer state.
    pub fn colorizer_state(&self) -> ColorizerState {
        ColorizerState {
            phase: self.colorizer.phase(),
            dirty_lines: self.colorizer.dirty_range(),
            multiline_recheck_at: self.colorizer.multiline_recheck_at(),
        }
    }
}
