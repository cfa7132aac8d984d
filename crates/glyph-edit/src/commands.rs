//! Command interface
//!
//! Wraps the editing operations in one command enum so a host can drive the engine from a key
//! map, a script or a replay log.
//!
//! # Overview
//!
//! - **Edit commands** change the document and go through the undo log
//! - **Cursor commands** move the cursor and change the selection
//! - **View commands** change presentation settings, the language and the colorizer
//!
//! # Example
//!
//! ```rust
//! use glyph_edit::{CodeEditor, Command, CommandResult, EditCommand, CursorCommand};
//!
//! let mut editor = CodeEditor::new();
//! editor
//!     .execute_batch(vec![
//!         Command::Edit(EditCommand::EnterText { text: "hello".to_string() }),
//!         Command::Cursor(CursorCommand::MoveHome { select: true }),
//!     ])
//!     .unwrap();
//!
//! let result = editor.execute(Command::Edit(EditCommand::Cut)).unwrap();
//! assert_eq!(result, CommandResult::Text("hello".to_string()));
//! assert_eq!(editor.text(), "");
//! ```

use crate::buffer::Position;
use crate::colorize::ColorizeOutcome;
use crate::cursor::SelectionMode;
use crate::editor::CodeEditor;
use crate::error::{EditError, LanguageError};
use glyph_edit_lang::LanguageDefinition;
use thiserror::Error;

/// Text editing commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert text at a position
    Insert {
        /// Insertion point.
        position: Position,
        /// Text to insert.
        text: String,
    },
    /// Insert text at the cursor, replacing the selection
    InsertText {
        /// Text to insert.
        text: String,
    },
    /// Remove a range
    RemoveRange {
        /// Range start.
        start: Position,
        /// Range end.
        end: Position,
    },
    /// Delete the selection
    DeleteSelection,
    /// Backspace key
    Backspace,
    /// Delete key
    DeleteForward,
    /// Type one character
    EnterCharacter {
        /// Character typed.
        ch: char,
    },
    /// Type a string, character by character
    EnterText {
        /// Text typed.
        text: String,
    },
    /// Indent the selected lines
    Indent,
    /// Unindent the selected lines
    Unindent,
    /// Tab key
    Tab {
        /// Whether shift was held.
        shift: bool,
    },
    /// Delete the selection and return it
    Cut,
    /// Undo
    Undo {
        /// Logical steps to undo.
        steps: usize,
    },
    /// Redo
    Redo {
        /// Logical steps to redo.
        steps: usize,
    },
    /// Replace the whole document
    SetText {
        /// New content.
        text: String,
    },
    /// Mark the current state as saved
    MarkSaved,
    /// Reset every line's edit state
    ClearLineStates,
    /// Drop the undo history
    ClearUndoHistory,
}

/// Cursor commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorCommand {
    /// Move the cursor to a position
    MoveTo {
        /// Target position.
        position: Position,
    },
    /// Move up
    MoveUp {
        /// Lines to move.
        amount: usize,
        /// Extend the selection.
        select: bool,
    },
    /// Move down
    MoveDown {
        /// Lines to move.
        amount: usize,
        /// Extend the selection.
        select: bool,
    },
    /// Move left
    MoveLeft {
        /// Glyphs (or words) to move.
        amount: usize,
        /// Extend the selection.
        select: bool,
        /// Move by words.
        word_mode: bool,
    },
    /// Move right
    MoveRight {
        /// Glyphs (or words) to move.
        amount: usize,
        /// Extend the selection.
        select: bool,
        /// Move by words.
        word_mode: bool,
    },
    /// Move to the start of the document
    MoveTop {
        /// Extend the selection.
        select: bool,
    },
    /// Move to the last line
    MoveBottom {
        /// Extend the selection.
        select: bool,
    },
    /// Move to the start of the line
    MoveHome {
        /// Extend the selection.
        select: bool,
    },
    /// Move to the end of the line
    MoveEnd {
        /// Extend the selection.
        select: bool,
    },
    /// Set the selection
    SetSelection {
        /// Selection start.
        start: Position,
        /// Selection end.
        end: Position,
        /// Snapping mode.
        mode: SelectionMode,
    },
    /// Select everything
    SelectAll,
    /// Select the word under the cursor
    SelectWordUnderCursor,
    /// Collapse the selection onto the cursor
    ClearSelection,
}

/// View and engine settings commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// Set tab width
    SetTabWidth {
        /// Cells per tab stop.
        width: usize,
    },
    /// Toggle read-only mode
    SetReadonly {
        /// New value.
        readonly: bool,
    },
    /// Toggle overwrite mode
    SetOverwrite {
        /// New value.
        overwrite: bool,
    },
    /// Install a language
    SetLanguage {
        /// Language to compile and install.
        definition: LanguageDefinition,
    },
    /// Toggle a breakpoint
    ToggleBreakpoint {
        /// Line index.
        line: usize,
    },
    /// Advance the tick counter
    AdvanceFrame,
    /// Mark lines for re-colorizing
    Colorize {
        /// First line.
        from_line: usize,
        /// Number of lines.
        count: usize,
    },
    /// Do one unit of colorizing work
    ColorizeStep,
    /// Colorize everything now
    ColorizeAll,
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text editing commands
    Edit(EditCommand),
    /// Cursor commands
    Cursor(CursorCommand),
    /// View commands
    View(ViewCommand),
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Success, no return value
    Success,
    /// Success, returns text
    Text(String),
    /// Success, returns position
    Position(Position),
    /// Number of undo records processed
    Count(usize),
    /// Breakpoint state after a toggle
    Toggled(bool),
    /// Colorizer work done, if any
    Colorized(Option<ColorizeOutcome>),
}

/// Command error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// An edit was refused.
    #[error(transparent)]
    Edit(#[from] EditError),
    /// A language definition failed to compile.
    #[error(transparent)]
    Language(#[from] LanguageError),
}

impl CodeEditor {
    /// Execute command
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        tracing::trace!(?command, "execute");
        match command {
            Command::Edit(edit) => self.execute_edit(edit),
            Command::Cursor(cursor) => Ok(self.execute_cursor(cursor)),
            Command::View(view) => self.execute_view(view),
        }
    }

    /// Execute commands in order, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        commands: Vec<Command>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        let mut results = Vec::with_capacity(commands.len());

        for command in commands {
            let result = self.execute(command)?;
            results.push(result);
        }

        Ok(results)
    }

    fn execute_edit(&mut self, command: EditCommand) -> Result<CommandResult, CommandError> {
        let result = match command {
            EditCommand::Insert { position, text } => {
                CommandResult::Position(self.insert_at(position, text)?.end)
            }
            EditCommand::InsertText { text } => {
                CommandResult::Position(self.insert_text(text)?.end)
            }
            EditCommand::RemoveRange { start, end } => {
                self.remove_range(start, end)?;
                CommandResult::Success
            }
            EditCommand::DeleteSelection => {
                self.delete_selection()?;
                CommandResult::Success
            }
            EditCommand::Backspace => {
                self.backspace()?;
                CommandResult::Success
            }
            EditCommand::DeleteForward => {
                self.delete_forward()?;
                CommandResult::Success
            }
            EditCommand::EnterCharacter { ch } => {
                self.enter_character(ch)?;
                CommandResult::Position(self.cursor_position())
            }
            EditCommand::EnterText { text } => {
                self.enter_text(&text)?;
                CommandResult::Position(self.cursor_position())
            }
            EditCommand::Indent => {
                self.indent()?;
                CommandResult::Success
            }
            EditCommand::Unindent => {
                self.unindent()?;
                CommandResult::Success
            }
            EditCommand::Tab { shift } => {
                self.handle_tab(shift)?;
                CommandResult::Success
            }
            EditCommand::Cut => {
                self.ensure_writable()?;
                let text = self.selection_text();
                self.delete_selection()?;
                CommandResult::Text(text)
            }
            EditCommand::Undo { steps } => CommandResult::Count(self.undo(steps)?),
            EditCommand::Redo { steps } => CommandResult::Count(self.redo(steps)?),
            EditCommand::SetText { text } => {
                self.set_text(text);
                CommandResult::Success
            }
            EditCommand::MarkSaved => {
                self.set_changes_saved();
                CommandResult::Success
            }
            EditCommand::ClearLineStates => {
                self.set_changes_cleared();
                CommandResult::Success
            }
            EditCommand::ClearUndoHistory => {
                self.clear_undo_history();
                CommandResult::Success
            }
        };
        Ok(result)
    }

    fn execute_cursor(&mut self, command: CursorCommand) -> CommandResult {
        match command {
            CursorCommand::MoveTo { position } => {
                self.set_cursor_position(position);
                self.clear_selection();
            }
            CursorCommand::MoveUp { amount, select } => self.move_up(amount, select),
            CursorCommand::MoveDown { amount, select } => self.move_down(amount, select),
            CursorCommand::MoveLeft {
                amount,
                select,
                word_mode,
            } => self.move_left(amount, select, word_mode),
            CursorCommand::MoveRight {
                amount,
                select,
                word_mode,
            } => self.move_right(amount, select, word_mode),
            CursorCommand::MoveTop { select } => self.move_top(select),
            CursorCommand::MoveBottom { select } => self.move_bottom(select),
            CursorCommand::MoveHome { select } => self.move_home(select),
            CursorCommand::MoveEnd { select } => self.move_end(select),
            CursorCommand::SetSelection { start, end, mode } => {
                self.set_selection(start, end, mode)
            }
            CursorCommand::SelectAll => self.select_all(),
            CursorCommand::SelectWordUnderCursor => self.select_word_under_cursor(),
            CursorCommand::ClearSelection => self.clear_selection(),
        }
        CommandResult::Position(self.cursor_position())
    }

    fn execute_view(&mut self, command: ViewCommand) -> Result<CommandResult, CommandError> {
        let result = match command {
            ViewCommand::SetTabWidth { width } => {
                self.set_tab_width(width);
                CommandResult::Success
            }
            ViewCommand::SetReadonly { readonly } => {
                self.set_readonly(readonly);
                CommandResult::Success
            }
            ViewCommand::SetOverwrite { overwrite } => {
                self.set_overwrite(overwrite);
                CommandResult::Success
            }
            ViewCommand::SetLanguage { definition } => {
                self.set_language(&definition)?;
                CommandResult::Success
            }
            ViewCommand::ToggleBreakpoint { line } => {
                CommandResult::Toggled(self.toggle_breakpoint(line))
            }
            ViewCommand::AdvanceFrame => {
                self.advance_frame();
                CommandResult::Success
            }
            ViewCommand::Colorize { from_line, count } => {
                self.colorize(from_line, count);
                CommandResult::Success
            }
            ViewCommand::ColorizeStep => CommandResult::Colorized(self.colorize_step()),
            ViewCommand::ColorizeAll => {
                self.colorize_all();
                CommandResult::Success
            }
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_batch_stops_at_first_error() {
        let mut editor = CodeEditor::new();
        let result = editor.execute_batch(vec![
            Command::Edit(EditCommand::EnterText {
                text: "ab".to_string(),
            }),
            Command::View(ViewCommand::SetReadonly { readonly: true }),
            Command::Edit(EditCommand::Backspace),
            Command::Edit(EditCommand::Backspace),
        ]);

        assert_eq!(
            result,
            Err(CommandError::Edit(EditError::ReadonlyViolation))
        );
        assert_eq!(editor.text(), "ab");
    }

    #[test]
    fn test_move_to_collapses_selection() {
        let mut editor = CodeEditor::new();
        editor.set_text("one two");
        editor.select_all();

        let result = editor
            .execute(Command::Cursor(CursorCommand::MoveTo {
                position: Position::new(0, 3),
            }))
            .unwrap();
        assert_eq!(result, CommandResult::Position(Position::new(0, 3)));
        assert!(!editor.has_selection());
    }

    #[test]
    fn test_undo_reports_record_count() {
        let mut editor = CodeEditor::new();
        editor
            .execute(Command::Edit(EditCommand::EnterText {
                text: "hi".to_string(),
            }))
            .unwrap();

        let result = editor
            .execute(Command::Edit(EditCommand::Undo { steps: 1 }))
            .unwrap();
        assert_eq!(result, CommandResult::Count(2));
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_bad_language_keeps_previous() {
        let mut editor = CodeEditor::new();
        let definition =
            LanguageDefinition::new("Broken").with_pattern("(", glyph_edit_lang::SyntaxCategory::Number);

        let err = editor
            .execute(Command::View(ViewCommand::SetLanguage { definition }))
            .unwrap_err();
        assert!(matches!(err, CommandError::Language(_)));
        assert_eq!(editor.language().name(), "Plain Text");
    }
}
