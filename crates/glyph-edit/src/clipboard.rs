//! Copy, cut and paste against a host clipboard.

use crate::editor::CodeEditor;
use crate::error::EditError;

/// Clipboard storage supplied by the host.
pub trait Clipboard {
    /// Replace the clipboard contents.
    fn set_text(&mut self, text: &str);
    /// Current contents, if any.
    fn text(&mut self) -> Option<String>;
}

/// An in-process clipboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// An empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at the contents.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }

    fn text(&mut self) -> Option<String> {
        self.contents.clone()
    }
}

impl CodeEditor {
    /// Copy the selection, or the current line without a selection.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) {
        if self.has_selection() {
            clipboard.set_text(&self.selection_text());
        } else {
            let line = self.cursor_position().line;
            let text = self.buffer.line(line).map(|l| l.text()).unwrap_or_default();
            clipboard.set_text(&text);
        }
    }

    /// Copy and delete the selection. A read-only editor only copies.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> Result<(), EditError> {
        if self.readonly {
            self.copy(clipboard);
            return Ok(());
        }
        if self.has_selection() {
            self.copy(clipboard);
            self.delete_selection()?;
        }
        Ok(())
    }

    /// Insert the clipboard contents, replacing the selection, as one undo step.
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> Result<(), EditError> {
        self.ensure_writable()?;
        match clipboard.text() {
            Some(text) if !text.is_empty() => self.insert_text(text).map(|_| ()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_copy_without_selection_takes_current_line() {
        let mut editor = CodeEditor::new();
        editor.set_text("first\nsecond");
        editor.set_cursor_position(Position::new(1, 2));

        let mut clipboard = MemoryClipboard::new();
        editor.copy(&mut clipboard);
        assert_eq!(clipboard.contents(), Some("second"));
    }

    #[test]
    fn test_cut_on_readonly_only_copies() {
        let mut editor = CodeEditor::new();
        editor.set_text("hello");
        editor.select_all();
        editor.set_readonly(true);

        let mut clipboard = MemoryClipboard::new();
        editor.cut(&mut clipboard).unwrap();
        assert_eq!(clipboard.contents(), Some("hello"));
        assert_eq!(editor.text(), "hello");
    }

    #[test]
    fn test_paste_replaces_selection_in_one_step() {
        let mut editor = CodeEditor::new();
        editor.set_text("hello world");
        editor.set_selection(
            Position::new(0, 6),
            Position::new(0, 11),
            crate::SelectionMode::Normal,
        );

        let mut clipboard = MemoryClipboard::new();
        clipboard.set_text("there");
        editor.paste(&mut clipboard).unwrap();
        assert_eq!(editor.text(), "hello there");
        assert_eq!(editor.undo_log().len(), 1);

        editor.undo(1).unwrap();
        assert_eq!(editor.text(), "hello world");
        editor.redo(1).unwrap();
        assert_eq!(editor.text(), "hello there");
    }
}
