mod common;

use glyph_edit::{CodeEditor, IndentOp, Position, SelectionMode, UndoOp};
use pretty_assertions::assert_eq;

fn select_lines(editor: &mut CodeEditor, first: usize, last: usize) {
    editor.set_selection(
        Position::new(first, 0),
        Position::new(last, 0),
        SelectionMode::Line,
    );
}

#[test]
fn test_indent_then_unindent_restores_text() {
    common::init_logging();
    let mut editor = CodeEditor::new();
    editor.set_text("a\nb\nc");
    select_lines(&mut editor, 0, 2);

    editor.indent().unwrap();
    assert_eq!(editor.text(), "\ta\n\tb\n\tc");

    editor.unindent().unwrap();
    assert_eq!(editor.text(), "a\nb\nc");
    assert_eq!(editor.undo_log().len(), 2);
}

#[test]
fn test_indent_keeps_selection_over_block() {
    let mut editor = CodeEditor::new();
    editor.set_text("a\nbb");
    select_lines(&mut editor, 0, 1);

    editor.indent().unwrap();
    assert_eq!(
        editor.selection(),
        (Position::new(0, 0), Position::new(1, 3))
    );
}

#[test]
fn test_indent_keeps_caller_selection_start() {
    let mut editor = CodeEditor::new();
    editor.set_text("ab\ncd");
    editor.set_selection(
        Position::new(0, 1),
        Position::new(1, 1),
        SelectionMode::Normal,
    );

    editor.indent().unwrap();
    assert_eq!(editor.text(), "\tab\n\tcd");
    assert_eq!(
        editor.selection(),
        (Position::new(0, 1), Position::new(1, 3))
    );

    editor.undo(1).unwrap();
    assert_eq!(
        editor.selection(),
        (Position::new(0, 1), Position::new(1, 1))
    );
}

#[test]
fn test_indent_skips_empty_lines() {
    let mut editor = CodeEditor::new();
    editor.set_text("a\n\nb");
    select_lines(&mut editor, 0, 2);

    editor.indent().unwrap();
    assert_eq!(editor.text(), "\ta\n\n\tb");

    let UndoOp::Indent { ops } = &editor.undo_log().records()[0].op else {
        panic!("expected an indent record");
    };
    assert_eq!(ops, &vec![IndentOp::Tab, IndentOp::Unchanged, IndentOp::Tab]);
}

#[test]
fn test_unindent_removes_up_to_tab_width_spaces() {
    let mut editor = CodeEditor::new();
    editor.set_text("      x\n  y\nz");
    select_lines(&mut editor, 0, 2);

    editor.unindent().unwrap();
    assert_eq!(editor.text(), "  x\ny\nz");

    let UndoOp::Unindent { ops } = &editor.undo_log().records()[0].op else {
        panic!("expected an unindent record");
    };
    assert_eq!(
        ops,
        &vec![IndentOp::Spaces(4), IndentOp::Spaces(2), IndentOp::Unchanged]
    );

    editor.undo(1).unwrap();
    assert_eq!(editor.text(), "      x\n  y\nz");
    editor.redo(1).unwrap();
    assert_eq!(editor.text(), "  x\ny\nz");
}

#[test]
fn test_unindent_without_indentation_logs_nothing() {
    let mut editor = CodeEditor::new();
    editor.set_text("a\nb");
    select_lines(&mut editor, 0, 1);

    editor.unindent().unwrap();
    assert_eq!(editor.text(), "a\nb");
    assert!(editor.undo_log().is_empty());
}

#[test]
fn test_indent_needs_multiline_selection() {
    let mut editor = CodeEditor::new();
    editor.set_text("abc\ndef");
    editor.set_selection(
        Position::new(0, 0),
        Position::new(0, 2),
        SelectionMode::Normal,
    );

    editor.indent().unwrap();
    assert_eq!(editor.text(), "abc\ndef");
    assert!(editor.undo_log().is_empty());
}

#[test]
fn test_tab_key_types_tab_without_selection() {
    let mut editor = CodeEditor::new();
    editor.set_text("ab");
    editor.set_cursor_position(Position::new(0, 1));

    editor.handle_tab(false).unwrap();
    assert_eq!(editor.text(), "a\tb");

    editor.handle_tab(true).unwrap();
    assert_eq!(editor.text(), "ab");

    editor.handle_tab(true).unwrap();
    assert_eq!(editor.text(), "ab");
}

#[test]
fn test_tab_key_indents_block() {
    let mut editor = CodeEditor::new();
    editor.set_text("x\ny");
    select_lines(&mut editor, 0, 1);

    editor.handle_tab(false).unwrap();
    assert_eq!(editor.text(), "\tx\n\ty");
    editor.handle_tab(true).unwrap();
    assert_eq!(editor.text(), "x\ny");
}

#[test]
fn test_indent_record_byte_encoding() {
    assert_eq!(IndentOp::Unchanged.to_byte(), 0);
    assert_eq!(IndentOp::Tab.to_byte(), 0xFF);
    assert_eq!(IndentOp::Spaces(3).to_byte(), 3);
    assert_eq!(IndentOp::from_byte(0xFF), IndentOp::Tab);
}
