mod common;

use glyph_edit::{CodeEditor, Position};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn editor_with_markers() -> CodeEditor {
    let mut editor = CodeEditor::new();
    editor.set_text("a\nb\nc\nd");
    editor.set_breakpoints([2]);
    editor.set_error_markers([(3, "boom".to_string())]);
    editor
}

#[test]
fn test_markers_follow_inserted_lines() {
    common::init_logging();
    let mut editor = editor_with_markers();

    editor.insert_at(Position::new(0, 1), "\nx").unwrap();
    assert_eq!(editor.breakpoints().iter().copied().collect::<Vec<_>>(), vec![3]);
    assert_eq!(
        editor.error_markers(),
        &BTreeMap::from([(4, "boom".to_string())])
    );
}

#[test]
fn test_markers_on_removed_lines_are_dropped() {
    let mut editor = editor_with_markers();

    editor
        .remove_range(Position::new(0, 1), Position::new(2, 0))
        .unwrap();
    assert_eq!(editor.text(), "ac\nd");
    assert!(editor.breakpoints().is_empty());
    assert_eq!(
        editor.error_markers(),
        &BTreeMap::from([(1, "boom".to_string())])
    );
}

#[test]
fn test_markers_return_after_undo() {
    let mut editor = editor_with_markers();

    editor.insert_at(Position::new(0, 1), "\n").unwrap();
    editor.undo(1).unwrap();
    assert_eq!(editor.breakpoints().iter().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(editor.error_markers().keys().copied().collect::<Vec<_>>(), vec![3]);
}

#[test]
fn test_toggle_and_clear() {
    let mut editor = editor_with_markers();

    assert!(editor.toggle_breakpoint(0));
    assert!(!editor.toggle_breakpoint(2));
    assert_eq!(editor.breakpoints().iter().copied().collect::<Vec<_>>(), vec![0]);

    editor.clear_breakpoints();
    editor.clear_error_markers();
    assert!(editor.breakpoints().is_empty());
    assert!(editor.error_markers().is_empty());
}
