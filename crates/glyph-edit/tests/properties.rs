mod common;

use glyph_edit::utf8;
use glyph_edit::{CodeEditor, EditorConfig, Position, SelectionMode};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, usize, String),
    Remove(usize, usize, usize, usize),
    Type(char),
    Backspace,
    Indent(usize, usize),
    Unindent(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6usize, 0..12usize, "[a-z \t\n]{0,6}").prop_map(|(l, c, s)| Op::Insert(l, c, s)),
        (0..6usize, 0..12usize, 0..6usize, 0..12usize)
            .prop_map(|(a, b, c, d)| Op::Remove(a, b, c, d)),
        prop::sample::select(vec!['a', 'b', '1', ' ', '\n', 'é']).prop_map(Op::Type),
        Just(Op::Backspace),
    ]
}

fn op_with_indent() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => op(),
        1 => (0..6usize, 0..6usize).prop_map(|(a, b)| Op::Indent(a, b)),
        1 => (0..6usize, 0..6usize).prop_map(|(a, b)| Op::Unindent(a, b)),
    ]
}

fn apply(editor: &mut CodeEditor, op: &Op) {
    match op {
        Op::Insert(line, column, text) => {
            editor.insert_at(Position::new(*line, *column), text).unwrap();
        }
        Op::Remove(l1, c1, l2, c2) => {
            editor
                .remove_range(Position::new(*l1, *c1), Position::new(*l2, *c2))
                .unwrap();
        }
        Op::Type(ch) => editor.enter_character(*ch).unwrap(),
        Op::Backspace => editor.backspace().unwrap(),
        Op::Indent(first, last) => {
            select_block(editor, *first, *last);
            editor.indent().unwrap();
        }
        Op::Unindent(first, last) => {
            select_block(editor, *first, *last);
            editor.unindent().unwrap();
        }
    }
}

fn select_block(editor: &mut CodeEditor, first: usize, last: usize) {
    editor.set_selection(
        Position::new(first, 0),
        Position::new(last, 0),
        SelectionMode::Line,
    );
}

proptest! {
    #[test]
    fn test_undo_all_restores_original(
        initial in "[a-z \n]{0,30}",
        ops in prop::collection::vec(op(), 1..25),
    ) {
        common::init_logging();
        let mut editor = CodeEditor::new();
        editor.set_text(&initial);
        for op in &ops {
            apply(&mut editor, op);
        }
        let edited = editor.text();

        editor.undo(ops.len()).unwrap();
        prop_assert_eq!(editor.text(), initial);
        prop_assert!(!editor.can_undo());

        editor.redo(ops.len()).unwrap();
        prop_assert_eq!(editor.text(), edited);
    }

    #[test]
    fn test_undo_then_redo_restores_editor_state(
        initial in "[a-z \t\n]{0,30}",
        ops in prop::collection::vec(op_with_indent(), 1..25),
        merge in any::<bool>(),
    ) {
        let mut editor = CodeEditor::with_config(EditorConfig::default().with_merge_undo(merge));
        editor.set_text(&initial);
        for op in &ops {
            let position = editor.undo_log().position();
            apply(&mut editor, op);
            if editor.undo_log().position() == position {
                continue;
            }

            let text = editor.text();
            let state = editor.editor_state();
            editor.undo(1).unwrap();
            editor.redo(1).unwrap();
            prop_assert_eq!(editor.text(), text);
            prop_assert_eq!(editor.editor_state(), state);
            prop_assert!(!editor.can_redo());
        }
    }

    #[test]
    fn test_sanitized_positions_are_in_bounds(
        text in "[a-z\n]{0,40}",
        line in 0..20usize,
        column in 0..20usize,
    ) {
        let mut editor = CodeEditor::new();
        editor.set_text(&text);
        let pos = editor.sanitize(Position::new(line, column));
        prop_assert!(pos.line < editor.line_count());
        prop_assert!(pos.column <= editor.columns_at(pos.line));
        prop_assert_eq!(editor.sanitize(pos), pos);
    }

    #[test]
    fn test_insert_then_remove_restores_buffer(
        initial in "[a-z \n]{0,30}",
        line in 0..8usize,
        column in 0..12usize,
        text in "[a-z\n]{1,10}",
    ) {
        let mut editor = CodeEditor::new();
        editor.set_text(&initial);
        let lines_before = editor.line_count();

        let start = editor.sanitize(Position::new(line, column));
        let inserted = editor.insert_at(start, &text).unwrap();
        editor.remove_range(start, inserted.end).unwrap();

        prop_assert_eq!(editor.text(), initial);
        prop_assert_eq!(editor.line_count(), lines_before);
    }

    #[test]
    fn test_decoder_always_makes_progress(bytes in prop::collection::vec(any::<u8>(), 1..16)) {
        let (_, consumed) = utf8::decode_one(&bytes);
        prop_assert!((1..=4).contains(&consumed));
        prop_assert!(consumed <= bytes.len());
    }

    #[test]
    fn test_valid_text_survives_decode(text in r"[^\x00]{0,20}") {
        let chars = utf8::decode(text.as_bytes());
        prop_assert_eq!(utf8::encode(&chars), text.clone());
        let total: usize = chars.iter().map(|c| c.encoded_len()).sum();
        prop_assert_eq!(total, text.len());
    }
}
