mod common;

use glyph_edit::{
    CodeEditor, ColorizeOutcome, ColorizerPhase, EditorConfig, Line, Position, SyntaxCategory,
};
use glyph_edit_lang::builtin;
use pretty_assertions::assert_eq;

fn comment_flags(line: &Line) -> String {
    line.glyphs()
        .iter()
        .map(|g| if g.in_multiline_comment { 'c' } else { '.' })
        .collect()
}

fn c_editor(text: &str) -> CodeEditor {
    let mut editor = CodeEditor::new();
    editor.set_language(&builtin::c()).unwrap();
    editor.set_text(text);
    editor.flush_colorizer();
    editor
}

#[test]
fn test_block_comment_spans_lines() {
    common::init_logging();
    let editor = c_editor("a /* b\nc */ d");

    let lines = editor.buffer().lines();
    assert_eq!(comment_flags(&lines[0]), "..cccc");
    assert_eq!(comment_flags(&lines[1]), "cccc..");
    assert_eq!(
        lines[1].glyphs()[0].display_category(),
        SyntaxCategory::MultiLineComment
    );
    assert_eq!(lines[1].glyphs()[5].display_category(), SyntaxCategory::Identifier);
}

#[test]
fn test_comment_opener_inside_string_is_ignored() {
    let editor = c_editor("s = \"/*\";\nint x;");

    for line in editor.buffer().lines() {
        assert!(line.glyphs().iter().all(|g| !g.in_multiline_comment));
    }
    assert_eq!(
        editor.buffer().line(0).unwrap().glyphs()[4].category,
        SyntaxCategory::String
    );
}

#[test]
fn test_comment_opener_after_line_comment_still_opens_block() {
    let editor = c_editor("a // b /* c\nd */ e");
    let lines = editor.buffer().lines();
    assert_eq!(comment_flags(&lines[0]), ".......cccc");
    assert_eq!(comment_flags(&lines[1]), "cccc..");
    assert_eq!(lines[1].glyphs()[5].display_category(), SyntaxCategory::Identifier);
}

#[test]
fn test_unterminated_comment_runs_to_end() {
    let editor = c_editor("x /*\ny\nz");
    let lines = editor.buffer().lines();
    assert_eq!(comment_flags(&lines[1]), "c");
    assert_eq!(comment_flags(&lines[2]), "c");
}

#[test]
fn test_self_overlapping_delimiter_does_not_close() {
    let editor = c_editor("/*/ x\ny */ z");
    let lines = editor.buffer().lines();
    assert_eq!(comment_flags(&lines[0]), "ccccc");
    assert_eq!(comment_flags(&lines[1]), "cccc..");
}

#[test]
fn test_preprocessor_line() {
    let editor = c_editor("#define N 10");
    let glyphs = editor.buffer().line(0).unwrap().glyphs();

    assert_eq!(glyphs[0].category, SyntaxCategory::Preprocessor);
    assert_eq!(glyphs[6].category, SyntaxCategory::Preprocessor);
    assert_eq!(glyphs[8].category, SyntaxCategory::Identifier);
    assert_eq!(glyphs[10].category, SyntaxCategory::Number);
}

#[test]
fn test_lua_block_comment() {
    let mut editor = CodeEditor::new();
    editor.set_language(&builtin::lua()).unwrap();
    editor.set_text("x = 1 --[[ a\nb ]] y");
    editor.flush_colorizer();

    let lines = editor.buffer().lines();
    assert_eq!(comment_flags(&lines[0]), "......cccccc");
    assert_eq!(comment_flags(&lines[1]), "cccc..");
}

#[test]
fn test_basic8_block_comment_and_escape() {
    let mut editor = CodeEditor::new();
    editor.set_language(&builtin::basic8()).unwrap();
    editor.set_text("IF x THEN '[ a\nb '] y\n''[ z\nw");
    editor.flush_colorizer();

    let lines = editor.buffer().lines();
    assert_eq!(lines[0].glyphs()[0].category, SyntaxCategory::Keyword);
    assert_eq!(lines[0].glyphs()[5].category, SyntaxCategory::Keyword);
    assert_eq!(comment_flags(&lines[0]), "..........cccc");
    assert_eq!(comment_flags(&lines[1]), "cccc..");
    assert_eq!(comment_flags(&lines[2]), ".....");
    assert_eq!(comment_flags(&lines[3]), ".");
}

#[test]
fn test_sql_keywords_are_case_insensitive() {
    let mut editor = CodeEditor::new();
    editor.set_language(&builtin::sql()).unwrap();
    editor.set_text("select Count(*) from t");
    editor.flush_colorizer();

    let glyphs = editor.buffer().line(0).unwrap().glyphs();
    assert_eq!(glyphs[0].category, SyntaxCategory::Keyword);
    assert_eq!(glyphs[7].category, SyntaxCategory::KnownIdentifier);
    assert_eq!(glyphs[16].category, SyntaxCategory::Keyword);
}

#[test]
fn test_steps_are_bounded_and_multiline_pass_is_debounced() {
    common::init_logging();
    let config = EditorConfig::default()
        .with_colorize_batch_lines(2)
        .with_multiline_recheck_delay(3);
    let mut editor = CodeEditor::with_config(config);
    editor.set_language(&builtin::c()).unwrap();
    editor.set_text("/*\n1\n2\n3\n*/");

    assert_eq!(editor.colorizer_state().phase, ColorizerPhase::TokenizingRange);
    assert_eq!(
        editor.colorize_step(),
        Some(ColorizeOutcome::Tokenized { lines: 0..2 })
    );
    assert_eq!(
        editor.colorize_step(),
        Some(ColorizeOutcome::Tokenized { lines: 2..4 })
    );
    assert_eq!(
        editor.colorize_step(),
        Some(ColorizeOutcome::Tokenized { lines: 4..5 })
    );
    assert_eq!(
        editor.colorizer_state().phase,
        ColorizerPhase::AwaitingMultilineRecheck
    );

    assert_eq!(editor.colorize_step(), None);
    assert!(!editor.buffer().line(2).unwrap().glyphs()[0].in_multiline_comment);

    for _ in 0..4 {
        editor.advance_frame();
    }
    assert_eq!(editor.colorize_step(), Some(ColorizeOutcome::Multiline));
    assert!(editor.buffer().line(2).unwrap().glyphs()[0].in_multiline_comment);
    assert_eq!(editor.colorizer_state().phase, ColorizerPhase::Idle);
    assert_eq!(editor.colorize_step(), None);
}

#[test]
fn test_edit_marks_neighbouring_lines_dirty() {
    let mut editor = c_editor("a\nb\nc\nd\ne");
    assert_eq!(editor.colorizer_state().dirty_lines, None);

    editor.insert_at(Position::new(2, 0), "x").unwrap();
    assert_eq!(editor.colorizer_state().dirty_lines, Some(1..4));
}

#[test]
fn test_edit_retokenizes_line() {
    let mut editor = c_editor("in");
    assert_eq!(
        editor.buffer().line(0).unwrap().glyphs()[0].category,
        SyntaxCategory::Identifier
    );

    editor.set_cursor_position(Position::new(0, 2));
    editor.enter_character('t').unwrap();
    editor.flush_colorizer();
    assert_eq!(
        editor.buffer().line(0).unwrap().glyphs()[0].category,
        SyntaxCategory::Keyword
    );
}

#[test]
fn test_invalid_language_keeps_previous() {
    let mut editor = c_editor("int x;");
    let broken = glyph_edit::LanguageDefinition::new("Broken")
        .with_pattern("[unclosed", SyntaxCategory::Number);

    assert!(editor.set_language(&broken).is_err());
    assert_eq!(editor.language().name(), "C");
}
