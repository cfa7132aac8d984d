mod common;

use glyph_edit::utf8::{self, REPLACEMENT};
use glyph_edit::{CodeEditor, MalformedEncoding};
use pretty_assertions::assert_eq;

#[test]
fn test_decode_reports_encoded_lengths() {
    common::init_logging();
    let chars = utf8::decode("aé中😀".as_bytes());
    let lengths: Vec<usize> = chars.iter().map(|c| c.encoded_len()).collect();
    assert_eq!(lengths, vec![1, 2, 3, 4]);
}

#[test]
fn test_malformed_sequences() {
    assert_eq!(
        utf8::try_decode_one(&[]),
        Err(MalformedEncoding { consumed: 0 })
    );
    // Overlong encoding of '/'.
    assert_eq!(
        utf8::try_decode_one(&[0xC0, 0xAF]),
        Err(MalformedEncoding { consumed: 1 })
    );
    // Surrogate half.
    assert_eq!(
        utf8::try_decode_one(&[0xED, 0xA0, 0x80]),
        Err(MalformedEncoding { consumed: 1 })
    );
    // Truncated three-byte sequence.
    assert_eq!(
        utf8::try_decode_one(&[0xE4, 0xB8]),
        Err(MalformedEncoding { consumed: 2 })
    );
    assert_eq!(utf8::decode_one(&[0xF5, b'a']), (REPLACEMENT, 1));
}

#[test]
fn test_malformed_bytes_become_replacement_glyphs() {
    let mut editor = CodeEditor::new();
    editor.set_text([b'a', 0xFF, b'b'].as_slice());
    assert_eq!(editor.text(), "a\u{FFFD}b");
    assert_eq!(editor.columns_at(0), 3);
}

#[test]
fn test_encode_one_rejects_invalid_scalars() {
    assert_eq!(utf8::encode_one(0x41).as_bytes(), b"A");
    assert_eq!(utf8::encode_one(0x20AC).as_bytes(), "€".as_bytes());
    assert!(utf8::encode_one(0xD800).is_empty());
    assert!(utf8::encode_one(0x11_0000).is_empty());
}
