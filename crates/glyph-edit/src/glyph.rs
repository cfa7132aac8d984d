//! Characters and glyphs.

use glyph_edit_lang::SyntaxCategory;

/// A decoded character together with the byte width it had in its source encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Char {
    value: char,
    encoded_len: u8,
}

impl Char {
    /// Wrap a decoded character, remembering how many source bytes it occupied.
    pub fn decoded(value: char, encoded_len: usize) -> Self {
        Self {
            value,
            encoded_len: encoded_len.clamp(1, 4) as u8,
        }
    }

    /// The character.
    pub fn value(self) -> char {
        self.value
    }

    /// Byte width in the source encoding (1..=4).
    pub fn encoded_len(self) -> usize {
        usize::from(self.encoded_len)
    }

    /// Returns `true` for space and tab.
    pub fn is_blank(self) -> bool {
        matches!(self.value, ' ' | '\t')
    }
}

impl From<char> for Char {
    fn from(value: char) -> Self {
        Self::decoded(value, value.len_utf8())
    }
}

/// One character cell of a line: the character, its token category and whether the multi-line
/// pass found it inside a block comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// The character.
    pub ch: Char,
    /// Category assigned by the token pass.
    pub category: SyntaxCategory,
    /// Set by the multi-line pass for glyphs inside a block comment span.
    pub in_multiline_comment: bool,
}

impl Glyph {
    /// A fresh, uncategorized glyph.
    pub fn new(ch: impl Into<Char>) -> Self {
        Self {
            ch: ch.into(),
            category: SyntaxCategory::Default,
            in_multiline_comment: false,
        }
    }

    /// The character value.
    pub fn value(&self) -> char {
        self.ch.value()
    }

    /// Category a renderer should color this glyph with: a line comment wins, then a block
    /// comment span, then the token category.
    pub fn display_category(&self) -> SyntaxCategory {
        if self.category == SyntaxCategory::Comment {
            SyntaxCategory::Comment
        } else if self.in_multiline_comment {
            SyntaxCategory::MultiLineComment
        } else {
            self.category
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_category_prefers_block_comment_over_token() {
        let mut glyph = Glyph::new('x');
        glyph.category = SyntaxCategory::Keyword;
        assert_eq!(glyph.display_category(), SyntaxCategory::Keyword);

        glyph.in_multiline_comment = true;
        assert_eq!(glyph.display_category(), SyntaxCategory::MultiLineComment);

        glyph.category = SyntaxCategory::Comment;
        assert_eq!(glyph.display_category(), SyntaxCategory::Comment);
    }

    #[test]
    fn test_char_remembers_source_width() {
        assert_eq!(Char::from('\u{e9}').encoded_len(), 2);
        assert_eq!(Char::decoded('\u{FFFD}', 1).encoded_len(), 1);
        assert!(Char::from('\t').is_blank());
        assert!(!Char::from('a').is_blank());
    }
}
