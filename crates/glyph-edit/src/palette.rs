//! Color palettes for hosts that render glyphs.
//!
//! The engine itself never draws; it only tells the host which [`PaletteIndex`] a glyph or a
//! line marker maps to. Colors are packed `0xAABBGGRR`.

use crate::buffer::LineState;
use crate::glyph::Glyph;
use glyph_edit_lang::SyntaxCategory;

/// Number of palette slots.
pub const PALETTE_SIZE: usize = 24;

/// Palette slot: one per token category plus the non-text slots a renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PaletteIndex {
    /// Unclassified text.
    Default,
    /// Keywords.
    Keyword,
    /// Numbers.
    Number,
    /// Strings.
    String,
    /// Character literals.
    CharLiteral,
    /// Punctuation.
    Punctuation,
    /// Preprocessor directives.
    Preprocessor,
    /// Identifiers.
    Identifier,
    /// Known identifiers.
    KnownIdentifier,
    /// Preprocessor identifiers.
    PreprocIdentifier,
    /// Line comments.
    Comment,
    /// Block comments.
    MultiLineComment,
    /// Editor background.
    Background,
    /// Cursor.
    Cursor,
    /// Selection fill.
    Selection,
    /// Error marker line fill.
    ErrorMarker,
    /// Breakpoint line fill.
    Breakpoint,
    /// Line numbers.
    LineNumber,
    /// Current line fill.
    CurrentLineFill,
    /// Current line fill when unfocused.
    CurrentLineFillInactive,
    /// Current line border.
    CurrentLineEdge,
    /// Gutter marker for an edited line.
    LineEdited,
    /// Gutter marker for an edited line that was saved.
    LineEditedSaved,
    /// Gutter marker for an edited line that was reverted by undo.
    LineEditedReverted,
}

impl PaletteIndex {
    /// Slot for a glyph, honoring its block-comment flag.
    pub fn for_glyph(glyph: &Glyph) -> Self {
        glyph.display_category().into()
    }

    /// Gutter slot for a line's edit state; `None` for unchanged lines.
    pub fn for_line_state(state: LineState) -> Option<Self> {
        match state {
            LineState::Unchanged => None,
            LineState::Edited => Some(Self::LineEdited),
            LineState::EditedAndSaved => Some(Self::LineEditedSaved),
            LineState::EditedAndReverted => Some(Self::LineEditedReverted),
        }
    }
}

impl From<SyntaxCategory> for PaletteIndex {
    fn from(category: SyntaxCategory) -> Self {
        match category {
            SyntaxCategory::Default => Self::Default,
            SyntaxCategory::Keyword => Self::Keyword,
            SyntaxCategory::Number => Self::Number,
            SyntaxCategory::String => Self::String,
            SyntaxCategory::CharLiteral => Self::CharLiteral,
            SyntaxCategory::Punctuation => Self::Punctuation,
            SyntaxCategory::Preprocessor => Self::Preprocessor,
            SyntaxCategory::Identifier => Self::Identifier,
            SyntaxCategory::KnownIdentifier => Self::KnownIdentifier,
            SyntaxCategory::PreprocIdentifier => Self::PreprocIdentifier,
            SyntaxCategory::Comment => Self::Comment,
            SyntaxCategory::MultiLineComment => Self::MultiLineComment,
        }
    }
}

/// A full set of colors indexed by [`PaletteIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [u32; PALETTE_SIZE],
}

impl Palette {
    /// Build a palette from raw colors.
    pub const fn new(colors: [u32; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// Color of a slot.
    pub fn color(&self, index: PaletteIndex) -> u32 {
        self.colors[index as usize]
    }

    /// Replace the color of a slot.
    pub fn set_color(&mut self, index: PaletteIndex, color: u32) {
        self.colors[index as usize] = color;
    }

    /// Dark theme.
    pub const fn dark() -> Self {
        Self::new([
            0xffffffff, 0xffd69c56, 0xffa8ceb5, 0xff859dd6, 0xff70a0e0, 0xffb4b4b4, 0xff409090,
            0xffdadada, 0xffb0c94e, 0xffc040a0, 0xff4aa657, 0xff4aa657, 0xff2c2c2c, 0xffe0e0e0,
            0xffa06020, 0x804d00ff, 0x40f08000, 0xffaf912b, 0x40000000, 0x40808080, 0x40a0a0a0,
            0xff84f2ef, 0xff307457, 0xfffa955f,
        ])
    }

    /// Light theme.
    pub const fn light() -> Self {
        Self::new([
            0xff000000, 0xffff0c06, 0xff008000, 0xff2020a0, 0xff304070, 0xff000000, 0xff409090,
            0xff404040, 0xff606010, 0xffc040a0, 0xff205020, 0xff405020, 0xffffffff, 0xff000000,
            0xff600000, 0xa00010ff, 0x80f08000, 0xff505000, 0x40000000, 0x40808080, 0x40000000,
            0xff84f2ef, 0xff307457, 0xfffa955f,
        ])
    }

    /// Blue-background retro theme.
    pub const fn retro_blue() -> Self {
        Self::new([
            0xff00ffff, 0xffffff00, 0xff00ff00, 0xff808000, 0xff808000, 0xffffffff, 0xff008000,
            0xff00ffff, 0xffffffff, 0xffff00ff, 0xff808080, 0xff404040, 0xff800000, 0xff0080ff,
            0xffffff00, 0xa00000ff, 0x80ff8000, 0xff808000, 0x40000000, 0x40808080, 0x40000000,
            0xff84f2ef, 0xff307457, 0xfffa955f,
        ])
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_lookup() {
        let palette = Palette::dark();
        assert_eq!(palette.color(PaletteIndex::Background), 0xff2c2c2c);
        assert_eq!(
            palette.color(PaletteIndex::LineEditedReverted),
            0xfffa955f
        );
        assert_eq!(Palette::light().color(PaletteIndex::Background), 0xffffffff);
    }

    #[test]
    fn test_glyph_in_block_comment_maps_to_multiline_slot() {
        let mut glyph = Glyph::new('a');
        glyph.category = SyntaxCategory::Identifier;
        glyph.in_multiline_comment = true;
        assert_eq!(PaletteIndex::for_glyph(&glyph), PaletteIndex::MultiLineComment);
    }

    #[test]
    fn test_unchanged_lines_have_no_gutter_marker() {
        assert_eq!(PaletteIndex::for_line_state(LineState::Unchanged), None);
        assert_eq!(
            PaletteIndex::for_line_state(LineState::EditedAndSaved),
            Some(PaletteIndex::LineEditedSaved)
        );
    }
}
