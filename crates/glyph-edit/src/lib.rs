#![warn(missing_docs)]
//! Glyph Edit - Embeddable Plain-Text Editing Engine
//!
//! # Overview
//!
//! `glyph-edit` is the state half of a code editor widget: a line/glyph text buffer, cursor and
//! selection handling, a mergeable undo/redo log and an incremental regex colorizer. It draws
//! nothing. A host owns the window, calls the engine once per tick and renders the glyphs and
//! their categories however it likes.
//!
//! # Core Features
//!
//! - **Glyph Buffer**: every line is a vector of glyphs, each carrying one code point, its
//!   UTF-8 length and a syntax category
//! - **Clamped Coordinates**: any `(line, column)` passed in is sanitized, so no coordinate can
//!   make an operation fail
//! - **Undo Log**: inserts, deletes and block (un)indents with cursor state, coalescing of
//!   similar single-character edits, and a save point
//! - **Incremental Colorizer**: a bounded number of lines per tick plus a debounced whole
//!   document pass for block comments and multi-line strings
//! - **Language Definitions**: data from [`glyph_edit_lang`], compiled once when installed
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Commands & State Queries                   │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  CodeEditor (edits, cursor, clipboard)      │  ← Editing Engine
//! ├─────────────────────────────────────────────┤
//! │  Undo Log          │  Colorizer             │  ← History / Syntax
//! ├─────────────────────────────────────────────┤
//! │  TextBuffer (lines of glyphs)               │  ← Storage
//! ├─────────────────────────────────────────────┤
//! │  UTF-8 Codec                                │  ← Encoding
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use glyph_edit::{CodeEditor, Position, SyntaxCategory};
//! use glyph_edit_lang::builtin;
//!
//! let mut editor = CodeEditor::new();
//! editor.set_language(&builtin::c()).unwrap();
//! editor.set_text("int x; /* a\nb */ int y;");
//! editor.flush_colorizer();
//!
//! let first = editor.buffer().line(0).unwrap();
//! assert_eq!(first.glyphs()[0].category, SyntaxCategory::Keyword);
//!
//! let second = editor.buffer().line(1).unwrap();
//! assert!(second.glyphs()[0].in_multiline_comment);
//! assert!(!second.glyphs()[5].in_multiline_comment);
//!
//! editor.insert_at(Position::new(1, 0), "c").unwrap();
//! editor.undo(1).unwrap();
//! assert_eq!(editor.text(), "int x; /* a\nb */ int y;");
//! ```
//!
//! # Module Description
//!
//! - [`utf8`] - UTF-8 decoding and encoding of single code points
//! - [`buffer`] - Lines of glyphs and the coordinate system
//! - [`layout`] - Display cells: tab stops and wide characters
//! - [`undo`] - Undo records and the undo log
//! - [`language`] - Compiled language definitions
//! - [`colorize`] - Line tokenizer and the multi-line comment/string pass
//! - [`editor`] - The editing engine
//! - [`commands`] - Unified command interface
//! - [`state`] - State queries and change notifications
//! - [`palette`] - Color slots for renderers

pub mod buffer;
pub mod clipboard;
pub mod colorize;
pub mod commands;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod glyph;
pub mod language;
pub mod layout;
pub mod markers;
pub mod palette;
pub mod state;
pub mod undo;
pub mod utf8;

pub use buffer::{Line, LineState, Position, TextBuffer};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use colorize::{ColorizeOutcome, Colorizer, ColorizerPhase};
pub use commands::{
    Command, CommandError, CommandResult, CursorCommand, EditCommand, ViewCommand,
};
pub use config::EditorConfig;
pub use cursor::SelectionMode;
pub use editor::{CodeEditor, InsertResult};
pub use error::{EditError, LanguageError, MalformedEncoding};
pub use glyph::{Char, Glyph};
pub use language::CompiledLanguage;
pub use layout::ScreenPoint;
pub use markers::{LineMarkers, LineShift};
pub use palette::{PALETTE_SIZE, Palette, PaletteIndex};
pub use state::{
    ChangeDirection, ColorizerState, CursorState, DocumentState, StateChange,
    StateChangeCallback, StateChangeType, UndoRedoState,
};
pub use undo::{EditorState, IndentOp, UndoKind, UndoLog, UndoOp, UndoRecord};

pub use glyph_edit_lang::{LanguageDefinition, SyntaxCategory};
