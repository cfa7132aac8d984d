#![warn(missing_docs)]
//! `glyph-edit-lang` - data-driven language definitions for `glyph-edit`.
//!
//! This crate intentionally stays lightweight and does **not** depend on a regex engine.
//! A [`LanguageDefinition`] is plain configuration data: an ordered list of token patterns,
//! keyword / identifier tables and block comment delimiters. The editor engine compiles it once
//! when it is installed.
//!
//! Built-in definitions are produced by factory functions (see [`builtin`]); every call returns
//! a fresh value and nothing is cached process-wide.

pub mod builtin;

use std::collections::{HashMap, HashSet};

/// Syntax category assigned to a glyph by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyntaxCategory {
    /// Unclassified text.
    #[default]
    Default,
    /// A reserved word of the language.
    Keyword,
    /// Numeric literal.
    Number,
    /// String literal.
    String,
    /// Character literal.
    CharLiteral,
    /// Operators and delimiters.
    Punctuation,
    /// Preprocessor directive (e.g. `#include`).
    Preprocessor,
    /// Any identifier that is not in one of the lookup tables.
    Identifier,
    /// Identifier found in the known-identifier table (built-in functions, types).
    KnownIdentifier,
    /// Identifier found in the preprocessor identifier table.
    PreprocIdentifier,
    /// Single-line comment.
    Comment,
    /// Block comment spanning one or more lines.
    MultiLineComment,
}

impl SyntaxCategory {
    /// Returns `true` for both comment categories.
    pub fn is_comment(self) -> bool {
        matches!(self, Self::Comment | Self::MultiLineComment)
    }
}

/// A known identifier together with the text a host may show for it (e.g. in a tooltip).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identifier {
    /// Human-readable declaration, e.g. `"Built-in function"`.
    pub declaration: String,
}

impl Identifier {
    /// Create an identifier entry with the given declaration text.
    pub fn new(declaration: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
        }
    }
}

/// A token pattern: a regular expression and the category of text it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPattern {
    /// Regex source, matched anchored at the current scan position.
    pub pattern: String,
    /// Category assigned to matched glyphs.
    pub category: SyntaxCategory,
}

/// Language configuration for the tokenizer and the multi-line comment scanner.
///
/// Token patterns are priority ordered: the first pattern that matches at a scan position wins,
/// so comment patterns must come before generic punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageDefinition {
    /// Display name.
    pub name: String,
    /// Reserved words; an `Identifier` match found here becomes `Keyword`.
    pub keywords: HashSet<String>,
    /// Known identifiers; an `Identifier` match found here becomes `KnownIdentifier`.
    pub identifiers: HashMap<String, Identifier>,
    /// Preprocessor identifiers; matched into `PreprocIdentifier`.
    pub preproc_identifiers: HashMap<String, Identifier>,
    /// Ordered token patterns.
    pub token_patterns: Vec<TokenPattern>,
    /// Block comment opening delimiter (e.g. `/*`). Empty disables block comments.
    pub comment_start: String,
    /// Block comment closing delimiter (e.g. `*/`).
    pub comment_end: String,
    /// A character that, directly preceding a delimiter, suppresses the delimiter match.
    pub comment_escape: Option<char>,
    /// Whether keyword and identifier lookups are case sensitive.
    pub case_sensitive: bool,
}

impl LanguageDefinition {
    /// Create an empty, case-sensitive definition with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            case_sensitive: true,
            ..Self::default()
        }
    }

    /// Add reserved words.
    pub fn with_keywords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords
            .extend(words.into_iter().map(Into::into).filter(|w| !w.is_empty()));
        self
    }

    /// Add known identifiers that all share one declaration text.
    pub fn with_identifiers<I, S>(mut self, names: I, declaration: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.identifiers
                .insert(name.into(), Identifier::new(declaration));
        }
        self
    }

    /// Add preprocessor identifiers that all share one declaration text.
    pub fn with_preproc_identifiers<I, S>(mut self, names: I, declaration: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.preproc_identifiers
                .insert(name.into(), Identifier::new(declaration));
        }
        self
    }

    /// Append a token pattern (lower priority than every pattern already added).
    pub fn with_pattern(mut self, pattern: impl Into<String>, category: SyntaxCategory) -> Self {
        self.token_patterns.push(TokenPattern {
            pattern: pattern.into(),
            category,
        });
        self
    }

    /// Set the block comment delimiters.
    pub fn with_block_comment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.comment_start = start.into();
        self.comment_end = end.into();
        self
    }

    /// Set the delimiter escape character.
    pub fn with_comment_escape(mut self, escape: char) -> Self {
        self.comment_escape = Some(escape);
        self
    }

    /// Set case sensitivity of keyword / identifier lookups.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Returns `true` if both block comment delimiters are configured.
    pub fn has_block_comment(&self) -> bool {
        !self.comment_start.is_empty() && !self.comment_end.is_empty()
    }
}
