//! Compiled language definitions.
//!
//! A [`LanguageDefinition`] is plain data. Installing it compiles every token pattern once into
//! an anchored [`Regex`] and, for case-insensitive languages, lowercases the lookup tables so
//! that classification only has to lowercase the matched token.

use crate::error::LanguageError;
use glyph_edit_lang::{Identifier, LanguageDefinition, SyntaxCategory};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// A compiled token pattern.
#[derive(Debug, Clone)]
pub struct TokenRule {
    /// Pattern anchored at the scan position.
    pub regex: Regex,
    /// Category of matched text.
    pub category: SyntaxCategory,
}

/// A language definition ready for the colorizer.
#[derive(Debug, Clone)]
pub struct CompiledLanguage {
    name: String,
    rules: Vec<TokenRule>,
    keywords: HashSet<String>,
    identifiers: HashMap<String, Identifier>,
    preproc_identifiers: HashMap<String, Identifier>,
    comment_start: Vec<char>,
    comment_end: Vec<char>,
    comment_escape: Option<char>,
    case_sensitive: bool,
}

impl Default for CompiledLanguage {
    fn default() -> Self {
        Self {
            name: "Plain Text".to_string(),
            rules: Vec::new(),
            keywords: HashSet::new(),
            identifiers: HashMap::new(),
            preproc_identifiers: HashMap::new(),
            comment_start: Vec::new(),
            comment_end: Vec::new(),
            comment_escape: None,
            case_sensitive: true,
        }
    }
}

impl CompiledLanguage {
    /// Compile a definition.
    ///
    /// Fails on the first empty or invalid pattern.
    pub fn compile(definition: &LanguageDefinition) -> Result<Self, LanguageError> {
        let case_sensitive = definition.case_sensitive;
        let rules = definition
            .token_patterns
            .iter()
            .map(|p| {
                if p.pattern.is_empty() {
                    return Err(LanguageError::EmptyPattern);
                }
                let regex = RegexBuilder::new(&format!("^(?:{})", p.pattern))
                    .case_insensitive(!case_sensitive)
                    .build()
                    .map_err(|e| LanguageError::InvalidPattern {
                        pattern: p.pattern.clone(),
                        message: e.to_string(),
                    })?;
                Ok(TokenRule {
                    regex,
                    category: p.category,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let fold = |s: &String| {
            if case_sensitive {
                s.clone()
            } else {
                s.to_lowercase()
            }
        };
        let has_block_comment = definition.has_block_comment();

        Ok(Self {
            name: definition.name.clone(),
            rules,
            keywords: definition.keywords.iter().map(fold).collect(),
            identifiers: definition
                .identifiers
                .iter()
                .map(|(k, v)| (fold(k), v.clone()))
                .collect(),
            preproc_identifiers: definition
                .preproc_identifiers
                .iter()
                .map(|(k, v)| (fold(k), v.clone()))
                .collect(),
            comment_start: if has_block_comment {
                definition.comment_start.chars().collect()
            } else {
                Vec::new()
            },
            comment_end: if has_block_comment {
                definition.comment_end.chars().collect()
            } else {
                Vec::new()
            },
            comment_escape: definition.comment_escape,
            case_sensitive,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token rules in priority order.
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// Block comment opener (empty when the language has none).
    pub fn comment_start(&self) -> &[char] {
        &self.comment_start
    }

    /// Block comment closer.
    pub fn comment_end(&self) -> &[char] {
        &self.comment_end
    }

    /// Delimiter escape character.
    pub fn comment_escape(&self) -> Option<char> {
        self.comment_escape
    }

    /// Whether lookups are case sensitive.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn normalize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(word.to_lowercase())
        }
    }

    /// Reclassify an `Identifier` token by table lookup.
    ///
    /// Outside a preprocessor directive the keyword table wins over known identifiers, which win
    /// over preprocessor identifiers. Inside a directive only preprocessor identifiers apply.
    pub fn classify_identifier(&self, word: &str, in_preprocessor: bool) -> SyntaxCategory {
        let word = self.normalize(word);
        let word = word.as_ref();
        if in_preprocessor {
            if self.preproc_identifiers.contains_key(word) {
                SyntaxCategory::PreprocIdentifier
            } else {
                SyntaxCategory::Identifier
            }
        } else if self.keywords.contains(word) {
            SyntaxCategory::Keyword
        } else if self.identifiers.contains_key(word) {
            SyntaxCategory::KnownIdentifier
        } else if self.preproc_identifiers.contains_key(word) {
            SyntaxCategory::PreprocIdentifier
        } else {
            SyntaxCategory::Identifier
        }
    }

    /// Declaration text for a classified identifier.
    pub fn declaration(&self, word: &str, category: SyntaxCategory) -> Option<&str> {
        let word = self.normalize(word);
        let table = match category {
            SyntaxCategory::KnownIdentifier => &self.identifiers,
            SyntaxCategory::PreprocIdentifier => &self.preproc_identifiers,
            _ => return None,
        };
        table.get(word.as_ref()).map(|id| id.declaration.as_str())
    }
}
