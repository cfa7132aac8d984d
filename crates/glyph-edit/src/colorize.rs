//! Incremental colorizer.
//!
//! # Overview
//!
//! Colorizing runs in two independent passes, both driven by the host calling
//! [`Colorizer::step`] once per tick:
//!
//! 1. **Token pass**: re-tokenizes a dirty line range, at most a fixed batch of lines per step.
//!    Each line is flattened into a scratch string and the language's rules are tried in order
//!    at the scan position; the first non-empty match wins.
//! 2. **Multi-line pass**: after a debounce delay, walks the whole document once and flags every
//!    glyph inside a block comment span. Single-line tokenization cannot know whether a line
//!    starts inside a block comment, so this pass is the authority for that flag.
//!
//! The work left to do is plain state on the [`Colorizer`] (a dirty range and a recheck tick),
//! so a step can be resumed at any later call.

use crate::buffer::Line;
use crate::glyph::Glyph;
use crate::language::CompiledLanguage;
use glyph_edit_lang::SyntaxCategory;
use std::ops::Range;

/// What the colorizer still has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorizerPhase {
    /// Nothing pending.
    Idle,
    /// A dirty range is waiting for the token pass.
    TokenizingRange,
    /// Only the debounced multi-line pass is pending.
    AwaitingMultilineRecheck,
}

/// Result of one colorizer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorizeOutcome {
    /// These lines were re-tokenized.
    Tokenized {
        /// Lines processed in this step.
        lines: Range<usize>,
    },
    /// The multi-line pass ran over the whole document.
    Multiline,
}

/// Resumable colorizer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colorizer {
    range_min: usize,
    range_max: usize,
    recheck_at: Option<u64>,
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Colorizer {
    /// An idle colorizer.
    pub fn new() -> Self {
        Self {
            range_min: usize::MAX,
            range_max: 0,
            recheck_at: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ColorizerPhase {
        if self.range_min < self.range_max {
            ColorizerPhase::TokenizingRange
        } else if self.recheck_at.is_some() {
            ColorizerPhase::AwaitingMultilineRecheck
        } else {
            ColorizerPhase::Idle
        }
    }

    /// Lines still waiting for the token pass.
    pub fn dirty_range(&self) -> Option<Range<usize>> {
        (self.range_min < self.range_max).then_some(self.range_min..self.range_max)
    }

    /// Tick after which the multi-line pass runs.
    pub fn multiline_recheck_at(&self) -> Option<u64> {
        self.recheck_at
    }

    /// Mark `count` lines starting at `from_line` dirty and reschedule the multi-line pass for
    /// `now + delay`.
    pub fn invalidate(&mut self, from_line: usize, count: usize, now: u64, delay: u64) {
        let to = from_line.saturating_add(count);
        self.range_min = self.range_min.min(from_line);
        self.range_max = self.range_max.max(to);
        self.recheck_at = Some(now.saturating_add(delay));
    }

    /// Drop all pending work.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Run one unit of work.
    ///
    /// A due multi-line pass takes precedence; otherwise up to `batch` dirty lines are
    /// tokenized. Returns `None` when there was nothing to do.
    pub fn step(
        &mut self,
        lines: &mut [Line],
        language: &CompiledLanguage,
        now: u64,
        batch: usize,
    ) -> Option<ColorizeOutcome> {
        if self.recheck_at.is_some_and(|at| now > at) {
            scan_multiline(lines, language);
            self.recheck_at = None;
            tracing::debug!(lines = lines.len(), "multi-line pass complete");
            return Some(ColorizeOutcome::Multiline);
        }

        let range = self.tokenize_batch(lines, language, batch)?;
        Some(ColorizeOutcome::Tokenized { lines: range })
    }

    /// Tokenize every dirty line and run the multi-line pass immediately.
    pub fn run_to_completion(&mut self, lines: &mut [Line], language: &CompiledLanguage) {
        while self
            .tokenize_batch(lines, language, usize::MAX)
            .is_some()
        {}
        scan_multiline(lines, language);
        self.recheck_at = None;
    }

    fn tokenize_batch(
        &mut self,
        lines: &mut [Line],
        language: &CompiledLanguage,
        batch: usize,
    ) -> Option<Range<usize>> {
        if self.range_min >= self.range_max {
            return None;
        }
        let from = self.range_min.min(lines.len());
        let to = self
            .range_max
            .min(from.saturating_add(batch.max(1)))
            .min(lines.len());
        for line in &mut lines[from..to] {
            tokenize_line(&mut line.glyphs, language);
        }
        tracing::trace!(from, to, "tokenized line batch");

        self.range_min = to;
        if self.range_min >= self.range_max || self.range_min >= lines.len() {
            self.range_min = usize::MAX;
            self.range_max = 0;
        }
        Some(from..to)
    }
}

/// Re-tokenize one line in place.
///
/// Every glyph is first reset to [`SyntaxCategory::Default`]; block comment flags are left for
/// the multi-line pass.
pub fn tokenize_line(glyphs: &mut [Glyph], language: &CompiledLanguage) {
    for glyph in glyphs.iter_mut() {
        glyph.category = SyntaxCategory::Default;
    }
    if glyphs.is_empty() || language.rules().is_empty() {
        return;
    }

    let mut scratch = String::with_capacity(glyphs.len());
    let mut offsets = Vec::with_capacity(glyphs.len() + 1);
    for glyph in glyphs.iter() {
        offsets.push(scratch.len());
        scratch.push(glyph.value());
    }
    offsets.push(scratch.len());

    let mut in_preprocessor = false;
    let mut index = 0;
    while index < glyphs.len() {
        let rest = &scratch[offsets[index]..];
        let matched = language.rules().iter().find_map(|rule| {
            rule.regex
                .find(rest)
                .filter(|m| !m.is_empty())
                .map(|m| (m.end(), rule.category))
        });

        let Some((byte_len, category)) = matched else {
            index += 1;
            continue;
        };

        let token = &rest[..byte_len];
        let end = index + token.chars().count();
        let category = match category {
            SyntaxCategory::Identifier => language.classify_identifier(token, in_preprocessor),
            SyntaxCategory::Preprocessor => {
                in_preprocessor = true;
                category
            }
            other => other,
        };
        for glyph in &mut glyphs[index..end] {
            glyph.category = category;
        }
        index = end;
    }
}

fn delimiter_at(glyphs: &[Glyph], at: usize, delimiter: &[char]) -> bool {
    !delimiter.is_empty()
        && at + delimiter.len() <= glyphs.len()
        && glyphs[at..at + delimiter.len()]
            .iter()
            .zip(delimiter)
            .all(|(g, c)| g.value() == *c)
}

fn escaped(glyphs: &[Glyph], at: usize, escape: Option<char>) -> bool {
    match escape {
        Some(escape) if at > 0 => glyphs[at - 1].value() == escape,
        _ => false,
    }
}

/// Flag every glyph inside a block comment span, walking the document in order.
///
/// Strings delimited by `"` are tracked so that delimiters inside them are ignored; a doubled
/// quote or a backslash skips the next glyph. A string never opens inside a comment span or
/// inside a glyph the token pass classified as a line comment. A delimiter directly preceded by
/// the language's escape character does not count. The delimiter glyphs themselves are part of
/// the span.
pub fn scan_multiline(lines: &mut [Line], language: &CompiledLanguage) {
    let start = language.comment_start();
    let end = language.comment_end();
    let escape = language.comment_escape();

    let mut in_comment = false;
    let mut in_string = false;

    for line in lines.iter_mut() {
        let glyphs = &mut line.glyphs;
        // Earliest column where a closer may begin on this line, so that `/*/` does not close
        // itself.
        let mut close_from = 0;
        let mut i = 0;
        while i < glyphs.len() {
            let ch = glyphs[i].value();

            if in_string {
                glyphs[i].in_multiline_comment = false;
                let skip_next = match ch {
                    '"' => {
                        let doubled = glyphs.get(i + 1).is_some_and(|g| g.value() == '"');
                        if !doubled {
                            in_string = false;
                        }
                        doubled
                    }
                    '\\' => true,
                    _ => false,
                };
                if skip_next && i + 1 < glyphs.len() {
                    i += 1;
                    glyphs[i].in_multiline_comment = false;
                }
                i += 1;
                continue;
            }

            if !in_comment && ch == '"' && glyphs[i].category != SyntaxCategory::Comment {
                in_string = true;
                glyphs[i].in_multiline_comment = false;
                i += 1;
                continue;
            }

            if !in_comment && delimiter_at(glyphs, i, start) && !escaped(glyphs, i, escape) {
                in_comment = true;
                close_from = i + start.len();
            }

            glyphs[i].in_multiline_comment = in_comment;

            if in_comment && !end.is_empty() && i + 1 >= end.len() {
                let from = i + 1 - end.len();
                if from >= close_from
                    && delimiter_at(glyphs, from, end)
                    && !escaped(glyphs, from, escape)
                {
                    in_comment = false;
                }
            }
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_edit_lang::builtin;
    use pretty_assertions::assert_eq;

    fn line(text: &str) -> Line {
        Line::from_text(text)
    }

    fn categories(line: &Line) -> Vec<SyntaxCategory> {
        line.glyphs().iter().map(|g| g.category).collect()
    }

    fn flags(line: &Line) -> String {
        line.glyphs()
            .iter()
            .map(|g| if g.in_multiline_comment { 'c' } else { '.' })
            .collect()
    }

    #[test]
    fn test_keywords_numbers_punctuation() {
        let c = CompiledLanguage::compile(&builtin::c()).unwrap();
        let mut l = line("int x=42;");
        tokenize_line(&mut l.glyphs, &c);
        use SyntaxCategory::*;
        assert_eq!(
            categories(&l),
            vec![
                Keyword, Keyword, Keyword, Default, Identifier, Punctuation, Number, Number,
                Punctuation
            ]
        );
    }

    #[test]
    fn test_preprocessor_flag_applies_to_rest_of_line() {
        let c = CompiledLanguage::compile(&builtin::c()).unwrap();
        let mut l = line("#if defined");
        tokenize_line(&mut l.glyphs, &c);
        assert_eq!(l.glyphs[0].category, SyntaxCategory::Preprocessor);
        assert_eq!(l.glyphs[4].category, SyntaxCategory::Identifier);

        let mut l = line("#pragma undef");
        tokenize_line(&mut l.glyphs, &c);
        assert_eq!(l.glyphs[8].category, SyntaxCategory::PreprocIdentifier);
    }

    #[test]
    fn test_block_comment_span_across_lines() {
        let c = CompiledLanguage::compile(&builtin::c()).unwrap();
        let mut lines = vec![line("a /* b"), line("c */ d")];
        scan_multiline(&mut lines, &c);
        assert_eq!(flags(&lines[0]), "..cccc");
        assert_eq!(flags(&lines[1]), "cccc..");
    }

    #[test]
    fn test_delimiters_inside_strings_are_ignored() {
        let c = CompiledLanguage::compile(&builtin::c()).unwrap();
        let mut lines = vec![line(r#"s = "/*"; x"#)];
        scan_multiline(&mut lines, &c);
        assert_eq!(flags(&lines[0]), "...........");
    }

    #[test]
    fn test_opener_does_not_close_itself() {
        let c = CompiledLanguage::compile(&builtin::c()).unwrap();
        let mut lines = vec![line("/*/ x"), line("*/")];
        scan_multiline(&mut lines, &c);
        assert_eq!(flags(&lines[0]), "ccccc");
        assert_eq!(flags(&lines[1]), "cc");
    }

    #[test]
    fn test_step_respects_batch_and_recheck_delay() {
        let c = CompiledLanguage::compile(&builtin::c()).unwrap();
        let mut lines: Vec<Line> = (0..25).map(|_| line("int")).collect();
        let mut colorizer = Colorizer::new();
        colorizer.invalidate(0, 25, 0, 60);
        assert_eq!(colorizer.phase(), ColorizerPhase::TokenizingRange);

        assert_eq!(
            colorizer.step(&mut lines, &c, 1, 10),
            Some(ColorizeOutcome::Tokenized { lines: 0..10 })
        );
        assert_eq!(
            colorizer.step(&mut lines, &c, 2, 10),
            Some(ColorizeOutcome::Tokenized { lines: 10..20 })
        );
        assert_eq!(
            colorizer.step(&mut lines, &c, 3, 10),
            Some(ColorizeOutcome::Tokenized { lines: 20..25 })
        );
        assert_eq!(colorizer.phase(), ColorizerPhase::AwaitingMultilineRecheck);
        assert_eq!(colorizer.step(&mut lines, &c, 60, 10), None);
        assert_eq!(
            colorizer.step(&mut lines, &c, 61, 10),
            Some(ColorizeOutcome::Multiline)
        );
        assert_eq!(colorizer.phase(), ColorizerPhase::Idle);
        assert!(lines.iter().all(|l| l.glyphs[0].category == SyntaxCategory::Keyword));
    }
}
