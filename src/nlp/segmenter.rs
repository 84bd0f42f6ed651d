//! Rule-based sentence segmentation
//!
//! Splits extracted text into sentence spans. Terminal punctuation (`.`, `!`,
//! `?`, `…`) ends a sentence when it is followed by whitespace or the end of
//! the text, unless the period belongs to a known abbreviation, an initial,
//! or a list enumerator.
//!
//! Line breaks from OCR/PDF extraction are mostly noise. Any newline run
//! followed by a lowercase word, a digit or punctuation is a soft join, even
//! across a blank line or page break. Otherwise a blank line is a hard break,
//! and a single newline breaks only when the pending line looks like a
//! heading.

use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::types::{Document, Sentence, StringPool};
use rustc_hash::FxHashSet;
use std::ops::Range;

/// Abbreviations that never end a sentence.
const NON_TERMINAL_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "rev", "gen", "col", "capt", "lt", "sgt", "hon",
    "gov", "sen", "rep", "messrs", "mt", "e.g", "i.e", "vs", "cf", "viz", "approx", "eds", "dept",
    "ca",
];

/// Abbreviations only when a number follows ("No. 5", "p. 12").
const NUMBER_PREFIXES: &[&str] = &["no", "nos", "p", "pp", "vol", "fig", "figs"];

/// Abbreviations that end a sentence only when a capitalized word follows.
const TERMINAL_ABBREVIATIONS: &[&str] = &[
    "etc", "inc", "ltd", "co", "corp", "jr", "llc", "bros", "jan", "feb", "mar", "apr", "jun",
    "jul", "aug", "sep", "sept", "oct", "nov", "dec", "st", "ed", "est", "al", "min", "max",
];

const CLOSERS: &[char] = &['"', '\'', '\u{201d}', '\u{2019}', ')', ']', '\u{bb}'];

/// Heading lines longer than this are treated as wrapped prose.
const HEADING_MAX_WORDS: usize = 6;

/// Bare numbers up to this many digits followed by a period open a list item.
const ENUMERATOR_MAX_DIGITS: usize = 2;

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\u{2026}')
}

/// One-letter token with a trailing period, as in "R."
fn is_initial_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.'), None) if letter.is_uppercase()
    )
}

/// Whether a single capital before a period is a name initial.
///
/// `before` is the segment text preceding the letter, `rest` the text after
/// the period. "J. R. Tolkien" and "John F. Kennedy" qualify; "plan B." and
/// the pronoun "I." do not.
fn is_initial(letter: char, before: &str, rest: &str) -> bool {
    if !letter.is_uppercase() || letter == 'I' {
        return false;
    }
    if rest.split_whitespace().next().is_some_and(is_initial_token) {
        return true;
    }
    match before.split_whitespace().next_back() {
        None => true,
        Some(prev) => prev
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .starts_with(char::is_uppercase),
    }
}

/// Rule-based sentence boundary detector
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    non_terminal: FxHashSet<String>,
    number_prefixes: FxHashSet<String>,
    terminal: FxHashSet<String>,
    tokenizer: Tokenizer,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter {
    /// Create a segmenter with the built-in English abbreviation lists
    pub fn new() -> Self {
        Self {
            non_terminal: NON_TERMINAL_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
            number_prefixes: NUMBER_PREFIXES.iter().map(|s| s.to_string()).collect(),
            terminal: TERMINAL_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
            tokenizer: Tokenizer::new(),
        }
    }

    /// Register additional abbreviations that never end a sentence.
    ///
    /// Entries are given without the trailing period ("approx", "e.g").
    pub fn with_abbreviations(mut self, abbreviations: &[&str]) -> Self {
        for abbr in abbreviations {
            self.non_terminal
                .insert(abbr.trim_end_matches('.').to_lowercase());
        }
        self
    }

    /// Segment `text` into a [`Document`].
    ///
    /// Each sentence keeps its byte span into the document buffer and its
    /// normalized content terms. Numeric tokens are kept even when listed as
    /// stopwords.
    pub fn segment(&self, text: impl Into<String>, stopwords: &StopwordFilter) -> Document {
        let text = text.into();
        let spans = self.split(&text);
        let mut vocabulary = StringPool::with_capacity(spans.len() * 8);

        let sentences = spans
            .into_iter()
            .enumerate()
            .map(|(index, span)| {
                let mut word_count = 0;
                let mut terms = Vec::new();
                for (_, word) in self.tokenizer.words(&text[span.clone()]) {
                    word_count += 1;
                    let term = self.tokenizer.normalize(word);
                    if self.tokenizer.is_numeric(&term) || !stopwords.is_stopword(&term) {
                        terms.push(vocabulary.intern(&term));
                    }
                }
                Sentence::new(index, span, terms, word_count)
            })
            .collect();

        Document::from_parts(text, sentences, vocabulary)
    }

    /// Split `text` into trimmed, non-empty sentence spans in order.
    pub fn split(&self, text: &str) -> Vec<Range<usize>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let byte_at = |i: usize| chars.get(i).map_or(text.len(), |&(pos, _)| pos);

        let mut spans = Vec::new();
        let mut seg_start: Option<usize> = None;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];

            let start = match seg_start {
                Some(start) => start,
                None if c.is_whitespace() => {
                    i += 1;
                    continue;
                }
                None => {
                    seg_start = Some(pos);
                    pos
                }
            };

            if c == '\n' {
                let mut j = i;
                let mut newlines = 0;
                while j < chars.len() && chars[j].1.is_whitespace() {
                    if chars[j].1 == '\n' {
                        newlines += 1;
                    }
                    j += 1;
                }
                let hard_break = match chars.get(j).map(|&(_, n)| n) {
                    None => false,
                    Some(n) if n.is_lowercase() || n.is_ascii_digit() => false,
                    Some(n) if !n.is_alphanumeric() => false,
                    Some(_) if newlines >= 2 => true,
                    Some(n) => n.is_uppercase() && self.is_heading_line(&text[start..pos]),
                };
                if hard_break {
                    self.push_span(text, start..pos, &mut spans);
                    seg_start = None;
                }
                i = j;
                continue;
            }

            if is_terminal(c) {
                let mut j = i + 1;
                while j < chars.len() && is_terminal(chars[j].1) {
                    j += 1;
                }
                let single_period = c == '.' && j == i + 1;
                while j < chars.len() && CLOSERS.contains(&chars[j].1) {
                    j += 1;
                }

                let followed_by_space = chars.get(j).map_or(true, |&(_, n)| n.is_whitespace());
                if followed_by_space {
                    let rest = &text[byte_at(j)..];
                    let next_word = rest.trim_start().chars().next();
                    let boundary = match c {
                        '.' if single_period => self.period_ends_sentence(text, start, pos, rest),
                        '.' | '\u{2026}' => next_word.map_or(true, |n| !n.is_lowercase()),
                        _ => true,
                    };
                    if boundary {
                        self.push_span(text, start..byte_at(j), &mut spans);
                        seg_start = None;
                    }
                }
                i = j;
                continue;
            }

            i += 1;
        }

        if let Some(start) = seg_start {
            self.push_span(text, start..text.len(), &mut spans);
        }

        spans
    }

    fn period_ends_sentence(
        &self,
        text: &str,
        seg_start: usize,
        period: usize,
        rest: &str,
    ) -> bool {
        let Some(next) = rest.trim_start().chars().next() else {
            return true;
        };
        if next.is_lowercase() {
            return false;
        }

        let word_start = text[seg_start..period]
            .rmatch_indices(char::is_whitespace)
            .next()
            .map_or(seg_start, |(p, ws)| seg_start + p + ws.len());
        let word = text[word_start..period].trim_start_matches(|c: char| !c.is_alphanumeric());
        if word.is_empty() {
            return true;
        }

        let lower = word.to_lowercase();
        if self.non_terminal.contains(&lower) {
            return false;
        }
        if self.number_prefixes.contains(&lower) && next.is_ascii_digit() {
            return false;
        }

        let mut letters = word.chars();
        if let (Some(first), None) = (letters.next(), letters.next()) {
            if is_initial(first, &text[seg_start..word_start], rest) {
                return false;
            }
        }

        if self.terminal.contains(&lower) || word.contains('.') {
            return next.is_uppercase();
        }

        let is_enumerator = word_start == seg_start
            && word.len() <= ENUMERATOR_MAX_DIGITS
            && word.chars().all(|c| c.is_ascii_digit());
        !is_enumerator
    }

    fn is_heading_line(&self, line: &str) -> bool {
        let line = line.trim();
        !line.contains('\n')
            && !line.ends_with(|c: char| matches!(c, ',' | ';' | '-' | '\u{2014}'))
            && self.tokenizer.word_count(line) <= HEADING_MAX_WORDS
    }

    fn push_span(&self, text: &str, span: Range<usize>, spans: &mut Vec<Range<usize>>) {
        let slice = &text[span.clone()];
        let trimmed = slice.trim_end();
        if !trimmed.chars().any(char::is_alphanumeric) {
            return;
        }
        spans.push(span.start..span.start + trimmed.len());
    }
}
