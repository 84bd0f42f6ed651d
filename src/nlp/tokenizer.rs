//! Word tokenization
//!
//! Splits sentence text into word tokens and normalizes them for
//! vectorization. A word is a run of alphanumeric characters; apostrophes
//! between letters ("don't") and separators inside numbers ("3.14", "1,000")
//! stay part of the word.

/// Word tokenizer and normalizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Iterate over `(byte_offset, word)` pairs in `text`
    pub fn words<'a>(&self, text: &'a str) -> Words<'a> {
        Words { text, pos: 0 }
    }

    /// Count the word tokens in `text`
    pub fn word_count(&self, text: &str) -> usize {
        self.words(text).count()
    }

    /// Lowercase a word and fold typographic apostrophes
    pub fn normalize(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if lower.contains('\u{2019}') {
            lower.replace('\u{2019}', "'")
        } else {
            lower
        }
    }

    /// Check whether a token is purely numeric
    pub fn is_numeric(&self, word: &str) -> bool {
        word.chars().any(|c| c.is_ascii_digit())
            && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    }
}

/// Iterator over the words of a string, see [`Tokenizer::words`]
#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let (offset, _) = rest.char_indices().find(|(_, c)| c.is_alphanumeric())?;
        let start = self.pos + offset;
        let mut end = start;

        let mut chars = self.text[start..].char_indices().peekable();
        let mut prev: Option<char> = None;
        while let Some((i, c)) = chars.next() {
            if c.is_alphanumeric() {
                end = start + i + c.len_utf8();
                prev = Some(c);
                continue;
            }

            let next = chars.peek().map(|&(_, n)| n);
            let joins = match c {
                '\'' | '\u{2019}' => {
                    prev.is_some_and(char::is_alphabetic) && next.is_some_and(char::is_alphabetic)
                }
                '.' | ',' => {
                    prev.is_some_and(|p| p.is_ascii_digit()) && next.is_some_and(|n| n.is_ascii_digit())
                }
                _ => false,
            };
            if !joins {
                break;
            }
            prev = Some(c);
        }

        self.pos = end;
        Some((start, &self.text[start..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        Tokenizer::new().words(text).map(|(_, w)| w).collect()
    }

    #[test]
    fn test_basic_words() {
        assert_eq!(
            words("Alice went to the market."),
            vec!["Alice", "went", "to", "the", "market"]
        );
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "  Bob, called!";
        let tokens: Vec<_> = Tokenizer::new().words(text).collect();
        assert_eq!(tokens, vec![(2, "Bob"), (7, "called")]);
    }

    #[test]
    fn test_apostrophes_and_numbers_stay_joined() {
        assert_eq!(words("don't stop"), vec!["don't", "stop"]);
        assert_eq!(words("it costs 3.14 or 1,000"), vec!["it", "costs", "3.14", "or", "1,000"]);
        assert_eq!(words("the end."), vec!["the", "end"]);
        assert_eq!(words("'quoted'"), vec!["quoted"]);
    }

    #[test]
    fn test_hyphen_splits() {
        assert_eq!(words("well-known fact"), vec!["well", "known", "fact"]);
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(words("Café naïve résumé"), vec!["Café", "naïve", "résumé"]);
    }

    #[test]
    fn test_normalize_and_numeric() {
        let t = Tokenizer::new();
        assert_eq!(t.normalize("Don\u{2019}t"), "don't");
        assert_eq!(t.normalize("APPLES"), "apples");
        assert!(t.is_numeric("2024"));
        assert!(t.is_numeric("3.14"));
        assert!(!t.is_numeric("v2"));
        assert!(!t.is_numeric("..."));
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(words("").is_empty());
        assert!(words(" ... !!! ").is_empty());
        assert_eq!(Tokenizer::new().word_count("one two  three"), 3);
    }
}
