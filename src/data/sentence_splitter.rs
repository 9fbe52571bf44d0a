// ============================================================
// Layer 4 — Sentence Splitter
// ============================================================
// Splits a context passage into sentences before word
// tokenisation.
//
// Why split sentences first?
//   The Treebank word rules only detach the period at the very
//   END of their input. Without sentence splitting, every
//   interior full stop would stay glued to its word:
//     "It rained. We left."  →  "rained." stays one token
//   Running the word rules per sentence gives
//     It | rained | . | We | left | .
//
// Boundary rules (Punkt-style heuristics, no trained model):
//   - A boundary follows `.`, `?` or `!` (plus any closing
//     quotes / brackets) when whitespace comes next
//   - A `.` boundary is rejected when the word before it is
//       * a known abbreviation       (Mr. Dr. etc.)
//       * a single letter            (J. R. R. Tolkien)
//       * dotted internally          (U.S. e.g.)
//       * a number followed by a lowercase word  (in 1990. the)
//   - After an ordinary word `.` always ends the sentence,
//     whatever case the next word has
//
// Reference: Kiss & Strunk (2006) - Punkt sentence boundary detection
//            Rust Book §8 (Strings), §13 (Iterators)

use std::collections::HashSet;

/// Common English abbreviations that end in a period but
/// almost never end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "inc", "ltd",
    "co", "corp", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
    "nov", "dec", "no", "vol", "fig", "gen", "gov", "sen", "rep", "rev", "col", "lt",
    "sgt", "capt", "approx", "dept", "est", "ca", "cf", "al",
];

/// Characters that may trail a sentence terminator and still
/// belong to the sentence: `"He left."` keeps its closing quote.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '’', '”', '»'];

/// Characters stripped from the front of the word before a period
/// when checking it against the abbreviation rules.
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '“', '‘', '«', '`'];

pub struct SentenceSplitter {
    abbreviations: HashSet<&'static str>,
}

impl SentenceSplitter {
    pub fn new() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
        }
    }

    /// Split `text` into trimmed, non-empty sentences.
    /// The returned slices borrow from `text` and appear in order.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let n                         = chars.len();

        let mut sentences = Vec::new();
        let mut start     = 0usize; // byte offset of the current sentence
        let mut i         = 0usize; // char index

        while i < n {
            let c = chars[i].1;
            if !matches!(c, '.' | '?' | '!') {
                i += 1;
                continue;
            }

            // ── Consume the terminator run ("?!", "...") and closers ──────────
            let mut j         = i;
            let mut last_term = c;
            while j < n && matches!(chars[j].1, '.' | '?' | '!') {
                last_term = chars[j].1;
                j += 1;
            }
            while j < n && CLOSERS.contains(&chars[j].1) {
                j += 1;
            }

            // A boundary needs whitespace (or end of text) right after
            if j < n && !chars[j].1.is_whitespace() {
                i = j;
                continue;
            }
            if j == n {
                break;
            }

            let boundary = last_term != '.' || self.period_ends_sentence(text, &chars, i, j);
            if boundary {
                let end      = chars[j].0;
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
            i = j;
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail);
        }

        sentences
    }

    /// Decide whether the period run starting at char `i` closes a
    /// sentence. `j` is the first whitespace char after the run.
    fn period_ends_sentence(
        &self,
        text:  &str,
        chars: &[(usize, char)],
        i:     usize,
        j:     usize,
    ) -> bool {
        // ── Word before the period ────────────────────────────────────────────
        let mut w = i;
        while w > 0 && !chars[w - 1].1.is_whitespace() {
            w -= 1;
        }
        let word = text[chars[w].0..chars[i].0].trim_start_matches(OPENERS);

        // ── Number: a lowercase next word keeps the sentence open ─────────────
        if is_number(word) {
            let next = chars[j..]
                .iter()
                .map(|&(_, c)| c)
                .find(|c| !c.is_whitespace() && !OPENERS.contains(c));

            return !matches!(next, Some(c) if c.is_lowercase());
        }

        // ── Abbreviation, initial or dotted word ──────────────────────────────
        if self.abbreviations.contains(word.to_lowercase().as_str()) {
            return false;
        }

        let mut word_chars = word.chars();
        if let (Some(only), None) = (word_chars.next(), word_chars.next()) {
            if only.is_alphabetic() {
                return false;
            }
        }

        // anything else ends the sentence whatever the next word looks like
        !word.contains('.')
    }
}

/// `1990`, `3.5`, `-12`, `1,000`: a digit-led run of digits and
/// separators, optionally signed or led by `.`/`,`.
fn is_number(word: &str) -> bool {
    let body = word.strip_prefix('-').unwrap_or(word);
    let body = body.strip_prefix(&['.', ','][..]).unwrap_or(body);

    let mut chars = body.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_digit())
        && chars.all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        SentenceSplitter::new().split(text)
    }

    #[test]
    fn test_splits_on_full_stop() {
        assert_eq!(split("It rained. We left."), vec!["It rained.", "We left."]);
    }

    #[test]
    fn test_question_and_exclamation_marks() {
        assert_eq!(split("Is it? Yes! Fine"), vec!["Is it?", "Yes!", "Fine"]);
    }

    #[test]
    fn test_abbreviation_does_not_split() {
        assert_eq!(split("Mr. Smith went home."), vec!["Mr. Smith went home."]);
    }

    #[test]
    fn test_initials_and_dotted_words_do_not_split() {
        assert_eq!(split("J. Smith joined the U.S. Army."), vec!["J. Smith joined the U.S. Army."]);
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        assert_eq!(split("It weighs approx. ten tons."), vec!["It weighs approx. ten tons."]);
    }

    #[test]
    fn test_ordinary_word_splits_regardless_of_next_case() {
        assert_eq!(split("The end. and more"), vec!["The end.", "and more"]);
        assert_eq!(split("Born in 1990. 5 years later"), vec!["Born in 1990.", "5 years later"]);
    }

    #[test]
    fn test_number_before_lowercase_does_not_split() {
        assert_eq!(split("It cost 3.5. the rest"), vec!["It cost 3.5. the rest"]);
        assert_eq!(split("It cost 3.5. Then more"), vec!["It cost 3.5.", "Then more"]);
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("1990"));
        assert!(is_number("1,000"));
        assert!(is_number("-.5"));
        assert!(!is_number("end"));
        assert!(!is_number("B52"));
    }

    #[test]
    fn test_decimal_number_does_not_split() {
        assert_eq!(split("It cost 3.5 dollars."), vec!["It cost 3.5 dollars."]);
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        assert_eq!(
            split("He said \"stop.\" Then he left."),
            vec!["He said \"stop.\"", "Then he left."]
        );
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert!(split("").is_empty());
        assert!(split("   \n ").is_empty());
    }
}
