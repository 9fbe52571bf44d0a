// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// Turns a raw string into an ordered list of word tokens using
// Penn Treebank conventions, then normalises quote digraphs.
//
// Pipeline per call:
//   raw text
//     │  SentenceSplitter      → one slice per sentence
//     ▼
//   Treebank rules           → regex rewrites that pad punctuation
//     │                          with spaces, then split on whitespace
//     ▼
//   quote normalisation       → `''` → `"`  and  `` → `"`
//
// The Treebank rules render every double quote as an ASCII-art
// digraph: opening quotes become `` and closing quotes become ''.
// Mapping both back to a single `"` keeps token widths equal to
// the raw text so the aligner can walk characters and tokens in
// lockstep.
//
// Examples:
//   "The quick fox."   → The | quick | fox | .
//   "I can't go."      → I | ca | n't | go | .
//   "He said \"hi\"."  → He | said | " | hi | " | .
//
// Reference: Marcus et al. (1993) - Penn Treebank tokenisation
//            regex crate documentation (Regex::replace_all)

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::data::sentence_splitter::SentenceSplitter;
use crate::domain::traits::WordTokenizer;

/// A compiled rewrite: every match of the regex is replaced by
/// the template (`$1`, `$0` … refer to capture groups).
type Rule = (Regex, &'static str);

fn rule(pattern: &str, template: &'static str) -> Rule {
    (Regex::new(pattern).expect("static tokenizer pattern"), template)
}

// ─── Starting quotes ──────────────────────────────────────────────────────────
static STARTING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule(r"([«“‘„]|`+)", " $1 "),
        rule(r#"^""#, "``"),
        rule(r"(``)", " $1 "),
        rule(r#"([ (\[{<])("|'')"#, "$1 `` "),
    ]
});

/// `'x` where x is a lone word character: an opening single quote.
/// Clitics (`'m 't 's 'd 'n`) are left attached for the ending rules.
static OPENING_SINGLE_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(\w)\b").expect("static tokenizer pattern"));

// ─── Punctuation ──────────────────────────────────────────────────────────────
static PUNCTUATION: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule(r#"([^.])(\.)([\]\)}>"']*)\s*$"#, "$1 $2 $3 "),
        rule(r"([:,])([^\d])", " $1 $2"),
        rule(r"([:,])$", " $1 "),
        rule(r"\.{2,}", " $0 "),
        rule(r"[;@#$%&]", " $0 "),
        // final period again, after the padding above may have exposed it
        rule(r#"([^.])(\.)([\]\)}>"']*)\s*$"#, "$1 $2$3 "),
        rule(r"[?!]", " $0 "),
        rule(r"([^'])' ", "$1 ' "),
        rule(r"\*", " $0 "),
    ]
});

static PARENS_BRACKETS: Lazy<Rule> = Lazy::new(|| rule(r"[\]\[(){}<>]", " $0 "));

static DOUBLE_DASHES: Lazy<Rule> = Lazy::new(|| rule(r"--", " -- "));

// ─── Ending quotes and clitics ────────────────────────────────────────────────
static ENDING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule(r"([»”’])", " $1 "),
        rule(r"''", " '' "),
        rule(r#"""#, " '' "),
        rule(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        rule(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
    ]
});

// ─── Contractions ─────────────────────────────────────────────────────────────
static CONTRACTIONS: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule(r"(?i)\b(can)(not)\b", " $1 $2 "),
        rule(r"(?i)\b(d)('ye)\b", " $1 $2 "),
        rule(r"(?i)\b(gim)(me)\b", " $1 $2 "),
        rule(r"(?i)\b(gon)(na)\b", " $1 $2 "),
        rule(r"(?i)\b(got)(ta)\b", " $1 $2 "),
        rule(r"(?i)\b(lem)(me)\b", " $1 $2 "),
        rule(r"(?i)\b(more)('n)\b", " $1 $2 "),
        rule(r"(?i)\b(wan)(na)(\s)", " $1 $2 $3"),
        rule(r"(?i) ('t)(is)\b", " $1 $2 "),
        rule(r"(?i) ('t)(was)\b", " $1 $2 "),
    ]
});

fn apply(rule: &Rule, text: String) -> String {
    let (re, template) = rule;
    re.replace_all(&text, *template).into_owned()
}

/// Replace the Treebank quote digraphs with a plain double quote.
/// A genuine `"` is never touched, so normalising twice is a no-op.
pub fn normalize_quotes(token: &str) -> String {
    token.replace("''", "\"").replace("``", "\"")
}

/// Treebank-style word tokenizer with sentence splitting and
/// quote-digraph normalisation.
pub struct TreebankTokenizer {
    splitter: SentenceSplitter,
}

impl TreebankTokenizer {
    pub fn new() -> Self {
        Self { splitter: SentenceSplitter::new() }
    }

    /// Apply the Treebank rules to one sentence and return the raw
    /// tokens (quote digraphs still in place).
    pub fn tokenize_sentence(&self, sentence: &str) -> Vec<String> {
        let mut text = sentence.to_string();

        for r in STARTING_QUOTES.iter() {
            text = apply(r, text);
        }
        text = OPENING_SINGLE_QUOTE
            .replace_all(&text, |caps: &Captures| {
                let word_char = &caps[1];
                match word_char.to_lowercase().as_str() {
                    "m" | "t" | "s" | "d" | "n" => caps[0].to_string(),
                    _ => format!("' {word_char}"),
                }
            })
            .into_owned();

        for r in PUNCTUATION.iter() {
            text = apply(r, text);
        }
        text = apply(&PARENS_BRACKETS, text);
        text = apply(&DOUBLE_DASHES, text);

        // pad both ends so the ending rules can anchor on spaces
        text = format!(" {text} ");

        for r in ENDING_QUOTES.iter() {
            text = apply(r, text);
        }
        for r in CONTRACTIONS.iter() {
            text = apply(r, text);
        }

        text.split_whitespace().map(str::to_string).collect()
    }
}

impl WordTokenizer for TreebankTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.splitter
            .split(text)
            .into_iter()
            .flat_map(|sentence| self.tokenize_sentence(sentence))
            .map(|token| normalize_quotes(&token))
            .collect()
    }
}

impl Default for TreebankTokenizer {
    fn default() -> Self {
        Self::new()
    }
}
