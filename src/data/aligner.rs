// ============================================================
// Layer 4 — Offset Aligner
// ============================================================
// Maps an answer given as a CHARACTER span of the raw context
// onto a WORD-TOKEN span of the tokenised context.
//
// Why is this non-trivial?
//   Tokenisation is lossy. Whitespace disappears and quote
//   characters are rewritten, so character offsets in the raw
//   string do not line up with token boundaries directly.
//
// How it works:
//   Walk the tokens in order while moving a character cursor `l`
//   through the raw context:
//     1. skip any "abnormal" whitespace the tokenizer dropped
//     2. patch the width of a `"` token that stands for a raw `''`
//     3. advance `l` by the token's width
//     4. the first token whose end passes the answer start is
//        the start token; the first token whose end reaches the
//        answer end is the end token (and the walk stops)
//
// Example:
//   context: "The quick fox."     answer "quick" at char 4
//   tokens:  The | quick | fox | .
//   cursor:    3      9     13   14
//   start: first l > 4  → token 1
//   end:   first l >= 9 → token 1
//
// The walk is linear and never backtracks.
//
// Out-of-range answers (offset beyond the scanned width) are
// clamped to the last token; see `AlignmentOutcome`.
//
// Reference: Seo et al. (2017) - BiDAF preprocessing
//            Rust Book §8 (Slices), §6 (Enums)

/// Characters the tokenizer drops silently. The cursor skips
/// these so it stays in step with the raw string.
///
/// Tabs and other whitespace are NOT in this set; contexts using
/// them drift, matching the existing `.jsonl` datasets.
pub const ABNORMAL_CHARS: [char; 5] = [' ', '\n', '\u{3000}', '\u{202f}', '\u{2009}'];

/// A resolved, inclusive token span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end:   usize,
}

/// Whether the span came straight from the scan or had to be
/// clamped because the raw offsets ran past the tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentOutcome {
    Exact,
    Clamped,
}

/// Result of aligning one answer candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub span:    TokenSpan,
    pub outcome: AlignmentOutcome,
}

/// Aligns answers against one context and its tokens.
///
/// The context is decoded into chars once so every answer of a
/// paragraph reuses the same buffer.
pub struct OffsetAligner<'a> {
    context: Vec<char>,
    tokens:  &'a [String],
}

impl<'a> OffsetAligner<'a> {
    pub fn new(context: &str, tokens: &'a [String]) -> Self {
        Self {
            context: context.chars().collect(),
            tokens,
        }
    }

    /// Convert the raw character span `[answer_start, answer_end)`
    /// into an inclusive token span.
    pub fn align(&self, answer_start: usize, answer_end: usize) -> Alignment {
        let mut l           = 0usize;
        let mut start_token = None;
        let mut end_token   = None;

        for (i, token) in self.tokens.iter().enumerate() {
            // ── Step 1: skip dropped whitespace ───────────────────────────────
            while l < self.context.len() && ABNORMAL_CHARS.contains(&self.context[l]) {
                l += 1;
            }

            // ── Step 2: advance by the (patched) token width ──────────────────
            l += self.token_width(token, l);

            // ── Step 3: first token past the start / reaching the end ─────────
            if start_token.is_none() && l > answer_start {
                start_token = Some(i);
            }
            if l >= answer_end {
                end_token = Some(i);
                break;
            }
        }

        self.resolve(start_token, end_token)
    }

    /// Width of `token` in raw characters when it sits at cursor `l`.
    ///
    /// The tokenizer maps a raw `''` to a single `"`, so a token that
    /// starts with `"` where the raw text reads `''` is one char wider
    /// than it looks.
    fn token_width(&self, token: &str, l: usize) -> usize {
        let width = token.chars().count();
        let raw_digraph = self.context.get(l..l + 2) == Some(&['\'', '\''][..]);

        if token.starts_with('"') && raw_digraph {
            width + 1
        } else {
            width
        }
    }

    /// Turn the scan result into a valid span.
    ///
    /// If the end was never reached the span is clamped to the last
    /// token (index 0 for an empty token list). A start that was
    /// never found collapses onto the end, so `start <= end` holds.
    fn resolve(&self, start_token: Option<usize>, end_token: Option<usize>) -> Alignment {
        let last = self.tokens.len().saturating_sub(1);

        match (start_token, end_token) {
            (Some(start), Some(end)) => Alignment {
                span:    TokenSpan { start, end },
                outcome: AlignmentOutcome::Exact,
            },
            // zero-width answer: the end is met before the start is passed
            (None, Some(end)) => Alignment {
                span:    TokenSpan { start: end, end },
                outcome: AlignmentOutcome::Exact,
            },
            (start, None) => Alignment {
                span:    TokenSpan { start: start.unwrap_or(last).min(last), end: last },
                outcome: AlignmentOutcome::Clamped,
            },
        }
    }
}
