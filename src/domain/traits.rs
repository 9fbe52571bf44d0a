// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The record builder only needs "something that splits text into
// word tokens" and the application layer only needs "something
// that produces a document". Both are traits so tests can plug in
// tiny fakes and a future loader (e.g. a gzip'd or remote dataset)
// can slot in without touching the alignment code.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::document::SquadDocument;

// ─── WordTokenizer ────────────────────────────────────────────────────────────
/// Splits raw text into an ordered sequence of word tokens.
///
/// Implementations must be deterministic: the same input always
/// yields the same tokens, because a context is tokenised once and
/// the result is reused for every answer aligned against it.
///
/// Implementations:
///   - TreebankTokenizer → Treebank rules + quote normalisation
pub trait WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can load a full QA document.
///
/// Implementations:
///   - JsonDocumentLoader → reads a SQuAD-style JSON file
pub trait DocumentSource {
    fn load(&self) -> Result<SquadDocument>;
}
