// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw dataset file and the flattened
// training records.
//
// The pipeline flows in this order:
//
//   dataset.json
//       │
//       ▼
//   JsonDocumentLoader  → parses articles / paragraphs / QAs
//       │
//       ▼
//   TreebankTokenizer   → sentence split + word tokens (once per context)
//       │
//       ▼
//   OffsetAligner       → char span → token span for each answer
//       │
//       ▼
//   RecordBuilder       → one OutputRecord per (question, answer),
//                         stops at the article-level example limit
//
// Reading the emitted records back (RecordDataset) also lives here.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads SQuAD-style JSON documents
pub mod loader;

/// Punkt-style sentence boundaries
pub mod sentence_splitter;

/// Treebank word tokenizer with quote normalisation
pub mod tokenizer;

/// Character-offset to token-index alignment
pub mod aligner;

/// Flattens documents into capped record batches
pub mod builder;

/// Reads `.jsonl` records back and filters by context length
pub mod dataset;
