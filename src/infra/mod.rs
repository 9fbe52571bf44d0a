// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by the application layer:
//
//   jsonl.rs : Output side of the pipeline
//              Derives `<input>l` from the input path and writes
//              records as JSON lines, either spaced and ASCII-escaped
//              or in compact UTF-8 form.
//
//   stats.rs : Run statistics
//              Counts articles, questions, records, impossible
//              questions and clamped alignments, and logs them
//              through tracing at the end of each split.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// JSON-lines output path and writer
pub mod jsonl;

/// Preprocessing counters and summary logging
pub mod stats;
