// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure data types and traits that define the core concepts:
// the input document, the emitted record, and the seams
// (tokenizer, document source) the other layers plug into.
//
// Rules for this layer:
//   - NO file I/O
//   - NO tokenisation or alignment logic
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Input dataset: articles → paragraphs → QA entries → answers
pub mod document;

// One flattened (question, answer) training example
pub mod record;

// Core abstractions (traits) that other layers implement
pub mod traits;
