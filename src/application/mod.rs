// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers for one goal each.
//
// Rules for this layer:
//   - No tokenisation or alignment logic here (Layer 4)
//   - No printing here (that's Layer 1)
//   - Owns run-level policy: which splits, skip-if-exists,
//     example limit, output style
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Dataset files → JSON-lines training records
pub mod preprocess_use_case;

// Summary of an emitted JSON-lines file
pub mod inspect_use_case;
