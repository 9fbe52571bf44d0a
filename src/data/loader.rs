// ============================================================
// Layer 4 — Document Loader
// ============================================================
// Reads a SQuAD-style JSON file into a typed SquadDocument.
//
// The whole file is read into memory and parsed in one go:
// the record builder needs every article anyway, and a single
// parse means a malformed document fails before any output is
// produced.
//
// Failure modes (all fatal, no retry):
//   - file missing / unreadable      → I/O error with the path
//   - invalid JSON, missing key,
//     wrong type                     → parse error with the path
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::document::SquadDocument;
use crate::domain::traits::DocumentSource;

/// Loads one dataset file from disk.
pub struct JsonDocumentLoader {
    path: PathBuf,
}

impl JsonDocumentLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for JsonDocumentLoader {
    fn load(&self) -> Result<SquadDocument> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read dataset '{}'", self.path.display()))?;

        let document: SquadDocument = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed dataset '{}'", self.path.display()))?;

        tracing::debug!(
            "Loaded '{}': {} articles",
            self.path.display(),
            document.data.len()
        );
        Ok(document)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("create temp file");
        f.write_all(contents.as_bytes()).expect("write dataset");
        f
    }

    #[test]
    fn test_loads_valid_document() {
        let f = file_with(
            r#"{"version": "v2.0", "data": [{"title": "t", "paragraphs": [
                {"context": "abc", "qas": []}
            ]}]}"#,
        );
        let doc = JsonDocumentLoader::new(f.path()).load().unwrap();
        assert_eq!(doc.data.len(), 1);
        assert_eq!(doc.data[0].paragraphs[0].context, "abc");
    }

    #[test]
    fn test_missing_data_key_is_fatal() {
        let f   = file_with(r#"{"articles": []}"#);
        let err = JsonDocumentLoader::new(f.path()).load().unwrap_err();
        assert!(err.to_string().contains("Malformed dataset"));
    }

    #[test]
    fn test_wrong_type_is_fatal() {
        let f = file_with(
            r#"{"data": [{"paragraphs": [{"context": "abc", "qas": [
                {"id": "1", "question": "q", "is_impossible": "no", "answers": []}
            ]}]}]}"#,
        );
        assert!(JsonDocumentLoader::new(f.path()).load().is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonDocumentLoader::new(dir.path().join("nope.json")).load().unwrap_err();
        assert!(err.to_string().contains("Cannot read dataset"));
    }
}
