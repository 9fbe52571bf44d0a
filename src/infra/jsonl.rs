// ============================================================
// Layer 6 — JSON Lines Writer
// ============================================================
// Serialises OutputRecords as newline-delimited JSON, one object
// per line, to `<input path>l` (train.json → train.jsonl).
//
// Two output styles:
//   Ascii   (default): spaced separators, ASCII-only text:
//             {"id": "x", "s_idx": 3}
//             separators ", " and ": ", every char outside
//             printable ASCII escaped as \uXXXX (UTF-16 units)
//   Compact: serde_json's default: {"id":"x","s_idx":3}
//             raw UTF-8, no spaces
//
// The file is always rewritten from scratch, so running twice on
// the same input produces the same bytes. Lines go to a temp file
// that is renamed into place only once every record is written.
//
// Reference: serde_json::ser::Formatter documentation
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    ffi::OsString,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::record::OutputRecord;

/// How each JSON object is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonStyle {
    #[default]
    Ascii,
    Compact,
}

/// `train.json` → `train.jsonl`.
///
/// This is a literal append of `l` to the full path, not an
/// extension swap: `data.txt` becomes `data.txtl`.
pub fn output_path(input: impl AsRef<Path>) -> PathBuf {
    let mut raw: OsString = input.as_ref().as_os_str().to_owned();
    raw.push("l");
    PathBuf::from(raw)
}

/// Write every record to `path`, one JSON object per line.
/// Overwrites any existing file.
pub fn write_jsonl(records: &[OutputRecord], path: impl AsRef<Path>, style: JsonStyle) -> Result<()> {
    let path = path.as_ref();

    write_atomically(path, |writer| {
        for record in records {
            write_record(writer, record, style).with_context(|| {
                format!("Cannot write record '{}' to '{}'", record.id, path.display())
            })?;
        }
        Ok(())
    })?;

    tracing::info!("Wrote {} records to '{}'", records.len(), path.display());
    Ok(())
}

/// Run `fill` against a temp file next to `path`, then rename it
/// over `path`. On any error the temp file is removed and `path`
/// is left as it was, so a half-written output never exists.
fn write_atomically<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".jsonl-").suffix(".tmp");
    // temp files default to 0600; outputs keep the usual 0644
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let tmp = builder
        .tempfile_in(dir)
        .with_context(|| format!("Cannot create temp file in '{}'", dir.display()))?;

    let mut writer = BufWriter::new(tmp.reopen()?);
    fill(&mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Cannot flush '{}'", path.display()))?;
    drop(writer);

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Cannot create output file '{}'", path.display()))?;
    Ok(())
}

/// Serialise one record followed by `\n`.
pub fn write_record<W: Write>(writer: &mut W, record: &OutputRecord, style: JsonStyle) -> Result<()> {
    match style {
        JsonStyle::Ascii => {
            let mut ser = serde_json::Serializer::with_formatter(&mut *writer, AsciiFormatter);
            record.serialize(&mut ser)?;
        }
        JsonStyle::Compact => serde_json::to_writer(&mut *writer, record)?,
    }
    writer.write_all(b"\n")?;
    Ok(())
}

// ─── AsciiFormatter ──────────────────────────────────────────────────────────
/// Spaced `", "` / `": "` separators and ASCII-only strings, the
/// layout most existing SQuAD `.jsonl` dumps use.
pub struct AsciiFormatter;

impl serde_json::ser::Formatter for AsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        // quotes, backslashes and C0 controls never reach here;
        // serde_json routes them through write_char_escape
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if (' '..='~').contains(&c) {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(context: &str) -> OutputRecord {
        OutputRecord {
            id:              "q1".to_string(),
            context:         context.to_string(),
            question:        "Which?".to_string(),
            answer:          "quick".to_string(),
            is_impossible:   0,
            s_idx:           1,
            e_idx:           1,
            augmented_s_idx: 1,
            augmented_e_idx: 1,
        }
    }

    fn render(record: &OutputRecord, style: JsonStyle) -> String {
        let mut buf = Vec::new();
        write_record(&mut buf, record, style).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_output_path_appends_l() {
        assert_eq!(output_path("data/train.json"), PathBuf::from("data/train.jsonl"));
        assert_eq!(output_path("notes.txt"), PathBuf::from("notes.txtl"));
    }

    #[test]
    fn test_ascii_style_matches_json_dump() {
        let line = render(&record("The quick fox."), JsonStyle::Ascii);
        assert_eq!(
            line,
            "{\"id\": \"q1\", \"context\": \"The quick fox.\", \"question\": \"Which?\", \
             \"answer\": \"quick\", \"is_impossible\": 0, \"s_idx\": 1, \"e_idx\": 1, \
             \"augmented_s_idx\": 1, \"augmented_e_idx\": 1}\n"
        );
    }

    #[test]
    fn test_ascii_style_escapes_non_ascii() {
        let line = render(&record("café\u{3000}\"x\"\n😀\u{7f}"), JsonStyle::Ascii);
        assert!(
            line.contains(r#""context": "caf\u00e9\u3000\"x\"\n\ud83d\ude00\u007f""#),
            "{line}"
        );
        assert!(line.is_ascii());
    }

    #[test]
    fn test_compact_style_keeps_utf8() {
        let line = render(&record("café"), JsonStyle::Compact);
        assert!(line.starts_with("{\"id\":\"q1\",\"context\":\"café\""));
        assert!(line.ends_with("}\n"));
    }

    #[test]
    fn test_failed_write_leaves_no_partial_output() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.jsonl");

        let result = write_atomically(&path, |writer| {
            write_record(writer, &record("a"), JsonStyle::Ascii)?;
            anyhow::bail!("disk full")
        });

        assert!(result.is_err());
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_write_keeps_previous_output() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.jsonl");
        write_jsonl(&[record("old")], &path, JsonStyle::Ascii).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let result = write_atomically(&path, |_| anyhow::bail!("interrupted"));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_write_jsonl_one_object_per_line_and_overwrites() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.jsonl");
        fs::write(&path, "stale content that must disappear\n".repeat(10)).unwrap();

        let records = vec![record("a"), record("b")];
        write_jsonl(&records, &path, JsonStyle::Ascii).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        assert_eq!(first.lines().count(), 2);
        for line in first.lines() {
            let parsed: OutputRecord = serde_json::from_str(line).unwrap();
            assert_eq!(parsed.id, "q1");
        }

        write_jsonl(&records, &path, JsonStyle::Ascii).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.jsonl");
        let err  = write_jsonl(&[record("a")], &path, JsonStyle::Compact).unwrap_err();
        assert!(err.to_string().contains("Cannot create output file"));
    }
}
