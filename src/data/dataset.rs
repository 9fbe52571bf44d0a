use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::record::OutputRecord;
use crate::domain::traits::WordTokenizer;

/// Records read back from an emitted `.jsonl` file.
#[derive(Debug)]
pub struct RecordDataset {
    records: Vec<OutputRecord>,
}

impl RecordDataset {
    pub fn new(records: Vec<OutputRecord>) -> Self { Self { records } }

    /// Parse one record per non-blank line. A bad line aborts with
    /// its 1-based line number.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw  = fs::read_to_string(path)
            .with_context(|| format!("Cannot read records '{}'", path.display()))?;

        let mut records = Vec::new();
        for (n, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: OutputRecord = serde_json::from_str(line)
                .with_context(|| format!("Malformed record at {}:{}", path.display(), n + 1))?;
            records.push(record);
        }

        Ok(Self::new(records))
    }

    /// Keep records whose context has at most `threshold` tokens.
    /// A threshold of 0 keeps everything.
    pub fn filter_by_context_length<T: WordTokenizer>(self, threshold: usize, tokenizer: &T) -> Self {
        if threshold == 0 {
            return self;
        }

        // records of one paragraph share a context; tokenise it once
        let mut last: Option<(String, usize)> = None;
        let records = self
            .records
            .into_iter()
            .filter(|r| {
                let cached = last
                    .as_ref()
                    .filter(|(context, _)| *context == r.context)
                    .map(|(_, len)| *len);
                let len = match cached {
                    Some(len) => len,
                    None => {
                        let len = tokenizer.tokenize(&r.context).len();
                        last = Some((r.context.clone(), len));
                        len
                    }
                };
                len <= threshold
            })
            .collect();

        Self::new(records)
    }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn records(&self) -> &[OutputRecord] { &self.records }

    pub fn impossible_count(&self) -> usize {
        self.records.iter().filter(|r| r.impossible()).count()
    }
}
