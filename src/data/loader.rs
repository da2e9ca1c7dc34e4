// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads a CSV corpus of (dialogue, summary) rows, e.g. the
// SAMSum train/validation/test splits:
//
//   id,dialogue,summary
//   13818513,"Amanda: I baked cookies. Do you want some?
//   Jerry: Sure!
//   Amanda: I'll bring you tomorrow :-)",Amanda baked cookies and will bring Jerry some tomorrow.
//
// Dialogues span several lines inside quotes, so a real CSV
// reader is required rather than splitting on newlines. The
// `csv` crate deserialises each record through serde straight
// into DialogueExample; extra columns such as `id` are ignored
// and a missing `dialogue`/`summary` column is a hard error.
//
// Reference: csv crate tutorial (serde deserialisation)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::dialogue::DialogueExample;
use crate::domain::traits::CorpusSource;

/// Loads every row of one CSV file.
pub struct CsvCorpusLoader {
    path: PathBuf,
}

impl CsvCorpusLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl CorpusSource for CsvCorpusLoader {
    fn load_all(&self) -> Result<Vec<DialogueExample>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open corpus '{}'", self.path.display()))?;

        let mut examples = Vec::new();
        for (row, record) in reader.deserialize::<DialogueExample>().enumerate() {
            // Row numbers are 1-based and skip the header line
            let example = record.with_context(|| {
                format!("Bad record {} in '{}'", row + 1, self.path.display())
            })?;
            examples.push(example);
        }

        tracing::info!(
            "Loaded {} examples from '{}'",
            examples.len(),
            self.path.display()
        );
        Ok(examples)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_loads_rows_and_ignores_extra_columns() {
        let f = write_csv("id,dialogue,summary\n1,Hi there,Hi\n2,\"A: yes\nB: no\",They disagree\n");
        let examples = CsvCorpusLoader::new(f.path()).load_all().unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0], DialogueExample::new("Hi there", "Hi"));
        // Quoted field keeps its embedded newline
        assert_eq!(examples[1].dialogue, "A: yes\nB: no");
    }

    #[test]
    fn test_missing_summary_column_is_an_error() {
        let f = write_csv("id,dialogue\n1,Hi there\n");
        assert!(CsvCorpusLoader::new(f.path()).load_all().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = CsvCorpusLoader::new("definitely/not/here.csv")
            .load_all()
            .unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.csv"));
    }

    #[test]
    fn test_empty_corpus() {
        let f = write_csv("dialogue,summary\n");
        assert!(CsvCorpusLoader::new(f.path()).load_all().unwrap().is_empty());
    }
}
