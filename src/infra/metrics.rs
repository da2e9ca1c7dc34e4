// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one CSV row per training epoch:
//
//   epoch,train_loss,val_loss
//   1,3.124500,3.089200
//   2,2.890100,2.854300
//
// Output file: {metrics_dir}/metrics.csv. The header is only
// written when the file is new, so repeated runs append.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

/// Losses for a single epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Starts at 1
    pub epoch: usize,

    /// Mean masked cross-entropy over the training batches
    pub train_loss: f64,

    /// Mean masked cross-entropy over the validation batches
    pub val_loss: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: f64) -> Self {
        Self { epoch, train_loss, val_loss }
    }
}

/// Logs epoch metrics to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the directory and the CSV header if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics dir '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,val_loss")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot append to '{}'", self.csv_path.display()))?;

        writeln!(f, "{},{:.6},{:.6}", m.epoch, m.train_loss, m.val_loss)?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_rows_after_header() {
        let dir = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 3.0, 2.5)).unwrap();
        logger.log(&EpochMetrics::new(2, 2.0, 1.5)).unwrap();

        // A second logger on the same dir must not rewrite the header
        let again = MetricsLogger::new(dir.path()).unwrap();
        again.log(&EpochMetrics::new(3, 1.0, 1.25)).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "epoch,train_loss,val_loss",
            "1,3.000000,2.500000",
            "2,2.000000,1.500000",
            "3,1.000000,1.250000",
        ]);
    }
}
