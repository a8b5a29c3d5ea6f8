//! Batch orchestration — discover, fan out, collect, write.
//!
//! # Flow
//!
//! ```text
//! input dir ─ enumerate + extension filter ─▶ shared file list
//!                                               │ (atomic cursor)
//!                          ┌────────────────────┼────────────────────┐
//!                          ▼                    ▼                    ▼
//!                      worker 0             worker 1   …        worker N-1
//!                          │  FileProcessor::process per file        │
//!                          └───────────────┬─────────────────────────┘
//!                                          ▼ mpsc
//!                                   collector (this task)
//!                                          ▼
//!                                  BatchReport → CSV
//! ```
//!
//! Workers are a fixed set of `concurrency` tasks pulling file indices from
//! an atomic cursor; results fan in over an `mpsc` channel drained here, so
//! a slow file never blocks collection of faster ones.  The run returns
//! only after every dispatched file has produced its record.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::pipeline::processor::FileProcessor;
use crate::pipeline::record::ResultRecord;
use crate::report::BatchReport;

/// Accepted audio file extensions, matched case-insensitively.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3"];

// ---------------------------------------------------------------------------
// BatchError
// ---------------------------------------------------------------------------

/// Fatal batch-level failures.
///
/// Per-file failures are *not* here; they become error-labelled records.
/// Only the surrounding filesystem work can fail a run: an unusable input
/// directory or an unwritable report destination.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The input directory could not be created or read.
    #[error("cannot access input directory {path}: {source}")]
    InputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The report could not be written.
    #[error("cannot write report to {path}: {source}")]
    WriteReport {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// BatchRunner
// ---------------------------------------------------------------------------

/// Runs one batch: every matching file in the input directory through the
/// [`FileProcessor`], aggregated into a single written [`BatchReport`].
pub struct BatchRunner {
    processor: Arc<FileProcessor>,
    concurrency: usize,
}

impl BatchRunner {
    /// Create a runner with a fixed worker-pool size (minimum 1).
    pub fn new(processor: Arc<FileProcessor>, concurrency: usize) -> Self {
        Self {
            processor,
            concurrency: concurrency.max(1),
        }
    }

    /// Process everything under `input_dir` and write the report to
    /// `output_file`.
    ///
    /// A missing input directory is created empty and yields a header-only
    /// report, a deliberate no-op success.  Per-file failures never abort
    /// the run; the report always has one row per discovered file.
    pub async fn run(
        &self,
        input_dir: &Path,
        output_file: &Path,
    ) -> Result<BatchReport, BatchError> {
        log::info!("starting batch over {}", input_dir.display());

        let files = discover_audio_files(input_dir)?;
        log::info!("total files found: {}", files.len());

        let records = self.process_all(files).await;
        let report = BatchReport::new(records);

        if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| BatchError::WriteReport {
                path: output_file.display().to_string(),
                source,
            })?;
        }
        report
            .write_csv(output_file)
            .map_err(|source| BatchError::WriteReport {
                path: output_file.display().to_string(),
                source,
            })?;

        log::info!(
            "batch complete: {} rows written to {}",
            report.len(),
            output_file.display()
        );
        Ok(report)
    }

    /// Fan the file list out across the worker pool and collect every
    /// record as it completes.
    async fn process_all(&self, files: Vec<String>) -> Vec<ResultRecord> {
        if files.is_empty() {
            return Vec::new();
        }

        let total = files.len();
        let files = Arc::new(files);
        let cursor = Arc::new(AtomicUsize::new(0));
        let workers = self.concurrency.min(total);
        let (tx, mut rx) = mpsc::channel::<ResultRecord>(workers);

        let handles: Vec<_> = (0..workers)
            .map(|worker_id| {
                let files = Arc::clone(&files);
                let cursor = Arc::clone(&cursor);
                let processor = Arc::clone(&self.processor);
                let tx = tx.clone();

                tokio::spawn(async move {
                    loop {
                        let i = cursor.fetch_add(1, Ordering::Relaxed);
                        let Some(file_name) = files.get(i) else {
                            break;
                        };
                        let record = processor.process(file_name).await;
                        if tx.send(record).await.is_err() {
                            log::error!("worker {worker_id}: result collector gone");
                            break;
                        }
                    }
                })
            })
            .collect();
        // Collector owns the only remaining sender once workers finish.
        drop(tx);

        let mut records = Vec::with_capacity(total);
        while let Some(record) = rx.recv().await {
            records.push(record);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                log::error!("batch worker panicked: {e}");
            }
        }

        records
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Enumerate audio files (by allow-listed extension) in `dir`.
///
/// A missing directory is created and treated as empty.  Entries with
/// non-UTF-8 names are skipped with a warning; the report key must be a
/// representable string.
fn discover_audio_files(dir: &Path) -> Result<Vec<String>, BatchError> {
    let io_err = |source| BatchError::InputDir {
        path: dir.display().to_string(),
        source,
    };

    if !dir.exists() {
        log::warn!("input directory {} not found, creating it", dir.display());
        std::fs::create_dir_all(dir).map_err(io_err)?;
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.path().is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            log::warn!("skipping non-UTF-8 file name: {:?}", entry.file_name());
            continue;
        };
        if has_audio_extension(&name) {
            files.push(name);
        }
    }
    Ok(files)
}

/// Case-insensitive check against [`AUDIO_EXTENSIONS`].
fn has_audio_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    AUDIO_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
