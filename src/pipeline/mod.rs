//! Batch processing pipeline.
//!
//! # Pipeline flow
//!
//! ```text
//! BatchRunner::run(input_dir, output_file)
//!   ├─ discover .wav/.flac/.mp3 entries
//!   ├─ fan out over `concurrency` workers
//!   │    └─ FileProcessor::process(file)
//!   │         transcribe → normalize → classify → ResultRecord
//!   │         (every failure folds into an Error-labelled record)
//!   ├─ fan in over an mpsc channel
//!   └─ BatchReport → CSV (one row per discovered file)
//! ```

pub mod batch;
pub mod processor;
pub mod record;

pub use batch::{BatchError, BatchRunner, AUDIO_EXTENSIONS};
pub use processor::FileProcessor;
pub use record::ResultRecord;
