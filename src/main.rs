//! Application entry point — batch call screening.
//!
//! # Startup sequence
//!
//! 1. Parse CLI flags.
//! 2. Initialise logging.
//! 3. Load [`AppConfig`] from disk (defaults on first run) and apply CLI
//!    overrides.
//! 4. Resolve the classification API key; a missing key is fatal here,
//!    before any batch work begins.
//! 5. Resolve the Whisper model path; the engine itself loads lazily on the
//!    first transcribed file.
//! 6. Run the batch and print the summary.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use call_screener::config::{AppConfig, AppPaths, ConfigError};
use call_screener::llm::{ApiClassifier, LenientClassifier};
use call_screener::pipeline::{BatchRunner, FileProcessor};
use call_screener::stt::{
    find_model_by_id, InferenceOptions, LazyTranscriber, ModelStore, Transcriber,
    WhisperTranscriber,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Classify recorded phone calls as fraudulent or genuine.
#[derive(Debug, Parser)]
#[command(name = "call-screener", version)]
struct Cli {
    /// Directory scanned for .wav/.flac/.mp3 recordings.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// CSV report destination (overwritten each run).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of files processed in parallel.
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Settings file (defaults to the platform config location).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transcription model id (e.g. whisper-tiny, whisper-small).
    #[arg(long)]
    model: Option<String>,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let paths = AppPaths::new();
    let config_path = cli.config.unwrap_or_else(|| paths.settings_file.clone());
    let mut config = AppConfig::load_or_default(&config_path)?;

    if let Some(dir) = cli.input_dir {
        config.batch.input_dir = dir;
    }
    if let Some(output) = cli.output {
        config.batch.output_file = output;
    }
    if let Some(concurrency) = cli.concurrency {
        config.batch.concurrency = concurrency;
    }
    if let Some(model) = cli.model {
        config.transcriber.model = model;
    }

    // Classification is useless without a credential; fail before touching
    // any audio.
    let classifier_config = config.classifier.with_resolved_api_key()?;

    let model = find_model_by_id(&config.transcriber.model)
        .ok_or_else(|| ConfigError::UnknownModel(config.transcriber.model.clone()))?;
    let store = ModelStore::new(paths.models_dir.clone());
    let model_path = store.model_path(model);
    if !store.is_available(model) {
        log::warn!(
            "model file {} is missing; fetch {} from {}",
            model_path.display(),
            model.file_name,
            model.source_url
        );
    }

    let options = InferenceOptions {
        language: config.transcriber.language.clone(),
        beam_size: config.transcriber.beam_size,
        ..InferenceOptions::default()
    };
    let transcriber = Arc::new(LazyTranscriber::new(move || {
        WhisperTranscriber::load(&model_path, options.clone())
            .map(|engine| Arc::new(engine) as Arc<dyn Transcriber>)
    }));

    let classifier = Arc::new(LenientClassifier::new(ApiClassifier::from_config(
        &classifier_config,
    )));

    let processor = Arc::new(
        FileProcessor::new(config.batch.input_dir.clone(), transcriber, classifier)
            .with_transcribe_timeout(config.transcriber.timeout_secs.map(Duration::from_secs)),
    );

    let runner = BatchRunner::new(processor, config.batch.concurrency);
    let report = runner
        .run(&config.batch.input_dir, &config.batch.output_file)
        .await?;

    println!(
        "{} calls screened, report written to {}",
        report.len(),
        config.batch.output_file.display()
    );
    Ok(())
}
