//! Batch orchestration for renaming receipt images.

use crate::ai::{ClaudeClient, InferenceService};
use crate::format::{self, ImageFormat};
use crate::models::{BatchSummary, Config, ImageRecord, ProcessingResult};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

const INPUT_DIR: &str = "input";
const OUTPUT_DIR: &str = "output";

/// Coordinates the per-file pipelines and aggregates their outcomes.
pub struct App {
    inference: Box<dyn InferenceService>,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl App {
    /// Build an app from a concrete inference service.
    ///
    /// This is primarily useful for tests and harnesses that need to inject a
    /// mock.
    pub fn with_inference(
        inference: Box<dyn InferenceService>,
        input_dir: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            inference,
            input_dir,
            output_dir,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        info!("Inference model: {}", config.model);

        let inference = Box::new(ClaudeClient::new(config.api_key, config.model));

        Ok(Self::with_inference(
            inference,
            PathBuf::from(INPUT_DIR),
            PathBuf::from(OUTPUT_DIR),
        ))
    }

    /// Process every file in the input directory and report the outcome.
    ///
    /// Per-file failures are collected into the summary; only setup-phase
    /// errors (directory validation) propagate as `Err`.
    pub async fn run(&self) -> Result<BatchSummary> {
        self.ensure_directory(&self.input_dir).await?;
        self.ensure_directory(&self.output_dir).await?;

        let names = self.list_input_files().await?;
        info!(
            "Found {} files in {}",
            names.len(),
            self.input_dir.display()
        );

        // Full fan-out: every pipeline starts immediately and the batch
        // resolves once all of them settle.
        let pipelines = names.iter().map(|name| self.process_file(name));
        let results = futures::future::join_all(pipelines).await;

        let summary = BatchSummary::new(results);
        self.report(&summary);
        Ok(summary)
    }

    async fn ensure_directory(&self, path: &Path) -> Result<()> {
        match fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(Error::Generic(format!(
                "{} exists but is not a directory",
                path.display()
            ))),
            Err(_) => {
                fs::create_dir_all(path).await?;
                info!("Created directory: {}", path.display());
                Ok(())
            }
        }
    }

    /// Immediate regular files in the input directory, in filesystem order.
    async fn list_input_files(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.input_dir).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(names)
    }

    /// One file's pipeline, with every failure caught at the boundary.
    async fn process_file(&self, file_name: &str) -> ProcessingResult {
        match self.rename_file(file_name).await {
            Ok(new_name) => {
                info!("{} -> {}", file_name, new_name);
                ProcessingResult::success(file_name, new_name)
            }
            Err(e) => {
                warn!("Failed to process {}: {}", file_name, e);
                ProcessingResult::failure(file_name, &e)
            }
        }
    }

    /// normalize -> validate -> read -> infer -> write.
    async fn rename_file(&self, file_name: &str) -> Result<String> {
        let token = format::normalize_extension(file_name);
        let image_format = ImageFormat::from_token(&token)
            .ok_or_else(|| Error::UnsupportedFormat(token.clone()))?;

        let bytes = fs::read(self.input_dir.join(file_name)).await?;
        let record = ImageRecord {
            file_name: file_name.to_string(),
            bytes,
            format: image_format,
        };

        let stem = self.inference.suggest_filename(&record).await?;

        // Collisions between identical extracted names are last-writer-wins.
        let new_name = format!("{}.{}", stem, token);
        fs::write(self.output_dir.join(&new_name), &record.bytes).await?;

        Ok(new_name)
    }

    fn report(&self, summary: &BatchSummary) {
        for result in summary.results() {
            match (&result.new_name, &result.error) {
                (Some(new_name), _) => {
                    info!("OK   {} -> {}", result.original_name, new_name);
                }
                (None, Some(message)) => {
                    error!("FAIL {}: {}", result.original_name, message);
                }
                (None, None) => {}
            }
        }

        info!(
            "Processed {} files: {} succeeded, {} failed",
            summary.total(),
            summary.successes(),
            summary.failures()
        );

        if summary.majority_failed() {
            warn!("More than half of the batch failed; check API credentials and input files");
        }
    }
}
