//! Data models and structures
//!
//! Defines the per-file records flowing through the pipeline, the batch
//! summary, and environment-driven configuration.

use crate::format::ImageFormat;
use crate::Error;

/// One input file, read and validated, ready for inference.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

/// Outcome of one file's pipeline run.
///
/// Exactly one of `new_name`/`error` is populated, enforced by the
/// constructors.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub original_name: String,
    pub new_name: Option<String>,
    pub error: Option<String>,
}

impl ProcessingResult {
    pub fn success(original_name: &str, new_name: String) -> Self {
        Self {
            original_name: original_name.to_string(),
            new_name: Some(new_name),
            error: None,
        }
    }

    pub fn failure(original_name: &str, error: &Error) -> Self {
        Self {
            original_name: original_name.to_string(),
            new_name: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.new_name.is_some()
    }
}

/// Aggregate outcome of a batch run.
#[derive(Debug)]
pub struct BatchSummary {
    results: Vec<ProcessingResult>,
}

impl BatchSummary {
    pub fn new(results: Vec<ProcessingResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[ProcessingResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn successes(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failures(&self) -> usize {
        self.total() - self.successes()
    }

    /// True when failures exceed half the batch (strictly more than total/2).
    pub fn majority_failed(&self) -> bool {
        self.failures() * 2 > self.total()
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_key: std::env::var("ANTHROPIC_API_KEY")
                .map_err(|_| crate::Error::Generic("ANTHROPIC_API_KEY not set".to_string()))?,
            model: std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-5".to_string()),
        })
    }
}
