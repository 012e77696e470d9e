//! Vision-language inference integration for filename suggestions.
//!
//! Provides the trait seam between the batch orchestrator and the remote
//! inference provider, so tests can substitute a mock client.

pub mod client;
pub mod mock;

pub use client::ClaudeClient;
pub use mock::MockInferenceClient;

use crate::models::ImageRecord;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Suggest a filename stem for a receipt image.
    ///
    /// Returns the delimited token extracted from the model's reply, without
    /// an extension.
    async fn suggest_filename(&self, image: &ImageRecord) -> Result<String>;
}
