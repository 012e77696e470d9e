use super::InferenceService;
use crate::models::ImageRecord;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

type QueuedResponse = std::result::Result<String, String>;

#[derive(Clone)]
pub struct MockInferenceClient {
    responses: Arc<Mutex<Vec<QueuedResponse>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_filename_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_error_response(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockInferenceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceService for MockInferenceClient {
    async fn suggest_filename(&self, image: &ImageRecord) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(format!("2024-01-01_meals-per-diem_{}", image.file_name.len()))
        } else {
            let index = (*count - 1) % responses.len();
            responses[index]
                .clone()
                .map_err(Error::AiProvider)
        }
    }
}
