//! Batch renamer for receipt images.
//!
//! Sends each receipt image in the input directory to a vision-language model,
//! extracts a structured filename suggestion from the response, and writes a
//! renamed copy of the image to the output directory.

pub mod ai;
pub mod app;
pub mod error;
pub mod format;
pub mod models;
pub mod parser;
pub mod prompts;

pub use error::{Error, Result};
