pub mod enhanced;
pub mod error;
pub mod tests;

pub use enhanced::{EnhancedOcrService, OcrResult};
pub use error::OcrError;
