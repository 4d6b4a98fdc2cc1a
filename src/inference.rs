mod analyzer;
mod backend;
mod error;
mod gemini;


pub use analyzer::{Analyzer, DEFAULT_MODEL, EMPTY_RESPONSE_PLACEHOLDER, TEMPERATURE};
pub use backend::{GenerateRequest, InferenceBackend};
pub use error::{AnalysisError, BackendError, Result};
pub use gemini::{DEFAULT_ENDPOINT, GeminiClient};
