//! dmvprep-providers — remote quiz generation backends.
//!
//! Implements the `QuizGenerator` trait for the Gemini API and provides a
//! mock generator for exercising the session flow without network access.

pub mod credentials;
pub mod gemini;
pub mod mock;

pub use credentials::resolve_api_key;
pub use gemini::GeminiGenerator;
pub use mock::MockGenerator;
