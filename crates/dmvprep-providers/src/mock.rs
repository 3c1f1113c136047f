//! Mock generator for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use dmvprep_core::error::GenerateError;
use dmvprep_core::model::{QuizConfig, QuizData};
use dmvprep_core::traits::QuizGenerator;

type Outcome = Box<dyn Fn() -> Result<QuizData, GenerateError> + Send + Sync>;

/// A canned [`QuizGenerator`] for exercising the session flow without
/// network access.
pub struct MockGenerator {
    outcome: Outcome,
    call_count: AtomicU32,
    last_request: Mutex<Option<(QuizConfig, Vec<String>)>>,
}

impl MockGenerator {
    /// Always succeed with the given quiz.
    pub fn with_quiz(quiz: QuizData) -> Self {
        Self::from_outcome(Box::new(move || Ok(quiz.clone())))
    }

    /// Always fail, producing a fresh error per call.
    pub fn with_error(make_error: impl Fn() -> GenerateError + Send + Sync + 'static) -> Self {
        Self::from_outcome(Box::new(move || Err(make_error())))
    }

    fn from_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of generate calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Config and seen-hash list of the most recent call.
    pub fn last_request(&self) -> Option<(QuizConfig, Vec<String>)> {
        self.last_request.lock().ok()?.clone()
    }
}

#[async_trait]
impl QuizGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        config: &QuizConfig,
        seen_hashes: &[String],
    ) -> Result<QuizData, GenerateError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some((config.clone(), seen_hashes.to_vec()));
        }
        (self.outcome)()
    }
}
