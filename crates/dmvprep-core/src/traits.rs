//! Trait seams for the remote generator, the host key bridge, and the
//! persisted key-value store.
//!
//! The async traits are implemented by the `dmvprep-providers` crate and by
//! hosting environments respectively.

use async_trait::async_trait;

use crate::error::GenerateError;
use crate::model::{QuizConfig, QuizData};

/// A remote service that authors a quiz from a config and a list of
/// question hashes to avoid.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Human-readable backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Author one quiz. A single external call with no retries; any failure
    /// aborts the whole attempt and surfaces as one error.
    async fn generate(
        &self,
        config: &QuizConfig,
        seen_hashes: &[String],
    ) -> Result<QuizData, GenerateError>;
}

/// Host-provided key selection capability.
///
/// Present only inside hosting environments that manage the API key on the
/// user's behalf; everywhere else [`NoopKeyBridge`] stands in, and the flow
/// must work identically without it.
#[async_trait]
pub trait KeyBridge: Send + Sync {
    /// Whether the host currently has a key selected for this user.
    async fn has_selected_key(&self) -> bool;

    /// Ask the host to walk the user through selecting a key.
    async fn open_select_key(&self);
}

/// Key bridge for environments without a host key selector.
pub struct NoopKeyBridge;

#[async_trait]
impl KeyBridge for NoopKeyBridge {
    async fn has_selected_key(&self) -> bool {
        false
    }

    async fn open_select_key(&self) {}
}

/// Minimal string key-value store backing the question history.
pub trait KvStore: Send + Sync {
    /// Read the value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
