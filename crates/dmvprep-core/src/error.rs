//! Generation error types.
//!
//! Defined in `dmvprep-core` so the session state machine can classify
//! failures for message normalization without string matching.

use thiserror::Error;

/// Errors that can occur while asking the remote service for a quiz.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No usable API key was found in the environment.
    #[error("API key is missing. Please select your Google API Key.")]
    CredentialsMissing,

    /// The service rejected the credential.
    #[error(
        "Authentication failed. Please re-select your Google API Key and \
         ensure your project has the Generative Language API enabled."
    )]
    AuthenticationFailed,

    /// The service answered without any text payload.
    #[error("empty response from the generation service")]
    EmptyResponse,

    /// The response text did not parse as the declared quiz schema.
    #[error("invalid response shape: {0}")]
    InvalidResponseShape(String),

    /// Any other service failure, passed through with its original message.
    #[error("{0}")]
    RemoteService(String),
}

impl GenerateError {
    /// Returns `true` for failures caused by a bad or missing credential.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            GenerateError::CredentialsMissing | GenerateError::AuthenticationFailed
        )
    }
}
