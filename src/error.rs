use crate::provider::ProviderError;
use thiserror::Error;

/// Unified error type for the clipscribe core.
///
/// This is the closed taxonomy the retry engine and services work with:
/// provider failures are retryable, everything else is terminal for the
/// invocation that raised it.
#[derive(Debug, Error)]
pub enum Error {
    /// A pool or service was constructed from unusable configuration.
    /// Fatal at construction time; the service never becomes usable.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// An operation was invoked on a service slot before `init`.
    /// Programmer error; never retried.
    #[error("{service} has not been initialised; call init() first")]
    NotInitialized { service: String },

    /// A single provider call failed. Surfaced directly only when an
    /// adapter is used outside the retry engine.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The attempt budget was consumed without a successful call.
    /// Carries the last provider failure observed.
    #[error("all {attempts} attempt(s) failed; last error: {last}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        last: ProviderError,
    },

    /// A provider response could not be interpreted as the expected
    /// structured format. Raised after exactly one call, bypassing the
    /// retry loop.
    #[error("validation error: {message}")]
    Validation { message: String },
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    pub fn not_initialized(service: impl Into<String>) -> Self {
        Error::NotInitialized {
            service: service.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
        }
    }

    /// Number of provider calls behind an exhausted invocation, if this
    /// error is terminal for one.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Error::ExhaustedRetries { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}
