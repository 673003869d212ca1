//! # clipscribe
//!
//! Resilient multi-provider core for a voice-clip intelligence pipeline:
//! a recorded clip is transcribed through a speech-to-text provider, and
//! the transcript is summarised into a structured report by a completion
//! provider.
//!
//! The interesting part is not either HTTP call but the client shape
//! around them: each service holds a pool of API credentials (and, for
//! transcription, a pool of model identifiers), rotates through them on
//! every call, classifies provider failures as retryable or fatal,
//! bounds the retry budget, and normalises the raw response into a
//! stable typed result.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pool`] | Round-robin credential and model pools |
//! | [`retry`] | Bounded attempt loop with failure classification |
//! | [`provider`] | Adapter traits and the concrete Groq/Cerebras backends |
//! | [`validate`] | Response normalisation and JSON decoding |
//! | [`prompt`] | Deterministic prompt construction |
//! | [`service`] | Transcription and analysis service composition |
//! | [`config`] | Construction-time configuration structs |
//! | [`types`] | Result and metadata types |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clipscribe::config::{AnalysisConfig, TranscriptionConfig};
//! use clipscribe::provider::{cerebras::CerebrasCompletion, groq::GroqTranscription};
//! use clipscribe::service::{AnalysisService, TranscriptionService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> clipscribe::Result<()> {
//!     let transcription = TranscriptionService::new(
//!         TranscriptionConfig {
//!             api_keys: vec!["gsk-...".into()],
//!             models: vec![],
//!         },
//!         Arc::new(GroqTranscription::builder().build()?),
//!     )?;
//!     let analysis = AnalysisService::new(
//!         AnalysisConfig {
//!             api_keys: vec!["csk-...".into()],
//!             ..Default::default()
//!         },
//!         Arc::new(CerebrasCompletion::builder().build()?),
//!     )?;
//!
//!     let clip = bytes::Bytes::from_static(b"...wav bytes...");
//!     let transcript = transcription.transcribe(clip, "clip.wav", None).await?;
//!     let report = analysis.analyze(&transcript.text, None).await?;
//!     println!("{}", report.summary);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod pool;
pub mod prompt;
pub mod provider;
pub mod retry;
pub mod service;
pub mod types;
pub mod validate;

pub mod error;
pub use error::Error;

pub use provider::ProviderError;
pub use service::{AnalysisService, ServiceSlot, TranscriptionService};
pub use types::{ActionItem, AnalysisResult, RecordingMetadata, Sentiment, TranscriptionResult};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
