//! Text-generation client used by the justification pipeline to polish
//! deterministic paragraphs.
//!
//! - [`llm_service::LlmService`] wraps a single rewrite profile.
//! - [`config::default_config`] builds that profile from the environment.
//! - [`health_service::HealthService`] probes the configured backend.
//! - [`telemetry::layer`] renders only this crate's events.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod llm_service;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, Result};
pub use llm_service::LlmService;
