//! Client library for the hosted baby weight prediction service
//!
//! This crate provides:
//! - The `Baby` feature record and its CSV parsing
//! - An async HTTP client for the remote prediction endpoint
//! - Explicit bearer-token credentials
//! - A configurable retry policy for transport failures
//! - A mock client for offline development

pub mod auth;
pub mod client;
pub mod error;
pub mod mock;
pub mod models;
pub mod retry;
pub mod wire;

pub use auth::{EnvToken, StaticToken, TokenProvider};
pub use client::{ClientConfig, PredictionClient, PredictionClientBuilder};
pub use error::PredictError;
pub use mock::MockPredictionClient;
pub use models::Baby;
pub use retry::RetryPolicy;
pub use wire::{Instance, Prediction, PredictionRequest, PredictionResponse};
