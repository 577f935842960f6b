//! Core traits wiring the presentation layer to the generation backend

use crate::errors::{GatewayError, PresentationError};
use crate::types::{GenerationOutput, GenerationRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for generative-language backends.
///
/// The single seam between route handlers and the upstream API: handlers build
/// a [`GenerationRequest`] and receive either a normalized output or a
/// [`GatewayError`] carrying the HTTP status to mirror.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Forward one generation request upstream and normalize the outcome
    async fn generate(&self, request: GenerationRequest)
        -> Result<GenerationOutput, GatewayError>;
}

/// Trait for presentation adapters (network transport layers)
#[async_trait]
pub trait PresentationAdapter: Send + Sync {
    /// Start the adapter with a handle to the generation gateway
    async fn start(&self, gateway: Arc<dyn GenerationGateway>) -> Result<(), PresentationError>;

    /// Stop the adapter gracefully
    async fn stop(&self) -> Result<(), PresentationError>;
}
