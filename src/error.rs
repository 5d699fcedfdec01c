//! # Error Types
//!
//! This module defines error types used throughout the vitrina library.
//!
//! Propagation policy: `Validation` and `NotFound` are rejected synchronously
//! at the orchestrator boundary with the offending field named in the message
//! and no state change. `Gateway` errors are absorbed at the call site and
//! converted into a degraded-but-functional continuation (manual theme list,
//! full catalog listing) — an AI failure is never fatal to the wizard.

use thiserror::Error;

/// Main error type for vitrina operations
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// Bad or missing required input (rejected synchronously, state unchanged)
    #[error("Validation error: {0}")]
    Validation(String),

    /// AI gateway call failed or returned unparseable content
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Reference to a nonexistent template or layer
    #[error("Not found: {0}")]
    NotFound(String),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
