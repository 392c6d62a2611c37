//! Streaming dipeptide analysis from an external text-generation service
//!
//! The client never surfaces errors to its caller: a missing credential or a
//! failed request is reported as a text fragment through the same channel as
//! the analysis itself.

pub mod client;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod sse;

pub use client::*;
pub use error::AnalysisError;
pub use prompt::*;
