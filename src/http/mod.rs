//! HTTP protocol layer module
//!
//! Provides HTTP response builders, decoupled from routing logic.

pub mod response;

// Re-export commonly used builders
pub use response::{build_404_response, build_405_response, build_text_response};
