// Core CineBot functionality:
// - Gemini API client
// - Request/response data structures
// - Genre vocabulary, year range and prompt templates
// - Session state and recommendation history
// - Configuration loading
// - Shared error types

// Export client module - API client for Gemini
pub mod client;
pub use client::*;

// Export types module - Request/response data structures
pub mod types;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;

pub mod selection;
pub use selection::*;

pub mod prompt;
pub use prompt::*;

pub mod session;
pub use session::*;

pub mod assistant;
pub use assistant::*;
