// Core client functionality for the onboarding assistant:
// - HTTP client for the backend API
// - Request/response data structures
// - Chat session state machine
// - Message formatting
// - Configuration loading
// - Shared error types

// Export client module - HTTP client for the backend API
pub mod client;
pub use client::*;

// Export types module - Request/response data structures
pub mod types;
pub use types::*;

// Export session module - Chat session state machine
pub mod session;
pub use session::*;

// Export format module - Message formatting
pub mod format;
pub use format::*;

// Export greeting module - Proactive greeting loader
pub mod greeting;
pub use greeting::*;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;
