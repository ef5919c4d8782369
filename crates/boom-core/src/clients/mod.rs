//! Client modules for external services

pub mod transport;
pub mod gemini;
pub mod airtable;

// Re-export all client types
pub use transport::{HttpTransport, OutboundRequest, OutboundResponse, ReqwestTransport};
pub use gemini::GeminiClient;
pub use airtable::AirtableClient;
