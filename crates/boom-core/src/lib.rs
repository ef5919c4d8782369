//! Boom Report Core Library
//!
//! Turns boom deployment calculator outputs into a written field report
//! and a stored deployment record.

pub mod config;
pub mod backoff;
pub mod clients;
pub mod coerce;
pub mod services;
pub mod workflow;
pub mod types;
pub mod error;

// Re-export main types for easy access
pub use config::BoomConfig;
pub use error::{BoomError, Result};
pub use backoff::{retry_with_backoff, BackoffPolicy, RetryTrigger};

// Re-export all client types
pub use clients::{
    AirtableClient,
    GeminiClient,
    HttpTransport,
    ReqwestTransport,
};

// Re-export service types
pub use services::{
    EmptyTextPolicy,
    RecordPersister,
    ReportProcessor,
    ReportSynthesizer,
};

// Re-export workflow types
pub use workflow::{ReportHandler, ReportSteps};
pub use types::{HandlerResponse, RecordFields};
