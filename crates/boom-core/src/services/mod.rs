//! Service modules for report logic

pub mod record_persister;
pub mod report_processor;
pub mod report_synthesizer;

// Re-export service types
pub use record_persister::RecordPersister;
pub use report_processor::ReportProcessor;
pub use report_synthesizer::{EmptyTextPolicy, ReportSynthesizer};
