//! Report workflow module

pub mod traits;
pub mod handler;

pub use traits::ReportSteps;
pub use handler::ReportHandler;
