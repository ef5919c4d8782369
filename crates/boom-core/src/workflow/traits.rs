//! Report workflow step traits

use async_trait::async_trait;
use crate::error::Result;
use boom_types::DeploymentReportRequest;

/// The two outbound steps of a report request, in order.
///
/// Each step takes exactly what it needs, which keeps the handler easy to
/// drive with a mock in tests.
#[async_trait]
pub trait ReportSteps: Send + Sync {
    /// Step 1: Draft the report prose from the calculator outputs
    async fn synthesize_report(&self, request: &DeploymentReportRequest) -> Result<String>;

    /// Step 2: Store inputs, outputs and report; returns the record id
    async fn persist_record(&self, request: &DeploymentReportRequest, report_text: &str) -> Result<String>;
}
