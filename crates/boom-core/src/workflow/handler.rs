//! Request handler for deployment report requests

use super::traits::ReportSteps;
use crate::clients::HttpTransport;
use crate::config::BoomConfig;
use crate::error::{BoomError, Result};
use crate::services::ReportProcessor;
use crate::types::HandlerResponse;
use boom_types::{DeploymentReportRequest, ErrorResponse, ReportResponse};
use std::sync::Arc;
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "Report generated and saved.";

/// Single entry point for report requests
///
/// Checks the method, then the configuration, then runs synthesis followed by
/// persistence. The first failure ends the request; the caller never sees a
/// success unless the record was written.
pub struct ReportHandler<T: ReportSteps> {
    config: BoomConfig,
    steps: T,
}

impl ReportHandler<ReportProcessor> {
    /// Production wiring: real clients over the given transport
    pub fn from_config(config: BoomConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let steps = ReportProcessor::from_config(&config, transport);
        Self::new(config, steps)
    }
}

impl<T: ReportSteps> ReportHandler<T> {
    pub fn new(config: BoomConfig, steps: T) -> Self {
        Self { config, steps }
    }

    pub fn config(&self) -> &BoomConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.validate().is_ok()
    }

    /// Handle one inbound request and shape the response
    pub async fn handle(&self, method: &str, body: &[u8]) -> HandlerResponse {
        let request_id = Uuid::new_v4();

        match self.process(&request_id, method, body).await {
            Ok(report) => {
                log::info!("[{}] Report request completed (record {})", request_id, report.record_id);
                HandlerResponse::ok(report)
            }
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    log::error!("[{}] Report request failed: {}", request_id, e);
                } else {
                    log::warn!("[{}] Report request rejected: {}", request_id, e);
                }

                let mut envelope = ErrorResponse::new(e.to_string());
                if let Some(details) = e.details() {
                    envelope = envelope.with_details(details);
                }
                HandlerResponse::error(status, envelope)
            }
        }
    }

    async fn process(&self, request_id: &Uuid, method: &str, body: &[u8]) -> Result<ReportResponse> {
        if !method.eq_ignore_ascii_case("POST") {
            return Err(BoomError::MethodNotAllowed(method.to_string()));
        }

        self.config.validate()?;

        let request = parse_request(body)?;
        log::info!(
            "[{}] Processing report request (cascade: {})",
            request_id,
            request.is_cascade
        );

        // Step 1: Generate report text
        let report_text = self.steps.synthesize_report(&request).await?;
        log::info!("[{}] Report text generated ({} chars)", request_id, report_text.len());

        // Step 2: Persist; a failed write fails the whole request
        let record_id = self.steps.persist_record(&request, &report_text).await?;

        Ok(ReportResponse {
            report_text,
            record_id,
            message: SUCCESS_MESSAGE.to_string(),
        })
    }
}

fn parse_request(body: &[u8]) -> Result<DeploymentReportRequest> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(BoomError::Validation("Request body is empty".to_string()));
    }
    serde_json::from_slice(body)
        .map_err(|e| BoomError::Validation(format!("Invalid request body: {}", e)))
}
