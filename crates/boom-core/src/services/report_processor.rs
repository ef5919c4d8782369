//! Report processing service wiring the clients into the workflow steps

use crate::clients::{AirtableClient, GeminiClient, HttpTransport};
use crate::config::BoomConfig;
use crate::error::Result;
use crate::services::{EmptyTextPolicy, RecordPersister, ReportSynthesizer};
use crate::workflow::ReportSteps;
use async_trait::async_trait;
use boom_types::DeploymentReportRequest;
use std::sync::Arc;

pub struct ReportProcessor {
    synthesizer: ReportSynthesizer,
    persister: RecordPersister,
}

impl ReportProcessor {
    pub fn new(synthesizer: ReportSynthesizer, persister: RecordPersister) -> Self {
        Self {
            synthesizer,
            persister,
        }
    }

    /// Build both clients on one transport with the configured retry policy
    pub fn from_config(config: &BoomConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let policy = config.retry.policy();
        let empty_text = if config.gemini.fallback_on_empty {
            EmptyTextPolicy::fallback()
        } else {
            EmptyTextPolicy::Fail
        };

        let gemini = GeminiClient::new(config.gemini.clone(), transport.clone(), policy.clone());
        let airtable = AirtableClient::new(config.airtable.clone(), transport, policy);

        Self::new(
            ReportSynthesizer::new(gemini, empty_text),
            RecordPersister::new(airtable),
        )
    }
}

#[async_trait]
impl ReportSteps for ReportProcessor {
    async fn synthesize_report(&self, request: &DeploymentReportRequest) -> Result<String> {
        self.synthesizer.synthesize(request).await
    }

    async fn persist_record(&self, request: &DeploymentReportRequest, report_text: &str) -> Result<String> {
        self.persister.persist(request, report_text).await
    }
}
