//! Airtable client for deployment record storage

use crate::backoff::{retry_with_backoff, BackoffPolicy};
use crate::clients::transport::{HttpTransport, OutboundRequest};
use crate::config::AirtableConfig;
use crate::error::{BoomError, Result};
use serde_json::{json, Map, Value};
use std::sync::Arc;

const SERVICE: &str = "Airtable";

pub struct AirtableClient {
    config: AirtableConfig,
    transport: Arc<dyn HttpTransport>,
    policy: BackoffPolicy,
}

impl AirtableClient {
    pub fn new(config: AirtableConfig, transport: Arc<dyn HttpTransport>, policy: BackoffPolicy) -> Self {
        Self {
            config,
            transport,
            policy,
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/v0/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.base_id,
            self.config.table_id
        )
    }

    /// Create one record and return its id
    pub async fn create_record(&self, fields: Map<String, Value>) -> Result<String> {
        let body = json!({
            "records": [{ "fields": fields }],
            "typecast": true
        });

        let response = retry_with_backoff(&self.policy, "Airtable create record", || {
            let request = OutboundRequest {
                url: self.table_url(),
                bearer_token: Some(self.config.api_key.clone()),
                headers: Vec::new(),
                body: body.clone(),
            };
            async move {
                self.transport
                    .post_json(request)
                    .await?
                    .error_for_status(SERVICE)
            }
        })
        .await?;

        let data: Value = response.json()?;
        data["records"][0]["id"]
            .as_str()
            .map(|id| id.to_string())
            .ok_or_else(|| BoomError::Upstream {
                service: SERVICE,
                status: response.status,
                body: "Response did not contain a record id".to_string(),
            })
    }
}
