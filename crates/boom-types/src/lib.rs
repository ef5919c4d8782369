//! Shared wire types for the boom deployment report endpoint

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A calculator field as it arrives from the browser.
///
/// The front end sends most measurements as form strings, but hand-written
/// clients tend to send numbers, so both are accepted. Anything else lands in
/// `Other` and is treated as not provided.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl FieldValue {
    /// Text used when the value is echoed back into prose
    pub fn display(&self) -> String {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::Other(v) => v.to_string(),
        }
    }

    /// True for whitespace-only text and for values that are neither text nor a number
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Number(_) => false,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Other(_) => true,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Deployment report request posted by the calculator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentReportRequest {
    #[serde(default)]
    pub current: Option<FieldValue>,
    #[serde(default)]
    pub angle: Option<FieldValue>,
    #[serde(default)]
    pub river_width: Option<FieldValue>,
    #[serde(default)]
    pub river_mile: Option<FieldValue>,
    #[serde(default)]
    pub calculated_boom_length: Option<FieldValue>,
    #[serde(default)]
    pub tension: Option<FieldValue>,
    /// Anchor interval: "150", "200+" or "1 per 100 ft"
    #[serde(default)]
    pub interval: Option<FieldValue>,
    #[serde(default)]
    pub drift_time: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_cascade: bool,
    #[serde(default)]
    pub segments: Option<FieldValue>,
    #[serde(default)]
    pub anchors: Option<FieldValue>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub anchor_details_text: Option<String>,
}

/// Free text; numbers and booleans are kept as their JSON text, anything else is dropped.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Accepts `true`, `"true"`, `"yes"`, `1` and friends; anything else is false.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        ),
        _ => false,
    })
}

/// Success envelope returned to the calculator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report_text: String,
    pub record_id: String,
    pub message: String,
}

/// Error envelope returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Health probe body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_accepts_strings_and_numbers() {
        let request: DeploymentReportRequest = serde_json::from_value(json!({
            "current": "2.5",
            "angle": 30,
            "riverWidth": "300",
            "isCascade": true,
            "segments": "2",
            "anchorDetailsText": "Anchor every 150 ft"
        }))
        .unwrap();

        assert_eq!(request.current, Some(FieldValue::Text("2.5".to_string())));
        assert_eq!(request.angle, Some(FieldValue::Number(30.0)));
        assert!(request.is_cascade);
        assert!(request.tension.is_none());
        assert_eq!(request.anchor_details_text.as_deref(), Some("Anchor every 150 ft"));
    }

    #[test]
    fn test_cascade_flag_is_lenient() {
        for (raw, expected) in [
            (json!("true"), true),
            (json!("false"), false),
            (json!(1), true),
            (json!(0), false),
            (json!(null), false),
        ] {
            let request: DeploymentReportRequest =
                serde_json::from_value(json!({ "isCascade": raw.clone() })).unwrap();
            assert_eq!(request.is_cascade, expected, "flag {:?}", raw);
        }

        let missing: DeploymentReportRequest = serde_json::from_value(json!({})).unwrap();
        assert!(!missing.is_cascade);
    }

    #[test]
    fn test_unexpected_shapes_do_not_fail_decode() {
        let request: DeploymentReportRequest = serde_json::from_value(json!({
            "current": true,
            "tension": { "v": 1 },
            "angle": [30],
            "anchors": null,
            "anchorDetailsText": 42
        }))
        .unwrap();

        assert_eq!(request.current, Some(FieldValue::Other(json!(true))));
        assert!(request.current.as_ref().unwrap().is_blank());
        assert!(matches!(request.tension, Some(FieldValue::Other(_))));
        assert!(matches!(request.angle, Some(FieldValue::Other(_))));
        assert!(request.anchors.is_none());
        assert_eq!(request.anchor_details_text.as_deref(), Some("42"));

        let request: DeploymentReportRequest =
            serde_json::from_value(json!({ "anchorDetailsText": ["a"] })).unwrap();
        assert!(request.anchor_details_text.is_none());
    }

    #[test]
    fn test_field_display() {
        assert_eq!(FieldValue::Number(350.0).display(), "350");
        assert_eq!(FieldValue::Number(2.5).display(), "2.5");
        assert_eq!(FieldValue::from(" 150+ ").display(), "150+");
        assert!(FieldValue::from("  ").is_blank());
    }

    #[test]
    fn test_error_response_skips_missing_details() {
        let body = serde_json::to_value(ErrorResponse::new("Method Not Allowed")).unwrap();
        assert_eq!(body, json!({ "error": "Method Not Allowed" }));

        let body = serde_json::to_value(ErrorResponse::new("failed").with_details("429")).unwrap();
        assert_eq!(body["details"], "429");
    }

    #[test]
    fn test_report_response_is_camel_case() {
        let body = serde_json::to_value(ReportResponse {
            report_text: "text".to_string(),
            record_id: "rec1".to_string(),
            message: "ok".to_string(),
        })
        .unwrap();
        assert_eq!(body["reportText"], "text");
        assert_eq!(body["recordId"], "rec1");
    }
}
