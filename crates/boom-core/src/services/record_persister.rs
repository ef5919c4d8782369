//! Deployment record persistence

use crate::clients::AirtableClient;
use crate::coerce::{parse_count, parse_interval, parse_number};
use crate::error::Result;
use crate::types::RecordFields;
use boom_types::DeploymentReportRequest;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

pub struct RecordPersister {
    airtable: AirtableClient,
}

impl RecordPersister {
    pub fn new(airtable: AirtableClient) -> Self {
        Self { airtable }
    }

    /// Write the request and its report as one record; returns the record id
    pub async fn persist(&self, request: &DeploymentReportRequest, report_text: &str) -> Result<String> {
        let fields = build_fields(request, report_text, Utc::now());
        let record_id = self.airtable.create_record(fields).await?;
        log::info!("Stored deployment record {}", record_id);
        Ok(record_id)
    }
}

fn number(value: Option<f64>) -> Value {
    value.map(|n| json!(n)).unwrap_or(Value::Null)
}

/// Map a request onto record fields. Values that do not parse are stored as null.
pub fn build_fields(
    request: &DeploymentReportRequest,
    report_text: &str,
    created_at: DateTime<Utc>,
) -> Map<String, Value> {
    let boom_length = parse_number(request.calculated_boom_length.as_ref());

    let (segments, segment_length) = if request.is_cascade {
        let segments = parse_count(request.segments.as_ref()).filter(|s| *s > 0);
        let length = match (boom_length, segments) {
            (Some(length), Some(count)) => Some(length / f64::from(count)),
            _ => None,
        };
        (segments, length)
    } else {
        (Some(1), boom_length)
    };

    let anchor_details = request
        .anchor_details_text
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let mut fields = Map::new();
    fields.insert(RecordFields::CURRENT.into(), number(parse_number(request.current.as_ref())));
    fields.insert(RecordFields::ANGLE.into(), number(parse_number(request.angle.as_ref())));
    fields.insert(RecordFields::RIVER_WIDTH.into(), number(parse_number(request.river_width.as_ref())));
    fields.insert(RecordFields::RIVER_MILE.into(), number(parse_number(request.river_mile.as_ref())));
    fields.insert(RecordFields::BOOM_LENGTH.into(), number(boom_length));
    fields.insert(RecordFields::TENSION.into(), number(parse_number(request.tension.as_ref())));
    fields.insert(RecordFields::ANCHOR_INTERVAL.into(), number(parse_interval(request.interval.as_ref())));
    fields.insert(RecordFields::DRIFT_TIME.into(), number(parse_number(request.drift_time.as_ref())));
    fields.insert(RecordFields::CASCADE.into(), json!(request.is_cascade));
    fields.insert(RecordFields::SEGMENTS.into(), segments.map(|s| json!(s)).unwrap_or(Value::Null));
    fields.insert(RecordFields::SEGMENT_LENGTH.into(), number(segment_length));
    fields.insert(RecordFields::ANCHORS.into(), parse_count(request.anchors.as_ref()).map(|a| json!(a)).unwrap_or(Value::Null));
    fields.insert(RecordFields::ANCHOR_DETAILS.into(), anchor_details.map(|d| json!(d)).unwrap_or(Value::Null));
    fields.insert(RecordFields::REPORT.into(), json!(report_text));
    fields.insert(
        RecordFields::CREATED_AT.into(),
        json!(created_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use boom_types::FieldValue;
    use chrono::TimeZone;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    fn cascade_request() -> DeploymentReportRequest {
        DeploymentReportRequest {
            current: Some("2.5".into()),
            angle: Some("30".into()),
            river_width: Some("300".into()),
            river_mile: Some("45".into()),
            calculated_boom_length: Some("350".into()),
            tension: Some("1200".into()),
            interval: Some("150+".into()),
            drift_time: Some("40".into()),
            is_cascade: true,
            segments: Some("2".into()),
            anchors: Some("5".into()),
            anchor_details_text: Some("  Two anchors per segment ".to_string()),
        }
    }

    #[test]
    fn test_cascade_fields() {
        let fields = build_fields(&cascade_request(), "Report body", created_at());

        assert_eq!(fields[RecordFields::CURRENT], json!(2.5));
        assert_eq!(fields[RecordFields::BOOM_LENGTH], json!(350.0));
        assert_eq!(fields[RecordFields::ANCHOR_INTERVAL], json!(150.0));
        assert_eq!(fields[RecordFields::CASCADE], json!(true));
        assert_eq!(fields[RecordFields::SEGMENTS], json!(2));
        assert_eq!(fields[RecordFields::SEGMENT_LENGTH], json!(175.0));
        assert_eq!(fields[RecordFields::ANCHORS], json!(5));
        assert_eq!(fields[RecordFields::ANCHOR_DETAILS], json!("Two anchors per segment"));
        assert_eq!(fields[RecordFields::REPORT], json!("Report body"));
        assert_eq!(fields[RecordFields::CREATED_AT], json!("2024-05-01T12:30:00Z"));
    }

    #[test]
    fn test_single_boom_has_one_segment() {
        let request = DeploymentReportRequest {
            is_cascade: false,
            segments: Some("4".into()),
            ..cascade_request()
        };
        let fields = build_fields(&request, "Report", created_at());

        assert_eq!(fields[RecordFields::SEGMENTS], json!(1));
        assert_eq!(fields[RecordFields::SEGMENT_LENGTH], json!(350.0));
        assert_eq!(fields[RecordFields::CASCADE], json!(false));
    }

    #[test]
    fn test_non_numeric_values_become_null() {
        let request = DeploymentReportRequest {
            current: Some("fast".into()),
            tension: None,
            interval: Some("as needed".into()),
            segments: Some("0".into()),
            anchors: Some(FieldValue::Number(2.5)),
            anchor_details_text: Some("   ".to_string()),
            ..cascade_request()
        };
        let fields = build_fields(&request, "Report", created_at());

        assert_eq!(fields[RecordFields::CURRENT], Value::Null);
        assert_eq!(fields[RecordFields::TENSION], Value::Null);
        assert_eq!(fields[RecordFields::ANCHOR_INTERVAL], Value::Null);
        assert_eq!(fields[RecordFields::SEGMENTS], Value::Null);
        assert_eq!(fields[RecordFields::SEGMENT_LENGTH], Value::Null);
        assert_eq!(fields[RecordFields::ANCHORS], Value::Null);
        assert_eq!(fields[RecordFields::ANCHOR_DETAILS], Value::Null);
        assert_eq!(fields.len(), 15);
    }
}
