//! Common types used throughout the report service

use boom_types::{ErrorResponse, ReportResponse};
use serde_json::Value;

/// Airtable column names for a deployment record
pub struct RecordFields;

impl RecordFields {
    pub const CURRENT: &'static str = "Current";
    pub const ANGLE: &'static str = "Angle";
    pub const RIVER_WIDTH: &'static str = "River Width";
    pub const RIVER_MILE: &'static str = "River Mile";
    pub const BOOM_LENGTH: &'static str = "Boom Length";
    pub const TENSION: &'static str = "Tension";
    pub const ANCHOR_INTERVAL: &'static str = "Anchor Interval";
    pub const DRIFT_TIME: &'static str = "Drift Time";
    pub const CASCADE: &'static str = "Cascade";
    pub const SEGMENTS: &'static str = "Segments";
    pub const SEGMENT_LENGTH: &'static str = "Segment Length";
    pub const ANCHORS: &'static str = "Anchors";
    pub const ANCHOR_DETAILS: &'static str = "Anchor Details";
    pub const REPORT: &'static str = "Report";
    pub const CREATED_AT: &'static str = "Created At";
}

/// Framework-neutral response produced by the request handler
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    pub fn ok(report: ReportResponse) -> Self {
        Self {
            status: 200,
            body: serde_json::to_value(report).unwrap_or(Value::Null),
        }
    }

    pub fn error(status: u16, error: ErrorResponse) -> Self {
        Self {
            status,
            body: serde_json::to_value(error).unwrap_or(Value::Null),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}
