//! Report synthesis using Gemini

use crate::clients::GeminiClient;
use crate::error::{BoomError, Result};
use boom_types::{DeploymentReportRequest, FieldValue};

pub const SYSTEM_INSTRUCTION: &str = "You are an experienced oil spill response planner. \
Write clear, practical field reports for response crews deploying containment boom on rivers. \
Use plain language, short sections and concrete numbers. Do not invent measurements that were not provided.";

pub const FALLBACK_REPORT_TEXT: &str =
    "Report text could not be generated. Review the calculated values and try again.";

/// What to do when the generation service answers without usable text
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EmptyTextPolicy {
    /// Fail the request with `BoomError::EmptyGeneration`
    #[default]
    Fail,
    /// Substitute fixed text and carry on
    Fallback(String),
}

impl EmptyTextPolicy {
    pub fn fallback() -> Self {
        EmptyTextPolicy::Fallback(FALLBACK_REPORT_TEXT.to_string())
    }
}

pub struct ReportSynthesizer {
    gemini: GeminiClient,
    empty_text: EmptyTextPolicy,
}

impl ReportSynthesizer {
    pub fn new(gemini: GeminiClient, empty_text: EmptyTextPolicy) -> Self {
        Self { gemini, empty_text }
    }

    /// Generate the report body for a deployment
    pub async fn synthesize(&self, request: &DeploymentReportRequest) -> Result<String> {
        let prompt = build_prompt(request);
        log::debug!("Report prompt is {} characters", prompt.len());

        match self.gemini.generate(&prompt, SYSTEM_INSTRUCTION).await? {
            Some(text) => Ok(text),
            None => match &self.empty_text {
                EmptyTextPolicy::Fail => Err(BoomError::EmptyGeneration(
                    "Gemini returned no report text".to_string(),
                )),
                EmptyTextPolicy::Fallback(text) => {
                    log::warn!("Gemini returned no report text, using fallback");
                    Ok(text.clone())
                }
            },
        }
    }
}

fn show(value: &Option<FieldValue>) -> String {
    match value {
        Some(v) if !v.is_blank() => v.display(),
        _ => "not provided".to_string(),
    }
}

/// Build the user prompt from the calculator outputs
pub fn build_prompt(request: &DeploymentReportRequest) -> String {
    let mut prompt = format!(
        "Write a boom deployment report for an oil spill response on a river.\n\
        \n\
        Site conditions:\n\
        - River mile: {}\n\
        - River width: {} ft\n\
        - Surface current: {} knots\n\
        - Drift time: {} seconds\n\
        \n\
        Calculated deployment:\n\
        - Boom angle to the current: {} degrees\n\
        - Total boom length: {} ft\n\
        - Estimated boom tension: {} lbs\n\
        - Anchor interval: {} ft\n\
        - Anchors required: {}\n",
        show(&request.river_mile),
        show(&request.river_width),
        show(&request.current),
        show(&request.drift_time),
        show(&request.angle),
        show(&request.calculated_boom_length),
        show(&request.tension),
        show(&request.interval),
        show(&request.anchors),
    );

    if request.is_cascade {
        prompt.push_str(&format!(
            "\nThe current is too strong for a single boom, so a cascade booming system of {} segments \
            is deployed in series. Explain how the segments should be staggered and overlapped \
            so oil escaping one segment is caught by the next.\n",
            show(&request.segments)
        ));
    }

    if let Some(details) = request
        .anchor_details_text
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        prompt.push_str(&format!("\nAnchor placement details:\n{}\n", details));
    }

    prompt.push_str(
        "\nCover equipment staging, deployment sequence, anchoring, crew safety and monitoring. \
        Finish with a short checklist for the crew lead.",
    );
    prompt
}
