//! Report Analysis
//!
//! Uploaded lab or imaging report (image or PDF) to findings, impression and
//! a short summary for the doctor.

use crate::api::{Part, Schema};
use crate::error::{Result, ScribeError};
use crate::tasks::media::MediaPayload;
use crate::tasks::prompts::REPORT_ANALYSIS_PROMPT;
use crate::tasks::ClinicalTask;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upper bound on summary bullet points
pub const MAX_SUMMARY_POINTS: usize = 3;

/// Structured analysis of an uploaded report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAnalysis {
    pub report_type: String,
    pub extracted_text: String,
    pub findings: String,
    pub impression: String,
    pub doctors_summary: Vec<String>,
}

/// Response shape: four required strings and at most three summary bullets
pub fn report_schema() -> Schema {
    Schema::object()
        .required_property(
            "report_type",
            Schema::string().describe(
                "The type of the report (e.g., 'Blood Test', 'X-Ray Report', 'ECG').",
            ),
        )
        .required_property(
            "extracted_text",
            Schema::string().describe("All legible text extracted from the report."),
        )
        .required_property(
            "findings",
            Schema::string()
                .describe("The detailed findings or observation section of the report."),
        )
        .required_property(
            "impression",
            Schema::string()
                .describe("The final conclusion or diagnostic impression/summary."),
        )
        .required_property(
            "doctors_summary",
            Schema::array(Schema::string())
                .describe(
                    "A maximum of three critical bullet points (strings) summarizing the most abnormal results.",
                )
                .max_items(MAX_SUMMARY_POINTS as u32),
        )
}

/// Report analysis call
#[derive(Debug, Clone)]
pub struct ReportTask {
    file: MediaPayload,
}

impl ReportTask {
    pub fn new(file: MediaPayload) -> Self {
        Self { file }
    }
}

impl ClinicalTask for ReportTask {
    type Output = ReportAnalysis;

    const NAME: &'static str = "report";

    fn validate(&self) -> Result<()> {
        if self.file.is_image_or_pdf() {
            Ok(())
        } else {
            Err(ScribeError::UnsupportedInputType(
                self.file.mime_type().to_string(),
            ))
        }
    }

    fn parts(&self) -> Vec<Part> {
        vec![self.file.to_part(), Part::text(REPORT_ANALYSIS_PROMPT)]
    }

    fn response_schema(&self) -> Option<Schema> {
        Some(report_schema())
    }

    /// Blank report type, findings or impression is rejected; extra summary
    /// bullets beyond the cap are dropped, keeping the first ones.
    fn finish(&self, mut output: ReportAnalysis) -> Result<ReportAnalysis> {
        for (field, value) in [
            ("report_type", &output.report_type),
            ("findings", &output.findings),
            ("impression", &output.impression),
        ] {
            if value.trim().is_empty() {
                return Err(ScribeError::MalformedResponse(format!(
                    "report analysis returned an empty '{}'",
                    field
                )));
            }
        }

        if output.doctors_summary.len() > MAX_SUMMARY_POINTS {
            warn!(
                received = output.doctors_summary.len(),
                kept = MAX_SUMMARY_POINTS,
                "Report summary exceeded the bullet cap, truncating"
            );
            output.doctors_summary.truncate(MAX_SUMMARY_POINTS);
        }

        Ok(output)
    }
}
