//! Clinical Tasks
//!
//! The structured calls made on behalf of the clinic front-end. Each task
//! supplies its content, its response-shape descriptor and its result
//! checks; sending, failover and unwrapping are shared.

pub mod media;
pub mod prescription;
pub mod prompts;
pub mod report;
pub mod vitals;

mod lenient;

use crate::api::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, Schema};
use crate::client::http::truncate;
use crate::error::{Result, ScribeError};
use serde::de::DeserializeOwned;

pub use media::MediaPayload;
pub use prescription::{Medication, PrescriptionDraft, PrescriptionTask};
pub use report::{ReportAnalysis, ReportTask, MAX_SUMMARY_POINTS};
pub use vitals::{Vitals, VitalsTask};

/// A structured call: content builder, response shape and result unwrapping
pub trait ClinicalTask {
    /// Parsed result
    type Output: DeserializeOwned;

    /// Short name for diagnostics
    const NAME: &'static str;

    /// Local precondition checked before any network attempt
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Media and instruction parts sent to the service
    fn parts(&self) -> Vec<Part>;

    /// Declared response shape; `None` asks for free-form JSON
    fn response_schema(&self) -> Option<Schema>;

    /// Post-parse checks and normalisation
    fn finish(&self, output: Self::Output) -> Result<Self::Output> {
        Ok(output)
    }

    /// Full request for this task
    fn build_request(&self) -> GenerateContentRequest {
        GenerateContentRequest::new(self.parts())
            .with_generation_config(GenerationConfig::json(self.response_schema()))
    }

    /// Extract and parse the structured result from a successful response
    fn unwrap_response(&self, response: &GenerateContentResponse) -> Result<Self::Output> {
        let text = response.text().ok_or(ScribeError::EmptyResponse)?;
        let parsed = parse_structured(&text)?;
        self.finish(parsed)
    }
}

/// Parse model text as `T`, failing loudly with an excerpt of what came back
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T> {
    let body = lenient::strip_code_fence(text);
    serde_json::from_str(body).map_err(|e| {
        ScribeError::MalformedResponse(format!(
            "{}. Body: {}",
            e,
            truncate(body, 500)
        ))
    })
}
