//! Prescription Drafts
//!
//! Full consultation audio to a draft prescription. This call sends no
//! response schema, so every field is optional and decoded leniently.

use crate::api::{Part, Schema};
use crate::error::Result;
use crate::tasks::lenient;
use crate::tasks::media::MediaPayload;
use crate::tasks::prompts::PRESCRIPTION_PROMPT;
use crate::tasks::vitals::Vitals;
use crate::tasks::ClinicalTask;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A prescribed medicine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Medication {
    #[serde(alias = "name", alias = "drugName", deserialize_with = "lenient::string")]
    pub drug_name: String,

    #[serde(deserialize_with = "lenient::string")]
    pub dosage: String,

    #[serde(deserialize_with = "lenient::string")]
    pub frequency: String,

    #[serde(deserialize_with = "lenient::string")]
    pub duration: String,

    #[serde(deserialize_with = "lenient::string")]
    pub instructions: String,
}

/// Structured draft extracted from a consultation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrescriptionDraft {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string_or_list"
    )]
    pub patient_summary: Option<String>,

    #[serde(alias = "diagnosis", deserialize_with = "lenient::list")]
    pub provisional_diagnosis: Vec<String>,

    #[serde(deserialize_with = "lenient::list")]
    pub symptoms: Vec<String>,

    #[serde(deserialize_with = "vitals_or_null")]
    pub vitals: Vitals,

    #[serde(alias = "medicines", deserialize_with = "medications_or_null")]
    pub medications: Vec<Medication>,

    #[serde(deserialize_with = "lenient::list")]
    pub investigations: Vec<String>,

    #[serde(deserialize_with = "lenient::string_or_list")]
    pub advice: String,

    #[serde(alias = "follow_up", deserialize_with = "lenient::string")]
    pub followup: String,
}

impl PrescriptionDraft {
    /// Whether the model extracted nothing usable
    pub fn is_empty(&self) -> bool {
        self.provisional_diagnosis.is_empty()
            && self.symptoms.is_empty()
            && self.medications.is_empty()
            && self.investigations.is_empty()
            && self.vitals.is_empty()
            && self.advice.trim().is_empty()
            && self.followup.trim().is_empty()
    }
}

fn vitals_or_null<'de, D>(deserializer: D) -> std::result::Result<Vitals, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vitals>::deserialize(deserializer)?.unwrap_or_default())
}

fn medications_or_null<'de, D>(deserializer: D) -> std::result::Result<Vec<Medication>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let medications = Option::<Vec<Medication>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(medications
        .into_iter()
        .filter(|m| !m.drug_name.trim().is_empty())
        .collect())
}

/// Consultation-to-prescription call
#[derive(Debug, Clone)]
pub struct PrescriptionTask {
    audio: MediaPayload,
}

impl PrescriptionTask {
    pub fn new(audio: MediaPayload) -> Self {
        Self { audio }
    }
}

impl ClinicalTask for PrescriptionTask {
    type Output = PrescriptionDraft;

    const NAME: &'static str = "prescription";

    fn parts(&self) -> Vec<Part> {
        vec![self.audio.to_part(), Part::text(PRESCRIPTION_PROMPT)]
    }

    fn response_schema(&self) -> Option<Schema> {
        None
    }

    fn finish(&self, output: PrescriptionDraft) -> Result<PrescriptionDraft> {
        if output.is_empty() {
            debug!("Prescription draft came back without any clinical content");
        }
        Ok(output)
    }
}
