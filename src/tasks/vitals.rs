//! Vitals Transcription
//!
//! Dictated vitals (BP, pulse, temperature, weight, SpO2) to structured
//! strings with units.

use crate::api::{Part, Schema};
use crate::tasks::lenient::scalar_to_string;
use crate::tasks::media::MediaPayload;
use crate::tasks::prompts::VITALS_PROMPT;
use crate::tasks::ClinicalTask;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Vital signs as spoken, units included
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Vitals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulse: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spo2: Option<String>,

    /// Any other vital the model reported
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Vitals {
    /// Whether nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.bp.is_none()
            && self.pulse.is_none()
            && self.temperature.is_none()
            && self.weight.is_none()
            && self.spo2.is_none()
            && self.extra.is_empty()
    }
}

impl TryFrom<Map<String, Value>> for Vitals {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let mut vitals = Vitals::default();

        for (key, value) in map {
            let text = scalar_to_string(value)
                .map_err(|e| format!("vital '{}': {}", key, e))?
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            let Some(text) = text else { continue };

            match key.as_str() {
                "bp" => vitals.bp = Some(text),
                "pulse" => vitals.pulse = Some(text),
                "temperature" => vitals.temperature = Some(text),
                "weight" => vitals.weight = Some(text),
                "spo2" => vitals.spo2 = Some(text),
                _ => {
                    vitals.extra.insert(key, text);
                }
            }
        }

        Ok(vitals)
    }
}

/// Response shape: five optional strings, none required
pub fn vitals_schema() -> Schema {
    Schema::object()
        .property(
            "bp",
            Schema::string().describe("Extracted Blood Pressure value, e.g., '120/80 mmHg'."),
        )
        .property(
            "pulse",
            Schema::string().describe("Extracted Pulse rate, e.g., '72 bpm'."),
        )
        .property(
            "temperature",
            Schema::string().describe("Extracted Temperature, e.g., '98.6 °F'."),
        )
        .property(
            "weight",
            Schema::string().describe("Extracted Weight, e.g., '75 kg'."),
        )
        .property(
            "spo2",
            Schema::string().describe("Extracted Oxygen Saturation, e.g., '98 %'."),
        )
}

/// Vitals dictation call
#[derive(Debug, Clone)]
pub struct VitalsTask {
    audio: MediaPayload,
}

impl VitalsTask {
    pub fn new(audio: MediaPayload) -> Self {
        Self { audio }
    }
}

impl ClinicalTask for VitalsTask {
    type Output = Vitals;

    const NAME: &'static str = "vitals";

    fn parts(&self) -> Vec<Part> {
        vec![self.audio.to_part(), Part::text(VITALS_PROMPT)]
    }

    fn response_schema(&self) -> Option<Schema> {
        Some(vitals_schema())
    }
}
