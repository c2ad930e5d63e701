//! Instruction texts sent alongside the media.

/// Vitals dictation
pub const VITALS_PROMPT: &str = "Transcribe the Vitals information mentioned in the audio. \
Extract Blood Pressure (BP), Pulse rate, Temperature (Temp), Weight, and Oxygen Saturation (SpO2). \
Return only the structured JSON output with the exact keys: bp, pulse, temperature, weight, and spo2. \
Include the units in the extracted values.";

/// Full consultation to prescription draft
pub const PRESCRIPTION_PROMPT: &str = r#"
You are an expert medical scribe and assistant.
Listen to the following doctor-patient consultation audio/transcript.
Extract the clinical details and structure them into a strict JSON format.
Translate any non-English speech to English for the record, but keep specific medical terms standard.

Return strictly JSON with this schema:
{
  "patient_summary": "Brief summary of the patient's condition",
  "symptoms": ["List of symptoms"],
  "provisional_diagnosis": ["List of diagnoses"],
  "vitals": {
    "bp": "120/80",
    "pulse": "80",
    "temperature": "98.6",
    "weight": "70kg",
    "spo2": "99"
  },
  "medications": [
    {
      "drug_name": "Name",
      "dosage": "500mg",
      "frequency": "1-0-1",
      "duration": "5 days",
      "instructions": "After food"
    }
  ],
  "investigations": ["List of recommended tests like CBC, X-Ray"],
  "advice": "General medical advice given",
  "followup": "Review date or duration"
}
"#;

/// Uploaded lab/imaging report
pub const REPORT_ANALYSIS_PROMPT: &str = r#"
You are a radiologist and diagnostic expert.
Analyze the provided medical report image or PDF meticulously.
Extract the key findings and the final impression/diagnosis.
Most importantly, generate a 'doctors_summary' of exactly three (3) highly condensed bullet points.
Each bullet point must focus on one critical abnormal finding and must include the observed medical value
and the clinical normal reference range for context (e.g., "Hemoglobin is low at 11.5 g/dL (Normal: 12-16 g/dL)").
Respond strictly with the requested JSON object defined by the schema.

Return strictly JSON with this schema:
{
  "report_type": "Type of report e.g., X-Ray Chest, CBC, MRI Brain",
  "extracted_text": "Full text extracted from image",
  "findings": "Summary of detailed findings",
  "impression": "Final diagnostic impression or conclusion",
  "doctors_summary": [
    "First bullet point with value and normal range.",
    "Second bullet point with value and normal range.",
    "Third bullet point with value and normal range."
  ]
}
"#;
