//! ClinicAI - clinical extraction over Gemini with multi-key failover
//!
//! Turns consultation audio and uploaded reports into structured vitals,
//! prescription drafts and report analyses. Every call goes through a pool of
//! API keys, failing over to the next key when one is out of quota.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod router;
pub mod tasks;

use client::{GenerativeBackend, HttpBackend};
use config::{ConfigLoader, ServiceConfig};
use error::Result;
use router::{FailoverCaller, KeyPool};
use tasks::{
    ClinicalTask, MediaPayload, PrescriptionDraft, PrescriptionTask, ReportAnalysis, ReportTask,
    Vitals, VitalsTask,
};
use tracing::debug;

pub use error::ScribeError;

/// The client used by the clinic front-end for all AI operations
pub struct ScribeClient<B = HttpBackend> {
    caller: FailoverCaller<B>,
}

impl ScribeClient<HttpBackend> {
    /// Create a client from the environment: keys from `GEMINI_API_KEY_1..20`,
    /// service settings from the default config locations.
    ///
    /// Fails with [`ScribeError::StartupCredentialMissing`] when no key is found.
    pub fn from_env() -> Result<Self> {
        let pool = KeyPool::from_env()?;
        let loader = ConfigLoader::new()?;
        Self::with_config(pool, loader.config())
    }

    /// Create a client with an explicit pool and service configuration
    pub fn with_config(pool: KeyPool, config: &ServiceConfig) -> Result<Self> {
        Ok(Self::with_backend(pool, HttpBackend::new(config)?))
    }
}

impl<B: GenerativeBackend> ScribeClient<B> {
    /// Create a client over any backend
    pub fn with_backend(pool: KeyPool, backend: B) -> Self {
        Self {
            caller: FailoverCaller::new(pool, backend),
        }
    }

    /// The key pool in use
    pub fn pool(&self) -> &KeyPool {
        self.caller.pool()
    }

    /// The backend in use
    pub fn backend(&self) -> &B {
        self.caller.backend()
    }

    /// Run any structured task: validate locally, call with failover, unwrap
    pub async fn run<T: ClinicalTask>(&self, task: &T) -> Result<T::Output> {
        task.validate()?;

        let request = task.build_request();
        debug!(task = T::NAME, "Starting structured call");

        let response = self.caller.call(&request).await?;
        task.unwrap_response(&response)
    }

    /// Transcribe dictated vitals
    pub async fn transcribe_vitals(&self, audio: MediaPayload) -> Result<Vitals> {
        self.run(&VitalsTask::new(audio)).await
    }

    /// Turn a recorded consultation into a prescription draft
    pub async fn generate_prescription_draft(
        &self,
        audio: MediaPayload,
    ) -> Result<PrescriptionDraft> {
        self.run(&PrescriptionTask::new(audio)).await
    }

    /// Analyse an uploaded report image or PDF
    pub async fn analyze_report(&self, file: MediaPayload) -> Result<ReportAnalysis> {
        self.run(&ReportTask::new(file)).await
    }
}

impl<B> std::fmt::Debug for ScribeClient<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScribeClient").finish_non_exhaustive()
    }
}
