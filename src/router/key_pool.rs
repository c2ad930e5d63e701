//! API Key Pool
//!
//! Ordered, immutable pool of credentials discovered from numbered
//! configuration slots.

use crate::error::{Result, ScribeError};
use std::fmt;
use tracing::info;

/// Number of configuration slots scanned (slots are numbered from 1)
pub const MAX_KEY_SLOTS: u8 = 20;

/// Prefix every valid Google API key starts with
pub const KEY_PREFIX: &str = "AIza";

/// Environment variable prefix for slot `n` (`GEMINI_API_KEY_<n>`)
pub const KEY_ENV_PREFIX: &str = "GEMINI_API_KEY_";

/// Legacy front-end variable prefix, read when the primary name is unset
pub const LEGACY_KEY_ENV_PREFIX: &str = "VITE_GEMINI_API_KEY_";

/// A single API key and the slot it was loaded from
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    slot: u8,
    value: String,
}

impl Credential {
    /// Create a credential for `slot`
    pub fn new(slot: u8, value: impl Into<String>) -> Self {
        Self {
            slot,
            value: value.into(),
        }
    }

    /// Slot number (1-based) this key came from
    pub fn slot(&self) -> u8 {
        self.slot
    }

    /// The actual API key value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether `value` looks like a usable key: the Google prefix, then
    /// visible ASCII only so it can travel in a request header
    pub fn is_well_formed(value: &str) -> bool {
        value.starts_with(KEY_PREFIX) && value.bytes().all(|b| b.is_ascii_graphic())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.value.chars().take(KEY_PREFIX.len()).collect();
        f.debug_struct("Credential")
            .field("slot", &self.slot)
            .field("value", &format_args!("{}…({} chars)", visible, self.value.len()))
            .finish()
    }
}

/// Non-empty ordered pool of credentials; order is failover priority
#[derive(Debug, Clone)]
pub struct KeyPool {
    keys: Vec<Credential>,
}

impl KeyPool {
    /// Build a pool from already-validated credentials, keeping their order
    pub fn new(keys: Vec<Credential>) -> Result<Self> {
        if keys.is_empty() {
            return Err(ScribeError::StartupCredentialMissing);
        }
        Ok(Self { keys })
    }

    /// Load the pool from the process environment (and a `.env` file if present)
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Scan slots 1..=20 through `lookup`, skipping empty and malformed values
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let keys: Vec<Credential> = (1..=MAX_KEY_SLOTS)
            .filter_map(|slot| {
                let value = lookup(&format!("{}{}", KEY_ENV_PREFIX, slot))
                    .or_else(|| lookup(&format!("{}{}", LEGACY_KEY_ENV_PREFIX, slot)))?;
                let value = value.trim();
                Credential::is_well_formed(value).then(|| Credential::new(slot, value))
            })
            .collect();

        let pool = Self::new(keys)?;
        info!(
            count = pool.len(),
            slots = ?pool.slots(),
            "Loaded Gemini API keys"
        );
        Ok(pool)
    }

    /// Number of keys in the pool
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; an empty pool cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key at priority `index`
    pub fn get(&self, index: usize) -> Option<&Credential> {
        self.keys.get(index)
    }

    /// Keys in priority order
    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.keys.iter()
    }

    /// Slot numbers in priority order
    pub fn slots(&self) -> Vec<u8> {
        self.keys.iter().map(Credential::slot).collect()
    }
}
