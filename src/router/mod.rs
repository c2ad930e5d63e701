//! Router Module
//!
//! Key pool management, rejection classification and credential failover.

pub mod classify;
pub mod failover;
pub mod key_pool;

pub use classify::is_credential_rejection;
pub use failover::FailoverCaller;
pub use key_pool::{Credential, KeyPool};
