//! API Module
//!
//! Wire types for the Gemini `generateContent` method.

pub mod request;
pub mod response;
pub mod schema;

pub use request::{Content, GenerateContentRequest, GenerationConfig, InlineData, Part};
pub use response::{Candidate, GenerateContentResponse, UsageMetadata};
pub use schema::{Schema, SchemaType};
