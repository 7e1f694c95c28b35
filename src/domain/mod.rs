//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod provider;

pub use entities::{AnalysisOutcome, FoodItem, User};
pub use errors::{AnalysisFailure, DomainError};
pub use provider::{
    ChatMessage, ContentPart, ImageUrl, MessageContent, ProviderRequest, RawProviderResponse, Role,
};
