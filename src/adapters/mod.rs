//! Infrastructure adapters. Implement outbound ports.
//!
//! AI provider, image files, local storage, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod media;
pub mod persistence;
pub mod ui;
