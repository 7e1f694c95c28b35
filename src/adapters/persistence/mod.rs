//! Persistence adapters. Local credential store.

pub mod user_store_json;

pub use user_store_json::JsonUserStore;
