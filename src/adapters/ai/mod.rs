//! AI adapter module. Request building, response decoding, and the
//! `ProviderPort` implementations (OpenRouter over HTTP, mock for testing).

pub mod json_localize;
pub mod mock_adapter;
pub mod openrouter_adapter;
pub mod request_builder;
pub mod response_decoder;

pub use mock_adapter::MockProviderAdapter;
pub use openrouter_adapter::{OpenRouterAdapter, OpenRouterSettings};
pub use request_builder::{build_request, normalize_image};
pub use response_decoder::{Validation, decode};
