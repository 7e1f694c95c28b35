//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_service;
pub mod session_service;

pub use analysis_service::AnalysisService;
pub use session_service::SessionService;
