pub mod analyzer;
pub mod ai_provider;
