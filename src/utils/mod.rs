/// Shared helpers
pub mod env;
