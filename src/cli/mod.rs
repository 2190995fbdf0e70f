// mod.rs - CLI module

pub mod args;
pub mod config;
pub mod join;
pub mod merge;
pub mod validation;

// Re-export main types for convenience
pub use args::{from_env, Args};
pub use config::Config;
pub use join::{JoinArgs, JoinSettings};
pub use validation::validate_args;
