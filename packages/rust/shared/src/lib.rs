//! Shared types, error model, and configuration for DocDraft.
//!
//! This crate is the foundation depended on by all other DocDraft crates.
//! It provides:
//! - [`DocDraftError`]: the unified error type
//! - Domain types ([`DocumentRecord`], [`SessionState`], [`SessionStatus`])
//! - Configuration ([`AppConfig`], [`AgentConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AgentConfig, AppConfig, SummaryConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{DocDraftError, Result};
pub use types::{DEFAULT_FILE_NAME, DocumentRecord, SessionState, SessionStatus};
