//! Core domain logic for DocDraft.
//!
//! This crate ties extraction and summarization into the conversation flow:
//! the architecture assembler, the per-conversation session store, the
//! content services (local heuristics or a hosted agent), and the
//! [`DocumentAgent`] turn handler.

pub mod agent;
pub mod architecture;
pub mod service;
pub mod session;

pub use agent::{DocumentAgent, Intent, TurnReply, Upload, WELCOME_MESSAGE};
pub use service::{
    ContentService, LocalContentService, RemoteAgentService, TaskType, content_service_from_config,
};
pub use session::{SessionHandle, SessionStore};
