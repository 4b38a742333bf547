//! Content services: the four document operations behind one trait.
//!
//! [`LocalContentService`] runs the in-process heuristics;
//! [`RemoteAgentService`] delegates to a hosted agent. Configuration picks
//! exactly one of them. Neither falls back to the other: errors surface to
//! the caller, which decides what to tell the user.

mod local;
mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use docdraft_shared::{AppConfig, DocumentRecord, Result};

pub use local::LocalContentService;
pub use remote::{RemoteAgentService, TaskType};

/// Extract, summarize, and draft. Implementations must be shareable across
/// conversations.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Human-readable service name for tracing.
    fn name(&self) -> &str;

    /// Turn an upload's bytes into plain text. The content type, when known,
    /// takes precedence over the file extension.
    async fn extract_content(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String>;

    /// Bullet summary of one document's text.
    async fn summarize_document(&self, file_name: &str, content: &str) -> Result<String>;

    /// Combined summary across all documents of a conversation.
    async fn summarize_documents(&self, documents: &[DocumentRecord]) -> Result<String>;

    /// Architecture draft from all documents of a conversation.
    async fn generate_architecture_document(&self, documents: &[DocumentRecord]) -> Result<String>;
}

/// Build the content service selected by `config`.
///
/// A fully configured `[agent]` section selects the remote agent; anything
/// less selects the local heuristics.
pub fn content_service_from_config(config: &AppConfig) -> Result<Arc<dyn ContentService>> {
    if config.agent.is_configured() {
        let service = RemoteAgentService::from_config(&config.agent)?;
        info!(endpoint = %service.tasks_url(), "using remote agent content service");
        Ok(Arc::new(service))
    } else {
        info!("using local content service");
        Ok(Arc::new(LocalContentService::new(config.summary.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdraft_shared::AgentConfig;

    #[test]
    fn unconfigured_agent_selects_local() {
        let service = content_service_from_config(&AppConfig::default()).expect("service");
        assert_eq!(service.name(), "local");
    }

    #[test]
    fn partially_configured_agent_selects_local() {
        let config = AppConfig {
            agent: AgentConfig {
                endpoint: Some("https://agents.example.com".into()),
                api_key_env: "DD_TEST_SELECT_MISSING_KEY".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let service = content_service_from_config(&config).expect("service");
        assert_eq!(service.name(), "local");
    }
}
