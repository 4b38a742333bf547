//! Hosted-agent content service.
//!
//! Each operation is one JSON `POST` to
//! `<endpoint>/projects/<project>/agents/<agent_id>/tasks`:
//!
//! ```text
//! → {"task_type": "summarize_document", "file_name": "...", "content": "..."}
//! ← {"text": "..."}
//! ```
//!
//! The API key travels in the `api-key` header. Timeouts come from config;
//! nothing is retried here.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;
use uuid::Uuid;

use docdraft_shared::{AgentConfig, DocDraftError, DocumentRecord, Result};

use super::ContentService;

/// User-Agent string for agent requests.
const USER_AGENT: &str = concat!("DocDraft/", env!("CARGO_PKG_VERSION"));

/// Error bodies longer than this are cut in messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// Protocol types
// ---------------------------------------------------------------------------

/// Operations the agent understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    ExtractContent,
    SummarizeDocument,
    SummarizeDocuments,
    GenerateArchitecture,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtractContent => "extract_content",
            Self::SummarizeDocument => "summarize_document",
            Self::SummarizeDocuments => "summarize_documents",
            Self::GenerateArchitecture => "generate_architecture",
        }
    }
}

/// Request body sent to the agent.
#[derive(Debug, Serialize)]
struct AgentTask<'a> {
    task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    documents: Option<&'a [DocumentRecord]>,
}

impl<'a> AgentTask<'a> {
    fn new(task_type: TaskType) -> Self {
        Self {
            task_type,
            file_name: None,
            content_type: None,
            content: None,
            content_base64: None,
            documents: None,
        }
    }
}

/// Successful response body.
#[derive(Debug, Deserialize)]
struct AgentReply {
    text: String,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Content service backed by a hosted agent.
#[derive(Debug, Clone)]
pub struct RemoteAgentService {
    client: Client,
    tasks_url: Url,
    api_key: String,
}

impl RemoteAgentService {
    /// Build the service from a fully configured `[agent]` section.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            DocDraftError::config(format!(
                "agent API key not found. Set the {} environment variable.",
                config.api_key_env
            ))
        })?;
        let agent_id = config
            .agent_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DocDraftError::config("agent_id is not set"))?;

        let tasks_url = tasks_url(
            &config.endpoint_url()?,
            config.project_name.as_deref(),
            agent_id,
        )?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DocDraftError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            tasks_url,
            api_key,
        })
    }

    /// Where tasks are posted.
    pub fn tasks_url(&self) -> &Url {
        &self.tasks_url
    }

    /// Post one task and return the agent's text.
    #[instrument(skip_all, fields(task = task.task_type.as_str()))]
    async fn send_task(&self, task: AgentTask<'_>) -> Result<String> {
        let request_id = Uuid::now_v7().to_string();
        debug!(%request_id, url = %self.tasks_url, "sending agent task");

        let response = self
            .client
            .post(self.tasks_url.clone())
            .header("api-key", &self.api_key)
            .header("x-request-id", &request_id)
            .json(&task)
            .send()
            .await
            .map_err(|e| DocDraftError::Network(format!("{}: {e}", self.tasks_url)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            warn!(%status, %request_id, "agent task rejected");
            return Err(DocDraftError::Agent(format!(
                "{} failed with HTTP {status}: {snippet}",
                task.task_type.as_str()
            )));
        }

        let reply: AgentReply = response.json().await.map_err(|e| {
            DocDraftError::Agent(format!(
                "invalid {} response: {e}",
                task.task_type.as_str()
            ))
        })?;

        Ok(reply.text.trim().to_string())
    }
}

/// `<endpoint>/projects/<project>/agents/<agent_id>/tasks`, project optional.
fn tasks_url(endpoint: &Url, project: Option<&str>, agent_id: &str) -> Result<Url> {
    let mut url = endpoint.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            DocDraftError::validation(format!("agent endpoint cannot be a base URL: {endpoint}"))
        })?;
        segments.pop_if_empty();
        if let Some(project) = project.map(str::trim).filter(|p| !p.is_empty()) {
            segments.push("projects").push(project);
        }
        segments.push("agents").push(agent_id).push("tasks");
    }
    Ok(url)
}

#[async_trait]
impl ContentService for RemoteAgentService {
    fn name(&self) -> &str {
        "remote-agent"
    }

    async fn extract_content(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String> {
        let task = AgentTask {
            file_name: Some(file_name),
            content_type,
            content_base64: Some(BASE64.encode(bytes)),
            ..AgentTask::new(TaskType::ExtractContent)
        };
        self.send_task(task).await
    }

    async fn summarize_document(&self, file_name: &str, content: &str) -> Result<String> {
        let task = AgentTask {
            file_name: Some(file_name),
            content: Some(content),
            ..AgentTask::new(TaskType::SummarizeDocument)
        };
        self.send_task(task).await
    }

    async fn summarize_documents(&self, documents: &[DocumentRecord]) -> Result<String> {
        let task = AgentTask {
            documents: Some(documents),
            ..AgentTask::new(TaskType::SummarizeDocuments)
        };
        self.send_task(task).await
    }

    async fn generate_architecture_document(&self, documents: &[DocumentRecord]) -> Result<String> {
        let task = AgentTask {
            documents: Some(documents),
            ..AgentTask::new(TaskType::GenerateArchitecture)
        };
        self.send_task(task).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> RemoteAgentService {
        RemoteAgentService {
            client: Client::new(),
            tasks_url: tasks_url(
                &Url::parse(&server.uri()).unwrap(),
                Some("arch"),
                "asst_1",
            )
            .unwrap(),
            api_key: "test-key".into(),
        }
    }

    #[test]
    fn builds_tasks_url() {
        let base = Url::parse("https://agents.example.com/api/").unwrap();
        let url = tasks_url(&base, Some("arch"), "asst_1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://agents.example.com/api/projects/arch/agents/asst_1/tasks"
        );

        let url = tasks_url(&base, None, "asst 2").unwrap();
        assert_eq!(
            url.as_str(),
            "https://agents.example.com/api/agents/asst%202/tasks"
        );
    }

    #[test]
    fn task_serializes_without_empty_fields() {
        let task = AgentTask {
            file_name: Some("a.pdf"),
            content: Some("hello"),
            ..AgentTask::new(TaskType::SummarizeDocument)
        };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"task_type":"summarize_document","file_name":"a.pdf","content":"hello"}"#
        );
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = AgentConfig {
            endpoint: Some("https://agents.example.com".into()),
            agent_id: Some("asst_1".into()),
            api_key_env: "DD_TEST_REMOTE_MISSING_KEY".into(),
            ..Default::default()
        };
        let err = RemoteAgentService::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("DD_TEST_REMOTE_MISSING_KEY"));
    }

    #[tokio::test]
    async fn summarize_document_posts_task() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/projects/arch/agents/asst_1/tasks"))
            .and(header("api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "task_type": "summarize_document",
                "file_name": "plan.pdf",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "text": "- Remote bullet.\n" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        let summary = service
            .summarize_document("plan.pdf", "Some content.")
            .await
            .unwrap();
        assert_eq!(summary, "- Remote bullet.");
    }

    #[tokio::test]
    async fn extract_content_sends_base64() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "task_type": "extract_content",
                "content_type": "application/pdf",
                "content_base64": "aGVsbG8=",
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "hello" })),
            )
            .mount(&server)
            .await;

        let service = service_for(&server);
        let text = service
            .extract_content("a.pdf", Some("application/pdf"), b"hello")
            .await
            .unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn http_errors_surface_as_agent_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service
            .generate_architecture_document(&[])
            .await
            .unwrap_err();
        match err {
            DocDraftError::Agent(msg) => {
                assert!(msg.contains("generate_architecture"));
                assert!(msg.contains("503"));
                assert!(msg.contains("overloaded"));
            }
            other => panic!("expected Agent error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_reply_is_an_agent_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let docs = vec![DocumentRecord::new(Some("a.pdf"), "x")];
        let err = service.summarize_documents(&docs).await.unwrap_err();
        assert!(matches!(err, DocDraftError::Agent(_)));
    }
}
