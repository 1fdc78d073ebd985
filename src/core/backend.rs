//! Generation backend: the only fallible, blocking collaborator.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::api::models::{fetch_models, sort_models};
use crate::api::{ChatMessage, ChatOptions, ChatRequest, ChatResponse, ModelInfo};
use crate::core::models::ModelSelection;
use crate::utils::url::construct_api_url;

/// Everything the model server needs for one reply.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: ModelSelection,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Ollama server not reachable at {base_url}. Start it with: ollama serve")]
    Unreachable {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),
    #[error("Ollama returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response from Ollama: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Ollama error: {0}")]
    Api(String),
}

impl BackendError {
    pub(crate) fn from_transport(err: reqwest::Error, base_url: &str) -> Self {
        if err.is_connect() {
            BackendError::Unreachable {
                base_url: base_url.to_string(),
                source: err,
            }
        } else {
            BackendError::Http(err)
        }
    }

    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = error_summary(body).unwrap_or_else(|| {
            let collapsed = collapse_whitespace(body);
            if collapsed.is_empty() {
                "<empty body>".to_string()
            } else {
                collapsed
            }
        });
        BackendError::Status { status, message }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pull a human-readable message out of an Ollama error body such as
/// `{"error":"model \"x\" not found, try pulling it first"}`.
fn error_summary(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body.trim()).ok()?;
    let summary = match value.get("error") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(|message| message.as_str().map(str::to_owned)),
        _ => value
            .get("message")
            .and_then(|message| message.as_str().map(str::to_owned)),
    }?;
    let collapsed = collapse_whitespace(&summary);
    (!collapsed.is_empty()).then_some(collapsed)
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Produce the assistant reply for `request`. One attempt, no retry.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError>;
}

/// Client for a local Ollama daemon.
#[derive(Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Models pulled on the server, newest first.
    pub async fn installed_models(&self) -> Result<Vec<ModelInfo>, BackendError> {
        let mut models = fetch_models(&self.client, &self.base_url).await?.models;
        sort_models(&mut models);
        Ok(models)
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let chat_url = construct_api_url(&self.base_url, "api/chat");
        let body = ChatRequest {
            model: request.model.id(),
            messages: &request.messages,
            stream: false,
            options: ChatOptions {
                temperature: request.temperature,
            },
        };

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            url = %chat_url,
            "sending chat request"
        );

        let response = self
            .client
            .post(chat_url)
            .json(&body)
            .send()
            .await
            .map_err(|err| BackendError::from_transport(err, &self.base_url))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| BackendError::from_transport(err, &self.base_url))?;

        if !status.is_success() {
            return Err(BackendError::from_status(status.as_u16(), &text));
        }

        let reply: ChatResponse = serde_json::from_str(&text)?;
        if let Some(error) = reply.error {
            return Err(BackendError::Api(error));
        }

        let content = reply
            .message
            .map(|message| message.content)
            .ok_or_else(|| BackendError::Api("response carried no message".to_string()))?;
        debug!(chars = content.len(), "received chat reply");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    async fn read_http_request(stream: &mut TcpStream) -> Result<(String, Vec<u8>), String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let read = stream
                .read(&mut chunk)
                .await
                .map_err(|err| err.to_string())?;
            if read == 0 {
                return Err("Unexpected EOF while reading HTTP headers".to_string());
            }
            buffer.extend_from_slice(&chunk[..read]);
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let request_line = head.lines().next().unwrap_or_default().to_string();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let mut body = buffer[header_end..].to_vec();
        while body.len() < content_length {
            let read = stream
                .read(&mut chunk)
                .await
                .map_err(|err| err.to_string())?;
            if read == 0 {
                return Err("Unexpected EOF while reading HTTP body".to_string());
            }
            body.extend_from_slice(&chunk[..read]);
        }
        body.truncate(content_length);

        Ok((request_line, body))
    }

    /// Answer exactly one request and hand back what was received.
    async fn serve_once(
        status: &'static str,
        body: String,
    ) -> (String, JoinHandle<Result<(String, Vec<u8>), String>>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("local addr should resolve");

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
            let received = read_http_request(&mut stream).await?;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .await
                .map_err(|err| err.to_string())?;
            let _ = stream.shutdown().await;
            Ok(received)
        });

        (format!("http://{addr}"), server)
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            model: ModelSelection::DeepseekR1Medium,
            messages: vec![
                ChatMessage::new("system", "be helpful"),
                ChatMessage::new("assistant", "Hi"),
                ChatMessage::new("user", "Fix this loop"),
            ],
            temperature: 0.3,
        }
    }

    #[tokio::test]
    async fn generate_posts_messages_and_returns_reply() {
        let reply = serde_json::json!({
            "model": "deepseek-r1:3b",
            "message": {"role": "assistant", "content": "Here's the fix..."},
            "done": true
        })
        .to_string();
        let (base_url, server) = serve_once("200 OK", reply).await;

        let backend = OllamaBackend::new(format!("{base_url}/"));
        let content = backend
            .generate(&request())
            .await
            .expect("generation should succeed");
        assert_eq!(content, "Here's the fix...");

        let (request_line, body) = server
            .await
            .expect("server task should finish")
            .expect("server should read the request");
        assert_eq!(request_line, "POST /api/chat HTTP/1.1");

        let sent: serde_json::Value = serde_json::from_slice(&body).expect("body is json");
        assert_eq!(sent["model"], "deepseek-r1:3b");
        assert_eq!(sent["stream"], false);
        let roles: Vec<_> = sent["messages"]
            .as_array()
            .expect("messages array")
            .iter()
            .map(|m| m["role"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(roles, vec!["system", "assistant", "user"]);
        let temperature = sent["options"]["temperature"].as_f64().unwrap_or_default();
        assert!((temperature - 0.3).abs() < 1e-6);
    }

    #[tokio::test]
    async fn non_success_status_surfaces_server_message() {
        let body = r#"{"error":"model \"deepseek-r1:3b\" not found, try pulling it first"}"#;
        let (base_url, server) = serve_once("404 Not Found", body.to_string()).await;

        let err = OllamaBackend::new(base_url)
            .generate(&request())
            .await
            .expect_err("404 should fail");
        match &err {
            BackendError::Status { status, message } => {
                assert_eq!(*status, 404);
                assert!(message.contains("try pulling it first"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let _ = server.await;
    }

    #[tokio::test]
    async fn error_field_in_success_body_is_an_api_error() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"error":"out of memory"}"#.to_string()).await;

        let err = OllamaBackend::new(base_url)
            .generate(&request())
            .await
            .expect_err("error body should fail");
        assert!(matches!(err, BackendError::Api(ref message) if message == "out of memory"));
        let _ = server.await;
    }

    #[tokio::test]
    async fn garbage_body_is_a_decode_error() {
        let (base_url, server) = serve_once("200 OK", "not json".to_string()).await;

        let err = OllamaBackend::new(base_url)
            .generate(&request())
            .await
            .expect_err("garbage should fail");
        assert!(matches!(err, BackendError::Decode(_)));
        let _ = server.await;
    }

    #[tokio::test]
    async fn closed_port_reports_unreachable_server() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let addr = listener.local_addr().expect("local addr should resolve");
        drop(listener);

        let base_url = format!("http://{addr}");
        let err = OllamaBackend::new(base_url.clone())
            .generate(&request())
            .await
            .expect_err("nothing is listening");
        match &err {
            BackendError::Unreachable {
                base_url: reported, ..
            } => assert_eq!(reported, &base_url),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("ollama serve"));
    }

    #[tokio::test]
    async fn installed_models_lists_tags() {
        let tags = serde_json::json!({
            "models": [
                {"name": "deepseek-r1:1.5b", "modified_at": "2024-01-01T00:00:00Z"},
                {"name": "deepseek-r1:3b", "modified_at": "2024-05-01T00:00:00Z"}
            ]
        })
        .to_string();
        let (base_url, server) = serve_once("200 OK", tags).await;

        let models = OllamaBackend::new(base_url)
            .installed_models()
            .await
            .expect("tags should load");
        let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["deepseek-r1:3b", "deepseek-r1:1.5b"]);

        let (request_line, _) = server
            .await
            .expect("server task should finish")
            .expect("server should read the request");
        assert_eq!(request_line, "GET /api/tags HTTP/1.1");
    }

    #[test]
    fn status_errors_fall_back_to_raw_body() {
        let err = BackendError::from_status(502, "  Bad\n gateway  ");
        assert_eq!(err.to_string(), "Ollama returned status 502: Bad gateway");

        let err = BackendError::from_status(500, "");
        assert_eq!(err.to_string(), "Ollama returned status 500: <empty body>");
    }
}
