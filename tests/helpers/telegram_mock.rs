//! Mock Telegram API server for testing
//!
//! Simulates the Bot API with wiremock so handlers can run end to end
//! against configurable responses. Method paths are matched case
//! insensitively because the Bot API accepts any casing.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Create a Bot instance pointed at this mock server
    pub fn bot(&self) -> Bot {
        Bot::new(TEST_TOKEN).set_api_url(self.server.uri().parse().unwrap())
    }

    /// Mock sendMessage with a success response
    pub async fn mock_send_message(&self) {
        Mock::given(method("POST"))
            .and(path_regex("(?i)/sendmessage$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {
                    "message_id": 77,
                    "date": 1700000000,
                    "chat": {"id": 5, "type": "private", "first_name": "Test"},
                    "text": "ack"
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock deleteMessage with a success response
    pub async fn mock_delete_message(&self) {
        Mock::given(method("POST"))
            .and(path_regex("(?i)/deletemessage$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": true
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock getFile resolving to `file_path`
    pub async fn mock_get_file(&self, file_path: &str) {
        Mock::given(method("POST"))
            .and(path_regex("(?i)/getfile$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {
                    "file_id": "resolved",
                    "file_unique_id": "resolved-u",
                    "file_size": 3,
                    "file_path": file_path
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock getFile failing with a server error
    pub async fn mock_get_file_failure(&self) {
        Mock::given(method("POST"))
            .and(path_regex("(?i)/getfile$"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "ok": false,
                "error_code": 500,
                "description": "Internal Server Error"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock the file endpoint serving `bytes` for any downloaded path
    pub async fn mock_file_download(&self, bytes: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path_regex("(?i)^/file/bot.*"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
            .mount(&self.server)
            .await;
    }

    /// Texts of every sendMessage request received so far, in order
    pub async fn sent_texts(&self) -> Vec<String> {
        self.requests_to("sendmessage")
            .await
            .iter()
            .filter_map(|body| body.get("text").and_then(Value::as_str).map(String::from))
            .collect()
    }

    /// Whether any request hit an endpoint whose path contains `needle`
    pub async fn was_called(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .any(|req| req.url.path().to_lowercase().contains(&needle))
    }

    /// Parsed JSON bodies of requests whose path contains `needle`
    pub async fn requests_to(&self, needle: &str) -> Vec<Value> {
        let needle = needle.to_lowercase();
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().to_lowercase().contains(&needle))
            .filter_map(|req| serde_json::from_slice(&req.body).ok())
            .collect()
    }
}
