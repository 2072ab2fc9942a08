// Shared fixtures for unit tests. Test-only.

use crate::config::GatewayConfig;
use crate::types::{ChatCompletionResponse, Choice, ResponseMessage, Usage};
use std::time::Duration;

pub const TEST_MODEL: &str = "test/model:free";

pub fn create_test_config() -> GatewayConfig {
    GatewayConfig {
        api_key: Some("sk-or-test-key".to_string()),
        base_url: "https://gateway.test/api/v1".to_string(),
        model: TEST_MODEL.to_string(),
        request_timeout: Duration::from_secs(5),
        ..GatewayConfig::default()
    }
}

pub fn response_with_content(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: Some("gen-123".to_string()),
        model: Some(TEST_MODEL.to_string()),
        choices: vec![Choice {
            index: Some(0),
            message: ResponseMessage {
                role: Some("assistant".to_string()),
                content: Some(content.to_string()),
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: Some(Usage {
            prompt_tokens: 12,
            completion_tokens: 1,
            total_tokens: 13,
        }),
        error: None,
    }
}

pub fn response_without_choices() -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: Some("gen-empty".to_string()),
        model: Some(TEST_MODEL.to_string()),
        ..ChatCompletionResponse::default()
    }
}
