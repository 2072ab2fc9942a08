//! Shared fixtures for gateway-chat integration tests
//!
//! Test-only helpers; never used by production code.

#![allow(dead_code)]

use gateway_chat::GatewayConfig;
use std::time::Duration;

pub const TEST_API_KEY: &str = "sk-or-integration-key";
pub const TEST_MODEL: &str = "deepseek/deepseek-r1-0528-qwen3-8b:free";
pub const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

/// Config pointing at a wiremock server that mimics the OpenRouter path layout
pub fn config_for(server_uri: &str) -> GatewayConfig {
    GatewayConfig::default()
        .with_api_key(TEST_API_KEY)
        .with_base_url(format!("{server_uri}/api/v1"))
        .with_model(TEST_MODEL)
        .with_request_timeout(Duration::from_secs(5))
}

pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "gen-1736000000-abc",
        "provider": "Chutes",
        "model": TEST_MODEL,
        "object": "chat.completion",
        "created": 1736000000,
        "choices": [{
            "index": 0,
            "logprobs": null,
            "finish_reason": "stop",
            "native_finish_reason": "stop",
            "message": {
                "role": "assistant",
                "content": content,
                "refusal": null,
                "reasoning": "The user asks a classic question."
            }
        }],
        "usage": {
            "prompt_tokens": 11,
            "completion_tokens": 7,
            "total_tokens": 18
        }
    })
}

pub fn error_body(message: &str, code: u16) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "message": message,
            "code": code
        }
    })
}
