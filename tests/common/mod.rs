use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use studyscout::config::{GatewayConfig, GeminiConfig};
use studyscout::gateway::Gateway;
use studyscout::providers::{GeminiProvider, Provider};

pub const TEST_MODEL: &str = "gemini-test";
pub const TEST_KEY: &str = "test-key";

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Path the provider posts to for the test model
#[allow(dead_code)]
pub fn generate_path() -> String {
    format!("/models/{}:generateContent", TEST_MODEL)
}

/// A successful generateContent body carrying `text`
#[allow(dead_code)]
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 34,
            "totalTokenCount": 46
        }
    })
}

/// Gemini provider pointed at a mock server
#[allow(dead_code)]
pub fn gemini_provider(api_base: &str) -> GeminiProvider {
    let config = GeminiConfig {
        api_key: Some(TEST_KEY.to_string()),
        model: TEST_MODEL.to_string(),
        api_base: api_base.to_string(),
        request_timeout_secs: 5,
    };
    GeminiProvider::new(config).expect("failed to create gemini provider")
}

/// Live gateway pointed at a mock server, with simulated delays disabled
#[allow(dead_code)]
pub fn live_gateway(api_base: &str) -> Gateway {
    let provider: Arc<dyn Provider> = Arc::new(gemini_provider(api_base));
    Gateway::new(Some(provider), GatewayConfig::immediate())
}

#[allow(dead_code)]
pub fn offline_gateway() -> Gateway {
    Gateway::offline(GatewayConfig::immediate())
}
