//! Provider wire conventions and configuration-driven routing

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::MockProvider;
use gateway_config::loader::apply_env_overrides;
use gateway_config::{ConfigFormat, ConfigLoader, ProviderConfig};
use gateway_core::{ChatMessage, ChatRequest};
use gateway_providers::{
    AuthScheme, HeaderBuilder, RequestExtension, ReqwestTransport,
};
use gateway_routing::GatewayRouter;
use pretty_assertions::assert_eq;
use reqwest::header::HeaderName;
use serde_json::{json, Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::sync::Arc;

fn request_with_extras() -> ChatRequest {
    ChatRequest::builder()
        .message(ChatMessage::user("Hello"))
        .additional_property("safe_mode", json!(true))
        .additional_property("metadata", json!({"trace": "abc"}))
        .build()
        .unwrap()
}

fn body_keys(body: &Value) -> BTreeSet<String> {
    body.as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_openai_uses_bearer_auth() {
    let openai = MockProvider::new().await;
    openai.mock_bearer_completion(OPENAI_KEY).await;

    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));
    let response = router
        .route(&simple_chat_request(), Some("openai"))
        .await
        .unwrap();

    assert_eq!(response.provider.as_deref(), Some("openai"));
    let request = &openai.received().await[0];
    assert!(!request.headers.contains_key("x-api-key"));
}

#[tokio::test]
async fn test_anthropic_uses_api_key_header() {
    let openai = MockProvider::new().await;
    let anthropic = MockProvider::new().await;
    anthropic.mock_anthropic_completion(ANTHROPIC_KEY).await;

    let router = reqwest_router(&gateway_config(&openai.url(), &anthropic.url()));
    let response = router
        .route(&simple_chat_request(), Some("anthropic"))
        .await
        .unwrap();

    assert_eq!(response.provider.as_deref(), Some("anthropic"));
    let request = &anthropic.received().await[0];
    assert!(!request.headers.contains_key("authorization"));
    assert_eq!(
        request.headers.get("content-type").map(|v| v.as_bytes()),
        Some(b"application/json".as_slice())
    );
}

#[tokio::test]
async fn test_anthropic_body_has_no_extra_fields() {
    let anthropic = MockProvider::new().await;
    anthropic.mock_chat_completion().await;

    let router = reqwest_router(&gateway_config(&anthropic.url(), &anthropic.url()));
    router
        .route(&request_with_extras(), Some("anthropic"))
        .await
        .unwrap();

    let body = anthropic.last_body().await;
    let expected: BTreeSet<String> = ["max_tokens", "messages", "model", "stream", "temperature"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(body_keys(&body), expected);
    assert_eq!(body["model"], "claude-3-haiku-20240307");
}

#[tokio::test]
async fn test_additional_properties_not_forwarded_by_default() {
    let openai = MockProvider::new().await;
    openai.mock_chat_completion().await;

    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));
    router.route(&request_with_extras(), None).await.unwrap();

    let body = openai.last_body().await;
    assert!(body.get("safe_mode").is_none());
    assert!(body.get("metadata").is_none());
    assert!(body.get("additional_properties").is_none());
}

struct ForwardExtras;

impl RequestExtension for ForwardExtras {
    fn extension_fields(&self, request: &ChatRequest) -> Map<String, Value> {
        request.additional_properties.clone().unwrap_or_default()
    }
}

#[tokio::test]
async fn test_registered_extension_adds_fields() {
    let mistral = MockProvider::new().await;
    mistral.mock_bearer_completion("mistral-key").await;

    let config = gateway_config(&mistral.url(), &mistral.url()).with_provider(
        "mistral",
        ProviderConfig::new(mistral.url(), "mistral-key").with_default_model("mistral-small"),
    );
    let router = GatewayRouter::builder(&config)
        .extension("mistral", ForwardExtras)
        .transport(Arc::new(ReqwestTransport::new().unwrap()))
        .build()
        .unwrap();

    router
        .route(&request_with_extras(), Some("mistral"))
        .await
        .unwrap();

    let body = mistral.last_body().await;
    assert_eq!(body["model"], "mistral-small");
    assert_eq!(body["safe_mode"], true);
    assert_eq!(body["metadata"], json!({"trace": "abc"}));
}

#[tokio::test]
async fn test_custom_auth_scheme() {
    let cohere = MockProvider::new().await;
    cohere.mock_chat_completion().await;

    let config = gateway_config(&cohere.url(), &cohere.url()).with_provider(
        "cohere",
        ProviderConfig::new(cohere.url(), "co-key").with_default_model("command-r"),
    );
    let headers = HeaderBuilder::default().with_scheme(
        "cohere",
        AuthScheme::ApiKeyHeader {
            header: HeaderName::from_static("x-cohere-key"),
            version: None,
        },
    );
    let router = GatewayRouter::builder(&config)
        .header_builder(headers)
        .transport(Arc::new(ReqwestTransport::new().unwrap()))
        .build()
        .unwrap();

    router
        .route(&simple_chat_request(), Some("cohere"))
        .await
        .unwrap();

    let request = &cohere.received().await[0];
    assert_eq!(
        request.headers.get("x-cohere-key").map(|v| v.as_bytes()),
        Some(b"co-key".as_slice())
    );
    assert!(!request.headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_yaml_config_drives_routing() {
    let anthropic = MockProvider::new().await;
    anthropic.mock_anthropic_completion("ant-from-file").await;

    let yaml = format!(
        r#"
default_provider: anthropic
defaults:
  max_tokens: 256
  temperature: 0.1
providers:
  anthropic:
    enabled: true
    base_url: {url}
    api_key: ant-from-file
    default_model: claude-3-5-sonnet
    timeout: 2s
  ollama:
    enabled: false
    base_url: http://127.0.0.1:11434/v1
"#,
        url = anthropic.url()
    );
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = ConfigLoader::new()
        .with_file(file.path().to_string_lossy().to_string())
        .with_env_overrides(false)
        .load()
        .await
        .unwrap();
    let router = reqwest_router(&config);

    assert_eq!(router.list_available(), vec!["anthropic"]);
    let response = router.route(&simple_chat_request(), None).await.unwrap();
    assert_eq!(response.provider.as_deref(), Some("anthropic"));

    let body = anthropic.last_body().await;
    assert_eq!(body["model"], "claude-3-5-sonnet");
    assert_eq!(body["max_tokens"], 256);
    assert_eq!(body["temperature"], 0.1);
}

#[tokio::test]
async fn test_env_credential_enables_provider() {
    let openai = MockProvider::new().await;
    openai.mock_bearer_completion("sk-from-env").await;

    let toml = format!(
        r#"
[providers.openai]
enabled = true
base_url = "{url}"
default_model = "gpt-4o-mini"
"#,
        url = openai.url()
    );
    let mut config = ConfigLoader::parse_str(&toml, ConfigFormat::Toml).unwrap();
    assert!(!reqwest_router(&config).is_available("openai"));

    let env: HashMap<&str, &str> = [
        ("OPENAI_API_KEY", "sk-from-env"),
        ("GATEWAY_PORT", "9191"),
    ]
    .into_iter()
    .collect();
    apply_env_overrides(&mut config, |key| env.get(key).map(ToString::to_string)).unwrap();

    assert_eq!(config.server.port, 9191);
    let router = reqwest_router(&config);
    assert!(router.is_available("openai"));
    router.route(&simple_chat_request(), None).await.unwrap();
}
