//! Routing tests against wiremock provider backends

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::MockProvider;
use gateway_core::{ChatRequest, ChatMessage, GatewayErrorKind};
use std::time::Duration;

#[tokio::test]
async fn test_route_to_default_provider() {
    init_tracing();
    let openai = MockProvider::new().await;
    let anthropic = MockProvider::new().await;
    openai.mock_chat_completion().await;
    anthropic.expect_no_calls().await;

    let router = reqwest_router(&gateway_config(&openai.url(), &anthropic.url()));
    let response = router.route(&simple_chat_request(), None).await.unwrap();

    assert_eq!(response.provider.as_deref(), Some("openai"));
    assert_eq!(response.id.as_deref(), Some("chatcmpl-123"));
    assert_eq!(
        response.first_content(),
        Some("Hello! How can I help you today?")
    );
    assert_eq!(response.usage.map(|u| u.total_tokens), Some(21));
    assert_eq!(openai.calls().await, 1);
}

#[tokio::test]
async fn test_route_with_hint() {
    let openai = MockProvider::new().await;
    let anthropic = MockProvider::new().await;
    openai.expect_no_calls().await;
    anthropic.mock_chat_completion().await;

    let router = reqwest_router(&gateway_config(&openai.url(), &anthropic.url()));
    let response = router
        .route(&simple_chat_request(), Some("anthropic"))
        .await
        .unwrap();

    assert_eq!(response.provider.as_deref(), Some("anthropic"));
}

#[tokio::test]
async fn test_blank_hint_uses_default_provider() {
    let openai = MockProvider::new().await;
    let anthropic = MockProvider::new().await;
    openai.mock_chat_completion().await;
    anthropic.expect_no_calls().await;

    let router = reqwest_router(&gateway_config(&openai.url(), &anthropic.url()));
    let response = router.route(&simple_chat_request(), Some("  ")).await.unwrap();

    assert_eq!(response.provider.as_deref(), Some("openai"));
}

#[tokio::test]
async fn test_response_fields_pass_through() {
    let openai = MockProvider::new().await;
    openai
        .mock_chat_completion_with(full_completion("gpt-4o", "Paris"))
        .await;

    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));
    let response = router.route(&simple_chat_request(), None).await.unwrap();

    assert_eq!(response.object.as_deref(), Some("chat.completion"));
    assert_eq!(response.created, Some(1_700_000_000));
    assert_eq!(response.model.as_deref(), Some("gpt-4o"));
    assert_eq!(response.system_fingerprint.as_deref(), Some("fp_44709d6fcb"));
    assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.first_content(), Some("Paris"));
}

#[tokio::test]
async fn test_unavailable_providers_make_no_calls() {
    let openai = MockProvider::new().await;
    openai.expect_no_calls().await;
    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));

    for provider in ["ollama", "huggingface", "mistral", "azure-openai"] {
        let error = router
            .route(&simple_chat_request(), Some(provider))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), GatewayErrorKind::ProviderUnavailable);
        assert_eq!(error.provider(), provider);
        assert_eq!(error.status_code(), 400);
        assert_eq!(
            error.message(),
            format!("Provider '{provider}' is not available or not configured")
        );
    }
}

#[tokio::test]
async fn test_backend_error_status_is_preserved() {
    let openai = MockProvider::new().await;
    openai
        .mock_error(500, "server_error", "The server had an error")
        .await;

    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));
    let error = router.route(&simple_chat_request(), None).await.unwrap_err();

    assert_eq!(error.kind(), GatewayErrorKind::ProviderBackend);
    assert_eq!(error.status_code(), 500);
    assert_eq!(error.provider(), "openai");
    assert!(error.message().starts_with("Provider error: "));
    assert!(error.message().contains("The server had an error"));
}

#[tokio::test]
async fn test_rate_limited_backend() {
    let openai = MockProvider::new().await;
    openai
        .mock_error(429, "rate_limit_exceeded", "Rate limit reached")
        .await;

    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));
    let error = router.route(&simple_chat_request(), None).await.unwrap_err();

    assert_eq!(error.kind(), GatewayErrorKind::ProviderBackend);
    assert_eq!(error.status_code(), 429);
    assert!(error.message().contains("rate_limit_exceeded"));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let openai = MockProvider::new().await;
    let anthropic = MockProvider::new().await;
    anthropic.mock_delayed(Duration::from_secs(2)).await;

    let router = reqwest_router(&gateway_config(&openai.url(), &anthropic.url()));
    let error = router
        .route(&simple_chat_request(), Some("anthropic"))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), GatewayErrorKind::Timeout);
    assert_eq!(error.status_code(), 504);
    assert_eq!(error.provider(), "anthropic");
    assert_eq!(
        error.message(),
        "Provider 'anthropic' did not respond within 300ms"
    );
}

#[tokio::test]
async fn test_connection_refused_is_unexpected() {
    let config = gateway_config("http://127.0.0.1:1", "http://127.0.0.1:1");
    let router = reqwest_router(&config);

    let error = router.route(&simple_chat_request(), None).await.unwrap_err();

    assert_eq!(error.kind(), GatewayErrorKind::Unexpected);
    assert_eq!(error.status_code(), 500);
    assert_eq!(error.provider(), "openai");
    assert!(error.message().starts_with("Unexpected error: "));
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let openai = MockProvider::new().await;
    openai.mock_raw(200, "<html>not json</html>").await;

    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));
    let error = router.route(&simple_chat_request(), None).await.unwrap_err();

    assert_eq!(error.kind(), GatewayErrorKind::Unexpected);
    assert!(error.message().contains("invalid provider response"));
}

#[tokio::test]
async fn test_defaults_applied_on_the_wire() {
    let openai = MockProvider::new().await;
    openai.mock_chat_completion().await;

    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));
    router.route(&simple_chat_request(), None).await.unwrap();

    let body = openai.last_body().await;
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["max_tokens"], 1000);
    assert_eq!(body["temperature"], 0.7);
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Hello, how are you?");
    assert!(body.get("top_p").is_none());
    assert!(body.get("provider").is_none());
}

#[tokio::test]
async fn test_caller_values_override_defaults() {
    let openai = MockProvider::new().await;
    openai.mock_chat_completion().await;

    let request = ChatRequest::builder()
        .message(ChatMessage::system("Be terse."))
        .message(ChatMessage::user("Hi"))
        .model("gpt-4o-mini")
        .max_tokens(42)
        .temperature(0.0)
        .top_p(0.9)
        .stop(vec!["END".to_string()])
        .user("user-7")
        .build()
        .unwrap();

    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));
    router.route(&request, None).await.unwrap();

    let body = openai.last_body().await;
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["max_tokens"], 42);
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["top_p"], 0.9);
    assert_eq!(body["stop"][0], "END");
    assert_eq!(body["user"], "user-7");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_system_message_preserved_in_order() {
    let openai = MockProvider::new().await;
    openai.mock_chat_completion().await;

    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));
    router
        .route(&chat_request_with_system("You are helpful.", "Hi"), None)
        .await
        .unwrap();

    let body = openai.last_body().await;
    assert_eq!(body["messages"][0]["content"], "You are helpful.");
    assert_eq!(body["messages"][1]["content"], "Hi");
}

#[tokio::test]
async fn test_list_and_availability() {
    let openai = MockProvider::new().await;
    let router = reqwest_router(&gateway_config(&openai.url(), &openai.url()));

    assert_eq!(
        router.list_available(),
        vec!["anthropic", "huggingface", "openai"]
    );
    assert!(router.is_available("openai"));
    assert!(router.is_available("anthropic"));
    assert!(!router.is_available("huggingface"));
    assert!(!router.is_available("ollama"));
    assert!(!router.is_available("unknown"));
    assert!(!router.is_available(""));
    assert_eq!(openai.calls().await, 0);
}
