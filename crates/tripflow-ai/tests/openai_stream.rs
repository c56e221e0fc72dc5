//! Integration tests for the OpenAI streaming client

use futures::TryStreamExt;
use tripflow_ai::{AiError, CompletionRequest, LlmClient, Message, OpenAIClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn disable_system_proxy_for_tests() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        // Safety: set once for the process before any HTTP clients are built.
        unsafe {
            std::env::set_var("TRIPFLOW_NO_PROXY", "1");
        }
    });
}

fn sse_body(events: &[&str]) -> String {
    let mut body = String::new();
    for event in events {
        body.push_str("data: ");
        body.push_str(event);
        body.push_str("\n\n");
    }
    body
}

async fn mount_completions(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn streams_fragments_in_generation_order() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    let body = sse_body(&[
        r#"{"choices":[{"delta":{"role":"assistant","content":""}}]}"#,
        r#"{"choices":[{"delta":{"content":"Got"}}]}"#,
        r#"{"choices":[{"delta":{"content":" your passport?"}}]}"#,
        r#"{"choices":[{"delta":{}}]}"#,
        "[DONE]",
    ]);
    mount_completions(&server, ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .await;

    let client = OpenAIClient::new("test-key").with_base_url(server.uri());
    let fragments = client
        .complete_stream(CompletionRequest::new(vec![Message::user("Ready?")]))
        .await
        .expect("stream should open")
        .try_collect::<Vec<_>>()
        .await
        .expect("stream should succeed");

    assert_eq!(fragments, vec!["Got", " your passport?"]);
}

#[tokio::test]
async fn sends_model_messages_and_stream_flag() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["[DONE]"]), "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAIClient::new("test-key")
        .with_model("gpt-4o-mini")
        .with_base_url(server.uri());
    client
        .complete_stream(CompletionRequest::new(vec![
            Message::system("Be brief."),
            Message::user("Hi"),
        ]))
        .await
        .expect("stream should open");

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = requests[0].body_json().expect("request body is JSON");
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["stream"], true);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "Be brief.");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "Hi");
}

#[tokio::test]
async fn nothing_is_emitted_after_the_done_sentinel() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    let body = sse_body(&[
        r#"{"choices":[{"delta":{"content":"before"}}]}"#,
        "[DONE]",
        r#"{"choices":[{"delta":{"content":"after"}}]}"#,
    ]);
    mount_completions(&server, ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .await;

    let client = OpenAIClient::new("test-key").with_base_url(server.uri());
    let fragments = client
        .complete_stream(CompletionRequest::new(vec![Message::user("Hi")]))
        .await
        .expect("stream should open")
        .try_collect::<Vec<_>>()
        .await
        .expect("stream should succeed");

    assert_eq!(fragments, vec!["before"]);
}

#[tokio::test]
async fn unparseable_event_lines_are_skipped() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    let body = sse_body(&[
        "not json at all",
        r#"{"choices":[{"delta":{"content":"kept"}}]}"#,
        "[DONE]",
    ]);
    mount_completions(&server, ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .await;

    let client = OpenAIClient::new("test-key").with_base_url(server.uri());
    let fragments = client
        .complete_stream(CompletionRequest::new(vec![Message::user("Hi")]))
        .await
        .expect("stream should open")
        .try_collect::<Vec<_>>()
        .await
        .expect("stream should succeed");

    assert_eq!(fragments, vec!["kept"]);
}

#[tokio::test]
async fn final_event_without_trailing_separator_is_drained() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    // Connection closed right after the last event, before its blank line.
    let body = format!(
        "{}data: {}",
        sse_body(&[r#"{"choices":[{"delta":{"content":"first"}}]}"#]),
        r#"{"choices":[{"delta":{"content":"last"}}]}"#,
    );
    mount_completions(&server, ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .await;

    let client = OpenAIClient::new("test-key").with_base_url(server.uri());
    let fragments = client
        .complete_stream(CompletionRequest::new(vec![Message::user("Hi")]))
        .await
        .expect("stream should open")
        .try_collect::<Vec<_>>()
        .await
        .expect("stream should succeed");

    assert_eq!(fragments, vec!["first", "last"]);
}

#[tokio::test]
async fn error_status_fails_before_streaming() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    mount_completions(
        &server,
        ResponseTemplate::new(503).set_body_string("upstream melted"),
    )
    .await;

    let client = OpenAIClient::new("test-key").with_base_url(server.uri());
    let err = client
        .complete_stream(CompletionRequest::new(vec![Message::user("Hi")]))
        .await
        .err()
        .expect("error status should fail the call");

    match err {
        AiError::LlmHttp {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "OpenAI");
            assert_eq!(status, 503);
            assert!(message.contains("upstream melted"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn connection_failure_fails_before_streaming() {
    disable_system_proxy_for_tests();

    // Nothing is listening on this port.
    let client = OpenAIClient::new("test-key").with_base_url("http://127.0.0.1:9");
    let result = client
        .complete_stream(CompletionRequest::new(vec![Message::user("Hi")]))
        .await;

    assert!(matches!(result, Err(AiError::Http(_))));
}
