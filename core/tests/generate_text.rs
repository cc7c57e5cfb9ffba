use cinebot_core::{
    render_result, CineConfig, GeminiClient, GenerationError, RecommendationAssistant, Session,
    YearRange, default_selection,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves exactly one HTTP exchange with a canned status and body, returning
/// the raw request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];

        // Read headers, then as much body as Content-Length announces.
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&raw).to_string()
    });

    (base_url, handle)
}

fn config_for(base_url: String) -> CineConfig {
    CineConfig {
        api_key: Some("test-key".to_string()),
        api_base_url: Some(base_url),
        ..CineConfig::default()
    }
}

#[tokio::test]
async fn successful_response_is_returned_verbatim() {
    let body = r###"{"candidates":[{"content":{"role":"model","parts":[{"text":"## 1. Back to the Future (1985)\n*Viaje en el tiempo*"}]}}]}"###;
    let (base_url, server) = serve_once("200 OK", body).await;
    let client = GeminiClient::new(config_for(base_url));

    let text = client.generate_text("hola").await.unwrap();
    assert_eq!(text, "## 1. Back to the Future (1985)\n*Viaje en el tiempo*");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v1beta/models/gemini-1.5-flash:generateContent"));
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    assert!(request.contains(r#""role":"user""#));
    assert!(request.contains(r#""text":"hola""#));
}

#[tokio::test]
async fn http_error_carries_status_and_api_message() {
    let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
    let (base_url, server) = serve_once("403 Forbidden", body).await;
    let client = GeminiClient::new(config_for(base_url));

    let result = client.generate_text("hola").await;
    server.await.unwrap();

    match &result {
        Err(GenerationError::Http {
            status_code,
            message,
        }) => {
            assert_eq!(*status_code, 403);
            assert!(message.contains("API key not valid"));
            assert!(message.contains("PERMISSION_DENIED"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(render_result(&result).starts_with("Error:"));
}

#[tokio::test]
async fn unparseable_body_is_malformed() {
    let (base_url, server) = serve_once("200 OK", "not json").await;
    let client = GeminiClient::new(config_for(base_url));

    let result = client.generate_text("hola").await;
    server.await.unwrap();

    assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    assert!(render_result(&result).starts_with("Error:"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::new(config_for(format!("http://{}", addr)));
    let result = client.generate_text("hola").await;

    assert!(matches!(result, Err(GenerationError::Transport(_))));
    assert!(result.as_ref().unwrap_err().is_transient());
    assert!(render_result(&result).starts_with("Error:"));
}

#[tokio::test]
async fn recommend_then_save_through_real_client() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"tres películas"}]}}]}"#;
    let (base_url, server) = serve_once("200 OK", body).await;
    let assistant = RecommendationAssistant::new(GeminiClient::new(config_for(base_url)));
    let mut session = Session::new();

    let result = assistant
        .recommend(&mut session, &default_selection(), YearRange::default())
        .await
        .unwrap();
    assert_eq!(result.unwrap(), "tres películas");

    let request = server.await.unwrap();
    assert!(request.contains("Comedia, Sci-Fi"));

    assistant.save(&mut session).unwrap();
    assert_eq!(session.history().len(), 1);
}
