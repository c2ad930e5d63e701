use clinicai::config::ServiceConfig;
use clinicai::router::{Credential, KeyPool};
use clinicai::tasks::MediaPayload;
use clinicai::{ScribeClient, ScribeError};
use mockito::{Matcher, Server};
use serde_json::json;

const PATH: &str = "/v1beta/models/gemini-2.5-flash-lite:generateContent";

fn client_for(server: &Server, keys: &[&str]) -> ScribeClient {
    let pool = KeyPool::new(
        keys.iter()
            .enumerate()
            .map(|(i, k)| Credential::new(i as u8 + 1, *k))
            .collect(),
    )
    .unwrap();
    let config = ServiceConfig {
        base_url: server.url(),
        ..Default::default()
    };
    ScribeClient::with_config(pool, &config).unwrap()
}

fn text_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 8, "totalTokenCount": 20}
    })
    .to_string()
}

fn audio() -> MediaPayload {
    MediaPayload::audio(b"OggS".to_vec(), "")
}

#[tokio::test]
async fn sends_key_header_and_structured_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "AIzaFirst")
        .match_header("content-type", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })),
            Matcher::Regex(r#""inlineData":\{"mimeType":"audio/webm","data":"T2dnUw=="\}"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(text_body(r#"{"bp": "118/76 mmHg", "temperature": "98.4 °F"}"#))
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, &["AIzaFirst"]);
    let vitals = client.transcribe_vitals(audio()).await.unwrap();

    assert_eq!(vitals.bp.as_deref(), Some("118/76 mmHg"));
    assert_eq!(vitals.temperature.as_deref(), Some("98.4 °F"));
    mock.assert_async().await;
}

#[tokio::test]
async fn quota_error_body_fails_over_to_next_key() {
    let mut server = Server::new_async().await;
    let rejected = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "AIzaFirst")
        .with_status(429)
        .with_body(
            json!({"error": {
                "code": 429,
                "message": "Quota exceeded for quota metric 'Generate Content API requests per day'",
                "status": "RESOURCE_EXHAUSTED"
            }})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "AIzaSecond")
        .with_status(200)
        .with_body(text_body(r#"{"pulse": "72 bpm"}"#))
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, &["AIzaFirst", "AIzaSecond"]);
    let vitals = client.transcribe_vitals(audio()).await.unwrap();

    assert_eq!(vitals.pulse.as_deref(), Some("72 bpm"));
    rejected.assert_async().await;
    accepted.assert_async().await;
}

#[tokio::test]
async fn invalid_key_detail_counts_as_rejection() {
    let mut server = Server::new_async().await;
    let invalid = server
        .mock("POST", PATH)
        .with_status(400)
        .with_body(
            json!({"error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{"reason": "API_KEY_INVALID", "domain": "googleapis.com"}]
            }})
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server, &["AIzaRevokedOne", "AIzaRevokedTwo"]);
    let err = client.transcribe_vitals(audio()).await.unwrap_err();

    match err {
        ScribeError::AuthOrQuotaExhausted {
            attempts,
            last_message,
        } => {
            assert_eq!(attempts, 2);
            assert!(last_message.starts_with("HTTP 400"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    invalid.assert_async().await;
}

#[tokio::test]
async fn server_error_stops_without_trying_other_keys() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("POST", PATH)
        .with_status(500)
        .with_body(r#"{"error": {"code": 500, "message": "Internal error encountered.", "status": "INTERNAL"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, &["AIzaFirst", "AIzaSecond", "AIzaThird"]);
    let pdf = MediaPayload::new(b"%PDF-1.5".to_vec(), "application/pdf");
    let err = client.analyze_report(pdf).await.unwrap_err();

    match err {
        ScribeError::TransientService { slot, message } => {
            assert_eq!(slot, 1);
            assert!(message.contains("HTTP 500"));
            assert!(message.contains("Internal error"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    failing.assert_async().await;
}

#[tokio::test]
async fn blocked_candidate_is_empty_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server, &["AIzaOnly"]);
    let err = client.generate_prescription_draft(audio()).await.unwrap_err();

    assert!(matches!(err, ScribeError::EmptyResponse));
}

#[tokio::test]
async fn non_json_success_body_is_transient() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = client_for(&server, &["AIzaOnly", "AIzaSpare"]);
    let err = client.generate_prescription_draft(audio()).await.unwrap_err();

    assert!(matches!(err, ScribeError::TransientService { slot: 1, .. }));
}

#[tokio::test]
async fn unsupported_report_never_reaches_server() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, &["AIzaOnly"]);
    let err = client
        .analyze_report(MediaPayload::new(b"notes".to_vec(), "text/plain"))
        .await
        .unwrap_err();

    assert!(matches!(err, ScribeError::UnsupportedInputType(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn unsendable_key_slot_is_skipped_at_load() {
    let mut server = Server::new_async().await;
    let accepted = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "AIzaGood")
        .with_status(200)
        .with_body(text_body(r#"{"weight": "70 kg"}"#))
        .expect(1)
        .create_async()
        .await;

    let pool = KeyPool::from_lookup(|name| match name {
        "GEMINI_API_KEY_1" => Some("AIza\u{7f}bad".to_string()),
        "GEMINI_API_KEY_2" => Some("AIzaGood".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(pool.slots(), vec![2]);

    let config = ServiceConfig {
        base_url: server.url(),
        ..Default::default()
    };
    let client = ScribeClient::with_config(pool, &config).unwrap();
    let vitals = client.transcribe_vitals(audio()).await.unwrap();

    assert_eq!(vitals.weight.as_deref(), Some("70 kg"));
    accepted.assert_async().await;
}
