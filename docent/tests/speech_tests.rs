use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use docent::config::SpeechConfig;
use docent::error::DocentError;
use docent::speech::SpeechProvider;

const FAKE_MP3: &[u8] = b"ID3\x03\x00fake-mp3-frames";

fn speech_config(server: &MockServer, cache_dir: Option<std::path::PathBuf>) -> SpeechConfig {
    SpeechConfig {
        api_key: Some("test-key".to_string()),
        base_url: Some(format!("{}/v1", server.uri())),
        timeout_secs: 5,
        cache_dir,
        ..SpeechConfig::default()
    }
}

#[tokio::test]
async fn test_synthesize_sends_cleaned_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .and(body_partial_json(json!({
            "model": "tts-1",
            "voice": "nova",
            "input": "Summary The refund window is 30 days.",
            "response_format": "mp3"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(FAKE_MP3))
        .expect(1)
        .mount(&server)
        .await;

    let provider = SpeechProvider::new(&speech_config(&server, None));
    assert!(provider.is_available());

    let audio = provider
        .synthesize("## Summary\n📄 The **refund** window is *30 days*.", "nova")
        .await
        .unwrap();
    assert_eq!(audio, FAKE_MP3);
}

#[tokio::test]
async fn test_cached_audio_skips_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(FAKE_MP3))
        .expect(1)
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let provider = SpeechProvider::new(&speech_config(&server, Some(cache.path().to_path_buf())));

    let first = provider.synthesize("Offices close at six.", "alloy").await.unwrap();
    let second = provider.synthesize("Offices close at six.", "alloy").await.unwrap();

    assert_eq!(first, second);
    let cached_files = std::fs::read_dir(cache.path()).unwrap().count();
    assert_eq!(cached_files, 1);
}

#[tokio::test]
async fn test_upstream_failure_is_speech_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let provider = SpeechProvider::new(&speech_config(&server, None));
    let result = provider.synthesize("Hello there.", "alloy").await;

    match result {
        Err(DocentError::Speech(message)) => assert!(message.contains("401")),
        other => panic!("Expected Speech error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_text_with_nothing_to_read_is_rejected() {
    let server = MockServer::start().await;
    let provider = SpeechProvider::new(&speech_config(&server, None));

    let result = provider.synthesize("📄 🔑", "alloy").await;
    assert!(matches!(result, Err(DocentError::Validation(_))));
}
