//! LibreTranslate contract tests.

use crate::helpers::{FakeModel, sine_wav};
use polyglot::audio::RawWaveform;
use polyglot::config::{OutputConfig, TranslationConfig};
use polyglot::translate::{LibreTranslateClient, TranslationOutcome, Translator, translate_or_fallback};
use polyglot::{GenerationRequest, Language, PolyglotError, SynthesisPipeline, VoiceSample};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, api_key: Option<&str>) -> LibreTranslateClient {
    LibreTranslateClient::new(TranslationConfig {
        enabled: true,
        base_url: server.uri(),
        api_key: api_key.map(String::from),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_translate_request_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({
            "q": "Hello world",
            "source": "auto",
            "target": "es",
            "format": "text",
            "api_key": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translatedText": "Hola mundo",
            "detectedLanguage": {"confidence": 90.0, "language": "en"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("secret"));
    let translation = client.translate("Hello world", "es").await.unwrap();
    assert_eq!(translation.text, "Hola mundo");
    assert_eq!(translation.detected_source, "en");
}

#[tokio::test]
async fn test_http_error_maps_to_translation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "sw is not supported"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, None)
        .translate("Hello", "sw")
        .await
        .unwrap_err();
    assert!(matches!(err, PolyglotError::Translation(ref m) if m.contains("sw is not supported")));
}

#[tokio::test]
async fn test_malformed_response_is_a_translation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, None)
        .translate("Hello", "fr")
        .await
        .unwrap_err();
    assert!(matches!(err, PolyglotError::Translation(_)));
}

#[tokio::test]
async fn test_already_target_language_is_detected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translatedText": "Hola mundo",
            "detectedLanguage": {"confidence": 99.0, "language": "es"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, None);
    let spanish = Language::from_code("es").unwrap();
    let (text, outcome) = translate_or_fallback(Some(&client), "Hola mundo", spanish).await;
    assert_eq!(text, "Hola mundo");
    assert!(matches!(outcome, TranslationOutcome::AlreadyTarget { .. }));
}

#[tokio::test]
async fn test_supported_languages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"code": "en", "name": "English", "targets": ["es", "fr"]},
            {"code": "es", "name": "Spanish", "targets": ["en"]}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codes = client_for(&mock_server, None).supported_languages().await.unwrap();
    assert_eq!(codes, vec!["en", "es"]);
}

#[tokio::test]
async fn test_pipeline_synthesizes_translated_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({"target": "fr"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translatedText": "Bonjour le monde",
            "detectedLanguage": {"confidence": 95.0, "language": "en"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(FakeModel::returning(RawWaveform::mono(vec![0.1; 2_400], 24_000)));
    let output = OutputConfig {
        path: dir.path().join("output.wav"),
        scratch_dir: Some(dir.path().join("scratch")),
        ..OutputConfig::default()
    };
    let pipeline = SynthesisPipeline::new(model.clone(), output)
        .with_translator(Arc::new(client_for(&mock_server, None)));

    let sample = VoiceSample::from_bytes(sine_wav(1, 22_050, 1.0), None);
    let french = Language::from_code("fr").unwrap();
    let request =
        GenerationRequest::new(Some(sample), "Hello world", french).with_auto_translate(true);

    let outcome = pipeline.synthesize(&request).await.unwrap();
    assert_eq!(model.calls()[0].text, "Bonjour le monde");
    assert_eq!(model.calls()[0].language_id, "fr");
    assert_eq!(outcome.text, "Bonjour le monde");
    assert_eq!(outcome.text_chars, "Hello world".chars().count());
    assert!(matches!(outcome.translation, TranslationOutcome::Translated { .. }));
}
