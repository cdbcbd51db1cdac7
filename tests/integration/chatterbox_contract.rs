//! Chatterbox server contract tests.
//!
//! Verify the HTTP format of `GET /health` and `POST /generate`, both response
//! encodings, error mapping, and load-once behaviour of the model loader.

use crate::helpers::sine_wav;
use polyglot::PolyglotError;
use polyglot::config::{DevicePreference, ModelConfig};
use polyglot::system_profile::Device;
use polyglot::tts::{ChatterboxModel, ModelLoader, SpeechModel};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ModelConfig {
    ModelConfig {
        base_url: server.uri(),
        device: DevicePreference::Cpu,
        ..ModelConfig::default()
    }
}

async fn mount_health(server: &MockServer, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "sample_rate": 24000})),
        )
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_generate_sends_model_arguments() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_partial_json(json!({
            "text": "Hola mundo",
            "language_id": "es",
            "audio_prompt_path": "/tmp/voice.wav",
            "device": "cpu",
            "exaggeration": 0.5,
            "cfg_weight": 0.5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sine_wav(1, 24_000, 0.5), "audio/wav"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = ChatterboxModel::connect(&config_for(&mock_server), Device::Cpu)
        .await
        .unwrap();
    let raw = model
        .generate("Hola mundo", "es", Path::new("/tmp/voice.wav"))
        .await
        .unwrap();

    assert_eq!(raw.sample_rate, 24_000);
    assert_eq!(raw.shape, vec![12_000, 1]);
    let waveform = raw.normalize().unwrap();
    assert_eq!(waveform.num_channels(), 1);
    assert_eq!(waveform.num_frames(), 12_000);
}

#[tokio::test]
async fn test_generate_parses_tensor_json() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sample_rate": 24000,
            "shape": [1, 4],
            "samples": [0.0, 0.5, -0.5, 0.25]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = ChatterboxModel::connect(&config_for(&mock_server), Device::Cpu)
        .await
        .unwrap();
    let raw = model
        .generate("Bonjour", "fr", Path::new("/tmp/voice.wav"))
        .await
        .unwrap();

    assert_eq!(raw.shape, vec![1, 4]);
    let waveform = raw.normalize().unwrap();
    assert_eq!(waveform.shape(), (1, 4));
    assert_eq!(waveform.channels()[0], vec![0.0, 0.5, -0.5, 0.25]);
}

#[tokio::test]
async fn test_server_error_maps_to_synthesis_error() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "CUDA out of memory"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = ChatterboxModel::connect(&config_for(&mock_server), Device::Cpu)
        .await
        .unwrap();
    let err = model
        .generate("Hello", "en", Path::new("/tmp/voice.wav"))
        .await
        .unwrap_err();

    match err {
        PolyglotError::Synthesis(message) => {
            assert!(message.contains("500"), "message: {message}");
            assert!(message.contains("CUDA out of memory"), "message: {message}");
        }
        other => panic!("expected synthesis error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_garbage_audio_maps_to_synthesis_error() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"not a wav".to_vec(), "audio/wav"))
        .mount(&mock_server)
        .await;

    let model = ChatterboxModel::connect(&config_for(&mock_server), Device::Cpu)
        .await
        .unwrap();
    let err = model
        .generate("Hello", "en", Path::new("/tmp/voice.wav"))
        .await
        .unwrap_err();
    assert!(matches!(err, PolyglotError::Synthesis(_)));
}

#[tokio::test]
async fn test_unhealthy_server_is_a_model_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "loading weights"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = ChatterboxModel::connect(&config_for(&mock_server), Device::Cpu)
        .await
        .unwrap_err();
    assert!(matches!(err, PolyglotError::Model(ref m) if m.contains("loading weights")));
    assert_eq!(err.code(), "MODEL_LOAD_FAILED");
}

#[tokio::test]
async fn test_plain_text_health_is_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = ChatterboxModel::connect(&config_for(&mock_server), Device::Cpu).await;
    assert!(model.is_ok());
}

#[tokio::test]
async fn test_loader_loads_once() {
    let mock_server = MockServer::start().await;
    mount_health(&mock_server, 1).await;

    let loader = ModelLoader::new(config_for(&mock_server));
    assert!(!loader.is_loaded());

    let first = loader.load().await.unwrap();
    let second = loader.load().await.unwrap();

    assert!(loader.is_loaded());
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.device(), Device::Cpu);
}

#[tokio::test]
async fn test_loader_retries_after_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let loader = ModelLoader::new(config_for(&mock_server));
    assert!(loader.load().await.is_err());
    assert!(loader.load().await.is_err());
    assert!(!loader.is_loaded());
}
