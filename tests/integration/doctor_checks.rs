//! Doctor checks against mocked services.

use polyglot::Language;
use polyglot::config::{DevicePreference, ModelConfig, PolyglotConfig, TranslationConfig};
use polyglot::doctor::{self, DoctorSeverity};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn healthy_model_server_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ModelConfig {
        base_url: mock_server.uri(),
        device: DevicePreference::Cpu,
        ..ModelConfig::default()
    };
    let finding = doctor::check_model_server(&config).await;
    assert_eq!(finding.id, "model-server-ok");
    assert_eq!(finding.severity, DoctorSeverity::Info);
}

#[tokio::test]
async fn translation_service_covering_all_languages() {
    let mock_server = MockServer::start().await;
    let languages: Vec<_> = Language::all()
        .iter()
        .map(|l| json!({"code": l.code(), "name": l.display_name()}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(languages))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TranslationConfig {
        enabled: true,
        base_url: mock_server.uri(),
        ..TranslationConfig::default()
    };
    let finding = doctor::check_translation(&config).await;
    assert_eq!(finding.id, "translation-ok");
}

#[tokio::test]
async fn translation_service_missing_languages_warns() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"code": "en", "name": "English"},
            {"code": "es", "name": "Spanish"}
        ])))
        .mount(&mock_server)
        .await;

    let config = TranslationConfig {
        enabled: true,
        base_url: mock_server.uri(),
        ..TranslationConfig::default()
    };
    let finding = doctor::check_translation(&config).await;
    assert_eq!(finding.id, "translation-partial");
    assert_eq!(finding.severity, DoctorSeverity::Warning);
    assert!(finding.evidence[0].contains("zh"));
    assert!(!finding.evidence[0].contains("es,"));
}

#[tokio::test]
async fn run_checks_uses_config_file() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = PolyglotConfig::default();
    config.model.base_url = mock_server.uri();
    config.model.device = DevicePreference::Cpu;
    config.output.path = dir.path().join("out").join("output.wav");
    let config_path = dir.path().join("config.toml");
    config.save_to_file(&config_path).unwrap();

    let findings = doctor::run_checks(Some(&config_path)).await;
    let ids: Vec<&str> = findings.iter().map(|f| f.id.as_str()).collect();

    assert!(ids.contains(&"config-ok"));
    assert!(ids.contains(&"model-server-ok"));
    assert!(ids.contains(&"output-writable"));
    assert!(!ids.iter().any(|id| id.starts_with("translation")));
    assert!(!doctor::has_errors(&findings));
}
