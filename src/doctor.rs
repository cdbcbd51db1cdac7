//! Installation checks.
//!
//! Doctor inspects the configuration, compute device, model server,
//! translation service, and output location, and reports one finding per
//! check. It never changes anything.

use crate::config::{DevicePreference, ModelConfig, OutputConfig, OutputMode, PolyglotConfig, TranslationConfig};
use crate::language::Language;
use crate::system_profile::{Device, SystemProfile};
use crate::translate::LibreTranslateClient;
use crate::tts::ChatterboxModel;
use std::path::{Path, PathBuf};

/// Severity level for a doctor finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctorSeverity {
    Info,
    Warning,
    Error,
}

impl DoctorSeverity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "ok",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

/// A single doctor finding.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DoctorFinding {
    pub id: String,
    pub title: String,
    pub severity: DoctorSeverity,
    pub summary: String,
    pub evidence: Vec<String>,
}

impl DoctorFinding {
    fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        severity: DoctorSeverity,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            severity,
            summary: summary.into(),
            evidence: Vec::new(),
        }
    }

    fn with_evidence(mut self, line: impl Into<String>) -> Self {
        self.evidence.push(line.into());
        self
    }
}

/// Whether any finding should fail the doctor run.
pub fn has_errors(findings: &[DoctorFinding]) -> bool {
    findings
        .iter()
        .any(|f| f.severity >= DoctorSeverity::Error)
}

/// Runs all doctor checks and returns findings.
///
/// `config_path` is the file given on the command line, if any. Later checks
/// use the loaded configuration, or defaults when it could not be read.
pub async fn run_checks(config_path: Option<&Path>) -> Vec<DoctorFinding> {
    let (config, config_finding) = check_config(config_path);
    let mut findings = vec![config_finding];

    findings.push(device_finding(&SystemProfile::detect(), config.model.device));
    findings.push(check_model_server(&config.model).await);
    if config.translation.enabled {
        findings.push(check_translation(&config.translation).await);
    }
    findings.push(check_output(&config.output));

    findings
}

/// Load the configuration and report whether it was readable.
pub fn check_config(path: Option<&Path>) -> (PolyglotConfig, DoctorFinding) {
    let path = path.map_or_else(PolyglotConfig::default_config_path, Path::to_path_buf);
    if !path.exists() {
        let finding = DoctorFinding::new(
            "config-defaults",
            "Using default configuration",
            DoctorSeverity::Info,
            "No config file found; built-in defaults apply.",
        )
        .with_evidence(format!("looked for {}", path.display()));
        return (PolyglotConfig::default(), finding);
    }

    match PolyglotConfig::from_file(&path) {
        Ok(config) => (
            config,
            DoctorFinding::new(
                "config-ok",
                "Configuration readable",
                DoctorSeverity::Info,
                format!("Loaded {}.", path.display()),
            ),
        ),
        Err(e) => (
            PolyglotConfig::default(),
            DoctorFinding::new(
                "config-unreadable",
                "Configuration unreadable",
                DoctorSeverity::Error,
                "The config file exists but cannot be parsed; defaults were used for the remaining checks.",
            )
            .with_evidence(path.display().to_string())
            .with_evidence(e.to_string()),
        ),
    }
}

/// Report the compute device generation will run on.
pub fn device_finding(profile: &SystemProfile, preference: DevicePreference) -> DoctorFinding {
    let detected = profile.best_device();
    let device = match preference {
        DevicePreference::Auto => detected,
        DevicePreference::Cuda => Device::Cuda,
        DevicePreference::Mps => Device::Mps,
        DevicePreference::Cpu => Device::Cpu,
    };

    let mut finding = if preference == DevicePreference::Cuda && profile.gpu.is_none() {
        DoctorFinding::new(
            "device-cuda-missing",
            "CUDA requested but no NVIDIA GPU found",
            DoctorSeverity::Warning,
            "The model server may fail to start or fall back to CPU.",
        )
    } else if device.is_accelerated() {
        DoctorFinding::new(
            "device-accelerated",
            "Accelerator available",
            DoctorSeverity::Info,
            format!("Generation will run on {device}."),
        )
    } else {
        DoctorFinding::new(
            "device-cpu",
            "Running on CPU",
            DoctorSeverity::Warning,
            "No accelerator in use; generation will be noticeably slower.",
        )
    };

    finding = finding.with_evidence(format!("os: {} ({})", profile.os, profile.arch));
    if let Some(cpu) = &profile.cpu {
        finding = finding.with_evidence(format!("cpu: {cpu}"));
    }
    if let Some(gpu) = &profile.gpu {
        finding = finding.with_evidence(format!("gpu: {gpu}"));
    }
    finding
}

/// Check that the Chatterbox server answers its health endpoint.
pub async fn check_model_server(config: &ModelConfig) -> DoctorFinding {
    let device = crate::system_profile::resolve_device(config.device);
    match ChatterboxModel::connect(config, device).await {
        Ok(_) => DoctorFinding::new(
            "model-server-ok",
            "Model server healthy",
            DoctorSeverity::Info,
            format!("Chatterbox is answering at {}.", config.base_url),
        ),
        Err(e) => DoctorFinding::new(
            "model-server-unreachable",
            "Model server not available",
            DoctorSeverity::Error,
            "Start the Chatterbox Multilingual server or fix model.base_url.",
        )
        .with_evidence(e.to_string()),
    }
}

/// Check that the translation service answers and covers the language set.
pub async fn check_translation(config: &TranslationConfig) -> DoctorFinding {
    let client = match LibreTranslateClient::new(config.clone()) {
        Ok(client) => client,
        Err(e) => {
            return DoctorFinding::new(
                "translation-misconfigured",
                "Translation client unavailable",
                DoctorSeverity::Error,
                "The translation client could not be created.",
            )
            .with_evidence(e.to_string());
        }
    };

    match client.supported_languages().await {
        Ok(codes) => {
            let missing: Vec<&str> = Language::all()
                .iter()
                .map(Language::code)
                .filter(|code| !codes.iter().any(|c| c.eq_ignore_ascii_case(code)))
                .collect();
            if missing.is_empty() {
                DoctorFinding::new(
                    "translation-ok",
                    "Translation service reachable",
                    DoctorSeverity::Info,
                    format!("All languages are supported by {}.", config.base_url),
                )
            } else {
                DoctorFinding::new(
                    "translation-partial",
                    "Translation service missing languages",
                    DoctorSeverity::Warning,
                    "Auto-translate will fall back to the original text for some languages.",
                )
                .with_evidence(format!("unsupported: {}", missing.join(", ")))
            }
        }
        Err(e) => DoctorFinding::new(
            "translation-unreachable",
            "Translation service not available",
            DoctorSeverity::Warning,
            "Auto-translate will fall back to the original text.",
        )
        .with_evidence(e.to_string()),
    }
}

/// Check that generated audio can be written.
pub fn check_output(config: &OutputConfig) -> DoctorFinding {
    let dir = output_dir(config);
    let probe = std::fs::create_dir_all(&dir).and_then(|()| {
        tempfile::Builder::new()
            .prefix(".polyglot-doctor-")
            .tempfile_in(&dir)
    });

    match probe {
        Ok(_) => DoctorFinding::new(
            "output-writable",
            "Output location writable",
            DoctorSeverity::Info,
            format!("Audio will be written under {}.", dir.display()),
        ),
        Err(e) => DoctorFinding::new(
            "output-unwritable",
            "Output location not writable",
            DoctorSeverity::Error,
            "Generated audio cannot be saved.",
        )
        .with_evidence(dir.display().to_string())
        .with_evidence(e.to_string()),
    }
}

fn output_dir(config: &OutputConfig) -> PathBuf {
    match config.mode {
        OutputMode::Fixed => config
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        OutputMode::PerRequest => config.dir.clone(),
    }
}
