//! Lightweight system profiling for compute device selection.
//!
//! Best-effort: relies on OS commands where available and never fails.

use crate::config::DevicePreference;
use std::fmt;
use std::process::Command;

/// Compute device the model runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    /// NVIDIA GPU via CUDA.
    Cuda,
    /// Apple GPU via Metal Performance Shaders.
    Mps,
    /// General-purpose CPU.
    Cpu,
}

impl Device {
    /// Identifier understood by the model server (`"cuda"`, `"mps"`, `"cpu"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cuda => "cuda",
            Self::Mps => "mps",
            Self::Cpu => "cpu",
        }
    }

    /// Whether this is an accelerator rather than the CPU fallback.
    pub fn is_accelerated(&self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SystemProfile {
    pub os: String,
    pub arch: String,
    pub cpu: Option<String>,
    pub gpu: Option<String>,
}

impl SystemProfile {
    pub fn detect() -> Self {
        Self {
            os: std::env::consts::OS.to_owned(),
            arch: std::env::consts::ARCH.to_owned(),
            cpu: detect_cpu(),
            gpu: detect_nvidia_gpu(),
        }
    }

    /// Best accelerator available on this machine, or CPU.
    pub fn best_device(&self) -> Device {
        if self.gpu.is_some() {
            Device::Cuda
        } else if self.os == "macos" && self.arch == "aarch64" {
            Device::Mps
        } else {
            Device::Cpu
        }
    }
}

/// Resolve a configured preference into a concrete device.
///
/// `Auto` probes the machine; explicit preferences are taken as-is.
pub fn resolve_device(preference: DevicePreference) -> Device {
    match preference {
        DevicePreference::Auto => SystemProfile::detect().best_device(),
        DevicePreference::Cuda => Device::Cuda,
        DevicePreference::Mps => Device::Mps,
        DevicePreference::Cpu => Device::Cpu,
    }
}

fn run_cmd(args: &[&str]) -> Option<String> {
    let (program, rest) = args.split_first()?;
    let out = Command::new(program).args(rest).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let trimmed = s.trim().to_owned();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn detect_cpu() -> Option<String> {
    if cfg!(target_os = "macos") {
        return run_cmd(&["sysctl", "-n", "machdep.cpu.brand_string"]);
    }
    if cfg!(target_os = "linux") {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if let Some(rest) = line.strip_prefix("model name")
                && let Some((_, v)) = rest.split_once(':')
            {
                let v = v.trim().to_owned();
                if !v.is_empty() {
                    return Some(v);
                }
            }
        }
    }
    None
}

/// First GPU name reported by `nvidia-smi`, if the tool is installed and works.
fn detect_nvidia_gpu() -> Option<String> {
    which::which("nvidia-smi").ok()?;
    run_cmd(&[
        "nvidia-smi",
        "--query-gpu=name",
        "--format=csv,noheader",
    ])
    .and_then(|s| s.lines().next().map(|l| l.trim().to_owned()))
}
