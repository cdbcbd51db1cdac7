//! CLI binary for polyglot.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use polyglot::config::OutputMode;
use polyglot::doctor::{self, DoctorSeverity};
use polyglot::translate::{LibreTranslateClient, Translator};
use polyglot::tts::ModelLoader;
use polyglot::{
    GenerationRequest, Language, PolyglotConfig, PolyglotError, ProgressEvent, SynthesisPipeline,
    VoiceSample,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Polyglot: clone a voice and make it speak 23 languages.
#[derive(Parser)]
#[command(name = "polyglot", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Generate speech in a cloned voice.
    Generate(GenerateArgs),

    /// List supported languages.
    Languages,

    /// Check the installation: model server, device, translation, output.
    Doctor,

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Voice sample to clone (.wav, a few seconds of clear speech).
    #[arg(short, long)]
    voice: Option<PathBuf>,

    /// Text to speak.
    #[arg(short, long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the text to speak from a file.
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Target language, by name or code (e.g. "Spanish" or "es").
    #[arg(short, long, default_value = "English")]
    language: String,

    /// Translate the text into the target language first.
    #[arg(long)]
    translate: bool,

    /// Write the audio here instead of the configured output location.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Play the generated audio on the default output device.
    #[arg(long)]
    play: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration.
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Keep HTTP client internals quiet unless RUST_LOG asks for them.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("polyglot=info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(cli.config.as_deref(), args).await,
        Command::Languages => {
            list_languages();
            Ok(ExitCode::SUCCESS)
        }
        Command::Doctor => run_doctor(cli.config.as_deref()).await.map(|()| ExitCode::SUCCESS),
        Command::Config { action } => {
            run_config(cli.config.as_deref(), action).map(|()| ExitCode::SUCCESS)
        }
    }
}

/// Print the user-facing message and pick the exit status for `err`.
fn report(err: &PolyglotError) -> ExitCode {
    eprintln!("Error: {}", err.user_message());
    ExitCode::from(err.exit_code())
}

async fn run_generate(config_path: Option<&Path>, args: GenerateArgs) -> anyhow::Result<ExitCode> {
    let mut config = PolyglotConfig::load(config_path)?;
    if let Some(path) = args.output {
        config.output.mode = OutputMode::Fixed;
        config.output.path = path;
    }

    let language: Language = match args.language.parse() {
        Ok(language) => language,
        Err(e) => return Ok(report(&e)),
    };

    let text = match args.text_file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => args.text.unwrap_or_default(),
    };

    let voice_sample = match args.voice {
        Some(path) => match VoiceSample::from_file(&path).await {
            Ok(sample) => Some(sample),
            Err(e) => {
                return Ok(report(&PolyglotError::AudioDecode(format!(
                    "could not read {}: {e}",
                    path.display()
                ))));
            }
        },
        None => None,
    };

    let auto_translate = args.translate || config.translation.enabled;
    let request = GenerationRequest::new(voice_sample, text, language).with_auto_translate(auto_translate);
    if let Err(e) = request.validate() {
        return Ok(report(&e));
    }

    let loader = ModelLoader::new(config.model.clone());
    let model = match loader.load().await {
        Ok(model) => model,
        Err(e) => return Ok(report(&e)),
    };
    println!("Model ready on {}", model.device());

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    let pb = spinner.clone();

    // `println` on a hidden bar drops the line; `suspend` always runs the closure.
    let mut pipeline = SynthesisPipeline::new(model, config.output.clone()).with_progress(Box::new(
        move |event| {
            if let Some(line) = polyglot::status_line(&event, language) {
                pb.suspend(|| println!("{line}"));
            }
            match event {
                ProgressEvent::GenerationStarted { language, .. } => {
                    pb.set_message(format!("Generating {language} speech..."));
                    pb.enable_steady_tick(Duration::from_millis(100));
                }
                ProgressEvent::GenerationFinished { .. } | ProgressEvent::Error { .. } => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        },
    ));
    if auto_translate {
        match LibreTranslateClient::new(config.translation.clone()) {
            Ok(client) => {
                let translator: Arc<dyn Translator> = Arc::new(client);
                pipeline = pipeline.with_translator(translator);
            }
            Err(e) => {
                warn!(error = %e, "translation client unavailable; text will not be translated");
            }
        }
    }

    let outcome = match pipeline.synthesize(&request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.finish_and_clear();
            return Ok(report(&e));
        }
    };

    println!("Audio generated successfully!");
    println!("  Language:    {}", outcome.language.display_name());
    println!("  Sample rate: {} Hz", outcome.sample_rate);
    println!("  Duration:    {:.2} s", outcome.duration_secs);
    println!("  Text length: {} characters", outcome.text_chars);
    println!(
        "  Saved to:    {} (download as {})",
        outcome.output_path.display(),
        outcome.download_name
    );

    if args.play {
        play(outcome.output_path).await;
    }
    Ok(ExitCode::SUCCESS)
}

/// Play the generated file. Failures are warnings; the file is already saved.
#[cfg(feature = "playback")]
async fn play(path: PathBuf) {
    let result =
        tokio::task::spawn_blocking(move || polyglot::audio::playback::play_wav_file(&path)).await;
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => eprintln!("Warning: {}", e.user_message()),
        Err(e) => eprintln!("Warning: playback task failed: {e}"),
    }
}

#[cfg(not(feature = "playback"))]
async fn play(_path: PathBuf) {
    eprintln!(
        "Warning: playback is not available in this build (rebuild with `--features playback`)."
    );
}

fn list_languages() {
    for language in Language::all() {
        println!("  {:<12} {}", language.display_name(), language.code());
    }
}

async fn run_doctor(config_path: Option<&Path>) -> anyhow::Result<()> {
    let findings = doctor::run_checks(config_path).await;
    for finding in &findings {
        println!("[{}] {}: {}", finding.severity.label(), finding.title, finding.summary);
        for line in &finding.evidence {
            println!("        {line}");
        }
    }

    if doctor::has_errors(&findings) {
        let count = findings
            .iter()
            .filter(|f| f.severity >= DoctorSeverity::Error)
            .count();
        bail!("doctor found {count} problem(s)");
    }
    Ok(())
}

fn run_config(config_path: Option<&Path>, action: ConfigAction) -> anyhow::Result<()> {
    let path = config_path.map_or_else(PolyglotConfig::default_config_path, Path::to_path_buf);
    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            PolyglotConfig::default().save_to_file(&path)?;
            println!("Wrote {}", path.display());
        }
        ConfigAction::Show => {
            let config = PolyglotConfig::load(config_path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
