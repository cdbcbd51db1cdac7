//! Output file placement and scratch files.

use crate::config::{OutputConfig, OutputMode};
use crate::error::Result;
use crate::language::Language;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the next generation for `language` is written.
///
/// In [`OutputMode::Fixed`] every call returns the same path, so concurrent
/// requests in one process would overwrite each other's audio.
pub fn output_path(config: &OutputConfig, language: Language) -> PathBuf {
    match config.mode {
        OutputMode::Fixed => config.path.clone(),
        OutputMode::PerRequest => config
            .dir
            .join(format!("{}-{}.wav", uuid::Uuid::new_v4(), language.code())),
    }
}

/// Write an uploaded sample to a uniquely named `.wav` scratch file.
///
/// The file is deleted when the returned handle is dropped.
pub fn write_scratch_sample(bytes: &[u8], dir: Option<&Path>) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("polyglot-voice-").suffix(".wav");
    let mut file = match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            builder.tempfile_in(dir)?
        }
        None => builder.tempfile()?,
    };
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
