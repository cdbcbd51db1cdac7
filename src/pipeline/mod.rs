//! Generation request path.
//!
//! A [`GenerationRequest`] is validated, its voice sample staged to a scratch
//! file and probed, the text optionally translated, and the injected
//! [`SpeechModel`](crate::tts::SpeechModel) called. The returned waveform is
//! normalized and written as 16-bit PCM WAV to the configured output slot.

pub mod output;
pub mod request;
pub mod synthesis;

pub use output::{output_path, write_scratch_sample};
pub use request::{GenerationRequest, VoiceSample};
pub use synthesis::{GenerationOutcome, SynthesisPipeline};
