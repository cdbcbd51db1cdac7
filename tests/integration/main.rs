//! Integration test binary -- all integration tests consolidated into a single
//! binary to keep link times down.

// Allow unwrap/expect in test code
#![allow(clippy::unwrap_used, clippy::expect_used)]


mod chatterbox_contract;
mod doctor_checks;
#[cfg(feature = "chatterbox")]
mod e2e_voice_chatterbox;
mod translation_contract;
