//! Shared test utilities used across multiple test modules.

#![allow(clippy::expect_used)]

use std::io::Cursor;
use std::path::Path;

/// Write a 16-bit PCM sine tone (220 Hz) WAV with `frames` frames per channel.
pub fn write_test_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create test wav");
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let v = ((t * 220.0 * std::f32::consts::TAU).sin() * 0.3 * i16::MAX as f32) as i16;
        for _ in 0..channels {
            writer.write_sample(v).expect("write test sample");
        }
    }
    writer.finalize().expect("finalize test wav");
}

/// Encode interleaved f32 samples as an in-memory 16-bit PCM WAV.
pub fn wav_bytes(channels: u16, sample_rate: u32, interleaved: &[f32]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("create wav writer");
        for &s in interleaved {
            writer
                .write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
                .expect("write sample");
        }
        writer.finalize().expect("finalize wav");
    }
    cursor.into_inner()
}
