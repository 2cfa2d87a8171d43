#![allow(dead_code)]

pub mod config;
pub mod mock_gemini;
pub mod server;

/// Whether the external audio encoder is on PATH
///
/// Tests for compressed output formats skip themselves when it is not.
pub fn ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}
