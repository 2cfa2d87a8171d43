use std::io::Cursor;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Result, SpeechError};
use crate::types::{AudioFormat, RawAudio};

/// Fixed parameters of the upstream PCM payload: these are what the
/// backend always produces, not a negotiated property.
pub const SAMPLE_RATE: u32 = 24_000;
pub const CHANNELS: u16 = 1;
const BYTES_PER_SAMPLE: usize = 2;

const FFMPEG_BIN: &str = "ffmpeg";

/// Re-encode headerless PCM into the requested container/codec
///
/// WAV is framed in-process; compressed targets are piped through an
/// `ffmpeg` child process with that format's default quality settings.
/// No resampling, no channel mixing, no metadata.
pub async fn transcode(raw: &RawAudio, format: AudioFormat) -> Result<Vec<u8>> {
    tracing::debug!("transcoding {} bytes of PCM to {format}", raw.len());

    if raw.len() % BYTES_PER_SAMPLE != 0 {
        return Err(SpeechError::Transcode(format!(
            "PCM payload length {} is not aligned to 16-bit samples",
            raw.len()
        )));
    }

    let muxer = match format {
        AudioFormat::Wav => return encode_wav(raw),
        AudioFormat::Mp3 => "mp3",
        AudioFormat::Opus => "opus",
        AudioFormat::Aac => "adts",
        AudioFormat::Flac => "flac",
    };

    encode_with_ffmpeg(raw, muxer).await
}

/// Frame the PCM samples into a WAV container
fn encode_wav(raw: &RawAudio) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());

    let mut writer = hound::WavWriter::new(&mut cursor, spec)
        .map_err(|e| SpeechError::Transcode(format!("failed to open WAV writer: {e}")))?;

    for sample in raw.as_bytes().chunks_exact(BYTES_PER_SAMPLE) {
        writer
            .write_sample(i16::from_le_bytes([sample[0], sample[1]]))
            .map_err(|e| SpeechError::Transcode(format!("failed to write WAV sample: {e}")))?;
    }

    writer
        .finalize()
        .map_err(|e| SpeechError::Transcode(format!("failed to finalize WAV container: {e}")))?;

    Ok(cursor.into_inner())
}

/// Pipe the PCM payload through ffmpeg and collect the encoded output
async fn encode_with_ffmpeg(raw: &RawAudio, muxer: &str) -> Result<Vec<u8>> {
    let mut child = Command::new(FFMPEG_BIN)
        .args(["-hide_banner", "-loglevel", "error"])
        .args(["-f", "s16le"])
        .arg("-ar")
        .arg(SAMPLE_RATE.to_string())
        .arg("-ac")
        .arg(CHANNELS.to_string())
        .args(["-i", "pipe:0"])
        .args(["-f", muxer, "pipe:1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| SpeechError::Transcode(format!("failed to start {FFMPEG_BIN}: {e}")))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| SpeechError::Transcode(format!("{FFMPEG_BIN} stdin was not captured")))?;

    // Feed stdin from a separate task while draining stdout, so a payload
    // larger than the pipe buffer cannot deadlock the encoder.
    let pcm = raw.as_bytes().to_vec();
    let feeder = tokio::spawn(async move {
        let result = stdin.write_all(&pcm).await;
        drop(stdin);
        result
    });

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| SpeechError::Transcode(format!("{FFMPEG_BIN} did not run to completion: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SpeechError::Transcode(format!(
            "{FFMPEG_BIN} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    match feeder.await {
        Ok(Ok(())) => {}
        // The encoder can close stdin once it has what it needs
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
        Ok(Err(e)) => {
            return Err(SpeechError::Transcode(format!("failed to feed PCM to {FFMPEG_BIN}: {e}")));
        }
        Err(e) => return Err(SpeechError::Internal(anyhow::anyhow!("PCM feeder task failed: {e}"))),
    }

    if output.stdout.is_empty() {
        return Err(SpeechError::Transcode(format!("{FFMPEG_BIN} produced no output")));
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100 ms of a ramp signal at the fixed PCM parameters
    fn pcm_fixture() -> RawAudio {
        let samples = (0..2400).map(|i| {
            let value = i16::try_from((i % 200) * 100 - 10_000).unwrap();
            value.to_le_bytes()
        });

        RawAudio::new(samples.flatten().collect())
    }

    fn ffmpeg_available() -> bool {
        std::process::Command::new(FFMPEG_BIN)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    #[tokio::test]
    async fn wav_round_trip_preserves_samples() {
        let raw = pcm_fixture();
        let encoded = transcode(&raw, AudioFormat::Wav).await.unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(encoded)).unwrap();
        let spec = reader.spec();

        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        assert_eq!(spec.channels, CHANNELS);
        assert_eq!(spec.bits_per_sample, 16);

        let decoded: Vec<i16> = reader.samples::<i16>().map(std::result::Result::unwrap).collect();
        let original: Vec<i16> = raw
            .as_bytes()
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        assert_eq!(decoded, original);
    }

    #[tokio::test]
    async fn empty_payload_yields_an_empty_wav() {
        let encoded = transcode(&RawAudio::new(Vec::new()), AudioFormat::Wav).await.unwrap();

        let reader = hound::WavReader::new(Cursor::new(encoded)).unwrap();
        assert_eq!(reader.len(), 0);
    }

    #[tokio::test]
    async fn misaligned_payload_is_a_processing_error() {
        let error = transcode(&RawAudio::new(vec![0, 1, 2]), AudioFormat::Wav)
            .await
            .unwrap_err();

        match error {
            SpeechError::Transcode(cause) => assert!(cause.contains("aligned")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn mp3_encoding_changes_the_byte_size() {
        if !ffmpeg_available() {
            eprintln!("skipping: {FFMPEG_BIN} not found on PATH");
            return;
        }

        let raw = pcm_fixture();
        let encoded = transcode(&raw, AudioFormat::Mp3).await.unwrap();

        assert!(!encoded.is_empty());
        assert_ne!(encoded.len(), raw.len());
    }

    #[tokio::test]
    async fn flac_output_carries_the_container_magic() {
        if !ffmpeg_available() {
            eprintln!("skipping: {FFMPEG_BIN} not found on PATH");
            return;
        }

        let encoded = transcode(&pcm_fixture(), AudioFormat::Flac).await.unwrap();
        assert_eq!(&encoded[..4], b"fLaC");
    }
}
