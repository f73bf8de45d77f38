//! Decoding of arbitrary audio/video files into an [`AudioBuffer`].
//!
//! Decoding is delegated to an `ffmpeg` subprocess which converts the first
//! audio stream to raw little-endian `f32` on its stdout.

use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::{debug, warn};

use crate::{
    audio::AudioBuffer,
    error::{Error, Result},
};

pub trait Decode {
    fn decode(&self, path: &Path) -> Result<AudioBuffer>;
}

/// Decodes through an external `ffmpeg` binary, resampling to a fixed format.
#[derive(Clone, Debug)]
pub struct FfmpegDecoder {
    pub program: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for FfmpegDecoder {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            sample_rate: 44100,
            channels: 2,
        }
    }
}

impl FfmpegDecoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["-nostdin", "-hide_banner", "-loglevel", "error", "-i"])
            .arg(path)
            .args(["-vn", "-f", "f32le", "-acodec", "pcm_f32le", "-ac"])
            .arg(self.channels.to_string())
            .arg("-ar")
            .arg(self.sample_rate.to_string())
            .arg("-")
            .stdin(Stdio::null());
        command
    }
}

impl Decode for FfmpegDecoder {
    fn decode(&self, path: &Path) -> Result<AudioBuffer> {
        debug!(program = %self.program.display(), input = %path.display(), "running ffmpeg");

        let output = self.command(path).output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FfmpegNotFound(self.program.display().to_string()),
            _ => Error::Io(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::Decode(if stderr.is_empty() {
                format!("ffmpeg exited with {}", output.status)
            } else {
                stderr
            }));
        }

        let samples = parse_f32le(&output.stdout)?;
        if samples.len() % self.channels as usize != 0 {
            return Err(Error::Decode(format!(
                "ffmpeg produced {} samples, not a whole number of {}-channel frames",
                samples.len(),
                self.channels
            )));
        }
        if samples.is_empty() {
            warn!(input = %path.display(), "decoded audio track is empty");
        }

        AudioBuffer::new(samples, self.sample_rate, self.channels)
    }
}

/// Reads a raw `f32le` sample stream.
pub fn parse_f32le(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(Error::Decode(format!(
            "truncated sample stream ({} bytes)",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Check if `program` runs as an ffmpeg binary.
pub fn ffmpeg_available(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
