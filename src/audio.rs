use std::time::Duration;

use crate::error::{Error, Result};

/// Decoded audio held in memory: interleaved samples (e.g. `[L0, R0, L1, R1, ...]`)
/// plus the rate and channel count needed to interpret them.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidBuffer("zero channels".into()));
        }
        if sample_rate == 0 {
            return Err(Error::InvalidBuffer("zero sample rate".into()));
        }
        if samples.len() % channels as usize != 0 {
            return Err(Error::InvalidBuffer(format!(
                "{} samples do not split into {} channels",
                samples.len(),
                channels
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Interleaves equally long per-channel buffers.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        let count = u16::try_from(channels.len())
            .map_err(|_| Error::InvalidBuffer(format!("{} channels", channels.len())))?;
        let frames = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|c| c.len() != frames) {
            return Err(Error::InvalidBuffer("channels differ in length".into()));
        }

        let mut samples = Vec::with_capacity(frames * channels.len());
        for i in 0..frames {
            samples.extend(channels.iter().map(|c| c[i]));
        }
        Self::new(samples, sample_rate, count)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Copies out one channel. Panics if `index >= channels()`.
    pub fn channel(&self, index: usize) -> Vec<f32> {
        assert!(index < self.channels as usize);
        self.samples
            .iter()
            .skip(index)
            .step_by(self.channels as usize)
            .copied()
            .collect()
    }
}
