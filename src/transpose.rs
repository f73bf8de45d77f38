use tracing::{debug, warn};

use crate::{
    audio::AudioBuffer,
    error::{Error, Result},
    pitch_shift,
    transform::transform,
};

pub const WINDOW_SIZE: usize = 2048;
pub const SLIDE_SIZE: usize = WINDOW_SIZE / 4;

/// Frequency ratio for a shift of `semitones`; fails only when it is not a
/// normal `f32` (overflow to infinity or underflow to zero).
pub fn pitch_ratio(semitones: i32) -> Result<f32> {
    let ratio = 2.0f32.powf(semitones as f32 / 12.0);
    if ratio.is_normal() {
        Ok(ratio)
    } else {
        Err(Error::TransposeOutOfRange(semitones))
    }
}

/// Shifts every channel of `buffer` by `semitones` without changing its length.
pub fn transpose(buffer: &AudioBuffer, semitones: i32) -> Result<AudioBuffer> {
    let ratio = pitch_ratio(semitones)?;
    if semitones == 0 {
        return Ok(buffer.clone());
    }

    let pitch = semitones as f32 / 12.0;
    // bin 1 landing past the last bin means nothing above DC survives
    if ratio >= (WINDOW_SIZE / 2) as f32 + 0.5 {
        warn!(semitones, "shift pushes every partial past Nyquist; output will be silent");
    }
    debug!(semitones, channels = buffer.channels(), frames = buffer.frames(), "pitch shifting");

    let channels = (0..buffer.channels() as usize)
        .map(|c| {
            transform(
                WINDOW_SIZE,
                SLIDE_SIZE,
                &buffer.channel(c),
                pitch_shift::transform_processor(WINDOW_SIZE, SLIDE_SIZE, pitch),
            )
        })
        .collect();

    AudioBuffer::from_channels(channels, buffer.sample_rate())
}
