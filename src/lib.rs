//! Dump the audio track of any media file to WAV, optionally transposed.
//!
//! Decoding goes through an external `ffmpeg`; transposition is a phase
//! vocoder pitch shift applied per channel; output is 16-bit PCM WAV.

pub mod audio;
pub mod cli;
pub mod decode;
pub mod dump;
mod error;
pub mod fft;
pub mod float;
pub mod pitch_shift;
pub mod transform;
pub mod transpose;
pub mod wav;
pub mod windows;

pub use audio::AudioBuffer;
pub use decode::{Decode, FfmpegDecoder};
pub use dump::{default_output_path, dump, Confirm, DumpOptions, PromptConfirm, Report};
pub use error::{Error, Result};

/// Root mean square level of `buf`; zero for an empty buffer.
pub fn power<T: float::Float>(buf: &[T]) -> T {
    if buf.is_empty() {
        return T::zero();
    }
    (buf.iter().fold(T::zero(), |acc, &x| acc + x.powi(2)) / T::cast(buf.len())).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn power_of_constant_and_empty() {
        assert_abs_diff_eq!(power(&[0.5f32; 16]), 0.5);
        assert_abs_diff_eq!(power(&[1.0f64, -1.0]), 1.0);
        assert_eq!(power::<f32>(&[]), 0.0);
    }
}
