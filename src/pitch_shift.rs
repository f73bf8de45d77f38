use rustfft::num_complex::Complex;

use crate::{
    fft::{fill_right_part_of_spectrum, Fft},
    float::Float,
};

/// Frame processor shifting the pitch by `pitch` octaves, for use with
/// [`transform`](crate::transform::transform).
pub fn transform_processor<T: Float>(
    window_size: usize,
    slide_size: usize,
    pitch: T,
) -> impl FnMut(&[T]) -> Vec<T> {
    let fft = Fft::new(window_size);
    let mut pitch_shifter = PitchShifter::new(window_size, slide_size);
    let pitch_change_amount = T::cast(2).powf(pitch);

    move |buf| {
        fft.retouch_spectrum(buf, |spectrum| {
            pitch_shifter.process(spectrum, pitch_change_amount);
        })
    }
}

/// Phase vocoder state carried from one frame to the next.
pub struct PitchShifter<T> {
    slide_size: usize,
    prev_input_phases: Vec<T>,
    prev_output_phases: Vec<T>,
}

impl<T: Float> PitchShifter<T> {
    pub fn new(len: usize, slide_size: usize) -> Self {
        Self {
            slide_size,
            prev_input_phases: vec![T::zero(); len / 2 + 1],
            prev_output_phases: vec![T::zero(); len / 2 + 1],
        }
    }

    /// Rewrites `spectrum` in place with every partial scaled by `pitch_change_amount`.
    pub fn process(&mut self, spectrum: &mut [Complex<T>], pitch_change_amount: T) {
        let len = spectrum.len();
        let half = len / 2 + 1;
        debug_assert_eq!(half, self.prev_input_phases.len());

        let slide = T::cast(self.slide_size);
        let expected_advance = |i: usize| T::TAU() * T::cast(i) / T::cast(len) * slide;

        // analysis: magnitude and true frequency (in bins) of each bin
        let mut pre = vec![[T::zero(); 2]; half];
        for i in 0..half {
            let (norm, phase) = spectrum[i].to_polar();
            let phase_diff = wrap_phase(phase - self.prev_input_phases[i] - expected_advance(i));
            self.prev_input_phases[i] = phase;
            let bin_deviation = phase_diff * T::cast(len) / (slide * T::TAU());
            pre[i] = [norm, T::cast(i) + bin_deviation];
        }

        // move each partial to its scaled bin; anything pushed past Nyquist is dropped
        // colliding partials add up; the loudest one decides the frequency
        let mut post: Vec<_> = (0..half).map(|i| [T::zero(), T::cast(i)]).collect();
        let mut loudest = vec![T::zero(); half];
        for (i, &[norm, freq]) in pre.iter().enumerate() {
            let shifted_bin = (T::cast(i) * pitch_change_amount)
                .round()
                .to_usize()
                .unwrap_or(usize::MAX);
            if shifted_bin >= half {
                break;
            }
            post[shifted_bin][0] = post[shifted_bin][0] + norm;
            if norm >= loudest[shifted_bin] {
                loudest[shifted_bin] = norm;
                post[shifted_bin][1] = freq * pitch_change_amount;
            }
        }

        // synthesis: accumulate phase at the shifted frequencies
        for i in 0..half {
            let bin_deviation = post[i][1] - T::cast(i);
            let phase_diff =
                bin_deviation * T::TAU() * slide / T::cast(len) + expected_advance(i);
            let phase = wrap_phase(self.prev_output_phases[i] + phase_diff);
            self.prev_output_phases[i] = phase;
            spectrum[i] = Complex::from_polar(post[i][0], phase);
        }

        // DC and Nyquist must stay real for a real-valued frame
        spectrum[0] = Complex::new(post[0][0], T::zero());
        if len % 2 == 0 {
            spectrum[len / 2] = Complex::new(post[len / 2][0], T::zero());
        }
        fill_right_part_of_spectrum(spectrum);
    }
}

pub fn wrap_phase<T: Float>(phase: T) -> T {
    if phase >= T::zero() {
        (phase + T::PI()) % T::TAU() - T::PI()
    } else {
        (phase - T::PI()) % T::TAU() + T::PI()
    }
}
