use std::sync::Arc;

use rustfft::{num_complex::Complex, FftPlanner};

use crate::float::Float;

pub struct Fft<T: Float> {
    size: usize,
    forward: Arc<dyn rustfft::Fft<T>>,
    inverse: Arc<dyn rustfft::Fft<T>>,
}

impl<T: Float> Fft<T> {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            size,
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
        }
    }

    pub fn forward(&self, buffer: &mut [Complex<T>]) {
        self.forward.process(buffer);
    }

    pub fn inverse(&self, buffer: &mut [Complex<T>]) {
        self.inverse.process(buffer);
    }

    /// Runs `process` on the spectrum of one frame and returns the resynthesized frame.
    ///
    /// `buf` must hold exactly as many samples as the planned size.
    pub fn retouch_spectrum(
        &self,
        buf: &[T],
        mut process: impl FnMut(&mut [Complex<T>]),
    ) -> Vec<T> {
        debug_assert_eq!(buf.len(), self.size);

        let mut spectrum: Vec<_> = buf.iter().map(|&x| Complex::new(x, T::zero())).collect();
        self.forward(&mut spectrum);
        process(&mut spectrum);
        self.inverse(&mut spectrum);
        fix_scale(&mut spectrum);
        spectrum.into_iter().map(|x| x.re).collect()
    }
}

pub fn fix_scale<T: Float>(buf: &mut [Complex<T>]) {
    let scale = T::one() / T::cast(buf.len());
    for x in buf.iter_mut() {
        *x = *x * scale;
    }
}

/// Mirrors bins `1..len / 2` onto the upper half so the inverse transform stays real.
pub fn fill_right_part_of_spectrum<T: Float>(spectrum: &mut [Complex<T>]) {
    let len = spectrum.len();
    for i in 1..len / 2 {
        spectrum[len - i] = spectrum[i].conj();
    }
}
