use crate::{float::Float, windows::hann_window};

/// Overlap-add driver: slices `buf` into Hann-windowed frames every `slide_size`
/// samples, hands each frame to `process` and sums the resynthesized frames.
///
/// The result has the same length as `buf` and is time-aligned with it. With an
/// identity `process` the input is reproduced exactly, provided `window_size` is a
/// multiple of `slide_size` and at least three times as large.
pub fn transform<T: Float>(
    window_size: usize,
    slide_size: usize,
    buf: &[T],
    mut process: impl FnMut(&[T]) -> Vec<T>,
) -> Vec<T> {
    assert!(0 < slide_size && slide_size <= window_size);

    let window = hann_window::<T>(window_size);
    let output_scale = T::cast(slide_size)
        / window
            .iter()
            .fold(T::zero(), |acc, &w| acc + w * w);

    // Leading padding puts the first input sample under a full set of frames.
    let pad = window_size - slide_size;
    let mut padded = vec![T::zero(); pad];
    padded.extend_from_slice(buf);
    padded.resize(pad + buf.len() + window_size, T::zero());

    let mut output = vec![T::zero(); padded.len()];
    let mut frame = vec![T::zero(); window_size];
    let mut start = 0;
    while start + window_size <= padded.len() {
        for ((f, &x), &w) in frame.iter_mut().zip(&padded[start..]).zip(&window) {
            *f = x * w;
        }
        let processed = process(&frame);
        debug_assert_eq!(processed.len(), window_size);
        for ((y, &x), &w) in output[start..].iter_mut().zip(&processed).zip(&window) {
            *y = *y + x * w * output_scale;
        }
        start += slide_size;
    }

    output.drain(..pad);
    output.truncate(buf.len());
    output
}
