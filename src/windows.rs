use crate::float::Float;

/// Periodic Hann window of `size` samples.
pub fn hann_window<T: Float>(size: usize) -> Vec<T> {
    let half = T::cast(0.5);
    (0..size)
        .map(|i| half * (T::one() - (T::cast(i) * T::TAU() / T::cast(size)).cos()))
        .collect()
}
