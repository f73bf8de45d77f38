use rustfft::{num_traits, FftNum};

pub trait Float: FftNum + num_traits::Float + num_traits::FloatConst {
    /// Converts a constant or an index into `Self`, yielding NaN if it does not fit.
    fn cast<N: num_traits::ToPrimitive>(n: N) -> Self {
        <Self as num_traits::NumCast>::from(n).unwrap_or_else(<Self as num_traits::Float>::nan)
    }
}

impl<T: FftNum + num_traits::Float + num_traits::FloatConst> Float for T {}
