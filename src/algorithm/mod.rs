use num_complex::Complex;

use crate::{FftDirection, FftNum, Length};

pub mod butterflies;
mod bluesteins_algorithm;
mod mixed_radix;
mod real_mixed_radix;

pub use self::bluesteins_algorithm::BluesteinPlan;
pub use self::mixed_radix::MixedRadixPlan;
pub use self::real_mixed_radix::{RealBluesteinPlan, RealMixedRadixPlan};

/// An in-place complex transform of a fixed length, runnable in either direction.
///
/// Callers have already validated that `buffer.len() == self.len()` and `scratch.len() >= self.scratch_len()`.
pub trait ComplexKernel<T: FftNum>: Length {
    /// The number of scratch elements `process` needs
    fn scratch_len(&self) -> usize;

    /// Transforms `buffer` in place and multiplies every output by `scale`. Never allocates.
    fn process(
        &self,
        buffer: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
        direction: FftDirection,
        scale: T,
    );
}

/// An in-place real transform of a fixed length, reading or writing the half-complex packed spectrum.
///
/// Forward transforms turn a real signal into a packed spectrum, inverse transforms turn a packed spectrum back into a
/// real signal. The same validation preconditions as `ComplexKernel` apply.
pub trait RealKernel<T: FftNum>: Length {
    /// The number of complex scratch elements `process` needs
    fn scratch_len(&self) -> usize;

    /// Transforms `buffer` in place between signal and packed spectrum, multiplying every output by `scale`
    fn process(
        &self,
        buffer: &mut [T],
        scratch: &mut [Complex<T>],
        direction: FftDirection,
        scale: T,
    );
}

#[inline(always)]
pub(crate) fn apply_scale<T: FftNum>(buffer: &mut [Complex<T>], scale: T) {
    if scale != T::one() {
        for element in buffer.iter_mut() {
            *element = *element * scale;
        }
    }
}
