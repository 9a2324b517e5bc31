use num_complex::Complex;

use super::{BluesteinPlan, ComplexKernel, MixedRadixPlan, RealKernel};
use crate::array_utils::try_zeroed;
use crate::common::from_f64;
use crate::math_utils::factorize;
use crate::twiddles::{compute_twiddle, rotate_90};
use crate::{FftDirection, FftNum, Length, PlanError};

enum RealLayout<T> {
    // even lengths: pairs of reals become one complex sample of a half-length transform
    Half {
        inner: MixedRadixPlan<T>,
        twiddles: Box<[Complex<T>]>,
    },
    // odd lengths: the reals are embedded in a full-length complex transform
    Full { inner: MixedRadixPlan<T> },
}

/// Real-input mixed-radix FFT, reading and writing the half-complex packed spectrum
///
/// Even lengths run a complex FFT of half the length and untangle the result with one twiddle per output bin.
/// Odd lengths run a complex FFT of the full length.
pub struct RealMixedRadixPlan<T> {
    len: usize,
    layout: RealLayout<T>,
}

impl<T: FftNum> RealMixedRadixPlan<T> {
    pub fn new(len: usize) -> Result<Self, PlanError> {
        // check the full length's factor count first, so a capacity failure reports the requested length
        factorize(len)?;

        let layout = if len % 2 == 0 && len > 0 {
            let half_len = len / 2;
            let inner = MixedRadixPlan::new(half_len)?;

            let mut twiddles: Box<[Complex<T>]> = try_zeroed(half_len)?;
            for (k, twiddle) in twiddles.iter_mut().enumerate() {
                *twiddle = compute_twiddle(k, len, FftDirection::Forward);
            }
            RealLayout::Half { inner, twiddles }
        } else {
            RealLayout::Full {
                inner: MixedRadixPlan::new(len)?,
            }
        };

        Ok(Self { len, layout })
    }

    fn forward_half(
        &self,
        inner: &MixedRadixPlan<T>,
        twiddles: &[Complex<T>],
        buffer: &mut [T],
        scratch: &mut [Complex<T>],
        scale: T,
    ) {
        let half_len = inner.len();
        let (packed, inner_scratch) = scratch.split_at_mut(half_len);

        for (element, pair) in packed.iter_mut().zip(buffer.chunks_exact(2)) {
            *element = Complex::new(pair[0], pair[1]);
        }
        inner.process(packed, inner_scratch, FftDirection::Forward, scale);

        let half: T = from_f64(0.5);
        let first = packed[0];
        buffer[0] = first.re + first.im;
        buffer[self.len - 1] = first.re - first.im;

        for k in 1..half_len {
            let value = packed[k];
            let mirror = packed[half_len - k].conj();

            let sum = value + mirror;
            let diff = rotate_90(value - mirror, FftDirection::Forward) * twiddles[k];
            let output = (sum + diff) * half;

            buffer[2 * k - 1] = output.re;
            buffer[2 * k] = output.im;
        }
    }

    fn backward_half(
        &self,
        inner: &MixedRadixPlan<T>,
        twiddles: &[Complex<T>],
        buffer: &mut [T],
        scratch: &mut [Complex<T>],
        scale: T,
    ) {
        let half_len = inner.len();
        let (packed, inner_scratch) = scratch.split_at_mut(half_len);

        let bin = |k: usize| {
            if k == 0 {
                Complex::new(buffer[0], T::zero())
            } else if k == half_len {
                Complex::new(buffer[self.len - 1], T::zero())
            } else {
                Complex::new(buffer[2 * k - 1], buffer[2 * k])
            }
        };

        for (k, element) in packed.iter_mut().enumerate() {
            let value = bin(k);
            let mirror = bin(half_len - k).conj();

            let sum = value + mirror;
            let diff = rotate_90((value - mirror) * twiddles[k].conj(), FftDirection::Inverse);
            *element = sum + diff;
        }
        inner.process(packed, inner_scratch, FftDirection::Inverse, scale);

        for (pair, element) in buffer.chunks_exact_mut(2).zip(packed.iter()) {
            pair[0] = element.re;
            pair[1] = element.im;
        }
    }
}

impl<T: FftNum> RealKernel<T> for RealMixedRadixPlan<T> {
    fn scratch_len(&self) -> usize {
        match &self.layout {
            RealLayout::Half { inner, .. } => inner.len() + inner.scratch_len(),
            RealLayout::Full { inner } => full_scratch_len(inner),
        }
    }

    fn process(
        &self,
        buffer: &mut [T],
        scratch: &mut [Complex<T>],
        direction: FftDirection,
        scale: T,
    ) {
        match (&self.layout, direction) {
            (RealLayout::Half { inner, twiddles }, FftDirection::Forward) => {
                self.forward_half(inner, twiddles, buffer, scratch, scale)
            }
            (RealLayout::Half { inner, twiddles }, FftDirection::Inverse) => {
                self.backward_half(inner, twiddles, buffer, scratch, scale)
            }
            (RealLayout::Full { inner }, FftDirection::Forward) => {
                forward_full(inner, buffer, scratch, scale)
            }
            (RealLayout::Full { inner }, FftDirection::Inverse) => {
                backward_full(inner, buffer, scratch, scale)
            }
        }
    }
}

impl<T> Length for RealMixedRadixPlan<T> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }
}

/// Real-input FFT that embeds the signal in a complex Bluestein transform of the same length
pub struct RealBluesteinPlan<T> {
    inner: BluesteinPlan<T>,
}

impl<T: FftNum> RealBluesteinPlan<T> {
    pub fn new(len: usize) -> Result<Self, PlanError> {
        Ok(Self {
            inner: BluesteinPlan::new(len)?,
        })
    }
}

impl<T: FftNum> RealKernel<T> for RealBluesteinPlan<T> {
    fn scratch_len(&self) -> usize {
        full_scratch_len(&self.inner)
    }

    fn process(
        &self,
        buffer: &mut [T],
        scratch: &mut [Complex<T>],
        direction: FftDirection,
        scale: T,
    ) {
        match direction {
            FftDirection::Forward => forward_full(&self.inner, buffer, scratch, scale),
            FftDirection::Inverse => backward_full(&self.inner, buffer, scratch, scale),
        }
    }
}

impl<T> Length for RealBluesteinPlan<T> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

fn full_scratch_len<T: FftNum, K: ComplexKernel<T>>(kernel: &K) -> usize {
    kernel.len() + kernel.scratch_len()
}

fn forward_full<T: FftNum, K: ComplexKernel<T>>(
    kernel: &K,
    buffer: &mut [T],
    scratch: &mut [Complex<T>],
    scale: T,
) {
    let len = kernel.len();
    let (spectrum, inner_scratch) = scratch.split_at_mut(len);

    for (element, &sample) in spectrum.iter_mut().zip(buffer.iter()) {
        *element = Complex::new(sample, T::zero());
    }
    kernel.process(spectrum, inner_scratch, FftDirection::Forward, scale);

    buffer[0] = spectrum[0].re;
    for k in 1..(len + 1) / 2 {
        buffer[2 * k - 1] = spectrum[k].re;
        buffer[2 * k] = spectrum[k].im;
    }
    if len % 2 == 0 && len > 1 {
        buffer[len - 1] = spectrum[len / 2].re;
    }
}

fn backward_full<T: FftNum, K: ComplexKernel<T>>(
    kernel: &K,
    buffer: &mut [T],
    scratch: &mut [Complex<T>],
    scale: T,
) {
    let len = kernel.len();
    let (spectrum, inner_scratch) = scratch.split_at_mut(len);

    // rebuild the full Hermitian spectrum from the packed bins
    spectrum[0] = Complex::new(buffer[0], T::zero());
    for k in 1..(len + 1) / 2 {
        let value = Complex::new(buffer[2 * k - 1], buffer[2 * k]);
        spectrum[k] = value;
        spectrum[len - k] = value.conj();
    }
    if len % 2 == 0 && len > 1 {
        spectrum[len / 2] = Complex::new(buffer[len - 1], T::zero());
    }
    kernel.process(spectrum, inner_scratch, FftDirection::Inverse, scale);

    for (sample, element) in buffer.iter_mut().zip(spectrum.iter()) {
        *sample = element.re;
    }
}
