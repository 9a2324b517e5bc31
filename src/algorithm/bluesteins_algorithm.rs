use num_complex::Complex;
use num_traits::Zero;

use super::{ComplexKernel, MixedRadixPlan};
use crate::array_utils::try_zeroed;
use crate::common::from_f64;
use crate::math_utils::bluestein_inner_len;
use crate::twiddles::{apply_twiddle, compute_twiddle};
use crate::{FftDirection, FftNum, Length, PlanError};

/// Implementation of Bluestein's Algorithm
///
/// This algorithm computes an arbitrary-sized FFT in O(nlogn) time. It does this by converting this size n FFT into a
/// convolution of size M, where M >= 2N - 1, and running that convolution through a mixed-radix FFT of size M.
/// M is the smallest product of 2, 3, 5, 7 and 11 that is large enough.
///
/// It requires a large scratch space: two buffers of size M.
pub struct BluesteinPlan<T> {
    len: usize,
    inner_plan: MixedRadixPlan<T>,

    // bk[m] = exp(iπm²/n)
    bk: Box<[Complex<T>]>,
    // the FFT of the zero-padded, symmetric chirp, pre-divided by the inner length
    bkf: Box<[Complex<T>]>,
}

impl<T: FftNum> BluesteinPlan<T> {
    /// Creates a FFT instance which will process inputs/outputs of size `len`
    ///
    /// Note that this constructor is quite expensive to run; This algorithm must run a FFT of the inner size within
    /// the constructor.
    pub fn new(len: usize) -> Result<Self, PlanError> {
        let inner_len = bluestein_inner_len(len).ok_or(PlanError::Allocation {
            elements: usize::MAX,
        })?;
        // report the requested length, not the padded one
        let inner_plan = MixedRadixPlan::new(inner_len).map_err(|error| match error {
            PlanError::Capacity { max, .. } => PlanError::Capacity { len, max },
            other => other,
        })?;

        // m² mod 2n, computed incrementally so it never overflows
        let mut bk: Box<[Complex<T>]> = try_zeroed(len)?;
        let mut coeff = 0;
        for (m, chirp) in bk.iter_mut().enumerate() {
            *chirp = compute_twiddle(coeff, 2 * len, FftDirection::Inverse);
            coeff += 2 * m + 1;
            if coeff >= 2 * len {
                coeff -= 2 * len;
            }
        }

        let inner_len_recip: T = from_f64(1.0 / inner_len as f64);
        let mut bkf: Box<[Complex<T>]> = try_zeroed(inner_len)?;
        if let Some(first) = bk.first() {
            bkf[0] = *first * inner_len_recip;
        }
        for m in 1..len {
            let value = bk[m] * inner_len_recip;
            bkf[m] = value;
            bkf[inner_len - m] = value;
        }

        let mut inner_scratch: Box<[Complex<T>]> = try_zeroed(inner_plan.scratch_len())?;
        inner_plan.process(&mut bkf, &mut inner_scratch, FftDirection::Forward, T::one());

        Ok(Self {
            len,
            inner_plan,
            bk,
            bkf,
        })
    }

    /// The length of the convolution this plan runs
    pub fn inner_len(&self) -> usize {
        self.inner_plan.len()
    }
}

impl<T: FftNum> ComplexKernel<T> for BluesteinPlan<T> {
    fn scratch_len(&self) -> usize {
        self.inner_len() + self.inner_plan.scratch_len()
    }

    fn process(
        &self,
        buffer: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
        direction: FftDirection,
        scale: T,
    ) {
        let (inner_buffer, inner_scratch) = scratch.split_at_mut(self.inner_len());

        // Copy the buffer into our inner FFT input, multiplied by the chirp. The buffer only fills part of the
        // inner FFT input, so zero fill the rest
        for ((inner, &element), &chirp) in inner_buffer
            .iter_mut()
            .zip(buffer.iter())
            .zip(self.bk.iter())
        {
            *inner = apply_twiddle(element, chirp, direction);
        }
        for inner in inner_buffer.iter_mut().skip(self.len) {
            *inner = Complex::zero();
        }

        self.inner_plan
            .process(inner_buffer, inner_scratch, FftDirection::Forward, scale);

        // the convolution itself
        for (inner, &multiplier) in inner_buffer.iter_mut().zip(self.bkf.iter()) {
            *inner = match direction {
                FftDirection::Forward => *inner * multiplier,
                FftDirection::Inverse => *inner * multiplier.conj(),
            };
        }

        self.inner_plan
            .process(inner_buffer, inner_scratch, FftDirection::Inverse, T::one());

        // copy our data back to the buffer, applying the chirp again as we go
        for ((element, &inner), &chirp) in buffer
            .iter_mut()
            .zip(inner_buffer.iter())
            .zip(self.bk.iter())
        {
            *element = apply_twiddle(inner, chirp, direction);
        }
    }
}

impl<T> Length for BluesteinPlan<T> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }
}
