use std::ops::Range;

use num_complex::Complex;

use super::butterflies::{pass2, pass3, pass4, pass5, pass_generic};
use super::{apply_scale, ComplexKernel};
use crate::array_utils::{checked_len, try_zeroed};
use crate::math_utils::factorize;
use crate::{twiddles, FftDirection, FftNum, Length, PlanError};

// Radices above this run through the generic pass, which needs its own table of roots
const LARGEST_HARDCODED_RADIX: usize = 5;

/// One radix step of a mixed-radix plan. `tw` and `tws` index into the plan's shared twiddle storage.
struct FactorData {
    radix: usize,
    tw: Range<usize>,
    tws: Option<Range<usize>>,
}

/// Implementation of a mixed-radix Stockham FFT
///
/// The length is decomposed into radix factors (4s, then a 2, then odd factors ascending), and each factor becomes
/// one pass over the data. Passes ping-pong between the caller's buffer and a scratch buffer of the same length,
/// so the output lands in natural order without any separate transpose or bit reversal.
///
/// Twiddle factors for every pass are computed once, in the constructor, and stored in a single contiguous block.
pub struct MixedRadixPlan<T> {
    len: usize,
    factors: Box<[FactorData]>,
    twiddles: Box<[Complex<T>]>,
}

impl<T: FftNum> MixedRadixPlan<T> {
    /// Builds a plan for transforms of size `len`. Fails before allocating if `len` has too many factors.
    pub fn new(len: usize) -> Result<Self, PlanError> {
        let radices = factorize(len)?;

        // lay out the twiddle storage: (radix - 1) * (ido - 1) twiddles per pass, plus `radix` roots for generic passes
        let mut factors = Vec::with_capacity(radices.len());
        let mut offset = 0;
        let mut l1 = 1;
        for &radix in radices.iter() {
            let ido = len / (l1 * radix);

            let tw_end = checked_len(&[offset, (radix - 1) * (ido - 1)])?;
            let tw = offset..tw_end;
            offset = tw_end;

            let tws = if radix > LARGEST_HARDCODED_RADIX {
                let tws_end = checked_len(&[offset, radix])?;
                let tws = offset..tws_end;
                offset = tws_end;
                Some(tws)
            } else {
                None
            };

            factors.push(FactorData { radix, tw, tws });
            l1 *= radix;
        }

        let mut twiddles: Box<[Complex<T>]> = try_zeroed(offset)?;

        // All twiddles are stored with the inverse sign. Forward passes conjugate them on the fly
        let mut l1 = 1;
        for factor in factors.iter() {
            let ido = len / (l1 * factor.radix);

            let tw = &mut twiddles[factor.tw.clone()];
            for j in 1..factor.radix {
                for i in 1..ido {
                    tw[(j - 1) * (ido - 1) + i - 1] =
                        twiddles::compute_twiddle(j * l1 * i, len, FftDirection::Inverse);
                }
            }

            if let Some(tws) = factor.tws.clone() {
                for (j, root) in twiddles[tws].iter_mut().enumerate() {
                    *root = twiddles::compute_twiddle(j, factor.radix, FftDirection::Inverse);
                }
            }

            l1 *= factor.radix;
        }

        Ok(Self {
            len,
            factors: factors.into_boxed_slice(),
            twiddles,
        })
    }

    /// The radix of every pass, in execution order
    pub fn radices(&self) -> Vec<usize> {
        self.factors.iter().map(|factor| factor.radix).collect()
    }

    fn run_pass(
        &self,
        factor: &FactorData,
        l1: usize,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
        direction: FftDirection,
    ) {
        let ido = self.len / (l1 * factor.radix);
        let tw = &self.twiddles[factor.tw.clone()];

        match factor.radix {
            2 => pass2(ido, l1, input, output, tw, direction),
            3 => pass3(ido, l1, input, output, tw, direction),
            4 => pass4(ido, l1, input, output, tw, direction),
            5 => pass5(ido, l1, input, output, tw, direction),
            radix => {
                let roots: &[Complex<T>] = match factor.tws.clone() {
                    Some(tws) => &self.twiddles[tws],
                    None => &[],
                };
                pass_generic(radix, ido, l1, input, output, tw, roots, direction)
            }
        }
    }
}

impl<T: FftNum> ComplexKernel<T> for MixedRadixPlan<T> {
    fn scratch_len(&self) -> usize {
        if self.factors.is_empty() {
            0
        } else {
            self.len
        }
    }

    fn process(
        &self,
        buffer: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
        direction: FftDirection,
        scale: T,
    ) {
        let scratch = &mut scratch[..self.scratch_len()];

        // even passes read from the buffer and write to scratch, odd passes go the other way
        let mut l1 = 1;
        for (index, factor) in self.factors.iter().enumerate() {
            if index % 2 == 0 {
                self.run_pass(factor, l1, buffer, scratch, direction);
            } else {
                self.run_pass(factor, l1, scratch, buffer, direction);
            }
            l1 *= factor.radix;
        }

        if self.factors.len() % 2 == 1 {
            if scale == T::one() {
                buffer.copy_from_slice(scratch);
            } else {
                for (element, &result) in buffer.iter_mut().zip(scratch.iter()) {
                    *element = result * scale;
                }
            }
        } else {
            apply_scale(buffer, scale);
        }
    }
}

impl<T> Length for MixedRadixPlan<T> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::test_utils::{check_complex_kernel, random_signal};

    #[test]
    fn test_mixed_radix() {
        for len in 1..80 {
            let plan = MixedRadixPlan::<f64>::new(len).unwrap();
            check_complex_kernel(&plan, len);
        }
        for &len in &[96, 121, 128, 143, 169, 210, 243, 256, 343, 1000, 1024] {
            let plan = MixedRadixPlan::<f64>::new(len).unwrap();
            check_complex_kernel(&plan, len);
        }
    }

    #[test]
    fn test_mixed_radix_f32() {
        for &len in &[12, 35, 64, 77, 100] {
            let plan = MixedRadixPlan::<f32>::new(len).unwrap();
            check_complex_kernel(&plan, len);
        }
    }

    #[test]
    fn test_twiddle_layout() {
        let plan = MixedRadixPlan::<f32>::new(4 * 7 * 13).unwrap();
        assert_eq!(plan.radices(), vec![4, 7, 13]);

        // 4: ido = 91, 7: ido = 13, 13: ido = 1 needs no twiddles. Plus 7 + 13 generic roots
        let expected = 3 * 90 + 6 * 12 + 7 + 13;
        assert_eq!(plan.twiddles.len(), expected);
    }

    #[test]
    fn test_scale() {
        let len = 30;
        let plan = MixedRadixPlan::<f64>::new(len).unwrap();
        let input: Vec<Complex<f64>> = random_signal(len);
        let mut scratch = vec![Complex::new(0.0, 0.0); plan.scratch_len()];

        let mut unscaled = input.clone();
        plan.process(&mut unscaled, &mut scratch, FftDirection::Forward, 1.0);

        let mut scaled = input;
        plan.process(&mut scaled, &mut scratch, FftDirection::Forward, 0.25);

        for (a, b) in unscaled.iter().zip(scaled.iter()) {
            assert!((*a * 0.25 - *b).norm() < 1e-12);
        }
    }
}
