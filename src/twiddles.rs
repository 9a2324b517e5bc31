use num_complex::Complex;

use crate::common::{from_f64, FftNum};
use crate::FftDirection;

/// Computes `exp(-2πi * index / fft_len)` for forward transforms, or its conjugate for inverse transforms
pub fn compute_twiddle<T: FftNum>(
    index: usize,
    fft_len: usize,
    direction: FftDirection,
) -> Complex<T> {
    let constant = -2f64 * std::f64::consts::PI / fft_len as f64;
    // reduce the index first, so large plans don't lose precision in the angle
    let angle = constant * (index % fft_len) as f64;

    let result = Complex {
        re: from_f64(angle.cos()),
        im: from_f64(angle.sin()),
    };

    match direction {
        FftDirection::Forward => result,
        FftDirection::Inverse => result.conj(),
    }
}

/// Multiplies `value` by `-i` for forward transforms, or by `i` for inverse transforms
#[inline(always)]
pub fn rotate_90<T: FftNum>(value: Complex<T>, direction: FftDirection) -> Complex<T> {
    match direction {
        FftDirection::Forward => Complex {
            re: value.im,
            im: -value.re,
        },
        FftDirection::Inverse => Complex {
            re: -value.im,
            im: value.re,
        },
    }
}

/// Applies a stored (inverse-signed) twiddle factor to `value`, conjugating the twiddle for forward transforms
#[inline(always)]
pub fn apply_twiddle<T: FftNum>(
    value: Complex<T>,
    twiddle: Complex<T>,
    direction: FftDirection,
) -> Complex<T> {
    match direction {
        FftDirection::Forward => value * twiddle.conj(),
        FftDirection::Inverse => value * twiddle,
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::test_utils::compare_vectors;
    use std::f32;

    #[test]
    fn test_compute_twiddle() {
        let constant = -2f32 * f32::consts::PI;

        for len in 1..10 {
            let actual: Vec<Complex<f32>> = (0..len)
                .map(|i| compute_twiddle(i, len, FftDirection::Forward))
                .collect();
            let expected: Vec<Complex<f32>> = (0..len)
                .map(|i| Complex::from_polar(1f32, constant * i as f32 / len as f32))
                .collect();

            assert!(compare_vectors(&actual, &expected), "len = {}", len)
        }

        //for each len, verify that each element in the inverse is the conjugate of the non-inverse
        for len in 1..10 {
            for i in 0..len {
                let forward: Complex<f64> = compute_twiddle(i, len, FftDirection::Forward);
                let inverse: Complex<f64> = compute_twiddle(i, len, FftDirection::Inverse);
                assert_eq!(forward, inverse.conj(), "len = {}, i = {}", len, i);
            }
        }
    }

    #[test]
    fn test_rotate_90() {
        let value = Complex::new(3.0f64, -2.0);
        let minus_i = Complex::new(0.0, -1.0);

        assert_eq!(rotate_90(value, FftDirection::Forward), value * minus_i);
        assert_eq!(rotate_90(value, FftDirection::Inverse), value * minus_i.conj());
    }

    #[test]
    fn test_apply_twiddle() {
        let value = Complex::new(1.5f64, 0.25);
        let twiddle: Complex<f64> = compute_twiddle(1, 8, FftDirection::Inverse);

        assert_eq!(
            apply_twiddle(value, twiddle, FftDirection::Inverse),
            value * twiddle
        );
        assert_eq!(
            apply_twiddle(value, twiddle, FftDirection::Forward),
            value * twiddle.conj()
        );
    }
}
