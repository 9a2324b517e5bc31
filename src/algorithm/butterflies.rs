use num_complex::Complex;
use num_traits::Zero;

use crate::common::{from_f64, FftNum};
use crate::twiddles::{apply_twiddle, rotate_90};
use crate::FftDirection;

// Every pass reads `input` laid out as [l1][radix][ido] and writes `output` laid out as [radix][l1][ido].
// The twiddles for output row `j > 0` and column `i > 0` live at `tw[(j - 1) * (ido - 1) + (i - 1)]`.
// Column zero never needs a twiddle.

#[inline(always)]
fn twiddled<T: FftNum>(
    value: Complex<T>,
    tw: &[Complex<T>],
    ido: usize,
    row: usize,
    column: usize,
    direction: FftDirection,
) -> Complex<T> {
    if column == 0 {
        value
    } else {
        apply_twiddle(value, tw[(row - 1) * (ido - 1) + column - 1], direction)
    }
}

// +1 for inverse passes, -1 for forward passes
#[inline(always)]
fn direction_sign<T: FftNum>(direction: FftDirection) -> T {
    match direction {
        FftDirection::Forward => -T::one(),
        FftDirection::Inverse => T::one(),
    }
}

pub fn pass2<T: FftNum>(
    ido: usize,
    l1: usize,
    input: &[Complex<T>],
    output: &mut [Complex<T>],
    tw: &[Complex<T>],
    direction: FftDirection,
) {
    const RADIX: usize = 2;
    let cc = |i: usize, j: usize, k: usize| input[i + ido * (j + RADIX * k)];
    let ch = |i: usize, k: usize, j: usize| i + ido * (k + l1 * j);

    for k in 0..l1 {
        for i in 0..ido {
            let a = cc(i, 0, k);
            let b = cc(i, 1, k);

            output[ch(i, k, 0)] = a + b;
            output[ch(i, k, 1)] = twiddled(a - b, tw, ido, 1, i, direction);
        }
    }
}

pub fn pass3<T: FftNum>(
    ido: usize,
    l1: usize,
    input: &[Complex<T>],
    output: &mut [Complex<T>],
    tw: &[Complex<T>],
    direction: FftDirection,
) {
    const RADIX: usize = 3;
    let cc = |i: usize, j: usize, k: usize| input[i + ido * (j + RADIX * k)];
    let ch = |i: usize, k: usize, j: usize| i + ido * (k + l1 * j);

    let tw1r: T = from_f64(-0.5);
    let tw1i: T = direction_sign::<T>(direction) * from_f64::<T>(0.866_025_403_784_438_6);

    for k in 0..l1 {
        for i in 0..ido {
            let t0 = cc(i, 0, k);
            let t1 = cc(i, 1, k) + cc(i, 2, k);
            let t2 = cc(i, 1, k) - cc(i, 2, k);

            let ca = t0 + t1 * tw1r;
            let cb = Complex {
                re: -(t2.im * tw1i),
                im: t2.re * tw1i,
            };

            output[ch(i, k, 0)] = t0 + t1;
            output[ch(i, k, 1)] = twiddled(ca + cb, tw, ido, 1, i, direction);
            output[ch(i, k, 2)] = twiddled(ca - cb, tw, ido, 2, i, direction);
        }
    }
}

pub fn pass4<T: FftNum>(
    ido: usize,
    l1: usize,
    input: &[Complex<T>],
    output: &mut [Complex<T>],
    tw: &[Complex<T>],
    direction: FftDirection,
) {
    const RADIX: usize = 4;
    let cc = |i: usize, j: usize, k: usize| input[i + ido * (j + RADIX * k)];
    let ch = |i: usize, k: usize, j: usize| i + ido * (k + l1 * j);

    for k in 0..l1 {
        for i in 0..ido {
            let t2 = cc(i, 0, k) + cc(i, 2, k);
            let t1 = cc(i, 0, k) - cc(i, 2, k);
            let t3 = cc(i, 1, k) + cc(i, 3, k);
            let t4 = rotate_90(cc(i, 1, k) - cc(i, 3, k), direction);

            output[ch(i, k, 0)] = t2 + t3;
            output[ch(i, k, 1)] = twiddled(t1 + t4, tw, ido, 1, i, direction);
            output[ch(i, k, 2)] = twiddled(t2 - t3, tw, ido, 2, i, direction);
            output[ch(i, k, 3)] = twiddled(t1 - t4, tw, ido, 3, i, direction);
        }
    }
}

pub fn pass5<T: FftNum>(
    ido: usize,
    l1: usize,
    input: &[Complex<T>],
    output: &mut [Complex<T>],
    tw: &[Complex<T>],
    direction: FftDirection,
) {
    const RADIX: usize = 5;
    let cc = |i: usize, j: usize, k: usize| input[i + ido * (j + RADIX * k)];
    let ch = |i: usize, k: usize, j: usize| i + ido * (k + l1 * j);

    let sign = direction_sign::<T>(direction);
    let tw1r: T = from_f64(0.309_016_994_374_947_4);
    let tw1i: T = sign * from_f64::<T>(0.951_056_516_295_153_5);
    let tw2r: T = from_f64(-0.809_016_994_374_947_4);
    let tw2i: T = sign * from_f64::<T>(0.587_785_252_292_473_1);

    for k in 0..l1 {
        for i in 0..ido {
            let t0 = cc(i, 0, k);
            let t1 = cc(i, 1, k) + cc(i, 4, k);
            let t4 = cc(i, 1, k) - cc(i, 4, k);
            let t2 = cc(i, 2, k) + cc(i, 3, k);
            let t3 = cc(i, 2, k) - cc(i, 3, k);

            output[ch(i, k, 0)] = t0 + t1 + t2;

            // rows 1 and 4
            let ca = t0 + t1 * tw1r + t2 * tw2r;
            let cb = Complex {
                re: -(t4.im * tw1i + t3.im * tw2i),
                im: t4.re * tw1i + t3.re * tw2i,
            };
            output[ch(i, k, 1)] = twiddled(ca + cb, tw, ido, 1, i, direction);
            output[ch(i, k, 4)] = twiddled(ca - cb, tw, ido, 4, i, direction);

            // rows 2 and 3
            let ca = t0 + t1 * tw2r + t2 * tw1r;
            let cb = Complex {
                re: -(t4.im * tw2i - t3.im * tw1i),
                im: t4.re * tw2i - t3.re * tw1i,
            };
            output[ch(i, k, 2)] = twiddled(ca + cb, tw, ido, 2, i, direction);
            output[ch(i, k, 3)] = twiddled(ca - cb, tw, ido, 3, i, direction);
        }
    }
}

/// A pass for any radix, computing each butterfly as a direct DFT.
///
/// `roots` holds the `radix` inverse-signed roots of unity for this radix, `roots[m] = exp(2πi * m / radix)`.
#[allow(clippy::too_many_arguments)]
pub fn pass_generic<T: FftNum>(
    radix: usize,
    ido: usize,
    l1: usize,
    input: &[Complex<T>],
    output: &mut [Complex<T>],
    tw: &[Complex<T>],
    roots: &[Complex<T>],
    direction: FftDirection,
) {
    let cc = |i: usize, j: usize, k: usize| input[i + ido * (j + radix * k)];
    let ch = |i: usize, k: usize, j: usize| i + ido * (k + l1 * j);

    for k in 0..l1 {
        for i in 0..ido {
            for j in 0..radix {
                let mut sum = Complex::zero();
                let mut root_index = 0;
                for m in 0..radix {
                    sum = sum + apply_twiddle(cc(i, m, k), roots[root_index], direction);

                    root_index += j;
                    if root_index >= radix {
                        root_index -= radix;
                    }
                }

                output[ch(i, k, j)] = if j == 0 {
                    sum
                } else {
                    twiddled(sum, tw, ido, j, i, direction)
                };
            }
        }
    }
}
