use num_complex::Complex;
use num_traits::{Float, ToPrimitive, Zero};

use rand::distributions::{uniform::SampleUniform, Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};

use crate::algorithm::{ComplexKernel, RealKernel};
use crate::common::from_f64;
use crate::{FftDirection, FftNum};

/// The seed for the random number generator used to generate
/// random signals. It's defined here so that we have deterministic
/// tests
const RNG_SEED: [u8; 32] = [
    1, 9, 1, 0, 1, 1, 4, 3, 1, 4, 9, 8, 4, 1, 4, 8, 2, 8, 1, 2, 2, 2, 6, 1, 2, 3, 4, 5, 6, 7, 8, 9,
];

pub fn random_real_signal<T: FftNum + SampleUniform>(length: usize) -> Vec<T> {
    let mut rng: StdRng = SeedableRng::from_seed(RNG_SEED);
    let distribution = Uniform::new(from_f64::<T>(-10.0), from_f64::<T>(10.0));
    (0..length).map(|_| distribution.sample(&mut rng)).collect()
}

pub fn random_signal<T: FftNum + SampleUniform>(length: usize) -> Vec<Complex<T>> {
    let mut sig = Vec::with_capacity(length);
    let distribution = Uniform::new(from_f64::<T>(-10.0), from_f64::<T>(10.0));
    let mut rng: StdRng = SeedableRng::from_seed(RNG_SEED);
    for _ in 0..length {
        sig.push(Complex {
            re: distribution.sample(&mut rng),
            im: distribution.sample(&mut rng),
        });
    }
    sig
}

fn to_f64<T: ToPrimitive>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Checks that the two vectors agree to within a tolerance that tracks the precision of `T` and the signal's size
pub fn compare_vectors<T: FftNum + Float>(vec1: &[Complex<T>], vec2: &[Complex<T>]) -> bool {
    assert_eq!(vec1.len(), vec2.len());
    let epsilon = to_f64(T::epsilon());

    let mut error = 0.0;
    let mut magnitude = 0.0;
    for (&a, &b) in vec1.iter().zip(vec2.iter()) {
        let a = Complex::new(to_f64(a.re), to_f64(a.im));
        let b = Complex::new(to_f64(b.re), to_f64(b.im));
        error += (a - b).norm_sqr();
        magnitude += a.norm_sqr();
    }

    let len = vec1.len().max(1) as f64;
    let tolerance = 1000.0 * epsilon * len.log2().max(1.0);
    error.sqrt() <= tolerance * (magnitude.sqrt() + len)
}

pub fn compare_real_vectors<T: FftNum + Float>(vec1: &[T], vec2: &[T]) -> bool {
    let to_complex = |values: &[T]| -> Vec<Complex<T>> {
        values.iter().map(|&re| Complex::new(re, T::zero())).collect()
    };
    compare_vectors(&to_complex(vec1), &to_complex(vec2))
}

// the O(n²) definition, accumulated in f64
pub fn dft<T: FftNum + ToPrimitive>(
    input: &[Complex<T>],
    output: &mut [Complex<T>],
    direction: FftDirection,
) {
    let len = input.len();
    let sign = match direction {
        FftDirection::Forward => -1.0,
        FftDirection::Inverse => 1.0,
    };

    for (k, spec_bin) in output.iter_mut().enumerate() {
        let mut sum = Complex::<f64>::zero();
        for (i, &x) in input.iter().enumerate() {
            let angle = sign * 2.0 * std::f64::consts::PI * ((i * k) % len) as f64 / len as f64;
            let x = Complex::new(to_f64(x.re), to_f64(x.im));
            sum += x * Complex::from_polar(1.0, angle);
        }
        *spec_bin = Complex::new(from_f64(sum.re), from_f64(sum.im));
    }
}

/// Packs the first half of a Hermitian spectrum into the half-complex layout
pub fn pack_half_complex<T: FftNum>(spectrum: &[Complex<T>]) -> Vec<T> {
    let len = spectrum.len();
    let mut packed = vec![T::zero(); len];
    if len == 0 {
        return packed;
    }

    packed[0] = spectrum[0].re;
    for k in 1..(len + 1) / 2 {
        packed[2 * k - 1] = spectrum[k].re;
        packed[2 * k] = spectrum[k].im;
    }
    if len % 2 == 0 && len > 1 {
        packed[len - 1] = spectrum[len / 2].re;
    }
    packed
}

pub fn check_complex_kernel<T, K>(kernel: &K, len: usize)
where
    T: FftNum + Float + SampleUniform,
    K: ComplexKernel<T>,
{
    assert_eq!(kernel.len(), len, "Kernel reported incorrect length");

    let input = random_signal::<T>(len);
    let mut scratch = vec![Complex::zero(); kernel.scratch_len()];

    for &direction in &[FftDirection::Forward, FftDirection::Inverse] {
        let mut expected = vec![Complex::zero(); len];
        dft(&input, &mut expected, direction);

        let mut actual = input.clone();
        kernel.process(&mut actual, &mut scratch, direction, T::one());

        assert!(
            compare_vectors(&expected, &actual),
            "len = {}, direction = {}",
            len,
            direction
        );
    }
}

pub fn check_real_kernel<T, K>(kernel: &K, len: usize)
where
    T: FftNum + Float + SampleUniform,
    K: RealKernel<T>,
{
    assert_eq!(kernel.len(), len, "Kernel reported incorrect length");

    let input = random_real_signal::<T>(len);
    let complex_input: Vec<Complex<T>> = input
        .iter()
        .map(|&re| Complex::new(re, T::zero()))
        .collect();
    let mut spectrum = vec![Complex::zero(); len];
    dft(&complex_input, &mut spectrum, FftDirection::Forward);
    let expected = pack_half_complex(&spectrum);

    let mut scratch = vec![Complex::zero(); kernel.scratch_len()];

    let mut actual = input.clone();
    kernel.process(&mut actual, &mut scratch, FftDirection::Forward, T::one());
    assert!(
        compare_real_vectors(&expected, &actual),
        "len = {}, direction = Forward",
        len
    );

    // inverting the packed spectrum scales the signal by len
    let scale: T = from_f64(1.0 / len as f64);
    kernel.process(&mut actual, &mut scratch, FftDirection::Inverse, scale);
    assert!(
        compare_real_vectors(&input, &actual),
        "len = {}, direction = Inverse",
        len
    );
}
