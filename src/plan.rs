use std::fmt;
use std::sync::{Mutex, PoisonError};

use num_complex::Complex;

use crate::algorithm::{
    BluesteinPlan, ComplexKernel, MixedRadixPlan, RealBluesteinPlan, RealKernel,
    RealMixedRadixPlan,
};
use crate::array_utils::try_zeroed;
use crate::math_utils::prefer_bluestein;
use crate::{FftDirection, FftNum, Length, PlanError};

// a real decomposition does about half the work of a complex one of the same length
const COMPLEX_DECOMPOSED_WEIGHT: f64 = 1.0;
const REAL_DECOMPOSED_WEIGHT: f64 = 0.5;

/// Selects the algorithm behind a plan.
///
/// `Auto` compares the estimated cost of decomposing the length against the cost of Bluestein's algorithm, and picks
/// the cheaper one. The other two variants force a choice, which is mostly useful for testing and benchmarking.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum PlanStrategy {
    Auto,
    MixedRadix,
    Bluestein,
}

impl Default for PlanStrategy {
    fn default() -> Self {
        PlanStrategy::Auto
    }
}

impl PlanStrategy {
    fn use_bluestein(self, len: usize, decomposed_weight: f64) -> bool {
        match self {
            PlanStrategy::Auto => prefer_bluestein(len, decomposed_weight),
            PlanStrategy::MixedRadix => false,
            PlanStrategy::Bluestein => true,
        }
    }
}

fn check_lengths(
    expected: usize,
    actual: usize,
    required_scratch: usize,
    actual_scratch: usize,
) -> Result<(), PlanError> {
    if actual != expected {
        return Err(PlanError::LengthMismatch { expected, actual });
    }
    if actual_scratch < required_scratch {
        return Err(PlanError::ScratchTooSmall {
            required: required_scratch,
            actual: actual_scratch,
        });
    }
    Ok(())
}

enum ComplexAlgorithm<T> {
    MixedRadix(MixedRadixPlan<T>),
    Bluestein(BluesteinPlan<T>),
}

impl<T: FftNum> ComplexAlgorithm<T> {
    fn kernel(&self) -> &dyn ComplexKernel<T> {
        match self {
            ComplexAlgorithm::MixedRadix(plan) => plan,
            ComplexAlgorithm::Bluestein(plan) => plan,
        }
    }
}

/// A complex-to-complex FFT plan of a fixed length.
///
/// Transforms run in place, in either direction, and never normalize: every output is multiplied by the caller's
/// `scale` instead. Running `forward` with a scale of 1 and then `backward` with a scale of `1 / len` returns the
/// original signal.
///
/// The plan owns a scratch buffer, so `forward` and `backward` never allocate. Calls on a plan shared between threads
/// take turns on that buffer. Threads that want to run in parallel can bring their own scratch through
/// `forward_with_scratch` and `backward_with_scratch`.
///
/// ~~~
/// use pocketplan::num_complex::Complex;
/// use pocketplan::ComplexPlan64;
///
/// let plan = ComplexPlan64::new(1234)?;
///
/// let mut buffer = vec![Complex { re: 0.0, im: 0.0 }; 1234];
/// plan.forward(&mut buffer, 1.0)?;
/// plan.backward(&mut buffer, 1.0 / 1234.0)?;
/// # Ok::<(), pocketplan::PlanError>(())
/// ~~~
pub struct ComplexPlan<T> {
    algorithm: ComplexAlgorithm<T>,
    scratch: Mutex<Box<[Complex<T>]>>,
}

impl<T: FftNum> ComplexPlan<T> {
    /// Builds a plan for transforms of size `len`, choosing the algorithm automatically
    pub fn new(len: usize) -> Result<Self, PlanError> {
        Self::with_strategy(len, PlanStrategy::default())
    }

    /// Builds a plan for transforms of size `len`, running the algorithm `strategy` selects
    pub fn with_strategy(len: usize, strategy: PlanStrategy) -> Result<Self, PlanError> {
        if len == 0 {
            return Err(PlanError::ZeroLength);
        }

        let algorithm = if strategy.use_bluestein(len, COMPLEX_DECOMPOSED_WEIGHT) {
            ComplexAlgorithm::Bluestein(BluesteinPlan::new(len)?)
        } else {
            ComplexAlgorithm::MixedRadix(MixedRadixPlan::new(len)?)
        };

        let scratch = try_zeroed(algorithm.kernel().scratch_len())?;
        Ok(Self {
            algorithm,
            scratch: Mutex::new(scratch),
        })
    }

    fn kernel(&self) -> &dyn ComplexKernel<T> {
        self.algorithm.kernel()
    }

    /// The algorithm this plan runs. Never `PlanStrategy::Auto`.
    pub fn algorithm(&self) -> PlanStrategy {
        match &self.algorithm {
            ComplexAlgorithm::MixedRadix(_) => PlanStrategy::MixedRadix,
            ComplexAlgorithm::Bluestein(_) => PlanStrategy::Bluestein,
        }
    }

    /// The number of scratch elements `forward_with_scratch` and `backward_with_scratch` require
    pub fn scratch_len(&self) -> usize {
        self.kernel().scratch_len()
    }

    /// Computes `buffer[k] = scale * sum(buffer[j] * exp(-2πi jk / len))` in place
    pub fn forward(&self, buffer: &mut [Complex<T>], scale: T) -> Result<(), PlanError> {
        self.process_locked(buffer, FftDirection::Forward, scale)
    }

    /// Computes `buffer[k] = scale * sum(buffer[j] * exp(+2πi jk / len))` in place
    pub fn backward(&self, buffer: &mut [Complex<T>], scale: T) -> Result<(), PlanError> {
        self.process_locked(buffer, FftDirection::Inverse, scale)
    }

    /// Same as `forward`, but uses `scratch` instead of the plan's own scratch buffer
    pub fn forward_with_scratch(
        &self,
        buffer: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
        scale: T,
    ) -> Result<(), PlanError> {
        self.process_with_scratch(buffer, scratch, FftDirection::Forward, scale)
    }

    /// Same as `backward`, but uses `scratch` instead of the plan's own scratch buffer
    pub fn backward_with_scratch(
        &self,
        buffer: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
        scale: T,
    ) -> Result<(), PlanError> {
        self.process_with_scratch(buffer, scratch, FftDirection::Inverse, scale)
    }

    fn process_locked(
        &self,
        buffer: &mut [Complex<T>],
        direction: FftDirection,
        scale: T,
    ) -> Result<(), PlanError> {
        check_lengths(self.len(), buffer.len(), 0, 0)?;

        // scratch carries nothing between calls, so a panic elsewhere can't leave it in a bad state
        let mut scratch = self.scratch.lock().unwrap_or_else(PoisonError::into_inner);
        self.kernel().process(buffer, &mut scratch[..], direction, scale);
        Ok(())
    }

    fn process_with_scratch(
        &self,
        buffer: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
        direction: FftDirection,
        scale: T,
    ) -> Result<(), PlanError> {
        let kernel = self.kernel();
        check_lengths(kernel.len(), buffer.len(), kernel.scratch_len(), scratch.len())?;
        kernel.process(buffer, scratch, direction, scale);
        Ok(())
    }
}

impl<T: FftNum> Length for ComplexPlan<T> {
    fn len(&self) -> usize {
        self.kernel().len()
    }
}

impl<T: FftNum> fmt::Debug for ComplexPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the decomposition only means something for mixed-radix plans
        let radices = match &self.algorithm {
            ComplexAlgorithm::MixedRadix(plan) => plan.radices(),
            ComplexAlgorithm::Bluestein(_) => Vec::new(),
        };
        f.debug_struct("ComplexPlan")
            .field("len", &self.len())
            .field("algorithm", &self.algorithm())
            .field("radices", &radices)
            .field("scratch_len", &self.scratch_len())
            .finish()
    }
}

enum RealAlgorithm<T> {
    MixedRadix(RealMixedRadixPlan<T>),
    Bluestein(RealBluesteinPlan<T>),
}

impl<T: FftNum> RealAlgorithm<T> {
    fn kernel(&self) -> &dyn RealKernel<T> {
        match self {
            RealAlgorithm::MixedRadix(plan) => plan,
            RealAlgorithm::Bluestein(plan) => plan,
        }
    }
}

/// A real FFT plan of a fixed length, working on the half-complex packed spectrum.
///
/// `forward` turns `len` real samples into the packed spectrum
/// `[r0, r1, i1, r2, i2, ...]`, where `rk` and `ik` are the real and imaginary parts of bin `k`.
/// For even lengths the last element is the real-valued bin `len / 2`. `backward` reads the same layout, assumes
/// Hermitian symmetry, and writes the real signal.
///
/// Scaling and scratch behave as in [`ComplexPlan`](crate::ComplexPlan).
pub struct RealPlan<T> {
    algorithm: RealAlgorithm<T>,
    scratch: Mutex<Box<[Complex<T>]>>,
}

impl<T: FftNum> RealPlan<T> {
    /// Builds a plan for `len` real samples, choosing the algorithm automatically
    pub fn new(len: usize) -> Result<Self, PlanError> {
        Self::with_strategy(len, PlanStrategy::default())
    }

    /// Builds a plan for `len` real samples, running the algorithm `strategy` selects
    pub fn with_strategy(len: usize, strategy: PlanStrategy) -> Result<Self, PlanError> {
        if len == 0 {
            return Err(PlanError::ZeroLength);
        }

        let algorithm = if strategy.use_bluestein(len, REAL_DECOMPOSED_WEIGHT) {
            RealAlgorithm::Bluestein(RealBluesteinPlan::new(len)?)
        } else {
            RealAlgorithm::MixedRadix(RealMixedRadixPlan::new(len)?)
        };

        let scratch = try_zeroed(algorithm.kernel().scratch_len())?;
        Ok(Self {
            algorithm,
            scratch: Mutex::new(scratch),
        })
    }

    fn kernel(&self) -> &dyn RealKernel<T> {
        self.algorithm.kernel()
    }

    /// The algorithm this plan runs. Never `PlanStrategy::Auto`.
    pub fn algorithm(&self) -> PlanStrategy {
        match &self.algorithm {
            RealAlgorithm::MixedRadix(_) => PlanStrategy::MixedRadix,
            RealAlgorithm::Bluestein(_) => PlanStrategy::Bluestein,
        }
    }

    /// The number of complex scratch elements `forward_with_scratch` and `backward_with_scratch` require
    pub fn scratch_len(&self) -> usize {
        self.kernel().scratch_len()
    }

    /// Transforms `len` real samples into the packed spectrum, multiplied by `scale`
    pub fn forward(&self, buffer: &mut [T], scale: T) -> Result<(), PlanError> {
        self.process_locked(buffer, FftDirection::Forward, scale)
    }

    /// Transforms a packed spectrum back into `len` real samples, multiplied by `scale`
    pub fn backward(&self, buffer: &mut [T], scale: T) -> Result<(), PlanError> {
        self.process_locked(buffer, FftDirection::Inverse, scale)
    }

    /// Same as `forward`, but uses `scratch` instead of the plan's own scratch buffer
    pub fn forward_with_scratch(
        &self,
        buffer: &mut [T],
        scratch: &mut [Complex<T>],
        scale: T,
    ) -> Result<(), PlanError> {
        self.process_with_scratch(buffer, scratch, FftDirection::Forward, scale)
    }

    /// Same as `backward`, but uses `scratch` instead of the plan's own scratch buffer
    pub fn backward_with_scratch(
        &self,
        buffer: &mut [T],
        scratch: &mut [Complex<T>],
        scale: T,
    ) -> Result<(), PlanError> {
        self.process_with_scratch(buffer, scratch, FftDirection::Inverse, scale)
    }

    fn process_locked(
        &self,
        buffer: &mut [T],
        direction: FftDirection,
        scale: T,
    ) -> Result<(), PlanError> {
        check_lengths(self.len(), buffer.len(), 0, 0)?;

        let mut scratch = self.scratch.lock().unwrap_or_else(PoisonError::into_inner);
        self.kernel().process(buffer, &mut scratch[..], direction, scale);
        Ok(())
    }

    fn process_with_scratch(
        &self,
        buffer: &mut [T],
        scratch: &mut [Complex<T>],
        direction: FftDirection,
        scale: T,
    ) -> Result<(), PlanError> {
        let kernel = self.kernel();
        check_lengths(kernel.len(), buffer.len(), kernel.scratch_len(), scratch.len())?;
        kernel.process(buffer, scratch, direction, scale);
        Ok(())
    }
}

impl<T: FftNum> Length for RealPlan<T> {
    fn len(&self) -> usize {
        self.kernel().len()
    }
}

impl<T: FftNum> fmt::Debug for RealPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealPlan")
            .field("len", &self.len())
            .field("algorithm", &self.algorithm())
            .field("scratch_len", &self.scratch_len())
            .finish()
    }
}

pub type ComplexPlan32 = ComplexPlan<f32>;
pub type ComplexPlan64 = ComplexPlan<f64>;
pub type RealPlan32 = RealPlan<f32>;
pub type RealPlan64 = RealPlan<f64>;

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::test_utils::{compare_vectors, dft, random_signal};

    #[test]
    fn test_auto_strategy() {
        let plan = ComplexPlan64::new(1024).unwrap();
        assert_eq!(plan.algorithm(), PlanStrategy::MixedRadix);

        // lengths below the Bluestein threshold always decompose, even primes
        let plan = ComplexPlan64::new(47).unwrap();
        assert_eq!(plan.algorithm(), PlanStrategy::MixedRadix);

        for &len in &[997, 1994] {
            let plan = ComplexPlan64::new(len).unwrap();
            assert_eq!(plan.algorithm(), PlanStrategy::Bluestein, "len = {}", len);

            let plan = RealPlan64::new(len).unwrap();
            assert_eq!(plan.algorithm(), PlanStrategy::Bluestein, "len = {}", len);
        }
    }

    #[test]
    fn test_forced_strategies_agree() {
        for &len in &[1, 2, 12, 13, 60, 97, 100] {
            let input: Vec<Complex<f64>> = random_signal(len);

            let mixed = ComplexPlan64::with_strategy(len, PlanStrategy::MixedRadix).unwrap();
            let bluestein = ComplexPlan64::with_strategy(len, PlanStrategy::Bluestein).unwrap();
            assert_eq!(mixed.algorithm(), PlanStrategy::MixedRadix);
            assert_eq!(bluestein.algorithm(), PlanStrategy::Bluestein);

            let mut mixed_output = input.clone();
            mixed.forward(&mut mixed_output, 1.0).unwrap();
            let mut bluestein_output = input;
            bluestein.forward(&mut bluestein_output, 1.0).unwrap();

            assert!(compare_vectors(&mixed_output, &bluestein_output), "len = {}", len);
        }
    }

    #[test]
    fn test_scratch_buffer_sizes() {
        let plan = ComplexPlan32::with_strategy(13, PlanStrategy::Bluestein).unwrap();
        assert_eq!(plan.scratch_len(), 50);
        assert_eq!(plan.scratch.lock().unwrap().len(), 50);

        // a single pass runs out of place, then copies back
        let plan = ComplexPlan32::new(7).unwrap();
        assert_eq!(plan.scratch_len(), 7);

        let plan = ComplexPlan32::new(1).unwrap();
        assert_eq!(plan.scratch_len(), 0);
    }

    #[test]
    fn test_with_scratch_matches_locked() {
        let len = 143;
        let plan = ComplexPlan64::new(len).unwrap();
        let input: Vec<Complex<f64>> = random_signal(len);

        let mut expected = vec![Complex::new(0.0, 0.0); len];
        dft(&input, &mut expected, FftDirection::Inverse);

        let mut locked = input.clone();
        plan.backward(&mut locked, 1.0).unwrap();

        let mut scratch = vec![Complex::new(0.0, 0.0); plan.scratch_len() + 5];
        let mut unlocked = input;
        plan.backward_with_scratch(&mut unlocked, &mut scratch, 1.0)
            .unwrap();

        assert!(compare_vectors(&expected, &locked));
        assert_eq!(locked, unlocked);
    }

    #[test]
    fn test_debug() {
        let plan = ComplexPlan64::new(24).unwrap();
        assert_eq!(
            format!("{:?}", plan),
            "ComplexPlan { len: 24, algorithm: MixedRadix, radices: [2, 4, 3], scratch_len: 24 }"
        );

        let plan = RealPlan32::new(16).unwrap();
        let formatted = format!("{:?}", plan);
        assert!(formatted.starts_with("RealPlan"));
        assert!(formatted.contains("MixedRadix"));
    }
}
