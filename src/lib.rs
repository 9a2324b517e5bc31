#![allow(clippy::len_without_is_empty)]

//! Pocketplan is a pure-Rust FFT library built around reusable, length-keyed transform plans.
//!
//! A plan is built once for a given length, then run any number of times, in either direction, on buffers of
//! that length. Plans come in two flavors:
//!
//! - [`ComplexPlan`] transforms complex buffers in place.
//! - [`RealPlan`] transforms real buffers in place, using the packed half-complex layout for the spectrum.
//!
//! Both are generic over the float type, with aliases for the two precisions:
//! [`ComplexPlan32`], [`ComplexPlan64`], [`RealPlan32`] and [`RealPlan64`].
//!
//! ### Usage
//!
//! ~~~
//! use pocketplan::num_complex::Complex;
//! use pocketplan::{ComplexPlan, Length};
//!
//! let plan = ComplexPlan::<f32>::new(1000)?;
//! assert_eq!(plan.len(), 1000);
//!
//! let mut buffer = vec![Complex { re: 1.0f32, im: 0.0f32 }; 1000];
//! plan.forward(&mut buffer, 1.0)?;
//! assert!((buffer[0].re - 1000.0).abs() < 1e-3);
//!
//! // transforms are never normalized, so pass the 1/len factor as the scale
//! plan.backward(&mut buffer, 1.0 / 1000.0)?;
//! assert!((buffer[0].re - 1.0).abs() < 1e-3);
//! # Ok::<(), pocketplan::PlanError>(())
//! ~~~
//!
//! ### Normalization
//!
//! Neither direction normalizes its output. Every transform takes a `scale` argument that multiplies every output
//! element, and a scale of exactly 1 skips the multiply entirely. A forward transform followed by a backward transform
//! with a scale of `1 / len` recovers the input.
//!
//! ### Algorithms
//!
//! Plans decompose their length into factors of 4, 2, 3, 5 and larger odd primes, and run one pass per factor. When
//! a length has a large prime factor, the planner may instead use Bluestein's algorithm, which turns the transform
//! into a convolution of a nicely-factorable length. [`PlanStrategy`] overrides the planner's choice.
//!
//! ### Sharing plans
//!
//! Plans are `Send` and `Sync`. `forward` and `backward` borrow a scratch buffer owned by the plan, so concurrent
//! calls on one shared plan take turns. `forward_with_scratch` and `backward_with_scratch` take caller-provided
//! scratch and run fully in parallel.
//!
//! The crate also contains a tiny [`bmp`] writer for 32-bit bitmaps.

pub use num_complex;
pub use num_traits;

pub mod bmp;

mod algorithm;
mod array_utils;
mod common;
mod error;
mod math_utils;
mod plan;
mod twiddles;

pub use crate::common::FftNum;
pub use crate::error::{BmpError, PlanError};
pub use crate::math_utils::MAX_FACTORS;
pub use crate::plan::{
    ComplexPlan, ComplexPlan32, ComplexPlan64, PlanStrategy, RealPlan, RealPlan32, RealPlan64,
};

/// A trait that allows FFT algorithms to report their expected input/output size
pub trait Length {
    /// The FFT size that this algorithm can process
    fn len(&self) -> usize;
}

/// Represents a FFT direction, IE a forward FFT or an inverse FFT
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum FftDirection {
    Forward,
    Inverse,
}

impl std::fmt::Display for FftDirection {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> Result<(), ::std::fmt::Error> {
        match self {
            Self::Forward => f.write_str("Forward"),
            Self::Inverse => f.write_str("Inverse"),
        }
    }
}

#[cfg(test)]
mod test_utils;
