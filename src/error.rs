use std::io;

use thiserror::Error;

/// Errors reported while building or running a transform plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Plans must cover at least one sample.
    #[error("transform length must be at least 1")]
    ZeroLength,
    /// Plan storage could not be obtained, or its size overflowed `usize`.
    #[error("could not allocate plan storage of {elements} elements")]
    Allocation { elements: usize },
    /// The factorization of `len` needs more radix factors than a plan can hold.
    #[error("length {len} decomposes into more than {max} radix factors")]
    Capacity { len: usize, max: usize },
    /// The transform buffer does not match the plan length.
    #[error("buffer has {actual} elements, but the plan was built for {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    /// The caller-supplied scratch is shorter than `scratch_len()`.
    #[error("scratch has {actual} elements, but at least {required} are required")]
    ScratchTooSmall { required: usize, actual: usize },
}

/// Errors reported by the BMP writer.
#[derive(Debug, Error)]
pub enum BmpError {
    #[error("could not write bitmap: {0}")]
    Io(#[from] io::Error),
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    PixelBufferSize { expected: usize, actual: usize },
    #[error("a {width}x{height} bitmap does not fit the BMP header fields")]
    Dimensions { width: u32, height: u32 },
}
