use num_traits::Zero;

use crate::PlanError;

/// Allocates a zero-filled boxed slice of `len` elements, reporting allocation failure instead of aborting
pub fn try_zeroed<T: Zero + Clone>(len: usize) -> Result<Box<[T]>, PlanError> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(len)
        .map_err(|_| PlanError::Allocation { elements: len })?;
    storage.resize(len, T::zero());
    Ok(storage.into_boxed_slice())
}

/// Sums storage sizes, treating overflow as an allocation failure
pub fn checked_len(parts: &[usize]) -> Result<usize, PlanError> {
    parts
        .iter()
        .try_fold(0usize, |total, &part| total.checked_add(part))
        .ok_or(PlanError::Allocation {
            elements: usize::MAX,
        })
}
