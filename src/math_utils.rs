use num_integer::Integer;

use crate::PlanError;

/// The most radix factors a single plan can hold
pub const MAX_FACTORS: usize = 25;

// Lengths below this are always decomposed, no matter how large their prime factors are
const MIN_BLUESTEIN_LEN: usize = 50;

// Relative cost of radix passes that don't have a hardcoded butterfly
const LARGE_FACTOR_PENALTY: f64 = 1.1;

// Bluestein runs two inner FFTs plus the chirp multiplies. This fudge on top of the 2x covers the multiplies
const BLUESTEIN_FUDGE: f64 = 1.5;

#[inline]
fn isqrt_bound(n: usize) -> usize {
    (n as f64 + 0.01).sqrt() as usize
}

/// Decomposes `len` into the radix factors a plan will run, in execution order.
///
/// Factors of 4 come first, then a single factor of 2 (moved to the front of the list), then odd factors in ascending
/// order. Fails if the decomposition needs more than `MAX_FACTORS` entries; no partial list is returned.
pub fn factorize(len: usize) -> Result<Vec<usize>, PlanError> {
    let mut factors = Vec::new();
    let push = |factors: &mut Vec<usize>, factor: usize| {
        if factors.len() >= MAX_FACTORS {
            Err(PlanError::Capacity {
                len,
                max: MAX_FACTORS,
            })
        } else {
            factors.push(factor);
            Ok(())
        }
    };

    let mut rest = len;
    while rest % 4 == 0 && rest > 0 {
        push(&mut factors, 4)?;
        rest >>= 2;
    }
    if rest % 2 == 0 && rest > 0 {
        rest >>= 1;
        push(&mut factors, 2)?;
        let last = factors.len() - 1;
        factors.swap(0, last);
    }

    let mut limit = (rest as f64).sqrt() as usize + 1;
    let mut divisor = 3;
    while rest > 1 && divisor < limit {
        let (mut quotient, mut remainder) = rest.div_rem(&divisor);
        if remainder == 0 {
            while remainder == 0 {
                push(&mut factors, divisor)?;
                rest = quotient;
                let next = rest.div_rem(&divisor);
                quotient = next.0;
                remainder = next.1;
            }
            limit = (rest as f64).sqrt() as usize + 1;
        }
        divisor += 2;
    }
    if rest > 1 {
        push(&mut factors, rest)?;
    }

    Ok(factors)
}

/// Returns the largest prime factor of `n`. Returns 1 for `n <= 1`.
pub fn largest_prime_factor(mut n: usize) -> usize {
    if n > 1 && primal_check::miller_rabin(n as u64) {
        return n;
    }

    let mut result = 1;
    while n > 1 && n % 2 == 0 {
        result = 2;
        n >>= 1;
    }

    let mut limit = isqrt_bound(n);
    let mut divisor = 3;
    while divisor <= limit {
        while n % divisor == 0 {
            result = divisor;
            n /= divisor;
            limit = isqrt_bound(n);
        }
        divisor += 2;
    }
    if n > 1 {
        result = n;
    }
    result
}

/// A rough operation count for a mixed-radix FFT of size `n`
pub fn cost_guess(mut n: usize) -> f64 {
    let original = n as f64;
    let mut result = 0.0;

    while n > 1 && n % 2 == 0 {
        result += 2.0;
        n >>= 1;
    }

    let mut limit = isqrt_bound(n);
    let mut divisor = 3;
    while divisor <= limit {
        while n % divisor == 0 {
            result += if divisor <= 5 {
                divisor as f64
            } else {
                LARGE_FACTOR_PENALTY * divisor as f64
            };
            n /= divisor;
            limit = isqrt_bound(n);
        }
        divisor += 2;
    }
    if n > 1 {
        result += if n <= 5 {
            n as f64
        } else {
            LARGE_FACTOR_PENALTY * n as f64
        };
    }

    result * original
}

/// Returns the smallest product of 2, 3, 5, 7 and 11 that is `>= n`, or None if that product doesn't fit in a usize
pub fn good_size(n: usize) -> Option<usize> {
    if n <= 6 {
        return Some(n);
    }

    let target = n as u128;
    let mut best = 2 * target;

    let mut f2 = 1u128;
    while f2 < best {
        let mut f23 = f2;
        while f23 < best {
            let mut f235 = f23;
            while f235 < best {
                let mut f2357 = f235;
                while f2357 < best {
                    let mut f235711 = f2357;
                    while f235711 < best {
                        if f235711 >= target {
                            best = f235711;
                        }
                        f235711 *= 11;
                    }
                    f2357 *= 7;
                }
                f235 *= 5;
            }
            f23 *= 3;
        }
        f2 *= 2;
    }

    usize::try_from(best).ok()
}

/// The padded inner length Bluestein's algorithm uses for a transform of size `len`
pub fn bluestein_inner_len(len: usize) -> Option<usize> {
    len.checked_mul(2)
        .and_then(|doubled| doubled.checked_sub(1))
        .and_then(good_size)
}

/// Decides between a decomposition of `len` and Bluestein's algorithm.
///
/// `decomposed_weight` scales the cost of the decomposed transform: 1.0 for complex plans, 0.5 for real plans, since
/// a real decomposition only does half the work of the complex one.
pub fn prefer_bluestein(len: usize, decomposed_weight: f64) -> bool {
    if len < MIN_BLUESTEIN_LEN {
        return false;
    }
    let largest = largest_prime_factor(len);
    if largest.checked_mul(largest).map_or(false, |square| square <= len) {
        return false;
    }

    let inner_len = match bluestein_inner_len(len) {
        Some(inner_len) => inner_len,
        None => return false,
    };
    let decomposed_cost = decomposed_weight * cost_guess(len);
    let bluestein_cost = BLUESTEIN_FUDGE * 2.0 * cost_guess(inner_len);

    bluestein_cost < decomposed_cost
}
