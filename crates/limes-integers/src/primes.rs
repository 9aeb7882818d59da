//! Small-prime table and trial division.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use num_traits::One;

use crate::Integer;

/// Upper bound (inclusive) of the trial-division table used by factorization.
pub const TRIAL_DIVISION_LIMIT: u32 = 32_749;

/// Upper bound (inclusive) of the primes considered by `nth_root_split`.
pub const ROOT_SPLIT_LIMIT: u32 = 1_021;

static SMALL_PRIMES: OnceLock<Vec<u32>> = OnceLock::new();

/// All primes up to [`TRIAL_DIVISION_LIMIT`], ascending.
pub fn small_primes() -> &'static [u32] {
    SMALL_PRIMES.get_or_init(|| sieve(TRIAL_DIVISION_LIMIT))
}

fn sieve(limit: u32) -> Vec<u32> {
    let n = limit as usize;
    let mut composite = vec![false; n + 1];
    let mut primes = Vec::new();
    for i in 2..=n {
        if composite[i] {
            continue;
        }
        primes.push(i as u32);
        let mut j = i * i;
        while j <= n {
            composite[j] = true;
            j += i;
        }
    }
    primes
}

/// Divides out every table prime up to `bound` from `|n|`.
///
/// Returns the prime multiplicities found and the cofactor. Division stops
/// early once `p^2` exceeds the cofactor, which is then 1 or prime.
pub fn trial_divide(n: &Integer, bound: u32) -> (BTreeMap<u32, u32>, Integer) {
    let mut rest = n.abs();
    let mut found = BTreeMap::new();
    for &p in small_primes().iter().take_while(|&&p| p <= bound) {
        let prime = Integer::from(p);
        if &prime * &prime > rest {
            break;
        }
        let mut count = 0;
        while rest.is_divisible_by(&prime) {
            rest = &rest / &prime;
            count += 1;
        }
        if count > 0 {
            found.insert(p, count);
        }
        if rest.is_one() {
            break;
        }
    }
    (found, rest)
}
