//! Integer factorization and the arithmetic functions built on it.
//!
//! Factorization is tiered: the sign is extracted, small primes are removed
//! by trial division, perfect powers are peeled off, and whatever remains is
//! split with Brent's variant of Pollard rho.

use std::collections::{BTreeMap, BTreeSet};

use num_traits::{One, Zero};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::primality::DEFAULT_ROUNDS;
use crate::primes::{trial_divide, TRIAL_DIVISION_LIMIT};
use crate::Integer;

const RHO_SEED: u64 = 0x706f_6c6c_6172_6421;
const RHO_ATTEMPTS: usize = 24;
const RHO_MAX_CYCLE: u64 = 1 << 24;

/// Multiplicity of a factor, as returned by [`Integer::exponent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// Divides exactly this many times.
    Finite(u64),
    /// Divides arbitrarily often (the value is zero).
    Infinite,
}

impl Integer {
    /// Prime factors of `self` as an ascending multiset.
    ///
    /// Negative numbers contribute a leading `-1`. Zero and one are terminal:
    /// they factor as `[0]` and `[1]`.
    #[must_use]
    pub fn factorize(&self) -> Vec<Integer> {
        self.factorize_with(DEFAULT_ROUNDS)
    }

    /// Like [`Integer::factorize`], deciding primality of cofactors with
    /// `rounds` random Miller-Rabin rounds.
    #[must_use]
    pub fn factorize_with(&self, rounds: u32) -> Vec<Integer> {
        let mut result = Vec::new();
        if self.is_negative() {
            result.push(-Integer::one());
        } else if self.is_zero() {
            return vec![Integer::zero()];
        } else if self.is_one() {
            return vec![Integer::one()];
        }
        for (prime, count) in prime_multiplicities(&self.abs(), rounds) {
            result.extend(std::iter::repeat(prime).take(count as usize));
        }
        result
    }

    /// Groups [`Integer::factorize`] into ascending `(prime, multiplicity)` pairs.
    #[must_use]
    pub fn factor_integer(&self) -> Vec<(Integer, u32)> {
        self.factor_integer_with(DEFAULT_ROUNDS)
    }

    /// Like [`Integer::factor_integer`] with an explicit number of random
    /// primality rounds.
    #[must_use]
    pub fn factor_integer_with(&self, rounds: u32) -> Vec<(Integer, u32)> {
        let mut pairs: Vec<(Integer, u32)> = Vec::new();
        for factor in self.factorize_with(rounds) {
            match pairs.last_mut() {
                Some((last, count)) if *last == factor => *count += 1,
                _ => pairs.push((factor, 1)),
            }
        }
        pairs
    }

    /// All positive divisors of `|self|` in ascending order.
    ///
    /// Every proper sub-multiset of the prime factors is multiplied out and
    /// collected in an ordered set; then 1 and `|self|` are added. Zero has
    /// no finite divisor list and yields an empty vector.
    #[must_use]
    pub fn divisors(&self) -> Vec<Integer> {
        let n = self.abs();
        if n.is_zero() {
            return Vec::new();
        }
        if n.is_one() {
            return vec![n];
        }
        let factors = n.factorize();
        let mut set = BTreeSet::new();
        for k in 1..factors.len() {
            for_each_k_subset(&factors, k, |subset| {
                let product = subset
                    .iter()
                    .fold(Integer::one(), |acc, f| &acc * *f);
                set.insert(product);
            });
        }
        let mut result = Vec::with_capacity(set.len() + 2);
        result.push(Integer::one());
        result.extend(set);
        result.push(n);
        result
    }

    /// The Moebius function of `|self|`; zero maps to zero.
    #[must_use]
    pub fn moebius_mu(&self) -> i8 {
        let n = self.abs();
        if n.is_zero() {
            return 0;
        }
        if n.is_one() {
            return 1;
        }
        let pairs = n.factor_integer();
        if pairs.iter().any(|(_, count)| *count > 1) {
            0
        } else if pairs.len() % 2 == 1 {
            -1
        } else {
            1
        }
    }

    /// The largest `k` with `base^k` dividing `self`.
    ///
    /// Zero is divisible by every power; `±1` by none except the zeroth.
    #[must_use]
    pub fn exponent(&self, base: &Integer) -> Multiplicity {
        let n = self.abs();
        if n.is_zero() {
            return Multiplicity::Infinite;
        }
        if n.is_one() {
            return Multiplicity::Finite(0);
        }
        let base = base.abs();
        if base.is_zero() {
            return Multiplicity::Finite(0);
        }
        if base.is_one() {
            return Multiplicity::Infinite;
        }
        if n == base {
            return Multiplicity::Finite(1);
        }
        let mut rest = n;
        let mut count = 0;
        while rest.is_divisible_by(&base) {
            rest = &rest / &base;
            count += 1;
        }
        Multiplicity::Finite(count)
    }
}

/// Prime multiplicities of a positive integer.
fn prime_multiplicities(n: &Integer, rounds: u32) -> BTreeMap<Integer, u32> {
    let (small, rest) = trial_divide(n, TRIAL_DIVISION_LIMIT);
    let mut found: BTreeMap<Integer, u32> = small
        .into_iter()
        .map(|(p, count)| (Integer::from(p), count))
        .collect();
    if !rest.is_one() {
        let mut splitter = Splitter {
            rounds,
            rng: ChaCha8Rng::seed_from_u64(RHO_SEED),
            found,
        };
        splitter.split(&rest, 1);
        found = splitter.found;
    }
    found
}

/// Recursive cofactor splitting state.
struct Splitter {
    rounds: u32,
    rng: ChaCha8Rng,
    found: BTreeMap<Integer, u32>,
}

impl Splitter {
    fn split(&mut self, n: &Integer, multiplicity: u32) {
        if n.is_one() {
            return;
        }
        if n.is_probable_prime_with(self.rounds) {
            *self.found.entry(n.clone()).or_insert(0) += multiplicity;
            return;
        }
        if let Some((root, k)) = perfect_power(n) {
            self.split(&root, multiplicity * k);
            return;
        }
        for attempt in 0..RHO_ATTEMPTS {
            let c = Integer::from(self.rng.gen_range(1..u64::MAX));
            if let Some(d) = brent_rho(n, &c, &mut self.rng) {
                tracing::trace!(%n, factor = %d, attempt, "pollard rho split");
                self.split(&d, multiplicity);
                self.split(&(n / &d), multiplicity);
                return;
            }
        }
        tracing::warn!(%n, "pollard rho gave up; keeping composite cofactor");
        *self.found.entry(n.clone()).or_insert(0) += multiplicity;
    }
}

/// Returns `(r, k)` with `r^k == n` and `k` maximal among primes tried, if any.
fn perfect_power(n: &Integer) -> Option<(Integer, u32)> {
    let max_k = u32::try_from(n.bit_len()).unwrap_or(u32::MAX);
    for k in 2..=max_k {
        let Ok(root) = n.nth_root(k) else {
            return None;
        };
        if root.is_one() {
            break;
        }
        if root.pow(k) == *n {
            return Some((root, k));
        }
    }
    None
}

fn brent_rho(n: &Integer, c: &Integer, rng: &mut ChaCha8Rng) -> Option<Integer> {
    let step = |v: &Integer| (&(v * v) + c) % n.clone();
    let one = Integer::one();
    let m: u64 = 128;

    let mut y = Integer::from(rng.gen::<u64>()) % n.clone();
    let mut g = one.clone();
    let mut q = one.clone();
    let mut r: u64 = 1;
    let mut x = y.clone();
    let mut ys = y.clone();

    while g.is_one() {
        x = y.clone();
        for _ in 0..r {
            y = step(&y);
        }
        let mut k = 0;
        while k < r && g.is_one() {
            ys = y.clone();
            for _ in 0..m.min(r - k) {
                y = step(&y);
                q = (&q * &(&x - &y).abs()) % n.clone();
            }
            g = q.gcd(n);
            k += m;
        }
        r *= 2;
        if r > RHO_MAX_CYCLE {
            return None;
        }
    }

    if g == *n {
        loop {
            ys = step(&ys);
            g = (&x - &ys).abs().gcd(n);
            if !g.is_one() {
                break;
            }
        }
    }
    if g == *n || g.is_zero() {
        None
    } else {
        Some(g)
    }
}

/// Calls `f` for every k-element sub-multiset position choice of `items`.
fn for_each_k_subset<'a, F>(items: &'a [Integer], k: usize, mut f: F)
where
    F: FnMut(&[&'a Integer]),
{
    fn recurse<'a, F>(
        items: &'a [Integer],
        start: usize,
        k: usize,
        chosen: &mut Vec<&'a Integer>,
        f: &mut F,
    ) where
        F: FnMut(&[&'a Integer]),
    {
        if chosen.len() == k {
            f(chosen);
            return;
        }
        let needed = k - chosen.len();
        for i in start..=items.len() - needed {
            // Skip duplicate picks at the same depth; the multiset is sorted.
            if i > start && items[i] == items[i - 1] {
                continue;
            }
            chosen.push(&items[i]);
            recurse(items, i + 1, k, chosen, f);
            chosen.pop();
        }
    }
    let mut chosen = Vec::with_capacity(k);
    recurse(items, 0, k, &mut chosen, &mut f);
}
