//! Combinatorics kernel: binomial coefficients, exhaustive enumeration, and
//! sampling without replacement.
//!
//! Enumeration order is deterministic for a fixed input (lexicographic over
//! element positions), and every generator runs on explicit cursors rather
//! than recursion so a large `n choose k` cannot exhaust the call stack.
//!
//! Failure policy: invalid sizes return empty results or 0 — never a panic,
//! never partial output.

use rand::rngs::SmallRng;
use rand::Rng;

/// Exact C(n, k) in u128 arithmetic, `None` on overflow.
///
/// The running product stays integral at every step: after multiplying by
/// `n - i` and dividing by `i + 1` the accumulator equals C(n, i + 1).
fn binomial_u128(n: u64, k: u64) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc.checked_mul((n - i) as u128)?;
        acc /= (i + 1) as u128;
    }
    Some(acc)
}

/// Binomial coefficient C(n, k) as f64.
///
/// Exact integer arithmetic whenever the value fits in u128 — which covers
/// every pool size a lottery uses — with a rounded multiplicative floating
/// product beyond that. Returns 0 for `k > n`, 1 for `k ∈ {0, n}`.
pub fn binomial(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 || k == n {
        return 1.0;
    }
    if let Some(v) = binomial_u128(n, k) {
        return v as f64;
    }
    let k = k.min(n - k);
    let mut acc = 1.0f64;
    for i in 0..k {
        acc = acc * (n - i) as f64 / (i + 1) as f64;
    }
    acc.round()
}

/// n! as f64. `factorial(0) == 1`.
pub fn factorial(n: u64) -> f64 {
    (1..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// All k-subsets of `elements` in lexicographic position order.
///
/// `[[]]` when `k == 0`, `[]` when `k > elements.len()`.
pub fn combinations<T: Clone>(elements: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    let n = elements.len();
    if k > n {
        return Vec::new();
    }
    let mut idx: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    loop {
        out.push(idx.iter().map(|&i| elements[i].clone()).collect());
        // Advance the rightmost cursor that still has room.
        let mut i = k as isize - 1;
        while i >= 0 && idx[i as usize] == i as usize + n - k {
            i -= 1;
        }
        if i < 0 {
            break;
        }
        let i = i as usize;
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
    out
}

/// All orderings of `elements`, lexicographic over positions.
pub fn permutations<T: Clone>(elements: &[T]) -> Vec<Vec<T>> {
    let n = elements.len();
    let mut idx: Vec<usize> = (0..n).collect();
    let mut out = vec![idx.iter().map(|&i| elements[i].clone()).collect()];
    if n < 2 {
        return out;
    }
    loop {
        // Standard next-lexicographic-permutation step over the index array.
        let mut i = n - 1;
        while i > 0 && idx[i - 1] >= idx[i] {
            i -= 1;
        }
        if i == 0 {
            break;
        }
        let mut j = n - 1;
        while idx[j] <= idx[i - 1] {
            j -= 1;
        }
        idx.swap(i - 1, j);
        idx[i..].reverse();
        out.push(idx.iter().map(|&i| elements[i].clone()).collect());
    }
    out
}

/// All ordered k-arrangements: each k-subset expanded to its orderings.
pub fn permutations_of_size<T: Clone>(elements: &[T], k: usize) -> Vec<Vec<T>> {
    if k > elements.len() {
        return Vec::new();
    }
    combinations(elements, k)
        .into_iter()
        .flat_map(|c| permutations(&c))
        .collect()
}

/// Cartesian product of the given lists, odometer order.
///
/// `[[]]` for an empty list of lists, `[]` when any list is empty.
pub fn cartesian_product<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    if lists.is_empty() {
        return vec![Vec::new()];
    }
    if lists.iter().any(|l| l.is_empty()) {
        return Vec::new();
    }
    let mut cursor = vec![0usize; lists.len()];
    let mut out = Vec::new();
    loop {
        out.push(
            cursor
                .iter()
                .zip(lists)
                .map(|(&c, l)| l[c].clone())
                .collect(),
        );
        let mut i = lists.len();
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            cursor[i] += 1;
            if cursor[i] < lists[i].len() {
                break;
            }
            cursor[i] = 0;
        }
    }
}

/// All k-multisets of `elements` (non-decreasing position order).
pub fn combinations_with_replacement<T: Clone>(elements: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    let n = elements.len();
    if n == 0 {
        return Vec::new();
    }
    let mut idx = vec![0usize; k];
    let mut out = Vec::new();
    loop {
        out.push(idx.iter().map(|&i| elements[i].clone()).collect());
        let mut i = k as isize - 1;
        while i >= 0 && idx[i as usize] == n - 1 {
            i -= 1;
        }
        if i < 0 {
            break;
        }
        let i = i as usize;
        let v = idx[i] + 1;
        for j in i..k {
            idx[j] = v;
        }
    }
    out
}

/// In-place Fisher-Yates shuffle with an injected RNG.
pub fn shuffle<T>(items: &mut [T], rng: &mut SmallRng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// k elements drawn without replacement, `[]` when `k > elements.len()`.
pub fn random_sample<T: Clone>(elements: &[T], k: usize, rng: &mut SmallRng) -> Vec<T> {
    let n = elements.len();
    if k > n {
        return Vec::new();
    }
    // Partial Fisher-Yates: only the first k positions need settling.
    let mut idx: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.random_range(i..n);
        idx.swap(i, j);
    }
    idx[..k].iter().map(|&i| elements[i].clone()).collect()
}

/// `count` distinct integers from `[min, max]`, sorted ascending.
/// `[]` when the range cannot supply that many.
pub fn unique_random_numbers(min: u32, max: u32, count: usize, rng: &mut SmallRng) -> Vec<u32> {
    if max < min {
        return Vec::new();
    }
    let span = (max - min + 1) as usize;
    if count > span {
        return Vec::new();
    }
    let mut pool: Vec<u32> = (min..=max).collect();
    for i in 0..count {
        let j = rng.random_range(i..span);
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool.sort_unstable();
    pool
}
