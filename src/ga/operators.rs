//! Sequence crossover and mutation operators.
//!
//! These operate on plain slices and are agnostic to what the genes are.
//! Unlike permutation operators they do not preserve a gene multiset across
//! the two children: two-point crossover may duplicate or drop genes, and
//! callers are expected to price that in their fitness.
//!
//! # Crossover Operators
//!
//! - [`two_point_crossover`]: exchange the segment between two cut points
//!
//! # Mutation Operators
//!
//! - [`shuffle_indexes`]: per-position swap with another random position
//!
//! # References
//!
//! - De Jong (1975), *An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems* (multi-point crossover)

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Two-point crossover over the common prefix of two sequences.
///
/// Draws cut points `1 <= c1 < c2 <= min(len)` and swaps `a[c1..c2]` with
/// `b[c1..c2]`. Sequences whose common length is below 2 are left as they
/// are.
///
/// Returns `true` if the sequences were modified.
///
/// # Complexity
/// O(c2 - c1)
pub fn two_point_crossover<T, R: Rng>(a: &mut [T], b: &mut [T], rng: &mut R) -> bool {
    let size = a.len().min(b.len());
    if size < 2 {
        return false;
    }

    let (start, end) = cut_points(size, rng);
    a[start..end].swap_with_slice(&mut b[start..end]);
    true
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Shuffle-indexes mutation.
///
/// Each position `i` is, with probability `indpb`, swapped with a position
/// drawn uniformly from the other `n - 1` positions. Only the order of the
/// genes changes.
///
/// Returns `true` if at least one swap happened.
///
/// # Complexity
/// O(n)
pub fn shuffle_indexes<T, R: Rng>(seq: &mut [T], indpb: f64, rng: &mut R) -> bool {
    let n = seq.len();
    if n < 2 {
        return false;
    }
    let indpb = indpb.clamp(0.0, 1.0);

    let mut swapped = false;
    for i in 0..n {
        if rng.random_bool(indpb) {
            let mut j = rng.random_range(0..n - 1);
            if j >= i {
                j += 1;
            }
            seq.swap(i, j);
            swapped = true;
        }
    }
    swapped
}

// ============================================================================
// Helpers
// ============================================================================

/// Picks `1 <= start < end <= size`. Requires `size >= 2`.
fn cut_points<R: Rng>(size: usize, rng: &mut R) -> (usize, usize) {
    let first = rng.random_range(1..=size);
    let mut second = rng.random_range(1..size);
    if second >= first {
        second += 1;
        (first, second)
    } else {
        (second, first)
    }
}

// ============================================================================
// Tests
// ============================================================================
