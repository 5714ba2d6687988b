/// Feature indexing — the hashing trick.
///
/// Maps a raw sparse feature-index list into the bounded slot space [0, n]:
/// the bias slot n first, then each raw index mod n in input order, then
/// (with interactions on) one slot per unordered pair of raw indices,
/// hashed from the pair's 32-bit wrapping product. Pure and deterministic:
/// the same input and configuration always yield the same sequence.

use crate::hash::hash_i32;

/// Seed for interaction hashing. Fixed: changing it changes every model.
pub const INTERACTION_SEED: u32 = 0;

/// Slot sequence for one example.
///
/// Length is k+1 without interactions and k+1+k(k-1)/2 with them, for k
/// raw features. Collisions between raw and interaction slots are an
/// accepted consequence of hashing, not an error.
pub fn compute_indices(x: &[u32], n: usize, interaction: bool) -> Vec<usize> {
    let k = x.len();
    let pairs = if interaction { k * k.saturating_sub(1) / 2 } else { 0 };
    let mut indices = Vec::with_capacity(1 + k + pairs);

    // The bias slot is present in every example, exactly once, first.
    indices.push(n);
    for &f in x {
        indices.push(f as usize % n);
    }

    if interaction {
        for i in 0..k {
            for j in (i + 1)..k {
                // 32-bit wrapping product: overflow on large identifiers is
                // intentional hashing noise, kept for bit-reproducibility.
                let key = x[i].wrapping_mul(x[j]) as i32;
                let h = hash_i32(key, INTERACTION_SEED) as i32;
                indices.push(h.unsigned_abs() as usize % n);
            }
        }
    }

    indices
}
