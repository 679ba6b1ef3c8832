//! Seeded permutation of `0..=255` used as the lattice hash for noise kernels.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of entries in the permutation table.
pub const TABLE_SIZE: usize = 256;

/// A bijective lookup table over `0..=255`, shuffled from a seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; TABLE_SIZE],
}

impl PermutationTable {
    /// Create a table shuffled from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut table = Self {
            perm: identity(),
        };
        table.reseed(seed);
        table
    }

    /// Reset to the identity permutation and shuffle it with a generator keyed by `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.perm = identity();
        let mut rng = StdRng::seed_from_u64(seed);
        for i in (1..TABLE_SIZE).rev() {
            let j = bounded(&mut rng, i as u32 + 1) as usize;
            self.perm.swap(i, j);
        }
    }

    /// Table entry for `i`, wrapped into range.
    #[inline]
    pub fn get(&self, i: u32) -> u32 {
        self.perm[(i & 255) as usize] as u32
    }

    /// Hash of an integer lattice point, nesting lookups per axis.
    #[inline]
    pub fn hash(&self, x: u32, y: u32, z: u32) -> u32 {
        let a = self.get(x).wrapping_add(y);
        let b = self.get(a).wrapping_add(z);
        self.get(b)
    }

    /// Raw table contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }
}

fn identity() -> [u8; TABLE_SIZE] {
    let mut perm = [0u8; TABLE_SIZE];
    for (i, p) in perm.iter_mut().enumerate() {
        *p = i as u8;
    }
    perm
}

/// Map a 32-bit draw onto `0..bound` by widening multiplication.
#[inline]
fn bounded<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    ((rng.next_u32() as u64 * bound as u64) >> 32) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_a_permutation() {
        let table = PermutationTable::new(1234);
        let mut seen = [false; TABLE_SIZE];
        for &v in table.as_slice() {
            assert!(!seen[v as usize], "value {v} appears twice");
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn same_seed_same_table() {
        assert_eq!(PermutationTable::new(99), PermutationTable::new(99));
        assert_ne!(PermutationTable::new(1), PermutationTable::new(2));
    }

    #[test]
    fn reseed_restarts_from_identity() {
        let mut table = PermutationTable::new(5);
        table.reseed(77);
        assert_eq!(table, PermutationTable::new(77));
    }

    #[test]
    fn bounded_draws_stay_below_bound() {
        let mut rng = StdRng::seed_from_u64(42);
        for bound in [1u32, 2, 7, 256] {
            for _ in 0..200 {
                assert!(bounded(&mut rng, bound) < bound);
            }
        }
    }

    #[test]
    fn get_wraps_index() {
        let table = PermutationTable::new(3);
        assert_eq!(table.get(256 + 17), table.get(17));
    }
}
