//! Cardinality estimator allows to estimate number of distinct elements
//! in the stream and is defined with const `P` parameter:
//! - `P`: precision parameter in [4..18] range, which defines
//!   number of bits to use for HyperLogLog register indices.
//!
//! The estimator keeps `M = 2^P` registers of one byte each, so its memory
//! footprint is fixed at construction time and never grows with the stream.
//!
//! # Accuracy
//!
//! Expected relative error is `1.04 / sqrt(M)`:
//! - P = 10: 1.04 / sqrt(2^10) = 3.25%
//! - P = 12: 1.04 / sqrt(2^12) = 1.62%
//! - P = 14: 1.04 / sqrt(2^14) = 0.81%
//! - P = 18: 1.04 / sqrt(2^18) = 0.20%
//!
//! # Low latency
//! - Number of zero registers and registers' harmonic sum are
//!   stored and updated dynamically as more data being inserted,
//!   allowing to have constant time `estimate` operations.
//!
//! Original HyperLogLog paper:
//! https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf

use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::mem::{size_of, size_of_val};

use wyhash::WyHash;

/// Size of the 64-bit hash space, used by the large range correction.
const HASH_SPACE: f64 = 18_446_744_073_709_551_616.0;

/// HyperLogLog cardinality estimator with `2^P` registers.
pub struct CardinalityEstimator<const P: usize = 14, H: Hasher + Default = WyHash> {
    /// Maximum observed rank per register
    registers: Box<[u8]>,
    /// Number of registers still set to zero
    zeros: usize,
    /// Harmonic sum `Σ 2^-register` over all registers
    sum: f64,
    /// Zero-sized build hasher
    build_hasher: BuildHasherDefault<H>,
}

impl<const P: usize, H: Hasher + Default> CardinalityEstimator<P, H> {
    /// Ensure that `P` is in correct range at compile time
    const VALID_PARAMS: () = assert!(P >= 4 && P <= 18);
    /// Number of HyperLogLog registers
    pub const M: usize = 1 << P;
    /// Largest rank a register can hold: all `64 - P` suffix bits are zero.
    const MAX_RANK: u8 = (64 - P + 1) as u8;

    /// Creates new instance of `CardinalityEstimator` with all registers set to zero
    #[inline]
    pub fn new() -> Self {
        // compile time check of params
        _ = Self::VALID_PARAMS;

        Self {
            registers: vec![0u8; Self::M].into_boxed_slice(),
            zeros: Self::M,
            sum: Self::M as f64,
            build_hasher: BuildHasherDefault::default(),
        }
    }

    /// Insert a hashable item into `CardinalityEstimator`
    #[inline]
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) {
        let mut hasher = self.build_hasher.build_hasher();
        item.hash(&mut hasher);
        let hash = hasher.finish();
        self.insert_hash(hash);
    }

    /// Insert hash into `CardinalityEstimator`
    #[inline]
    pub fn insert_hash(&mut self, hash: u64) {
        let (idx, rank) = Self::decode_hash(hash);
        self.update_rank(idx, rank);
    }

    /// Split a 64-bit hash into register index (top `P` bits) and rank of the remaining bits
    #[inline]
    fn decode_hash(hash: u64) -> (usize, u8) {
        let idx = (hash >> (64 - P)) as usize;
        let suffix = hash << P;
        let rank = (suffix.leading_zeros() as u8 + 1).min(Self::MAX_RANK);
        (idx, rank)
    }

    /// Raise register `idx` to `new_rank` if it is larger than the stored one
    #[inline]
    fn update_rank(&mut self, idx: usize, new_rank: u8) {
        let old_rank = self.registers[idx];
        if new_rank <= old_rank {
            return;
        }
        self.registers[idx] = new_rank;

        // Update number of zero registers and harmonic sum
        self.zeros -= usize::from(old_rank == 0);
        self.sum -= inv_pow2(old_rank);
        self.sum += inv_pow2(new_rank);
    }

    /// Return cardinality estimate
    #[inline]
    pub fn estimate(&self) -> usize {
        let m = Self::M as f64;
        let raw = alpha(Self::M) * m * m / self.sum;

        let estimate = if raw <= 2.5 * m && self.zeros > 0 {
            // small range correction
            m * (m / self.zeros as f64).ln()
        } else if raw > HASH_SPACE / 30.0 {
            // large range correction
            -HASH_SPACE * (1.0 - raw / HASH_SPACE).max(f64::MIN_POSITIVE).ln()
        } else {
            raw
        };

        (estimate + 0.5) as usize
    }

    /// Merge cardinality estimators.
    ///
    /// Resulting registers are the element-wise maximum of both estimators,
    /// which estimates the cardinality of the union of both streams.
    #[inline]
    pub fn merge(&mut self, rhs: &Self) {
        for (lhs_rank, &rhs_rank) in self.registers.iter_mut().zip(rhs.registers.iter()) {
            if rhs_rank > *lhs_rank {
                *lhs_rank = rhs_rank;
            }
        }
        self.recount();
    }

    /// Recompute number of zero registers and harmonic sum from scratch
    fn recount(&mut self) {
        self.zeros = self.registers.iter().filter(|&&r| r == 0).count();
        self.sum = self.registers.iter().map(|&r| inv_pow2(r)).sum();
    }

    /// Return number of registers which were never updated
    #[inline]
    pub fn zeros(&self) -> usize {
        self.zeros
    }

    /// Return memory size of `CardinalityEstimator`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(&*self.registers)
    }
}

impl<const P: usize, H: Hasher + Default> Default for CardinalityEstimator<P, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const P: usize, H: Hasher + Default> Clone for CardinalityEstimator<P, H> {
    /// Clone `CardinalityEstimator`
    fn clone(&self) -> Self {
        Self {
            registers: self.registers.clone(),
            zeros: self.zeros,
            sum: self.sum,
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<const P: usize, H: Hasher + Default> PartialEq for CardinalityEstimator<P, H> {
    /// Compare cardinality estimators by their registers
    fn eq(&self, rhs: &Self) -> bool {
        self.registers == rhs.registers
    }
}

impl<const P: usize, H: Hasher + Default> Debug for CardinalityEstimator<P, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ estimate: {}, zeros: {}, size: {} }}",
            self.estimate(),
            self.zeros,
            self.size_of()
        )
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Computes `2^-rank`
#[inline]
fn inv_pow2(rank: u8) -> f64 {
    1.0 / ((1u64 << rank) as f64)
}
