//! # Test Instance Generation
//!
//! Builds a tower network of the requested shape, optionally relabels its
//! vertices, and assigns initial frequencies.
//!
//! Generation is deterministic: the random source is a `ChaCha20Rng` seeded
//! from the generator arguments, so the same command line always produces the
//! same instance.

use crate::instance::{Instance, Tree};
use anyhow::{Result, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha1::{Digest, Sha1};

pub mod freq;
pub mod tree;

pub use freq::FreqStrategy;
pub use tree::TreeShape;

/// The positional arguments of the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenParams {
    pub n: usize,
    /// Range the initial frequencies are drawn from.
    pub gen_lo: i64,
    pub gen_hi: i64,
    pub shape: TreeShape,
    pub strategy: FreqStrategy,
    /// Range declared in the instance header.
    pub lo: i64,
    pub hi: i64,
}

impl GenParams {
    /// Renders the parameters in command-line order.
    pub fn args(&self) -> Vec<String> {
        vec![
            self.n.to_string(),
            self.gen_lo.to_string(),
            self.gen_hi.to_string(),
            self.shape.to_string(),
            self.strategy.to_string(),
            self.lo.to_string(),
            self.hi.to_string(),
        ]
    }

    pub fn generate<R: Rng + ?Sized>(&self, relabel: bool, rng: &mut R) -> Result<Instance> {
        ensure!(self.n >= 1, "number of towers must be positive, got {}", self.n);
        ensure!(
            self.gen_lo <= self.gen_hi,
            "empty generation range [{}, {}]",
            self.gen_lo,
            self.gen_hi
        );
        let mut edges = tree::generate(self.n, self.shape, rng);
        if relabel {
            tree::relabel(self.n, &mut edges, rng);
        }
        let freqs = freq::assign(
            &Tree::new(self.n, &edges),
            self.gen_lo,
            self.gen_hi,
            self.strategy,
            rng,
        );
        Ok(Instance {
            lo: self.lo,
            hi: self.hi,
            freqs,
            edges,
        })
    }
}

/// Derives a seed from a command line: the first 8 bytes of the SHA-1 of the
/// space-joined arguments.
pub fn seed_from_args<S: AsRef<str>>(args: &[S]) -> u64 {
    let joined = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
    let digest = Sha1::digest(joined.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

pub fn rng_from_seed(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}
