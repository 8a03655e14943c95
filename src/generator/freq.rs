//! # Initial Frequency Assignment

use crate::instance::Tree;
use anyhow::bail;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FreqStrategy {
    /// Independent uniform draw per tower.
    Random,
    /// Breadth-first walk changing by one per edge, bouncing off the range bounds.
    Walk,
    /// A single draw shared by every tower.
    Same,
}

impl FreqStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FreqStrategy::Random => "random",
            FreqStrategy::Walk => "walk",
            FreqStrategy::Same => "same",
        }
    }
}

impl FromStr for FreqStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "random" => FreqStrategy::Random,
            "walk" => FreqStrategy::Walk,
            "same" => FreqStrategy::Same,
            other => bail!("Unknown frequency assignment method: {}", other),
        })
    }
}

impl fmt::Display for FreqStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draws one frequency in `[lo, hi]` per vertex of `tree`.
pub fn assign<R: Rng + ?Sized>(
    tree: &Tree,
    lo: i64,
    hi: i64,
    strategy: FreqStrategy,
    rng: &mut R,
) -> Vec<i64> {
    let n = tree.len();
    match strategy {
        FreqStrategy::Random => (0..n).map(|_| rng.random_range(lo..=hi)).collect(),
        FreqStrategy::Walk => walk(tree, lo, hi, rng),
        FreqStrategy::Same => vec![rng.random_range(lo..=hi); n],
    }
}

fn walk<R: Rng + ?Sized>(tree: &Tree, lo: i64, hi: i64, rng: &mut R) -> Vec<i64> {
    let n = tree.len();
    let mut freqs = vec![0; n];
    if n == 0 {
        return freqs;
    }
    let start = rng.random_range(0..n);
    freqs[start] = rng.random_range(lo..=hi);
    let mut step = if rng.random_bool(0.5) { 1 } else { -1 };
    for (v, parent) in tree.bfs(start).into_iter().skip(1) {
        let f = freqs[parent] + step;
        freqs[v] = if (lo..=hi).contains(&f) {
            f
        } else {
            // The direction stays flipped for every later vertex.
            step = -step;
            freqs[parent]
        };
    }
    freqs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tree::{self, TreeShape};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn random_tree(n: usize, shape: TreeShape, rng: &mut ChaCha20Rng) -> Tree {
        let mut edges = tree::generate(n, shape, rng);
        tree::relabel(n, &mut edges, rng);
        Tree::new(n, &edges)
    }

    #[test]
    fn walk_changes_by_at_most_one_per_edge() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for shape in [TreeShape::Star, TreeShape::Line, TreeShape::Binary, TreeShape::Random] {
            for (lo, hi) in [(1, 2), (1, 5), (9, 10), (7, 7), (1, 1_000_000_000)] {
                let tree = random_tree(300, shape, &mut rng);
                let freqs = assign(&tree, lo, hi, FreqStrategy::Walk, &mut rng);
                assert!(freqs.iter().all(|f| (lo..=hi).contains(f)));
                for v in 0..tree.len() {
                    for &u in tree.neighbors(v) {
                        assert!((freqs[u] - freqs[v]).abs() <= 1, "{shape} [{lo}, {hi}]");
                    }
                }
            }
        }
    }

    #[test]
    fn walk_on_a_single_value_range_is_constant() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let tree = Tree::new(40, &tree::generate(40, TreeShape::Line, &mut rng));
        let freqs = assign(&tree, 10, 10, FreqStrategy::Walk, &mut rng);
        assert_eq!(freqs, vec![10; 40]);
    }

    #[test]
    fn random_and_same_stay_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let tree = random_tree(100, TreeShape::Random, &mut rng);
        let freqs = assign(&tree, 3, 6, FreqStrategy::Random, &mut rng);
        assert!(freqs.iter().all(|f| (3..=6).contains(f)));
        let same = assign(&tree, 3, 6, FreqStrategy::Same, &mut rng);
        assert!(same.iter().all(|&f| f == same[0]));
        assert!((3..=6).contains(&same[0]));
    }

    #[test]
    fn tags() {
        assert_eq!("walk".parse::<FreqStrategy>().unwrap(), FreqStrategy::Walk);
        assert!("zigzag".parse::<FreqStrategy>().is_err());
    }
}
