//! # Tree Topologies
//!
//! Builders for the tower network. Every builder returns exactly `n - 1`
//! 0-based edges in construction order, each attaching a vertex to an
//! earlier one, so the result is always a tree.

use anyhow::bail;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeShape {
    /// Vertex 1 adjacent to every other vertex.
    Star,
    /// The path 1 - 2 - ... - N.
    Line,
    /// Vertex `i` attached to `i / 2` (1-based), a heap-shaped tree.
    Binary,
    /// Vertex `i` attached to a uniformly random earlier vertex.
    Random,
}

impl TreeShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeShape::Star => "star",
            TreeShape::Line => "line",
            TreeShape::Binary => "binary",
            TreeShape::Random => "random",
        }
    }
}

impl FromStr for TreeShape {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "star" => TreeShape::Star,
            "line" => TreeShape::Line,
            "binary" => TreeShape::Binary,
            "random" => TreeShape::Random,
            other => bail!("Unknown tree type: {}", other),
        })
    }
}

impl fmt::Display for TreeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn generate<R: Rng + ?Sized>(n: usize, shape: TreeShape, rng: &mut R) -> Vec<(usize, usize)> {
    (1..n)
        .map(|v| match shape {
            TreeShape::Star => (0, v),
            TreeShape::Line => (v - 1, v),
            TreeShape::Binary => ((v + 1) / 2 - 1, v),
            TreeShape::Random => (rng.random_range(0..v), v),
        })
        .collect()
}

/// Renames the vertices by a uniformly random permutation of `0..n`.
pub fn relabel<R: Rng + ?Sized>(n: usize, edges: &mut [(usize, usize)], rng: &mut R) {
    let mut perm = (0..n).collect::<Vec<_>>();
    perm.shuffle(rng);
    for (u, v) in edges.iter_mut() {
        *u = perm[*u];
        *v = perm[*v];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Tree;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const SHAPES: [TreeShape; 4] = [
        TreeShape::Star,
        TreeShape::Line,
        TreeShape::Binary,
        TreeShape::Random,
    ];

    #[test]
    fn every_shape_is_a_spanning_tree() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for shape in SHAPES {
            for n in [1, 2, 3, 10, 257] {
                let mut edges = generate(n, shape, &mut rng);
                assert_eq!(edges.len(), n - 1, "{shape} n={n}");
                relabel(n, &mut edges, &mut rng);
                assert_eq!(edges.len(), n - 1);
                let tree = Tree::new(n, &edges);
                assert_eq!(tree.first_unreachable(0), None, "{shape} n={n}");
            }
        }
    }

    #[test]
    fn fixed_shapes() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(
            generate(4, TreeShape::Star, &mut rng),
            vec![(0, 1), (0, 2), (0, 3)]
        );
        assert_eq!(
            generate(4, TreeShape::Line, &mut rng),
            vec![(0, 1), (1, 2), (2, 3)]
        );
        assert_eq!(
            generate(7, TreeShape::Binary, &mut rng),
            vec![(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)]
        );
        let tree = Tree::new(6, &generate(6, TreeShape::Line, &mut rng));
        assert_eq!(tree.max_degree(), 2);
    }

    #[test]
    fn relabel_preserves_degrees() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut edges = generate(50, TreeShape::Star, &mut rng);
        relabel(50, &mut edges, &mut rng);
        let tree = Tree::new(50, &edges);
        assert_eq!(tree.max_degree(), 49);
        assert_eq!((0..50).filter(|&v| tree.degree(v) == 1).count(), 49);
    }

    #[test]
    fn tags() {
        for shape in SHAPES {
            assert_eq!(shape.as_str().parse::<TreeShape>().unwrap(), shape);
        }
        let err = "caterpillar".parse::<TreeShape>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown tree type: caterpillar");
    }
}
