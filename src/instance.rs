//! # Tower Network Model
//!
//! Shared data model of the generator, validator, checker and solver: a tree
//! of towers, one integer frequency per tower, and proposed solutions.
//!
//! Vertices are 0-based in memory and 1-based in every text format.

use crate::io::Tokens;
use anyhow::{Context, Result, bail};
use itertools::Itertools;
use std::fmt;

/// Largest number of towers in a valid instance.
pub const MAX_N: usize = 500_000;
/// Largest frequency value in a valid instance.
pub const MAX_FREQ: i64 = 1_000_000_000;

/// A problem instance: declared frequency range, initial frequencies and tree edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    /// Lower bound `K` of the allowed frequencies.
    pub lo: i64,
    /// Upper bound `L` of the allowed frequencies.
    pub hi: i64,
    pub freqs: Vec<i64>,
    /// Undirected edges, 0-based, in input order.
    pub edges: Vec<(usize, usize)>,
}

impl Instance {
    pub fn n(&self) -> usize {
        self.freqs.len()
    }

    pub fn tree(&self) -> Tree {
        Tree::new(self.n(), &self.edges)
    }

    /// Reads an instance from whitespace-separated tokens.
    ///
    /// Only the shape of the input is checked (token count, integer syntax,
    /// endpoints within `1..=N`); structural rules belong to the validator.
    pub fn read(tokens: &mut Tokens) -> Result<Self> {
        let n = tokens.next_usize("N")?;
        let lo = tokens.next_i64("K")?;
        let hi = tokens.next_i64("L")?;
        let freqs = (0..n)
            .map(|_| tokens.next_i64("f"))
            .collect::<Result<Vec<_>>>()?;
        let mut edges = Vec::with_capacity(n.saturating_sub(1));
        for i in 1..n {
            let u = tokens.next_usize("u").with_context(|| format!("edge {}", i))?;
            let v = tokens.next_usize("v").with_context(|| format!("edge {}", i))?;
            if !(1..=n).contains(&u) || !(1..=n).contains(&v) {
                bail!("edge {} ({}, {}) has an endpoint outside [1, {}]", i, u, v, n);
            }
            edges.push((u - 1, v - 1));
        }
        Ok(Self {
            lo,
            hi,
            freqs,
            edges,
        })
    }

    pub fn parse(input: &str) -> Result<Self> {
        Self::read(&mut Tokens::new(input))
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.n(), self.lo, self.hi)?;
        writeln!(f, "{}", self.freqs.iter().join(" "))?;
        for &(u, v) in &self.edges {
            writeln!(f, "{} {}", u + 1, v + 1)?;
        }
        Ok(())
    }
}

/// A proposed final assignment together with its author's declared change count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub changes: i64,
    pub freqs: Vec<i64>,
}

impl Solution {
    /// Reads a declared change count followed by `n` frequencies.
    pub fn read(tokens: &mut Tokens, n: usize) -> Result<Self> {
        let changes = tokens.next_i64("number of changes")?;
        let freqs = (0..n)
            .map(|i| {
                tokens
                    .next_i64("frequency")
                    .with_context(|| format!("frequency of tower {}", i + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { changes, freqs })
    }

    pub fn parse(input: &str, n: usize) -> Result<Self> {
        Self::read(&mut Tokens::new(input), n)
    }

    /// Builds a solution whose declared count is the actual number of changes.
    pub fn from_final(initial: &[i64], freqs: Vec<i64>) -> Self {
        let changes = count_changes(initial, &freqs) as i64;
        Self { changes, freqs }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.changes)?;
        writeln!(f, "{}", self.freqs.iter().join(" "))
    }
}

/// Number of towers whose frequency differs between the two assignments.
pub fn count_changes(initial: &[i64], freqs: &[i64]) -> usize {
    initial.iter().zip(freqs).filter(|(a, b)| a != b).count()
}

/// Undirected adjacency lists over vertices `0..n`.
///
/// Every edge is stored in both directions, in input order.
#[derive(Clone, Debug)]
pub struct Tree {
    adj: Vec<Vec<usize>>,
}

impl Tree {
    pub fn new(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut adj = vec![vec![]; n];
        for &(u, v) in edges {
            adj[u].push(v);
            adj[v].push(u);
        }
        Self { adj }
    }

    pub fn len(&self) -> usize {
        self.adj.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    pub fn max_degree(&self) -> usize {
        self.adj.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Marks every vertex reachable from `root` with an explicit DFS stack.
    pub fn reachable_from(&self, root: usize) -> Vec<bool> {
        let mut visited = vec![false; self.len()];
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            for &u in &self.adj[v] {
                if !visited[u] {
                    stack.push(u);
                }
            }
        }
        visited
    }

    /// Returns the first vertex not reachable from `root`, if any.
    pub fn first_unreachable(&self, root: usize) -> Option<usize> {
        self.reachable_from(root).iter().position(|&b| !b)
    }

    /// Breadth-first order from `root` as `(vertex, parent)` pairs.
    ///
    /// The root is reported as its own parent.
    pub fn bfs(&self, root: usize) -> Vec<(usize, usize)> {
        let mut visited = vec![false; self.len()];
        let mut order = Vec::with_capacity(self.len());
        visited[root] = true;
        order.push((root, root));
        let mut head = 0;
        while head < order.len() {
            let u = order[head].0;
            head += 1;
            for &v in &self.adj[u] {
                if !visited[v] {
                    visited[v] = true;
                    order.push((v, u));
                }
            }
        }
        order
    }

    /// Finds an edge whose endpoints share a frequency.
    ///
    /// Each undirected edge is inspected once, from its smaller endpoint.
    pub fn find_conflict(&self, freqs: &[i64]) -> Option<(usize, usize)> {
        for (u, neighbors) in self.adj.iter().enumerate() {
            for &v in neighbors {
                if u < v && freqs[u] == freqs[v] {
                    return Some((u, v));
                }
            }
        }
        None
    }
}
