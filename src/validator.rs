//! # Input Validator
//!
//! Re-parses a candidate instance under the strict token format, checks that
//! the edges form a tree spanning all towers, and enforces the additional
//! constraint of the selected subtask group.

use crate::instance::{Instance, MAX_FREQ, MAX_N, Tree};
use crate::io::StrictReader;
use anyhow::{Result, bail, ensure};
use std::fmt;
use std::str::FromStr;

/// Subtask constraint groups, selected by the tags `"0"`..`"5"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    /// `"0"`: nothing beyond the base format.
    Unconstrained,
    /// `"1"`: at most 10 towers.
    Small,
    /// `"2"`: exactly two allowed frequencies, `L = K + 1`.
    BinaryRange,
    /// `"3"`: every tower has at most two neighbours.
    PathShaped,
    /// `"4"`: every initial frequency is the same.
    UniformFrequency,
    /// `"5"`: full problem.
    Default,
}

pub const SMALL_MAX_N: usize = 10;

impl Group {
    pub const ALL: [Group; 6] = [
        Group::Unconstrained,
        Group::Small,
        Group::BinaryRange,
        Group::PathShaped,
        Group::UniformFrequency,
        Group::Default,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Group::Unconstrained => "0",
            Group::Small => "1",
            Group::BinaryRange => "2",
            Group::PathShaped => "3",
            Group::UniformFrequency => "4",
            Group::Default => "5",
        }
    }

    /// Checks the rule of this group on an already parsed tree.
    ///
    /// Uniform frequencies are checked while reading, so that group never fails here.
    fn check(&self, instance: &Instance, tree: &Tree) -> Result<()> {
        match self {
            Group::Unconstrained | Group::UniformFrequency | Group::Default => {}
            Group::Small => ensure!(
                instance.n() <= SMALL_MAX_N,
                "group {}: N = {} exceeds {}",
                self.tag(),
                instance.n(),
                SMALL_MAX_N
            ),
            Group::BinaryRange => ensure!(
                instance.hi == instance.lo + 1,
                "group {}: L = {} but K + 1 = {}",
                self.tag(),
                instance.hi,
                instance.lo + 1
            ),
            Group::PathShaped => {
                if let Some(v) = (0..tree.len()).find(|&v| tree.degree(v) > 2) {
                    bail!(
                        "group {}: tower {} has degree {}, expected at most 2",
                        self.tag(),
                        v + 1,
                        tree.degree(v)
                    );
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Group {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Group::ALL.iter().find(|g| g.tag() == s) {
            Some(&g) => Ok(g),
            None => bail!("Unknown group: {:?}, expected one of 0..5", s),
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Validates `input` under `group` and returns the parsed instance.
///
/// Stops at the first violated rule.
pub fn validate(input: &str, group: Group) -> Result<Instance> {
    let mut r = StrictReader::new(input);

    let n = r.read_int(2, MAX_N as i64, "N")? as usize;
    r.read_space()?;
    let lo = r.read_int(1, MAX_FREQ, "K")?;
    r.read_space()?;
    let hi = r.read_int(lo + 1, MAX_FREQ, "L")?;
    r.read_eoln()?;

    let mut freqs = Vec::with_capacity(n);
    for i in 0..n {
        let f = r.read_int(lo, hi, "fi")?;
        if i + 1 < n {
            r.read_space()?;
        }
        if group == Group::UniformFrequency && i > 0 && f != freqs[0] {
            bail!(
                "Different frequencies: tower {} has {}, tower 1 has {}",
                i + 1,
                f,
                freqs[0]
            );
        }
        freqs.push(f);
    }
    r.read_eoln()?;

    let mut edges = Vec::with_capacity(n - 1);
    for _ in 1..n {
        let u = r.read_int(1, n as i64, "u")? as usize;
        r.read_space()?;
        let v = r.read_int(1, n as i64, "v")? as usize;
        r.read_eoln()?;
        ensure!(u != v, "self-loop at tower {} on line {}", u, r.line() - 1);
        edges.push((u - 1, v - 1));
    }
    r.read_eof()?;

    let instance = Instance {
        lo,
        hi,
        freqs,
        edges,
    };
    let tree = instance.tree();
    if let Some(v) = tree.first_unreachable(0) {
        bail!("Not a tree: tower {} is not reachable from tower 1", v + 1);
    }
    group.check(&instance, &tree)?;
    Ok(instance)
}
