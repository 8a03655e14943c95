//! # Solution Checker
//!
//! Verifies a contestant's solution and the jury's reference solution against
//! the same instance, then compares their change counts.
//!
//! The jury's solution is trusted: any defect found in it is reported as
//! [`Verdict::Fail`], never as a wrong answer.

use crate::instance::{Instance, Solution, Tree, count_changes};
use crate::io::Tokens;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Feasible and as good as the jury's solution.
    Accepted { changes: usize },
    /// Infeasible, miscounted, malformed or suboptimal contestant output.
    WrongAnswer(String),
    /// Broken instance or jury answer.
    Fail(String),
}

impl Verdict {
    /// Short status used in `!log status` lines and reports.
    pub fn status(&self) -> &'static str {
        match self {
            Verdict::Accepted { .. } => "AC",
            Verdict::WrongAnswer(_) => "WA",
            Verdict::Fail(_) => "FAIL",
        }
    }

    /// Process exit code understood by the judging harness.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Accepted { .. } => 0,
            Verdict::WrongAnswer(_) => 1,
            Verdict::Fail(_) => 3,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted { changes } => write!(f, "Correct solution with {} changes", changes),
            Verdict::WrongAnswer(msg) | Verdict::Fail(msg) => f.write_str(msg),
        }
    }
}

/// Checks one solution and returns its actual number of changes.
///
/// Rules, first failure wins: every frequency lies in `[K, L]`; every tower
/// moved by at most one; the declared count equals the actual count; no
/// edge joins two equal frequencies.
pub fn verify(instance: &Instance, tree: &Tree, solution: &Solution) -> Result<usize, String> {
    if solution.freqs.len() != instance.n() {
        return Err(format!(
            "Expected {} frequencies, found {}",
            instance.n(),
            solution.freqs.len()
        ));
    }
    let (lo, hi) = (instance.lo, instance.hi);
    for (i, &f) in solution.freqs.iter().enumerate() {
        if f < lo || f > hi {
            return Err(format!(
                "Frequency {} for tower {} is outside the valid range [{}, {}]",
                f,
                i + 1,
                lo,
                hi
            ));
        }
    }
    for (i, (&f, &init)) in solution.freqs.iter().zip(&instance.freqs).enumerate() {
        let diff = f.abs_diff(init);
        if diff > 1 {
            return Err(format!(
                "Tower {} frequency was changed by {}, which exceeds the allowed +/-1",
                i + 1,
                diff
            ));
        }
    }
    let actual = count_changes(&instance.freqs, &solution.freqs);
    if actual as i64 != solution.changes {
        return Err(format!(
            "Reported {} changes, but actually performed {} changes",
            solution.changes, actual
        ));
    }
    if let Some((u, v)) = tree.find_conflict(&solution.freqs) {
        return Err(format!(
            "Towers {} and {} are connected and both use frequency {}",
            u + 1,
            v + 1,
            solution.freqs[u]
        ));
    }
    Ok(actual)
}

/// Judges already parsed solutions.
pub fn judge(instance: &Instance, contestant: &Solution, jury: &Solution) -> Verdict {
    let tree = instance.tree();
    let jury_changes = match verify(instance, &tree, jury) {
        Ok(changes) => changes,
        Err(msg) => return Verdict::Fail(format!("Jury's solution: {}", msg)),
    };
    let changes = match verify(instance, &tree, contestant) {
        Ok(changes) => changes,
        Err(msg) => return Verdict::WrongAnswer(msg),
    };
    if changes > jury_changes {
        Verdict::WrongAnswer(format!(
            "Solution is not optimal: performed {} changes, but {} is the minimal possible",
            changes, jury_changes
        ))
    } else if changes < jury_changes {
        Verdict::Fail(format!(
            "Contestant's solution ({} changes) is better than jury's solution ({} changes)",
            changes, jury_changes
        ))
    } else {
        Verdict::Accepted { changes }
    }
}

/// Judges the raw texts of the instance, contestant output and jury answer.
///
/// Unreadable contestant output is a wrong answer; an unreadable instance or
/// jury answer is a failure.
pub fn check(input: &str, output: &str, answer: &str) -> Verdict {
    let instance = match Instance::parse(input) {
        Ok(instance) => instance,
        Err(e) => return Verdict::Fail(format!("Cannot read input: {:#}", e)),
    };
    let n = instance.n();
    let jury = match Solution::read(&mut Tokens::new(answer), n) {
        Ok(sol) => sol,
        Err(e) => return Verdict::Fail(format!("Cannot read jury's answer: {:#}", e)),
    };
    let contestant = match Solution::read(&mut Tokens::new(output), n) {
        Ok(sol) => sol,
        Err(e) => return Verdict::WrongAnswer(format!("Cannot read output: {:#}", e)),
    };
    judge(&instance, &contestant, &jury)
}
