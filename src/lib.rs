// # Radiotorni: Contest Tooling for the Radio Towers Task
//
// Towers form a tree and each carries a frequency. A solution retunes some
// towers by at most one step so that no two neighbours share a frequency,
// changing as few towers as possible.
//
// The crate holds everything needed to prepare the task: the instance
// generator, the input validator, the output checker, a reference solver,
// the test-suite builder and a reporter for running solutions over the suite.

/// Lowers a running minimum in place, as the solver's DP does per candidate.
pub trait SetMin {
    /// Replaces `self` with `v` when `v` is smaller; returns whether it did.
    fn setmin(&mut self, v: Self) -> bool;
}

impl<T: PartialOrd> SetMin for T {
    fn setmin(&mut self, v: T) -> bool {
        let lower = v < *self;
        if lower {
            *self = v;
        }
        lower
    }
}

/// Tower network, frequency assignment and solution types.
pub mod instance;

/// Lenient and strict token readers.
pub mod io;

/// Random tree shapes and initial frequencies.
pub mod generator;

/// Strict input validation with subtask groups.
pub mod validator;

/// Feasibility and optimality checking of solutions.
pub mod checker;

/// Reference solver used to produce jury answers.
pub mod solver;

/// Building the whole test suite and its `task.yaml`.
pub mod suite;

/// Running solutions over a built suite.
pub mod report;
