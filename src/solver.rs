//! Reference solver: minimum number of towers to retune.
//!
//! Each tower picks one of at most three candidates (`f - 1`, `f`, `f + 1`
//! clipped to `[K, L]`). A DP over the tree rooted at tower 1 stores, per
//! candidate, the cheapest cost of the subtree when the tower takes that
//! candidate; children must differ from their parent's choice.

use crate::SetMin;
use crate::instance::{Instance, Solution};

const INF: usize = usize::MAX / 2;
const OFFSETS: [i64; 3] = [-1, 0, 1];

pub fn solve(instance: &Instance) -> Option<Solution> {
    let n = instance.n();
    if n == 0 {
        return Some(Solution {
            changes: 0,
            freqs: vec![],
        });
    }
    let tree = instance.tree();
    let order = tree.bfs(0);
    if order.len() != n {
        return None;
    }
    let value = |v: usize, k: usize| instance.freqs[v] + OFFSETS[k];
    let allowed = |v: usize, k: usize| (instance.lo..=instance.hi).contains(&value(v, k));

    // dp[v][k]: cheapest cost of the subtree of v when v takes candidate k.
    let mut dp = vec![[INF; 3]; n];
    for &(v, _) in &order {
        for k in 0..3 {
            if allowed(v, k) {
                dp[v][k] = (k != 1) as usize;
            }
        }
    }
    for &(v, parent) in order.iter().skip(1).rev() {
        for pk in 0..3 {
            if dp[parent][pk] >= INF {
                continue;
            }
            let mut best = INF;
            for k in 0..3 {
                if value(v, k) != value(parent, pk) {
                    best.setmin(dp[v][k]);
                }
            }
            dp[parent][pk] = (dp[parent][pk] + best).min(INF);
        }
    }

    let mut choice = vec![0; n];
    let root_best = (0..3).min_by_key(|&k| dp[0][k])?;
    if dp[0][root_best] >= INF {
        return None;
    }
    choice[0] = root_best;
    for &(v, parent) in order.iter().skip(1) {
        let taken = value(parent, choice[parent]);
        choice[v] = (0..3)
            .filter(|&k| value(v, k) != taken)
            .min_by_key(|&k| dp[v][k])?;
    }
    let freqs = (0..n).map(|v| value(v, choice[v])).collect();
    Some(Solution::from_final(&instance.freqs, freqs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Verdict, judge};
    use crate::generator::{FreqStrategy, GenParams, TreeShape, rng_from_seed};
    use itertools::Itertools;

    /// Tries every assignment; only for tiny instances.
    fn brute_force(instance: &Instance) -> Option<usize> {
        let tree = instance.tree();
        (0..instance.n())
            .map(|_| OFFSETS.iter())
            .multi_cartesian_product()
            .filter_map(|offsets| {
                let freqs = instance
                    .freqs
                    .iter()
                    .zip(&offsets)
                    .map(|(&f, &&d)| f + d)
                    .collect_vec();
                let ok = freqs.iter().all(|f| (instance.lo..=instance.hi).contains(f))
                    && tree.find_conflict(&freqs).is_none();
                ok.then(|| offsets.iter().filter(|&&&d| d != 0).count())
            })
            .min()
    }

    #[test]
    fn simple_cases() {
        let path = Instance::parse("3 1 3\n1 2 1\n1 2\n2 3\n").unwrap();
        assert_eq!(solve(&path).unwrap().changes, 0);
        let flat = Instance::parse("3 1 3\n1 1 1\n1 2\n2 3\n").unwrap();
        let sol = solve(&flat).unwrap();
        assert_eq!(sol.changes, 1);
        assert_eq!(sol.freqs, vec![1, 2, 1]);
        let star = Instance::parse("4 1 2\n2 2 2 2\n1 2\n1 3\n1 4\n").unwrap();
        assert_eq!(solve(&star).unwrap().changes, 1);
    }

    #[test]
    fn infeasible_without_room_to_move() {
        let stuck = Instance {
            lo: 5,
            hi: 5,
            freqs: vec![5, 5],
            edges: vec![(0, 1)],
        };
        assert_eq!(solve(&stuck), None);
        let forest = Instance {
            lo: 1,
            hi: 3,
            freqs: vec![1, 2, 3],
            edges: vec![(0, 1), (1, 0)],
        };
        assert_eq!(solve(&forest), None);
    }

    #[test]
    fn matches_brute_force_and_checker() {
        let mut seed = 0;
        for shape in [TreeShape::Star, TreeShape::Line, TreeShape::Binary, TreeShape::Random] {
            for strategy in [FreqStrategy::Random, FreqStrategy::Walk, FreqStrategy::Same] {
                for (lo, hi) in [(1, 2), (1, 3), (4, 8)] {
                    seed += 1;
                    let params = GenParams {
                        n: 7,
                        gen_lo: lo,
                        gen_hi: hi,
                        shape,
                        strategy,
                        lo,
                        hi,
                    };
                    let instance = params.generate(true, &mut rng_from_seed(seed)).unwrap();
                    let sol = solve(&instance).unwrap();
                    assert_eq!(Some(sol.changes as usize), brute_force(&instance), "{instance}");
                    assert_eq!(
                        judge(&instance, &sol, &sol),
                        Verdict::Accepted {
                            changes: sol.changes as usize
                        }
                    );
                }
            }
        }
    }

    #[test]
    fn deep_line_does_not_overflow_the_stack() {
        let n = 200_000;
        let instance = Instance {
            lo: 1,
            hi: 2,
            freqs: vec![1; n],
            edges: (1..n).map(|v| (v - 1, v)).collect(),
        };
        let sol = solve(&instance).unwrap();
        assert_eq!(sol.changes as usize, n / 2);
        assert!(instance.tree().find_conflict(&sol.freqs).is_none());
    }
}
