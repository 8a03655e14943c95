//! # Test Suite Builder
//!
//! Runs the generator over the whole subtask plan, validates every input under
//! its subtask's group, writes the reference answers and exports the
//! `task.yaml` description of the test groups.
//!
//! Files are named `{task}.i{group:02}{letter}` (inputs) and
//! `{task}.o{group:02}{letter}` (answers).

use crate::generator::{FreqStrategy, GenParams, TreeShape, rng_from_seed, seed_from_args};
use crate::instance::{MAX_FREQ, MAX_N};
use crate::solver;
use crate::validator::{self, Group};
use anyhow::{Context, Result, bail, ensure};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TASK_NAME: &str = "radiotorni";
const SAMPLES_COMMENT: &str = "Piemēri";

/// Where the suite lives on disk.
#[derive(Clone, Debug)]
pub struct SuiteConfig {
    pub task_name: String,
    pub tests_dir: PathBuf,
}

impl SuiteConfig {
    pub fn new(task_name: &str, tests_dir: impl Into<PathBuf>) -> Result<Self> {
        ensure!(
            !task_name.is_empty()
                && task_name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "task name {:?} is not well-formed",
            task_name
        );
        Ok(Self {
            task_name: task_name.to_string(),
            tests_dir: tests_dir.into(),
        })
    }

    pub fn input_path(&self, test: &str) -> PathBuf {
        self.tests_dir.join(format!("{}.i{}", self.task_name, test))
    }

    pub fn answer_path(&self, test: &str) -> PathBuf {
        self.tests_dir.join(format!("{}.o{}", self.task_name, test))
    }

    /// Names of the tests present on disk (the part after `.i`), sorted.
    pub fn list_tests(&self) -> Result<Vec<String>> {
        let prefix = format!("{}.i", self.task_name);
        let mut tests = vec![];
        for entry in fs::read_dir(&self.tests_dir)
            .with_context(|| format!("cannot read {}", self.tests_dir.display()))?
        {
            let name = entry?.file_name();
            if let Some(test) = name.to_str().and_then(|s| s.strip_prefix(&prefix)) {
                tests.push(test.to_string());
            }
        }
        tests.sort();
        Ok(tests)
    }
}

/// A scored group of tests belonging to one subtask.
#[derive(Clone, Debug)]
pub struct TestGroup {
    pub subtask: u32,
    pub id: u32,
    pub points: u32,
    pub public: bool,
    pub comment: Option<String>,
    /// Validator group every input of this test group must satisfy.
    pub group: Group,
    pub cases: Vec<GenParams>,
}

impl TestGroup {
    /// Test names `{id:02}{letter}` paired with their generator parameters.
    pub fn named_cases(&self) -> impl Iterator<Item = (String, &GenParams)> {
        self.cases
            .iter()
            .zip(b'a'..=b'z')
            .map(move |(params, letter)| (format!("{:02}{}", self.id, letter as char), params))
    }
}

fn case(
    n: usize,
    gen_lo: i64,
    gen_hi: i64,
    shape: TreeShape,
    strategy: FreqStrategy,
    lo: i64,
    hi: i64,
) -> GenParams {
    GenParams {
        n,
        gen_lo,
        gen_hi,
        shape,
        strategy,
        lo,
        hi,
    }
}

/// The same parameters once with random and once with walk frequencies.
fn pair(n: usize, gen_lo: i64, gen_hi: i64, shape: TreeShape, lo: i64, hi: i64) -> [GenParams; 2] {
    [
        case(n, gen_lo, gen_hi, shape, FreqStrategy::Random, lo, hi),
        case(n, gen_lo, gen_hi, shape, FreqStrategy::Walk, lo, hi),
    ]
}

/// Subtask plan of the task; `max_n` is the size of the large tests.
///
/// Subtask 1 holds the samples and has no generated groups.
pub fn radiotorni_plan(max_n: usize) -> Vec<TestGroup> {
    use TreeShape::{Binary, Line, Random, Star};
    let n = max_n;
    let s = n.isqrt() as i64;
    let mut plan = vec![];
    let mut id = 0;
    let mut add = |subtask, points, public, group, cases: Vec<GenParams>| {
        id += 1;
        plan.push(TestGroup {
            subtask,
            id,
            points,
            public,
            comment: None,
            group,
            cases,
        });
    };

    // Subtask 2: N <= 10.
    let g = Group::Small;
    add(2, 2, false, g, pair(10, 1, 5, Star, 1, 5).to_vec());
    add(2, 2, false, g, pair(10, 1, 5, Random, 1, 5).to_vec());
    add(2, 3, false, g, pair(10, 1, 5, Binary, 1, 5).to_vec());
    add(2, 3, false, g, pair(10, 1, MAX_FREQ, Random, 1, MAX_FREQ).to_vec());
    add(2, 3, true, g, pair(10, 1, 3, Random, 1, 3).to_vec());

    // Subtask 3: L = K + 1.
    let g = Group::BinaryRange;
    add(3, 3, false, g, pair(n, 9, 10, Star, 9, 10).to_vec());
    add(3, 3, false, g, pair(n, s - 1, s, Star, s - 1, s).to_vec());
    add(3, 3, false, g, pair(n, 9, 10, Binary, 9, 10).to_vec());
    add(3, 3, false, g, pair(n, s - 1, s, Binary, s - 1, s).to_vec());
    add(
        3,
        3,
        false,
        g,
        vec![
            case(n, MAX_FREQ - 1, MAX_FREQ, Random, FreqStrategy::Random, MAX_FREQ - 1, MAX_FREQ),
            case(n, 9, 10, Random, FreqStrategy::Walk, 9, 10),
        ],
    );
    add(3, 3, true, g, pair(n, s - 1, s, Random, s - 1, s).to_vec());

    // Subtask 4: the tree is a path.
    let g = Group::PathShaped;
    let mut line = pair(n, 9, s, Line, 9, s).to_vec();
    line.push(case(n, 1, 3, Line, FreqStrategy::Random, 1, 3));
    add(4, 10, false, g, line);
    add(4, 10, true, g, pair(n, 8, 10, Line, 8, 10).to_vec());

    // Subtask 5: all initial frequencies equal.
    let g = Group::UniformFrequency;
    for (shape, points, public) in [(Star, 8, false), (Binary, 8, false), (Random, 5, true)] {
        let mut cases = pair(n, 10, 10, shape, 8, 12).to_vec();
        cases.extend(pair(n, s, s, shape, s - 2, s + 2));
        add(5, points, public, g, cases);
    }

    // Subtask 6: no additional constraints.
    let g = Group::Default;
    let full = |shape, hi: [i64; 4]| {
        vec![
            case(n, 1, 10, shape, FreqStrategy::Random, 1, hi[0]),
            case(n, 1, 10, shape, FreqStrategy::Walk, 1, hi[1]),
            case(n, 1, s, shape, FreqStrategy::Random, 1, hi[2]),
            case(n, 1, s, shape, FreqStrategy::Walk, 1, hi[3]),
        ]
    };
    add(6, 6, false, g, full(Star, [10, 11, s + 1, s]));
    add(6, 6, false, g, full(Line, [11, 10, s, s + 1]));
    add(6, 6, false, g, full(Binary, [10, 11, s + 1, s + 1]));
    add(6, 10, true, g, full(Random, [10, 11, s + 1, s + 1]));

    plan
}

/// Summary of one generated test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuiltCase {
    pub test: String,
    pub n: usize,
    pub changes: i64,
}

/// Generates, validates and solves one test, writing its input and answer.
///
/// The seed is derived from the generator arguments followed by the test
/// name, so `generator <args> <test>` reproduces the input.
pub fn build_case(
    config: &SuiteConfig,
    test: &str,
    params: &GenParams,
    group: Group,
) -> Result<BuiltCase> {
    let mut args = params.args();
    args.push(test.to_string());
    let instance = params
        .generate(true, &mut rng_from_seed(seed_from_args(&args)))
        .with_context(|| format!("test {}: generator failed", test))?;
    let text = instance.to_string();
    validator::validate(&text, group)
        .with_context(|| format!("test {} ({}) is invalid for group {}", test, args.join(" "), group))?;
    let solution = solver::solve(&instance)
        .with_context(|| format!("test {}: no feasible assignment", test))?;
    fs::write(config.input_path(test), &text)?;
    fs::write(config.answer_path(test), solution.to_string())?;
    eprintln!(
        "[suite] {} n={} changes={}",
        test,
        instance.n(),
        solution.changes
    );
    Ok(BuiltCase {
        test: test.to_string(),
        n: instance.n(),
        changes: solution.changes,
    })
}

/// Builds every test of `plan` in parallel.
pub fn build(config: &SuiteConfig, plan: &[TestGroup]) -> Result<Vec<BuiltCase>> {
    fs::create_dir_all(&config.tests_dir)?;
    let cases = plan
        .iter()
        .flat_map(|tg| tg.named_cases().map(move |(test, params)| (test, params, tg.group)))
        .collect::<Vec<_>>();
    cases
        .par_iter()
        .map(|(test, params, group)| build_case(config, test, params, *group))
        .collect()
}

/// Copies every sample file into the tests directory and validates the
/// sample inputs. Returns the number of files copied.
pub fn copy_samples(config: &SuiteConfig, samples_dir: &Path) -> Result<usize> {
    fs::create_dir_all(&config.tests_dir)?;
    let input_prefix = format!("{}.i", config.task_name);
    let mut copied = 0;
    for entry in fs::read_dir(samples_dir)
        .with_context(|| format!("cannot read {}", samples_dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if name.to_str().is_some_and(|s| s.starts_with(&input_prefix)) {
            let text = fs::read_to_string(entry.path())?;
            validator::validate(&text, Group::Unconstrained)
                .with_context(|| format!("sample {} is invalid", entry.path().display()))?;
        }
        fs::copy(entry.path(), config.tests_dir.join(&name))?;
        copied += 1;
    }
    Ok(copied)
}

/// Removes the tests directory and the exported `task.yaml`.
pub fn clean(config: &SuiteConfig, yaml_path: &Path) -> Result<()> {
    if config.tests_dir.exists() {
        if !config.tests_dir.is_dir() {
            bail!("{} is not a directory", config.tests_dir.display());
        }
        fs::remove_dir_all(&config.tests_dir)?;
    }
    if yaml_path.exists() {
        fs::remove_file(yaml_path)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct YamlGroup {
    groups: String,
    points: u32,
    public: bool,
    subtask: u32,
    comment: Option<String>,
}

static ENGINE: Lazy<Handlebars> = Lazy::new(new_engine);

fn new_engine() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string(
            "task_yaml",
            "tests_groups:
    - groups: 0
      points: 0
      public: true
      subtask: 0
      comment: {{samples_comment}}
{{#each groups}}    - groups: {{groups}}
      points: {{points}}
      public: {{public}}
      subtask: {{subtask}}
{{#if comment}}      comment: {{comment}}
{{/if}}{{/each}}",
        )
        .expect("task.yaml template must parse");
    handlebars
}

/// Renders `task.yaml`, merging consecutive test groups that share subtask,
/// points and visibility into one `[first, last]` range.
pub fn render_task_yaml(plan: &[TestGroup]) -> Result<String> {
    let mut merged: Vec<(&TestGroup, &TestGroup)> = vec![];
    for tg in plan {
        match merged.last_mut() {
            Some((first, last))
                if first.subtask == tg.subtask
                    && first.public == tg.public
                    && first.points == tg.points =>
            {
                *last = tg;
            }
            _ => merged.push((tg, tg)),
        }
    }
    let groups = merged
        .into_iter()
        .map(|(first, last)| YamlGroup {
            groups: format!("[{}, {}]", first.id, last.id),
            points: first.points,
            public: first.public,
            subtask: first.subtask,
            comment: first.comment.clone(),
        })
        .collect::<Vec<_>>();
    Ok(ENGINE.render(
        "task_yaml",
        &json!({ "samples_comment": SAMPLES_COMMENT, "groups": groups }),
    )?)
}

/// Checks that every case of [`radiotorni_plan`] is well-formed for `max_n`.
pub fn check_max_n(max_n: usize) -> Result<()> {
    // Path tests draw from [9, sqrt(N)].
    ensure!(
        (100..=MAX_N).contains(&max_n),
        "max N must lie in [100, {}], got {}",
        MAX_N,
        max_n
    );
    Ok(())
}
