use anyhow::{Result, bail};
use clap::Parser;
use radiotorni::instance::MAX_N;
use radiotorni::suite::{self, DEFAULT_TASK_NAME, SuiteConfig};
use std::fs;
use std::path::PathBuf;

/// Builds the test suite: inputs, reference answers and task.yaml.
#[derive(Parser, Debug)]
struct Cli {
    #[clap(long, default_value = DEFAULT_TASK_NAME)]
    task_name: String,
    #[clap(long, short = 'o', default_value = "tests")]
    tests_dir: PathBuf,
    /// Number of towers in the large tests.
    #[clap(long, short = 'n', default_value_t = MAX_N)]
    max_n: usize,
    /// Directory with hand-written sample tests, copied as they are.
    #[clap(long)]
    samples_dir: Option<PathBuf>,
    /// Where to export the test group description.
    #[clap(long, default_value = "task.yaml")]
    yaml: PathBuf,
    /// Remove the tests directory and task.yaml first.
    #[clap(long, default_value_t = false)]
    clean: bool,
    /// Only build these test groups. Builds all when empty.
    #[clap(long, short = 'g')]
    groups: Vec<u32>,
    /// Worker threads. Defaults to the number of CPUs.
    #[clap(long, short = 'j')]
    threads: Option<usize>,
    /// Print a JSON summary of the built tests to stdout.
    #[clap(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SuiteConfig::new(&cli.task_name, &cli.tests_dir)?;
    suite::check_max_n(cli.max_n)?;
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build_global()?;
    }
    if cli.clean {
        eprintln!("[suite] cleaning {}", config.tests_dir.display());
        suite::clean(&config, &cli.yaml)?;
    }

    let plan = suite::radiotorni_plan(cli.max_n);
    if let Some(id) = cli.groups.iter().find(|&&id| !plan.iter().any(|tg| tg.id == id)) {
        bail!("Unknown test group: {}", id);
    }
    if let Some(dir) = &cli.samples_dir {
        let copied = suite::copy_samples(&config, dir)?;
        eprintln!("[suite] copied {} sample files", copied);
    }
    let selected = plan
        .iter()
        .filter(|tg| cli.groups.is_empty() || cli.groups.contains(&tg.id))
        .cloned()
        .collect::<Vec<_>>();
    let built = suite::build(&config, &selected)?;
    eprintln!(
        "[suite] built {} tests in {}",
        built.len(),
        config.tests_dir.display()
    );

    fs::write(&cli.yaml, suite::render_task_yaml(&plan)?)?;
    eprintln!("[suite] wrote {}", cli.yaml.display());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&built)?);
    }
    Ok(())
}
