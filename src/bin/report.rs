use anyhow::Result;
use clap::Parser;
use radiotorni::report;
use radiotorni::suite::{DEFAULT_TASK_NAME, SuiteConfig};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Runs a solution over every test of a built suite and reports the verdicts.
///
/// Exits with 1 unless every test is accepted.
#[derive(Parser, Debug)]
struct Cli {
    /// Shell command running the solution (reads stdin, writes stdout).
    cmd: String,
    #[clap(long, default_value = DEFAULT_TASK_NAME)]
    task_name: String,
    #[clap(long, short = 'd', default_value = "tests")]
    tests_dir: PathBuf,
    /// Path of the TSV report. Writes to stdout if omitted.
    #[clap(long, short = 'o')]
    output: Option<PathBuf>,
    /// Wall-clock limit per test in seconds; slower runs are `TLE`.
    #[clap(long, short = 't', default_value_t = report::DEFAULT_TIME_LIMIT)]
    time_limit: f64,
    /// Emit JSON instead of TSV.
    #[clap(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SuiteConfig::new(&cli.task_name, &cli.tests_dir)?;
    let rows = report::run_all(&config, &cli.cmd, cli.time_limit)?;

    let mut w: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    if cli.json {
        serde_json::to_writer_pretty(&mut w, &rows)?;
        writeln!(w)?;
    } else {
        report::write_tsv(&rows, &mut w)?;
    }
    w.flush()?;

    let accepted = rows.iter().filter(|r| r.status == "AC").count();
    eprintln!("!log accepted {}/{}", accepted, rows.len());
    if accepted != rows.len() {
        std::process::exit(1);
    }
    Ok(())
}
