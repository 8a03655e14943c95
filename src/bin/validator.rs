use anyhow::{Context, Result};
use clap::Parser;
use radiotorni::validator::{self, Group};
use std::io::Read;
use std::path::PathBuf;

/// Validates an instance read from a file or stdin.
///
/// Exits with 0 when the input is valid and 3 otherwise.
#[derive(Parser, Debug)]
struct Cli {
    /// Subtask group: 0 (none), 1 (N <= 10), 2 (L = K + 1), 3 (path),
    /// 4 (equal frequencies) or 5 (full).
    #[clap(long, short = 'g', default_value = "0")]
    group: String,
    /// Input file. Reads stdin if omitted.
    input: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("FAIL {:#}", e);
        std::process::exit(3);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let group = cli.group.parse::<Group>()?;
    let input = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("No such input: {}", path.display()))?,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
    };
    let instance = validator::validate(&input, group)?;
    eprintln!("OK n={} group={}", instance.n(), group);
    Ok(())
}
