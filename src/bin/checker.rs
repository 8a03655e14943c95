use anyhow::{Context, Result};
use clap::Parser;
use radiotorni::checker::{self, Verdict};
use std::path::{Path, PathBuf};

/// Judges a contestant's output against the jury's answer.
///
/// Exit code: 0 accepted, 1 wrong answer, 3 failure of the input or jury answer.
#[derive(Parser, Debug)]
struct Cli {
    /// Instance file.
    input: PathBuf,
    /// Contestant's output.
    output: PathBuf,
    /// Jury's answer.
    answer: PathBuf,
}

fn read(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn main() {
    let cli = Cli::parse();
    let verdict = match (read(&cli.input), read(&cli.answer)) {
        (Ok(input), Ok(answer)) => match read(&cli.output) {
            Ok(output) => checker::check(&input, &output, &answer),
            Err(e) => Verdict::WrongAnswer(format!("{:#}", e)),
        },
        (Err(e), _) | (_, Err(e)) => Verdict::Fail(format!("{:#}", e)),
    };
    println!("{}", verdict);
    eprintln!("!log status {}", verdict.status());
    if let Verdict::Accepted { changes } = verdict {
        eprintln!("!log score {}", changes);
    }
    std::process::exit(verdict.exit_code());
}
