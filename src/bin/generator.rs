use anyhow::Result;
use clap::Parser;
use radiotorni::generator::{self, FreqStrategy, GenParams, TreeShape};
use std::io::{BufWriter, Write};

/// Generates one instance: `N K L`, the initial frequencies, then N - 1 edges.
#[derive(Parser, Debug)]
struct Cli {
    /// Number of towers.
    n: usize,
    /// Lower bound of the generated frequencies.
    gen_lo: i64,
    /// Upper bound of the generated frequencies.
    gen_hi: i64,
    /// Tree shape: star, line, binary or random.
    tree_type: String,
    /// Frequency assignment: random, walk or same.
    freq_way: String,
    /// Declared lower bound K written to the instance.
    lo: i64,
    /// Declared upper bound L written to the instance.
    hi: i64,
    /// Extra arguments such as the test name. They only affect the seed.
    tags: Vec<String>,
    /// Seed for the random generator. Derived from the arguments if omitted.
    #[clap(long, short = 's')]
    seed: Option<u64>,
    /// Keep construction order labels instead of shuffling the vertices.
    #[clap(long, default_value_t = false)]
    keep_labels: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let params = GenParams {
        n: cli.n,
        gen_lo: cli.gen_lo,
        gen_hi: cli.gen_hi,
        shape: cli.tree_type.parse::<TreeShape>()?,
        strategy: cli.freq_way.parse::<FreqStrategy>()?,
        lo: cli.lo,
        hi: cli.hi,
    };
    let seed = cli.seed.unwrap_or_else(|| {
        let mut args = params.args();
        args.extend(cli.tags.iter().cloned());
        generator::seed_from_args(&args)
    });
    let instance = params.generate(!cli.keep_labels, &mut generator::rng_from_seed(seed))?;

    let stdout = std::io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    write!(w, "{}", instance)?;
    w.flush()?;
    Ok(())
}
