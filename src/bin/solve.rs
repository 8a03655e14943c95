use proconio::input;
use proconio::marker::Usize1;
use radiotorni::instance::Instance;
use radiotorni::solver;

fn main() {
    input! {
        n: usize,
        lo: i64,
        hi: i64,
        freqs: [i64; n],
        edges: [(Usize1, Usize1); n - 1],
    }
    let instance = Instance {
        lo,
        hi,
        freqs,
        edges,
    };
    match solver::solve(&instance) {
        Some(solution) => print!("{}", solution),
        None => {
            eprintln!("no feasible assignment");
            std::process::exit(1);
        }
    }
}
