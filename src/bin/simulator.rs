//! Headless urlsnake runner
//!
//! Plays seeded games with the greedy autopilot through the same `GameLoop`
//! the terminal host uses, and prints what each run scored.
//!
//! Usage:
//!   cargo run --bin urlsnake-sim -- [OPTIONS]
//!
//! Options:
//!   --runs N        Number of runs with incrementing seeds (default: 10)
//!   --ticks N       Tick limit per run (default: 10000)
//!   --seed N        Base RNG seed (default: 42)
//!   --verbose       Print every run
//!   --quiet         Only final summary line

use std::io;
use urlsnake::simulator::{run_simulation, SimConfig, SimReport};

// ── CLI Configuration ────────────────────────────────────────────────

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                config.num_runs = parse_number(args.get(i), "--runs");
            }
            "--ticks" => {
                i += 1;
                config.max_ticks_per_run = parse_number(args.get(i), "--ticks");
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_number(args.get(i), "--seed"));
            }
            "--verbose" => config.verbosity = 2,
            "--quiet" => config.verbosity = 0,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn parse_number<T: std::str::FromStr>(arg: Option<&String>, flag: &str) -> T {
    match arg.and_then(|s| s.parse().ok()) {
        Some(value) => value,
        None => {
            eprintln!("{flag} requires a number");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "urlsnake headless runner\n\
         \n\
         Usage: urlsnake-sim [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 10)\n\
         \x20 --ticks N       Tick limit per run (default: 10000)\n\
         \x20 --seed N        Base RNG seed (default: 42)\n\
         \x20 --verbose       Print every run\n\
         \x20 --quiet         Only final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Output ───────────────────────────────────────────────────────────

fn print_report(report: &SimReport) {
    println!("── Results ─────────────────────────────────────────");
    println!("{:>4}  {:>6}  {:>7}  {:<8}  board", "run", "score", "ticks", "end");
    for (idx, run) in report.runs.iter().enumerate() {
        println!(
            "{:>4}  {:>6}  {:>7}  {:<8}  #|{}|",
            idx + 1,
            run.score,
            run.ticks,
            if run.crashed { "crash" } else { "cut off" },
            run.bitmap
        );
    }
    println!();
    println!("Mean score: {:.2}", report.mean_score());
    println!("Mean ticks: {:.1}", report.mean_ticks());
    if let Some(best) = report.best() {
        let seed = best
            .seed
            .map_or_else(|| "random".to_string(), |s| s.to_string());
        println!("Best run:   {} (seed {})", best.score, seed);
    }
    println!();
}

fn main() -> io::Result<()> {
    let config = parse_args();

    let report = run_simulation(&config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    if config.verbosity >= 1 {
        print_report(&report);
    }
    println!("{}", report.summary_line());
    Ok(())
}
