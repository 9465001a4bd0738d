// Standalone replay tool for analyzing Battlesnake debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --strategy <name>      lucky, docile, random or weighted (default: lucky)
//   --seed <n>             Base seed for the random walk (default: 0)
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use lucky_snake::config::Config;
use lucky_snake::decision::Strategy;
use lucky_snake::replay::{ReplayEngine, ReplayStats};

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --strategy <name>       lucky, docile, random or weighted (default: lucky)");
    eprintln!("  --seed <n>              Base seed for the random walk (default: 0)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    match s.to_lowercase().as_str() {
        "lucky" => Ok(Strategy::Lucky),
        "docile" => Ok(Strategy::Docile),
        "random" => Ok(Strategy::Random),
        "weighted" => Ok(Strategy::Weighted),
        _ => Err(format!("Invalid strategy: {}", s)),
    }
}

struct Options {
    log_file: String,
    config_path: String,
    strategy: Strategy,
    seed: u64,
    turns: Option<Vec<i32>>,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        log_file: args[1].clone(),
        config_path: "Snake.toml".to_string(),
        strategy: Strategy::Lucky,
        seed: 0,
        turns: None,
        verbose: false,
    };

    let mut i = 2;
    while i < args.len() {
        let value = || {
            args.get(i + 1)
                .ok_or_else(|| format!("{} requires a value", args[i]))
        };
        match args[i].as_str() {
            "--turns" => {
                options.turns = Some(parse_turns(value()?)?);
                i += 1;
            }
            "--strategy" => {
                options.strategy = parse_strategy(value()?)?;
                i += 1;
            }
            "--seed" => {
                options.seed = value()?
                    .parse()
                    .map_err(|e| format!("Invalid seed: {}", e))?;
                i += 1;
            }
            "--config" => {
                options.config_path = value()?.clone();
                i += 1;
            }
            "--verbose" => options.verbose = true,
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(options)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(if args.contains(&"--help".to_string()) {
            0
        } else {
            1
        });
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let config = Config::from_file(&options.config_path).unwrap_or_else(|e| {
        eprintln!("Warning: {}, using hardcoded defaults", e);
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(config, options.strategy, options.seed, options.verbose);

    let entries = match engine.load_log_file(&options.log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let results = match engine.replay_all(&entries, options.turns.as_deref()) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    for result in &results {
        println!(
            "Turn {:>4}: logged {:<6} replayed {:<6} {}",
            result.turn,
            result.original_move.map(|d| d.as_str()).unwrap_or("-"),
            result.replayed.direction().map(|d| d.as_str()).unwrap_or("-"),
            if result.matches { "ok" } else { "MISMATCH" }
        );
    }

    let stats = ReplayStats::from_results(&results);
    println!();
    println!(
        "{} turns, {} matches, {} mismatches ({:.1}%)",
        stats.total_turns,
        stats.matches,
        stats.mismatches,
        stats.match_rate * 100.0
    );
}
