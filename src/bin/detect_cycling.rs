// Reports turns where the snake came back to a cell it just left
//
// Usage:
//   cargo run --bin detect_cycling -- <log_file> [window]
//
// The window (default 4) is how many turns back a revisit still counts.

use std::process;

use lucky_snake::replay::{find_cycles, load_log_file};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: detect_cycling <game_file.jsonl> [window]");
        process::exit(1);
    }

    let window = match args.get(2).map(|w| w.parse::<i32>()) {
        None => 4,
        Some(Ok(w)) if w > 0 => w,
        Some(_) => {
            eprintln!("Window must be a positive number of turns");
            process::exit(1);
        }
    };

    let entries = match load_log_file(&args[1]) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Analyzing {} turns for cycling behavior (window {})...\n",
        entries.len(),
        window
    );

    let cycles = find_cycles(&entries, window);
    if cycles.is_empty() {
        println!("No cycling detected");
        return;
    }

    for cycle in &cycles {
        println!(
            "{} turn {}: back at ({}, {}) after {} turns via [{}]",
            cycle.game_id,
            cycle.turn,
            cycle.head.x,
            cycle.head.y,
            cycle.period,
            cycle.moves.join(",")
        );
    }
    println!("\nTotal cycling events: {}", cycles.len());
}
