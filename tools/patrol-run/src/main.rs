//! patrol-run: headless level runner and layout generator.
//!
//! Usage:
//!   patrol-run simulate --level courtyard.json --ticks 600 --run --every 10
//!   patrol-run generate --seed 7 --output generated.json --guards 4

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use nightwatch_core::commands::PlayerCommand;
use nightwatch_core::constants::TICK_RATE;
use nightwatch_level::procgen::{generate, GenParams};
use nightwatch_level::LevelLayout;
use nightwatch_sim::{SimConfig, SimulationEngine};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "simulate" => cmd_simulate(&args[2..]),
        "generate" => cmd_generate(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "patrol-run: NIGHTWATCH headless level runner\n\
         \n\
         Commands:\n\
         \n\
         simulate  Run a level and print snapshots as JSON lines\n\
         \n\
           --level <path>     Level layout JSON\n\
           --ticks <N>        Ticks to run (default: {default_ticks})\n\
           --run              Player runs instead of walking\n\
           --every <K>        Print every K-th snapshot (default: 1)\n\
         \n\
         generate  Write a procedurally generated layout\n\
         \n\
           --seed <S>         RNG seed (default: 0)\n\
           --output <path>    Output JSON path\n\
           --guards <N>       Number of guards (default: 3)\n\
         \n\
         Log level is read from RUST_LOG (default: info).\n",
        default_ticks = 10 * TICK_RATE,
    );
}

fn parse_value(args: &[String], flag: &str) -> Option<String> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match parse_value(args, flag) {
        Some(raw) => match raw.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {flag} expects a number, got '{raw}'");
                process::exit(1);
            }
        },
        None => default,
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

// --- Simulate command ---

fn cmd_simulate(args: &[String]) {
    let level = match parse_value(args, "--level") {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: --level <path> is required");
            process::exit(1);
        }
    };
    let ticks: u64 = parse_number(args, "--ticks", 10 * u64::from(TICK_RATE));
    let every: u64 = parse_number(args, "--every", 1).max(1);
    let running = has_flag(args, "--run");

    let layout = match LevelLayout::load(&level) {
        Ok(l) => l,
        Err(e) => {
            log::error!("cannot load {}: {e}", level.display());
            process::exit(1);
        }
    };
    log::info!(
        "level '{}': {} guard(s), {} obstacle(s)",
        layout.name,
        layout.guards.len(),
        layout.obstacles.len()
    );

    let mut engine = match SimulationEngine::new(SimConfig::default(), layout) {
        Ok(e) => e,
        Err(e) => {
            log::error!("invalid level: {e}");
            process::exit(1);
        }
    };
    engine.queue_command(PlayerCommand::StartGame);
    engine.queue_command(PlayerCommand::Move {
        x: 0.0,
        z: 1.0,
        running,
    });

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..ticks {
        let snapshot = engine.tick();
        let ended = snapshot.outcome.is_some();
        if snapshot.time.tick % every == 0 || ended {
            if let Err(e) = write_snapshot(&mut out, &snapshot) {
                log::error!("cannot write snapshot: {e}");
                process::exit(1);
            }
        }
        if ended {
            break;
        }
    }
    if let Err(e) = out.flush() {
        log::error!("cannot flush output: {e}");
        process::exit(1);
    }

    let time = engine.time();
    match engine.outcome() {
        Some(outcome) => log::info!("level ended: {outcome:?} at tick {}", time.tick),
        None => log::info!("no outcome after {} ticks ({:.1}s)", time.tick, time.elapsed_secs),
    }
}

fn write_snapshot(
    out: &mut impl Write,
    snapshot: &nightwatch_core::state::LevelSnapshot,
) -> io::Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    writeln!(out)
}

// --- Generate command ---

fn cmd_generate(args: &[String]) {
    let seed: u64 = parse_number(args, "--seed", 0);
    let guards: usize = parse_number(args, "--guards", GenParams::default().guards);

    let output = match parse_value(args, "--output") {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: --output <path> is required");
            process::exit(1);
        }
    };

    let params = GenParams {
        guards,
        ..Default::default()
    };
    let layout = generate(seed, &params);
    log::info!(
        "generated '{}': {} guard(s), {} pillar(s)",
        layout.name,
        layout.guards.len(),
        layout.obstacles.len()
    );

    match layout.save(&output) {
        Ok(()) => log::info!("wrote {}", output.display()),
        Err(e) => {
            log::error!("cannot write {}: {e}", output.display());
            process::exit(1);
        }
    }
}
