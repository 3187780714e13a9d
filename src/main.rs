//! Headless simulation runner (default binary).
//!
//! Plays one game with a seed-derived input script and reports the result.
//! Settings come from `PUYO_*` environment variables, overridden by flags.

use anyhow::Result;

use puyo_rules::engine::{EventLog, Phase, Session, SessionConfig};
use puyo_rules::sim::{parse_sim_args, ScriptedInput, USAGE};
use puyo_rules::types::BoardEvent;

fn main() {
    if let Err(e) = run() {
        eprintln!("[Sim] error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_sim_args(&args, SessionConfig::from_env())? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let log = EventLog::from_path(config.log_path.as_deref())?;
    println!(
        "[Sim] seed={} colors={} max_ticks={} log={}",
        config.seed,
        config.color_count,
        config.max_ticks,
        config.log_path.as_deref().unwrap_or("-")
    );

    let mut script = ScriptedInput::new(config.seed);
    let mut session = Session::new(config.clone()).with_log(log);
    let mut destroyed = 0usize;
    let mut last_phase = session.phase();

    while !session.is_game_over() && session.ticks() < config.max_ticks as u64 {
        let tick = session.ticks();
        let phase = session.tick(script.held(tick), config.tick_secs);

        destroyed += session
            .events()
            .iter()
            .filter(|e| matches!(e, BoardEvent::Destroyed { .. }))
            .count();

        if phase == Phase::Spawn && last_phase != Phase::Spawn && session.chain() >= 2 {
            println!(
                "[Sim] tick {}: {}-chain, score {}",
                tick,
                session.chain(),
                session.score()
            );
        }
        last_phase = phase;
    }

    session.finish()?;

    println!(
        "[Sim] finished: phase={} ticks={} pieces={} erased={} score={} max_chain={}",
        session.phase().as_str(),
        session.ticks(),
        session.pieces(),
        destroyed,
        session.score(),
        session.max_chain()
    );
    Ok(())
}
