#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a headless piñata match with a scripted player.

mod bot;
mod summary;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use pinata_core::{Command, ConfigFile, EngineConfig, Event};
use pinata_engine::{self as engine, query, Engine};
use pinata_presentation::{dispatch, Hud};

use crate::{bot::Bot, summary::MatchSummary};

/// Delay between the scripted player's clicks.
const BOT_CADENCE: Duration = Duration::from_millis(150);

/// Runs a piñata match driven by a scripted player.
#[derive(Debug, Parser)]
#[command(name = "pinata", version)]
struct CliArgs {
    /// TOML file overriding the default engine tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for reward rolls and the player's misclicks.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Simulation frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1_000))]
    tick_hz: u32,
    /// Probability that the player overshoots a piñata.
    #[arg(long, default_value_t = 0.05)]
    misclick_chance: f32,
    /// Print every notification as a JSON line.
    #[arg(long)]
    json: bool,
}

/// Entry point for the piñata command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    ensure!(
        (0.0..=1.0).contains(&args.misclick_chance),
        "misclick chance must lie within [0, 1], got {}",
        args.misclick_chance
    );

    let config = load_config(args.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = run_match(&args, config, &mut out)?;

    if args.json {
        serde_json::to_writer(&mut out, &summary).context("failed to encode match summary")?;
        writeln!(out)?;
    } else {
        writeln!(out, "Final score: {}", summary.score)?;
        writeln!(out, "Piñatas opened: {}", summary.opened)?;
        writeln!(out, "Cooldowns suffered: {}", summary.cooldowns)?;
        writeln!(out, "Gap resets: {}", summary.gap_resets)?;
        writeln!(
            out,
            "Rewards won: {} bombs, {} criticals",
            summary.bombs_won, summary.criticals_won
        )?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return ConfigFile::default()
            .validate()
            .context("invalid engine configuration");
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    parse_config(&text).with_context(|| format!("rejected configuration {}", path.display()))
}

fn parse_config(text: &str) -> Result<EngineConfig> {
    let file: ConfigFile = toml::from_str(text).context("failed to parse configuration")?;
    file.validate().context("invalid engine configuration")
}

fn run_match(args: &CliArgs, config: EngineConfig, out: &mut impl Write) -> Result<MatchSummary> {
    let dt = Duration::from_secs(1) / args.tick_hz;
    let cadence = BOT_CADENCE.min(config.max_click_interval() / 2);
    let mut engine = Engine::seeded(config, args.seed);
    let mut bot = Bot::new(args.seed, cadence, args.misclick_chance);
    let mut hud = Hud::new();
    let mut summary = MatchSummary::default();
    let mut events = Vec::new();
    let mut now = Duration::ZERO;

    info!(
        "match started: {:?} on the clock, seed {}",
        query::config(&engine).match_duration(),
        args.seed
    );
    engine.announce(&mut events);

    while !query::match_over(&engine) {
        if let Some(command) = bot.decide(&engine, now) {
            engine::apply(&mut engine, command, &mut events);
        }
        now += dt;
        engine::apply(&mut engine, Command::Tick { dt }, &mut events);

        hud.advance(dt);
        dispatch(&mut hud, &events);
        summary.record(&events);
        report(out, args.json, &hud, &events)?;
        events.clear();
    }

    info!(
        "match over after {:?}: score {}",
        now,
        query::score(&engine).score()
    );
    Ok(summary)
}

fn report(out: &mut impl Write, json: bool, hud: &Hud, events: &[Event]) -> Result<()> {
    if json {
        for event in events {
            serde_json::to_writer(&mut *out, event).context("failed to encode event")?;
            writeln!(out)?;
        }
    } else if events
        .iter()
        .any(|event| matches!(event, Event::CountdownChanged { .. }))
    {
        writeln!(out, "{}", hud.lines().join(" | "))?;
    }
    Ok(())
}
