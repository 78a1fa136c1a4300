//! skirmish — two colonies on a 30×30 map with a broken wall between them.
//!
//! Usage: `skirmish [config.json]`.  The optional file is a `SimConfig` in
//! JSON; missing fields take their defaults.  Set `RUST_LOG=info` (or
//! `debug`) to see the simulation's own log lines.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use colony_core::{Role, SimConfig};
use colony_sim::{CellCoord, Death, MatchOutcome, SimBuilder, SimObserver, TeamLedger, TickReport, World};

// ── Constants ─────────────────────────────────────────────────────────────────

const FRAME_SECS:        f32 = 1.0 / 30.0;
/// Print a standings line every this many simulated seconds.
const STANDINGS_EVERY:   f32 = 30.0;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Commentary {
    deaths:        usize,
    queen_deaths:  usize,
    frames:        u64,
    next_standing: f32,
}

impl SimObserver for Commentary {
    fn on_unit_died(&mut self, death: &Death, _world: &World) {
        self.deaths += 1;
        if death.role == Role::Queen {
            self.queen_deaths += 1;
            warn!(team = %death.team, "queen fell");
        }
    }

    fn on_tick_end(&mut self, _report: &TickReport, world: &World) {
        self.frames += 1;
        let now = world.clock.elapsed_secs;
        if now < self.next_standing {
            return;
        }
        self.next_standing = now + STANDINGS_EVERY;
        for (team, tally) in world.ledger.tallies().iter().enumerate() {
            info!(
                team,
                units = tally.unit_count(),
                resources = tally.resources,
                casualties = tally.casualties,
                at = %world.clock,
                "standing"
            );
        }
    }

    fn on_match_end(&mut self, outcome: &MatchOutcome, _ledger: &TeamLedger) {
        info!(winner = ?outcome.winner, reason = ?outcome.reason, "final whistle");
    }
}

// ── Map ───────────────────────────────────────────────────────────────────────

/// A diagonal wall across the middle with a gap every fourth cell.
fn barrier(config: &SimConfig) -> Vec<CellCoord> {
    let (w, h) = (config.grid.width as i32, config.grid.height as i32);
    let span = w.min(h);
    (span / 4..span - span / 4)
        .filter(|i| i % 4 != 0)
        .map(|i| CellCoord::new(i, span - 1 - i))
        .collect()
}

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig { seed: 42, ..SimConfig::default() });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = load_config()?;
    println!("=== skirmish — colony simulation ===");
    println!(
        "Grid: {}×{} cells  |  Teams: {}  |  Seed: {}  |  Match: {} s",
        config.grid.width, config.grid.height, config.teams, config.seed, config.match_duration
    );
    println!();

    let duration = config.match_duration;
    let walls = barrier(&config);
    let mut sim = SimBuilder::new(config).walls(walls).build()?;

    let mut obs = Commentary::default();
    let t0 = Instant::now();
    let outcome = sim.run_for(duration + FRAME_SECS, FRAME_SECS, &mut obs)?;
    let elapsed = t0.elapsed();

    println!(
        "Simulated {} in {:.3} s wall-clock ({} frames, {} deaths)",
        sim.clock(),
        elapsed.as_secs_f64(),
        obs.frames,
        obs.deaths
    );
    println!();

    println!("{:<6} {:<7} {:<10} {:<11} {:<8}", "Team", "Units", "Resources", "Casualties", "Queen");
    println!("{}", "-".repeat(46));
    for (team, tally) in sim.ledger().tallies().iter().enumerate() {
        println!(
            "{:<6} {:<7} {:<10} {:<11} {:<8}",
            team,
            tally.unit_count(),
            tally.resources,
            tally.casualties,
            if tally.queen_alive { "alive" } else { "lost" },
        );
    }
    println!();

    let summary = serde_json::json!({
        "outcome":      outcome,
        "elapsed_secs": sim.clock().elapsed_secs,
        "queen_deaths": obs.queen_deaths,
        "tallies":      sim.ledger().tallies(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
