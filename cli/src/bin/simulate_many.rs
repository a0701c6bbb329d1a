use clap::Parser;
use engine::api::{self, MatchConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simulate-many")]
#[command(about = "Monte Carlo sim: many auto-played matches against one enemy")]
struct Args {
    /// Built-in fighter id
    #[arg(long, default_value = "adventurer")]
    fighter: String,

    /// Built-in enemy id
    #[arg(long, default_value = "bandit")]
    enemy: String,

    /// Path to an enemy file (JSON/YAML); overrides --enemy
    #[arg(long)]
    enemy_file: Option<PathBuf>,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on rounds per trial
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Print the full log of the first trial before the stats
    #[arg(long, default_value_t = false)]
    show_log: bool,

    /// Emit the stats as JSON instead of plain text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    engine::init_tracing();
    let args = Args::parse();

    let (enemy_id, enemy_path) = match args.enemy_file {
        Some(path) => (None, Some(path.to_string_lossy().into_owned())),
        None => (Some(args.enemy.clone()), None),
    };
    let cfg = MatchConfig {
        fighter_id: Some(args.fighter.clone()),
        fighter_path: None,
        enemy_id,
        enemy_path,
        reward: None,
        upgrade_all: false,
        seed: args.seed,
        max_rounds: Some(args.max_rounds),
    };

    if args.show_log {
        let sample = api::simulate_match(cfg.clone())?;
        for line in &sample.log {
            println!("{line}");
        }
        println!();
    }

    let stats = api::simulate_match_many(cfg, args.trials)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    println!(
        "trials={} fighter_wins={} enemy_wins={} draws={}",
        stats.samples, stats.fighter_wins, stats.enemy_wins, stats.draws
    );
    println!(
        "fighter win rate: {:.1}%",
        100.0 * f64::from(stats.fighter_wins) / f64::from(stats.samples)
    );
    println!("avg rounds: {:.2}", stats.avg_rounds);
    Ok(())
}
