use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Roller;
use crate::battle::{BattleEngine, Outcome, RewardGrant, RoundReport};
use crate::combatant::{Enemy, Fighter};
use crate::content::{builtin_campaigns, builtin_enemies, builtin_fighters};
use crate::moves::{Move, MoveCatalog, Polarity, title_case};

const DEFAULT_FIGHTER: &str = "adventurer";
const MAX_ROUNDS: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchConfig {
    #[serde(default)]
    pub fighter_id: Option<String>,
    #[serde(default)]
    pub fighter_path: Option<String>,
    #[serde(default)]
    pub enemy_id: Option<String>,
    #[serde(default)]
    pub enemy_path: Option<String>,
    #[serde(default)]
    pub reward: Option<Move>,
    #[serde(default)]
    pub upgrade_all: bool,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub max_rounds: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchSummary {
    pub winner: String,
    pub rounds: u32,
    pub fighter_hp_end: i32,
    pub enemy_hp_end: i32,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchStats {
    pub samples: u32,
    pub fighter_wins: u32,
    pub enemy_wins: u32,
    pub draws: u32,
    pub avg_rounds: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StageConfig {
    #[serde(default)]
    pub enemy_id: Option<String>,
    #[serde(default)]
    pub enemy_path: Option<String>,
    #[serde(default)]
    pub reward: Option<Move>,
    #[serde(default)]
    pub upgrade_all: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CampaignConfig {
    #[serde(default)]
    pub fighter_id: Option<String>,
    #[serde(default)]
    pub fighter_path: Option<String>,
    pub stages: Vec<StageConfig>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub max_rounds: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CampaignSummary {
    /// "completed", "fell" (the fighter lost a stage), or "stalled" (a
    /// stage hit the round cap).
    pub outcome: String,
    pub stages_won: u32,
    pub rounds_total: u32,
    pub fighter_hp_end: i32,
    pub log: Vec<String>,
}

/// Autoplay one match: the fighter picks uniformly among the moves that
/// would pass validation this round, the enemy plays as usual.
pub fn simulate_match(cfg: MatchConfig) -> Result<MatchSummary> {
    let mut fighter = load_fighter_source(&cfg.fighter_id, &cfg.fighter_path)?;
    let enemy = load_enemy_source(&cfg.enemy_id, &cfg.enemy_path)?;
    let max_rounds = cfg.max_rounds.unwrap_or(MAX_ROUNDS);

    let mut logs = Vec::new();
    let outcome = play_match(
        &mut fighter,
        enemy,
        cfg.reward.clone(),
        cfg.upgrade_all,
        cfg.seed,
        max_rounds,
        &mut logs,
    )?;

    let summary = MatchSummary {
        winner: outcome.winner.to_string(),
        rounds: outcome.rounds,
        fighter_hp_end: fighter.hp,
        enemy_hp_end: outcome.enemy_hp_end,
        log: logs,
    };
    info!(
        winner = %summary.winner,
        rounds = summary.rounds,
        "match finished"
    );
    Ok(summary)
}

/// Repeat `simulate_match` with per-trial seeds (`seed + i`) and aggregate.
pub fn simulate_match_many(cfg: MatchConfig, trials: u32) -> Result<MatchStats> {
    if trials == 0 {
        bail!("trials must be > 0");
    }
    let mut stats = MatchStats {
        samples: trials,
        fighter_wins: 0,
        enemy_wins: 0,
        draws: 0,
        avg_rounds: 0.0,
    };
    let mut rounds_total = 0u64;
    for i in 0..trials {
        let mut trial = cfg.clone();
        trial.seed = cfg.seed.wrapping_add(u64::from(i));
        let res = simulate_match(trial)?;
        rounds_total += u64::from(res.rounds);
        match res.winner.as_str() {
            "fighter" => stats.fighter_wins += 1,
            "enemy" => stats.enemy_wins += 1,
            _ => stats.draws += 1,
        }
    }
    stats.avg_rounds = rounds_total as f64 / f64::from(trials);
    Ok(stats)
}

/// Autoplay a campaign: stages in order against one persistent fighter,
/// stopping at the first loss or stalled stage.
pub fn simulate_campaign(cfg: CampaignConfig) -> Result<CampaignSummary> {
    if cfg.stages.is_empty() {
        bail!("campaign has no stages");
    }
    let mut fighter = load_fighter_source(&cfg.fighter_id, &cfg.fighter_path)?;
    let max_rounds = cfg.max_rounds.unwrap_or(MAX_ROUNDS);

    let mut logs = Vec::new();
    let mut stages_won = 0u32;
    let mut rounds_total = 0u32;
    let mut outcome = "completed";
    for (i, stage) in cfg.stages.iter().enumerate() {
        let enemy = load_enemy_source(&stage.enemy_id, &stage.enemy_path)
            .with_context(|| format!("stage {}", i + 1))?;
        logs.push(format!("[STAGE] {} of {}", i + 1, cfg.stages.len()));
        let end = play_match(
            &mut fighter,
            enemy,
            stage.reward.clone(),
            stage.upgrade_all,
            cfg.seed.wrapping_add(i as u64),
            max_rounds,
            &mut logs,
        )?;
        rounds_total += end.rounds;
        match end.winner {
            "fighter" => stages_won += 1,
            "enemy" => {
                outcome = "fell";
                break;
            }
            _ => {
                outcome = "stalled";
                break;
            }
        }
    }

    logs.push(format!(
        "[END] {} after {} stages, fighter HP {}",
        outcome, stages_won, fighter.hp
    ));
    info!(outcome, stages_won, "campaign finished");
    Ok(CampaignSummary {
        outcome: outcome.to_string(),
        stages_won,
        rounds_total,
        fighter_hp_end: fighter.hp,
        log: logs,
    })
}

struct MatchEnd {
    winner: &'static str,
    rounds: u32,
    enemy_hp_end: i32,
}

fn play_match(
    fighter: &mut Fighter,
    enemy: Enemy,
    reward: Option<Move>,
    upgrade_all: bool,
    seed: u64,
    max_rounds: u32,
    logs: &mut Vec<String>,
) -> Result<MatchEnd> {
    logs.push(format!(
        "[START] {} (HP {}) vs {} (HP {})",
        fighter.name, fighter.hp, enemy.name, enemy.hp
    ));

    // Separate stream for the autoplay picks so the enemy's rolls match an
    // interactive battle with the same seed.
    let mut policy = Roller::from_seed(seed.wrapping_add(1));
    let mut engine = BattleEngine::new(fighter, enemy, reward, upgrade_all, Roller::from_seed(seed));

    loop {
        let pick = pick_auto_move(&engine, &mut policy)?;
        let report = engine.submit_move(&pick)?;
        log_round(logs, &report);
        match report.outcome {
            Outcome::Won => {
                if let Some(grant) = &report.reward {
                    log_reward(logs, grant);
                }
                return Ok(MatchEnd {
                    winner: "fighter",
                    rounds: report.round,
                    enemy_hp_end: 0,
                });
            }
            Outcome::Lost => {
                return Ok(MatchEnd {
                    winner: "enemy",
                    rounds: report.round,
                    enemy_hp_end: report.enemy_hp,
                });
            }
            Outcome::Continuing => {}
        }
        if engine.round() >= max_rounds {
            logs.push(format!("[END] round cap {} reached", max_rounds));
            return Ok(MatchEnd {
                winner: "draw",
                rounds: engine.round(),
                enemy_hp_end: engine.enemy().hp,
            });
        }
    }
}

fn pick_auto_move(engine: &BattleEngine<'_>, policy: &mut Roller) -> Result<String> {
    let candidates: Vec<&str> = engine
        .fighter()
        .moves
        .iter()
        .map(|(name, _)| name)
        .filter(|name| engine.validate(name).is_ok())
        .collect();
    if candidates.is_empty() {
        bail!("{} has no usable move this round", engine.fighter().name);
    }
    Ok(candidates[policy.pick_index(candidates.len())].to_string())
}

fn log_round(logs: &mut Vec<String>, report: &RoundReport) {
    logs.push(format!("[ROUND] {}", report.round));
    logs.push(format!(
        "[ATTACK][Fighter] {} ({} {})",
        title_case(&report.fighter_move),
        report.fighter_value.abs(),
        Polarity::of(report.fighter_value).label(),
    ));
    match &report.enemy_strike {
        Some(strike) => logs.push(format!(
            "[ATTACK][Enemy] {} ({} damage)",
            strike.name, strike.value
        )),
        None => logs.push("[ATTACK][Enemy] N/A".to_string()),
    }
    logs.push(format!(
        "[HP] fighter={} enemy={}",
        report.fighter_hp, report.enemy_hp
    ));
}

fn log_reward(logs: &mut Vec<String>, grant: &RewardGrant) {
    match grant {
        RewardGrant::UpgradeAll { bonus } => {
            logs.push(format!("[REWARD] all abilities upgraded by {}", bonus));
        }
        RewardGrant::NewAbility { name, value } => {
            logs.push(format!(
                "[REWARD] new ability: {} ({} {})",
                title_case(name),
                value.abs(),
                Polarity::of(*value).label(),
            ));
        }
    }
}

/* ---------------- loading: built-ins and files ---------------- */

pub fn builtin_fighter(id: &str) -> Result<Fighter> {
    let text = builtin_fighters()
        .get(id)
        .copied()
        .ok_or_else(|| anyhow!("unknown built-in fighter: {}", id))?;
    let fighter: Fighter = serde_json::from_str(text)
        .with_context(|| format!("failed to parse built-in fighter: {}", id))?;
    ensure_catalog(&fighter.moves, &fighter.name)?;
    Ok(fighter)
}

pub fn builtin_enemy(id: &str) -> Result<Enemy> {
    let text = builtin_enemies()
        .get(id)
        .copied()
        .ok_or_else(|| anyhow!("unknown built-in enemy: {}", id))?;
    let enemy: Enemy = serde_json::from_str(text)
        .with_context(|| format!("failed to parse built-in enemy: {}", id))?;
    ensure_catalog(&enemy.moves, &enemy.name)?;
    Ok(enemy)
}

pub fn builtin_campaign(id: &str) -> Result<CampaignConfig> {
    let text = builtin_campaigns()
        .get(id)
        .copied()
        .ok_or_else(|| anyhow!("unknown built-in campaign: {}", id))?;
    serde_json::from_str(text).with_context(|| format!("failed to parse built-in campaign: {}", id))
}

/// Parse a fighter definition; YAML or JSON, decided by `origin`'s extension.
pub fn parse_fighter(text: &str, origin: &Path) -> Result<Fighter> {
    let fighter: Fighter = parse_by_extension(text, origin)?;
    ensure_catalog(&fighter.moves, &fighter.name)?;
    Ok(fighter)
}

/// Parse an enemy definition; YAML or JSON, decided by `origin`'s extension.
pub fn parse_enemy(text: &str, origin: &Path) -> Result<Enemy> {
    let enemy: Enemy = parse_by_extension(text, origin)?;
    ensure_catalog(&enemy.moves, &enemy.name)?;
    Ok(enemy)
}

/// Parse a campaign config; YAML or JSON, decided by `origin`'s extension.
pub fn parse_campaign(text: &str, origin: &Path) -> Result<CampaignConfig> {
    parse_by_extension(text, origin)
}

pub fn load_fighter_file(path: &Path) -> Result<Fighter> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read fighter file: {}", path.display()))?;
    parse_fighter(&text, path)
}

pub fn load_enemy_file(path: &Path) -> Result<Enemy> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read enemy file: {}", path.display()))?;
    parse_enemy(&text, path)
}

pub fn load_campaign_file(path: &Path) -> Result<CampaignConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read campaign file: {}", path.display()))?;
    parse_campaign(&text, path)
}

fn load_fighter_source(id: &Option<String>, path: &Option<String>) -> Result<Fighter> {
    match (id, path) {
        (Some(_), Some(_)) => bail!("configure fighter_id or fighter_path, not both"),
        (None, Some(p)) => load_fighter_file(Path::new(p)),
        (Some(id), None) => builtin_fighter(id),
        (None, None) => builtin_fighter(DEFAULT_FIGHTER),
    }
}

fn load_enemy_source(id: &Option<String>, path: &Option<String>) -> Result<Enemy> {
    match (id, path) {
        (Some(_), Some(_)) => bail!("configure enemy_id or enemy_path, not both"),
        (None, Some(p)) => load_enemy_file(Path::new(p)),
        (Some(id), None) => builtin_enemy(id),
        (None, None) => bail!("no enemy configured"),
    }
}

fn parse_by_extension<T: DeserializeOwned>(text: &str, origin: &Path) -> Result<T> {
    let yaml = matches!(
        origin.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    if yaml {
        serde_yaml::from_str(text)
            .with_context(|| format!("failed to parse YAML: {}", origin.display()))
    } else {
        serde_json::from_str(text)
            .with_context(|| format!("failed to parse JSON: {}", origin.display()))
    }
}

fn ensure_catalog(moves: &MoveCatalog, owner: &str) -> Result<()> {
    if moves.is_empty() {
        bail!("{} has an empty move catalog", owner);
    }
    Ok(())
}
