use clap::{Args, Parser, Subcommand};
use encoding_rs::Encoding;
use engine::api::{self, CampaignConfig, StageConfig};
use engine::{
    BattleEngine, Enemy, Fighter, Move, MoveError, Outcome, Polarity, RewardGrant, RoundReport,
    Roller, title_case,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, process, thread};

#[derive(Args)]
struct FightArgs {
    /// Built-in fighter id, or a path to a fighter file (JSON/YAML)
    #[arg(long, default_value = "adventurer")]
    fighter: String,
    /// Built-in enemy id, or a path to an enemy file (JSON/YAML)
    #[arg(long, default_value = "bandit")]
    enemy: String,
    /// Victory reward as name:value (negative value reads as a heal)
    #[arg(long)]
    reward: Option<String>,
    /// Upgrade every fighter move on victory instead of granting a reward
    #[arg(long, default_value_t = false)]
    upgrade_all: bool,
    /// RNG seed for a reproducible battle; omit for entropy
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds to pause between narration lines
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
}

#[derive(Subcommand)]
enum Cmd {
    /// Fight a single enemy interactively
    Fight {
        #[command(flatten)]
        args: FightArgs,
    },
    /// Fight a campaign of enemies in order with one persistent fighter
    Campaign {
        /// Built-in campaign id
        #[arg(long, default_value = "journey")]
        id: String,
        /// Path to a campaign file (JSON/YAML); overrides --id
        #[arg(long)]
        file: Option<PathBuf>,
        /// RNG seed for reproducible battles; omit for entropy
        #[arg(long)]
        seed: Option<u64>,
        /// Milliseconds to pause between narration lines
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
    },
    /// Print the built-in fighters and enemies as JSON (stdout)
    Roster {
        /// Pretty-print JSON
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
}

#[derive(Parser)]
#[command(name = "skirmish-cli")]
#[command(about = "Skirmish CLI harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Serialize)]
struct RosterDump {
    fighters: BTreeMap<String, Fighter>,
    enemies: BTreeMap<String, Enemy>,
}

fn main() -> anyhow::Result<()> {
    engine::init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Fight { args } => {
            let mut fighter = resolve_fighter(&args.fighter)?;
            let enemy = resolve_enemy(&args.enemy)?;
            let reward = args.reward.as_deref().map(parse_reward).transpose()?;
            let pacing = Pacing::new(args.delay_ms);
            run_fight(
                &mut fighter,
                enemy,
                reward,
                args.upgrade_all,
                roller_for(args.seed, 0),
                pacing,
            )?;
        }
        Cmd::Campaign {
            id,
            file,
            seed,
            delay_ms,
        } => {
            let campaign = match file {
                Some(path) => api::parse_campaign(&read_text_auto(&path)?, &path)?,
                None => api::builtin_campaign(&id)?,
            };
            run_campaign(campaign, seed, Pacing::new(delay_ms))?;
        }
        Cmd::Roster { pretty } => {
            let mut fighters = BTreeMap::new();
            for &id in engine::content::builtin_fighters().keys() {
                fighters.insert(id.to_string(), api::builtin_fighter(id)?);
            }
            let mut enemies = BTreeMap::new();
            for &id in engine::content::builtin_enemies().keys() {
                enemies.insert(id.to_string(), api::builtin_enemy(id)?);
            }
            let dump = RosterDump { fighters, enemies };
            if pretty {
                println!("{}", serde_json::to_string_pretty(&dump)?);
            } else {
                println!("{}", serde_json::to_string(&dump)?);
            }
        }
    }
    Ok(())
}

/// How far a battle got before control returned to the caller.
enum FightEnd {
    Victory,
    Quit,
}

fn run_campaign(campaign: CampaignConfig, seed: Option<u64>, pacing: Pacing) -> anyhow::Result<()> {
    let mut fighter = match (&campaign.fighter_id, &campaign.fighter_path) {
        (_, Some(path)) => {
            let path = Path::new(path);
            api::parse_fighter(&read_text_auto(path)?, path)?
        }
        (Some(id), None) => api::builtin_fighter(id)?,
        (None, None) => api::builtin_fighter("adventurer")?,
    };

    let total = campaign.stages.len();
    for (i, stage) in campaign.stages.iter().enumerate() {
        let enemy = stage_enemy(stage, i)?;
        match run_fight(
            &mut fighter,
            enemy,
            stage.reward.clone(),
            stage.upgrade_all,
            roller_for(seed, i as u64),
            pacing,
        )? {
            FightEnd::Victory => {}
            FightEnd::Quit => return Ok(()),
        }
        if i + 1 < total {
            pacing.say("\nYou press on...");
        }
    }
    pacing.say(&format!(
        "\nYour journey is complete. You stand victorious with {} health left.",
        fighter.hp
    ));
    Ok(())
}

fn stage_enemy(stage: &StageConfig, index: usize) -> anyhow::Result<Enemy> {
    match (&stage.enemy_id, &stage.enemy_path) {
        (_, Some(path)) => {
            let path = Path::new(path);
            api::parse_enemy(&read_text_auto(path)?, path)
        }
        (Some(id), None) => api::builtin_enemy(id),
        (None, None) => anyhow::bail!("stage {} has no enemy", index + 1),
    }
}

fn run_fight(
    fighter: &mut Fighter,
    enemy: Enemy,
    reward: Option<Move>,
    upgrade_all: bool,
    roller: Roller,
    pacing: Pacing,
) -> anyhow::Result<FightEnd> {
    pacing.pause(1);
    println!();
    pacing.say(&format!(
        "The battle is {} against {}.",
        fighter.name, enemy.name
    ));
    pacing.say(&format!("The Fighter has {} health.", fighter.hp));
    pacing.say(&format!("The Enemy has {} health.", enemy.hp));
    pacing.say("Type \"help\" for a list of all available commands.\n");

    let mut engine = BattleEngine::new(fighter, enemy, reward, upgrade_all, roller);
    loop {
        let Some(input) = read_command()? else {
            return Ok(FightEnd::Quit);
        };
        println!();
        match input.as_str() {
            "" => {}
            "quit" => return Ok(FightEnd::Quit),
            "help" => {
                println!("help -> Shows this menu");
                println!("moves -> Shows your available moves to use in battle");
                println!("quit -> Quits the game (progress not saved)");
                println!("enemymoves -> Shows the enemy's available moves to use in battle");
            }
            "moves" | "move" => {
                for (name, value) in engine.fighter().moves.iter() {
                    pacing.say(&format!(
                        "{} ({} {})",
                        title_case(name),
                        value.abs(),
                        Polarity::of(value).label()
                    ));
                }
            }
            "enemymoves" | "enemymove" => {
                for (name, value) in engine.enemy().moves.iter() {
                    pacing.say(&format!("{} ({} damage)", title_case(name), value));
                }
            }
            name => match engine.submit_move(name) {
                Err(MoveError::UnknownMove(name)) => println!(
                    "Invalid move: {}. This attack is not in the move list.\n",
                    title_case(&name)
                ),
                Err(MoveError::RepeatedMove(name)) => println!(
                    "Invalid move: {}. You cannot use the same move twice in a row.\n",
                    title_case(&name)
                ),
                Ok(report) => {
                    narrate_round(&report, pacing);
                    match report.outcome {
                        Outcome::Won => {
                            if let Some(grant) = &report.reward {
                                announce_reward(grant);
                            }
                            return Ok(FightEnd::Victory);
                        }
                        Outcome::Lost => fall(pacing),
                        Outcome::Continuing => {}
                    }
                }
            },
        }
    }
}

fn narrate_round(report: &RoundReport, pacing: Pacing) {
    for line in report.lines() {
        println!("{line}");
        pacing.pause(2);
    }
}

fn announce_reward(grant: &RewardGrant) {
    match grant {
        RewardGrant::UpgradeAll { bonus } => {
            println!("Congratulations! All your abilities have been upgraded by {bonus}!");
        }
        RewardGrant::NewAbility { name, value } => {
            println!(
                "Congratulations! You have gained a new ability as a reward: {} ({} {})",
                title_case(name),
                value.abs(),
                Polarity::of(*value).label()
            );
        }
    }
}

/// A loss ends the whole run, not just the current match.
fn fall(pacing: Pacing) -> ! {
    pacing.pause(3);
    println!("Sorry adventurer, but you have perished. Your journey ends here....");
    pacing.pause(2);
    println!("...");
    pacing.pause(3);
    println!("...");
    pacing.pause(4);
    println!("...");
    pacing.pause(5);
    process::exit(1);
}

/// Prompt for one lowercased command; `None` on end of input.
fn read_command() -> anyhow::Result<Option<String>> {
    print!("  :");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

#[derive(Copy, Clone)]
struct Pacing {
    delay: Duration,
}

impl Pacing {
    fn new(ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(ms),
        }
    }

    fn pause(&self, beats: u32) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay * beats);
        }
    }

    fn say(&self, text: &str) {
        println!("{text}");
        self.pause(1);
    }
}

fn roller_for(seed: Option<u64>, offset: u64) -> Roller {
    match seed {
        Some(seed) => Roller::from_seed(seed.wrapping_add(offset)),
        None => Roller::from_entropy(),
    }
}

fn resolve_fighter(source: &str) -> anyhow::Result<Fighter> {
    let path = Path::new(source);
    if path.exists() {
        api::parse_fighter(&read_text_auto(path)?, path)
    } else {
        api::builtin_fighter(source)
    }
}

fn resolve_enemy(source: &str) -> anyhow::Result<Enemy> {
    let path = Path::new(source);
    if path.exists() {
        api::parse_enemy(&read_text_auto(path)?, path)
    } else {
        api::builtin_enemy(source)
    }
}

fn parse_reward(source: &str) -> anyhow::Result<Move> {
    let Some((name, value)) = source.rsplit_once(':') else {
        anyhow::bail!("reward must be name:value, got: {}", source);
    };
    let value: i32 = value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("reward value must be an integer, got: {}", source))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("reward needs a name, got: {}", source);
    }
    Ok(Move::new(name.to_lowercase(), value))
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes =
        fs::read(path).map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}
