use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::Roller;
use crate::combatant::{Enemy, Fighter};
use crate::moves::{Move, Polarity, title_case};

/// Magnitude added to every catalog entry by the upgrade-all reward.
pub const UPGRADE_BONUS: i32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    /// The name is not in the fighter's catalog.
    #[error("unknown move: {0}")]
    UnknownMove(String),
    /// The same move cannot be used twice in a row.
    #[error("move used twice in a row: {0}")]
    RepeatedMove(String),
}

/// Where the match stands after a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Continuing,
    Won,
    Lost,
}

/// The enemy's counter-move in a resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyStrike {
    pub name: String,
    pub value: i32,
    pub index: usize,
}

/// What the fighter received for winning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardGrant {
    UpgradeAll { bonus: i32 },
    NewAbility { name: String, value: i32 },
}

/// Everything the driver needs to narrate one resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub round: u32,
    /// Canonical catalog spelling of the fighter's move.
    pub fighter_move: String,
    pub fighter_value: i32,
    /// `None` when the fighter's move was lethal and no counter happened.
    pub enemy_strike: Option<EnemyStrike>,
    pub fighter_hp: i32,
    pub enemy_hp: i32,
    pub outcome: Outcome,
    pub reward: Option<RewardGrant>,
}

impl RoundReport {
    /// Render the round the way the interactive driver prints it.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![format!("Round {}", self.round)];
        out.push(format!(
            "Last Fighter Attack: {} ({} {})",
            title_case(&self.fighter_move),
            self.fighter_value.abs(),
            Polarity::of(self.fighter_value).label(),
        ));
        match &self.enemy_strike {
            Some(strike) => out.push(format!(
                "Last Enemy Attack: {} ({} damage)",
                strike.name, strike.value
            )),
            None => out.push("Last Enemy Attack: N/A".to_string()),
        }
        out.push(format!("HP: Fighter {} Enemy {}", self.fighter_hp, self.enemy_hp));
        out
    }
}

/// Orchestrates one match between a fighter and an enemy.
///
/// The fighter is borrowed mutably for the life of the engine, which keeps
/// a second in-flight battle against the same fighter from compiling. The
/// enemy is owned and discarded with the engine once the match ends.
pub struct BattleEngine<'a> {
    fighter: &'a mut Fighter,
    enemy: Enemy,
    reward: Option<Move>,
    upgrade_all: bool,
    round: u32,
    roller: Roller,
}

impl<'a> BattleEngine<'a> {
    pub fn new(
        fighter: &'a mut Fighter,
        enemy: Enemy,
        reward: Option<Move>,
        upgrade_all: bool,
        roller: Roller,
    ) -> Self {
        // A fresh match never inherits repetition state from the last one.
        fighter.last_move = None;
        Self {
            fighter,
            enemy,
            reward,
            upgrade_all,
            round: 0,
            roller,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn fighter(&self) -> &Fighter {
        self.fighter
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn is_over(&self) -> bool {
        self.enemy.hp <= 0 || self.fighter.hp <= 0
    }

    /// Pure pre-check; a failed validation leaves the engine untouched.
    pub fn validate(&self, name: &str) -> Result<(), MoveError> {
        self.checked_entry(name).map(|_| ())
    }

    fn checked_entry(&self, name: &str) -> Result<(String, i32), MoveError> {
        let Some((canonical, value)) = self.fighter.moves.entry(name) else {
            return Err(MoveError::UnknownMove(name.to_string()));
        };
        let repeated = self
            .fighter
            .last_move
            .as_deref()
            .is_some_and(|last| last.eq_ignore_ascii_case(canonical));
        if repeated {
            trace!(move_name = canonical, "rejecting repeated move");
            return Err(MoveError::RepeatedMove(canonical.to_string()));
        }
        Ok((canonical.to_string(), value))
    }

    /// Validate `name` and, if it passes, resolve a full round.
    pub fn submit_move(&mut self, name: &str) -> Result<RoundReport, MoveError> {
        let (name, value) = self.checked_entry(name)?;
        Ok(self.resolve(name, value))
    }

    fn resolve(&mut self, name: String, value: i32) -> RoundReport {
        debug_assert!(self.enemy.hp > 0, "resolve called on a finished match");
        self.round += 1;
        self.fighter.last_move = Some(name.clone());

        if value >= 0 {
            self.enemy.hp -= value;
        } else {
            // Heals are not implemented yet: a negative move costs the
            // fighter its magnitude instead of restoring it.
            self.fighter.hp -= value.abs();
        }

        if self.enemy.hp <= 0 {
            self.enemy.hp = 0;
            debug!(round = self.round, enemy = %self.enemy.name, "fighter lands the killing blow");
            // The enemy never counters a lethal blow.
            let reward = self.grant_reward();
            return RoundReport {
                round: self.round,
                fighter_move: name,
                fighter_value: value,
                enemy_strike: None,
                fighter_hp: self.fighter.hp,
                enemy_hp: 0,
                outcome: Outcome::Won,
                reward,
            };
        }

        // Uniform pick over the enemy catalog by position; repeats allowed.
        let index = self.roller.pick_index(self.enemy.moves.len());
        let (strike_name, strike_value) = self.enemy.moves.at(index);
        let strike = EnemyStrike {
            name: strike_name.to_string(),
            value: strike_value,
            index,
        };
        self.enemy.last_move_index = Some(index);
        // Enemy entries are damage by convention, applied as-is.
        self.fighter.hp -= strike_value;

        let outcome = if self.fighter.hp <= 0 {
            self.fighter.hp = 0;
            Outcome::Lost
        } else {
            Outcome::Continuing
        };
        trace!(
            round = self.round,
            fighter_hp = self.fighter.hp,
            enemy_hp = self.enemy.hp,
            ?outcome,
            "round resolved"
        );
        RoundReport {
            round: self.round,
            fighter_move: name,
            fighter_value: value,
            enemy_strike: Some(strike),
            fighter_hp: self.fighter.hp,
            enemy_hp: self.enemy.hp,
            outcome,
            reward: None,
        }
    }

    /// Runs once, on the winning round. `upgrade_all` beats a pending
    /// reward move; a zero-valued reward is a no-op.
    fn grant_reward(&mut self) -> Option<RewardGrant> {
        if self.upgrade_all {
            self.fighter.moves.upgrade_all(UPGRADE_BONUS);
            debug!(bonus = UPGRADE_BONUS, "upgraded every fighter move");
            return Some(RewardGrant::UpgradeAll {
                bonus: UPGRADE_BONUS,
            });
        }
        let reward = self.reward.take()?;
        if reward.value == 0 {
            return None;
        }
        self.fighter.moves.set(&reward.name, reward.value);
        debug!(name = %reward.name, value = reward.value, "granted new ability");
        Some(RewardGrant::NewAbility {
            name: reward.name,
            value: reward.value,
        })
    }
}
