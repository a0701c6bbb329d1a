use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod battle;
pub mod combatant;
pub mod content;
pub mod moves;

pub use battle::{
    BattleEngine, EnemyStrike, MoveError, Outcome, RewardGrant, RoundReport, UPGRADE_BONUS,
};
pub use combatant::{Enemy, Fighter};
pub use moves::{CatalogError, Move, MoveCatalog, Polarity, title_case};

/// Seedable source of move picks, so any battle can be replayed exactly.
pub struct Roller {
    rng: ChaCha8Rng,
}

impl Roller {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Uniform index into `0..len`. `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Install a process-wide subscriber that honors `RUST_LOG`. Safe to call
/// more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
