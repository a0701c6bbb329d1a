use serde::{Deserialize, Serialize};

use crate::moves::MoveCatalog;

/// The player-controlled combatant.
///
/// A fighter is created once and reused across sequential matches: damage
/// taken and catalog growth (rewards, upgrades) carry forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub name: String,
    pub hp: i32,
    pub moves: MoveCatalog,
    /// Canonical name of the move used last round, if any. Cleared when a
    /// new battle starts.
    #[serde(skip)]
    pub last_move: Option<String>,
}

impl Fighter {
    pub fn new(name: impl Into<String>, hp: i32, moves: MoveCatalog) -> Self {
        Self {
            name: name.into(),
            hp,
            moves,
            last_move: None,
        }
    }
}

/// A scripted combatant, created fresh for each match.
///
/// Enemies select moves by index into catalog order, so the order of
/// `moves` is observable behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub hp: i32,
    pub moves: MoveCatalog,
    /// Index of the move used last round; `None` until the first strike.
    #[serde(skip)]
    pub last_move_index: Option<usize>,
}

impl Enemy {
    pub fn new(name: impl Into<String>, hp: i32, moves: MoveCatalog) -> Self {
        Self {
            name: name.into(),
            hp,
            moves,
            last_move_index: None,
        }
    }
}
