use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named ability offered to the fighter as a victory reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    /// Positive deals damage; negative reads as a heal (see `MoveCatalog`).
    pub value: i32,
}

impl Move {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// How a move's value reads when shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Damage,
    Heal,
}

impl Polarity {
    pub fn of(value: i32) -> Self {
        if value >= 0 {
            Polarity::Damage
        } else {
            Polarity::Heal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Polarity::Damage => "damage",
            Polarity::Heal => "heal",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("a move catalog needs at least one entry")]
    Empty,
    #[error("duplicate move name: {0}")]
    DuplicateName(String),
}

/// Ordered move-name → effect-value mapping.
///
/// Order is part of the contract: the enemy selects its moves by position.
/// Name lookups are case-insensitive against the stored keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveCatalog {
    entries: IndexMap<String, i32>,
}

impl MoveCatalog {
    pub fn from_entries<S, I>(entries: I) -> Result<Self, CatalogError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, i32)>,
    {
        let mut map = IndexMap::new();
        for (name, value) in entries {
            let name = name.into();
            if map.keys().any(|k: &String| k.eq_ignore_ascii_case(&name)) {
                return Err(CatalogError::DuplicateName(name));
            }
            map.insert(name, value);
        }
        if map.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries: map })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Effect value for `name`, matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<i32> {
        self.entry(name).map(|(_, value)| value)
    }

    /// The stored spelling of `name`, matched case-insensitively.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|(key, _)| key)
    }

    pub fn entry(&self, name: &str) -> Option<(&str, i32)> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, value)| (key.as_str(), *value))
    }

    /// Entry at `index` in catalog order.
    pub fn get_index(&self, index: usize) -> Option<(&str, i32)> {
        self.entries
            .get_index(index)
            .map(|(key, value)| (key.as_str(), *value))
    }

    /// Entry at `index` in catalog order. Panics if `index >= len()`.
    pub fn at(&self, index: usize) -> (&str, i32) {
        let (key, value) = self.entries.get_index(index).expect("move index in range");
        (key.as_str(), *value)
    }

    /// Overwrite the value of an existing (case-insensitively matched) entry,
    /// or append a new one at the end.
    pub fn set(&mut self, name: &str, value: i32) {
        let key = self
            .entries
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .cloned()
            .unwrap_or_else(|| name.to_string());
        self.entries.insert(key, value);
    }

    /// Grow every entry's magnitude by `bonus`, preserving sign.
    pub fn upgrade_all(&mut self, bonus: i32) {
        for value in self.entries.values_mut() {
            if *value >= 0 {
                *value += bonus;
            } else {
                *value -= bonus;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

/// Capitalize each whitespace-separated word, for player-facing display.
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
