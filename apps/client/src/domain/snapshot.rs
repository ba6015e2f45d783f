//! Game state snapshot as observed by the local player.
//!
//! A snapshot is replaced wholesale on every `game_state`, `player_won` or
//! `player_lost` event; nothing here mutates one in place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, EXPLORER};

/// Identifier of a card pile, e.g. `hand`, `discard_pile` or `trade_pile`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PileId(String);

impl PileId {
    /// The shared trade pile; every other id resolves on the local player.
    pub const TRADE_PILE: &'static str = "trade_pile";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_trade_pile(&self) -> bool {
        self.0 == Self::TRADE_PILE
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub trade: i32,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub discard: i32,
    #[serde(default)]
    pub hand: Vec<Card>,
    #[serde(default)]
    pub in_play: Vec<Card>,
    #[serde(default)]
    pub bases: Vec<Card>,
    #[serde(default)]
    pub outposts: Vec<Card>,
    #[serde(default)]
    pub draw_pile: Vec<Card>,
    #[serde(default)]
    pub discard_pile: Vec<Card>,
}

impl PlayerRecord {
    pub fn pile(&self, id: &str) -> Option<&[Card]> {
        let pile = match id {
            "hand" => &self.hand,
            "in_play" => &self.in_play,
            "bases" => &self.bases,
            "outposts" => &self.outposts,
            "draw_pile" => &self.draw_pile,
            "discard_pile" => &self.discard_pile,
            _ => return None,
        };
        Some(pile.as_slice())
    }

    /// Bases followed by outposts, the order they are laid out on the table.
    pub fn stations(&self) -> impl Iterator<Item = &Card> {
        self.bases.iter().chain(self.outposts.iter())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub player: PlayerRecord,
    pub other_player: PlayerRecord,
    #[serde(default)]
    pub trade_pile: Vec<Card>,
}

impl GameStateSnapshot {
    /// Resolve a pile id against this snapshot.
    pub fn resolve_pile(&self, pile: &PileId) -> Option<&[Card]> {
        if pile.is_trade_pile() {
            Some(self.trade_pile.as_slice())
        } else {
            self.player.pile(pile.as_str())
        }
    }

    /// Trade row as presented: the always-available explorer, then the pile.
    pub fn trade_row(&self) -> Vec<Card> {
        std::iter::once(Card::named(EXPLORER))
            .chain(self.trade_pile.iter().cloned())
            .collect()
    }

    pub fn hand_is_empty(&self) -> bool {
        self.player.hand.is_empty()
    }
}
