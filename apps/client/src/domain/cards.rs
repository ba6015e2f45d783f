//! Card representation as sent by the server.
//!
//! The server sends a card either as its bare name or as a record carrying at
//! least a `name`. Everything that needs a name goes through [`Card::name`].

use serde::{Deserialize, Serialize};

/// Card that is always purchasable and never appears in the shared trade pile.
pub const EXPLORER: &str = "Explorer";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Card {
    NameOnly(String),
    Described(CardRecord),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<String>,
}

impl Card {
    pub fn named(name: impl Into<String>) -> Self {
        Card::NameOnly(name.into())
    }

    /// Canonical name regardless of wire form.
    pub fn name(&self) -> &str {
        match self {
            Card::NameOnly(name) => name,
            Card::Described(record) => &record.name,
        }
    }

    pub fn cost(&self) -> Option<i32> {
        match self {
            Card::NameOnly(_) => None,
            Card::Described(record) => record.cost,
        }
    }
}

impl From<&str> for Card {
    fn from(name: &str) -> Self {
        Card::named(name)
    }
}

/// Art path for playable and tradeable cards.
pub fn card_art_path(name: &str) -> String {
    format!("/card/{name}")
}

/// Art path for bases and outposts.
pub fn base_art_path(name: &str) -> String {
    format!("/base/{name}")
}
