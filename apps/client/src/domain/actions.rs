//! Opaque action keys offered by the server and their descriptions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Action key the server accepts for "play every card in hand".
pub const PLAY_ALL_KEY: &str = "all";

/// Key to description mapping in the order the server enumerated it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionMap {
    entries: IndexMap<String, String>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, description: impl Into<String>) {
        self.entries.insert(key.into(), description.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl<K: Into<String>, D: Into<String>> FromIterator<(K, D)> for ActionMap {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut map = ActionMap::new();
        for (key, description) in iter {
            map.insert(key, description);
        }
        map
    }
}

/// Currently legal actions, refreshed on every `choose_action` event.
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    actions: ActionMap,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_all(&mut self, actions: ActionMap) {
        self.actions = actions;
    }

    pub fn clear(&mut self) {
        self.actions = ActionMap::new();
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// First key, in server enumeration order, whose description matches.
    pub fn key_for_description(&self, description: &str) -> Option<&str> {
        let mut matches = self
            .actions
            .iter()
            .filter(|(_, d)| *d == description)
            .map(|(k, _)| k);
        let first = matches.next()?;
        if matches.next().is_some() {
            warn!(
                description,
                "[ACTIONS] description is ambiguous; only the first key is reachable"
            );
        }
        Some(first)
    }

    /// Every key whose description matches, in enumeration order.
    pub fn keys_for_description(&self, description: &str) -> Vec<&str> {
        self.actions
            .iter()
            .filter(|(_, d)| *d == description)
            .map(|(k, _)| k)
            .collect()
    }

    pub fn buy_key(&self, card_name: &str) -> Option<&str> {
        self.key_for_description(&format!("buy {card_name}"))
    }

    pub fn play_key(&self, card_name: &str) -> Option<&str> {
        self.key_for_description(&format!("play {card_name}"))
    }

    /// Descriptions shared by more than one key.
    pub fn ambiguous_descriptions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut ambiguous: Vec<&str> = Vec::new();
        for (_, description) in self.actions.iter() {
            if seen.contains(&description) {
                if !ambiguous.contains(&description) {
                    ambiguous.push(description);
                }
            } else {
                seen.push(description);
            }
        }
        ambiguous
    }
}
