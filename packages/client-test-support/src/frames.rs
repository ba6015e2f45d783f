//! Builders for server frames as they appear on the wire.

use serde_json::{json, Value};

/// `[name, payload]` as a text frame.
pub fn frame(name: &str, payload: Value) -> String {
    json!([name, payload]).to_string()
}

/// A minimal snapshot: the local hand and discard pile, an opponent with
/// full health, and the given trade pile.
pub fn snapshot(hand: &[&str], discard: &[&str], trade: &[&str]) -> Value {
    json!({
        "player": {
            "name": "you",
            "health": 50,
            "trade": 0,
            "damage": 0,
            "discard": discard.len(),
            "hand": hand,
            "in_play": [],
            "bases": [],
            "outposts": [],
            "discard_pile": discard,
        },
        "other_player": {
            "name": "them",
            "health": 50,
            "hand": [],
            "bases": [],
            "outposts": [],
        },
        "trade_pile": trade,
    })
}

pub fn game_state(hand: &[&str], discard: &[&str], trade: &[&str]) -> String {
    frame("game_state", snapshot(hand, discard, trade))
}

/// Entries are written in the order given, the way the engine enumerates them.
pub fn choose_action(actions: &[(&str, &str)]) -> String {
    let entries: Vec<String> = actions
        .iter()
        .map(|(key, description)| format!("{}:{}", Value::from(*key), Value::from(*description)))
        .collect();
    format!(r#"["choose_action",{{{}}}]"#, entries.join(","))
}

pub fn choose_piles(action: &str, piles: &[&str], min: u32, max: u32) -> String {
    frame(
        "choose_piles",
        json!({ "action": action, "piles": piles, "min": min, "max": max }),
    )
}
