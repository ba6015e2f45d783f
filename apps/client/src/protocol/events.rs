use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::actions::ActionMap;
use crate::domain::selection::PileConstraint;
use crate::domain::snapshot::{GameStateSnapshot, PileId};
use crate::error::ClientError;
use crate::protocol::envelope::{decode_envelope, encode_envelope};

pub const GAME_STATE: &str = "game_state";
pub const STATUS: &str = "status";
pub const CHOOSE_ACTION: &str = "choose_action";
pub const CHOOSE_PILES: &str = "choose_piles";
pub const PLAYER_WON: &str = "player_won";
pub const PLAYER_LOST: &str = "player_lost";
pub const START_GAME: &str = "start_game";

/// Events sent by the game engine.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    GameState(GameStateSnapshot),
    Status(String),
    ChooseAction(ActionMap),
    ChoosePiles(PileConstraint),
    PlayerWon(GameStateSnapshot),
    PlayerLost(GameStateSnapshot),
    Unknown { name: String },
}

fn payload<T: for<'de> Deserialize<'de>>(name: &str, value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::malformed(format!("{name} payload: {e}")))
}

impl ServerEvent {
    pub fn name(&self) -> &str {
        match self {
            ServerEvent::GameState(_) => GAME_STATE,
            ServerEvent::Status(_) => STATUS,
            ServerEvent::ChooseAction(_) => CHOOSE_ACTION,
            ServerEvent::ChoosePiles(_) => CHOOSE_PILES,
            ServerEvent::PlayerWon(_) => PLAYER_WON,
            ServerEvent::PlayerLost(_) => PLAYER_LOST,
            ServerEvent::Unknown { name } => name,
        }
    }

    pub fn decode(raw: &str) -> Result<Self, ClientError> {
        let (name, value) = decode_envelope(raw)?;
        Self::from_parts(name, value)
    }

    pub fn from_parts(name: String, value: Value) -> Result<Self, ClientError> {
        let event = match name.as_str() {
            GAME_STATE => ServerEvent::GameState(payload(&name, value)?),
            STATUS => ServerEvent::Status(match value {
                Value::String(text) => text,
                other => other.to_string(),
            }),
            CHOOSE_ACTION => ServerEvent::ChooseAction(payload(&name, value)?),
            CHOOSE_PILES => ServerEvent::ChoosePiles(payload(&name, value)?),
            PLAYER_WON => ServerEvent::PlayerWon(payload(&name, value)?),
            PLAYER_LOST => ServerEvent::PlayerLost(payload(&name, value)?),
            _ => ServerEvent::Unknown { name },
        };
        Ok(event)
    }

    pub fn encode(&self) -> Result<String, ClientError> {
        match self {
            ServerEvent::GameState(snap)
            | ServerEvent::PlayerWon(snap)
            | ServerEvent::PlayerLost(snap) => encode_envelope(self.name(), snap),
            ServerEvent::Status(text) => encode_envelope(STATUS, text),
            ServerEvent::ChooseAction(actions) => encode_envelope(CHOOSE_ACTION, actions),
            ServerEvent::ChoosePiles(constraint) => encode_envelope(CHOOSE_PILES, constraint),
            ServerEvent::Unknown { name } => encode_envelope(name, &Value::Null),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ChooseActionPayload {
    action: String,
}

#[derive(Serialize, Deserialize)]
struct ChoosePilesPayload {
    pile: Option<PileId>,
    cards: Vec<String>,
}

/// Events sent by this client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    StartGame,
    ChooseAction {
        action: String,
    },
    ChoosePiles {
        pile: Option<PileId>,
        cards: Vec<String>,
    },
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::StartGame => START_GAME,
            ClientEvent::ChooseAction { .. } => CHOOSE_ACTION,
            ClientEvent::ChoosePiles { .. } => CHOOSE_PILES,
        }
    }

    pub fn encode(&self) -> Result<String, ClientError> {
        match self {
            ClientEvent::StartGame => encode_envelope(START_GAME, &json!({})),
            ClientEvent::ChooseAction { action } => encode_envelope(
                CHOOSE_ACTION,
                &ChooseActionPayload {
                    action: action.clone(),
                },
            ),
            ClientEvent::ChoosePiles { pile, cards } => encode_envelope(
                CHOOSE_PILES,
                &ChoosePilesPayload {
                    pile: pile.clone(),
                    cards: cards.clone(),
                },
            ),
        }
    }

    /// Server-side view of a client frame.
    pub fn decode(raw: &str) -> Result<Self, ClientError> {
        let (name, value) = decode_envelope(raw)?;
        match name.as_str() {
            START_GAME => Ok(ClientEvent::StartGame),
            CHOOSE_ACTION => {
                let ChooseActionPayload { action } = payload(&name, value)?;
                Ok(ClientEvent::ChooseAction { action })
            }
            CHOOSE_PILES => {
                let ChoosePilesPayload { pile, cards } = payload(&name, value)?;
                Ok(ClientEvent::ChoosePiles { pile, cards })
            }
            other => Err(ClientError::protocol(format!(
                "unknown client event {other:?}"
            ))),
        }
    }
}
