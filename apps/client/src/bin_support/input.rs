//! Stdin command parsing for the terminal front end.
//!
//! Each line names one on-screen element, mirroring the markers printed by
//! [`TextView`](crate::view::TextView): `action <key>`, `all`, `buy <i>`,
//! `play <i>`, `pick <pile> <i>`, `done`, `new`, `quit`.

use thiserror::Error;

use crate::domain::selection::SlotRef;
use crate::view::elements::ElementId;
use crate::ws::UiInput;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a card index")]
    BadIndex(String),
}

fn index(raw: Option<&str>) -> Result<usize, ParseError> {
    let raw = raw.ok_or(ParseError::MissingArgument("index"))?;
    raw.parse()
        .map_err(|_| ParseError::BadIndex(raw.to_string()))
}

pub fn parse_line(line: &str) -> Result<UiInput, ParseError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(ParseError::Empty)?;

    let element = match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" => return Ok(UiInput::Quit),
        "action" | "a" => {
            let key = words.next().ok_or(ParseError::MissingArgument("action key"))?;
            ElementId::ActionButton(key.to_string())
        }
        "all" => ElementId::PlayAll,
        "buy" => ElementId::TradeRowCard(index(words.next())?),
        "play" => ElementId::HandCard(index(words.next())?),
        "pick" => {
            let pile = words.next().ok_or(ParseError::MissingArgument("pile"))?;
            ElementId::SelectionCard(SlotRef::new(pile, index(words.next())?))
        }
        "done" => ElementId::SelectionDone,
        "new" => ElementId::NewGame,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(UiInput::Activate(element))
}
