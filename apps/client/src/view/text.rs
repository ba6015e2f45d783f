//! Plain-text renderer for terminals.

use std::io::{self, Write};

use tracing::warn;

use crate::domain::actions::ActionRegistry;
use crate::domain::cards::{base_art_path, card_art_path, Card};
use crate::domain::selection::SelectionSession;
use crate::domain::snapshot::{GameStateSnapshot, PlayerRecord};
use crate::view::elements::ElementId;
use crate::view::{ActionButton, GameOutcome, GameView};

pub struct TextView<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TextView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: String) {
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %err, "[TEXT VIEW] failed to write output");
        }
    }
}

fn stats(p: &PlayerRecord) -> String {
    format!(
        "HP: {}  TRADE: {}  DMG: {}  DISCARD: {}",
        p.health, p.trade, p.damage, p.discard
    )
}

fn stations(p: &PlayerRecord) -> String {
    let names: Vec<String> = p
        .stations()
        .map(|c| format!("{} ({})", c.name(), base_art_path(c.name())))
        .collect();
    names.join(", ")
}

fn card_line(index: usize, card: &Card, affordance: Option<&str>) -> String {
    let name = card.name();
    match affordance {
        Some(verb) => format!("  [{index}] {name} ({}) <{verb} {index}>\n", card_art_path(name)),
        None => format!("  [{index}] {name} ({})\n", card_art_path(name)),
    }
}

pub fn render_snapshot(snapshot: &GameStateSnapshot, actions: &ActionRegistry) -> String {
    let mut text = String::new();
    let other = &snapshot.other_player;
    let me = &snapshot.player;

    text.push_str(&format!("== opponent == {}\n", stats(other)));
    text.push_str(&format!("  bases: {}\n", stations(other)));

    text.push_str("== trade row ==\n");
    for (index, card) in snapshot.trade_row().iter().enumerate() {
        let buyable = actions.buy_key(card.name()).map(|_| "buy");
        text.push_str(&card_line(index, card, buyable));
    }

    text.push_str(&format!("== you == {}\n", stats(me)));
    text.push_str(&format!("  bases: {}\n", stations(me)));
    let in_play: Vec<&str> = me.in_play.iter().map(Card::name).collect();
    text.push_str(&format!("  in play: {}\n", in_play.join(", ")));
    text.push_str("  hand:\n");
    for (index, card) in me.hand.iter().enumerate() {
        let playable = actions.play_key(card.name()).map(|_| "play");
        text.push_str(&card_line(index, card, playable));
    }
    text
}

pub fn render_selection(selection: &SelectionSession) -> String {
    let constraint = selection.constraint();
    let mut text = format!(
        "== {} {}/{}-{} ==",
        constraint.action,
        selection.selected_count(),
        constraint.min,
        constraint.max
    );
    if selection.done_enabled() {
        text.push_str(" <done>");
    }
    text.push('\n');
    for group in selection.groups() {
        text.push_str(&format!("  {}:\n", group.pile));
        for (index, slot) in group.slots.iter().enumerate() {
            let mark = if slot.selected { "x" } else { " " };
            text.push_str(&format!(
                "    [{mark}] {} <pick {} {index}>\n",
                slot.name, group.pile
            ));
        }
    }
    text
}

impl<W: Write + Send> GameView for TextView<W> {
    fn render_state(&mut self, snapshot: &GameStateSnapshot, actions: &ActionRegistry) {
        self.emit(render_snapshot(snapshot, actions));
    }

    fn show_status(&mut self, message: &str) {
        self.emit(format!("-- {message}\n"));
    }

    fn show_actions(&mut self, buttons: &[ActionButton]) {
        if buttons.is_empty() {
            return;
        }
        let labels: Vec<String> = buttons
            .iter()
            .map(|b| match &b.element {
                ElementId::ActionButton(key) => {
                    format!("<action {key}> {}", b.label)
                }
                _ => format!("<all> {}", b.label),
            })
            .collect();
        self.emit(format!("actions: {}\n", labels.join(" | ")));
    }

    fn show_selection(&mut self, selection: &SelectionSession) {
        self.emit(render_selection(selection));
    }

    fn hide_selection(&mut self) {}

    fn game_over(&mut self, outcome: GameOutcome) {
        self.emit(format!("*** {} <new> ***\n", outcome.notice()));
    }
}

impl Default for TextView<io::Stdout> {
    fn default() -> Self {
        Self::new(io::stdout())
    }
}
