//! Multi-pile card selection for `choose_piles` requests.
//!
//! A session is opened from a [`PileConstraint`] and the current snapshot,
//! accepts toggles on individual card slots, and reports the chosen pile and
//! card names exactly once through its completion callback.
//!
//! Selection is exclusive to one pile at a time. Marks left behind in a pile
//! that is no longer active stay marked but do not count: after every toggle
//! the count is re-derived from the marks inside the active pile.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::snapshot::{GameStateSnapshot, PileId};
use crate::error::ClientError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection session is closed")]
    Closed,
    #[error("no card {name:?} in pile {pile}")]
    UnknownCard { pile: PileId, name: String },
    #[error("{selected} selected, at least {min} required")]
    BelowMinimum { selected: usize, min: usize },
}

#[derive(Deserialize)]
struct RawPileConstraint {
    action: String,
    min: u32,
    max: u32,
    piles: Vec<PileId>,
}

/// Server request to pick between `min` and `max` cards from one of `piles`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPileConstraint")]
pub struct PileConstraint {
    pub action: String,
    pub min: usize,
    pub max: usize,
    pub piles: Vec<PileId>,
}

impl PileConstraint {
    pub fn new(
        action: impl Into<String>,
        min: usize,
        max: usize,
        piles: impl IntoIterator<Item = PileId>,
    ) -> Result<Self, ClientError> {
        if max < min {
            return Err(ClientError::protocol(format!(
                "choose_piles max {max} is below min {min}"
            )));
        }
        Ok(Self {
            action: action.into(),
            min,
            max,
            piles: piles.into_iter().collect(),
        })
    }
}

impl TryFrom<RawPileConstraint> for PileConstraint {
    type Error = String;

    fn try_from(raw: RawPileConstraint) -> Result<Self, Self::Error> {
        Self::new(raw.action, raw.min as usize, raw.max as usize, raw.piles)
            .map_err(|e| e.to_string())
    }
}

/// One presentable card position inside a candidate pile.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub pile: PileId,
    pub index: usize,
}

impl SlotRef {
    pub fn new(pile: impl Into<PileId>, index: usize) -> Self {
        Self {
            pile: pile.into(),
            index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardSlot {
    pub name: String,
    pub selected: bool,
}

/// A pile large enough to satisfy the constraint's minimum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateGroup {
    pub pile: PileId,
    pub slots: Vec<CardSlot>,
}

impl CandidateGroup {
    fn marked(&self) -> usize {
        self.slots.iter().filter(|s| s.selected).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPhase {
    Open,
    Submitting,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
    /// Maximum reached; the card stays unselected.
    Rejected,
}

/// Result handed to the completion callback and returned from `submit`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub pile: Option<PileId>,
    pub cards: Vec<String>,
}

pub type OnComplete = Box<dyn FnOnce(&SelectionOutcome) -> Result<(), ClientError> + Send>;

pub struct SelectionSession {
    constraint: PileConstraint,
    groups: Vec<CandidateGroup>,
    active_pile: Option<PileId>,
    selected_count: usize,
    phase: SelectionPhase,
    on_complete: Option<OnComplete>,
}

impl fmt::Debug for SelectionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionSession")
            .field("constraint", &self.constraint)
            .field("groups", &self.groups)
            .field("active_pile", &self.active_pile)
            .field("selected_count", &self.selected_count)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl SelectionSession {
    pub fn open(
        constraint: PileConstraint,
        snapshot: &GameStateSnapshot,
        on_complete: OnComplete,
    ) -> Self {
        let mut groups = Vec::with_capacity(constraint.piles.len());
        for pile in &constraint.piles {
            let Some(cards) = snapshot.resolve_pile(pile) else {
                warn!(pile = %pile, "[SELECTION] requested pile not present in snapshot");
                continue;
            };
            if cards.len() < constraint.min {
                debug!(
                    pile = %pile,
                    len = cards.len(),
                    min = constraint.min,
                    "[SELECTION] pile too small, omitted"
                );
                continue;
            }
            groups.push(CandidateGroup {
                pile: pile.clone(),
                slots: cards
                    .iter()
                    .map(|card| CardSlot {
                        name: card.name().to_string(),
                        selected: false,
                    })
                    .collect(),
            });
        }

        Self {
            constraint,
            groups,
            active_pile: None,
            selected_count: 0,
            phase: SelectionPhase::Open,
            on_complete: Some(on_complete),
        }
    }

    pub fn constraint(&self) -> &PileConstraint {
        &self.constraint
    }

    pub fn groups(&self) -> &[CandidateGroup] {
        &self.groups
    }

    pub fn candidate_piles(&self) -> impl Iterator<Item = &PileId> {
        self.groups.iter().map(|g| &g.pile)
    }

    pub fn active_pile(&self) -> Option<&PileId> {
        self.active_pile.as_ref()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn is_selected(&self, slot: &SlotRef) -> bool {
        self.slot(slot).is_some_and(|s| s.selected)
    }

    /// Whether the "done" affordance is available.
    pub fn done_enabled(&self) -> bool {
        self.phase == SelectionPhase::Open && self.selected_count >= self.constraint.min
    }

    fn group_index(&self, pile: &PileId) -> Option<usize> {
        self.groups.iter().position(|g| &g.pile == pile)
    }

    fn slot(&self, slot: &SlotRef) -> Option<&CardSlot> {
        let group = self.group_index(&slot.pile)?;
        self.groups[group].slots.get(slot.index)
    }

    fn recount(&mut self) {
        if let Some(active) = &self.active_pile {
            self.selected_count = self
                .group_index(active)
                .map(|g| self.groups[g].marked())
                .unwrap_or(0);
        }
    }

    pub fn toggle(&mut self, slot: &SlotRef) -> Result<Toggle, SelectionError> {
        if self.phase != SelectionPhase::Open {
            return Err(SelectionError::Closed);
        }
        let unknown = || SelectionError::UnknownCard {
            pile: slot.pile.clone(),
            name: format!("#{}", slot.index),
        };
        let group = self.group_index(&slot.pile).ok_or_else(unknown)?;
        if slot.index >= self.groups[group].slots.len() {
            return Err(unknown());
        }

        let outcome = if self.groups[group].slots[slot.index].selected {
            self.groups[group].slots[slot.index].selected = false;
            self.selected_count = self.selected_count.saturating_sub(1);
            Toggle::Deselected
        } else if self.selected_count < self.constraint.max {
            self.groups[group].slots[slot.index].selected = true;
            self.active_pile = Some(slot.pile.clone());
            Toggle::Selected
        } else {
            Toggle::Rejected
        };

        self.recount();
        debug_assert!(self.selected_count <= self.constraint.max);
        debug!(
            pile = %slot.pile,
            index = slot.index,
            ?outcome,
            count = self.selected_count,
            "[SELECTION] toggle"
        );
        Ok(outcome)
    }

    /// Toggle by card name: the first slot with that name whose state would
    /// change is the one affected.
    pub fn toggle_named(&mut self, pile: &PileId, name: &str) -> Result<Toggle, SelectionError> {
        let group = self
            .group_index(pile)
            .ok_or_else(|| SelectionError::UnknownCard {
                pile: pile.clone(),
                name: name.to_string(),
            })?;
        let slots = &self.groups[group].slots;
        let index = slots
            .iter()
            .position(|s| s.name == name && !s.selected)
            .or_else(|| slots.iter().position(|s| s.name == name))
            .ok_or_else(|| SelectionError::UnknownCard {
                pile: pile.clone(),
                name: name.to_string(),
            })?;
        self.toggle(&SlotRef::new(pile.clone(), index))
    }

    fn outcome(&self) -> SelectionOutcome {
        let cards = self
            .active_pile
            .as_ref()
            .and_then(|active| self.group_index(active))
            .map(|g| {
                self.groups[g]
                    .slots
                    .iter()
                    .filter(|s| s.selected)
                    .map(|s| s.name.clone())
                    .collect()
            })
            .unwrap_or_default();
        SelectionOutcome {
            pile: self.active_pile.clone(),
            cards,
        }
    }

    /// Collect the active pile's marks, hand them to the completion callback
    /// and close the session.
    pub fn submit(&mut self) -> Result<SelectionOutcome, ClientError> {
        if self.phase != SelectionPhase::Open {
            return Err(SelectionError::Closed.into());
        }
        if !self.done_enabled() {
            return Err(SelectionError::BelowMinimum {
                selected: self.selected_count,
                min: self.constraint.min,
            }
            .into());
        }

        self.phase = SelectionPhase::Submitting;
        let outcome = self.outcome();
        let delivered = match self.on_complete.take() {
            Some(callback) => callback(&outcome),
            None => Ok(()),
        };
        self.phase = SelectionPhase::Closed;
        delivered?;

        debug!(
            pile = ?outcome.pile,
            cards = outcome.cards.len(),
            "[SELECTION] submitted"
        );
        Ok(outcome)
    }
}
