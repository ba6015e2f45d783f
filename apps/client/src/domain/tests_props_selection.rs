//! Property tests for the pile selection state machine (pure domain).
//!
//! Contract:
//! - 0 <= selected_count <= max after any toggle sequence
//! - done is enabled iff selected_count >= min
//! - piles shorter than min never become candidates
//! - selected_count always equals the marks inside the active pile
//! - the submitted outcome survives the wire encoding unchanged

use proptest::prelude::*;

use crate::domain::cards::Card;
use crate::domain::selection::{PileConstraint, SelectionOutcome, SelectionSession, SlotRef};
use crate::domain::snapshot::{GameStateSnapshot, PileId};
use crate::domain::test_prelude;
use crate::protocol::ClientEvent;

const PILES: [&str; 3] = ["hand", "discard_pile", "trade_pile"];

fn pile_cards() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("(Scout|Viper|Explorer|Cutter|Ram)", 0..6)
}

fn snapshot_from(hand: &[String], discard: &[String], trade: &[String]) -> GameStateSnapshot {
    let to_cards = |names: &[String]| names.iter().map(|n| Card::named(n.as_str())).collect();
    let mut snap = GameStateSnapshot::default();
    snap.player.hand = to_cards(hand);
    snap.player.discard_pile = to_cards(discard);
    snap.trade_pile = to_cards(trade);
    snap
}

fn bounds() -> impl Strategy<Value = (usize, usize)> {
    (0usize..4).prop_flat_map(|min| (Just(min), min..min + 4))
}

fn open(snap: &GameStateSnapshot, min: usize, max: usize) -> SelectionSession {
    let constraint =
        PileConstraint::new("scrap", min, max, PILES.iter().map(|p| PileId::from(*p))).unwrap();
    SelectionSession::open(constraint, snap, Box::new(|_| Ok(())))
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: count bounds, done-enabled rule and rescan-derived count hold
    /// after every toggle.
    #[test]
    fn prop_toggle_sequences_keep_invariants(
        hand in pile_cards(),
        discard in pile_cards(),
        trade in pile_cards(),
        (min, max) in bounds(),
        toggles in prop::collection::vec((0usize..3, 0usize..6), 0..40),
    ) {
        let snap = snapshot_from(&hand, &discard, &trade);
        let mut session = open(&snap, min, max);

        for (pile, index) in toggles {
            let slot = SlotRef::new(PILES[pile], index);
            let _ = session.toggle(&slot);

            let count = session.selected_count();
            prop_assert!(count <= max, "count {count} above max {max}");
            prop_assert_eq!(session.done_enabled(), count >= min);

            let rescanned = session
                .active_pile()
                .and_then(|active| session.groups().iter().find(|g| &g.pile == active))
                .map(|g| g.slots.iter().filter(|s| s.selected).count())
                .unwrap_or(0);
            prop_assert_eq!(count, rescanned);
        }
    }

    /// Property: a pile with fewer cards than min is never a candidate.
    #[test]
    fn prop_small_piles_never_offered(
        hand in pile_cards(),
        discard in pile_cards(),
        trade in pile_cards(),
        (min, max) in bounds(),
    ) {
        let snap = snapshot_from(&hand, &discard, &trade);
        let session = open(&snap, min, max);

        for group in session.groups() {
            prop_assert!(group.slots.len() >= min);
        }
        for pile in PILES {
            let len = snap.resolve_pile(&PileId::from(pile)).map_or(0, <[Card]>::len);
            let offered = session.candidate_piles().any(|p| p.as_str() == pile);
            prop_assert_eq!(offered, len >= min);
        }
    }

    /// Property: the submitted outcome decodes back to the same pair.
    #[test]
    fn prop_submitted_outcome_round_trips(
        hand in pile_cards(),
        discard in pile_cards(),
        toggles in prop::collection::vec((0usize..2, 0usize..6), 0..12),
    ) {
        let snap = snapshot_from(&hand, &discard, &[]);
        let mut session = open(&snap, 0, 3);
        for (pile, index) in toggles {
            let _ = session.toggle(&SlotRef::new(PILES[pile], index));
        }

        let outcome = session.submit().unwrap();
        let event = ClientEvent::ChoosePiles {
            pile: outcome.pile.clone(),
            cards: outcome.cards.clone(),
        };
        let wire = event.encode().unwrap();
        let decoded = ClientEvent::decode(&wire).unwrap();
        let ClientEvent::ChoosePiles { pile, cards } = decoded else {
            return Err(TestCaseError::fail("expected choose_piles"));
        };
        prop_assert_eq!(SelectionOutcome { pile, cards }, outcome);
    }
}
