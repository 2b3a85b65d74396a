use crate::{CardId, Phase, Seat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum WinReason {
    DeckedOut,
    LifeDepleted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    MatchStarted { seed: u64 },
    TurnStarted { turn: u32, seat: Seat },
    PhaseEntered { seat: Seat, phase: Phase },
    AvatarRefreshed { seat: Seat, card: CardId },
    CardDrawn { seat: Seat, deck_left: usize },
    LifeCardRecycled { seat: Seat, life_left: usize },
    CardPlayed { seat: Seat, card: CardId },
    CardAttached { seat: Seat, card: CardId, onto: CardId },
    SpellResolved {
        seat: Seat,
        card: CardId,
        target: Seat,
        amount: i64,
    },
    ItemUsed { seat: Seat, card: CardId },
    EnergySet { seat: Seat, card: CardId },
    EnergySpent { seat: Seat, count: usize },
    AvatarSwitched { seat: Seat, card: CardId },
    SkillUsed {
        seat: Seat,
        card: CardId,
        skill: String,
        damage: i64,
    },
    AvatarDefeated { seat: Seat, card: CardId },
    LifeCardTaken { seat: Seat, life_left: usize },
    MatchEnded { winner: Seat, reason: WinReason },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
