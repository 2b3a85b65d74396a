use crate::{Catalog, MatchState, Phase, RngState, Seat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod actions;
mod combat;
mod helpers;
mod phase;
mod setup;

/// Life cards dealt to each player at match start.
pub const LIFE_CARDS: usize = 4;
/// Opening hand size.
pub const OPENING_HAND: usize = 5;
/// Smallest legal deck list.
pub const MIN_DECK_SIZE: usize = 40;
/// Shield granted when ritual armor attaches.
pub const RITUAL_ARMOR_SHIELD: i64 = 2;
/// Energy cost of swapping the active avatar with a reserve.
pub const SWITCH_COST: usize = 1;

#[derive(Debug, Error)]
pub enum DuelError {
    #[error("match already decided")]
    MatchOver,
    #[error("not {0:?}'s turn")]
    NotYourTurn(Seat),
    #[error("illegal in phase {0:?}")]
    IllegalPhase(Phase),
    #[error("not enough energy: need {need}, have {have}")]
    InsufficientEnergy { need: usize, have: usize },
    #[error("invalid target")]
    InvalidTarget,
    #[error("no such skill")]
    SkillUnavailable,
    #[error("avatar already tapped")]
    AlreadyTapped,
    #[error("no active avatar")]
    NoActiveAvatar,
    #[error("deck and life cards both exhausted")]
    EmptyResourceLoss,
    #[error("invalid hand or reserve index")]
    InvalidIndex,
    #[error("unknown card id {0}")]
    UnknownCard(crate::CardId),
    #[error("deck has {0} cards, below the 40-card minimum")]
    InvalidDeck(usize),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Target {
    OwnAvatar,
    OpponentAvatar,
}

/// The authoritative owner of one match. All zone mutation goes through the
/// operation set on this handle; callers read `state` as a snapshot.
#[derive(Debug)]
pub struct DuelState {
    pub catalog: Catalog,
    pub rng: RngState,
    pub state: MatchState,
}
