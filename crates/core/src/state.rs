use crate::{CardId, CounterKind, Deck};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Refresh,
    Draw,
    Main1,
    Battle,
    Damage,
    Main2,
    End,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Seat {
    Home,
    Away,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::Home => Seat::Away,
            Seat::Away => Seat::Home,
        }
    }
}

/// An avatar card in play, wrapping its catalog card with combat state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvatarInstance {
    pub card: CardId,
    pub tapped: bool,
    pub damage: i64,
    pub shield: i64,
    #[serde(default)]
    pub bleed: u32,
    #[serde(default)]
    pub poison: u32,
    #[serde(default)]
    pub burn: u32,
    #[serde(default)]
    pub attached: Vec<CardId>,
}

impl AvatarInstance {
    pub fn new(card: CardId) -> Self {
        Self {
            card,
            tapped: false,
            damage: 0,
            shield: 0,
            bleed: 0,
            poison: 0,
            burn: 0,
            attached: Vec::new(),
        }
    }

    pub fn counter(&self, kind: CounterKind) -> u32 {
        match kind {
            CounterKind::Bleed => self.bleed,
            CounterKind::Poison => self.poison,
            CounterKind::Burn => self.burn,
        }
    }

    pub fn add_counter(&mut self, kind: CounterKind, amount: u32) {
        let slot = match kind {
            CounterKind::Bleed => &mut self.bleed,
            CounterKind::Poison => &mut self.poison,
            CounterKind::Burn => &mut self.burn,
        };
        *slot = slot.saturating_add(amount);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Legacy scalar kept for snapshots; life cards are the loss condition.
    pub health: i64,
    pub deck: Deck,
    pub hand: Vec<CardId>,
    pub active: Option<AvatarInstance>,
    pub reserves: Vec<AvatarInstance>,
    pub field: Vec<CardId>,
    pub life: Vec<CardId>,
    pub energy: Vec<CardId>,
    pub graveyard: Vec<CardId>,
}

impl PlayerState {
    pub fn new(deck: Deck) -> Self {
        Self {
            health: 20,
            deck,
            hand: Vec::new(),
            active: None,
            reserves: Vec::new(),
            field: Vec::new(),
            life: Vec::new(),
            energy: Vec::new(),
            graveyard: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub home: PlayerState,
    pub away: PlayerState,
    pub current: Seat,
    pub phase: Phase,
    pub turn: u32,
    pub winner: Option<Seat>,
}

impl MatchState {
    pub fn new(home: PlayerState, away: PlayerState) -> Self {
        Self {
            home,
            away,
            current: Seat::Home,
            phase: Phase::Refresh,
            turn: 1,
            winner: None,
        }
    }

    pub fn player(&self, seat: Seat) -> &PlayerState {
        match seat {
            Seat::Home => &self.home,
            Seat::Away => &self.away,
        }
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut PlayerState {
        match seat {
            Seat::Home => &mut self.home,
            Seat::Away => &mut self.away,
        }
    }
}
