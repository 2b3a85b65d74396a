use crate::{CardId, RngState};
use serde::{Deserialize, Serialize};

/// Ordered draw stack. The last element is the top of the deck.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardId>,
}

impl Deck {
    pub fn from_list(cards: Vec<CardId>) -> Self {
        Self { cards }
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.cards);
    }

    pub fn draw_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    pub fn put_on_top(&mut self, card: CardId) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }
}
