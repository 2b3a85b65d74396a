use crate::{CardDef, CardId};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate card id {0}")]
    DuplicateId(CardId),
}

/// Immutable card definitions, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<CardDef>,
    by_id: HashMap<CardId, usize>,
}

impl Catalog {
    pub fn from_cards(cards: Vec<CardDef>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(cards.len());
        for (idx, card) in cards.iter().enumerate() {
            if by_id.insert(card.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(card.id));
            }
        }
        Ok(Self { cards, by_id })
    }

    pub fn card(&self, id: CardId) -> Option<&CardDef> {
        self.by_id.get(&id).map(|idx| &self.cards[*idx])
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn cards(&self) -> &[CardDef] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
