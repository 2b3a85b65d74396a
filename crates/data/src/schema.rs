use avarena_core::CardId;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CardsFile {
    pub cards: Vec<RawCard>,
}

#[derive(Debug, Deserialize)]
pub struct RawCard {
    pub id: CardId,
    pub name: String,
    pub element: String,
    pub category: String,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub tribe: Option<String>,
    #[serde(default)]
    pub health: Option<i64>,
    #[serde(default)]
    pub skills: Vec<RawSkill>,
    #[serde(default)]
    pub cost: Vec<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub passive: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSkill {
    pub name: String,
    #[serde(default)]
    pub cost: Vec<String>,
    #[serde(default)]
    pub damage: i64,
    #[serde(default)]
    pub effect: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DecksFile {
    pub decks: Vec<RawDeck>,
}

#[derive(Debug, Deserialize)]
pub struct RawDeck {
    pub id: String,
    pub name: String,
    pub cards: Vec<DeckEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DeckEntry {
    pub card: CardId,
    pub count: u32,
}

/// A resolved deck list ready to hand to the engine.
#[derive(Debug, Clone)]
pub struct DeckList {
    pub id: String,
    pub name: String,
    pub cards: Vec<CardId>,
}
