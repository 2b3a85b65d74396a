use super::*;
use crate::{CardId, Deck, Event, EventBus, PlayerState};

impl DuelState {
    /// Builds a fresh match: validate and shuffle both deck lists, deal
    /// life cards and opening hands. The match sits at the home seat's
    /// refresh phase; the first `advance_phase` runs refresh and the
    /// forced draw.
    pub fn new(
        catalog: Catalog,
        home_deck: Vec<CardId>,
        away_deck: Vec<CardId>,
        seed: u64,
        events: &mut EventBus,
    ) -> Result<Self, DuelError> {
        let mut rng = RngState::from_seed(seed);
        let home = build_player(&catalog, home_deck, &mut rng)?;
        let away = build_player(&catalog, away_deck, &mut rng)?;
        events.push(Event::MatchStarted { seed });
        Ok(Self {
            catalog,
            rng,
            state: MatchState::new(home, away),
        })
    }
}

fn build_player(
    catalog: &Catalog,
    list: Vec<CardId>,
    rng: &mut RngState,
) -> Result<PlayerState, DuelError> {
    if list.len() < MIN_DECK_SIZE {
        return Err(DuelError::InvalidDeck(list.len()));
    }
    for id in &list {
        if !catalog.contains(*id) {
            return Err(DuelError::UnknownCard(*id));
        }
    }
    let mut deck = Deck::from_list(list);
    deck.shuffle(rng);

    let mut player = PlayerState::new(deck);
    for _ in 0..LIFE_CARDS {
        if let Some(card) = player.deck.draw_top() {
            player.life.push(card);
        }
    }
    for _ in 0..OPENING_HAND {
        if let Some(card) = player.deck.draw_top() {
            player.hand.push(card);
        }
    }
    Ok(player)
}
