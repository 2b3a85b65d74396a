use super::*;
use crate::{AvatarInstance, CardKind, Event, EventBus, ItemEffect, SpellEffect, WinReason};

impl DuelState {
    /// The forced draw. An empty deck recycles one life card into the deck
    /// first; empty deck plus empty life stack loses the match on the spot.
    pub fn draw_card(&mut self, seat: Seat, events: &mut EventBus) -> Result<(), DuelError> {
        self.ensure_actionable(seat)?;
        self.ensure_phase(&[Phase::Draw])?;
        if self.state.player(seat).deck.is_empty() {
            let player = self.state.player_mut(seat);
            match player.life.pop() {
                Some(card) => {
                    player.deck.put_on_top(card);
                    let life_left = player.life.len();
                    events.push(Event::LifeCardRecycled { seat, life_left });
                }
                None => {
                    let winner = seat.opponent();
                    self.state.winner = Some(winner);
                    events.push(Event::MatchEnded {
                        winner,
                        reason: WinReason::DeckedOut,
                    });
                    return Err(DuelError::EmptyResourceLoss);
                }
            }
        }
        let player = self.state.player_mut(seat);
        if let Some(card) = player.deck.draw_top() {
            player.hand.push(card);
            let deck_left = player.deck.len();
            events.push(Event::CardDrawn { seat, deck_left });
        }
        Ok(())
    }

    /// Plays a card from hand. Validation (phase window, cost, target)
    /// happens before the first mutation; a rejected play leaves every
    /// zone untouched.
    pub fn play_card(
        &mut self,
        seat: Seat,
        hand_index: usize,
        target: Option<Target>,
        events: &mut EventBus,
    ) -> Result<(), DuelError> {
        self.ensure_actionable(seat)?;
        let card = self.hand_card(seat, hand_index)?;
        let def = self.def(card)?;
        let kind = def.kind.clone();
        let cost = def.play_cost().len();
        // Quick-spells keep the battle window open; everything else is a
        // main-phase play.
        match kind {
            CardKind::QuickSpell { .. } => {
                self.ensure_phase(&[Phase::Main1, Phase::Battle, Phase::Main2])?
            }
            _ => self.ensure_phase(&[Phase::Main1, Phase::Main2])?,
        }

        match kind {
            CardKind::Avatar { .. } => {
                self.remove_hand_card(seat, hand_index);
                let instance = AvatarInstance::new(card);
                let player = self.state.player_mut(seat);
                if player.active.is_none() {
                    player.active = Some(instance);
                } else {
                    player.reserves.push(instance);
                }
                events.push(Event::CardPlayed { seat, card });
            }
            CardKind::Field { .. } => {
                self.pay_energy(seat, cost, events)?;
                self.remove_hand_card(seat, hand_index);
                self.state.player_mut(seat).field.push(card);
                events.push(Event::CardPlayed { seat, card });
            }
            CardKind::Equipment { .. } | CardKind::RitualArmor { .. } => {
                if target != Some(Target::OwnAvatar) {
                    return Err(DuelError::InvalidTarget);
                }
                if self.active_avatar(seat).is_none() {
                    return Err(DuelError::NoActiveAvatar);
                }
                self.pay_energy(seat, cost, events)?;
                self.remove_hand_card(seat, hand_index);
                let armor = matches!(kind, CardKind::RitualArmor { .. });
                if let Some(active) = self.state.player_mut(seat).active.as_mut() {
                    active.attached.push(card);
                    if armor {
                        active.shield += RITUAL_ARMOR_SHIELD;
                    }
                    let onto = active.card;
                    events.push(Event::CardAttached { seat, card, onto });
                }
            }
            CardKind::Spell { effect, .. } | CardKind::QuickSpell { effect, .. } => {
                let target = target.ok_or(DuelError::InvalidTarget)?;
                let target_seat = self.target_seat(seat, target);
                if self.active_avatar(target_seat).is_none() {
                    return Err(DuelError::InvalidTarget);
                }
                self.pay_energy(seat, cost, events)?;
                self.remove_hand_card(seat, hand_index);
                self.state.player_mut(seat).graveyard.push(card);
                let amount = match effect {
                    SpellEffect::Damage(n) => n,
                    SpellEffect::Heal(n) => n,
                };
                events.push(Event::SpellResolved {
                    seat,
                    card,
                    target: target_seat,
                    amount,
                });
                match effect {
                    SpellEffect::Damage(n) => self.apply_damage_to_active(target_seat, n, events),
                    SpellEffect::Heal(n) => self.heal_active(target_seat, n),
                }
            }
            CardKind::Item { effect, .. } => {
                self.pay_energy(seat, cost, events)?;
                self.remove_hand_card(seat, hand_index);
                let player = self.state.player_mut(seat);
                match effect {
                    ItemEffect::AddEnergy => player.energy.push(card),
                    ItemEffect::Inert => player.graveyard.push(card),
                }
                events.push(Event::ItemUsed { seat, card });
            }
        }
        Ok(())
    }

    /// Spends an avatar card from hand as fuel: it joins the energy pile
    /// unmodified.
    pub fn set_energy_card(
        &mut self,
        seat: Seat,
        hand_index: usize,
        events: &mut EventBus,
    ) -> Result<(), DuelError> {
        self.ensure_actionable(seat)?;
        self.ensure_phase(&[Phase::Main1, Phase::Main2])?;
        let card = self.hand_card(seat, hand_index)?;
        if !self.def(card)?.is_avatar() {
            return Err(DuelError::InvalidTarget);
        }
        self.remove_hand_card(seat, hand_index);
        self.state.player_mut(seat).energy.push(card);
        events.push(Event::EnergySet { seat, card });
        Ok(())
    }

    /// Swaps the active avatar with a reserve for one energy. The previous
    /// active avatar, if any, joins the reserves.
    pub fn switch_avatar(
        &mut self,
        seat: Seat,
        reserve_index: usize,
        events: &mut EventBus,
    ) -> Result<(), DuelError> {
        self.ensure_actionable(seat)?;
        self.ensure_phase(&[Phase::Main1, Phase::Main2])?;
        if self.state.player(seat).reserves.get(reserve_index).is_none() {
            return Err(DuelError::InvalidIndex);
        }
        self.pay_energy(seat, SWITCH_COST, events)?;
        let player = self.state.player_mut(seat);
        let incoming = player.reserves.remove(reserve_index);
        let card = incoming.card;
        if let Some(previous) = player.active.replace(incoming) {
            player.reserves.push(previous);
        }
        events.push(Event::AvatarSwitched { seat, card });
        Ok(())
    }
}
