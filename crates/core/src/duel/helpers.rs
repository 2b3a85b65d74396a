use super::*;
use crate::{AvatarInstance, CardDef, CardId, Event, EventBus};

impl DuelState {
    pub(super) fn ensure_actionable(&self, seat: Seat) -> Result<(), DuelError> {
        if self.state.winner.is_some() {
            return Err(DuelError::MatchOver);
        }
        if seat != self.state.current {
            return Err(DuelError::NotYourTurn(seat));
        }
        Ok(())
    }

    pub(super) fn ensure_phase(&self, allowed: &[Phase]) -> Result<(), DuelError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(DuelError::IllegalPhase(self.state.phase))
        }
    }

    pub(super) fn def(&self, id: CardId) -> Result<&CardDef, DuelError> {
        self.catalog.card(id).ok_or(DuelError::UnknownCard(id))
    }

    pub(super) fn hand_card(&self, seat: Seat, index: usize) -> Result<CardId, DuelError> {
        self.state
            .player(seat)
            .hand
            .get(index)
            .copied()
            .ok_or(DuelError::InvalidIndex)
    }

    pub(super) fn remove_hand_card(&mut self, seat: Seat, index: usize) -> CardId {
        self.state.player_mut(seat).hand.remove(index)
    }

    /// Checks the full cost is available before moving anything, then pays
    /// it FIFO from the energy pile into the graveyard. Atomic by
    /// construction: the check precedes the first move.
    pub(super) fn pay_energy(
        &mut self,
        seat: Seat,
        need: usize,
        events: &mut EventBus,
    ) -> Result<(), DuelError> {
        let player = self.state.player_mut(seat);
        let have = player.energy.len();
        if have < need {
            return Err(DuelError::InsufficientEnergy { need, have });
        }
        if need == 0 {
            return Ok(());
        }
        let spent: Vec<CardId> = player.energy.drain(..need).collect();
        player.graveyard.extend(spent);
        events.push(Event::EnergySpent { seat, count: need });
        Ok(())
    }

    pub(super) fn target_seat(&self, seat: Seat, target: Target) -> Seat {
        match target {
            Target::OwnAvatar => seat,
            Target::OpponentAvatar => seat.opponent(),
        }
    }

    pub(super) fn active_avatar(&self, seat: Seat) -> Option<&AvatarInstance> {
        self.state.player(seat).active.as_ref()
    }
}
