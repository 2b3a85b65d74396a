use super::*;
use crate::{Event, EventBus};

impl DuelState {
    /// Advances the mover's phase. Refresh and draw take no input, so a
    /// single call from either lands in main 1 after untapping and the
    /// forced draw; battle exits through the damage step (damage resolves
    /// inside `use_avatar_skill`, the step itself takes no input); main 2
    /// exits through end-of-turn into the opponent's main 1.
    pub fn advance_phase(&mut self, seat: Seat, events: &mut EventBus) -> Result<(), DuelError> {
        self.ensure_actionable(seat)?;
        match self.state.phase {
            Phase::Refresh | Phase::Draw => self.run_turn_opening(events),
            Phase::Main1 => {
                self.enter_phase(Phase::Battle, events);
                Ok(())
            }
            Phase::Battle => {
                self.enter_phase(Phase::Damage, events);
                self.enter_phase(Phase::Main2, events);
                Ok(())
            }
            Phase::Damage => {
                self.enter_phase(Phase::Main2, events);
                Ok(())
            }
            Phase::Main2 => {
                self.enter_phase(Phase::End, events);
                self.end_turn(events)
            }
            Phase::End => self.end_turn(events),
        }
    }

    fn enter_phase(&mut self, phase: Phase, events: &mut EventBus) {
        self.state.phase = phase;
        events.push(Event::PhaseEntered {
            seat: self.state.current,
            phase,
        });
    }

    fn run_turn_opening(&mut self, events: &mut EventBus) -> Result<(), DuelError> {
        let seat = self.state.current;
        if self.state.phase == Phase::Refresh {
            if let Some(active) = self.state.player_mut(seat).active.as_mut() {
                if active.tapped {
                    active.tapped = false;
                    let card = active.card;
                    events.push(Event::AvatarRefreshed { seat, card });
                }
            }
            self.enter_phase(Phase::Draw, events);
        }
        self.draw_card(seat, events)?;
        self.enter_phase(Phase::Main1, events);
        Ok(())
    }

    fn end_turn(&mut self, events: &mut EventBus) -> Result<(), DuelError> {
        // Hand-size cleanup would run here; the rules impose no maximum.
        let next = self.state.current.opponent();
        self.state.current = next;
        // One turn per full round: the counter moves when control returns
        // to the seat that opened the match.
        if next == Seat::Home {
            self.state.turn += 1;
        }
        events.push(Event::TurnStarted {
            turn: self.state.turn,
            seat: next,
        });
        self.enter_phase(Phase::Refresh, events);
        self.run_turn_opening(events)
    }
}
