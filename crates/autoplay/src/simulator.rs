use crate::{AutoAction, AutoplayError, Policy};
use avarena_core::{DuelError, DuelState, EventBus, Phase, Seat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepRecord {
    pub seat: Seat,
    pub action: AutoAction,
}

/// Serializes a recorded turn trace for inspection or replay tooling.
pub fn trace_to_json(trace: &[StepRecord]) -> Result<String, AutoplayError> {
    Ok(serde_json::to_string_pretty(trace)?)
}

/// Drives whole turns through the core operation set, synchronously and
/// deterministically. Pacing belongs to the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    pub max_actions_per_turn: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            max_actions_per_turn: 32,
        }
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action. `EmptyResourceLoss` comes back as an error from
    /// the engine but with the winner already set; callers treat it as
    /// terminal rather than illegal.
    pub fn apply(
        &self,
        duel: &mut DuelState,
        seat: Seat,
        action: &AutoAction,
        events: &mut EventBus,
    ) -> Result<(), DuelError> {
        match action {
            AutoAction::Advance => duel.advance_phase(seat, events),
            AutoAction::PlayCard { index, target } => {
                duel.play_card(seat, *index, *target, events)
            }
            AutoAction::SetEnergy { index } => duel.set_energy_card(seat, *index, events),
            AutoAction::SwitchAvatar { index } => duel.switch_avatar(seat, *index, events),
            AutoAction::UseSkill { slot, target } => duel
                .use_avatar_skill(seat, *slot, *target, events)
                .map(|_| ()),
            AutoAction::EndTurn => self.pass_turn(duel, seat, events),
        }
    }

    fn pass_turn(
        &self,
        duel: &mut DuelState,
        seat: Seat,
        events: &mut EventBus,
    ) -> Result<(), DuelError> {
        while duel.state.winner.is_none() && duel.state.current == seat {
            duel.advance_phase(seat, events)?;
        }
        Ok(())
    }

    /// Runs one full turn for the current seat under `policy`, recording
    /// each decision in `trace`.
    pub fn run_turn(
        &self,
        duel: &mut DuelState,
        policy: &mut dyn Policy,
        events: &mut EventBus,
        trace: &mut Vec<StepRecord>,
    ) -> Result<(), AutoplayError> {
        let seat = duel.state.current;
        if matches!(duel.state.phase, Phase::Refresh | Phase::Draw) {
            match duel.advance_phase(seat, events) {
                Ok(()) | Err(DuelError::EmptyResourceLoss) => {}
                Err(source) => {
                    return Err(AutoplayError::IllegalAction {
                        action: AutoAction::Advance.short_label(),
                        source,
                    })
                }
            }
        }
        let mut budget = self.max_actions_per_turn;
        while duel.state.winner.is_none() && duel.state.current == seat {
            if budget == 0 {
                return Err(AutoplayError::TurnBudgetExceeded(self.max_actions_per_turn));
            }
            budget -= 1;
            let action = policy.decide(duel, seat);
            trace.push(StepRecord {
                seat,
                action: action.clone(),
            });
            match self.apply(duel, seat, &action, events) {
                Ok(()) | Err(DuelError::EmptyResourceLoss) => {}
                Err(source) => {
                    return Err(AutoplayError::IllegalAction {
                        action: action.short_label(),
                        source,
                    })
                }
            }
        }
        Ok(())
    }

    /// Plays both seats until the match is decided or `max_rounds` full
    /// rounds pass. Returns the winner, if any.
    pub fn run_match(
        &self,
        duel: &mut DuelState,
        home: &mut dyn Policy,
        away: &mut dyn Policy,
        max_rounds: u32,
        events: &mut EventBus,
        trace: &mut Vec<StepRecord>,
    ) -> Result<Option<Seat>, AutoplayError> {
        while duel.state.winner.is_none() && duel.state.turn <= max_rounds {
            let policy: &mut dyn Policy = match duel.state.current {
                Seat::Home => &mut *home,
                Seat::Away => &mut *away,
            };
            self.run_turn(duel, policy, events, trace)?;
        }
        Ok(duel.state.winner)
    }
}
