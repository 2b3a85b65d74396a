use crate::AutoAction;
use avarena_core::{DuelState, Phase, Seat, Target};

pub trait Policy {
    fn decide(&mut self, duel: &DuelState, seat: Seat) -> AutoAction;
}

/// The baseline scripted actor: play the first avatar in hand when the
/// active slot is empty, otherwise pass the turn.
#[derive(Debug, Default)]
pub struct ScriptedPolicy;

impl Policy for ScriptedPolicy {
    fn decide(&mut self, duel: &DuelState, seat: Seat) -> AutoAction {
        if matches!(duel.state.phase, Phase::Main1 | Phase::Main2)
            && duel.state.player(seat).active.is_none()
        {
            if let Some(index) = first_avatar_in_hand(duel, seat) {
                return AutoAction::PlayCard {
                    index,
                    target: None,
                };
            }
        }
        AutoAction::EndTurn
    }
}

/// A slightly stronger heuristic: fields an avatar, keeps the energy pile
/// fueled from spare avatars, and attacks with the strongest affordable
/// skill.
#[derive(Debug, Default)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn decide(&mut self, duel: &DuelState, seat: Seat) -> AutoAction {
        if !matches!(duel.state.phase, Phase::Main1 | Phase::Main2) {
            return AutoAction::EndTurn;
        }
        let player = duel.state.player(seat);
        if player.active.is_none() {
            if let Some(index) = first_avatar_in_hand(duel, seat) {
                return AutoAction::PlayCard {
                    index,
                    target: None,
                };
            }
            return AutoAction::EndTurn;
        }
        if let Some(slot) = best_affordable_skill(duel, seat) {
            return AutoAction::UseSkill {
                slot,
                target: Target::OpponentAvatar,
            };
        }
        if player.energy.len() < 2 {
            if let Some(index) = first_avatar_in_hand(duel, seat) {
                return AutoAction::SetEnergy { index };
            }
        }
        AutoAction::EndTurn
    }
}

fn first_avatar_in_hand(duel: &DuelState, seat: Seat) -> Option<usize> {
    duel.state
        .player(seat)
        .hand
        .iter()
        .position(|id| duel.catalog.card(*id).is_some_and(|def| def.is_avatar()))
}

fn best_affordable_skill(duel: &DuelState, seat: Seat) -> Option<usize> {
    let player = duel.state.player(seat);
    let active = player.active.as_ref()?;
    if active.tapped {
        return None;
    }
    if duel.state.player(seat.opponent()).active.is_none() {
        return None;
    }
    let def = duel.catalog.card(active.card)?;
    let have = player.energy.len();
    let mut best: Option<(usize, i64)> = None;
    for slot in 1..=2 {
        let Some(skill) = def.skill(slot) else {
            continue;
        };
        if skill.cost.len() > have {
            continue;
        }
        if best.map_or(true, |(_, damage)| skill.base_damage > damage) {
            best = Some((slot, skill.base_damage));
        }
    }
    best.map(|(slot, _)| slot)
}
