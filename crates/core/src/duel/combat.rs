use super::*;
use crate::{evaluate_skill_damage, Event, EventBus, WinReason};

impl DuelState {
    /// Uses the active avatar's skill against a target avatar. Damage is
    /// evaluated once, before any state moves; the attacker taps whether or
    /// not the defender survives. Returns the damage dealt.
    pub fn use_avatar_skill(
        &mut self,
        seat: Seat,
        slot: usize,
        target: Target,
        events: &mut EventBus,
    ) -> Result<i64, DuelError> {
        self.ensure_actionable(seat)?;
        self.ensure_phase(&[Phase::Main1, Phase::Battle, Phase::Main2])?;
        let Some(attacker) = self.active_avatar(seat) else {
            return Err(DuelError::NoActiveAvatar);
        };
        if attacker.tapped {
            return Err(DuelError::AlreadyTapped);
        }
        let attacker_card = attacker.card;
        let skill = self
            .def(attacker_card)?
            .skill(slot)
            .cloned()
            .ok_or(DuelError::SkillUnavailable)?;
        let target_seat = self.target_seat(seat, target);
        if self.active_avatar(target_seat).is_none() {
            return Err(DuelError::InvalidTarget);
        }
        let need = skill.cost.len();
        let have = self.state.player(seat).energy.len();
        if have < need {
            return Err(DuelError::InsufficientEnergy { need, have });
        }

        let damage = {
            let owner = self.state.player(seat);
            let defender = self.state.player(target_seat).active.as_ref();
            let Some(attacker) = owner.active.as_ref() else {
                return Err(DuelError::NoActiveAvatar);
            };
            evaluate_skill_damage(&self.catalog, attacker, &skill, owner, defender)
        };

        self.pay_energy(seat, need, events)?;
        if let Some(active) = self.state.player_mut(seat).active.as_mut() {
            active.tapped = true;
        }
        events.push(Event::SkillUsed {
            seat,
            card: attacker_card,
            skill: skill.name,
            damage,
        });
        self.apply_damage_to_active(target_seat, damage, events);
        Ok(damage)
    }

    /// Adds damage counters to a seat's active avatar and resolves defeat
    /// immediately if the total reaches effective health (printed health
    /// plus shield). Negative amounts never land.
    pub(super) fn apply_damage_to_active(&mut self, seat: Seat, amount: i64, events: &mut EventBus) {
        let amount = amount.max(0);
        let Some((card, shield, total)) = self
            .state
            .player(seat)
            .active
            .as_ref()
            .map(|a| (a.card, a.shield, a.damage + amount))
        else {
            return;
        };
        let printed = self
            .catalog
            .card(card)
            .and_then(|def| def.avatar_health())
            .unwrap_or(0);
        if let Some(active) = self.state.player_mut(seat).active.as_mut() {
            active.damage = total;
        }
        if total >= printed + shield {
            self.resolve_defeat(seat, events);
        }
    }

    pub(super) fn heal_active(&mut self, seat: Seat, amount: i64) {
        if let Some(active) = self.state.player_mut(seat).active.as_mut() {
            active.damage = (active.damage - amount.max(0)).max(0);
        }
    }

    /// Defeat: card and attachments go to the owner's graveyard, one life
    /// card moves into the owner's hand. With the life stack already empty
    /// the match ends instead.
    fn resolve_defeat(&mut self, seat: Seat, events: &mut EventBus) {
        let player = self.state.player_mut(seat);
        let Some(defeated) = player.active.take() else {
            return;
        };
        player.graveyard.push(defeated.card);
        player.graveyard.extend(defeated.attached.iter().copied());
        events.push(Event::AvatarDefeated {
            seat,
            card: defeated.card,
        });
        let player = self.state.player_mut(seat);
        match player.life.pop() {
            Some(life_card) => {
                player.hand.push(life_card);
                let life_left = player.life.len();
                events.push(Event::LifeCardTaken { seat, life_left });
            }
            None => {
                let winner = seat.opponent();
                self.state.winner = Some(winner);
                events.push(Event::MatchEnded {
                    winner,
                    reason: WinReason::LifeDepleted,
                });
            }
        }
    }
}
