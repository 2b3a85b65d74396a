use crate::{AvatarInstance, Catalog, CounterKind, Element, PlayerState, Skill};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BoostFilter {
    Element(Element),
    Tribe(String),
}

/// "active avatar has <element|tribe> X, attack damage get +Y"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassiveBoost {
    pub filter: BoostFilter,
    pub bonus: i64,
}

/// Closed set of conditional damage rules, compiled from card effect text
/// once at load time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DamageRule {
    BecomeOnDiscard { value: i64 },
    BecomeIfOpponentCounter { counter: CounterKind, value: i64 },
    BecomeIfOpponentElement { element: Element, value: i64 },
    BecomeIfOpponentTribe { tribe: String, value: i64 },
    BecomeIfEquipped { value: i64 },
    AddIfSelfCounter { counter: CounterKind, bonus: i64 },
}

/// Computes the final damage of a skill use. Pure: reads state, mutates
/// nothing. Called exactly once per skill use, before any counters move.
///
/// "Become" rules are checked in a fixed precedence order and the first
/// match wins; self-counter bonuses and passive boosts are additive on top.
pub fn evaluate_skill_damage(
    catalog: &Catalog,
    attacker: &AvatarInstance,
    skill: &Skill,
    owner: &PlayerState,
    defender: Option<&AvatarInstance>,
) -> i64 {
    let mut damage = skill.base_damage;

    if let Some(value) = first_become_value(catalog, attacker, skill, owner, defender) {
        damage = value;
    }

    for rule in &skill.rules {
        if let DamageRule::AddIfSelfCounter { counter, bonus } = rule {
            if attacker.counter(*counter) > 0 {
                damage += bonus;
            }
        }
    }

    damage += passive_bonus(catalog, attacker, owner);
    damage.max(0)
}

fn first_become_value(
    catalog: &Catalog,
    attacker: &AvatarInstance,
    skill: &Skill,
    owner: &PlayerState,
    defender: Option<&AvatarInstance>,
) -> Option<i64> {
    let defender_def = defender.and_then(|inst| catalog.card(inst.card));

    // Any card in the owner's graveyard counts as "a discard occurred".
    if !owner.graveyard.is_empty() {
        for rule in &skill.rules {
            if let DamageRule::BecomeOnDiscard { value } = rule {
                return Some(*value);
            }
        }
    }
    if let Some(inst) = defender {
        for rule in &skill.rules {
            if let DamageRule::BecomeIfOpponentCounter { counter, value } = rule {
                if inst.counter(*counter) > 0 {
                    return Some(*value);
                }
            }
        }
    }
    if let Some(def) = defender_def {
        for rule in &skill.rules {
            if let DamageRule::BecomeIfOpponentElement { element, value } = rule {
                if def.element == *element {
                    return Some(*value);
                }
            }
        }
        for rule in &skill.rules {
            if let DamageRule::BecomeIfOpponentTribe { tribe, value } = rule {
                if def.avatar_tribe() == Some(tribe.as_str()) {
                    return Some(*value);
                }
            }
        }
    }
    if !attacker.attached.is_empty() {
        for rule in &skill.rules {
            if let DamageRule::BecomeIfEquipped { value } = rule {
                return Some(*value);
            }
        }
    }
    None
}

/// Scans the owner's hand, field cards, and the attacker's own card for
/// passive boosts matching the attacker. Stacks additively.
fn passive_bonus(catalog: &Catalog, attacker: &AvatarInstance, owner: &PlayerState) -> i64 {
    let Some(attacker_def) = catalog.card(attacker.card) else {
        return 0;
    };
    let attacker_tribe = attacker_def.avatar_tribe();

    let mut bonus = 0;
    let scanned = owner
        .hand
        .iter()
        .chain(owner.field.iter())
        .chain(std::iter::once(&attacker.card));
    for id in scanned {
        let Some(def) = catalog.card(*id) else {
            continue;
        };
        for passive in &def.passives {
            let matches = match &passive.filter {
                BoostFilter::Element(element) => attacker_def.element == *element,
                BoostFilter::Tribe(tribe) => attacker_tribe == Some(tribe.as_str()),
            };
            if matches {
                bonus += passive.bonus;
            }
        }
    }
    bonus
}
