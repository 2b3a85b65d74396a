use crate::effects::{DamageRule, PassiveBoost};
use serde::{Deserialize, Serialize};

pub type CardId = u32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Element {
    Fire,
    Water,
    Ground,
    Air,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CounterKind {
    Bleed,
    Poison,
    Burn,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpellEffect {
    Damage(i64),
    Heal(i64),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ItemEffect {
    AddEnergy,
    Inert,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub name: String,
    pub cost: Vec<Element>,
    pub base_damage: i64,
    #[serde(default)]
    pub rules: Vec<DamageRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CardKind {
    Avatar {
        level: u8,
        tribe: String,
        health: i64,
        skills: Vec<Skill>,
    },
    Spell {
        cost: Vec<Element>,
        effect: SpellEffect,
    },
    QuickSpell {
        cost: Vec<Element>,
        effect: SpellEffect,
    },
    Equipment {
        cost: Vec<Element>,
    },
    RitualArmor {
        cost: Vec<Element>,
    },
    Field {
        cost: Vec<Element>,
    },
    Item {
        cost: Vec<Element>,
        effect: ItemEffect,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardDef {
    pub id: CardId,
    pub name: String,
    pub element: Element,
    pub kind: CardKind,
    #[serde(default)]
    pub passives: Vec<PassiveBoost>,
}

impl CardDef {
    pub fn is_avatar(&self) -> bool {
        matches!(self.kind, CardKind::Avatar { .. })
    }

    /// Energy cost to play this card. Avatars are free to play; they pay
    /// their way later as fuel or through skill costs.
    pub fn play_cost(&self) -> &[Element] {
        match &self.kind {
            CardKind::Avatar { .. } => &[],
            CardKind::Spell { cost, .. }
            | CardKind::QuickSpell { cost, .. }
            | CardKind::Equipment { cost }
            | CardKind::RitualArmor { cost }
            | CardKind::Field { cost }
            | CardKind::Item { cost, .. } => cost,
        }
    }

    pub fn avatar_health(&self) -> Option<i64> {
        match &self.kind {
            CardKind::Avatar { health, .. } => Some(*health),
            _ => None,
        }
    }

    pub fn avatar_tribe(&self) -> Option<&str> {
        match &self.kind {
            CardKind::Avatar { tribe, .. } => Some(tribe.as_str()),
            _ => None,
        }
    }

    pub fn skill(&self, slot: usize) -> Option<&Skill> {
        match &self.kind {
            CardKind::Avatar { skills, .. } => slot.checked_sub(1).and_then(|i| skills.get(i)),
            _ => None,
        }
    }
}
