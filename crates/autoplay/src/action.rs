use avarena_core::Target;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AutoAction {
    Advance,
    PlayCard { index: usize, target: Option<Target> },
    SetEnergy { index: usize },
    SwitchAvatar { index: usize },
    UseSkill { slot: usize, target: Target },
    EndTurn,
}

impl AutoAction {
    pub fn stable_key(&self) -> String {
        match self {
            Self::Advance => "advance".to_string(),
            Self::PlayCard { index, target } => format!("play:{index}:{target:?}"),
            Self::SetEnergy { index } => format!("energy:{index}"),
            Self::SwitchAvatar { index } => format!("switch:{index}"),
            Self::UseSkill { slot, target } => format!("skill:{slot}:{target:?}"),
            Self::EndTurn => "end_turn".to_string(),
        }
    }

    pub fn short_label(&self) -> String {
        match self {
            Self::Advance => "advance".to_string(),
            Self::PlayCard { index, .. } => format!("play {index}"),
            Self::SetEnergy { index } => format!("energy {index}"),
            Self::SwitchAvatar { index } => format!("switch {index}"),
            Self::UseSkill { slot, .. } => format!("skill {slot}"),
            Self::EndTurn => "end turn".to_string(),
        }
    }
}
