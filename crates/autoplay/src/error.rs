use avarena_core::DuelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("policy produced illegal action {action}: {source}")]
    IllegalAction { action: String, source: DuelError },
    #[error("turn exceeded {0} actions")]
    TurnBudgetExceeded(usize),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
