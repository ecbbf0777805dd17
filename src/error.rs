use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsError {
    #[error("unknown query timing: {0}")]
    UnknownPhase(String),

    #[error("unknown query timing code: {0}")]
    UnknownPhaseCode(i32),
}
