use thiserror::Error;

use super::state::Business;

/// Why a player action was refused. Refused actions never mutate state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("unknown business id {0}")]
    UnknownJob(u8),

    #[error("not enough money: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("{0} is already on the road")]
    AlreadyRunning(Business),

    #[error("{0} is already automated")]
    AlreadyAutomated(Business),
}

pub type JobResult<T> = Result<T, JobError>;

/// Why a stored save could not be used. Callers fall back to a fresh player.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("save data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("save version {saved} is older than {min_compatible}")]
    TooOld { saved: u32, min_compatible: u32 },
}
