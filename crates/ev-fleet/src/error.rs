use ev_core::EvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("vehicle spec `{name}`: {reason}")]
    InvalidSpec { name: String, reason: String },

    #[error("invalid battery parameters: {0}")]
    InvalidBattery(String),

    #[error("fault probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("catalog must contain at least one vehicle category")]
    EmptyCatalog,

    #[error("duplicate vehicle category `{0}`")]
    DuplicateCategory(String),

    #[error(transparent)]
    Core(#[from] EvError),
}

pub type FleetResult<T> = Result<T, FleetError>;
