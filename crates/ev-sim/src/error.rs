use ev_charge::ChargeError;
use ev_core::{EvError, Tick};
use ev_fleet::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] EvError),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Charge(#[from] ChargeError),

    #[error("invariant violated at {tick}: {detail}")]
    InvariantViolation { tick: Tick, detail: String },
}

pub type SimResult<T> = Result<T, SimError>;
