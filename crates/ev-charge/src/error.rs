use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChargeError {
    #[error("a charging station needs at least one charger")]
    NoChargers,

    #[error("charger count {0} exceeds the ChargerId range")]
    TooManyChargers(usize),
}

pub type ChargeResult<T> = Result<T, ChargeError>;
