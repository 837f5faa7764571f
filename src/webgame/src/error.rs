use thiserror::Error;

use msd::error::SimError;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
	#[error("web gesture too short to anchor")]
	GestureTooShort,

	#[error("web must start on an available branch")]
	OffBranch,

	#[error("not enough silk: need {need}, have {have}")]
	SilkExhausted { need: u32, have: u32 },

	#[error(transparent)]
	Sim(#[from] SimError),
}

pub type Result<T> = std::result::Result<T, GameError>;
