use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
	#[error("rope needs at least one node, got {0}")]
	BadNodeCount(usize),

	#[error("node mass must be positive, got {0}")]
	BadMass(f32),

	#[error("rope endpoints coincide at ({0}, {1})")]
	DegenerateRope(f32, f32),
}

pub type Result<T> = std::result::Result<T, SimError>;
