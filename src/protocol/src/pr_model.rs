// pr_model: physical model for rendering

use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct PrParticle {
	pub pos: [f32; 2],
}

/// One line segment to draw, as two particle keys.
#[derive(Clone, Debug)]
pub struct PrSpring {
	pub id: i32,
	pub particles: Vec<usize>,
}

/// Per-frame snapshot handed to the presentation layer. Particle keys are
/// stable across frames; a node spliced into two ropes appears once.
#[derive(Clone, Debug, Default)]
pub struct PrModel {
	pub particles: HashMap<usize, PrParticle>,
	pub springs: Vec<PrSpring>,
}
