use rand::Rng;

use crate::segment::project;
use crate::V2;
use msd::rope::Rope;

/// A drifting insect. Horizontal motion is steady, vertical motion is a
/// random flutter; touching any web strand stops it for good.
pub struct Bug {
	pub pos: V2,
	x_vel: f32,
	y_vel: f32,
	pub radius: f32,
	caught: bool,
}

impl Bug {
	pub fn new<R: Rng>(x: f32, y: f32, direc: f32, rng: &mut R) -> Self {
		Self {
			pos: V2::new(x, y),
			x_vel: rng.gen_range(1..=3) as f32 * direc,
			y_vel: 0.,
			radius: 3.,
			caught: false,
		}
	}

	pub fn caught(&self) -> bool {
		self.caught
	}

	pub fn update<R: Rng>(&mut self, rng: &mut R) {
		if self.caught {
			return;
		}
		self.pos[0] += self.x_vel;
		self.pos[1] -= self.y_vel;
		// flutter, steered back when it drifts too fast
		if self.y_vel < -5. {
			self.y_vel += rng.gen_range(-1..=8) as f32;
		} else if self.y_vel > 5. {
			self.y_vel += rng.gen_range(-8..=1) as f32;
		} else {
			self.y_vel += rng.gen_range(-1..=1) as f32;
		}
	}

	/// Caught when within the bug's radius of any strand segment. Returns
	/// true only on the tick the bug gets stuck.
	pub fn check_web(&mut self, ropes: &[Rope]) -> bool {
		if self.caught {
			return false;
		}
		for rope in ropes {
			for spring in rope.springs() {
				let (a, b) = spring.endpoints();
				let (_, dist) = project(self.pos, a, b);
				if dist <= self.radius {
					self.x_vel = 0.;
					self.y_vel = 0.;
					self.caught = true;
					return true;
				}
			}
		}
		false
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use msd::rope::RopeBuilder;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	#[test]
	fn test_bug_sticks_to_strand() {
		let mut rng = StdRng::seed_from_u64(1);
		let rope = RopeBuilder::new(5).build(0., 0., 100., 0.).unwrap();
		let mut bug = Bug::new(50., 2., 1., &mut rng);
		assert!(bug.check_web(std::slice::from_ref(&rope)));
		assert!(bug.caught());
		// already stuck: no second capture, no further motion
		assert!(!bug.check_web(std::slice::from_ref(&rope)));
		let before = bug.pos;
		bug.update(&mut rng);
		assert_eq!(bug.pos, before);
	}

	#[test]
	fn test_bug_misses_distant_web() {
		let mut rng = StdRng::seed_from_u64(2);
		let rope = RopeBuilder::new(5).build(0., 0., 100., 0.).unwrap();
		let mut bug = Bug::new(50., 30., 1., &mut rng);
		assert!(!bug.check_web(std::slice::from_ref(&rope)));
		assert!(!bug.caught());
	}

	#[test]
	fn test_bug_drifts_horizontally() {
		let mut rng = StdRng::seed_from_u64(3);
		let mut bug = Bug::new(0., 0., 1., &mut rng);
		let x0 = bug.pos[0];
		for _ in 0..10 {
			bug.update(&mut rng);
		}
		assert!(bug.pos[0] >= x0 + 10.);
	}
}
