use crate::particle::{pref_id, PRef};
use crate::V2;
use protocol::pr_model::PrSpring;

/// Damped linear spring between two particle handles. The spring never owns
/// the particles; splicing inserts into node lists without touching the
/// handles, so these stay valid for the life of the rope.
#[derive(Debug)]
pub struct Spring {
	ps: [PRef; 2],
	l0: f32,
	k: f32,
	friction: f32,
}

impl Spring {
	pub fn new(p1: PRef, p2: PRef) -> Self {
		Self {
			ps: [p1, p2],
			l0: 0.75,
			k: 300.,
			friction: 50.,
		}
	}

	pub fn with_rest_length(mut self, l0: f32) -> Self {
		self.l0 = l0;
		self
	}

	pub fn with_stiffness(mut self, k: f32) -> Self {
		self.k = k;
		self
	}

	pub fn with_friction(mut self, friction: f32) -> Self {
		self.friction = friction;
		self
	}

	pub fn ps(&self) -> &[PRef; 2] {
		&self.ps
	}

	pub fn endpoints(&self) -> (V2, V2) {
		(
			self.ps[0].read().unwrap().get_pos(),
			self.ps[1].read().unwrap().get_pos(),
		)
	}

	pub fn render(&self, id: i32) -> PrSpring {
		PrSpring {
			id,
			particles: vec![pref_id(&self.ps[0]), pref_id(&self.ps[1])],
		}
	}

	/// Accumulate the restoring and damping forces onto both endpoints.
	/// X and Y are independent scalar laws sharing k and friction, not one
	/// vector law. A zero-length spring applies nothing.
	pub fn solve(&self) {
		let (pos1, vel1) = {
			let p = self.ps[0].read().unwrap();
			(p.get_pos(), p.get_vel())
		};
		let (pos2, vel2) = {
			let p = self.ps[1].read().unwrap();
			(p.get_pos(), p.get_vel())
		};
		let dx = pos2[0] - pos1[0];
		let dy = pos2[1] - pos1[1];
		let dist = (dx * dx + dy * dy).sqrt();
		if dist == 0f32 {
			return;
		}
		let fy = -(dy / dist) * (dist - self.l0) * self.k
			+ (vel1[1] - vel2[1]) * self.friction;
		let fx = -(dx / dist) * (dist - self.l0) * self.k
			+ (vel1[0] - vel2[0]) * self.friction;
		let f = V2::new(fx, fy);
		self.ps[0].write().unwrap().apply_force(-f);
		self.ps[1].write().unwrap().apply_force(f);
	}
}
