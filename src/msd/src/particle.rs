use std::sync::{Arc, RwLock};

use crate::V2;

pub type PRef = Arc<RwLock<Particle>>;

/// Render key for a particle handle. Handles are never moved or freed
/// during a session, so the address is unique and stable; a node shared by
/// two ropes maps to one key.
pub fn pref_id(p: &PRef) -> usize {
	Arc::as_ptr(p) as usize
}

#[derive(Clone, Debug)]
pub struct Particle {
	imass: f32,
	pos: V2,
	vel: V2,
	force: V2,
}

impl Particle {
	/// imass 0 pins the particle in place (anchors).
	pub fn new_ref(imass: f32, pos: V2) -> PRef {
		let result = Self {
			imass,
			pos,
			vel: V2::new(0., 0.),
			force: V2::new(0., 0.),
		};
		Arc::new(RwLock::new(result))
	}

	pub fn get_pos(&self) -> V2 {
		self.pos
	}

	pub fn get_vel(&self) -> V2 {
		self.vel
	}

	pub fn get_force(&self) -> V2 {
		self.force
	}

	pub fn get_imass(&self) -> f32 {
		self.imass
	}

	pub fn apply_force(&mut self, f: V2) {
		self.force += f;
	}

	/// The accumulator is not cleared by `update`; the owner zeroes it at
	/// the start of each force pass.
	pub fn clear_force(&mut self) {
		self.force = V2::new(0., 0.);
	}

	/// Forward Euler. Conditionally stable: stiff springs, light masses or
	/// a large dt make the chain oscillate with growing amplitude.
	pub fn update(&mut self, dt: f32) {
		if self.imass == 0f32 {
			return;
		}
		self.vel += self.force * self.imass * dt;
		self.pos += self.vel * dt;
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_rest_stays_put() {
		let p = Particle::new_ref(1. / 100., V2::new(3., 4.));
		p.write().unwrap().update(0.3);
		let pos = p.read().unwrap().get_pos();
		assert!((pos - V2::new(3., 4.)).magnitude() < 1e-6);
	}

	#[test]
	fn test_euler_step() {
		let p = Particle::new_ref(1. / 10., V2::new(0., 0.));
		{
			let mut p = p.write().unwrap();
			p.apply_force(V2::new(20., 0.));
			p.apply_force(V2::new(0., -10.));
			p.update(0.5);
		}
		let p = p.read().unwrap();
		// v = F/m * dt, then p = v * dt
		assert!((p.get_vel() - V2::new(1., -0.5)).magnitude() < 1e-6);
		assert!((p.get_pos() - V2::new(0.5, -0.25)).magnitude() < 1e-6);
	}

	#[test]
	fn test_pinned_never_moves() {
		let p = Particle::new_ref(0., V2::new(7., 7.));
		{
			let mut p = p.write().unwrap();
			p.apply_force(V2::new(1e6, 1e6));
			p.update(1.);
		}
		let pos = p.read().unwrap().get_pos();
		assert_eq!(pos, V2::new(7., 7.));
	}

	#[test]
	fn test_force_accumulates_until_cleared() {
		let p = Particle::new_ref(1., V2::new(0., 0.));
		let mut p = p.write().unwrap();
		p.apply_force(V2::new(1., 0.));
		p.apply_force(V2::new(2., 0.));
		assert_eq!(p.get_force(), V2::new(3., 0.));
		p.clear_force();
		assert_eq!(p.get_force(), V2::new(0., 0.));
	}
}
