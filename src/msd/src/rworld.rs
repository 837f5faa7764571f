use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, SystemTime};

use crate::controller_message::ControllerMessage;
use crate::error::Result;
use crate::rope::{Rope, RopeBuilder};
use protocol::pr_model::{PrModel, PrParticle};
use protocol::user_event::{UpdateInfo, UserEvent};

pub struct RWorld {
	pub dt: f32,
	pub time_scale: f32,

	// -1: always play
	// 0: pause
	// n: play n frames
	forward_frames: i32,

	ropes: Vec<Rope>,
}

impl Default for RWorld {
	fn default() -> Self {
		Self {
			dt: 0.3,
			time_scale: 1.0,
			forward_frames: -1,
			ropes: Vec::new(),
		}
	}
}

impl RWorld {
	pub fn with_dt(mut self, dt: f32) -> Self {
		self.dt = dt;
		self
	}

	pub fn with_time_scale(mut self, time_scale: f32) -> Self {
		self.time_scale = time_scale;
		self
	}

	pub fn with_paused(mut self) -> Self {
		self.forward_frames = 1; // provide first frame
		self
	}

	pub fn init_test(&mut self) {
		use rand::Rng;
		let mut rng = rand::thread_rng();
		self.ropes = Vec::new();
		// a fan of strands crossed by two long horizontals
		for n in 0..6 {
			let x = 40. * n as f32 + rng.gen_range(-5f32..5f32);
			if let Err(e) = self.weave(8, [x, 0.], [x + 30., 160.]) {
				eprintln!("WARN: init_test strand: {}", e);
			}
		}
		for y in [60., 110.] {
			let wobble = rng.gen_range(-8f32..8f32);
			if let Err(e) = self.weave(16, [-10., y], [260., y + wobble]) {
				eprintln!("WARN: init_test strand: {}", e);
			}
		}
	}

	pub fn ropes(&self) -> &[Rope] {
		&self.ropes
	}

	pub fn ropes_mut(&mut self) -> &mut [Rope] {
		&mut self.ropes
	}

	/// Splice a finished rope against the existing web, then adopt it.
	/// Runs between frames, never inside a rope's update pass.
	pub fn add_rope(&mut self, mut rope: Rope) -> usize {
		for other in self.ropes.iter_mut() {
			rope.solve_intersection(other);
		}
		self.ropes.push(rope);
		self.ropes.len() - 1
	}

	/// Create a rope from a user gesture with the default constants and
	/// weave it into the web.
	pub fn weave(
		&mut self,
		nodes: usize,
		from: [f32; 2],
		to: [f32; 2],
	) -> Result<usize> {
		let rope = RopeBuilder::new(nodes).build(from[0], from[1], to[0], to[1])?;
		let id = self.add_rope(rope);
		eprintln!(
			"INFO: weave rope {}: {} nodes ({:.0},{:.0})-({:.0},{:.0})",
			id, nodes, from[0], from[1], to[0], to[1]
		);
		Ok(id)
	}

	pub fn set_wind(&mut self, force: f32) {
		for rope in self.ropes.iter_mut() {
			rope.set_wind(force);
		}
	}

	fn update_frame(&mut self, dt: f32) {
		if dt == 0f32 {
			return;
		}
		// ropes step one after another in creation order; a node shared by
		// two ropes is stepped by each of them, as each rope's pass is
		// self-contained
		for rope in self.ropes.iter_mut() {
			rope.update(dt);
		}
	}

	pub fn run(&mut self) {
		self.update_frame(self.dt);
	}

	#[cfg(not(debug_assertions))]
	fn pr_particles(&self) -> HashMap<usize, PrParticle> {
		use rayon::prelude::*;
		self.ropes
			.par_iter()
			.flat_map_iter(|rope| rope.pr_particles())
			.collect()
	}

	#[cfg(debug_assertions)]
	fn pr_particles(&self) -> HashMap<usize, PrParticle> {
		self.ropes
			.iter()
			.flat_map(|rope| rope.pr_particles())
			.collect()
	}

	pub fn pr_model(&self) -> PrModel {
		let particles = self.pr_particles();
		let mut springs = Vec::new();
		for rope in self.ropes.iter() {
			for spring in rope.springs() {
				springs.push(spring.render(springs.len() as i32));
			}
		}
		PrModel { particles, springs }
	}

	/// A failed weave request is logged and dropped; the caller's gesture
	/// was malformed, the world stays as it was.
	pub fn handle_message(&mut self, msg: ControllerMessage) {
		match msg {
			ControllerMessage::TogglePause => {
				if self.forward_frames == 0 {
					self.forward_frames = -1;
				} else {
					self.forward_frames = 0;
				}
			}
			ControllerMessage::FrameForward => {
				if self.forward_frames == 0 {
					self.forward_frames += 1;
				}
			}
			ControllerMessage::SetWind(force) => {
				self.set_wind(force);
			}
			ControllerMessage::Weave(nodes, from, to) => {
				if let Err(e) = self.weave(nodes, from, to) {
					eprintln!("WARN: weave rejected: {}", e);
				}
			}
		}
	}

	pub fn run_thread(
		&mut self,
		tx: Sender<UserEvent>,
		rx: Receiver<ControllerMessage>,
	) {
		let mut start_time = SystemTime::now();
		let rtime: u64 = (self.dt * 1e6 * self.time_scale) as u64;
		let mut first_frame = true;
		loop {
			if self.forward_frames != 0 {
				if self.forward_frames > 0 {
					self.forward_frames -= 1;
				}
				let compute_start = SystemTime::now();
				if !first_frame {
					self.run();
				} else {
					first_frame = false;
				}
				let model = self.pr_model();
				let load = SystemTime::now()
					.duration_since(compute_start)
					.unwrap()
					.as_micros() as f32 / rtime as f32;
				let info = UpdateInfo {
					load,
					rope_len: self.ropes.len(),
					particle_len: model.particles.len(),
					spring_len: model.springs.len(),
				};
				tx.send(UserEvent::Update(model, info)).unwrap();
			}

			let next_time = SystemTime::now();
			let dt = next_time.duration_since(start_time).unwrap().as_micros()
				as u64;
			while let Ok(msg) = rx.try_recv() {
				self.handle_message(msg);
			}
			if dt < rtime {
				std::thread::sleep(Duration::from_micros(rtime - dt));
			}
			start_time = next_time;
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_weave_rejects_bad_gesture() {
		let mut world = RWorld::default();
		assert!(world.weave(0, [0., 0.], [10., 0.]).is_err());
		assert!(world.weave(3, [4., 4.], [4., 4.]).is_err());
		assert_eq!(world.ropes().len(), 0);
	}

	#[test]
	fn test_weave_splices_against_existing() {
		let mut world = RWorld::default();
		world.weave(5, [0., 0.], [100., 0.]).unwrap();
		world.weave(5, [50., -50.], [50., 50.]).unwrap();
		assert_eq!(world.ropes()[0].nodes().len(), 6);
		assert_eq!(world.ropes()[1].nodes().len(), 6);
		assert_eq!(world.ropes()[0].springs().len(), 7);
		assert_eq!(world.ropes()[1].springs().len(), 7);
	}

	#[test]
	fn test_pr_model_shares_spliced_node() {
		let mut world = RWorld::default();
		world.weave(5, [0., 0.], [100., 0.]).unwrap();
		world.weave(5, [50., -50.], [50., 50.]).unwrap();
		let model = world.pr_model();
		// 7 + 7 handles per rope, one shared
		assert_eq!(model.particles.len(), 15);
		assert_eq!(model.springs.len(), 14);
		for spring in model.springs.iter() {
			for id in spring.particles.iter() {
				assert!(model.particles.contains_key(id));
			}
		}
	}

	#[test]
	fn test_identical_worlds_stay_identical() {
		let build = || {
			let mut world = RWorld::default();
			world.weave(5, [0., 0.], [100., 0.]).unwrap();
			world.weave(4, [30., -40.], [60., 40.]).unwrap();
			world.set_wind(25.);
			world
		};
		let mut a = build();
		let mut b = build();
		for _ in 0..50 {
			a.run();
			b.run();
		}
		let ma = a.pr_model();
		let mb = b.pr_model();
		let mut pa: Vec<[f32; 2]> = ma.particles.values().map(|p| p.pos).collect();
		let mut pb: Vec<[f32; 2]> = mb.particles.values().map(|p| p.pos).collect();
		let key = |p: &[f32; 2]| (p[0].to_bits(), p[1].to_bits());
		pa.sort_by_key(key);
		pb.sort_by_key(key);
		assert_eq!(pa, pb);
	}

	#[test]
	fn test_controller_messages() {
		let mut world = RWorld::default();
		world.handle_message(ControllerMessage::Weave(4, [0., 0.], [40., 0.]));
		assert_eq!(world.ropes().len(), 1);
		// malformed gestures are dropped, not fatal
		world.handle_message(ControllerMessage::Weave(0, [0., 0.], [40., 0.]));
		assert_eq!(world.ropes().len(), 1);
		world.handle_message(ControllerMessage::SetWind(80.));
		world.run();
		assert!(world.ropes()[0].nodes()[0].read().unwrap().get_vel()[0] > 0.);
		world.handle_message(ControllerMessage::TogglePause);
		assert_eq!(world.forward_frames, 0);
		world.handle_message(ControllerMessage::FrameForward);
		assert_eq!(world.forward_frames, 1);
		world.handle_message(ControllerMessage::TogglePause);
		assert_eq!(world.forward_frames, 0);
		world.handle_message(ControllerMessage::TogglePause);
		assert_eq!(world.forward_frames, -1);
	}

	#[test]
	fn test_zero_dt_is_a_no_op() {
		let mut world = RWorld::default().with_dt(0.);
		world.weave(3, [0., 0.], [30., 0.]).unwrap();
		let before = world.pr_model();
		world.run();
		let after = world.pr_model();
		for (id, p) in before.particles.iter() {
			assert_eq!(p.pos, after.particles[id].pos);
		}
	}
}
