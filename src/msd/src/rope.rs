use crate::chord::Chord;
use crate::error::{Result, SimError};
use crate::particle::{pref_id, Particle, PRef};
use crate::spring::Spring;
use crate::V2;
use protocol::pr_model::PrParticle;

/// Construction parameters for a rope. The same constants are reused when a
/// splice manufactures a new node and spring later on.
pub struct RopeBuilder {
	nodes: usize,
	mass: f32,
	stiffness: f32,
	friction: f32,
	rest_length: f32,
	gravity: f32,
}

impl RopeBuilder {
	pub fn new(nodes: usize) -> Self {
		Self {
			nodes,
			mass: 100.,
			stiffness: 300.,
			friction: 50.,
			rest_length: 0.75,
			gravity: 2.,
		}
	}

	pub fn with_mass(mut self, mass: f32) -> Self {
		self.mass = mass;
		self
	}

	pub fn with_stiffness(mut self, k: f32) -> Self {
		self.stiffness = k;
		self
	}

	pub fn with_friction(mut self, friction: f32) -> Self {
		self.friction = friction;
		self
	}

	pub fn with_rest_length(mut self, l0: f32) -> Self {
		self.rest_length = l0;
		self
	}

	/// Downward force per unit mass, screen convention (+y down).
	pub fn with_gravity(mut self, gravity: f32) -> Self {
		self.gravity = gravity;
		self
	}

	/// The anchor with the smaller x becomes the start; an exact tie keeps
	/// the first point as given. Callers must not assume the start is the
	/// first point of the gesture.
	pub fn build(self, x0: f32, y0: f32, x1: f32, y1: f32) -> Result<Rope> {
		if self.nodes == 0 {
			return Err(SimError::BadNodeCount(0));
		}
		if self.mass <= 0f32 {
			return Err(SimError::BadMass(self.mass));
		}
		if x0 == x1 && y0 == y1 {
			return Err(SimError::DegenerateRope(x0, y0));
		}
		let (start, end) = if x1 < x0 {
			(V2::new(x1, y1), V2::new(x0, y0))
		} else {
			(V2::new(x0, y0), V2::new(x1, y1))
		};
		let start_node = Particle::new_ref(0., start);
		let end_node = Particle::new_ref(0., end);
		let imass = 1. / self.mass;
		// nodes sit evenly spaced strictly between the anchors
		let step = (end - start) / (self.nodes + 1) as f32;
		let mut nodes = Vec::with_capacity(self.nodes);
		for idx in 0..self.nodes {
			nodes.push(Particle::new_ref(imass, start + step * (idx + 1) as f32));
		}
		let spring = |p1: &PRef, p2: &PRef| {
			Spring::new(p1.clone(), p2.clone())
				.with_rest_length(self.rest_length)
				.with_stiffness(self.stiffness)
				.with_friction(self.friction)
		};
		let mut springs = vec![spring(&start_node, &nodes[0])];
		for idx in 0..self.nodes - 1 {
			springs.push(spring(&nodes[idx], &nodes[idx + 1]));
		}
		springs.push(spring(&nodes[self.nodes - 1], &end_node));
		Ok(Rope {
			chord: Chord::new(start, end),
			start_node,
			end_node,
			nodes,
			springs,
			wind: 0f32,
			mass: self.mass,
			gravity: self.gravity,
			stiffness: self.stiffness,
			friction: self.friction,
			rest_length: self.rest_length,
		})
	}
}

/// An ordered particle chain between two pinned anchors. Springs always
/// chain start -> node0 -> .. -> nodeN-1 -> end, so
/// springs.len() == nodes.len() + 1 holds from construction on, and every
/// splice adds one node and one spring to keep it that way.
#[derive(Debug)]
pub struct Rope {
	start_node: PRef,
	end_node: PRef,
	nodes: Vec<PRef>,
	springs: Vec<Spring>,
	chord: Chord,
	wind: f32,
	mass: f32,
	gravity: f32,
	stiffness: f32,
	friction: f32,
	rest_length: f32,
}

impl Rope {
	pub fn start_node(&self) -> &PRef {
		&self.start_node
	}

	pub fn end_node(&self) -> &PRef {
		&self.end_node
	}

	pub fn nodes(&self) -> &[PRef] {
		&self.nodes
	}

	pub fn springs(&self) -> &[Spring] {
		&self.springs
	}

	/// Uniform horizontal force applied to every node on each update until
	/// changed.
	pub fn set_wind(&mut self, force: f32) {
		self.wind = force;
	}

	/// One simulation step: reset forces, load gravity and wind, solve the
	/// spring chain in order, integrate. Anchors never integrate.
	pub fn update(&mut self, dt: f32) {
		for node in self.nodes.iter() {
			let mut node = node.write().unwrap();
			let weight = self.gravity / node.get_imass();
			node.clear_force();
			node.apply_force(V2::new(self.wind, weight));
		}
		for spring in self.springs.iter() {
			spring.solve();
		}
		for node in self.nodes.iter() {
			node.write().unwrap().update(dt);
		}
	}

	/// One-shot horizontal push on every node. The next update's force
	/// reset wipes whatever has not been integrated yet.
	pub fn apply_x_force(&mut self, force: f32) {
		for node in self.nodes.iter() {
			node.write().unwrap().apply_force(V2::new(force, 0.));
		}
	}

	pub fn length(&self) -> f32 {
		self.chord.length()
	}

	pub fn point_on(&self, x: f32, y: f32) -> bool {
		self.chord.contains(x, y)
	}

	pub fn get_intersection(&self, other: &Rope) -> Option<V2> {
		self.chord.intersection(&other.chord)
	}

	/// Splice: insert one shared node into both ropes where their chords
	/// cross. Each rope gains exactly one spring, tied to the node before
	/// the insertion point; the new node is not linked forward. No-op
	/// without an intersection.
	pub fn solve_intersection(&mut self, other: &mut Rope) {
		let point = match self.get_intersection(other) {
			Some(p) => p,
			None => return,
		};
		let node = Particle::new_ref(1. / self.mass, point);
		self.splice(node.clone(), point);
		other.splice(node, point);
	}

	fn splice(&mut self, node: PRef, point: V2) {
		let total = self.chord.length();
		if total == 0f32 {
			return;
		}
		let along = (point - self.chord.start()).magnitude();
		let idx = (along * self.nodes.len() as f32 / total) as usize;
		self.nodes.insert(idx, node.clone());
		// a head insertion wraps the predecessor to the tail node
		let prev = if idx == 0 {
			self.nodes.len() - 1
		} else {
			idx - 1
		};
		self.springs.push(
			Spring::new(self.nodes[prev].clone(), node)
				.with_rest_length(self.rest_length)
				.with_stiffness(self.stiffness)
				.with_friction(self.friction),
		);
	}

	/// Anchors and nodes, start to end.
	pub fn all_nodes(&self) -> impl Iterator<Item = &PRef> + '_ {
		std::iter::once(&self.start_node)
			.chain(self.nodes.iter())
			.chain(std::iter::once(&self.end_node))
	}

	pub fn pr_particles(&self) -> Vec<(usize, PrParticle)> {
		self.all_nodes()
			.map(|p| {
				let pos = p.read().unwrap().get_pos();
				(pref_id(p), PrParticle { pos: [pos[0], pos[1]] })
			})
			.collect()
	}
}
