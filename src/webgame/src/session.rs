use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bug::Bug;
use crate::error::{GameError, Result};
use crate::spider::Spider;
use crate::tree::{Branch, Tree};
use crate::weather::Weather;
use crate::V2;
use msd::rworld::RWorld;

/// Nodes of web material per unit of gesture length.
const SILK_PER_UNIT: f32 = 0.07;
const MAX_WEB: u32 = 30;

/// One play session. Every tally lives here and is passed around
/// explicitly; nothing is global.
pub struct GameSession {
	pub world: RWorld,
	pub tree: Tree,
	pub spider: Spider,
	pub bugs: Vec<Bug>,
	pub weather: Weather,
	available: Vec<usize>,
	web_level: u32,
	bugs_caught: u32,
	rng: StdRng,
}

impl GameSession {
	pub fn new(seed: u64) -> Self {
		let mut rng = StdRng::seed_from_u64(seed);
		let num_branches = rng.gen_range(6..=8);
		let tree = Tree::generate(V2::new(500., 550.), num_branches, &mut rng);
		// the spider starts on one random branch just below the trunk;
		// that branch and the trunk are walkable from the beginning
		let available = {
			let mut v = Vec::new();
			loop {
				let idx = rng.gen_range(0..tree.branches.len());
				if tree.branches[idx].depth == tree.max_depth - 1 {
					v.push(idx);
					break;
				}
			}
			v.push(0);
			v
		};
		let home = tree.branches[available[0]].start;
		Self {
			world: RWorld::default(),
			spider: Spider::new(home),
			tree,
			bugs: Vec::new(),
			weather: Weather::LightBreeze,
			available,
			web_level: MAX_WEB,
			bugs_caught: 0,
			rng,
		}
	}

	pub fn web_level(&self) -> u32 {
		self.web_level
	}

	pub fn bugs_caught(&self) -> u32 {
		self.bugs_caught
	}

	pub fn available_branches(&self) -> &[usize] {
		&self.available
	}

	/// Cost of a web gesture in nodes.
	fn silk_cost(from: V2, to: V2) -> u32 {
		((to - from).magnitude() * SILK_PER_UNIT) as u32
	}

	/// Draw a strand between two gesture points, spending silk. The strand
	/// must start on a walkable branch; a strand ending on a branch makes
	/// that branch walkable.
	pub fn weave(&mut self, from: V2, to: V2) -> Result<usize> {
		let on = self.tree.branch_at(from);
		if !on.map_or(false, |idx| self.available.contains(&idx)) {
			return Err(GameError::OffBranch);
		}
		let nodes = Self::silk_cost(from, to);
		if nodes == 0 {
			return Err(GameError::GestureTooShort);
		}
		if nodes > self.web_level {
			return Err(GameError::SilkExhausted {
				need: nodes,
				have: self.web_level,
			});
		}
		let id = self
			.world
			.weave(nodes as usize, [from[0], from[1]], [to[0], to[1]])?;
		self.web_level -= nodes;
		if let Some(idx) = self.tree.branch_at(to) {
			if !self.available.contains(&idx) {
				self.available.push(idx);
			}
		}
		Ok(id)
	}

	pub fn spawn_bug(&mut self, x: f32, y: f32, direc: f32) {
		let bug = Bug::new(x, y, direc, &mut self.rng);
		self.bugs.push(bug);
	}

	// occasionally shift the weather, then gust
	fn gust(&mut self) {
		if self.rng.gen_range(0..240) == 0 {
			self.weather = Weather::switch(&mut self.rng);
			eprintln!("INFO: weather now {:?}", self.weather);
		}
		let wind = self.weather.sample_wind(&mut self.rng);
		self.world.set_wind(wind);
	}

	/// One game frame: gust, physics step, bug motion and capture. A meal
	/// replenishes one unit of silk, up to the cap.
	pub fn tick(&mut self) {
		self.gust();
		self.world.run();
		for bug in self.bugs.iter_mut() {
			bug.update(&mut self.rng);
			if bug.check_web(self.world.ropes()) {
				self.bugs_caught += 1;
				if self.web_level < MAX_WEB {
					self.web_level += 1;
				}
			}
		}
	}

	/// Send the spider along the tree toward a target on a walkable
	/// branch. Returns false when the target is unreachable.
	pub fn move_spider(&mut self, target: V2) -> bool {
		let on = match self.tree.branch_at(target) {
			Some(idx) => idx,
			None => return false,
		};
		if !self.available.contains(&on) {
			return false;
		}
		let branches: Vec<&Branch> = self
			.available
			.iter()
			.map(|&idx| &self.tree.branches[idx])
			.collect();
		for point in self.tree.path(self.spider.pos, target) {
			if !self.spider.seek(point, &branches) {
				return false;
			}
		}
		true
	}
}
