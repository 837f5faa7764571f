use fnv::FnvHashSet;

use crate::tree::Branch;
use crate::V2;

/// Greedy local descent over the integer lattice restricted to branch
/// interiors. Not a shortest-path search: there is no open set and no
/// accumulated cost, so a dead end aborts the leg instead of backtracking.
pub struct Spider {
	pub home: V2,
	pub pos: V2,
	moves: Vec<V2>,
}

impl Spider {
	pub fn new(home: V2) -> Self {
		Self {
			home,
			pos: home,
			moves: Vec::new(),
		}
	}

	/// Movement deltas queued for the presentation layer.
	pub fn moves(&self) -> &[V2] {
		&self.moves
	}

	pub fn take_moves(&mut self) -> Vec<V2> {
		std::mem::take(&mut self.moves)
	}

	fn adjacent(
		point: (i32, i32),
		closed: &FnvHashSet<(i32, i32)>,
		branches: &[&Branch],
	) -> Vec<(i32, i32)> {
		let mut points = Vec::new();
		for xdir in [-1, 0, 1] {
			for ydir in [-1, 0, 1] {
				let next = (point.0 + xdir, point.1 + ydir);
				let on_branch = branches
					.iter()
					.any(|b| b.contains(V2::new(next.0 as f32, next.1 as f32)));
				if on_branch && !closed.contains(&next) {
					points.push(next);
				}
			}
		}
		points
	}

	// manhattan distance to the target
	fn score(point: (i32, i32), target: (i32, i32)) -> i32 {
		(target.0 - point.0).abs() + (point.1 - target.1).abs()
	}

	/// Crawl toward the target, recording movement deltas. Returns false
	/// when boxed in; the aborted leg records no moves but the position
	/// keeps whatever ground was covered.
	pub fn seek(&mut self, target: V2, branches: &[&Branch]) -> bool {
		let target = (target[0].round() as i32, target[1].round() as i32);
		let mut cur = (self.pos[0].round() as i32, self.pos[1].round() as i32);
		let mut closed = FnvHashSet::default();
		closed.insert(cur);
		let mut leg = Vec::new();
		loop {
			let open = Self::adjacent(cur, &closed, branches);
			if open.is_empty() {
				return false;
			}
			let mut best = open[0];
			let mut best_score = Self::score(open[0], target);
			for point in open.into_iter().skip(1) {
				let score = Self::score(point, target);
				if score < best_score {
					best = point;
					best_score = score;
				}
			}
			leg.push(V2::new((best.0 - cur.0) as f32, (best.1 - cur.1) as f32));
			closed.insert(best);
			cur = best;
			self.pos = V2::new(best.0 as f32, best.1 as f32);
			if (best.0 - target.0).abs() <= 1 && (best.1 - target.1).abs() <= 1 {
				self.moves.extend(leg);
				return true;
			}
		}
	}
}
