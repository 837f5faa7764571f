use rand::Rng;

use crate::segment::project;
use crate::V2;

/// One tapered segment of the tree. Screen convention: +y is down, angles
/// are degrees with 90 pointing straight up.
pub struct Branch {
	pub start: V2,
	pub end: V2,
	pub parent: Option<usize>,
	pub length: f32,
	pub angle: f32,
	pub depth: u32,
	pub base_width: f32,
	pub end_width: f32,
}

impl Branch {
	/// Membership against the tapered segment: within half the width
	/// interpolated along the branch.
	pub fn contains(&self, p: V2) -> bool {
		let (t, dist) = project(p, self.start, self.end);
		let width = self.base_width + (self.end_width - self.base_width) * t;
		dist <= width / 2.
	}
}

fn endpoint(start: V2, length: f32, angle: f32) -> V2 {
	let rad = angle.to_radians();
	V2::new(start[0] + length * rad.cos(), start[1] - length * rad.sin())
}

struct Frame {
	depth: u32,
	start: V2,
	min_len: f32,
	max_len: f32,
	angle: f32,
	parent: Option<usize>,
}

pub struct Tree {
	pub branches: Vec<Branch>,
	pub max_depth: u32,
}

impl Tree {
	/// Grow a tree from a trunk base. Branches are built with an explicit
	/// work stack, depth-first, so tree size never leans on the native call
	/// stack. Each level shortens the length range, drifts the heading by
	/// 10..25 degrees per side, and below the top two levels a branch has a
	/// 1 in 16 chance of dying back without children.
	pub fn generate<R: Rng>(start: V2, num_branches: u32, rng: &mut R) -> Tree {
		let mut branches: Vec<Branch> = Vec::new();
		let mut stack = vec![Frame {
			depth: num_branches,
			start,
			min_len: 30.,
			max_len: 60.,
			angle: 90. + rng.gen_range(-5f32..=5.),
			parent: None,
		}];
		while let Some(frame) = stack.pop() {
			if frame.depth == 0 {
				continue;
			}
			let depth = frame.depth;
			let length = rng.gen_range(frame.min_len..=frame.max_len);
			let end = endpoint(frame.start, length, frame.angle);
			let base_width = match frame.parent {
				None => depth as f32 * 2.,
				Some(idx) => branches[idx].end_width,
			};
			// the terminal level tapers to a point
			let end_width = if depth == 1 { 0. } else { depth as f32 };
			let idx = branches.len();
			branches.push(Branch {
				start: frame.start,
				end,
				parent: frame.parent,
				length,
				angle: frame.angle,
				depth,
				base_width,
				end_width,
			});
			if depth + 2 <= num_branches && rng.gen_range(0..16) == 0 {
				continue;
			}
			// push the minus side first so the plus side grows first
			stack.push(Frame {
				depth: depth - 1,
				start: end,
				min_len: if frame.min_len > 10. { frame.min_len - 10. } else { 20. },
				max_len: if frame.max_len > 20. { frame.max_len - 10. } else { 40. },
				angle: frame.angle - rng.gen_range(10f32..=25.),
				parent: Some(idx),
			});
			stack.push(Frame {
				depth: depth - 1,
				start: end,
				min_len: if frame.min_len > 20. { frame.min_len - 10. } else { 20. },
				max_len: if frame.max_len > 40. { frame.max_len - 10. } else { 40. },
				angle: frame.angle + rng.gen_range(10f32..=25.),
				parent: Some(idx),
			});
		}
		Tree {
			branches,
			max_depth: num_branches,
		}
	}

	pub fn branch_at(&self, p: V2) -> Option<usize> {
		self.branches.iter().position(|b| b.contains(p))
	}

	/// Waypoints from one point to another, walking parent links backward
	/// from the target's branch until the start branch (or the trunk) is
	/// reached. Returned in travel order, ending at the target.
	pub fn path(&self, from: V2, to: V2) -> Vec<V2> {
		let start = self.branch_at(from);
		let mut cur = self.branch_at(to);
		let mut path = vec![to];
		while cur != start {
			let idx = match cur {
				Some(i) => i,
				None => break,
			};
			if self.branches[idx].parent.is_none() {
				break;
			}
			let start_parent = start.and_then(|s| self.branches[s].parent);
			if start_parent == Some(idx) {
				if let Some(s) = start {
					path.push(self.branches[s].start);
				}
				break;
			}
			path.push(self.branches[idx].start);
			cur = self.branches[idx].parent;
		}
		path.reverse();
		path
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	#[test]
	fn test_seed_reproduces_tree() {
		let mut r1 = StdRng::seed_from_u64(7);
		let mut r2 = StdRng::seed_from_u64(7);
		let t1 = Tree::generate(V2::new(500., 550.), 8, &mut r1);
		let t2 = Tree::generate(V2::new(500., 550.), 8, &mut r2);
		assert_eq!(t1.branches.len(), t2.branches.len());
		for (a, b) in t1.branches.iter().zip(t2.branches.iter()) {
			assert_eq!(a.start, b.start);
			assert_eq!(a.end, b.end);
			assert_eq!(a.depth, b.depth);
		}
	}

	#[test]
	fn test_parents_precede_children() {
		let mut rng = StdRng::seed_from_u64(3);
		let tree = Tree::generate(V2::new(0., 0.), 7, &mut rng);
		assert!(!tree.branches.is_empty());
		for (idx, branch) in tree.branches.iter().enumerate() {
			if let Some(parent) = branch.parent {
				assert!(parent < idx);
				assert_eq!(tree.branches[parent].depth, branch.depth + 1);
				// children sprout where the parent ends
				assert_eq!(tree.branches[parent].end, branch.start);
			} else {
				assert_eq!(branch.depth, tree.max_depth);
			}
		}
	}

	#[test]
	fn test_trunk_grows_upward() {
		let mut rng = StdRng::seed_from_u64(11);
		let tree = Tree::generate(V2::new(500., 550.), 6, &mut rng);
		let trunk = &tree.branches[0];
		// +y is down; the trunk points up
		assert!(trunk.end[1] < trunk.start[1]);
		assert!(trunk.contains(trunk.start));
	}

	#[test]
	fn test_contains_respects_width() {
		let branch = Branch {
			start: V2::new(0., 0.),
			end: V2::new(0., -100.),
			parent: None,
			length: 100.,
			angle: 90.,
			depth: 5,
			base_width: 10.,
			end_width: 10.,
		};
		assert!(branch.contains(V2::new(4., -50.)));
		assert!(!branch.contains(V2::new(6., -50.)));
		assert!(!branch.contains(V2::new(0., 20.)));
	}

	fn straight_tree() -> Tree {
		let branch = |start: V2, end: V2, parent, depth| Branch {
			start,
			end,
			parent,
			length: (end - start).magnitude(),
			angle: 90.,
			depth,
			base_width: 10.,
			end_width: 8.,
		};
		Tree {
			branches: vec![
				branch(V2::new(0., 0.), V2::new(0., -100.), None, 3),
				branch(V2::new(0., -100.), V2::new(0., -200.), Some(0), 2),
				branch(V2::new(0., -200.), V2::new(50., -250.), Some(1), 1),
			],
			max_depth: 3,
		}
	}

	#[test]
	fn test_path_walks_parent_chain() {
		let tree = straight_tree();
		let from = V2::new(0., -50.);
		let to = V2::new(25., -225.);
		let path = tree.path(from, to);
		assert_eq!(
			path,
			vec![V2::new(0., -100.), V2::new(0., -200.), to]
		);
	}

	#[test]
	fn test_path_same_branch_is_direct() {
		let tree = straight_tree();
		let to = V2::new(0., -80.);
		assert_eq!(tree.path(V2::new(0., -20.), to), vec![to]);
	}
}
