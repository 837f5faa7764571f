// headless session demo: anchor a few strands to the tree, let bugs fly,
// report the tally

use webgame::session::GameSession;
use webgame::V2;

fn main() {
	let mut session = GameSession::new(42);
	let trunk_mid = {
		let trunk = &session.tree.branches[0];
		(trunk.start + trunk.end) / 2.
	};
	for n in 0..3 {
		let to = trunk_mid + V2::new(120. - 40. * n as f32, -60. - 20. * n as f32);
		match session.weave(trunk_mid, to) {
			Ok(id) => eprintln!("INFO: strand {} anchored", id),
			Err(e) => eprintln!("WARN: {}", e),
		}
	}
	let target = {
		let trunk = &session.tree.branches[0];
		trunk.start + (trunk.end - trunk.start) * 0.8
	};
	if session.move_spider(target) {
		let steps = session.spider.take_moves().len();
		eprintln!("INFO: spider crawled {} steps", steps);
	}
	for frame in 0..600 {
		if frame % 90 == 0 {
			session.spawn_bug(trunk_mid[0] - 200., trunk_mid[1] - 100., 1.);
		}
		session.tick();
	}
	eprintln!(
		"INFO: session over: {} bugs caught, {} silk left",
		session.bugs_caught(),
		session.web_level()
	);
}
