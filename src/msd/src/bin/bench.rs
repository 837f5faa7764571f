use std::time::SystemTime;
use msd::rworld::RWorld;

fn main() {
	let start = SystemTime::now();
	let mut rworld = RWorld::default();
	rworld.init_test();
	let rframes = 2000;
	for _ in 0..rframes {
		rworld.run();
	}
	let time = rframes as f32 * rworld.dt;
	let duration = SystemTime::now().duration_since(start).unwrap().as_micros();
	eprintln!("{:.3}%", duration as f32 / time / 1e4);
}
