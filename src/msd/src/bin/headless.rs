// minimal stand-in frontend: drive the world thread over channels and dump
// frame stats instead of drawing

use std::sync::mpsc;
use std::thread;

use msd::controller_message::ControllerMessage;
use msd::rworld::RWorld;
use protocol::user_event::UserEvent;

fn main() {
	let (tx, rx) = mpsc::channel();
	let (ctx, crx) = mpsc::channel();
	thread::spawn(move || {
		let mut rworld = RWorld::default().with_time_scale(0.1);
		rworld.run_thread(tx, crx);
	});
	ctx.send(ControllerMessage::Weave(8, [0., 0.], [200., 20.]))
		.unwrap();
	ctx.send(ControllerMessage::Weave(6, [80., -60.], [120., 90.]))
		.unwrap();
	ctx.send(ControllerMessage::SetWind(120.)).unwrap();
	for _ in 0..60 {
		let UserEvent::Update(_model, info) = rx.recv().unwrap();
		eprintln!(
			"INFO: load {:.2} ropes {} particles {} springs {}",
			info.load, info.rope_len, info.particle_len, info.spring_len
		);
	}
}
