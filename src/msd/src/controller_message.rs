pub enum ControllerMessage {
	TogglePause,
	FrameForward,
	SetWind(f32),
	// node count plus the two gesture endpoints
	Weave(usize, [f32; 2], [f32; 2]),
}
