pub mod bug;
pub mod error;
pub mod segment;
pub mod session;
pub mod spider;
pub mod tree;
pub mod weather;

pub type V2 = nalgebra::Vector2<f32>;
