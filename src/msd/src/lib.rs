pub mod chord;
pub mod controller_message;
pub mod error;
pub mod particle;
pub mod rope;
pub mod rworld;
pub mod spring;

pub type V2 = nalgebra::Vector2<f32>;
