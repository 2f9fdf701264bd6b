pub mod agent;
pub mod ball;
pub mod context;
pub mod engine;
pub mod events;
pub mod field;
pub mod input;
pub mod projection;
pub mod state;

pub use agent::*;
pub use ball::*;
pub use context::*;
pub use engine::*;
pub use events::*;
pub use field::*;
pub use input::*;
pub use projection::*;
pub use state::*;

pub use nalgebra::Vector2;
