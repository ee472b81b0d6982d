//! Ball simulation module
//!
//! All physics lives here. No rendering or platform dependencies:
//! - Variable timestep (wall-clock frame delta), optional sub-stepping
//! - Seeded RNG for spawning only
//! - Balls never interact with each other

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_container_collision, ball_floor_collision};
pub use state::{Ball, Boundary, Scene};
pub use tick::{advance, damp_normal, decompose_velocity, substep_count, tick};
