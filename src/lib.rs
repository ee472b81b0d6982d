//! Bouncing Balls - balls falling under gravity inside a window
//!
//! Core modules:
//! - `sim`: Ball physics (gravity integration, floor/container collision)
//! - `renderer`: wgpu pipeline drawing one circle mesh per ball
//! - `clock`: Wall-clock frame delta and FPS tracking
//! - `settings`: Scene configuration loaded from JSON

pub mod clock;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::FrameClock;
pub use settings::{SceneKind, Settings};

/// Demo configuration constants
pub mod consts {
    /// Gravity along y (world units/s²)
    pub const GRAVITY: f32 = -1.0;

    /// Circular container centred on the origin
    pub const CONTAINER_RADIUS: f32 = 1.0;
    /// Multiplier applied to the normal velocity on a container bounce.
    /// Negative: reflects and keeps 90% of the normal speed.
    pub const CONTAINER_DAMPING: f32 = -0.9;

    /// Floor height (bottom edge of the viewport)
    pub const FLOOR_Y: f32 = -1.0;
    /// Fraction of vertical speed kept on a floor bounce
    pub const FLOOR_RESTITUTION: f32 = 0.8;
    /// Vertical speed under which a bounced ball is put to rest
    pub const REST_THRESHOLD: f32 = 0.01;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.1;
    pub const BALL_COUNT: usize = 15;
    /// Color channels are drawn from [BALL_COLOR_MIN, 1.0]
    pub const BALL_COLOR_MIN: f32 = 0.5;
    /// Spawn box half-extent for container balls
    pub const SPAWN_EXTENT: f32 = 0.5;
    /// Spawn velocity component range is [-SPAWN_SPEED, SPAWN_SPEED]
    pub const SPAWN_SPEED: f32 = 1.0;

    /// Circle mesh resolution
    pub const CIRCLE_SEGMENTS: u32 = 50;
    /// Largest fan whose `segments + 2` vertices fit a u16 index
    pub const MAX_CIRCLE_SEGMENTS: u32 = u16::MAX as u32 - 1;

    /// Maximum substeps per frame when sub-stepping is enabled
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Window defaults
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 800;
    pub const CLEAR_COLOR: [f64; 4] = [0.1, 0.2, 0.2, 1.0];
}
