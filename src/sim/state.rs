//! Scene state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::settings::{SceneKind, Settings};

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed for the lifetime of the ball
    pub radius: f32,
    /// RGB, each channel in [BALL_COLOR_MIN, 1.0]
    pub color: [f32; 3],
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            color: [1.0; 3],
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Spawn a ball with random position, velocity and color.
    ///
    /// Position is drawn from the square `[-extent, extent]²`.
    pub fn random(rng: &mut Pcg32, radius: f32, extent: f32) -> Self {
        let pos = Vec2::new(
            rng.random_range(-extent..=extent),
            rng.random_range(-extent..=extent),
        );
        let vel = Vec2::new(
            rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
            rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
        );
        let color = [
            rng.random_range(BALL_COLOR_MIN..=1.0),
            rng.random_range(BALL_COLOR_MIN..=1.0),
            rng.random_range(BALL_COLOR_MIN..=1.0),
        ];
        Self::new(pos, vel, radius).with_color(color)
    }
}

/// What the balls bounce against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Horizontal floor; balls rest on it once their bounce dies out
    Floor {
        y: f32,
        /// Fraction of vertical speed kept per bounce
        restitution: f32,
        /// Post-bounce vertical speed below which the ball stops
        rest_threshold: f32,
    },
    /// Circle centred on the origin
    Container {
        radius: f32,
        /// Multiplier on the normal velocity component (negative reflects)
        damping: f32,
    },
}

impl Boundary {
    pub fn floor() -> Self {
        Boundary::Floor {
            y: FLOOR_Y,
            restitution: FLOOR_RESTITUTION,
            rest_threshold: REST_THRESHOLD,
        }
    }

    pub fn container() -> Self {
        Boundary::Container {
            radius: CONTAINER_RADIUS,
            damping: CONTAINER_DAMPING,
        }
    }
}

/// Everything the frame loop simulates
#[derive(Debug, Clone)]
pub struct Scene {
    /// Seed the balls were spawned from
    pub seed: u64,
    pub gravity: f32,
    pub boundary: Boundary,
    /// Largest allowed physics step; `None` steps once per frame with the raw delta
    pub max_step: Option<f32>,
    /// Balls in spawn order
    pub balls: Vec<Ball>,
    /// Number of `tick` calls so far
    pub ticks: u64,
}

impl Scene {
    /// Single white ball at the origin above the default floor
    pub fn floor() -> Self {
        Self {
            seed: 0,
            gravity: GRAVITY,
            boundary: Boundary::floor(),
            max_step: None,
            balls: vec![Ball::new(Vec2::ZERO, Vec2::ZERO, BALL_RADIUS)],
            ticks: 0,
        }
    }

    /// `count` random balls inside the default container
    pub fn container(seed: u64, count: usize) -> Self {
        let mut scene = Self {
            seed,
            gravity: GRAVITY,
            boundary: Boundary::container(),
            max_step: None,
            balls: Vec::new(),
            ticks: 0,
        };
        scene.spawn_random(count, BALL_RADIUS);
        scene
    }

    /// Build the scene described by `settings`
    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        let mut scene = match settings.scene {
            SceneKind::Floor => Self {
                seed,
                gravity: settings.gravity,
                boundary: Boundary::Floor {
                    y: settings.floor_y,
                    restitution: settings.floor_restitution,
                    rest_threshold: settings.rest_threshold,
                },
                max_step: settings.max_step,
                balls: vec![Ball::new(Vec2::ZERO, Vec2::ZERO, settings.ball_radius)],
                ticks: 0,
            },
            SceneKind::Container => Self {
                seed,
                gravity: settings.gravity,
                boundary: Boundary::Container {
                    radius: settings.container_radius,
                    damping: settings.container_damping,
                },
                max_step: settings.max_step,
                balls: Vec::new(),
                ticks: 0,
            },
        };
        if settings.scene == SceneKind::Container {
            scene.spawn_random(settings.ball_count, settings.ball_radius);
        }
        scene
    }

    /// Replace the balls with `count` random ones drawn from `self.seed`.
    ///
    /// The spawn square is shrunk to fit inside the container so every ball
    /// starts within `container_radius - radius` of the origin.
    fn spawn_random(&mut self, count: usize, radius: f32) {
        let extent = match self.boundary {
            Boundary::Container { radius: container, .. } => {
                SPAWN_EXTENT.min((container - radius).max(0.0) * std::f32::consts::FRAC_1_SQRT_2)
            }
            Boundary::Floor { .. } => SPAWN_EXTENT,
        };
        let mut rng = Pcg32::seed_from_u64(self.seed);
        self.balls = (0..count)
            .map(|_| Ball::random(&mut rng, radius, extent))
            .collect();
    }
}
