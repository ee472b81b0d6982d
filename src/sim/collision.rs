//! Boundary contact detection
//!
//! Finds where a ball touches the floor or the circular container wall.
//! Response (reflection, damping, rest snapping) lives in `tick`.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Position the ball centre must be moved to (if hit)
    pub resolved_pos: Vec2,
    /// Outward boundary normal at the contact, unit length (zero if hit but undefined)
    pub normal: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            resolved_pos: Vec2::ZERO,
            normal: Vec2::ZERO,
        }
    }
}

/// Check a ball against the inside of a circle centred on the origin.
///
/// The ball centre may be at most `container_radius - ball_radius` from the
/// origin. A ball exactly at the origin has no defined normal; it is reported
/// as a miss and left alone.
pub fn ball_container_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    container_radius: f32,
) -> CollisionResult {
    let max_dist = container_radius - ball_radius;
    let dist_sq = ball_pos.length_squared();

    if dist_sq <= max_dist * max_dist {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    if dist <= f32::EPSILON {
        return CollisionResult::miss();
    }

    let normal = ball_pos / dist;
    CollisionResult {
        hit: true,
        resolved_pos: normal * max_dist,
        normal,
    }
}

/// Check a ball against a horizontal floor at `floor_y`
pub fn ball_floor_collision(ball_pos: Vec2, ball_radius: f32, floor_y: f32) -> CollisionResult {
    if ball_pos.y - ball_radius < floor_y {
        return CollisionResult {
            hit: true,
            resolved_pos: Vec2::new(ball_pos.x, floor_y + ball_radius),
            // Points out of the play area, matching the container convention
            normal: Vec2::NEG_Y,
        };
    }

    CollisionResult::miss()
}
