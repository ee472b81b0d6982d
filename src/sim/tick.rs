//! Per-frame physics step
//!
//! Advances balls by a variable time delta: gravity, explicit Euler position
//! update, then boundary response.

use glam::Vec2;

use super::collision::{ball_container_collision, ball_floor_collision};
use super::state::{Ball, Boundary, Scene};
use crate::consts::MAX_SUBSTEPS;

/// Advance one ball by `dt` seconds.
///
/// `dt` is not clamped: a long frame produces one long step.
pub fn advance(ball: &mut Ball, boundary: &Boundary, gravity: f32, dt: f32) {
    ball.vel.y += gravity * dt;
    ball.pos += ball.vel * dt;

    match *boundary {
        Boundary::Container { radius, damping } => {
            let result = ball_container_collision(ball.pos, ball.radius, radius);
            if result.hit {
                ball.pos = result.resolved_pos;
                ball.vel = damp_normal(ball.vel, result.normal, damping);
            }
        }
        Boundary::Floor {
            y,
            restitution,
            rest_threshold,
        } => {
            let result = ball_floor_collision(ball.pos, ball.radius, y);
            if result.hit {
                ball.pos = result.resolved_pos;
                ball.vel.y *= -restitution;
                if ball.vel.y.abs() < rest_threshold {
                    ball.vel.y = 0.0;
                }
            }
        }
    }
}

/// Split `vel` into (normal, tangential) parts relative to unit `normal`
#[inline]
pub fn decompose_velocity(vel: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let along = normal * vel.dot(normal);
    (along, vel - along)
}

/// Scale the normal part of `vel` by `damping`, keep the tangential part
#[inline]
pub fn damp_normal(vel: Vec2, normal: Vec2, damping: f32) -> Vec2 {
    let (along, tangential) = decompose_velocity(vel, normal);
    tangential + along * damping
}

/// Number of equal sub-steps `dt` is split into for a given `max_step`
pub fn substep_count(dt: f32, max_step: Option<f32>) -> u32 {
    match max_step {
        Some(h) if h > 0.0 && dt > h => ((dt / h).ceil() as u32).clamp(1, MAX_SUBSTEPS),
        _ => 1,
    }
}

/// Advance every ball in the scene by `dt` seconds.
///
/// Balls do not interact, so they are stepped one after another.
pub fn tick(scene: &mut Scene, dt: f32) {
    let dt = dt.max(0.0);
    let steps = substep_count(dt, scene.max_step);
    let h = dt / steps as f32;

    for ball in &mut scene.balls {
        for _ in 0..steps {
            advance(ball, &scene.boundary, scene.gravity, h);
        }
    }

    scene.ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_container_bounce_scenario() {
        let mut ball = Ball::new(Vec2::new(0.0, 0.95), Vec2::new(0.0, 2.0), 0.1);
        advance(&mut ball, &Boundary::container(), GRAVITY, 0.1);

        // vel (0, 1.9) moves the ball to (0, 1.14), past the 0.9 limit
        assert!(approx(ball.pos, Vec2::new(0.0, 0.9)));
        assert!(approx(ball.vel, Vec2::new(0.0, -1.71)));
    }

    #[test]
    fn test_container_no_contact_is_free_flight() {
        let mut ball = Ball::new(Vec2::new(0.1, 0.2), Vec2::new(0.5, 0.0), 0.1);
        advance(&mut ball, &Boundary::container(), GRAVITY, 0.1);
        assert!(approx(ball.vel, Vec2::new(0.5, -0.1)));
        assert!(approx(ball.pos, Vec2::new(0.15, 0.19)));
    }

    #[test]
    fn test_container_keeps_tangential_velocity() {
        // Moving up-right along the wall at the top
        let vel = Vec2::new(1.0, 1.0);
        let mut ball = Ball::new(Vec2::new(0.0, 0.9), vel, 0.1);
        advance(&mut ball, &Boundary::container(), 0.0, 0.01);

        let normal = ball.pos.normalize();
        assert!((ball.pos.length() - 0.9).abs() < 1e-5);

        let (along_before, tangential_before) = decompose_velocity(vel, normal);
        let (along_after, tangential_after) = decompose_velocity(ball.vel, normal);
        assert!(approx(tangential_after, tangential_before));
        // Normal part was outward before the bounce, inward and damped after
        assert!(along_before.dot(normal) > 0.0);
        assert!(approx(along_after, along_before * CONTAINER_DAMPING));
    }

    #[test]
    fn test_damp_normal() {
        let vel = Vec2::new(3.0, -2.0);
        let out = damp_normal(vel, Vec2::Y, -0.9);
        assert!(approx(out, Vec2::new(3.0, 1.8)));

        let (along, tangential) = decompose_velocity(vel, Vec2::Y);
        assert!(approx(along, Vec2::new(0.0, -2.0)));
        assert!(approx(tangential, Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_floor_bounce() {
        let mut ball = Ball::new(Vec2::new(0.0, -0.85), Vec2::new(0.0, -1.0), 0.1);
        advance(&mut ball, &Boundary::floor(), GRAVITY, 0.1);

        assert_eq!(ball.pos.y, FLOOR_Y + 0.1);
        // -1.1 after gravity, reflected and scaled by 0.8
        assert!((ball.vel.y - 0.88).abs() < 1e-5);
    }

    #[test]
    fn test_floor_micro_bounce_snaps_to_rest() {
        let mut ball = Ball::new(Vec2::new(0.0, FLOOR_Y + 0.1), Vec2::ZERO, 0.1);
        advance(&mut ball, &Boundary::floor(), GRAVITY, 0.005);

        assert_eq!(ball.pos.y, FLOOR_Y + 0.1);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_floor_ball_comes_to_rest() {
        let mut scene = Scene::floor();
        for _ in 0..20_000 {
            tick(&mut scene, 1.0 / 60.0);
        }
        let ball = scene.balls[0];
        assert_eq!(ball.pos.y, FLOOR_Y + BALL_RADIUS);
        assert!(ball.vel.y.abs() < 0.05);
        assert_eq!(scene.ticks, 20_000);
    }

    #[test]
    fn test_zero_dt_is_noop_inside() {
        let mut scene = Scene::container(9, BALL_COUNT);
        let before = scene.balls.clone();
        tick(&mut scene, 0.0);
        assert_eq!(scene.balls, before);
    }

    #[test]
    fn test_substep_count() {
        assert_eq!(substep_count(0.1, None), 1);
        assert_eq!(substep_count(0.004, Some(0.005)), 1);
        assert_eq!(substep_count(0.016, Some(0.005)), 4);
        assert_eq!(substep_count(10.0, Some(0.005)), MAX_SUBSTEPS);
    }

    #[test]
    fn test_substepped_tick_matches_manual_steps() {
        let mut scene = Scene::container(5, 3);
        scene.max_step = Some(0.01);
        let mut manual = scene.balls.clone();

        tick(&mut scene, 0.025);
        for ball in &mut manual {
            for _ in 0..3 {
                advance(ball, &scene.boundary, scene.gravity, 0.025 / 3.0);
            }
        }
        assert_eq!(scene.balls, manual);
    }

    #[test]
    fn test_balls_do_not_interact() {
        // Two balls at the same spot evolve identically and independently
        let mut scene = Scene::container(1, 0);
        let ball = Ball::new(Vec2::new(0.2, 0.2), Vec2::new(0.3, -0.4), 0.1);
        scene.balls = vec![ball, ball];
        let mut alone = ball;

        tick(&mut scene, 0.05);
        advance(&mut alone, &scene.boundary, scene.gravity, 0.05);
        assert_eq!(scene.balls[0], alone);
        assert_eq!(scene.balls[1], alone);
    }

    fn ball_in_container() -> impl Strategy<Value = Ball> {
        (0.0f32..0.9, 0.0f32..std::f32::consts::TAU, -3.0f32..3.0, -3.0f32..3.0).prop_map(
            |(r, theta, vx, vy)| {
                Ball::new(
                    Vec2::new(r * theta.cos(), r * theta.sin()),
                    Vec2::new(vx, vy),
                    BALL_RADIUS,
                )
            },
        )
    }

    proptest! {
        #[test]
        fn prop_container_invariant(mut ball in ball_in_container(), dt in 0.0f32..0.5) {
            advance(&mut ball, &Boundary::container(), GRAVITY, dt);
            let max_dist = CONTAINER_RADIUS - BALL_RADIUS;
            prop_assert!(ball.pos.length_squared() <= max_dist * max_dist + 1e-5);
        }

        #[test]
        fn prop_clamp_idempotent(mut ball in ball_in_container(), dt in 0.0f32..0.5) {
            let boundary = Boundary::container();
            advance(&mut ball, &boundary, GRAVITY, dt);
            let once = ball.pos;
            advance(&mut ball, &boundary, GRAVITY, 0.0);
            let twice = ball.pos;
            advance(&mut ball, &boundary, GRAVITY, 0.0);
            prop_assert!((once - twice).length() < 1e-5);
            prop_assert!((twice - ball.pos).length() < 1e-5);
        }

        #[test]
        fn prop_bounce_never_gains_speed(
            theta in 0.0f32..std::f32::consts::TAU,
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
        ) {
            // Ball already past the limit, so the zero-length step always collides
            let pos = Vec2::new(theta.cos(), theta.sin()) * 0.95;
            let mut ball = Ball::new(pos, Vec2::new(vx, vy), BALL_RADIUS);
            let before = ball.vel.length();
            advance(&mut ball, &Boundary::container(), GRAVITY, 0.0);
            prop_assert!(ball.vel.length() <= before + 1e-5);
        }

        #[test]
        fn prop_bounce_keeps_tangential_velocity(
            theta in 0.0f32..std::f32::consts::TAU,
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
        ) {
            let normal = Vec2::new(theta.cos(), theta.sin());
            let vel = Vec2::new(vx, vy);
            let mut ball = Ball::new(normal * 0.95, vel, BALL_RADIUS);
            advance(&mut ball, &Boundary::container(), 0.0, 0.0);

            let (along_before, tangential_before) = decompose_velocity(vel, normal);
            let (along_after, tangential_after) = decompose_velocity(ball.vel, normal);
            prop_assert!((tangential_after - tangential_before).length() < 1e-4);
            prop_assert!((along_after - along_before * CONTAINER_DAMPING).length() < 1e-4);
        }

        #[test]
        fn prop_floor_clamps_exactly(
            y in -0.9f32..0.9,
            vy in -5.0f32..0.0,
            dt in 0.0f32..0.5,
        ) {
            let mut ball = Ball::new(Vec2::new(0.0, y), Vec2::new(0.0, vy), BALL_RADIUS);
            let boundary = Boundary::floor();
            let predicted = y + (vy + GRAVITY * dt) * dt;
            advance(&mut ball, &boundary, GRAVITY, dt);
            if predicted - BALL_RADIUS < FLOOR_Y {
                prop_assert_eq!(ball.pos.y, FLOOR_Y + BALL_RADIUS);
                prop_assert!(ball.vel.y == 0.0 || ball.vel.y.abs() >= REST_THRESHOLD);
            }
            prop_assert!(ball.pos.y >= FLOOR_Y + BALL_RADIUS - 1e-6);
        }
    }
}
