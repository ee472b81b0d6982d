//! Shape generation for 2D primitives

use std::f32::consts::PI;

use anyhow::Context;

use super::vertex::Vertex;

/// Filled circle as a triangle fan: the centre followed by `segments + 1`
/// rim points, the last one repeating the first.
pub fn circle_fan(radius: f32, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(segments as usize + 2);
    vertices.push(Vertex::new(0.0, 0.0));

    for i in 0..=segments {
        let theta = 2.0 * PI * i as f32 / segments as f32;
        vertices.push(Vertex::new(radius * theta.cos(), radius * theta.sin()));
    }

    vertices
}

/// Triangle-list indices drawing a fan built by [`circle_fan`].
///
/// Fails when the fan's `segments + 2` vertices cannot be addressed by `u16`.
pub fn fan_indices(segments: u32) -> anyhow::Result<Vec<u16>> {
    let last = segments
        .checked_add(1)
        .and_then(|last| u16::try_from(last).ok())
        .with_context(|| format!("{segments} segments do not fit a u16 index buffer"))?;
    Ok((1..last).flat_map(|i| [0, i, i + 1]).collect())
}
