//! Vertex and uniform types shared with the shader

use bytemuck::{Pod, Zeroable};

/// Mesh vertex, object space
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            position: [x, y, 0.0],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Per-draw uniform (must match `BallUniform` in shader.wgsl)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BallUniform {
    pub offset: [f32; 2], // offset 0
    pub _pad: [f32; 2],   // offset 8 - WGSL aligns vec4 to 16
    pub color: [f32; 4],  // offset 16
}

impl BallUniform {
    pub fn new(offset: [f32; 2], rgb: [f32; 3]) -> Self {
        Self {
            offset,
            _pad: [0.0; 2],
            color: [rgb[0], rgb[1], rgb[2], 1.0],
        }
    }
}
