//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for story elements
pub mod colors {
    use crate::hex_rgb;

    pub const NIGHT: [f32; 4] = hex_rgb(0x0a0a0a);
    pub const BLUSH_PINK: [f32; 4] = hex_rgb(0xfdf2f8);
    pub const BLUSH_WHITE: [f32; 4] = hex_rgb(0xffffff);
    pub const BLUSH_PURPLE: [f32; 4] = hex_rgb(0xfaf5ff);
    pub const DREAMY_CENTER: [f32; 4] = hex_rgb(0x0f172a);
    pub const DREAMY_MID: [f32; 4] = hex_rgb(0x020617);
    pub const DREAMY_EDGE: [f32; 4] = hex_rgb(0x000000);
    pub const EXPLOSION_FLASH: [f32; 4] = hex_rgb(0xffffff);

    pub const STAR: [f32; 4] = hex_rgb(0xffffff);
    pub const RAY: [f32; 4] = hex_rgb(0xffffff);
    pub const GLOW: [f32; 4] = hex_rgb(0xfbcfe8);
    pub const HEART: [f32; 4] = hex_rgb(0xec4899);
    pub const CARD_HEART: [f32; 4] = hex_rgb(0xf472b6);
    pub const TEDDY: [f32; 4] = hex_rgb(0xb7793f);
    pub const TEDDY_MUZZLE: [f32; 4] = hex_rgb(0xe8c39e);

    pub const GIFT_BOX: [f32; 4] = hex_rgb(0xf43f5e);
    pub const GIFT_RIBBON: [f32; 4] = hex_rgb(0xfda4af);
    pub const GIFT_BOW: [f32; 4] = hex_rgb(0xffffff);
    pub const GIFT_HALO: [f32; 4] = hex_rgb(0xffffff);

    pub const CARD: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
    pub const CARD_BORDER: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const NAME_GLOW: [f32; 4] = hex_rgb(0xfbcfe8);

    pub const CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
