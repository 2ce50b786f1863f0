//! Shared GPU types and utilities for the primitive renderers.

use bytemuck::{Pod, Zeroable};
use cgmath::Matrix4;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── camera uniform ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl From<Matrix4<f32>> for CameraUniform {
    fn from(m: Matrix4<f32>) -> Self {
        Self {
            view_proj: m.into(),
        }
    }
}

pub(super) fn camera_ubo_min_binding_size() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<CameraUniform>() as u64)
}

// ── buffer growth ─────────────────────────────────────────────────────────

/// Vertex capacity to allocate for `required` vertices.
pub(super) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(256)
}
