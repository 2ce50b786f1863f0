use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use cgmath::{Point3, Transform as _};

use crate::paint::{Color, Pass, Rgba8};
use crate::platform::{DrawCmd, Shape};
use crate::transform::Transform;

/// Window-space vertex with a linear premultiplied color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4  // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// Corner order: bit 0 = +x, bit 1 = +y, bit 2 = +z.
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 3, 2], // -z
    [4, 6, 7, 5], // +z
    [0, 2, 6, 4], // -x
    [1, 5, 7, 3], // +x
    [0, 4, 5, 1], // -y
    [2, 3, 7, 6], // +y
];

#[rustfmt::skip]
const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 1], [2, 3], [4, 5], [6, 7],
    [0, 2], [1, 3], [4, 6], [5, 7],
    [0, 4], [1, 5], [2, 6], [3, 7],
];

/// A run of consecutive draws of one pass.
///
/// `range` indexes `MeshBatch::triangles` for fills and `MeshBatch::lines`
/// for strokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub pass: Pass,
    pub range: Range<u32>,
}

/// One frame of geometry.
///
/// Fills are triangle lists, strokes line lists. `segments` records the
/// submission order across both, so a renderer replaying them in order draws
/// later shapes over earlier ones.
#[derive(Debug)]
pub struct MeshBatch {
    pub triangles: Vec<Vertex>,
    pub lines: Vec<Vertex>,
    pub segments: Vec<Segment>,
    background: Rgba8,
}

impl MeshBatch {
    pub fn new(background: Rgba8) -> Self {
        Self {
            triangles: Vec::new(),
            lines: Vec::new(),
            segments: Vec::new(),
            background,
        }
    }

    /// Color the frame starts from.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Drops everything recorded so far and sets the background.
    pub fn clear(&mut self, color: Rgba8) {
        self.reset();
        self.background = color;
    }

    /// Empties the geometry for the next frame. The background persists.
    pub fn reset(&mut self) {
        self.triangles.clear();
        self.lines.clear();
        self.segments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.lines.is_empty()
    }

    /// Expands `cmd` into transformed vertices.
    pub fn push(&mut self, cmd: &DrawCmd) {
        let color = Color::from(cmd.color).to_array();
        let corners = corners(&cmd.shape, &cmd.transform);
        let start = self.len(cmd.pass);

        match (cmd.pass, &cmd.shape) {
            (Pass::Fill, Shape::Box { .. }) => {
                for face in BOX_FACES {
                    self.quad(&corners, face, color);
                }
            }
            (Pass::Fill, Shape::Rect { .. }) => self.quad(&corners, [0, 1, 2, 3], color),
            (Pass::Stroke, Shape::Box { .. }) => {
                for [a, b] in BOX_EDGES {
                    self.line(&corners, a, b, color);
                }
            }
            (Pass::Stroke, Shape::Rect { .. }) => {
                for i in 0..4 {
                    self.line(&corners, i, (i + 1) % 4, color);
                }
            }
        }

        self.extend_segment(cmd.pass, start);
    }

    fn len(&self, pass: Pass) -> u32 {
        match pass {
            Pass::Fill => self.triangles.len() as u32,
            Pass::Stroke => self.lines.len() as u32,
        }
    }

    /// Appends `start..len(pass)` to the trailing segment, or opens a new one
    /// when the pass changes.
    fn extend_segment(&mut self, pass: Pass, start: u32) {
        let end = self.len(pass);
        if start == end {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.pass == pass && last.range.end == start => last.range.end = end,
            _ => self.segments.push(Segment {
                pass,
                range: start..end,
            }),
        }
    }

    fn quad(&mut self, corners: &[[f32; 3]], [a, b, c, d]: [usize; 4], color: [f32; 4]) {
        for i in [a, b, c, a, c, d] {
            self.triangles.push(Vertex {
                position: corners[i],
                color,
            });
        }
    }

    fn line(&mut self, corners: &[[f32; 3]], a: usize, b: usize, color: [f32; 4]) {
        for i in [a, b] {
            self.lines.push(Vertex {
                position: corners[i],
                color,
            });
        }
    }
}

/// Shape corners after `transform`. Boxes yield 8, rects 4 (clockwise from top-left).
fn corners(shape: &Shape, transform: &Transform) -> Vec<[f32; 3]> {
    let local: Vec<Point3<f32>> = match *shape {
        Shape::Box { w, h, d } => (0..8)
            .map(|bits| {
                let pick = |bit: usize, extent: f32| {
                    if bits & bit != 0 { extent / 2.0 } else { -extent / 2.0 }
                };
                Point3::new(pick(1, w), pick(2, h), pick(4, d))
            })
            .collect(),
        Shape::Rect { x, y, w, h } => vec![
            Point3::new(x, y, 0.0),
            Point3::new(x + w, y, 0.0),
            Point3::new(x + w, y + h, 0.0),
            Point3::new(x, y + h, 0.0),
        ],
    };

    local
        .into_iter()
        .map(|p| {
            let p = transform.transform_point(p);
            [p.x, p.y, p.z]
        })
        .collect()
}
