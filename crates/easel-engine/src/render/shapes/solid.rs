use crate::device::DEPTH_FORMAT;
use crate::paint::{Color, Pass};
use crate::render::{MeshBatch, RenderCtx, RenderTarget, Vertex};

use super::common::{CameraUniform, camera_ubo_min_binding_size, grown_capacity, premul_alpha_blend};

/// Flat-colored triangle and line renderer with depth testing.
///
/// Draws a `MeshBatch` in one pass: the color target is cleared to the batch
/// background, then the batch segments are replayed in submission order,
/// switching between the fill and stroke pipelines as the pass changes.
/// Strokes pass the depth test where they lie on a face (`LessEqual`), so
/// edges stay visible.
#[derive(Default)]
pub struct SolidRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    fill_pipeline: Option<wgpu::RenderPipeline>,
    stroke_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    fill_vbo: Option<wgpu::Buffer>,
    fill_capacity: usize,
    stroke_vbo: Option<wgpu::Buffer>,
    stroke_capacity: usize,
}

impl SolidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, batch: &MeshBatch) {
        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);
        self.write_camera_uniform(ctx);

        self.upload(ctx, &batch.triangles, Pass::Fill);
        self.upload(ctx, &batch.lines, Pass::Stroke);

        let [r, g, b, a] = Color::from(batch.background()).to_array();

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("easel solid pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(bind_group) = self.bind_group.as_ref() else { return };
        rpass.set_bind_group(0, bind_group, &[]);

        let mut bound = None;
        for segment in &batch.segments {
            let (pipeline, vbo) = match segment.pass {
                Pass::Fill => (self.fill_pipeline.as_ref(), self.fill_vbo.as_ref()),
                Pass::Stroke => (self.stroke_pipeline.as_ref(), self.stroke_vbo.as_ref()),
            };
            let (Some(pipeline), Some(vbo)) = (pipeline, vbo) else { continue };

            if bound != Some(segment.pass) {
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, vbo.slice(..));
                bound = Some(segment.pass);
            }
            rpass.draw(segment.range.clone(), 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format)
            && self.fill_pipeline.is_some()
            && self.stroke_pipeline.is_some()
        {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("easel solid shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/solid.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("easel solid bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: camera_ubo_min_binding_size(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("easel solid pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let build = |label: &str, topology: wgpu::PrimitiveTopology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(premul_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Winding flips with the camera's Y flip; draw both sides.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),

                multiview_mask: None,
                cache: None,
            })
        };

        self.fill_pipeline = Some(build(
            "easel fill pipeline",
            wgpu::PrimitiveTopology::TriangleList,
        ));
        self.stroke_pipeline = Some(build(
            "easel stroke pipeline",
            wgpu::PrimitiveTopology::LineList,
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.camera_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("easel camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("easel solid bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_camera_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        let u = CameraUniform::from(ctx.view_proj);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn upload(&mut self, ctx: &RenderCtx<'_>, vertices: &[Vertex], pass: Pass) {
        if vertices.is_empty() {
            return;
        }

        let (vbo, capacity, label) = match pass {
            Pass::Fill => (&mut self.fill_vbo, &mut self.fill_capacity, "easel fill vbo"),
            Pass::Stroke => (&mut self.stroke_vbo, &mut self.stroke_capacity, "easel stroke vbo"),
        };

        if vertices.len() > *capacity || vbo.is_none() {
            let new_cap = grown_capacity(vertices.len());
            *vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: (new_cap * std::mem::size_of::<Vertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            *capacity = new_cap;
            log::trace!("{label} grown to {new_cap} vertices");
        }

        if let Some(vbo) = vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
        }
    }
}
