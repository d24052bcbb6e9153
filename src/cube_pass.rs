//! Render pass drawing the puzzle: world axes, local axes and the 27 cubies.
//!
//! The pass owns two pipelines sharing one layout:
//! - **Group 0**: per-draw uniforms (MVP matrix and tint) in a single buffer, selected
//!   with a dynamic offset so all 29 draws of a frame are uploaded with one write
//! - **Group 1**: sticker texture and sampler
//!
//! Axis lines are drawn first, without depth testing, and cubies on top with depth
//! testing and back-face culling.
//!
//! # Depth Buffer
//!
//! The pass keeps its own depth buffer. Call [`CubePass::ensure_depth_size`] after
//! the window is resized.

use glam::{Mat4, Vec4};

use crate::camera::Camera;
use crate::cubies::CUBIE_COUNT;
use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex};
use crate::texture::Texture;

/// Number of draws per frame: world axes, local axes, then one per cubie.
pub const DRAWS_PER_FRAME: usize = 2 + CUBIE_COUNT;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.12,
    a: 1.0,
};

/// Per-draw uniforms.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    /// Model-view-projection matrix.
    pub mvp: [[f32; 4]; 4],
    /// RGB multiplier applied to vertex colors; alpha is unused.
    pub tint: [f32; 4],
}

impl DrawUniforms {
    fn new(mvp: Mat4, tint: Vec4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            tint: tint.to_array(),
        }
    }
}

/// MVP matrices for one frame, in draw order.
///
/// World axes get `view_proj`, local axes `view_proj * global`, and each cubie
/// `view_proj * global * cubie`.
pub fn frame_matrices(view_proj: Mat4, global: Mat4, cubies: &[Mat4]) -> Vec<Mat4> {
    let rotated = view_proj * global;
    let mut matrices = Vec::with_capacity(2 + cubies.len());
    matrices.push(view_proj);
    matrices.push(rotated);
    matrices.extend(cubies.iter().map(|cubie| rotated * *cubie));
    matrices
}

/// Round `size` up to a multiple of `alignment`.
fn aligned_stride(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

/// Draws the puzzle into a surface texture.
pub struct CubePass {
    face_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_stride: u64,
    texture_bind_group: wgpu::BindGroup,
    cubie_mesh: Mesh,
    axes_mesh: Mesh,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
    staging: Vec<u8>,
}

impl CubePass {
    /// Create the pipelines, meshes and buffers.
    ///
    /// `sticker` is sampled on every face and multiplied with the face color; with
    /// `None` a 1x1 white texture is used and faces show their plain colors.
    pub fn new(gpu: &GpuContext, sticker: Option<Texture>) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Cube Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/cube.wgsl").into()),
        });

        // Uniforms (group 0)
        let uniform_size = std::mem::size_of::<DrawUniforms>() as u64;
        let uniform_stride = aligned_stride(
            uniform_size,
            u64::from(device.limits().min_uniform_buffer_offset_alignment),
        );
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cube Draw Uniforms"),
            size: uniform_stride * DRAWS_PER_FRAME as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Cube Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(uniform_size),
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(uniform_size),
                }),
            }],
        });

        // Sticker texture (group 1)
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Sticker Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let sticker = sticker.unwrap_or_else(|| Texture::white(gpu));
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sticker Bind Group"),
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&sticker.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sticker.sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let face_pipeline = Self::create_pipeline(
            gpu,
            &pipeline_layout,
            &shader,
            "Cubie Face Pipeline",
            "fs_face",
            wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            true,
            wgpu::CompareFunction::Less,
        );

        let line_pipeline = Self::create_pipeline(
            gpu,
            &pipeline_layout,
            &shader,
            "Axis Line Pipeline",
            "fs_line",
            wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            false,
            wgpu::CompareFunction::Always,
        );

        Self {
            face_pipeline,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniform_stride,
            texture_bind_group,
            cubie_mesh: Mesh::cubie(gpu),
            axes_mesh: Mesh::axes(gpu),
            depth_view: Self::create_depth_view(gpu),
            depth_size: (gpu.width(), gpu.height()),
            staging: vec![0; (uniform_stride as usize) * DRAWS_PER_FRAME],
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        gpu: &GpuContext,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        label: &str,
        fragment_entry: &str,
        primitive: wgpu::PrimitiveState,
        depth_write_enabled: bool,
        depth_compare: wgpu::CompareFunction,
    ) -> wgpu::RenderPipeline {
        gpu.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs"),
                    buffers: &[Vertex::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some(fragment_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive,
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled,
                    depth_compare,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Cube Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreate the depth buffer if the surface size changed.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// Record and submit one frame into `target`.
    ///
    /// `global` is the whole-cube rotation and `cubies` the per-cubie transforms.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        target: &wgpu::TextureView,
        camera: &Camera,
        global: Mat4,
        cubies: &[Mat4],
    ) {
        self.ensure_depth_size(gpu);

        let matrices = frame_matrices(camera.view_projection(gpu.aspect()), global, cubies);
        let draw_count = matrices.len().min(DRAWS_PER_FRAME);
        let stride = self.uniform_stride as usize;
        for (slot, mvp) in matrices.iter().take(draw_count).enumerate() {
            let uniforms = DrawUniforms::new(*mvp, Vec4::ONE);
            let start = slot * stride;
            self.staging[start..start + std::mem::size_of::<DrawUniforms>()]
                .copy_from_slice(bytemuck::bytes_of(&uniforms));
        }
        gpu.queue.write_buffer(
            &self.uniform_buffer,
            0,
            &self.staging[..draw_count * stride],
        );

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Cube Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cube Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(1, &self.texture_bind_group, &[]);

            render_pass.set_pipeline(&self.line_pipeline);
            for slot in 0..draw_count.min(2) {
                let offset = (slot * stride) as u32;
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
                self.axes_mesh.draw(&mut render_pass);
            }

            render_pass.set_pipeline(&self.face_pipeline);
            for slot in 2..draw_count {
                let offset = (slot * stride) as u32;
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
                self.cubie_mesh.draw(&mut render_pass);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubies::CubieRegistry;

    #[test]
    fn one_draw_per_axis_set_and_cubie() {
        let registry = CubieRegistry::new();
        let matrices = frame_matrices(Mat4::IDENTITY, Mat4::IDENTITY, registry.transforms());
        assert_eq!(matrices.len(), DRAWS_PER_FRAME);
    }

    #[test]
    fn world_axes_ignore_the_global_rotation() {
        let view_proj = Mat4::from_translation(glam::Vec3::new(0.0, 0.0, -10.0));
        let global = Mat4::from_rotation_y(1.0);
        let cubie = Mat4::from_translation(glam::Vec3::X);
        let matrices = frame_matrices(view_proj, global, &[cubie]);

        assert_eq!(matrices[0], view_proj);
        assert!(matrices[1].abs_diff_eq(view_proj * global, 1e-6));
        assert!(matrices[2].abs_diff_eq(view_proj * global * cubie, 1e-6));
    }

    #[test]
    fn stride_respects_alignment() {
        assert_eq!(aligned_stride(80, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(80, 16), 80);
    }
}
