use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use trilab_common::{ColoredVertex, Rgba};
use trilab_render::FrameDraw;
use wgpu::util::DeviceExt;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Samples per pixel for the color and depth targets; resolved into the surface.
pub const SAMPLE_COUNT: u32 = 4;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

impl Uniforms {
    fn from_frame(frame: &FrameDraw) -> Self {
        Self {
            view_proj: frame.view.view_projection().to_cols_array_2d(),
            model: frame.model.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 4],
}

impl From<ColoredVertex> for Vertex {
    fn from(v: ColoredVertex) -> Self {
        Self {
            position: v.position.to_array(),
            color: v.color.to_array(),
        }
    }
}

/// Convert a clear color for a render pass.
pub fn wgpu_color(c: Rgba) -> wgpu::Color {
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: c.a as f64,
    }
}

/// wgpu renderer for a single colored triangle.
pub struct TriangleRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    depth_texture: wgpu::TextureView,
    msaa_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl TriangleRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle_uniforms"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                model: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("triangle_uniform_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("triangle_uniform_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangle_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("triangle_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::TRIANGLE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // Both faces are visible while the triangle spins.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: multisample_state(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("triangle_vertex_buffer"),
            size: (3 * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = device
            .create_texture(&depth_descriptor(width, height))
            .create_view(&Default::default());
        let msaa_texture = device
            .create_texture(&msaa_descriptor(surface_format, width, height))
            .create_view(&Default::default());

        tracing::debug!(
            ?surface_format,
            width,
            height,
            samples = SAMPLE_COUNT,
            "triangle renderer ready"
        );

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            depth_texture,
            msaa_texture,
            surface_format,
        }
    }

    /// Recreate the depth and multisample targets at the new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = device
            .create_texture(&depth_descriptor(width, height))
            .create_view(&Default::default());
        self.msaa_texture = device
            .create_texture(&msaa_descriptor(self.surface_format, width, height))
            .create_view(&Default::default());
    }

    /// Clear color and depth, draw the frame's triangle multisampled, and
    /// resolve into `view`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &FrameDraw,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::from_frame(frame)),
        );
        let vertices = frame.vertices.map(Vertex::from);
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("triangle_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("triangle_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_texture,
                    resolve_target: Some(view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu_color(frame.clear)),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.draw(0..vertices.len() as u32, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

fn multisample_state() -> wgpu::MultisampleState {
    wgpu::MultisampleState {
        count: SAMPLE_COUNT,
        ..Default::default()
    }
}

fn target_size(width: u32, height: u32) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: width.max(1),
        height: height.max(1),
        depth_or_array_layers: 1,
    }
}

fn depth_descriptor(width: u32, height: u32) -> wgpu::TextureDescriptor<'static> {
    wgpu::TextureDescriptor {
        label: Some("triangle_depth"),
        size: target_size(width, height),
        mip_level_count: 1,
        sample_count: SAMPLE_COUNT,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    }
}

/// Multisampled color target; matches the surface format so it can resolve into it.
fn msaa_descriptor(
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> wgpu::TextureDescriptor<'static> {
    wgpu::TextureDescriptor {
        label: Some("triangle_msaa"),
        size: target_size(width, height),
        mip_level_count: 1,
        sample_count: SAMPLE_COUNT,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use trilab_render::RenderView;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 7 * 4);
        assert_eq!(std::mem::size_of::<Uniforms>(), 2 * 16 * 4);
    }

    #[test]
    fn vertex_from_colored_vertex() {
        let v = Vertex::from(ColoredVertex {
            position: Vec3::new(1.0, 2.0, 3.0),
            color: Rgba {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 0.4,
            },
        });
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert_eq!(v.color, [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn uniforms_carry_view_and_model() {
        let view = RenderView {
            distance: 60.0,
            aspect: 1.0,
            fov: trilab_render::FIELD_OF_VIEW,
            near: trilab_render::NEAR_PLANE,
            far: trilab_render::FAR_PLANE,
        };
        let model = Mat4::from_rotation_y(0.5) * Mat4::from_rotation_x(-0.25);
        let frame = FrameDraw {
            clear: Rgba::default(),
            view,
            model,
            vertices: trilab_common::Triangle::default().uniform(Rgba::default()),
        };
        let u = Uniforms::from_frame(&frame);
        assert_eq!(u.model, model.to_cols_array_2d());
        assert_eq!(u.view_proj, view.view_projection().to_cols_array_2d());
    }

    #[test]
    fn multisample_targets_agree() {
        let format = wgpu::TextureFormat::Bgra8Unorm;
        let depth = depth_descriptor(800, 600);
        let msaa = msaa_descriptor(format, 800, 600);
        assert!(SAMPLE_COUNT > 1);
        assert_eq!(multisample_state().count, SAMPLE_COUNT);
        assert_eq!(depth.sample_count, SAMPLE_COUNT);
        assert_eq!(msaa.sample_count, SAMPLE_COUNT);
        assert_eq!(msaa.format, format);
        assert_eq!(depth.format, DEPTH_FORMAT);
        assert_eq!(depth.size, msaa.size);
    }

    #[test]
    fn targets_never_zero_sized() {
        let size = depth_descriptor(0, 0).size;
        assert_eq!((size.width, size.height), (1, 1));
        assert_eq!(msaa_descriptor(wgpu::TextureFormat::Bgra8Unorm, 0, 7).size.height, 7);
    }

    #[test]
    fn clear_color_converts() {
        let c = wgpu_color(Rgba::from_u8(255, 0, 0));
        assert_eq!(c.r, 1.0);
        assert_eq!(c.a, 1.0);
    }
}
