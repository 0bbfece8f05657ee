use glam::{Mat4, Quat, Vec3};
use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;

/// Window-clear color behind the cubes.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Vertex of the unit cube mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

const fn v(x: f32, y: f32, z: f32, u: f32, tv: f32) -> Vertex {
    Vertex {
        position: [x, y, z],
        uv: [u, tv],
    }
}

/// Unit cube spanning ±1, position + UV, 36 vertices (two triangles per
/// face), drawn without an index buffer.
pub const CUBE_VERTICES: [Vertex; 36] = [
    // Bottom
    v(-1.0, -1.0, -1.0, 0.0, 0.0),
    v(1.0, -1.0, -1.0, 1.0, 0.0),
    v(-1.0, -1.0, 1.0, 0.0, 1.0),
    v(1.0, -1.0, -1.0, 1.0, 0.0),
    v(1.0, -1.0, 1.0, 1.0, 1.0),
    v(-1.0, -1.0, 1.0, 0.0, 1.0),
    // Top
    v(-1.0, 1.0, -1.0, 0.0, 0.0),
    v(-1.0, 1.0, 1.0, 0.0, 1.0),
    v(1.0, 1.0, -1.0, 1.0, 0.0),
    v(1.0, 1.0, -1.0, 1.0, 0.0),
    v(-1.0, 1.0, 1.0, 0.0, 1.0),
    v(1.0, 1.0, 1.0, 1.0, 1.0),
    // Front
    v(-1.0, -1.0, 1.0, 1.0, 0.0),
    v(1.0, -1.0, 1.0, 0.0, 0.0),
    v(-1.0, 1.0, 1.0, 1.0, 1.0),
    v(1.0, -1.0, 1.0, 0.0, 0.0),
    v(1.0, 1.0, 1.0, 0.0, 1.0),
    v(-1.0, 1.0, 1.0, 1.0, 1.0),
    // Back
    v(-1.0, -1.0, -1.0, 0.0, 0.0),
    v(-1.0, 1.0, -1.0, 0.0, 1.0),
    v(1.0, -1.0, -1.0, 1.0, 0.0),
    v(1.0, -1.0, -1.0, 1.0, 0.0),
    v(-1.0, 1.0, -1.0, 0.0, 1.0),
    v(1.0, 1.0, -1.0, 1.0, 1.0),
    // Left
    v(-1.0, -1.0, 1.0, 0.0, 1.0),
    v(-1.0, 1.0, -1.0, 1.0, 0.0),
    v(-1.0, -1.0, -1.0, 0.0, 0.0),
    v(-1.0, -1.0, 1.0, 0.0, 1.0),
    v(-1.0, 1.0, 1.0, 1.0, 1.0),
    v(-1.0, 1.0, -1.0, 1.0, 0.0),
    // Right
    v(1.0, -1.0, 1.0, 1.0, 1.0),
    v(1.0, -1.0, -1.0, 1.0, 0.0),
    v(1.0, 1.0, -1.0, 0.0, 0.0),
    v(1.0, -1.0, 1.0, 1.0, 1.0),
    v(1.0, 1.0, -1.0, 0.0, 0.0),
    v(1.0, 1.0, 1.0, 0.0, 1.0),
];

/// Per-cube data fed to the vertex stage as instance attributes.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeInstance {
    /// Model matrix as four column vectors (locations 2..=5).
    pub model: [[f32; 4]; 4],
}

/// A cube's place in the world plus its spin state.
#[derive(Debug, Clone, Copy)]
pub struct CubePlacement {
    /// World-space center.
    pub position: Vec3,
    /// Rotation axis (normalized at matrix build time).
    pub axis: Vec3,
    /// Current rotation angle, radians.
    pub angle: f32,
    /// Angular velocity, radians per second.
    pub spin: f32,
}

impl CubePlacement {
    /// Model matrix for the current angle.
    #[must_use]
    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_axis_angle(self.axis.normalize(), self.angle),
            self.position,
        )
    }

    fn instance(&self) -> CubeInstance {
        CubeInstance {
            model: self.model().to_cols_array_2d(),
        }
    }
}

/// The field of cubes the camera walks through. Positions are spread so
/// there is something to look at in every direction from the start pose.
#[must_use]
pub fn cube_field() -> Vec<CubePlacement> {
    let positions = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 5.0, -15.0),
        Vec3::new(-1.5, -2.2, -2.5),
        Vec3::new(-3.8, -2.0, -12.3),
        Vec3::new(2.4, -0.4, -3.5),
        Vec3::new(-1.7, 3.0, -7.5),
        Vec3::new(1.3, -2.0, -2.5),
        Vec3::new(1.5, 2.0, -2.5),
        Vec3::new(1.5, 0.2, -1.5),
        Vec3::new(-1.3, 1.0, -1.5),
    ];
    positions
        .iter()
        .enumerate()
        .map(|(i, &position)| CubePlacement {
            position,
            axis: Vec3::new(1.0, 0.3, 0.5),
            angle: (20.0 * i as f32).to_radians(),
            spin: 0.2 + 0.05 * i as f32,
        })
        .collect()
}

/// Instanced textured-cube pipeline, its buffers, and the depth target.
pub struct CubeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    depth_view: wgpu::TextureView,
    cubes: Vec<CubePlacement>,
}

impl CubeRenderer {
    /// Build the pipeline against the camera (group 0) and texture
    /// (group 1) layouts, upload the cube mesh, and seed the instance
    /// buffer with the cube field.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        camera_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let cubes = cube_field();

        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let instances: Vec<CubeInstance> =
            cubes.iter().map(CubePlacement::instance).collect();
        let instance_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Cube Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let pipeline =
            Self::create_pipeline(context, shader, camera_layout, texture_layout);
        let depth_view = create_depth_view(
            &context.device,
            context.config.width,
            context.config.height,
        );

        Self {
            pipeline,
            vertex_buffer,
            instance_buffer,
            depth_view,
            cubes,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        camera_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Cube Pipeline Layout"),
                bind_group_layouts: &[camera_layout, texture_layout],
                push_constant_ranges: &[],
            },
        );

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // position
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 12,
                    shader_location: 1, // uv
                },
            ],
        };

        // Model matrix as 4 vec4 columns.
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<CubeInstance>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 4,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 48,
                    shader_location: 5,
                },
            ],
        };

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Cube Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout, instance_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.config.format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    // The mesh's winding is mixed; depth testing alone
                    // sorts faces out.
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Recreate the depth buffer for a new surface size.
    pub fn resize(&mut self, context: &RenderContext) {
        self.depth_view = create_depth_view(
            &context.device,
            context.config.width,
            context.config.height,
        );
    }

    /// Advance each cube's spin and rewrite the instance buffer.
    pub fn update(&mut self, queue: &wgpu::Queue, dt: f32) {
        for cube in &mut self.cubes {
            cube.angle += cube.spin * dt;
        }
        let instances: Vec<CubeInstance> =
            self.cubes.iter().map(CubePlacement::instance).collect();
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&instances),
        );
    }

    /// Record the scene's single render pass.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        camera_bind_group: &wgpu::BindGroup,
        texture_bind_group: &wgpu::BindGroup,
    ) {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
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
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_bind_group(1, texture_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.draw(0..CUBE_VERTICES.len() as u32, 0..self.cubes.len() as u32);
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Buffer"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_mesh_is_twelve_triangles() {
        assert_eq!(CUBE_VERTICES.len(), 36);
        // All positions on the ±1 shell.
        for vertex in &CUBE_VERTICES {
            assert!(vertex
                .position
                .iter()
                .any(|c| c.abs() == 1.0));
        }
    }

    #[test]
    fn vertex_stride_matches_layout_offsets() {
        assert_eq!(size_of::<Vertex>(), 20);
        assert_eq!(size_of::<CubeInstance>(), 64);
    }

    #[test]
    fn placement_model_translates_to_position() {
        let placement = CubePlacement {
            position: Vec3::new(2.0, 5.0, -15.0),
            axis: Vec3::Y,
            angle: 1.2,
            spin: 0.0,
        };
        let model = placement.model();
        let translation = model.w_axis.truncate();
        assert!((translation - placement.position).length() < 1e-6);
    }

    #[test]
    fn field_has_a_cube_at_the_origin() {
        let field = cube_field();
        assert_eq!(field.len(), 10);
        assert_eq!(field[0].position, Vec3::ZERO);
        // Spin rates differ so the field does not move in lockstep.
        assert!(field[1].spin > field[0].spin);
    }
}
