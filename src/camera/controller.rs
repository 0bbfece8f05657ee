use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::render_context::RenderContext;
use crate::input::KeyboardState;
use crate::options::CameraOptions;

/// Where the walkthrough starts: a few units back from the cube field,
/// looking down -Z.
const START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);
const START_YAW: f32 = -90.0;
const START_PITCH: f32 = 0.0;

/// A [`Camera`] plus its GPU residence: the uniform buffer the
/// view-projection matrix lives in, the bind group the pipeline reads it
/// through, and the projection parameters that are not the camera's
/// business (aspect ratio, clip planes).
pub struct CameraRig {
    /// The camera model. Mutated by input handling every frame.
    pub camera: Camera,
    uniform: CameraUniform,
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,

    aspect: f32,
    znear: f32,
    zfar: f32,
    constrain_pitch: bool,
}

impl CameraRig {
    /// Build the rig: camera at the start pose, uniform buffer seeded with
    /// its first view-projection, bind group ready for pipeline layouts.
    #[must_use]
    pub fn new(context: &RenderContext, opts: &CameraOptions) -> Self {
        let mut camera =
            Camera::new(START_POSITION, Vec3::Y, START_YAW, START_PITCH);
        camera.movement_speed = opts.movement_speed;
        camera.mouse_sensitivity = opts.mouse_sensitivity;
        camera.set_fov(opts.fov);

        let aspect =
            context.config.width as f32 / context.config.height as f32;

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, aspect, opts.znear, opts.zfar);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
            aspect,
            znear: opts.znear,
            zfar: opts.zfar,
            constrain_pitch: opts.constrain_pitch,
        }
    }

    /// Bind group layout for pipeline creation (group 0).
    #[must_use]
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group to set at draw time.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Whether mouse look should clamp pitch (from options).
    #[must_use]
    pub fn constrain_pitch(&self) -> bool {
        self.constrain_pitch
    }

    /// Integrate movement for every direction currently held.
    pub fn advance_held(&mut self, keyboard: &KeyboardState, dt: f32) {
        for direction in keyboard.active() {
            self.camera.advance(direction, dt);
        }
    }

    /// Track a new surface aspect ratio after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Rebuild the uniform from camera state and push it to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(
            &self.camera,
            self.aspect,
            self.znear,
            self.zfar,
        );
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}
