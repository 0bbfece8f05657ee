//! Ties the pieces together: one render context, one camera rig, one
//! texture, one cube pipeline, and the per-frame update/render cycle the
//! winit shell drives.

use std::path::Path;

use crate::camera::{CameraRig, MouseLook, MoveDirection};
use crate::error::CubewalkError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader;
use crate::gpu::texture::{SceneTexture, TextureOptions};
use crate::input::KeyboardState;
use crate::options::Options;
use crate::renderer::CubeRenderer;

/// WGSL shader read from disk at startup.
pub const SHADER_PATH: &str = "assets/shaders/cube.wgsl";
/// Image applied to every cube face.
pub const TEXTURE_PATH: &str = "assets/textures/crate.png";

/// The running demo: GPU resources plus the camera and input state the
/// frame loop mutates. Single-threaded; one instance owns everything.
pub struct WalkEngine {
    context: RenderContext,
    rig: CameraRig,
    keyboard: KeyboardState,
    mouse: MouseLook,
    texture: SceneTexture,
    cubes: CubeRenderer,
}

impl WalkEngine {
    /// Bring up the GPU, load the shader and texture from disk, and build
    /// the cube pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`CubewalkError`] if GPU bring-up fails or either asset is
    /// missing/invalid.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: &Options,
    ) -> Result<Self, CubewalkError> {
        let context = RenderContext::new(window, initial_size).await?;

        let shader_module = shader::load_wgsl(
            &context.device,
            "Cube Shader",
            Path::new(SHADER_PATH),
        )?;
        let texture = SceneTexture::load(
            &context,
            Path::new(TEXTURE_PATH),
            &TextureOptions::default(),
        )?;

        let rig = CameraRig::new(&context, &options.camera);
        let cubes = CubeRenderer::new(
            &context,
            &shader_module,
            rig.layout(),
            texture.layout(),
        );

        Ok(Self {
            context,
            rig,
            keyboard: KeyboardState::new(),
            mouse: MouseLook::new(),
            texture,
            cubes,
        })
    }

    /// Adopt a new surface size: reconfigure the swapchain, the depth
    /// buffer, and the projection aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.rig.resize(width, height);
        self.cubes.resize(&self.context);
    }

    /// Record a movement-key press or release.
    pub fn movement_key(&mut self, direction: MoveDirection, held: bool) {
        self.keyboard.set(direction, held);
    }

    /// Feed an absolute cursor position for mouse look.
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        let constrain = self.rig.constrain_pitch();
        self.mouse
            .cursor_moved(&mut self.rig.camera, x, y, constrain);
    }

    /// Feed a scroll delta (positive = zoom in).
    pub fn scrolled(&mut self, delta: f32) {
        self.rig.camera.zoom(delta);
    }

    /// Drop the mouse-look anchor, e.g. after focus loss, so the next
    /// cursor sample primes instead of jerking the view.
    pub fn reset_mouse_look(&mut self) {
        self.mouse.reset();
    }

    /// Advance one frame: integrate held movement keys, spin the cubes,
    /// and push the refreshed camera uniform.
    pub fn update(&mut self, dt: f32) {
        self.rig.advance_held(&self.keyboard, dt);
        self.cubes.update(&self.context.queue, dt);
        self.rig.update_gpu(&self.context.queue);
    }

    /// Render one frame to the swapchain.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the surface needs to be
    /// reconfigured (lost/outdated) or the frame timed out.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        self.cubes.draw(
            &mut encoder,
            &view,
            self.rig.bind_group(),
            self.texture.bind_group(),
        );
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}
