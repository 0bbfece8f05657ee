use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use cubewalk::camera::MoveDirection;
use cubewalk::engine::WalkEngine;
use cubewalk::options::Options;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

struct WalkApp {
    window: Option<Arc<Window>>,
    engine: Option<WalkEngine>,
    last_frame_time: Instant,
    options: Options,
}

impl WalkApp {
    fn new(options: Options) -> Self {
        Self {
            window: None,
            engine: None,
            last_frame_time: Instant::now(),
            options,
        }
    }
}

/// Grab and hide the cursor so mouse travel drives the camera instead of
/// a pointer. Locked grab is not available everywhere; fall back to
/// confined, then to a visible cursor with a warning.
fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    match grabbed {
        Ok(()) => window.set_cursor_visible(false),
        Err(e) => log::warn!("cursor grab unavailable: {e}"),
    }
}

fn movement_binding(code: KeyCode) -> Option<MoveDirection> {
    match code {
        KeyCode::KeyW => Some(MoveDirection::Forward),
        KeyCode::KeyS => Some(MoveDirection::Backward),
        KeyCode::KeyA => Some(MoveDirection::Left),
        KeyCode::KeyD => Some(MoveDirection::Right),
        _ => None,
    }
}

impl ApplicationHandler for WalkApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = Window::default_attributes()
                .with_title(self.options.window.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.options.window.width,
                    self.options.window.height,
                ));
            let window = match event_loop.create_window(attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("window creation failed: {e}");
                    event_loop.exit();
                    return;
                }
            };
            capture_cursor(&window);

            let size = window.inner_size();
            let engine = pollster::block_on(WalkEngine::new(
                window.clone(),
                (size.width, size.height),
                &self.options,
            ));
            let engine = match engine {
                Ok(engine) => engine,
                Err(e) => {
                    log::error!("engine setup failed: {e}");
                    event_loop.exit();
                    return;
                }
            };

            self.last_frame_time = Instant::now();
            window.request_redraw();
            self.window = Some(window);
            self.engine = Some(engine);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::Focused(focused) => {
                if let Some(engine) = &mut self.engine {
                    if focused {
                        if let Some(window) = &self.window {
                            capture_cursor(window);
                        }
                    }
                    engine.reset_mouse_look();
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    let now = Instant::now();
                    let dt =
                        now.duration_since(self.last_frame_time).as_secs_f32();
                    self.last_frame_time = now;

                    engine.update(dt);
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            let inner = window.inner_size();
                            engine.resize(inner.width, inner.height);
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine
                        .cursor_moved(position.x as f32, position.y as f32);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => {
                            pos.y as f32 * 0.01
                        }
                    };
                    engine.scrolled(scroll);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if code == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                if let (Some(engine), Some(direction)) =
                    (&mut self.engine, movement_binding(code))
                {
                    let held = event.state == ElementState::Pressed;
                    engine.movement_key(direction, held);
                }
            }

            _ => (),
        }
    }
}

fn main() {
    env_logger::init();

    // Optional single argument: path to a TOML options preset.
    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load options {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("event loop creation failed: {e}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = WalkApp::new(options);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {e}");
        std::process::exit(1);
    }
}
