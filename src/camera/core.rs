use glam::{Mat4, Vec3};

/// Pitch magnitude beyond which the basis degenerates (gimbal flip), so
/// constrained look clamps just short of straight up/down.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest allowed vertical field of view, in degrees.
pub const FOV_MIN: f32 = 1.0;
/// Widest allowed vertical field of view, in degrees.
pub const FOV_MAX: f32 = 45.0;

const DEFAULT_MOVEMENT_SPEED: f32 = 2.5;
const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.1;

/// Horizontal movement directions relative to the current orientation.
///
/// Invalid directions are unrepresentable; movement never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Along the front vector.
    Forward,
    /// Against the front vector.
    Backward,
    /// Against the right vector (strafe left).
    Left,
    /// Along the right vector (strafe right).
    Right,
}

/// First-person camera.
///
/// Yaw and pitch (degrees) are the only independent orientation state;
/// `front`/`right`/`up` are a pure function of `(yaw, pitch, world_up)`
/// and are re-derived together after every orientation change. They stay
/// mutually orthogonal unit vectors from construction onward.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// World-units-per-second movement rate.
    pub movement_speed: f32,
    /// Degrees of yaw/pitch per screen pixel of mouse travel.
    pub mouse_sensitivity: f32,

    // Derived basis: writable only through update_vectors.
    front: Vec3,
    right: Vec3,
    up: Vec3,

    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
}

impl Camera {
    /// Create a camera at `position` with the given world-up reference and
    /// initial yaw/pitch in degrees.
    ///
    /// The basis is derived immediately, so the camera is usable (view
    /// matrix and all) straight away.
    #[must_use]
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up,
            yaw,
            pitch,
            fov: FOV_MAX,
        };
        camera.update_vectors();
        camera
    }

    /// Unit vector the camera looks along.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit vector to the camera's right.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit vector out of the top of the camera.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Current yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees, always within
    /// [`FOV_MIN`]..=[`FOV_MAX`].
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Set the field of view, clamped to [`FOV_MIN`]..=[`FOV_MAX`].
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(FOV_MIN, FOV_MAX);
    }

    /// World-to-camera transform: the right-handed look-at built from
    /// `(position, position + front, up)`. Pure; callable any number of
    /// times per frame.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Displace the camera along its basis for `dt` seconds of travel.
    pub fn advance(&mut self, direction: MoveDirection, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
        }
    }

    /// Apply a mouse-look delta in screen pixels.
    ///
    /// `dy` is expected pre-inverted (positive = look up). With
    /// `constrain_pitch` the stored pitch clamps to ±[`PITCH_LIMIT`],
    /// keeping the basis away from the gimbal flip at ±90°.
    pub fn look(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch += dy * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Narrow or widen the field of view by a scroll delta (positive =
    /// zoom in), clamped to [`FOV_MIN`]..=[`FOV_MAX`].
    pub fn zoom(&mut self, delta: f32) {
        self.set_fov(self.fov - delta);
    }

    /// Re-derive `front`, `right`, `up` from `(yaw, pitch, world_up)`.
    ///
    /// Order matters: `right` comes from `front × world_up` before `up`
    /// comes from `right × front`, which keeps the triad orthogonal even
    /// though `world_up` is generally not orthogonal to `front`.
    fn update_vectors(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();

        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// GPU uniform carrying the combined view-projection matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Column-major `projection * view`.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Rebuild from the camera's current state. The projection uses the
    /// camera's (scroll-driven) field of view, so zoom takes effect here.
    pub fn update_view_proj(
        &mut self,
        camera: &Camera,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            camera.fov().to_radians(),
            aspect,
            znear,
            zfar,
        );
        self.view_proj = (proj * camera.view_matrix()).to_cols_array_2d();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn test_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0)
    }

    fn assert_orthonormal(camera: &Camera) {
        let (f, r, u) = (camera.front(), camera.right(), camera.up());
        assert!((f.length() - 1.0).abs() < EPS, "front not unit: {f:?}");
        assert!((r.length() - 1.0).abs() < EPS, "right not unit: {r:?}");
        assert!((u.length() - 1.0).abs() < EPS, "up not unit: {u:?}");
        assert!(f.dot(r).abs() < EPS, "front·right = {}", f.dot(r));
        assert!(f.dot(u).abs() < EPS, "front·up = {}", f.dot(u));
        assert!(r.dot(u).abs() < EPS, "right·up = {}", r.dot(u));
    }

    #[test]
    fn basis_orthonormal_across_orientation_sweep() {
        for yaw_step in 0..36 {
            for pitch_step in -8..=8 {
                let yaw = yaw_step as f32 * 10.0;
                let pitch = pitch_step as f32 * 11.0; // stays inside ±89
                let camera = Camera::new(Vec3::ZERO, Vec3::Y, yaw, pitch);
                assert_orthonormal(&camera);
            }
        }
    }

    #[test]
    fn basis_derived_at_construction() {
        let camera = test_camera();
        assert!((camera.front() - Vec3::NEG_Z).length() < EPS);
        assert!((camera.right() - Vec3::X).length() < EPS);
        assert!((camera.up() - Vec3::Y).length() < EPS);
    }

    #[test]
    fn pitch_clamps_at_limit() {
        let mut camera = test_camera();
        // Drive pitch well past the limit; sensitivity is 0.1, so
        // dy = 10_000 asks for 1000 degrees.
        camera.look(0.0, 10_000.0, true);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        assert_orthonormal(&camera);

        camera.look(0.0, -100_000.0, true);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
        assert_orthonormal(&camera);
    }

    #[test]
    fn unconstrained_look_skips_clamp() {
        let mut camera = test_camera();
        camera.look(0.0, 1200.0, false);
        assert!((camera.pitch() - 120.0).abs() < 1e-3);
    }

    #[test]
    fn fov_stays_in_range_under_any_zoom_sequence() {
        let mut camera = test_camera();
        for delta in [3.0, -10.0, 50.0, -0.5, 100.0, -200.0, 7.25] {
            camera.zoom(delta);
            assert!(camera.fov() >= FOV_MIN && camera.fov() <= FOV_MAX);
        }
        camera.zoom(1000.0);
        assert_eq!(camera.fov(), FOV_MIN);
        camera.zoom(-1000.0);
        assert_eq!(camera.fov(), FOV_MAX);
    }

    #[test]
    fn forward_then_backward_returns_to_start() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, 37.0, -12.0);
        let start = camera.position;
        camera.advance(MoveDirection::Forward, 0.016);
        camera.advance(MoveDirection::Backward, 0.016);
        assert!((camera.position - start).length() < EPS);

        camera.advance(MoveDirection::Left, 0.25);
        camera.advance(MoveDirection::Right, 0.25);
        assert!((camera.position - start).length() < EPS);
    }

    #[test]
    fn look_rotates_by_sensitivity_scaled_delta() {
        let mut camera = test_camera();
        camera.mouse_sensitivity = 0.1;
        camera.look(40.0, -20.0, true);
        assert!((camera.yaw() - (-90.0 + 4.0)).abs() < EPS);
        assert!((camera.pitch() - (-2.0)).abs() < EPS);
    }

    #[test]
    fn view_matrix_is_look_at_of_current_state() {
        let camera = Camera::new(Vec3::new(4.0, 1.0, -2.0), Vec3::Y, 123.0, 31.0);
        let expected = Mat4::look_at_rh(
            camera.position,
            camera.position + camera.front(),
            camera.up(),
        );
        let diff = camera.view_matrix() - expected;
        assert!(diff.to_cols_array().iter().all(|v| v.abs() < EPS));
    }

    #[test]
    fn walkthrough_scenario_from_origin() {
        // Camera at (0,0,3) looking down -Z; one second of forward travel
        // at 2.5 units/sec lands at (0,0,0.5).
        let mut camera = test_camera();
        camera.movement_speed = 2.5;
        assert!((camera.front() - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);

        camera.advance(MoveDirection::Forward, 1.0);
        assert!((camera.position - Vec3::new(0.0, 0.0, 0.5)).length() < EPS);
    }

    #[test]
    fn uniform_tracks_fov_zoom() {
        let mut camera = test_camera();
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, 1.6, 0.1, 100.0);
        let wide = uniform.view_proj;

        camera.zoom(20.0); // fov 45 -> 25, tighter projection
        uniform.update_view_proj(&camera, 1.6, 0.1, 100.0);
        // Focal length term grows as fov shrinks.
        assert!(uniform.view_proj[0][0] > wide[0][0]);
    }
}
