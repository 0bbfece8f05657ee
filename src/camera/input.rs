use glam::Vec2;

use crate::camera::core::Camera;

/// Converts an absolute cursor-position stream into look deltas.
///
/// The first sample after creation (or after [`MouseLook::reset`]) only
/// primes the last-seen position without rotating the camera, because
/// the cursor could be anywhere when look control begins. Screen Y grows
/// downward, so the vertical delta is inverted before it reaches
/// [`Camera::look`].
#[derive(Debug, Default)]
pub struct MouseLook {
    last: Option<Vec2>,
}

impl MouseLook {
    /// An unprimed tracker.
    #[must_use]
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Feed one absolute cursor position, rotating `camera` by the delta
    /// from the previous sample.
    pub fn cursor_moved(
        &mut self,
        camera: &mut Camera,
        x: f32,
        y: f32,
        constrain_pitch: bool,
    ) {
        let current = Vec2::new(x, y);
        let Some(last) = self.last.replace(current) else {
            return;
        };
        camera.look(current.x - last.x, last.y - current.y, constrain_pitch);
    }

    /// Forget the last cursor position, so the next sample primes again.
    /// Call after the cursor is re-grabbed or the window regains focus.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn camera() -> Camera {
        let mut c = Camera::new(Vec3::ZERO, Vec3::Y, -90.0, 0.0);
        c.mouse_sensitivity = 0.1;
        c
    }

    #[test]
    fn first_sample_only_primes() {
        let mut look = MouseLook::new();
        let mut cam = camera();
        look.cursor_moved(&mut cam, 400.0, 300.0, true);
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn second_sample_applies_scaled_delta() {
        let mut look = MouseLook::new();
        let mut cam = camera();
        look.cursor_moved(&mut cam, 400.0, 300.0, true);
        // +30px right, +10px down: yaw grows, pitch drops (inverted Y).
        look.cursor_moved(&mut cam, 430.0, 310.0, true);
        assert!((cam.yaw() - (-90.0 + 3.0)).abs() < 1e-5);
        assert!((cam.pitch() - (-1.0)).abs() < 1e-5);
    }

    #[test]
    fn reset_reprimes_without_rotation() {
        let mut look = MouseLook::new();
        let mut cam = camera();
        look.cursor_moved(&mut cam, 100.0, 100.0, true);
        look.reset();
        look.cursor_moved(&mut cam, 900.0, 900.0, true);
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
    }
}
