use crate::camera::MoveDirection;

/// Which movement directions are currently held.
///
/// The winit shell feeds press/release transitions in; the camera rig
/// drains [`KeyboardState::active`] once per frame. Plain data, no window
/// types, so movement integration is testable without an event loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardState {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

impl KeyboardState {
    /// Nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press (`held = true`) or release of a movement direction.
    pub fn set(&mut self, direction: MoveDirection, held: bool) {
        match direction {
            MoveDirection::Forward => self.forward = held,
            MoveDirection::Backward => self.backward = held,
            MoveDirection::Left => self.left = held,
            MoveDirection::Right => self.right = held,
        }
    }

    /// Directions currently held, in a fixed order.
    pub fn active(&self) -> impl Iterator<Item = MoveDirection> {
        [
            (MoveDirection::Forward, self.forward),
            (MoveDirection::Backward, self.backward),
            (MoveDirection::Left, self.left),
            (MoveDirection::Right, self.right),
        ]
        .into_iter()
        .filter_map(|(direction, held)| held.then_some(direction))
    }

    /// True if any movement key is down.
    #[must_use]
    pub fn any_held(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_bookkeeping() {
        let mut keys = KeyboardState::new();
        assert!(!keys.any_held());

        keys.set(MoveDirection::Forward, true);
        keys.set(MoveDirection::Left, true);
        let held: Vec<_> = keys.active().collect();
        assert_eq!(held, vec![MoveDirection::Forward, MoveDirection::Left]);

        keys.set(MoveDirection::Forward, false);
        let held: Vec<_> = keys.active().collect();
        assert_eq!(held, vec![MoveDirection::Left]);

        keys.set(MoveDirection::Left, false);
        assert!(!keys.any_held());
        assert_eq!(keys.active().count(), 0);
    }

    #[test]
    fn opposing_directions_can_be_held_together() {
        // Held W+S cancels out in integration; the state just reports both.
        let mut keys = KeyboardState::new();
        keys.set(MoveDirection::Forward, true);
        keys.set(MoveDirection::Backward, true);
        assert_eq!(keys.active().count(), 2);
    }
}
