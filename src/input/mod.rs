//! Input state: held movement keys, kept free of windowing types so the
//! shell owns all winit mapping.

/// Held-movement-key state machine.
pub mod keyboard;

pub use keyboard::KeyboardState;
