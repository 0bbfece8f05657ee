//! Runtime tunables with TOML preset support.
//!
//! Everything adjustable without a rebuild (camera feel, window geometry)
//! lives here. All sub-structs use `#[serde(default)]` so a partial TOML
//! file (say, only `[camera]`) works.

mod camera;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
use serde::{Deserialize, Serialize};
pub use window::WindowOptions;

use crate::error::CubewalkError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera movement, look, and projection tunables.
    pub camera: CameraOptions,
    /// Window title and initial geometry.
    pub window: WindowOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CubewalkError::Io`] if the file is unreadable or
    /// [`CubewalkError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, CubewalkError> {
        let content =
            std::fs::read_to_string(path).map_err(CubewalkError::Io)?;
        toml::from_str(&content)
            .map_err(|e| CubewalkError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`CubewalkError`] on serialization or write failure.
    pub fn save(&self, path: &Path) -> Result<(), CubewalkError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CubewalkError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CubewalkError::Io)?;
        }
        std::fs::write(path, content).map_err(CubewalkError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
movement_speed = 4.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.movement_speed, 4.0);
        // Everything else should be default
        assert_eq!(opts.camera.mouse_sensitivity, 0.1);
        assert_eq!(opts.window.width, 800);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let opts: Options = toml::from_str("").unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = std::env::temp_dir()
            .join(format!("cubewalk-options-{}.toml", std::process::id()));
        let mut opts = Options::default();
        opts.camera.movement_speed = 3.25;
        opts.window.title = "round trip".to_owned();

        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(opts, loaded);
    }
}
