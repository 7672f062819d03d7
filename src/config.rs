/// Renderer and viewer configuration
///
/// Loaded from TOML. Every field has a default, so a config file only needs
/// the values it changes.
use crate::camera::{Camera, MoveMode, ProjectionKind};
use crate::meshing::{Color, Material};
use crate::rendering::shading::{Light, ShadingMode};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "scanline renderer".to_string(),
            width: 900,
            height: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub projection: ProjectionKind,
    pub move_mode: MoveMode,
    pub eye: Vec3,
    pub look: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub ortho_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            projection: camera.projection,
            move_mode: camera.move_mode,
            eye: camera.eye,
            look: camera.look,
            fov_y: camera.fov_y,
            near: camera.near,
            far: camera.far,
            ortho_height: camera.ortho_height,
        }
    }
}

impl CameraConfig {
    pub fn build(&self) -> Camera {
        let mut camera = Camera::new(self.eye, self.look);
        camera.projection = self.projection;
        camera.move_mode = self.move_mode;
        camera.fov_y = self.fov_y;
        camera.near = self.near;
        camera.far = self.far;
        camera.ortho_height = self.ortho_height;
        camera
    }
}

/// Input step sizes used by the viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// World units per second while a movement key is held
    pub move_speed: f32,
    /// Degrees per pixel of mouse drag
    pub mouse_sensitivity: f32,
    /// Orbit distance per wheel notch
    pub zoom_step: f32,
    /// Eye distance restored by the reset key
    pub reset_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            mouse_sensitivity: 0.5,
            zoom_step: 1.0,
            reset_distance: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub shading: ShadingMode,
    /// Depth written to every pixel at the start of a frame
    pub clear_depth: f32,
    /// Frames between frame-time log lines
    pub stats_interval: u32,
    pub clear_color: Color,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub light: Light,
    /// Material for newly created solids
    pub material: Material,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            shading: ShadingMode::Flat,
            clear_depth: 1000.0,
            stats_interval: 120,
            clear_color: Color::rgb(30, 30, 40),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            light: Light {
                position: Vec3::new(5.0, 5.0, 5.0),
                ..Light::default()
            },
            material: Material::RUBBER,
        }
    }
}

impl RendererConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window", "width and height must be non-zero");
        }
        let cam = &self.camera;
        if !(cam.near > 0.0) {
            return invalid("camera.near", "must be positive");
        }
        if !(cam.far > cam.near) {
            return invalid("camera.far", "must be greater than camera.near");
        }
        if !(cam.fov_y > 0.0 && cam.fov_y < 180.0) {
            return invalid("camera.fov_y", "must be between 0 and 180 degrees");
        }
        if !(cam.ortho_height > 0.0) {
            return invalid("camera.ortho_height", "must be positive");
        }
        if (cam.eye - cam.look).length_squared() == 0.0 {
            return invalid("camera.eye", "must differ from camera.look");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RendererConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.material, Material::RUBBER);
        assert_eq!(config.light.position, Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = RendererConfig::from_toml_str(
            r#"
            shading = "phong"

            [window]
            width = 320

            [camera]
            projection = "orthographic"
            eye = [0.0, 2.0, 8.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.shading, ShadingMode::Phong);
        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 600);
        let camera = config.camera.build();
        assert_eq!(camera.projection, ProjectionKind::Orthographic);
        assert_eq!(camera.eye, Vec3::new(0.0, 2.0, 8.0));
        assert_eq!(camera.fov_y, 60.0);
    }

    #[test]
    fn built_camera_carries_every_setting() {
        let config = RendererConfig::from_toml_str(
            r#"
            [camera]
            move_mode = "fps"
            eye = [3.0, 0.0, 0.0]
            look = [0.0, 0.0, 0.0]
            fov_y = 45.0
            near = 0.5
            far = 250.0
            ortho_height = 12.0
            "#,
        )
        .unwrap();

        let camera = config.camera.build();
        assert_eq!(camera.move_mode, MoveMode::Fps);
        assert_eq!(camera.eye, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(camera.look, Vec3::ZERO);
        assert_eq!(camera.fov_y, 45.0);
        assert_eq!(camera.near, 0.5);
        assert_eq!(camera.far, 250.0);
        assert_eq!(camera.ortho_height, 12.0);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = RendererConfig::default();
        config.clear_color = Color::rgb(1, 2, 3);
        config.controls.move_speed = 0.5;
        let text = config.to_toml_string().unwrap();
        assert_eq!(RendererConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn bad_values_are_reported() {
        let err = RendererConfig::from_toml_str("[camera]\nnear = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "camera.near", .. }));

        let err = RendererConfig::from_toml_str("shading = \"wireframe\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RendererConfig::load_from_file("/nonexistent/renderer.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
