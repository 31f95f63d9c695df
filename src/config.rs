//! Scene configuration.
//!
//! Every field defaults to the demo's built-in value, so a missing file or a
//! partial one is valid. Only the values present in the TOML override.

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::geometry::RampShape;

/// Largest physics step a frame may take, in seconds.
pub const MAX_STEP_LIMIT: f32 = 0.1;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub projectile: ProjectileConfig,
    pub ramp: RampConfig,
    pub target: TargetConfig,
    pub ar: ArConfig,
    pub instrumentation: InstrumentationConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity: [f32; 3],
    /// Upper bound on the per-frame physics step, in seconds. At most
    /// [`MAX_STEP_LIMIT`].
    pub max_step: f32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectileConfig {
    pub mass: f32,
    pub radius: f32,
    pub start: [f32; 3],
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RampConfig {
    pub position: [f32; 3],
    pub depth: f32,
    pub friction: f32,
    pub restitution: f32,
    pub color: [f32; 3],
    /// Name of the preset built at startup.
    pub preset: String,
    pub presets: Vec<RampPreset>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RampPreset {
    pub name: String,
    pub corners: [[f32; 2]; 4],
    pub controls: [[f32; 2]; 2],
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    pub position: [f32; 3],
    /// OBJ file for the cup's visual mesh. The built-in cup is used when unset.
    pub model: Option<PathBuf>,
    pub model_scale: f32,
    /// Cup cross-section, extruded along +Z like the ramp.
    pub profile: Vec<[f32; 2]>,
    pub depth: f32,
    /// Height above the target origin the reach ray is cast from.
    pub ray_height: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArConfig {
    pub enabled: bool,
    /// Marker pattern identifier handed to the marker source.
    pub pattern: String,
    pub marker_position: [f32; 3],
    /// Euler angles (X, Y, Z) in degrees.
    pub marker_rotation_deg: [f32; 3],
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstrumentationConfig {
    pub sample_interval_ms: u32,
    pub csv_path: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "rampshot".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.82, 0.0],
            max_step: MAX_STEP_LIMIT,
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            mass: 60.0,
            radius: 0.5,
            start: [-4.99, 8.0, 0.0],
            linear_damping: 0.01,
            angular_damping: 0.01,
            friction: 0.3,
            restitution: 0.2,
            color: [0.85, 0.25, 0.2],
        }
    }
}

impl Default for RampConfig {
    fn default() -> Self {
        let corners = [[-3.0, 6.0], [-3.0, 0.0], [3.0, 0.0], [3.0, 1.5]];
        Self {
            position: [-2.0, 0.0, -0.5],
            depth: 1.0,
            friction: 0.3,
            restitution: 0.1,
            color: [0.55, 0.6, 0.75],
            preset: "demo".to_string(),
            presets: vec![
                RampPreset {
                    name: "demo".to_string(),
                    corners,
                    controls: [[-1.0, 0.0], [2.0, 0.0]],
                },
                RampPreset {
                    name: "gentle".to_string(),
                    corners,
                    controls: [[-2.0, 2.5], [1.0, 0.5]],
                },
                RampPreset {
                    name: "straight".to_string(),
                    corners,
                    controls: [[-1.0, 4.5], [1.0, 3.0]],
                },
            ],
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            position: [8.0, 0.0, -0.5],
            model: None,
            model_scale: 1.0,
            profile: vec![
                [-1.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.85, 1.0],
                [0.85, 0.15],
                [-0.85, 0.15],
                [-0.85, 1.0],
                [-1.0, 1.0],
            ],
            depth: 1.0,
            ray_height: 1.5,
            color: [0.9, 0.75, 0.3],
        }
    }
}

impl Default for ArConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            pattern: "patt.hiro".to_string(),
            marker_position: [0.0, 0.0, 0.0],
            marker_rotation_deg: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 100,
            csv_path: None,
        }
    }
}

impl SceneConfig {
    /// Read `path` if given, otherwise return the defaults. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                toml::from_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("projectile.mass", self.projectile.mass)?;
        positive("projectile.radius", self.projectile.radius)?;
        positive("ramp.depth", self.ramp.depth)?;
        positive("target.depth", self.target.depth)?;
        positive("target.model_scale", self.target.model_scale)?;
        positive("world.max_step", self.world.max_step)?;
        if self.world.max_step > MAX_STEP_LIMIT {
            return Err(ConfigError::Invalid {
                field: "world.max_step",
                reason: format!("must be at most {MAX_STEP_LIMIT}, got {}", self.world.max_step),
            });
        }
        if self.instrumentation.sample_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "instrumentation.sample_interval_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.target.profile.len() < 3 {
            return Err(ConfigError::Invalid {
                field: "target.profile",
                reason: format!("needs at least 3 points, got {}", self.target.profile.len()),
            });
        }
        if self.ramp.preset_index(&self.ramp.preset).is_none() {
            return Err(ConfigError::Invalid {
                field: "ramp.preset",
                reason: format!("no preset named {:?}", self.ramp.preset),
            });
        }
        Ok(())
    }
}

impl RampConfig {
    pub fn preset_index(&self, name: &str) -> Option<usize> {
        self.presets.iter().position(|p| p.name == name)
    }
}

impl RampPreset {
    pub fn shape(&self) -> RampShape {
        RampShape::new(
            self.corners.map(Vec2::from),
            self.controls.map(Vec2::from),
        )
    }
}

impl TargetConfig {
    pub fn profile_points(&self) -> Vec<Vec2> {
        self.profile.iter().copied().map(Vec2::from).collect()
    }
}

pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from(v)
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}
