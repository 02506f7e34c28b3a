//! TOML simulation configuration.

use std::path::Path;

use rcsim_bounce::{
    BounceEffectPipeline, IntensityDecayEffect, RayTraceMode, DEFAULT_DECAY_FACTOR,
    DEFAULT_MIN_INTENSITY,
};
use rcsim_math::Vec3;
use rcsim_mesh::{CreaseParams, ShapeParams, TargetShape, CYLINDER_SEGMENTS, DEFAULT_SUBDIVISIONS};
use serde::{Deserialize, Serialize};

use crate::error::{RcsError, Result};
use crate::Target;

/// Highest accepted geodesic subdivision level.
pub const MAX_SUBDIVISIONS: i32 = 7;

/// Everything needed to set up a simulation run.
///
/// Every section and field is optional in the TOML source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Target shape and placement.
    pub target: TargetConfig,
    /// Crease-edge detection.
    pub edges: CreaseParams,
    /// Bounce pipeline.
    pub bounce: BounceConfig,
}

/// Target shape and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Shape; unknown names fall back to cube.
    pub shape: TargetShape,
    /// Geodesic subdivision level.
    pub subdivisions: i32,
    /// Side segments around the cylinder.
    pub cylinder_segments: u32,
    /// World position.
    pub position: [f32; 3],
    /// Rotation in degrees as `[pitch, yaw, roll]`.
    pub rotation: [f32; 3],
    /// Per-axis scale.
    pub scale: [f32; 3],
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            shape: TargetShape::default(),
            subdivisions: DEFAULT_SUBDIVISIONS,
            cylinder_segments: CYLINDER_SEGMENTS,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl TargetConfig {
    /// Build the configured target.
    pub fn build_target(&self, crease: &CreaseParams) -> Target {
        let shape_params = ShapeParams {
            subdivisions: self.subdivisions,
            cylinder_segments: self.cylinder_segments,
        };
        let mut target = Target::with_params(self.shape, shape_params, *crease);
        target.set_position(Vec3::from(self.position));
        target.set_rotation(Vec3::from(self.rotation));
        target.set_scale(Vec3::from(self.scale));
        target
    }
}

/// Bounce pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    /// Trace mode.
    pub mode: RayTraceMode,
    /// Fraction of intensity lost per bounce.
    pub decay_factor: f32,
    /// Intensity floor.
    pub min_intensity: f32,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            mode: RayTraceMode::default(),
            decay_factor: DEFAULT_DECAY_FACTOR,
            min_intensity: DEFAULT_MIN_INTENSITY,
        }
    }
}

impl BounceConfig {
    /// Pipeline with one intensity decay effect using these parameters.
    pub fn build_pipeline(&self) -> BounceEffectPipeline {
        let mut pipeline = BounceEffectPipeline::empty();
        pipeline.add_effect(IntensityDecayEffect::new(self.decay_factor, self.min_intensity));
        pipeline.set_mode(self.mode);
        pipeline
    }
}

impl SimConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject values the mesh builders cannot use.
    ///
    /// Bounce parameters are accepted as given.
    pub fn validate(&self) -> Result<()> {
        if self.target.subdivisions > MAX_SUBDIVISIONS {
            return Err(RcsError::InvalidConfig(format!(
                "subdivisions must be at most {MAX_SUBDIVISIONS}, got {}",
                self.target.subdivisions
            )));
        }
        if self.target.cylinder_segments < 3 {
            return Err(RcsError::InvalidConfig(format!(
                "cylinder_segments must be at least 3, got {}",
                self.target.cylinder_segments
            )));
        }
        Ok(())
    }

    /// Build the configured target.
    pub fn build_target(&self) -> Target {
        self.target.build_target(&self.edges)
    }

    /// Build the configured pipeline.
    pub fn build_pipeline(&self) -> BounceEffectPipeline {
        self.bounce.build_pipeline()
    }
}
