//! Accumulated ray state and trace modes.

use serde::{Deserialize, Serialize};

/// How the pipeline treats each bounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RayTraceMode {
    /// Uniform brightness: bounces are only counted.
    Path,
    /// Every enabled effect runs on every bounce.
    #[default]
    PhysicsAccurate,
}

/// What a ray has accumulated after some number of bounces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceState {
    /// Remaining intensity, 1.0 at emission.
    pub intensity: f32,
    /// Total distance travelled.
    pub path_length: f32,
    /// Material of the last surface hit.
    pub material_id: u32,
    /// Bounces so far.
    pub bounce_count: u32,
}

impl Default for BounceState {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            path_length: 0.0,
            material_id: 0,
            bounce_count: 0,
        }
    }
}

impl BounceState {
    /// Restore the emission state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Lose `decay_factor` of the intensity, never dropping below
    /// `min_intensity`, and count the bounce.
    ///
    /// Parameters are used as given; nothing is clamped to `[0, 1]`.
    pub fn apply_bounce_decay(&mut self, decay_factor: f32, min_intensity: f32) {
        self.intensity *= 1.0 - decay_factor;
        if self.intensity < min_intensity {
            self.intensity = min_intensity;
        }
        self.bounce_count += 1;
    }

    /// Add a travelled segment to the path length.
    pub fn add_path_length(&mut self, length: f32) {
        self.path_length += length;
    }
}
