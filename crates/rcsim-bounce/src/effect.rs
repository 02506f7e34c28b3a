//! The bounce effect trait and the built-in effects.

use std::any::Any;
use std::collections::HashMap;

use rcsim_raytrace::HitResult;

use crate::BounceState;

/// A physical effect applied to a ray's state at each bounce.
///
/// An effect applies exactly once per [`apply`](BounceEffect::apply) call;
/// calling it twice applies it twice. A disabled effect leaves the state
/// untouched even when invoked directly.
pub trait BounceEffect: Send + std::fmt::Debug {
    /// Update `state` for the bounce described by `hit`.
    fn apply(&self, state: &mut BounceState, hit: &HitResult);

    /// Display name, also used for lookup in the pipeline.
    fn name(&self) -> &str;

    /// Whether the effect runs.
    fn is_enabled(&self) -> bool;

    /// Turn the effect on or off.
    fn set_enabled(&mut self, enabled: bool);

    /// Clone this effect into a boxed trait object.
    fn clone_box(&self) -> Box<dyn BounceEffect>;

    /// Downcast to a concrete type via `Any`.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast to a concrete type via `Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn BounceEffect> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

macro_rules! effect_plumbing {
    () => {
        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn clone_box(&self) -> Box<dyn BounceEffect> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    };
}

// =============================================================================
// Intensity decay
// =============================================================================

/// Default fraction of intensity lost per bounce.
pub const DEFAULT_DECAY_FACTOR: f32 = 0.15;

/// Default intensity floor.
pub const DEFAULT_MIN_INTENSITY: f32 = 0.2;

/// Loses a fixed fraction of intensity per bounce down to a floor, and
/// counts the bounce.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityDecayEffect {
    decay_factor: f32,
    min_intensity: f32,
    enabled: bool,
}

impl IntensityDecayEffect {
    /// Name used for pipeline lookup.
    pub const NAME: &'static str = "Intensity Decay";

    /// Create with explicit parameters. Values are not range-checked.
    pub fn new(decay_factor: f32, min_intensity: f32) -> Self {
        Self {
            decay_factor,
            min_intensity,
            enabled: true,
        }
    }

    /// Fraction of intensity lost per bounce.
    pub fn decay_factor(&self) -> f32 {
        self.decay_factor
    }

    /// Set the fraction of intensity lost per bounce.
    pub fn set_decay_factor(&mut self, factor: f32) {
        self.decay_factor = factor;
    }

    /// Intensity floor.
    pub fn min_intensity(&self) -> f32 {
        self.min_intensity
    }

    /// Set the intensity floor.
    pub fn set_min_intensity(&mut self, min: f32) {
        self.min_intensity = min;
    }
}

impl Default for IntensityDecayEffect {
    fn default() -> Self {
        Self::new(DEFAULT_DECAY_FACTOR, DEFAULT_MIN_INTENSITY)
    }
}

impl BounceEffect for IntensityDecayEffect {
    fn apply(&self, state: &mut BounceState, _hit: &HitResult) {
        if !self.enabled {
            return;
        }
        state.apply_bounce_decay(self.decay_factor, self.min_intensity);
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    effect_plumbing!();
}

// =============================================================================
// Material reflectivity
// =============================================================================

/// Scales intensity by the reflectivity of the material that was hit and
/// records that material in the state.
///
/// Materials missing from the table reflect fully.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialReflectivityEffect {
    reflectivity: HashMap<u32, f32>,
    default_reflectivity: f32,
    enabled: bool,
}

impl MaterialReflectivityEffect {
    /// Name used for pipeline lookup.
    pub const NAME: &'static str = "Material Reflectivity";

    /// Empty table; every material reflects fully.
    pub fn new() -> Self {
        Self {
            reflectivity: HashMap::new(),
            default_reflectivity: 1.0,
            enabled: true,
        }
    }

    /// Set the reflectivity of one material.
    pub fn set_reflectivity(&mut self, material_id: u32, reflectivity: f32) {
        self.reflectivity.insert(material_id, reflectivity);
    }

    /// Builder form of [`set_reflectivity`](Self::set_reflectivity).
    pub fn with_reflectivity(mut self, material_id: u32, reflectivity: f32) -> Self {
        self.set_reflectivity(material_id, reflectivity);
        self
    }

    /// Reflectivity used for materials not in the table.
    pub fn set_default_reflectivity(&mut self, reflectivity: f32) {
        self.default_reflectivity = reflectivity;
    }

    /// Reflectivity of `material_id`.
    pub fn reflectivity(&self, material_id: u32) -> f32 {
        self.reflectivity
            .get(&material_id)
            .copied()
            .unwrap_or(self.default_reflectivity)
    }
}

impl Default for MaterialReflectivityEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl BounceEffect for MaterialReflectivityEffect {
    fn apply(&self, state: &mut BounceState, hit: &HitResult) {
        if !self.enabled || hit.is_miss() {
            return;
        }
        let material_id = hit.material_id();
        state.material_id = material_id;
        state.intensity *= self.reflectivity(material_id);
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    effect_plumbing!();
}

// =============================================================================
// Atmospheric attenuation
// =============================================================================

/// Beer-Lambert loss over the distance travelled to the hit:
/// `intensity *= exp(-alpha * distance)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphericAttenuationEffect {
    alpha: f32,
    enabled: bool,
}

impl AtmosphericAttenuationEffect {
    /// Name used for pipeline lookup.
    pub const NAME: &'static str = "Atmospheric Attenuation";

    /// Create with attenuation coefficient `alpha` per unit distance.
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            enabled: true,
        }
    }

    /// Attenuation coefficient.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Set the attenuation coefficient.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }
}

impl BounceEffect for AtmosphericAttenuationEffect {
    fn apply(&self, state: &mut BounceState, hit: &HitResult) {
        if !self.enabled || hit.is_miss() {
            return;
        }
        state.intensity *= (-self.alpha * hit.distance()).exp();
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    effect_plumbing!();
}

// =============================================================================
// Path length
// =============================================================================

/// Adds each hit's distance to the state's path length.
#[derive(Debug, Clone, PartialEq)]
pub struct PathLengthEffect {
    enabled: bool,
}

impl PathLengthEffect {
    /// Name used for pipeline lookup.
    pub const NAME: &'static str = "Path Length";

    /// Create an enabled effect.
    pub fn new() -> Self {
        Self { enabled: true }
    }
}

impl Default for PathLengthEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl BounceEffect for PathLengthEffect {
    fn apply(&self, state: &mut BounceState, hit: &HitResult) {
        if !self.enabled || hit.is_miss() {
            return;
        }
        state.add_path_length(hit.distance());
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    effect_plumbing!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rcsim_math::{Point3, Vec3};

    fn hit(distance: f32, material: u32) -> HitResult {
        HitResult::new(Point3::origin(), distance, Vec3::z()).with_material(material)
    }

    #[test]
    fn test_decay_applies_once_per_call() {
        let effect = IntensityDecayEffect::default();
        let mut state = BounceState::default();
        effect.apply(&mut state, &hit(1.0, 0));
        assert_relative_eq!(state.intensity, 0.85);
        effect.apply(&mut state, &hit(1.0, 0));
        assert_relative_eq!(state.intensity, 0.7225, epsilon = 1e-6);
        assert_eq!(state.bounce_count, 2);
    }

    #[test]
    fn test_disabled_decay_is_noop() {
        let mut effect = IntensityDecayEffect::default();
        effect.set_enabled(false);
        let mut state = BounceState::default();
        effect.apply(&mut state, &hit(1.0, 0));
        assert_eq!(state, BounceState::default());
    }

    #[test]
    fn test_decay_setters() {
        let mut effect = IntensityDecayEffect::default();
        assert_eq!(effect.name(), "Intensity Decay");
        effect.set_decay_factor(0.5);
        effect.set_min_intensity(0.3);
        let mut state = BounceState::default();
        effect.apply(&mut state, &hit(1.0, 0));
        effect.apply(&mut state, &hit(1.0, 0));
        assert_eq!(state.intensity, 0.3);
    }

    #[test]
    fn test_material_reflectivity() {
        let effect = MaterialReflectivityEffect::new().with_reflectivity(3, 0.5);
        let mut state = BounceState::default();

        effect.apply(&mut state, &hit(1.0, 3));
        assert_relative_eq!(state.intensity, 0.5);
        assert_eq!(state.material_id, 3);

        effect.apply(&mut state, &hit(1.0, 9));
        assert_relative_eq!(state.intensity, 0.5);
        assert_eq!(state.material_id, 9);
        assert_eq!(state.bounce_count, 0);
    }

    #[test]
    fn test_atmospheric_attenuation() {
        let effect = AtmosphericAttenuationEffect::new(0.1);
        let mut state = BounceState::default();
        effect.apply(&mut state, &hit(10.0, 0));
        assert_relative_eq!(state.intensity, (-1.0f32).exp(), epsilon = 1e-6);

        effect.apply(&mut state, &HitResult::miss(0));
        assert_relative_eq!(state.intensity, (-1.0f32).exp(), epsilon = 1e-6);
    }

    #[test]
    fn test_path_length() {
        let effect = PathLengthEffect::new();
        let mut state = BounceState::default();
        effect.apply(&mut state, &hit(2.0, 0));
        effect.apply(&mut state, &hit(3.5, 0));
        effect.apply(&mut state, &HitResult::miss(1));
        assert_relative_eq!(state.path_length, 5.5);
    }

    #[test]
    fn test_boxed_clone_keeps_parameters() {
        let boxed: Box<dyn BounceEffect> = Box::new(IntensityDecayEffect::new(0.4, 0.1));
        let copy = boxed.clone();
        let decay = copy.as_any().downcast_ref::<IntensityDecayEffect>().unwrap();
        assert_eq!(decay.decay_factor(), 0.4);
        assert_eq!(decay.min_intensity(), 0.1);
    }
}
