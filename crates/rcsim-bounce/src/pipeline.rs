//! Ordered effect pipeline driven by the trace mode.

use rcsim_raytrace::HitResult;
use tracing::debug;

use crate::effect::{BounceEffect, IntensityDecayEffect};
use crate::{BounceState, RayTraceMode};

/// Effects applied in registration order at every bounce.
///
/// In [`RayTraceMode::Path`] effects are skipped and each bounce is only
/// counted. In [`RayTraceMode::PhysicsAccurate`] every enabled effect runs on
/// the same state. Mode changes take effect on the next call.
#[derive(Debug, Clone)]
pub struct BounceEffectPipeline {
    effects: Vec<Box<dyn BounceEffect>>,
    mode: RayTraceMode,
}

impl BounceEffectPipeline {
    /// Pipeline with a default [`IntensityDecayEffect`].
    pub fn new() -> Self {
        let mut pipeline = Self::empty();
        pipeline.add_effect(IntensityDecayEffect::default());
        pipeline
    }

    /// Pipeline with no effects.
    pub fn empty() -> Self {
        Self {
            effects: Vec::new(),
            mode: RayTraceMode::default(),
        }
    }

    /// Append an effect.
    pub fn add_effect(&mut self, effect: impl BounceEffect + 'static) {
        self.effects.push(Box::new(effect));
    }

    /// Append an already boxed effect; `None` is ignored.
    pub fn add_boxed(&mut self, effect: Option<Box<dyn BounceEffect>>) {
        if let Some(effect) = effect {
            self.effects.push(effect);
        }
    }

    /// Remove every effect.
    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }

    /// Number of registered effects.
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Names of the registered effects, in order.
    pub fn effect_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.effects.iter().map(|e| e.name())
    }

    /// First effect called `name`.
    pub fn get_effect(&self, name: &str) -> Option<&dyn BounceEffect> {
        self.effects
            .iter()
            .find(|e| e.name() == name)
            .map(|e| &**e)
    }

    /// First effect called `name`, mutably.
    pub fn get_effect_mut(&mut self, name: &str) -> Option<&mut (dyn BounceEffect + 'static)> {
        self.effects
            .iter_mut()
            .find(|e| e.name() == name)
            .map(|e| &mut **e)
    }

    /// First effect called `name`, downcast to `T` for tuning.
    pub fn effect_as_mut<T: BounceEffect + 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_effect_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    /// Current mode.
    pub fn mode(&self) -> RayTraceMode {
        self.mode
    }

    /// Switch mode.
    pub fn set_mode(&mut self, mode: RayTraceMode) {
        self.mode = mode;
    }

    /// Apply one bounce to `state`.
    pub fn apply(&self, state: &mut BounceState, hit: &HitResult) {
        match self.mode {
            RayTraceMode::Path => state.bounce_count += 1,
            RayTraceMode::PhysicsAccurate => {
                for effect in self.effects.iter().filter(|e| e.is_enabled()) {
                    effect.apply(state, hit);
                }
            }
        }
    }

    /// Run a bounce sequence from the emission state, writing the state after
    /// bounce `i` into `states[i]`.
    ///
    /// Nothing is written unless `states` and `hits` have the same length.
    pub fn apply_to_sequence(&self, states: &mut [BounceState], hits: &[HitResult]) {
        if states.len() != hits.len() {
            debug!(
                states = states.len(),
                hits = hits.len(),
                "bounce sequence length mismatch, skipping"
            );
            return;
        }

        let mut running = BounceState::default();
        for (slot, hit) in states.iter_mut().zip(hits) {
            self.apply(&mut running, hit);
            *slot = running;
        }
    }

    /// State history for a bounce sequence.
    pub fn trace_history(&self, hits: &[HitResult]) -> Vec<BounceState> {
        let mut states = vec![BounceState::default(); hits.len()];
        self.apply_to_sequence(&mut states, hits);
        states
    }
}

impl Default for BounceEffectPipeline {
    fn default() -> Self {
        Self::new()
    }
}
