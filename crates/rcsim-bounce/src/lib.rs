#![warn(missing_docs)]

//! Per-bounce physics for rcsim ray paths.
//!
//! A ray that reflects across a target carries a [`BounceState`]. At every
//! bounce the [`BounceEffectPipeline`] runs its registered
//! [`BounceEffect`]s over that state, in order, using the [`HitResult`]
//! the tracer produced for the bounce.
//!
//! ```
//! use rcsim_bounce::BounceEffectPipeline;
//! use rcsim_raytrace::HitResult;
//!
//! let pipeline = BounceEffectPipeline::new();
//! let hits = vec![HitResult::miss(0); 3];
//! let history = pipeline.trace_history(&hits);
//! assert!((history[2].intensity - 0.614125).abs() < 1e-6);
//! ```
//!
//! [`HitResult`]: rcsim_raytrace::HitResult

mod effect;
mod pipeline;
mod state;

pub use effect::{
    AtmosphericAttenuationEffect, BounceEffect, IntensityDecayEffect, MaterialReflectivityEffect,
    PathLengthEffect, DEFAULT_DECAY_FACTOR, DEFAULT_MIN_INTENSITY,
};
pub use pipeline::BounceEffectPipeline;
pub use state::{BounceState, RayTraceMode};
