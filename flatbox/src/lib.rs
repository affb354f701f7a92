//! Flatbox is the simulation core of a small 2D game engine: kinematic bodies
//! integrated on independent axes, axis-aligned bounding-box collision detection
//! with pluggable resolution strategies, and elapsed-time-to-frame-index mapping
//! for sprite animation.
//!
//! Here is a brief summary of the concepts and capabilities of this crate, so that
//! you may evaluate whether it suits your needs:
//!
//! * A [`Body`](physics::Body) is an entity with position, velocity, acceleration,
//!   and a rectangular extent. Its [`update`](physics::Body::update) operation
//!   advances the kinematic state by one frame's `delta_time`, applying
//!   acceleration, gravity, and a per-body velocity cap on each axis
//!   independently.
//! * A [`World`](physics::World) owns a set of bodies and detects collisions
//!   between pairs, between a body and a group, and between groups. Each
//!   colliding pair is handed to a resolution strategy, by default
//!   [`separate`](physics::separate), which performs axis-separated positional
//!   correction and velocity averaging, respecting each body's
//!   movable/immovable state.
//! * An [`Animation`](anim::Animation) maps elapsed time to a frame index, with
//!   one-shot and looping playback modes.
//!
//! What this crate does *not* do: rendering, resource loading, windowing, input,
//! and audio are the host application's business. The only rendering-facing
//! output of a body is its [`bounding_rect`](physics::Body::bounding_rect).
//! There is no continuous collision detection, no rotational dynamics, and no
//! broad-phase spatial partitioning; all candidate pairs named by the caller are
//! tested discretely each step.
//!
//! The simulation is strictly single-threaded and frame-stepped: the host loop
//! advances kinematics, then requests collision passes, in sequence.

/// Animation frame timing.
pub mod anim;

/// Mathematical utilities and decisions.
///
/// Most of the contents of this module are re-exported from [`flatbox_base`].
pub mod math {
    pub use flatbox_base::math::*;

    #[doc(inline)]
    pub use flatbox_base::notnan;
}

pub mod physics;
