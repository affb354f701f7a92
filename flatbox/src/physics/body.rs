use core::fmt;

use euclid::Vector2D;

use crate::math::{Axis, FreeCoordinate, FreePoint, GridSize, GridSizeCoord, Rect};
use crate::physics::{Acceleration, Environment, Velocity};

bitflags::bitflags! {
    /// Set of sides of a [`Body`] on which a collision was most recently resolved.
    ///
    /// The default resolution strategy ([`separate`](super::separate)) ORs flags
    /// into both bodies of a corrected pair. Nothing clears them automatically:
    /// callers that want fresh-per-frame contact information must invoke
    /// [`Body::clear_touching`] themselves each frame.
    ///
    /// It is a [`bitflags`] generated bit-flag type.
    /// The [empty](Self::empty) set means no side is in contact.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Touching: u8 {
        /// Contact on the top edge (−y side).
        const UP = 1 << 0;
        /// Contact on the bottom edge (+y side).
        const DOWN = 1 << 1;
        /// Contact on the left edge (−x side).
        const LEFT = 1 << 2;
        /// Contact on the right edge (+x side).
        const RIGHT = 1 << 3;
    }
}

/// An object with a position, velocity, acceleration, and rectangular collision
/// extent. What it collides with is determined externally, by the collision
/// passes the host application requests from a [`World`](super::World).
#[derive(Clone, PartialEq)]
pub struct Body {
    /// Origin (top-left corner) of the bounding rectangle.
    position: FreePoint,

    /// Position at the start of the current step; snapshotted by [`Self::update`]
    /// before any motion. The resolver reconstructs per-axis displacement from
    /// `position - previous_position`.
    previous_position: FreePoint,

    /// Velocity, in position units per second.
    velocity: Vector2D<FreeCoordinate, Velocity>,

    /// Acceleration, in velocity units per second.
    acceleration: Vector2D<FreeCoordinate, Acceleration>,

    /// Per-axis cap on the magnitude of `velocity`. Zero or negative disables
    /// the cap.
    max_velocity: FreeCoordinate,

    /// Multiplier on [`Environment::gravity`], y axis only. Zero or negative
    /// opts this body out of gravity.
    gravity_scale: FreeCoordinate,

    /// Extent of the bounding rectangle, anchored at `position`.
    size: GridSize,

    /// Whether this body is simulated at all. A dead body still exists and is
    /// addressable, but is frozen: neither integration nor collision correction
    /// touches it.
    pub active: bool,

    /// Whether this body acts as a static obstacle. An immovable body is never
    /// displaced or given a blended velocity during resolution, and does not
    /// integrate motion.
    pub immovable: bool,

    /// Side-contact flags; see [`Touching`].
    touching: Touching,
    // When adding a field, don't forget to expand the Debug impl.
}

impl Body {
    /// Constructs a [`Body`] requiring only information that can't be reasonably
    /// defaulted: at rest, active, movable, with full gravity.
    pub fn new(position: impl Into<FreePoint>, size: impl Into<GridSize>) -> Self {
        let position = position.into();
        Self {
            position,
            previous_position: position,
            velocity: Vector2D::zero(),
            acceleration: Vector2D::zero(),
            max_velocity: 0.0,
            gravity_scale: 1.0,
            size: size.into(),
            active: true,
            immovable: false,
            touching: Touching::empty(),
        }
    }

    /// Advances time for the body: integrates acceleration, gravity from
    /// `environment`, the velocity cap, and motion, each axis independently.
    ///
    /// `delta_time` is the elapsed frame time in seconds, supplied by the host
    /// application loop. Does nothing unless the body is [`active`](Self::active)
    /// and not [`immovable`](Self::immovable).
    ///
    /// The applied positional delta uses the midpoint of the old and new
    /// velocity, while the new velocity is committed in full (a semi-implicit
    /// averaged Euler step).
    pub fn update(&mut self, delta_time: FreeCoordinate, environment: &Environment) {
        if !self.active || self.immovable {
            return;
        }
        if !self.position.to_vector().square_length().is_finite() {
            // If position is NaN or infinite, can't do anything, but don't panic.
            log::warn!("skipping update of body with non-finite position {:?}", self.position);
            return;
        }

        self.previous_position = self.position;

        for axis in Axis::ALL {
            let old_velocity = self.velocity[axis];
            let new_velocity = self.compute_velocity(
                delta_time,
                old_velocity,
                self.acceleration[axis],
                axis == Axis::Y,
                environment,
            );
            self.position[axis] += (old_velocity + new_velocity) * 0.5 * delta_time;
            self.velocity[axis] = new_velocity;
        }
    }

    /// Computes the next single-axis velocity from the current one, without
    /// committing it: the caller of this pure function decides what to do with
    /// the result. ([`Self::update`] commits it, after using the midpoint of old
    /// and new for the positional delta.)
    ///
    /// `apply_gravity` is set only for the y-axis call; gravity is
    /// `environment.gravity` times this body's [`gravity_scale`](Self::gravity_scale).
    /// The result is clamped to ±[`max_velocity`](Self::max_velocity) only when
    /// both it and the velocity are nonzero.
    pub fn compute_velocity(
        &self,
        delta_time: FreeCoordinate,
        velocity: FreeCoordinate,
        acceleration: FreeCoordinate,
        apply_gravity: bool,
        environment: &Environment,
    ) -> FreeCoordinate {
        let mut velocity = velocity;
        if acceleration != 0.0 {
            velocity += acceleration * delta_time;
        }
        if apply_gravity && self.gravity_scale > 0.0 {
            velocity += environment.gravity.into_inner() * self.gravity_scale * delta_time;
        }
        // Zero (or negative) max_velocity means unbounded.
        if velocity != 0.0 && self.max_velocity > 0.0 {
            velocity = velocity.clamp(-self.max_velocity, self.max_velocity);
        }
        velocity
    }

    /// Returns the body's position: the origin (top-left corner) of its bounding
    /// rectangle.
    #[inline]
    pub fn position(&self) -> FreePoint {
        self.position
    }

    /// Sets the body's position directly, as collision correction does.
    ///
    /// Does not affect [`previous_position`](Self::previous_position).
    /// Non-finite positions are ignored.
    #[inline]
    pub fn set_position(&mut self, position: impl Into<FreePoint>) {
        let position = position.into();
        if position.x.is_finite() && position.y.is_finite() {
            self.position = position;
        }
    }

    /// Returns the position this body had at the beginning of the most recent
    /// [`update`](Self::update) that integrated it.
    #[inline]
    pub fn previous_position(&self) -> FreePoint {
        self.previous_position
    }

    /// Returns the body's velocity, in position units per second.
    #[inline]
    pub fn velocity(&self) -> Vector2D<FreeCoordinate, Velocity> {
        self.velocity
    }

    /// Sets the body's velocity. Non-finite velocities are ignored.
    #[inline]
    pub fn set_velocity(&mut self, velocity: impl Into<Vector2D<FreeCoordinate, Velocity>>) {
        let velocity = velocity.into();
        if velocity.x.is_finite() && velocity.y.is_finite() {
            self.velocity = velocity;
        }
    }

    /// Returns the body's acceleration, in velocity units per second.
    #[inline]
    pub fn acceleration(&self) -> Vector2D<FreeCoordinate, Acceleration> {
        self.acceleration
    }

    /// Sets the body's acceleration. Non-finite accelerations are ignored.
    #[inline]
    pub fn set_acceleration(
        &mut self,
        acceleration: impl Into<Vector2D<FreeCoordinate, Acceleration>>,
    ) {
        let acceleration = acceleration.into();
        if acceleration.x.is_finite() && acceleration.y.is_finite() {
            self.acceleration = acceleration;
        }
    }

    /// Returns the per-axis velocity cap. Zero or negative means unbounded.
    #[inline]
    pub fn max_velocity(&self) -> FreeCoordinate {
        self.max_velocity
    }

    /// Sets the per-axis velocity cap. Zero or negative disables the cap; this
    /// is a valid sentinel, not an error.
    #[inline]
    pub fn set_max_velocity(&mut self, max_velocity: FreeCoordinate) {
        self.max_velocity = max_velocity;
    }

    /// Returns the multiplier this body applies to [`Environment::gravity`].
    #[inline]
    pub fn gravity_scale(&self) -> FreeCoordinate {
        self.gravity_scale
    }

    /// Sets the gravity multiplier. Zero or negative opts out of gravity; this
    /// is a valid sentinel, not an error.
    #[inline]
    pub fn set_gravity_scale(&mut self, gravity_scale: FreeCoordinate) {
        self.gravity_scale = gravity_scale;
    }

    /// Returns the extent of the bounding rectangle.
    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Changes the extent of the bounding rectangle, keeping the origin.
    #[inline]
    pub fn resize(&mut self, width: GridSizeCoord, height: GridSizeCoord) {
        self.size = GridSize::new(width, height);
    }

    /// Returns the body's bounding rectangle in world coordinates
    /// ([`size`](Self::size) anchored at [`position`](Self::position)).
    ///
    /// This is the only geometry a drawing backend needs to place visuals.
    ///
    /// ```
    /// use flatbox::math::Rect;
    /// use flatbox::physics::Body;
    ///
    /// let body = Body::new([3.0, 4.0], [10, 20]);
    /// assert_eq!(body.bounding_rect(), Rect::new(3.0, 4.0, 10.0, 20.0));
    /// ```
    #[inline]
    pub fn bounding_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size.to_f64())
    }

    /// Moves the body to `position`, also rewriting
    /// [`previous_position`](Self::previous_position) so that no displacement is
    /// attributed to the move.
    ///
    /// Deliberately does *not* reset velocity or acceleration; a body reset onto
    /// a new location keeps its motion state.
    pub fn reset(&mut self, position: impl Into<FreePoint>) {
        let position = position.into();
        self.position = position;
        self.previous_position = position;
    }

    /// Soft-deletes the body: sets [`active`](Self::active) to false, freezing it
    /// in place while keeping it addressable.
    #[inline]
    pub fn kill(&mut self) {
        self.active = false;
    }

    /// Undoes [`kill`](Self::kill).
    #[inline]
    pub fn revive(&mut self) {
        self.active = true;
    }

    /// Returns the accumulated side-contact flags.
    #[inline]
    pub fn touching(&self) -> Touching {
        self.touching
    }

    /// ORs `sides` into the side-contact flags, as resolution strategies do when
    /// they perform a correction.
    #[inline]
    pub fn mark_touching(&mut self, sides: Touching) {
        self.touching |= sides;
    }

    /// Clears all side-contact flags. Call once per frame, before the collision
    /// passes, if fresh-per-frame contact information is desired.
    #[inline]
    pub fn clear_touching(&mut self) {
        self.touching = Touching::empty();
    }
}

impl Default for Body {
    /// A zero-size body at the origin, at rest, active, and movable.
    fn default() -> Self {
        Self::new(FreePoint::origin(), GridSize::zero())
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            position,
            previous_position,
            velocity,
            acceleration,
            max_velocity,
            gravity_scale,
            size,
            active,
            immovable,
            touching,
        } = self;
        fmt.debug_struct("Body")
            .field("position", position)
            .field("previous_position", previous_position)
            .field("velocity", velocity)
            .field("acceleration", acceleration)
            .field("max_velocity", max_velocity)
            .field("gravity_scale", gravity_scale)
            .field("size", size)
            .field("active", active)
            .field("immovable", immovable)
            .field("touching", touching)
            .finish()
    }
}

/// Note: Tests which involve both body and collision code are in the parent module.
#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point2, vec2};
    use pretty_assertions::assert_eq;

    fn test_body() -> Body {
        Body::new([0., 0.], [10, 10])
    }

    fn no_gravity() -> Environment {
        Environment {
            gravity: crate::math::notnan!(0.0),
        }
    }

    #[test]
    fn update_snapshots_previous_position() {
        let mut body = test_body();
        body.set_velocity([4.0, 0.0]);
        body.update(0.5, &no_gravity());
        assert_eq!(body.previous_position(), point2(0., 0.));
        assert_eq!(body.position(), point2(2., 0.));
        body.update(0.5, &no_gravity());
        assert_eq!(body.previous_position(), point2(2., 0.));
        assert_eq!(body.position(), point2(4., 0.));
    }

    #[test]
    fn no_forces_no_motion() {
        let mut body = test_body();
        body.set_gravity_scale(0.0);
        for delta_time in [0.0, 1.0 / 60.0, 1.0, 1000.0] {
            body.update(delta_time, &Environment::default());
        }
        assert_eq!(body.position(), point2(0., 0.));
        assert_eq!(body.velocity(), vec2(0., 0.));
    }

    #[test]
    fn gravity_affects_y_only() {
        let mut body = test_body();
        body.update(0.5, &Environment::default());
        assert_eq!(body.velocity(), vec2(0., 400.));
        assert_eq!(body.position().x, 0.);
    }

    #[test]
    fn inactive_body_does_not_integrate() {
        let mut body = test_body();
        body.set_velocity([4.0, 0.0]);
        body.kill();
        body.update(1.0, &no_gravity());
        assert_eq!(body.position(), point2(0., 0.));
        body.revive();
        body.update(1.0, &no_gravity());
        assert_eq!(body.position(), point2(4., 0.));
    }

    #[test]
    fn immovable_body_does_not_integrate() {
        let mut body = test_body();
        body.set_velocity([4.0, 0.0]);
        body.immovable = true;
        body.update(1.0, &Environment::default());
        assert_eq!(body.position(), point2(0., 0.));
        assert_eq!(body.velocity(), vec2(4., 0.));
    }

    #[test]
    fn averaged_step_applies_midpoint_velocity() {
        // Acceleration raises velocity from 0 to 10; the position delta uses the
        // midpoint 5, while the committed velocity is the full 10.
        let mut body = test_body();
        body.set_acceleration([10.0, 0.0]);
        body.update(1.0, &no_gravity());
        assert_eq!(body.velocity(), vec2(10., 0.));
        assert_eq!(body.position(), point2(5., 0.));
    }

    #[test]
    fn velocity_clamp_only_when_enabled() {
        let env = no_gravity();
        let body = {
            let mut body = test_body();
            body.set_max_velocity(50.0);
            body
        };
        assert_eq!(body.compute_velocity(1.0, 0.0, 100.0, false, &env), 50.0);
        assert_eq!(body.compute_velocity(1.0, 0.0, -100.0, false, &env), -50.0);

        let unbounded = test_body();
        assert_eq!(unbounded.compute_velocity(1.0, 0.0, 100.0, false, &env), 100.0);

        // Negative max_velocity is the same disable sentinel as zero.
        let mut negative = test_body();
        negative.set_max_velocity(-1.0);
        assert_eq!(negative.compute_velocity(1.0, 0.0, 100.0, false, &env), 100.0);
    }

    #[test]
    fn gravity_scale_sentinel() {
        let env = Environment::default();
        let mut body = test_body();
        body.set_gravity_scale(0.0);
        assert_eq!(body.compute_velocity(1.0, 0.0, 0.0, true, &env), 0.0);
        body.set_gravity_scale(-2.0);
        assert_eq!(body.compute_velocity(1.0, 0.0, 0.0, true, &env), 0.0);
        body.set_gravity_scale(0.5);
        assert_eq!(body.compute_velocity(1.0, 0.0, 0.0, true, &env), 400.0);
    }

    #[test]
    fn reset_keeps_velocity() {
        let mut body = test_body();
        body.set_velocity([3.0, 4.0]);
        body.update(1.0, &no_gravity());
        body.reset([100.0, 100.0]);
        assert_eq!(body.position(), point2(100., 100.));
        assert_eq!(body.previous_position(), point2(100., 100.));
        assert_eq!(body.velocity(), vec2(3., 4.));
    }

    #[test]
    fn position_nan_ignored() {
        let mut body = test_body();
        body.set_position([FreeCoordinate::NAN, 0.]);
        assert_eq!(body.position(), point2(0., 0.));
    }

    #[test]
    fn velocity_nan_ignored() {
        let mut body = test_body();
        body.set_velocity([1., FreeCoordinate::NAN]);
        assert_eq!(body.velocity(), vec2(0., 0.));
    }

    #[test]
    fn acceleration_nan_ignored() {
        let mut body = test_body();
        body.set_acceleration([FreeCoordinate::NAN, 0.]);
        assert_eq!(body.acceleration(), vec2(0., 0.));
        // In particular, position stays finite and the bounding rectangle
        // remains constructible after integrating.
        body.update(1.0 / 60.0, &no_gravity());
        assert_eq!(body.bounding_rect(), Rect::new(0., 0., 10., 10.));
    }

    #[test]
    fn update_with_non_finite_position_is_skipped() {
        let mut body = test_body();
        // Force a non-finite position through integration rather than the
        // guarded setter.
        body.set_velocity([FreeCoordinate::MAX, 0.0]);
        body.update(FreeCoordinate::MAX, &no_gravity());
        body.set_velocity([1.0, 0.0]);
        let before = body.position();
        body.update(1.0, &no_gravity());
        assert_eq!(body.position(), before);
    }

    #[test]
    fn touching_accumulates_until_cleared() {
        let mut body = test_body();
        body.mark_touching(Touching::LEFT);
        body.mark_touching(Touching::DOWN);
        assert_eq!(body.touching(), Touching::LEFT | Touching::DOWN);
        body.clear_touching();
        assert_eq!(body.touching(), Touching::empty());
    }

    #[test]
    fn resize() {
        let mut body = test_body();
        body.resize(3, 7);
        assert_eq!(body.bounding_rect(), Rect::new(0., 0., 3., 7.));
    }
}
