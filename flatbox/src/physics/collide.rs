//! Pairwise and group collision testing, and the default axis-separated
//! resolution strategy.

use core::fmt;
use core::ops;
use core::slice::GetDisjointMutError;

use crate::math::{Axis, FreeCoordinate, FreePoint, Rect};
use crate::physics::{Body, Environment, Touching};

/// Slack added to the largest overlap the resolver will attribute to one step's
/// relative motion, preventing false rejection at near-zero overlaps.
pub const OVERLAP_BIAS: FreeCoordinate = 1.0;

/// Identity of a [`Body`] within a [`World`].
///
/// Ids are handed out by [`World::insert`] and remain valid for the life of the
/// world; bodies are never removed, only [killed](Body::kill). Identity, not
/// value equality, is what the group collision operations use to skip
/// self-collision, so two value-equal bodies with distinct ids still collide.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BodyId(usize);

/// A set of [`Body`]s plus the [`Environment`] they simulate in, with
/// operations for advancing kinematics and for detecting and resolving
/// collisions between pairs and groups of bodies.
///
/// Which pairs or groups are eligible to collide is entirely up to the caller;
/// there is no broad-phase index. Every operation here runs synchronously on
/// the calling thread.
pub struct World {
    bodies: Vec<Body>,
    /// Physical parameters shared by every body in this world.
    pub environment: Environment,
}

impl World {
    /// Constructs an empty [`World`] with the default [`Environment`].
    pub fn new() -> Self {
        Self::with_environment(Environment::default())
    }

    /// Constructs an empty [`World`] with the given [`Environment`].
    pub fn with_environment(environment: Environment) -> Self {
        Self {
            bodies: Vec::new(),
            environment,
        }
    }

    /// Adds a body to the world, returning its permanent id.
    pub fn insert(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Returns the body with the given id, or [`None`] if no body with that id
    /// has been inserted.
    ///
    /// Ids are only meaningful in the world whose [`insert`](Self::insert)
    /// issued them; an id from another world addresses whatever body happens
    /// to share its index here, if any.
    #[inline]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Mutable counterpart of [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Number of bodies ever inserted, including killed ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world contains no bodies.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterates over all bodies and their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Advances one frame of kinematics: calls [`Body::update`] on every body
    /// with this world's environment.
    ///
    /// Collision passes are separate; the host loop calls the `collide_*`
    /// operations it wants after stepping.
    pub fn step(&mut self, delta_time: FreeCoordinate) {
        for body in &mut self.bodies {
            body.update(delta_time, &self.environment);
        }
    }

    /// Tests one pair of bodies and, if their bounding rectangles overlap,
    /// applies `resolve` to them. Returns whether the pair both intersected and
    /// was resolved (`resolve` returned true).
    ///
    /// Inactive bodies never collide. Two identical ids never collide.
    ///
    /// Panics if either id is out of range for this world.
    pub fn collide_with<R>(&mut self, a: BodyId, b: BodyId, mut resolve: R) -> bool
    where
        R: FnMut(&mut Body, &mut Body) -> bool,
    {
        let Some([body_a, body_b]) = self.pair_mut(a, b) else {
            return false;
        };
        if !body_a.active || !body_b.active {
            return false;
        }
        if body_a.bounding_rect().intersects(body_b.bounding_rect()) {
            resolve(body_a, body_b)
        } else {
            false
        }
    }

    /// [`collide_with`](Self::collide_with) using the default [`separate`]
    /// strategy.
    pub fn collide(&mut self, a: BodyId, b: BodyId) -> bool {
        self.collide_with(a, b, separate)
    }

    /// Tests `one` against every member of `many`, resolving each overlapping
    /// pair; group members identical to `one` are skipped, so a body may appear
    /// in a group it is tested against without colliding with itself.
    ///
    /// Every eligible pair is tested even after the first success; the return
    /// value is whether at least one pair was resolved.
    pub fn collide_one_many_with<R>(&mut self, one: BodyId, many: &[BodyId], mut resolve: R) -> bool
    where
        R: FnMut(&mut Body, &mut Body) -> bool,
    {
        let mut any = false;
        for &other in many {
            if other == one {
                continue;
            }
            any |= self.collide_with(one, other, &mut resolve);
        }
        any
    }

    /// [`collide_one_many_with`](Self::collide_one_many_with) using the default
    /// [`separate`] strategy.
    pub fn collide_one_many(&mut self, one: BodyId, many: &[BodyId]) -> bool {
        self.collide_one_many_with(one, many, separate)
    }

    /// Mirror image of [`collide_one_many_with`](Self::collide_one_many_with):
    /// tests every member of `many` against `one`. The resolver still sees the
    /// single body as its first argument.
    pub fn collide_many_one_with<R>(&mut self, many: &[BodyId], one: BodyId, resolve: R) -> bool
    where
        R: FnMut(&mut Body, &mut Body) -> bool,
    {
        self.collide_one_many_with(one, many, resolve)
    }

    /// [`collide_many_one_with`](Self::collide_many_one_with) using the default
    /// [`separate`] strategy.
    pub fn collide_many_one(&mut self, many: &[BodyId], one: BodyId) -> bool {
        self.collide_many_one_with(many, one, separate)
    }

    /// Tests the full cartesian product of two groups, resolving each
    /// overlapping pair. Pairs whose two ids are identical are skipped; beyond
    /// that there is no de-duplication, so testing a group against itself
    /// processes both orderings of each distinct pair.
    pub fn collide_many_many_with<R>(
        &mut self,
        group_a: &[BodyId],
        group_b: &[BodyId],
        mut resolve: R,
    ) -> bool
    where
        R: FnMut(&mut Body, &mut Body) -> bool,
    {
        let mut any = false;
        for &a in group_a {
            for &b in group_b {
                if a == b {
                    continue;
                }
                any |= self.collide_with(a, b, &mut resolve);
            }
        }
        any
    }

    /// [`collide_many_many_with`](Self::collide_many_many_with) using the
    /// default [`separate`] strategy.
    pub fn collide_many_many(&mut self, group_a: &[BodyId], group_b: &[BodyId]) -> bool {
        self.collide_many_many_with(group_a, group_b, separate)
    }

    /// Borrows two distinct bodies at once, or [`None`] if the ids are
    /// identical.
    fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<[&mut Body; 2]> {
        match self.bodies.get_disjoint_mut([a.0, b.0]) {
            Ok(pair) => Some(pair),
            Err(GetDisjointMutError::OverlappingIndices) => None,
            Err(_) => panic!("body id out of range: {a:?} or {b:?}"),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for World {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            bodies,
            environment,
        } = self;
        fmt.debug_struct("World")
            .field("bodies", bodies)
            .field("environment", environment)
            .finish()
    }
}

impl ops::Index<BodyId> for World {
    type Output = Body;

    #[inline]
    fn index(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }
}
impl ops::IndexMut<BodyId> for World {
    #[inline]
    fn index_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0]
    }
}

/// The default resolution strategy: axis-separated positional correction and
/// velocity averaging, as performed by [`separate_x`] and [`separate_y`].
///
/// Both axes are always attempted, even if the first already corrected the
/// pair. Returns whether either axis performed a correction.
pub fn separate(body1: &mut Body, body2: &mut Body) -> bool {
    let separated_x = separate_x(body1, body2);
    let separated_y = separate_y(body1, body2);
    separated_x || separated_y
}

/// Corrects the horizontal overlap between two bodies that is attributable to
/// this step's relative motion. See [`separate`] for the combined strategy.
pub fn separate_x(body1: &mut Body, body2: &mut Body) -> bool {
    separate_on_axis(body1, body2, Axis::X)
}

/// Corrects the vertical overlap between two bodies that is attributable to
/// this step's relative motion. See [`separate`] for the combined strategy.
pub fn separate_y(body1: &mut Body, body2: &mut Body) -> bool {
    separate_on_axis(body1, body2, Axis::Y)
}

/// Single-axis core of the default strategy.
///
/// Overlap is attributed to this step's relative motion: bodies whose per-step
/// displacements on the axis are equal, or whose motion-swept rectangles do not
/// even meet, are left alone no matter how their current rectangles overlap.
fn separate_on_axis(body1: &mut Body, body2: &mut Body, axis: Axis) -> bool {
    // Two immovable bodies never separate.
    if body1.immovable && body2.immovable {
        return false;
    }

    let delta1 = body1.position()[axis] - body1.previous_position()[axis];
    let delta2 = body2.position()[axis] - body2.previous_position()[axis];
    if delta1 == delta2 {
        return false;
    }

    if !swept_rect(body1, axis, delta1).intersects(swept_rect(body2, axis, delta2)) {
        return false;
    }

    let max_overlap = delta1.abs() + delta2.abs() + OVERLAP_BIAS;
    let p1 = body1.position()[axis];
    let p2 = body2.position()[axis];

    let overlap = if delta1 > delta2 {
        // Body 1 moving toward +axis relative to body 2.
        let overlap = p1 + FreeCoordinate::from(body1.size()[axis]) - p2;
        if overlap > max_overlap {
            0.0
        } else {
            body1.mark_touching(forward_side(axis));
            body2.mark_touching(backward_side(axis));
            overlap
        }
    } else {
        // delta1 < delta2: body 1 moving toward −axis relative to body 2.
        let overlap = p1 - FreeCoordinate::from(body2.size()[axis]) - p2;
        if -overlap > max_overlap {
            0.0
        } else {
            body1.mark_touching(backward_side(axis));
            body2.mark_touching(forward_side(axis));
            overlap
        }
    };

    if overlap == 0.0 {
        return false;
    }

    // Axis velocities before any mutation.
    let v1 = body1.velocity()[axis];
    let v2 = body2.velocity()[axis];

    if !body1.immovable && !body2.immovable {
        let half = overlap * 0.5;
        shift(body1, axis, -half);
        shift(body2, axis, half);
        // Perfectly inelastic merge of the axis velocities.
        let merged = (v1 + v2) * 0.5;
        set_axis_velocity(body1, axis, merged);
        set_axis_velocity(body2, axis, merged);
    } else if !body1.immovable {
        shift(body1, axis, -overlap);
        set_axis_velocity(body1, axis, v2);
    } else {
        shift(body2, axis, overlap);
        set_axis_velocity(body2, axis, v1);
    }
    true
}

/// The rectangle covering `body`'s motion path along `axis` this step: its
/// bounding rectangle extended backward by the step displacement.
///
/// The x pass runs before any y correction, so it sweeps against the pre-step y
/// position; the y pass uses the already-corrected x position.
fn swept_rect(body: &Body, axis: Axis, delta: FreeCoordinate) -> Rect {
    let mut origin = match axis {
        Axis::X => FreePoint::new(body.position().x, body.previous_position().y),
        Axis::Y => body.position(),
    };
    origin[axis] -= delta.max(0.0);
    let mut size = body.size().to_f64();
    size[axis] += delta.abs();
    Rect::from_origin_size(origin, size)
}

fn shift(body: &mut Body, axis: Axis, amount: FreeCoordinate) {
    let mut position = body.position();
    position[axis] += amount;
    body.set_position(position);
}

fn set_axis_velocity(body: &mut Body, axis: Axis, value: FreeCoordinate) {
    let mut velocity = body.velocity();
    velocity[axis] = value;
    body.set_velocity(velocity);
}

fn forward_side(axis: Axis) -> Touching {
    match axis {
        Axis::X => Touching::RIGHT,
        Axis::Y => Touching::DOWN,
    }
}

fn backward_side(axis: Axis) -> Touching {
    match axis {
        Axis::X => Touching::LEFT,
        Axis::Y => Touching::UP,
    }
}

/// Note: Tests which involve both body and collision code are in the parent module.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swept_rect_extends_backward() {
        let mut body = Body::new([10., 20.], [4, 4]);
        // Pretend the body moved +6 in x this step.
        body.set_position([16., 20.]);
        assert_eq!(swept_rect(&body, Axis::X, 6.0), Rect::new(10., 20., 10., 4.));
        // Negative displacement extends forward from the current position.
        body.set_position([4., 20.]);
        assert_eq!(swept_rect(&body, Axis::X, -6.0), Rect::new(4., 20., 10., 4.));
    }

    #[test]
    fn swept_rect_y_uses_current_x() {
        let mut body = Body::new([0., 0.], [4, 4]);
        body.set_position([2., 6.]);
        assert_eq!(swept_rect(&body, Axis::Y, 6.0), Rect::new(2., 0., 4., 10.));
    }
}
