use ordered_float::NotNan;

use crate::math::{FreeCoordinate, notnan};

/// The shared physical parameters of a simulation, passed to
/// [`Body::update`](super::Body::update) rather than stored globally.
///
/// There is exactly one simulation thread; the environment may be mutated
/// between frames but is read-only during a step.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct Environment {
    /// Acceleration due to gravity, in pixels/s², applied along +y (downward).
    ///
    /// Each body scales this by its own
    /// [`gravity_scale`](super::Body::gravity_scale); a scale of zero opts the
    /// body out entirely.
    pub gravity: NotNan<FreeCoordinate>,
}

impl Environment {
    /// Default acceleration due to gravity, in pixels/s².
    pub const DEFAULT_GRAVITY: NotNan<FreeCoordinate> = notnan!(800.0);

    /// Constructs an [`Environment`] with the default gravity.
    #[inline]
    pub const fn new() -> Self {
        Self {
            gravity: Self::DEFAULT_GRAVITY,
        }
    }
}

impl Default for Environment {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gravity() {
        assert_eq!(Environment::default().gravity.into_inner(), 800.0);
    }
}
