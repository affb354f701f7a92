use core::cmp::Ordering;
use core::fmt;

use crate::math::{Axis, FreeCoordinate, FreePoint, FreeSize, FreeVector};

/// Axis-aligned rectangle data type, stored as an origin (top-left corner in the
/// usual screen coordinate convention) and a non-negative size.
///
/// Used both as the bounding box of physics bodies and as the payload of the
/// generic intersection test.
#[derive(Copy, Clone, PartialEq)]
pub struct Rect {
    origin: FreePoint,
    size: FreeSize,
}

impl Rect {
    /// The [`Rect`] of zero size at the origin.
    pub const ZERO: Rect = Rect {
        origin: FreePoint::new(0., 0.),
        size: FreeSize::new(0., 0.),
    };

    /// Constructs a [`Rect`] from individual coordinates.
    #[inline]
    #[track_caller]
    pub fn new(x: FreeCoordinate, y: FreeCoordinate, width: FreeCoordinate, height: FreeCoordinate) -> Self {
        Self::from_origin_size(FreePoint::new(x, y), FreeSize::new(width, height))
    }

    /// Constructs a [`Rect`] from its origin corner and size.
    ///
    /// Panics if the size is negative or NaN, or if the origin is NaN.
    #[inline]
    #[track_caller]
    pub fn from_origin_size(origin: impl Into<FreePoint>, size: impl Into<FreeSize>) -> Self {
        let origin = origin.into();
        let size = size.into();
        match Self::checked_from_origin_size(origin, size) {
            Some(rect) => rect,
            None => panic!("invalid Rect origin or size: origin {origin:?} size {size:?}"),
        }
    }

    /// Constructs a [`Rect`] from its origin corner and size.
    ///
    /// Returns [`None`] if the size is negative or NaN, or if the origin is NaN.
    pub(crate) fn checked_from_origin_size(origin: FreePoint, size: FreeSize) -> Option<Self> {
        // The >= comparisons also reject NaN sizes.
        if size.width >= 0.0 && size.height >= 0.0 && !origin.x.is_nan() && !origin.y.is_nan() {
            Some(Self { origin, size })
        } else {
            None
        }
    }

    /// The most negative corner of the rectangle.
    #[inline]
    pub const fn origin(&self) -> FreePoint {
        self.origin
    }

    /// Size of the rectangle in each axis; always non-negative.
    #[inline]
    pub const fn size(&self) -> FreeSize {
        self.size
    }

    /// The most positive corner of the rectangle;
    /// equal to `self.origin() + self.size()`.
    #[inline]
    pub fn max(&self) -> FreePoint {
        self.origin + self.size.to_vector()
    }

    /// The least coordinate of the rectangle on the given axis.
    #[inline]
    pub fn min_on(&self, axis: Axis) -> FreeCoordinate {
        self.origin[axis]
    }

    /// The greatest coordinate of the rectangle on the given axis.
    #[inline]
    pub fn max_on(&self, axis: Axis) -> FreeCoordinate {
        self.origin[axis] + self.size[axis]
    }

    /// The center of the enclosed area.
    ///
    /// ```
    /// use flatbox_base::math::{FreePoint, Rect};
    ///
    /// let rect = Rect::new(1.0, 2.0, 4.0, 6.0);
    /// assert_eq!(rect.center(), FreePoint::new(3.0, 5.0));
    /// ```
    #[inline]
    pub fn center(&self) -> FreePoint {
        self.origin + self.size.to_vector() * 0.5
    }

    /// Returns whether this rectangle, including the boundary, contains the point.
    #[inline]
    pub fn contains(&self, point: FreePoint) -> bool {
        for axis in Axis::ALL {
            if !(self.min_on(axis) <= point[axis] && point[axis] <= self.max_on(axis)) {
                return false;
            }
        }
        true
    }

    /// Returns whether this rectangle, including the boundary, intersects the other
    /// rectangle.
    ///
    /// Rectangles that merely touch edge-to-edge or corner-to-corner count as
    /// intersecting, and zero-size rectangles can intersect if they are coincident
    /// to that degree.
    ///
    /// ```
    /// use flatbox_base::math::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// assert!(rect.intersects(Rect::new(100.0, 0.0, 100.0, 100.0)));
    /// assert!(!rect.intersects(Rect::new(100.0 + f64::EPSILON * 100.0, 0.0, 100.0, 100.0)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: Rect) -> bool {
        for axis in Axis::ALL {
            let intersection_min = self.min_on(axis).max(other.min_on(axis));
            let intersection_max = self.max_on(axis).min(other.max_on(axis));
            match intersection_min.partial_cmp(&intersection_max) {
                Some(Ordering::Less | Ordering::Equal) => {}
                _ => return false,
            }
        }
        true
    }

    /// Translate this rectangle by the specified offset.
    #[inline]
    #[must_use]
    #[track_caller] // in case of NaN
    pub fn translate(self, offset: FreeVector) -> Self {
        Self::from_origin_size(self.origin + offset, self.size)
    }
}

impl fmt::Debug for Rect {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rect { origin, size: _ } = *self;
        let max = self.max();
        f.debug_tuple("Rect")
            .field(&(origin.x..=max.x))
            .field(&(origin.y..=max.y))
            .finish()
    }
}

/// [`Rect`] rejects NaN values, so it can implement [`Eq`]
/// even though it contains floats.
impl Eq for Rect {}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point2, size2, vec2};
    use pretty_assertions::assert_eq;

    #[test]
    fn new_negative_size() {
        assert_eq!(
            Rect::checked_from_origin_size(point2(0., 0.), size2(-1., 1.)),
            None
        );
        assert_eq!(
            Rect::checked_from_origin_size(point2(0., 0.), size2(1., -1.)),
            None
        );
    }

    #[test]
    fn new_nan() {
        assert_eq!(
            Rect::checked_from_origin_size(point2(0., 0.), size2(1., f64::NAN)),
            None
        );
        assert_eq!(
            Rect::checked_from_origin_size(point2(f64::NAN, 0.), size2(1., 1.)),
            None
        );
    }

    #[test]
    #[should_panic = "invalid Rect origin or size"]
    fn new_panic_message() {
        Rect::new(0., 0., 1., f64::NAN);
    }

    #[test]
    fn debug() {
        let rect = Rect::new(1.25, 2.0, 1.0, 2.0);
        assert_eq!(format!("{rect:?}"), "Rect(1.25..=2.25, 2.0..=4.0)");
    }

    /// Exactly edge-to-edge rectangles are reported as intersecting;
    /// any further separation is not.
    #[test]
    fn intersects_boundary_inclusive() {
        let rect1 = Rect::new(0., 0., 100., 100.);
        assert!(rect1.intersects(Rect::new(100., 0., 100., 100.)));
        assert!(rect1.intersects(Rect::new(0., 100., 100., 100.)));
        assert!(rect1.intersects(Rect::new(100., 100., 100., 100.))); // corner contact
        assert!(!rect1.intersects(Rect::new(100.001, 0., 100., 100.)));
        assert!(!rect1.intersects(Rect::new(0., 100.001, 100., 100.)));
    }

    #[test]
    fn intersects_zero_size() {
        let degenerate = Rect::new(5., 5., 0., 0.);
        assert!(degenerate.intersects(degenerate));
        assert!(degenerate.intersects(Rect::new(0., 0., 10., 10.)));
        assert!(!degenerate.intersects(Rect::new(6., 6., 10., 10.)));
    }

    #[test]
    fn contains_boundary_inclusive() {
        let rect = Rect::new(0., 0., 10., 10.);
        assert!(rect.contains(point2(0., 0.)));
        assert!(rect.contains(point2(10., 10.)));
        assert!(!rect.contains(point2(10.000001, 10.)));
    }

    #[test]
    fn translate() {
        assert_eq!(
            Rect::new(1., 2., 3., 4.).translate(vec2(10., 20.)),
            Rect::new(11., 22., 3., 4.)
        );
    }
}
