//! Numeric types used for coordinates and related quantities.

use euclid::{Point2D, Size2D, Vector2D};

/// Unit-of-measure type for lengths in world space (pixels, by convention).
///
/// The +x direction is rightward and the +y direction is downward,
/// matching the screen coordinate convention of 2D rendering backends.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum World {}

/// Numeric type for extents that are locked to whole pixels,
/// such as the width and height of a bounding box.
pub type GridSizeCoord = u32;

/// Sizes of pixel-aligned objects.
pub type GridSize = Size2D<GridSizeCoord, World>;

/// Coordinates that are not locked to the pixel grid.
///
/// Note: Because `GridSizeCoord = u32` and `FreeCoordinate = f64`, which has
/// more than 32 bits of mantissa, the infallible conversion
/// `From<GridSizeCoord> for FreeCoordinate` exists, which is often convenient.
pub type FreeCoordinate = f64;

/// Positions that are not locked to the pixel grid.
pub type FreePoint = Point2D<FreeCoordinate, World>;

/// Vectors that are not locked to the pixel grid.
pub type FreeVector = Vector2D<FreeCoordinate, World>;

/// Sizes that are not locked to the pixel grid.
pub type FreeSize = Size2D<FreeCoordinate, World>;
