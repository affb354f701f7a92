//! Continuously moving objects and collision.

mod body;
pub use body::*;
mod collide;
pub use collide::*;
mod environment;
pub use environment::*;


/// Unit-of-measure type for vectors that are velocity in pixels/s.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Velocity {}

/// Unit-of-measure type for vectors that are acceleration in pixels/s².
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Acceleration {}
