//! This library is an internal component of [`flatbox`],
//! which defines some core mathematical types and functions.
//! Do not depend on this library; use only [`flatbox`] instead.
//!
//! [`flatbox`]: https://crates.io/crates/flatbox

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![warn(clippy::missing_inline_in_public_items)]

/// Do not use this module directly; its contents are re-exported from `flatbox`.
#[macro_use]
pub mod math;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
