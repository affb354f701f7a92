//! Mathematical utilities and decisions.

pub use ordered_float::{FloatIsNan, NotNan};

mod axis;
pub use axis::*;
mod coord;
pub use coord::*;
mod rect;
pub use rect::*;

/// Constructs a [`NotNan`] floating-point value, checked at compile time.
///
/// ```
/// use flatbox_base::{math::NotNan, notnan};
///
/// const X: NotNan<f64> = notnan!(1.25);
/// assert_eq!(X.into_inner(), 1.25);
/// ```
#[doc(hidden)] // reexported publicly within the math module by `flatbox`
#[macro_export]
macro_rules! notnan {
    ($value:literal) => {
        match $value {
            value => {
                // SAFETY: Only literal values are allowed, which will either be a non-NaN
                // float or (as checked below) a type mismatch.
                let result = unsafe { $crate::math::NotNan::new_unchecked(value) };

                // Ensure that the type is one which could have resulted from a float literal,
                // by requiring type unification with a literal. This prohibits char, &str, etc.
                let _ = if false {
                    // SAFETY: Statically never NaN, and is also never executed.
                    unsafe { $crate::math::NotNan::new_unchecked(0.0) }
                } else {
                    result
                };

                result
            }
        }
    };
}
