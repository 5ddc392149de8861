//! Typed validator families.
//!
//! Each family composes one [`crate::Pipeline`] and exposes constraint
//! constructors that append rules to it. Adding a family means adding a
//! module here; the engine itself never changes.

mod number;
mod string;

pub use number::NumberValidator;
pub use string::StringValidator;
