//! Infrastructure layer.

pub mod backend;
pub mod demo;

pub use self::backend::Backend;
#[cfg(any(test, feature = "mock"))]
pub use self::backend::{mock, Mock};
#[cfg(feature = "rest")]
pub use self::backend::{rest, Rest};
