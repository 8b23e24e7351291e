//! SQL builder: fixed identifiers, user values only as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
