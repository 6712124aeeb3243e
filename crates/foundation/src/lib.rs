pub mod bounds;
pub mod coord;

// Foundation crate: small, well-tested geographic primitives only.
pub use bounds::*;
pub use coord::*;
