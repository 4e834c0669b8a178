//! Grid rendering
//!
//! Projects placements onto a dense character grid and serializes it
//! row by row.

pub mod grid;

pub use grid::{CollisionPolicy, Grid, Origin, RenderOptions};
