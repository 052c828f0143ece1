//! Pure domain types with minimal dependencies
//!
//! This module contains the placed object record and the geometry used to
//! map screen placements into world units. Nothing here touches the raster
//! or the console.

pub mod geometry;
pub mod object;

pub use geometry::*;
pub use object::*;
