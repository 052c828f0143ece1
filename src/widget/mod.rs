//! Drawing widget
//!
//! The `FlyAr` widget owns the raster, the recorded objects and the
//! placement sequencer, and turns pointer events into placed shapes.

pub mod flyar;

pub use flyar::FlyAr;
