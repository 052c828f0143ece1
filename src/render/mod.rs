//! Shape rendering module
//!
//! This module contains:
//! - Geometry shared by the rasterizer and the widget's dirty-region updates
//! - Image rendering using tiny-skia

pub mod geometry;
pub mod image;
