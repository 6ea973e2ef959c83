//! Pixel <-> meter conversion.
//!
//! Game logic and rendering work in pixels, the dynamics engine in meters. A single
//! scalar ties the two together:
//!
//! - `scale = max(viewport.width, viewport.height) / WORLD_METERS`
//! - `meters = pixels / scale`
//! - `pixels = meters * scale`
//!
//! The larger viewport side always spans `WORLD_METERS` meters, which keeps body
//! sizes inside the range the solver is tuned for regardless of resolution.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::constants::WORLD_METERS;

/// Viewport dimensions in pixels, supplied by the view layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The larger of the two dimensions.
    #[inline]
    pub fn max_dimension(&self) -> f32 {
        self.width.max(self.height)
    }
}

impl From<[f32; 2]> for ViewportSize {
    fn from([width, height]: [f32; 2]) -> Self {
        Self { width, height }
    }
}

/// Pixels per meter.
///
/// Not validated: a non-positive or non-finite value produces degenerate
/// conversions rather than an error. [`crate::SimulationConfig::validate`] is the
/// place that rejects bad input.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Scale(pub f32);

impl Scale {
    /// Derive the scale from the viewport's larger dimension.
    #[inline]
    pub fn from_viewport(viewport: ViewportSize) -> Self {
        Self(viewport.max_dimension() / WORLD_METERS)
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn to_meters(self, pixels: f32) -> f32 {
        pixels / self.0
    }

    #[inline]
    pub fn to_pixels(self, meters: f32) -> f32 {
        meters * self.0
    }

    #[inline]
    pub fn vector_to_meters(self, pixels: Vector2<f32>) -> Vector2<f32> {
        pixels / self.0
    }

    #[inline]
    pub fn vector_to_pixels(self, meters: Vector2<f32>) -> Vector2<f32> {
        meters * self.0
    }

    #[inline]
    pub fn point_to_meters(self, pixels: Point2<f32>) -> Point2<f32> {
        Point2::from(pixels.coords / self.0)
    }

    #[inline]
    pub fn point_to_pixels(self, meters: Point2<f32>) -> Point2<f32> {
        Point2::from(meters.coords * self.0)
    }
}
