//! Query regions for the spatial lookups on [`crate::Simulation`].

use nalgebra::{Point2, Vector2};
use rapier2d::parry::bounding_volume::Aabb;

use crate::constants::POINT_QUERY_HALF_EXTENT;

/// Area passed to [`crate::Simulation::bodies_in_area`], in engine space.
///
/// Despite the names, `w`/`h` are consumed as the absolute upper bound, not as a size:
/// the query box is `(x, y)..=(w, h)`. Callers holding an origin + size should build the
/// rectangle with [`Rect::from_origin_size`].
///
/// NOTE: this reads like a width/height rectangle and probably was meant to be
/// `(x, y)..=(x + w, y + h)`. Kept as absolute bounds so existing callers don't shift;
/// switch `to_aabb` over once every caller goes through `from_origin_size`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build the bounds rectangle covering `width x height` starting at `(x, y)`.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            w: x + width,
            h: y + height,
        }
    }

    /// Lower bound `(x, y)`, upper bound `(w, h)`.
    pub fn to_aabb(&self) -> Aabb {
        Aabb::new(Point2::new(self.x, self.y), Point2::new(self.w, self.h))
    }
}

/// Tiny box around `point` used to collect point-query candidates from the broadphase.
pub fn point_region(point: Point2<f32>) -> Aabb {
    Aabb::from_half_extents(point, Vector2::repeat(POINT_QUERY_HALF_EXTENT))
}
