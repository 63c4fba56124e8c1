// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening projection
//!
//! Converts the world-space bounding box of an externally placed model
//! (a loaded door or window) into wall-local opening parameters. The box
//! centre is moved into the wall frame with the inverse of the wall's
//! [`Placement`]; width and height come from the box extents along the wall's
//! local X and Y axes.
//!
//! Tolerance fixes for specific assets (shrinking a door so the frame
//! overlaps the cut, nudging it down) are not part of projection. They are
//! applied afterwards with [`AssetCorrection`].

use crate::aabb::Aabb;
use crate::opening::{Opening, OpeningKind};
use crate::transform::{Placement, QuarterTurn};
use nalgebra::Point3;

/// Smallest width/height an opening may be corrected down to
pub const MIN_OPENING_SIZE: f64 = 0.01;

/// Wall-local opening parameters derived from a bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectedOpening {
    pub width: f64,
    pub height: f64,
    /// Along the wall width, 0 = wall centre
    pub center_offset_x: f64,
    /// Relative to wall mid-height
    pub center_offset_y: f64,
}

impl ProjectedOpening {
    pub fn into_opening(self, kind: OpeningKind) -> Opening {
        Opening::new(
            kind,
            self.center_offset_x,
            self.center_offset_y,
            self.width,
            self.height,
        )
    }
}

/// Project a world-space bounding box onto a wall
///
/// `wall_position` is the wall's floor-centre point. The box centre is
/// translated by `-wall_position` and rotated by the inverse wall yaw;
/// `center_offset_y` is then re-referenced to the wall mid-height.
pub fn project(
    bbox: &Aabb,
    wall_position: Point3<f64>,
    wall_turn: QuarterTurn,
    wall_height: f64,
    wall_thickness: f64,
) -> ProjectedOpening {
    let local_center = Placement::new(wall_position, wall_turn).to_local(bbox.center());
    let local_size = wall_turn.local_extent(bbox.size());

    if local_center.z.abs() > wall_thickness + local_size.z / 2.0 {
        tracing::warn!(
            depth_offset = local_center.z,
            wall_thickness,
            "Bounding box centre lies off the wall plane"
        );
    }

    ProjectedOpening {
        width: local_size.x,
        height: local_size.y,
        center_offset_x: local_center.x,
        center_offset_y: local_center.y - wall_height / 2.0,
    }
}

/// Project onto a front-facing wall (local X = world X)
pub fn project_front(
    bbox: &Aabb,
    wall_position: Point3<f64>,
    wall_height: f64,
    wall_thickness: f64,
) -> ProjectedOpening {
    project(bbox, wall_position, QuarterTurn::R0, wall_height, wall_thickness)
}

/// Project onto a side-facing wall rotated 90° (local X = world Z)
///
/// Width comes from the box's world Z extent, height from its Y extent.
pub fn project_side(
    bbox: &Aabb,
    wall_position: Point3<f64>,
    wall_height: f64,
    wall_thickness: f64,
) -> ProjectedOpening {
    project(bbox, wall_position, QuarterTurn::R90, wall_height, wall_thickness)
}

/// Post-projection adjustment for a particular asset
///
/// Deltas are added to the projected size (negative values shrink) and the
/// result is clamped to `min_size`; `center_y_shift` is added to the
/// vertical offset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssetCorrection {
    pub width_delta: f64,
    pub height_delta: f64,
    pub center_y_shift: f64,
    pub min_size: f64,
}

impl AssetCorrection {
    /// No adjustment besides the minimum-size clamp
    pub const fn identity() -> Self {
        Self {
            width_delta: 0.0,
            height_delta: 0.0,
            center_y_shift: 0.0,
            min_size: MIN_OPENING_SIZE,
        }
    }

    /// Tuned for the bundled door model: shrink 10 cm wide, 5 cm tall and
    /// drop the centre 2.5 cm so the door leaf covers the cut edges.
    pub const fn door_default() -> Self {
        Self {
            width_delta: -0.10,
            height_delta: -0.05,
            center_y_shift: -0.025,
            min_size: MIN_OPENING_SIZE,
        }
    }

    pub fn apply(&self, projected: ProjectedOpening) -> ProjectedOpening {
        let width = projected.width + self.width_delta;
        let height = projected.height + self.height_delta;

        if width < self.min_size || height < self.min_size {
            tracing::warn!(
                width,
                height,
                min_size = self.min_size,
                "Corrected opening clamped to minimum size"
            );
        }

        ProjectedOpening {
            width: width.max(self.min_size),
            height: height.max(self.min_size),
            center_offset_x: projected.center_offset_x,
            center_offset_y: projected.center_offset_y + self.center_y_shift,
        }
    }
}

impl Default for AssetCorrection {
    fn default() -> Self {
        Self::identity()
    }
}
