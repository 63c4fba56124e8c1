// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening descriptors and the records published about them

use nalgebra::{Point3, Vector3};
use std::fmt;

/// What an opening is cut for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OpeningKind {
    Window,
    Door,
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpeningKind::Window => write!(f, "window"),
            OpeningKind::Door => write!(f, "door"),
        }
    }
}

/// A rectangular void in a wall, in wall-local coordinates
///
/// `center_offset_x` is measured along the wall width from the wall centre;
/// `center_offset_y` is measured from the wall's mid-height, never from the
/// floor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opening {
    pub kind: OpeningKind,
    pub center_offset_x: f64,
    pub center_offset_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Opening {
    pub fn new(
        kind: OpeningKind,
        center_offset_x: f64,
        center_offset_y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            kind,
            center_offset_x,
            center_offset_y,
            width,
            height,
        }
    }

    pub fn window(center_offset_x: f64, center_offset_y: f64, width: f64, height: f64) -> Self {
        Self::new(OpeningKind::Window, center_offset_x, center_offset_y, width, height)
    }

    pub fn door(center_offset_x: f64, center_offset_y: f64, width: f64, height: f64) -> Self {
        Self::new(OpeningKind::Door, center_offset_x, center_offset_y, width, height)
    }

    /// Left and right edges along the wall width
    #[inline]
    pub fn horizontal_span(&self) -> (f64, f64) {
        let half = self.width / 2.0;
        (self.center_offset_x - half, self.center_offset_x + half)
    }

    /// Centre height above the wall's floor line
    #[inline]
    pub fn center_y_from_floor(&self, wall_height: f64) -> f64 {
        wall_height / 2.0 + self.center_offset_y
    }

    /// Bottom and top edges above the wall's floor line
    #[inline]
    pub fn vertical_span(&self, wall_height: f64) -> (f64, f64) {
        let center = self.center_y_from_floor(wall_height);
        let half = self.height / 2.0;
        (center - half, center + half)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.center_offset_x.is_finite()
            && self.center_offset_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Where an opening sits on a finished wall mesh (wall-local, floor at 0)
///
/// Attached to wall meshes so inserts (frames, glass) can be fitted later.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpeningMetadata {
    pub kind: OpeningKind,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub bottom: f64,
    pub top: f64,
}

impl OpeningMetadata {
    pub fn from_opening(opening: &Opening, wall_height: f64) -> Self {
        let (bottom, top) = opening.vertical_span(wall_height);
        Self {
            kind: opening.kind,
            center_x: opening.center_offset_x,
            center_y: opening.center_y_from_floor(wall_height),
            width: opening.width,
            height: opening.height,
            bottom,
            top,
        }
    }
}

/// Width and height of an opening
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpeningSize {
    pub width: f64,
    pub height: f64,
}

/// An opening expressed in room (world) coordinates
///
/// `global_position.y` is always `wall.y + wall_height / 2 + center_offset_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalOpeningRecord {
    pub kind: OpeningKind,
    pub global_position: Point3<f64>,
    pub size: OpeningSize,
    /// Host wall normal, pointing into the room
    pub inward_normal: Vector3<f64>,
}
