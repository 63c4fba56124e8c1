// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room configuration
//!
//! All sizes are in world units (metres). Positions are floor-centre points.

use crate::aabb::Aabb;
use crate::error::{Error, Result};
use crate::opening::Opening;
use crate::projector::AssetCorrection;
use crate::transform::QuarterTurn;
use crate::window::WindowFrameConfig;
use nalgebra::Point3;

/// World units covered by one texture repeat
pub const TEXTURE_SCALE: f64 = 2.0;

/// Extra floor size hiding seams under the walls
pub const FLOOR_MARGIN: f64 = 0.05;

/// One wall of a room
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallConfig {
    /// Wall width; the room width is used when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<f64>,
    /// Floor-centre point of the wall
    pub position: Point3<f64>,
    /// Yaw in radians: 0 (front-facing) or π/2 (side-facing)
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub openings: Vec<Opening>,
}

impl WallConfig {
    pub fn new(position: Point3<f64>, rotation: f64) -> Self {
        Self {
            width: None,
            position,
            rotation,
            openings: Vec::new(),
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_opening(mut self, opening: Opening) -> Self {
        self.openings.push(opening);
        self
    }

    /// The wall yaw, if it is one the room assembler supports
    pub fn turn(&self) -> Option<QuarterTurn> {
        match QuarterTurn::from_radians(self.rotation) {
            Some(turn @ (QuarterTurn::R0 | QuarterTurn::R90)) => Some(turn),
            _ => None,
        }
    }
}

/// Bounding boxes of externally loaded models, already measured in world space
///
/// A present box replaces the literal default opening and suppresses the
/// procedural insert for that opening kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExternalModels {
    pub window: Option<Aabb>,
    pub door: Option<Aabb>,
}

/// Room assembly parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoomConfig {
    /// Extent along world X
    pub width: f64,
    /// Extent along world Z
    pub depth: f64,
    pub wall_height: f64,
    pub wall_thickness: f64,
    pub texture_scale: f64,
    pub floor_margin: f64,
    /// Explicit walls; the default front/left/right layout is used when absent
    pub walls: Option<Vec<WallConfig>>,
    pub external_models: ExternalModels,
    /// Front-wall window used when no window model is available
    pub default_window: Opening,
    /// Left-wall door used when no door model is available
    pub default_door: Opening,
    pub window_correction: AssetCorrection,
    pub door_correction: AssetCorrection,
    pub window_frame: WindowFrameConfig,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: 3.0,
            depth: 3.0,
            wall_height: 2.7,
            wall_thickness: 0.2,
            texture_scale: TEXTURE_SCALE,
            floor_margin: FLOOR_MARGIN,
            walls: None,
            external_models: ExternalModels::default(),
            default_window: Opening::window(0.014, 0.167, 1.143, 1.661),
            default_door: Opening::door(0.013, -0.4345, 0.855, 2.131),
            window_correction: AssetCorrection::identity(),
            door_correction: AssetCorrection::door_default(),
            window_frame: WindowFrameConfig::default(),
        }
    }
}

fn positive(what: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::dimension(what, value))
    }
}

fn finite_point(p: &Point3<f64>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}

impl RoomConfig {
    /// Check sizes, wall rotations and opening parameters
    ///
    /// Only yaws of 0 and π/2 are accepted; the side-wall axis mapping is
    /// defined for those two orientations only.
    pub fn validate(&self) -> Result<()> {
        positive("width", self.width)?;
        positive("depth", self.depth)?;
        positive("wall_height", self.wall_height)?;
        positive("wall_thickness", self.wall_thickness)?;
        positive("texture_scale", self.texture_scale)?;
        if !(self.floor_margin.is_finite() && self.floor_margin >= 0.0) {
            return Err(Error::dimension("floor_margin", self.floor_margin));
        }

        for (name, opening) in [
            ("default window", &self.default_window),
            ("default door", &self.default_door),
        ] {
            if !opening.is_finite() {
                return Err(Error::InvalidOpening(format!(
                    "{} has non-finite parameters",
                    name
                )));
            }
        }

        for (name, bbox) in [
            ("window", &self.external_models.window),
            ("door", &self.external_models.door),
        ] {
            if let Some(bbox) = bbox {
                if !finite_point(&bbox.min) || !finite_point(&bbox.max) {
                    return Err(Error::InvalidOpening(format!(
                        "external {} bounding box is not finite",
                        name
                    )));
                }
            }
        }

        if let Some(walls) = &self.walls {
            for (index, wall) in walls.iter().enumerate() {
                if wall.turn().is_none() {
                    return Err(Error::InvalidRotation {
                        wall: index,
                        radians: wall.rotation,
                    });
                }
                if let Some(width) = wall.width {
                    positive("wall width", width)?;
                }
                if !finite_point(&wall.position) {
                    return Err(Error::InvalidOpening(format!(
                        "wall {} has a non-finite position",
                        index
                    )));
                }
                if let Some(opening) = wall.openings.iter().find(|o| !o.is_finite()) {
                    return Err(Error::InvalidOpening(format!(
                        "wall {}: {} opening has non-finite parameters",
                        index, opening.kind
                    )));
                }
            }
        }

        Ok(())
    }
}
