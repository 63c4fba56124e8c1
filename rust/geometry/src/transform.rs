// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared wall-frame transforms
//!
//! Walls are only ever rotated about the vertical axis by multiples of 90°,
//! so the local/world mapping is an exact axis permutation with sign flips.
//! Both the opening projector (world → wall) and the room assembler
//! (wall → world) go through [`QuarterTurn`], which keeps the two directions
//! in sync.
//!
//! Convention: a configured rotation of +90° carries local +X onto world +Z
//! and local +Z onto world -X. In right-handed terms (nalgebra, scene graphs)
//! that is a rotation of -90° about +Y; renderers must place nodes with
//! [`QuarterTurn::yaw`] or [`QuarterTurn::to_rotation`], never with the
//! configured angle.

use nalgebra::{Point3, Rotation3, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Tolerance when snapping a rotation in radians to a quarter turn
const ANGLE_TOLERANCE: f64 = 1e-6;

/// Rotation about the vertical (Y) axis by a multiple of 90°
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuarterTurn {
    /// Front-facing wall, local X = world X
    #[default]
    R0,
    /// Side-facing wall, local X = world Z
    R90,
    R180,
    R270,
}

impl QuarterTurn {
    /// Snap a rotation in radians to a quarter turn
    ///
    /// Returns `None` if the angle is not a multiple of π/2.
    pub fn from_radians(radians: f64) -> Option<Self> {
        if !radians.is_finite() {
            return None;
        }
        let steps = (radians / FRAC_PI_2).round();
        if (radians - steps * FRAC_PI_2).abs() > ANGLE_TOLERANCE {
            return None;
        }
        match (steps as i64).rem_euclid(4) {
            0 => Some(QuarterTurn::R0),
            1 => Some(QuarterTurn::R90),
            2 => Some(QuarterTurn::R180),
            _ => Some(QuarterTurn::R270),
        }
    }

    /// Right-handed rotation angle about +Y that matches [`apply`](Self::apply)
    ///
    /// This is the negated configured angle: `R90` yields `-π/2`.
    pub fn yaw(self) -> f64 {
        -(self.steps() as f64) * FRAC_PI_2
    }

    /// Right-handed rotation matrix equal to [`apply`](Self::apply)
    pub fn to_rotation(self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw())
    }

    fn steps(self) -> u8 {
        match self {
            QuarterTurn::R0 => 0,
            QuarterTurn::R90 => 1,
            QuarterTurn::R180 => 2,
            QuarterTurn::R270 => 3,
        }
    }

    /// The rotation that undoes this one
    pub fn inverse(self) -> Self {
        match self {
            QuarterTurn::R0 => QuarterTurn::R0,
            QuarterTurn::R90 => QuarterTurn::R270,
            QuarterTurn::R180 => QuarterTurn::R180,
            QuarterTurn::R270 => QuarterTurn::R90,
        }
    }

    /// Half turn on top of this one, flipping the local Z direction
    pub fn opposite(self) -> Self {
        match self {
            QuarterTurn::R0 => QuarterTurn::R180,
            QuarterTurn::R90 => QuarterTurn::R270,
            QuarterTurn::R180 => QuarterTurn::R0,
            QuarterTurn::R270 => QuarterTurn::R90,
        }
    }

    /// Rotate a wall-local vector into world orientation
    #[inline]
    pub fn apply(self, v: Vector3<f64>) -> Vector3<f64> {
        match self {
            QuarterTurn::R0 => v,
            QuarterTurn::R90 => Vector3::new(-v.z, v.y, v.x),
            QuarterTurn::R180 => Vector3::new(-v.x, v.y, -v.z),
            QuarterTurn::R270 => Vector3::new(v.z, v.y, -v.x),
        }
    }

    /// Rotate a world vector into wall-local orientation
    #[inline]
    pub fn inverse_apply(self, v: Vector3<f64>) -> Vector3<f64> {
        self.inverse().apply(v)
    }

    /// Map a world-space extent (box size) to wall-local extent
    ///
    /// Sizes are unsigned, so only the axis permutation matters.
    #[inline]
    pub fn local_extent(self, size: Vector3<f64>) -> Vector3<f64> {
        let v = self.inverse_apply(size);
        Vector3::new(v.x.abs(), v.y.abs(), v.z.abs())
    }
}

/// Position and yaw of a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub position: Point3<f64>,
    pub turn: QuarterTurn,
}

impl Placement {
    pub fn new(position: Point3<f64>, turn: QuarterTurn) -> Self {
        Self { position, turn }
    }

    /// Pure translation
    pub fn at(position: Point3<f64>) -> Self {
        Self::new(position, QuarterTurn::R0)
    }

    /// Transform a node-local point to world space
    #[inline]
    pub fn to_world(&self, local: Point3<f64>) -> Point3<f64> {
        self.position + self.turn.apply(local.coords)
    }

    /// Transform a world point to node-local space
    #[inline]
    pub fn to_local(&self, world: Point3<f64>) -> Point3<f64> {
        Point3::from(self.turn.inverse_apply(world - self.position))
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::at(Point3::origin())
    }
}
