// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! World-space axis-aligned bounding boxes of externally loaded models

use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box (minimal corner, maximal corner)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two opposite corners in any order
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create a box from its centre and full size
    pub fn from_center_size(center: Point3<f64>, size: Vector3<f64>) -> Self {
        let half = size.abs() / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_normalizes_corners() {
        let aabb = Aabb::new(Point3::new(1.0, 2.0, -1.0), Point3::new(-1.0, 0.0, 1.0));
        assert_eq!(aabb.min, Point3::new(-1.0, 0.0, -1.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_center_and_size() {
        let aabb = Aabb::from_center_size(Point3::new(-1.5, 1.0655, -0.013), Vector3::new(0.1, 2.131, 0.855));
        assert_relative_eq!(aabb.center(), Point3::new(-1.5, 1.0655, -0.013), epsilon = 1e-12);
        assert_relative_eq!(aabb.size(), Vector3::new(0.1, 2.131, 0.855), epsilon = 1e-12);
    }
}
