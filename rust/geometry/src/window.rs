// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Procedural window insert: a four-piece frame around a glass pane
//!
//! Only used when no externally loaded window model fills the opening.
//! Geometry is centred on the opening centre; the frame pieces sit outside
//! the `width × height` clear area.

use crate::mesh::Mesh;
use crate::primitives::{box_mesh, vertical_quad_mesh};
use nalgebra::Vector3;

/// Frame and glass dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowFrameConfig {
    /// Width of each frame bar, measured in the wall plane
    pub frame_width: f64,
    /// Depth of the frame bars through the wall
    pub frame_thickness: f64,
    /// Offset of the glass pane from the frame centre along the wall normal
    pub glass_z_offset: f64,
    /// Gap between the wall face and the insert
    pub wall_clearance: f64,
}

impl Default for WindowFrameConfig {
    fn default() -> Self {
        Self {
            frame_width: 0.05,
            frame_thickness: 0.05,
            glass_z_offset: 0.0,
            wall_clearance: 0.005,
        }
    }
}

/// Frame and glass meshes of one window, in insert-local space
#[derive(Debug, Clone)]
pub struct WindowInsert {
    pub frame: Mesh,
    pub glass: Mesh,
}

/// Build the frame bars and glass pane for a `width × height` opening
pub fn build_window_insert(width: f64, height: f64, config: &WindowFrameConfig) -> WindowInsert {
    let fw = config.frame_width;
    let ft = config.frame_thickness;

    let mut top = box_mesh(width + fw * 2.0, fw, ft);
    top.translate(Vector3::new(0.0, height / 2.0 + fw / 2.0, 0.0));

    let mut bottom = box_mesh(width + fw * 2.0, fw, ft);
    bottom.translate(Vector3::new(0.0, -height / 2.0 - fw / 2.0, 0.0));

    let mut left = box_mesh(fw, height, ft);
    left.translate(Vector3::new(-width / 2.0 - fw / 2.0, 0.0, 0.0));

    let mut right = box_mesh(fw, height, ft);
    right.translate(Vector3::new(width / 2.0 + fw / 2.0, 0.0, 0.0));

    let mut frame = Mesh::with_capacity(4 * 24, 4 * 36);
    frame.merge_all(&[top, bottom, left, right]);

    let mut glass = vertical_quad_mesh(width, height);
    glass.translate(Vector3::new(0.0, 0.0, config.glass_z_offset));

    WindowInsert { frame, glass }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_surrounds_opening() {
        let config = WindowFrameConfig::default();
        let insert = build_window_insert(1.2, 1.5, &config);

        assert_eq!(insert.frame.vertex_count(), 4 * 24);
        let (min, max) = insert.frame.bounds();
        assert!((max.x - (0.6 + 0.05)).abs() < 1e-6);
        assert!((min.x + (0.6 + 0.05)).abs() < 1e-6);
        assert!((max.y - (0.75 + 0.05)).abs() < 1e-6);
        assert!((min.y + (0.75 + 0.05)).abs() < 1e-6);
        assert!((max.z - 0.025).abs() < 1e-6);
    }

    #[test]
    fn test_glass_fills_clear_area() {
        let insert = build_window_insert(1.2, 1.5, &WindowFrameConfig::default());
        let (min, max) = insert.glass.bounds();
        assert!((max.x - min.x - 1.2).abs() < 1e-6);
        assert!((max.y - min.y - 1.5).abs() < 1e-6);
        assert_eq!(insert.glass.triangle_count(), 2);
    }

    #[test]
    fn test_glass_offset() {
        let config = WindowFrameConfig {
            glass_z_offset: 0.01,
            ..Default::default()
        };
        let insert = build_window_insert(1.0, 1.0, &config);
        let (min, _) = insert.glass.bounds();
        assert!((min.z - 0.01).abs() < 1e-6);
    }
}
