// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window-area light placement derived from the room's opening records

use crate::room::RoomBuildResult;
use nalgebra::Point3;

/// Position and size of the area light that fills a window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowLight {
    pub position: Point3<f64>,
    pub width: f64,
    pub height: f64,
}

impl WindowLight {
    /// Used when the room has no window opening
    pub fn fallback() -> Self {
        Self {
            position: Point3::new(0.5, 2.15, -1.4),
            width: 1.2,
            height: 1.5,
        }
    }
}

/// Light for the first window opening of the room
///
/// The light sits on the inner face of the host wall, half a wall thickness
/// in front of the opening centre along the wall's inward normal. Rooms without a window get
/// [`WindowLight::fallback`].
pub fn window_light(result: &RoomBuildResult, wall_thickness: f64) -> WindowLight {
    match result.window_opening() {
        Some(record) => WindowLight {
            position: record.global_position + record.inward_normal * (wall_thickness / 2.0),
            width: record.size.width,
            height: record.size.height,
        },
        None => {
            tracing::debug!("Room has no window opening, using fallback window light");
            WindowLight::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RoomConfig, WallConfig};
    use crate::opening::Opening;
    use crate::room::build_room;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_light_in_front_of_window() {
        let config = RoomConfig::default();
        let result = build_room(&config).unwrap();
        let light = window_light(&result, config.wall_thickness);

        assert_relative_eq!(light.position, Point3::new(0.014, 1.517, -1.4), epsilon = 1e-9);
        assert_relative_eq!(light.width, 1.143);
        assert_relative_eq!(light.height, 1.661);
    }

    #[test]
    fn test_light_on_side_wall_window_moves_into_room() {
        let config = RoomConfig {
            walls: Some(vec![WallConfig::new(Point3::new(1.5, 0.0, 0.0), FRAC_PI_2)
                .with_opening(Opening::window(0.4, 0.2, 1.0, 1.2))]),
            ..Default::default()
        };
        let result = build_room(&config).unwrap();
        let record = result.window_opening().unwrap();
        let light = window_light(&result, config.wall_thickness);

        assert_relative_eq!(light.position.x, 1.4, epsilon = 1e-9);
        assert_relative_eq!(light.position.y, record.global_position.y, epsilon = 1e-12);
        assert_relative_eq!(light.position.z, record.global_position.z, epsilon = 1e-12);
    }

    #[test]
    fn test_fallback_without_window() {
        let config = RoomConfig {
            walls: Some(vec![WallConfig::new(Point3::new(0.0, 0.0, -1.5), 0.0)]),
            ..Default::default()
        };
        let result = build_room(&config).unwrap();
        assert!(result.openings.is_empty());
        assert_eq!(window_light(&result, config.wall_thickness), WindowLight::fallback());
    }
}
