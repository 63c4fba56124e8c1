// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roomkit Geometry
//!
//! Procedural room shell generation: floor, ceiling and wall slabs with
//! rectangular window and door openings. Walls are decomposed into
//! rectangular regions around their openings and merged into one mesh per
//! wall; externally loaded door/window models are fitted by projecting their
//! bounding boxes onto the wall.

pub mod aabb;
pub mod config;
pub mod error;
pub mod lighting;
pub mod mesh;
pub mod opening;
pub mod primitives;
pub mod projector;
pub mod room;
pub mod transform;
pub mod wall;
pub mod window;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use aabb::Aabb;
pub use config::{ExternalModels, RoomConfig, WallConfig, TEXTURE_SCALE};
pub use error::{Error, Result};
pub use lighting::{window_light, WindowLight};
pub use mesh::Mesh;
pub use opening::{GlobalOpeningRecord, Opening, OpeningKind, OpeningMetadata, OpeningSize};
pub use projector::{project, project_front, project_side, AssetCorrection, ProjectedOpening};
pub use room::{build_room, MaterialSlot, NodeRole, RoomBuildResult, RoomNode, SceneMesh};
pub use transform::{Placement, QuarterTurn};
pub use wall::{build_wall_slab, WallDescriptor, WallSlab};
pub use window::{build_window_insert, WindowFrameConfig, WindowInsert};
