// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room assembly: floor, ceiling and walls with their openings
//!
//! [`build_room`] is a one-shot build. It returns the scene node together
//! with the world-space opening records, so callers never have to dig
//! metadata out of the scene graph.

use crate::config::{RoomConfig, WallConfig};
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::opening::{GlobalOpeningRecord, Opening, OpeningKind, OpeningMetadata, OpeningSize};
use crate::primitives::{plane_mesh, scale_uvs_to_tiles, Facing};
use crate::projector::{project_front, project_side};
use crate::transform::Placement;
use crate::wall::{WallDescriptor, WallSlab};
use crate::window::build_window_insert;
use nalgebra::Point3;
use std::f64::consts::FRAC_PI_2;

/// What a scene mesh represents, for renderers and material swaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeRole {
    Floor,
    Ceiling,
    Wall,
    WindowInsert,
}

/// Material a mesh expects; the material objects themselves live with the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialSlot {
    Floor,
    Ceiling,
    Wall,
    WindowFrame,
    WindowGlass,
}

/// One renderable mesh of the room
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub name: String,
    pub role: NodeRole,
    pub material: MaterialSlot,
    /// Geometry in node-local space
    pub mesh: Mesh,
    pub placement: Placement,
    /// Openings cut into this mesh (walls only)
    pub openings: Vec<OpeningMetadata>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Generated here rather than loaded from an asset
    pub procedural: bool,
}

impl SceneMesh {
    fn new(
        name: impl Into<String>,
        role: NodeRole,
        material: MaterialSlot,
        mesh: Mesh,
        placement: Placement,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            material,
            mesh,
            placement,
            openings: Vec::new(),
            cast_shadow: true,
            receive_shadow: true,
            procedural: true,
        }
    }

    #[inline]
    pub fn is_floor(&self) -> bool {
        self.role == NodeRole::Floor
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.role == NodeRole::Wall
    }

    /// Geometry with the node placement baked in
    pub fn world_mesh(&self) -> Mesh {
        self.mesh.transformed(&self.placement)
    }
}

/// Root node of a generated room
#[derive(Debug, Clone, Default)]
pub struct RoomNode {
    pub children: Vec<SceneMesh>,
}

impl RoomNode {
    pub fn walls(&self) -> impl Iterator<Item = &SceneMesh> {
        self.children.iter().filter(|c| c.is_wall())
    }

    pub fn by_role(&self, role: NodeRole) -> impl Iterator<Item = &SceneMesh> {
        self.children.iter().filter(move |c| c.role == role)
    }

    pub fn find(&self, name: &str) -> Option<&SceneMesh> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children merged into one world-space mesh
    pub fn world_mesh(&self) -> Mesh {
        let parts: Vec<Mesh> = self.children.iter().map(SceneMesh::world_mesh).collect();
        let mut combined = Mesh::new();
        combined.merge_all(&parts);
        combined
    }
}

/// Output of [`build_room`]
#[derive(Debug, Clone)]
pub struct RoomBuildResult {
    pub node: RoomNode,
    /// One record per opening, in wall order then opening order
    pub openings: Vec<GlobalOpeningRecord>,
}

impl RoomBuildResult {
    /// First window opening, used to place the window-area light
    pub fn window_opening(&self) -> Option<&GlobalOpeningRecord> {
        self.openings.iter().find(|o| o.kind == OpeningKind::Window)
    }

    pub fn door_opening(&self) -> Option<&GlobalOpeningRecord> {
        self.openings.iter().find(|o| o.kind == OpeningKind::Door)
    }
}

/// World-space record of an opening on a wall
///
/// The opening centre is mapped through the wall placement, which is the
/// inverse of the transform used by the projector.
pub fn global_opening_record(wall: &WallDescriptor, opening: &Opening) -> GlobalOpeningRecord {
    let local = Point3::new(
        opening.center_offset_x,
        opening.center_y_from_floor(wall.height),
        0.0,
    );
    GlobalOpeningRecord {
        kind: opening.kind,
        global_position: wall.placement().to_world(local),
        size: OpeningSize {
            width: opening.width,
            height: opening.height,
        },
        inward_normal: wall.inward_normal(),
    }
}

/// Front, left and right walls; the back of the room stays open
///
/// The front wall gets a window and the left wall a door. When a model
/// bounding box is available the opening is projected from it (with the
/// configured correction) instead of using the literal default.
pub fn default_walls(config: &RoomConfig) -> Vec<WallConfig> {
    let front_position = Point3::new(0.0, 0.0, -config.depth / 2.0);
    let left_position = Point3::new(-config.width / 2.0, 0.0, 0.0);
    let right_position = Point3::new(config.width / 2.0, 0.0, 0.0);

    let window = match &config.external_models.window {
        Some(bbox) => {
            let projected = project_front(bbox, front_position, config.wall_height, config.wall_thickness);
            config.window_correction.apply(projected).into_opening(OpeningKind::Window)
        }
        None => config.default_window,
    };

    let door = match &config.external_models.door {
        Some(bbox) => {
            let projected = project_side(bbox, left_position, config.wall_height, config.wall_thickness);
            config.door_correction.apply(projected).into_opening(OpeningKind::Door)
        }
        None => config.default_door,
    };

    vec![
        WallConfig::new(front_position, 0.0)
            .with_width(config.width)
            .with_opening(window),
        WallConfig::new(left_position, FRAC_PI_2)
            .with_width(config.depth)
            .with_opening(door),
        WallConfig::new(right_position, FRAC_PI_2).with_width(config.depth),
    ]
}

fn build_floor(config: &RoomConfig) -> SceneMesh {
    let width = config.width + config.floor_margin;
    let depth = config.depth + config.floor_margin;

    let mut mesh = plane_mesh(width, depth, Facing::Up);
    scale_uvs_to_tiles(&mut mesh, width, depth, config.texture_scale);

    // Shifted by half the margin so the seam lands under the walls
    let offset = -config.floor_margin / 2.0;
    let mut floor = SceneMesh::new(
        "Floor",
        NodeRole::Floor,
        MaterialSlot::Floor,
        mesh,
        Placement::at(Point3::new(offset, 0.0, offset)),
    );
    floor.cast_shadow = false;
    floor
}

fn build_ceiling(config: &RoomConfig) -> SceneMesh {
    SceneMesh::new(
        "Ceiling",
        NodeRole::Ceiling,
        MaterialSlot::Ceiling,
        plane_mesh(config.width, config.depth, Facing::Down),
        Placement::at(Point3::new(0.0, config.wall_height, 0.0)),
    )
}

fn wall_descriptors(config: &RoomConfig, walls: &[WallConfig]) -> Result<Vec<WallDescriptor>> {
    walls
        .iter()
        .enumerate()
        .map(|(index, wall)| {
            let turn = wall.turn().ok_or(Error::InvalidRotation {
                wall: index,
                radians: wall.rotation,
            })?;
            Ok(WallDescriptor {
                width: wall.width.unwrap_or(config.width),
                height: config.wall_height,
                thickness: config.wall_thickness,
                position: wall.position,
                turn,
                openings: wall.openings.clone(),
            })
        })
        .collect()
}

fn build_slabs(descriptors: &[WallDescriptor], texture_scale: f64) -> Vec<WallSlab> {
    #[cfg(not(target_arch = "wasm32"))]
    use rayon::prelude::*;

    // One task per wall on native; sequential on WASM (no threads)
    #[cfg(not(target_arch = "wasm32"))]
    let slabs: Vec<WallSlab> = descriptors
        .par_iter()
        .map(|wall| wall.build(texture_scale))
        .collect();

    #[cfg(target_arch = "wasm32")]
    let slabs: Vec<WallSlab> = descriptors
        .iter()
        .map(|wall| wall.build(texture_scale))
        .collect();

    slabs
}

/// Frame and glass for a window opening, set against the inner wall face
fn window_insert_meshes(
    config: &RoomConfig,
    wall: &WallDescriptor,
    record: &GlobalOpeningRecord,
    name: &str,
) -> [SceneMesh; 2] {
    let insert = build_window_insert(record.size.width, record.size.height, &config.window_frame);
    let depth = config.wall_thickness / 2.0 + config.window_frame.wall_clearance;
    let position = record.global_position + record.inward_normal * depth;
    let placement = Placement::new(position, wall.interior_turn());

    let frame = SceneMesh::new(
        format!("{} Frame", name),
        NodeRole::WindowInsert,
        MaterialSlot::WindowFrame,
        insert.frame,
        placement,
    );
    let mut glass = SceneMesh::new(
        format!("{} Glass", name),
        NodeRole::WindowInsert,
        MaterialSlot::WindowGlass,
        insert.glass,
        placement,
    );
    glass.cast_shadow = false;
    [frame, glass]
}

/// Build the room described by `config`
///
/// Fails only on invalid configuration (see [`RoomConfig::validate`]).
pub fn build_room(config: &RoomConfig) -> Result<RoomBuildResult> {
    config.validate()?;

    let walls = match &config.walls {
        Some(walls) => walls.clone(),
        None => default_walls(config),
    };
    let descriptors = wall_descriptors(config, &walls)?;
    let slabs = build_slabs(&descriptors, config.texture_scale);

    let mut node = RoomNode::default();
    node.children.push(build_floor(config));
    node.children.push(build_ceiling(config));

    let mut openings = Vec::new();
    let procedural_windows = config.external_models.window.is_none();

    for (index, (wall, slab)) in descriptors.iter().zip(slabs).enumerate() {
        let mut mesh = SceneMesh::new(
            format!("Wall {}", index),
            NodeRole::Wall,
            MaterialSlot::Wall,
            slab.mesh,
            wall.placement(),
        );
        mesh.openings = slab.openings;
        node.children.push(mesh);

        for (opening_index, opening) in wall.openings.iter().enumerate() {
            let record = global_opening_record(wall, opening);

            if opening.kind == OpeningKind::Window && procedural_windows {
                let name = format!("Wall {} Window {}", index, opening_index);
                node.children
                    .extend(window_insert_meshes(config, wall, &record, &name));
            }

            openings.push(record);
        }
    }

    tracing::debug!(
        walls = descriptors.len(),
        openings = openings.len(),
        meshes = node.children.len(),
        "Built room"
    );

    Ok(RoomBuildResult { node, openings })
}
