// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall slab construction with rectangular openings
//!
//! A wall with openings is decomposed into axis-aligned filler regions by a
//! single left-to-right sweep over the openings (sorted by centre X):
//!
//! ```text
//!  +------+-------+------+-------+------+
//!  |      |  top  |      |  top  |      |
//!  |      +-------+      +-------+      |
//!  | left |  win  | left |  door | right|
//!  |      +-------+      |       |      |
//!  |      | bottom|      |       |      |
//!  +------+-------+------+-------+------+
//! ```
//!
//! Each region becomes a box with its own UV tiling and all boxes are merged
//! into one mesh. No CSG is involved: openings must be axis-aligned,
//! rectangular and must not overlap each other along the wall width.
//!
//! Wall-local space has X along the width (0 at the centre), Y up from the
//! floor line (0) and Z through the thickness. Every slab this module returns
//! uses that floor-centre origin, including the solid fallback.

use crate::mesh::Mesh;
use crate::opening::{Opening, OpeningMetadata};
use crate::primitives::{box_mesh, scale_uvs_to_tiles};
use crate::transform::{Placement, QuarterTurn};
use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

/// Regions thinner than this are dropped instead of emitted as slivers
pub const MIN_REGION_SIZE: f64 = 0.01;

/// Rectangular filler piece of a wall face (wall-local, floor at Y = 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Region {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) center_x: f64,
    pub(crate) center_y: f64,
}

impl Region {
    #[inline]
    pub(crate) fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Most walls have one or two openings: at most 3 regions each plus the
/// right-hand remainder.
pub(crate) type Regions = SmallVec<[Region; 8]>;

/// Left-to-right decomposition state for one wall
pub(crate) struct Sweep {
    width: f64,
    height: f64,
    cursor: f64,
    regions: Regions,
}

impl Sweep {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            cursor: -width / 2.0,
            regions: SmallVec::new(),
        }
    }

    /// Right edge of the wall covered so far
    #[inline]
    pub(crate) fn cursor(&self) -> f64 {
        self.cursor
    }

    fn push(&mut self, region: Region) {
        // NaN-safe: comparisons against NaN are false, so the region is dropped
        if region.width > MIN_REGION_SIZE && region.height > MIN_REGION_SIZE {
            tracing::trace!(
                width = region.width,
                height = region.height,
                center_x = region.center_x,
                center_y = region.center_y,
                "Wall region"
            );
            self.regions.push(region);
        }
    }

    /// Emit the fillers left of, above and below one opening, then move the
    /// cursor to its right edge.
    pub(crate) fn advance(&mut self, opening: &Opening) {
        let (left, right) = opening.horizontal_span();
        let (bottom, top) = opening.vertical_span(self.height);

        if left - self.cursor > MIN_REGION_SIZE {
            let width = left - self.cursor;
            self.push(Region {
                width,
                height: self.height,
                center_x: self.cursor + width / 2.0,
                center_y: self.height / 2.0,
            });
        }

        if top < self.height - MIN_REGION_SIZE {
            let height = self.height - top;
            self.push(Region {
                width: opening.width,
                height,
                center_x: opening.center_offset_x,
                center_y: top + height / 2.0,
            });
        }

        if bottom > MIN_REGION_SIZE {
            self.push(Region {
                width: opening.width,
                height: bottom,
                center_x: opening.center_offset_x,
                center_y: bottom / 2.0,
            });
        }

        self.cursor = right;
    }

    /// Emit the remainder right of the last opening
    pub(crate) fn finish(mut self) -> Regions {
        let right_edge = self.width / 2.0;
        if self.cursor < right_edge - MIN_REGION_SIZE {
            let width = right_edge - self.cursor;
            let cursor = self.cursor;
            self.push(Region {
                width,
                height: self.height,
                center_x: cursor + width / 2.0,
                center_y: self.height / 2.0,
            });
        }
        self.regions
    }
}

/// Openings ordered by ascending centre X
///
/// The sort is stable so openings sharing a centre keep their input order.
pub(crate) fn sort_openings(openings: &[Opening]) -> Vec<Opening> {
    let mut sorted = openings.to_vec();
    sorted.sort_by(|a, b| a.center_offset_x.total_cmp(&b.center_offset_x));
    sorted
}

/// Decompose a wall face minus its (sorted) openings into filler regions
pub(crate) fn decompose(width: f64, height: f64, sorted: &[Opening]) -> Regions {
    let mut sweep = Sweep::new(width, height);
    for opening in sorted {
        sweep.advance(opening);
    }
    sweep.finish()
}

/// Wall geometry in wall-local space
#[derive(Debug, Clone)]
pub struct WallSlab {
    /// Merged mesh of all regions, floor-centre origin
    pub mesh: Mesh,
    /// Openings cut into the mesh, sorted by centre X
    ///
    /// Empty when the slab is solid.
    pub openings: Vec<OpeningMetadata>,
    region_count: usize,
    filled_area: f64,
}

impl WallSlab {
    /// Number of box primitives merged into the mesh
    pub fn region_count(&self) -> usize {
        self.region_count
    }

    /// Face area covered by the slab (wall area minus cut openings)
    pub fn filled_area(&self) -> f64 {
        self.filled_area
    }

    /// True when the slab is a single uncut box
    pub fn is_solid(&self) -> bool {
        self.openings.is_empty()
    }
}

/// Single uncut box, lifted so its origin sits at the floor-centre
fn solid_slab(width: f64, height: f64, thickness: f64, texture_scale: f64) -> WallSlab {
    let mut mesh = box_mesh(width, height, thickness);
    scale_uvs_to_tiles(&mut mesh, width, height, texture_scale);
    mesh.translate(Vector3::new(0.0, height / 2.0, 0.0));

    WallSlab {
        mesh,
        openings: Vec::new(),
        region_count: 1,
        filled_area: width * height,
    }
}

/// Build a wall slab of `width × height × thickness` with openings cut out
///
/// UVs of every region are tiled by the region's own size, so texture
/// density matches across the pieces. Falls back to a solid slab when there
/// are no openings, or when the openings leave no region behind.
pub fn build_wall_slab(
    width: f64,
    height: f64,
    thickness: f64,
    openings: &[Opening],
    texture_scale: f64,
) -> WallSlab {
    if openings.is_empty() {
        return solid_slab(width, height, thickness, texture_scale);
    }

    let sorted = sort_openings(openings);
    let regions = decompose(width, height, &sorted);

    if regions.is_empty() {
        tracing::debug!(
            width,
            height,
            openings = sorted.len(),
            "No wall regions left after cutting, using solid slab"
        );
        return solid_slab(width, height, thickness, texture_scale);
    }

    let parts: Vec<Mesh> = regions
        .iter()
        .map(|region| {
            let mut part = box_mesh(region.width, region.height, thickness);
            scale_uvs_to_tiles(&mut part, region.width, region.height, texture_scale);
            part.translate(Vector3::new(region.center_x, region.center_y, 0.0));
            part
        })
        .collect();

    let mut mesh = Mesh::with_capacity(parts.len() * 24, parts.len() * 36);
    mesh.merge_all(&parts);

    tracing::debug!(
        width,
        height,
        openings = sorted.len(),
        regions = regions.len(),
        "Built wall slab"
    );

    WallSlab {
        mesh,
        openings: sorted
            .iter()
            .map(|opening| OpeningMetadata::from_opening(opening, height))
            .collect(),
        region_count: regions.len(),
        filled_area: regions.iter().map(Region::area).sum(),
    }
}

/// A wall to build: size, floor-centre position, yaw and openings
#[derive(Debug, Clone, PartialEq)]
pub struct WallDescriptor {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub position: Point3<f64>,
    pub turn: QuarterTurn,
    pub openings: Vec<Opening>,
}

impl WallDescriptor {
    /// Build this wall's slab in wall-local space
    pub fn build(&self, texture_scale: f64) -> WallSlab {
        build_wall_slab(
            self.width,
            self.height,
            self.thickness,
            &self.openings,
            texture_scale,
        )
    }

    /// Node placement for the slab
    ///
    /// Slabs always have their origin at the floor-centre, so the node sits
    /// exactly at the wall position.
    pub fn placement(&self) -> Placement {
        Placement::new(self.position, self.turn)
    }

    /// Yaw whose local +Z points from the wall into the room
    ///
    /// The room centre is the world origin. A wall passing through the
    /// origin keeps its own turn.
    pub fn interior_turn(&self) -> QuarterTurn {
        let normal = self.turn.apply(Vector3::z());
        if normal.dot(&-self.position.coords) < 0.0 {
            self.turn.opposite()
        } else {
            self.turn
        }
    }

    /// Unit normal of the wall face looking into the room
    pub fn inward_normal(&self) -> Vector3<f64> {
        self.interior_turn().apply(Vector3::z())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opening::OpeningKind;
    use approx::assert_relative_eq;

    const S: f64 = 2.0;

    fn total_area(regions: &Regions) -> f64 {
        regions.iter().map(Region::area).sum()
    }

    /// Count regions containing a point (strictly inside)
    fn coverage(regions: &Regions, x: f64, y: f64) -> usize {
        regions
            .iter()
            .filter(|r| {
                (x - r.center_x).abs() < r.width / 2.0 && (y - r.center_y).abs() < r.height / 2.0
            })
            .count()
    }

    fn inside_opening(openings: &[Opening], h: f64, x: f64, y: f64) -> bool {
        openings.iter().any(|o| {
            let (l, r) = o.horizontal_span();
            let (b, t) = o.vertical_span(h);
            x > l && x < r && y > b && y < t
        })
    }

    #[test]
    fn test_centered_opening_area() {
        for &(w, h) in &[(3.0, 2.7), (5.0, 3.0), (1.5, 2.2), (10.0, 4.0)] {
            for &(ow, oh) in &[(0.5, 0.5), (1.0, 1.2), (1.4, 2.0)] {
                let opening = Opening::window(0.0, 0.0, ow, oh);
                let regions = decompose(w, h, &[opening]);
                assert_relative_eq!(total_area(&regions), w * h - ow * oh, epsilon = 1e-9);
                assert!(regions.iter().all(|r| r.width > 0.0 && r.height > 0.0));
            }
        }
    }

    #[test]
    fn test_no_openings_single_region() {
        let slab = build_wall_slab(3.0, 2.7, 0.2, &[], S);
        assert_eq!(slab.region_count(), 1);
        assert!(slab.is_solid());
        assert_relative_eq!(slab.filled_area(), 3.0 * 2.7);
        assert_eq!(slab.mesh.vertex_count(), 24);

        // UV tiling: W/2, H/2
        let max_u = slab.mesh.uvs.chunks_exact(2).map(|uv| uv[0]).fold(0.0f32, f32::max);
        let max_v = slab.mesh.uvs.chunks_exact(2).map(|uv| uv[1]).fold(0.0f32, f32::max);
        assert!((max_u - 1.5).abs() < 1e-6);
        assert!((max_v - 1.35).abs() < 1e-6);
    }

    #[test]
    fn test_solid_slab_uses_floor_center_origin() {
        let slab = build_wall_slab(3.0, 2.7, 0.2, &[], S);
        let (min, max) = slab.mesh.bounds();
        assert!(min.y.abs() < 1e-6);
        assert!((max.y - 2.7).abs() < 1e-6);
        assert!((min.x + 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_cut_slab_uses_floor_center_origin() {
        let slab = build_wall_slab(3.0, 2.7, 0.2, &[Opening::window(0.0, 0.0, 1.0, 1.0)], S);
        let (min, max) = slab.mesh.bounds();
        assert!(min.y.abs() < 1e-6);
        assert!((max.y - 2.7).abs() < 1e-6);
        assert!((min.x + 1.5).abs() < 1e-6 && (max.x - 1.5).abs() < 1e-6);
        assert!((min.z + 0.1).abs() < 1e-6 && (max.z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_sweep_cursor_monotonic() {
        let w = 8.0;
        let openings = [
            Opening::window(-2.5, 0.2, 1.0, 1.2),
            Opening::door(-0.8, -0.3, 0.9, 2.1),
            Opening::window(1.0, 0.4, 1.5, 1.0),
            Opening::window(3.2, 0.0, 0.8, 0.8),
        ];
        let mut sweep = Sweep::new(w, 3.0);
        let mut last = sweep.cursor();
        assert_eq!(last, -w / 2.0);
        for opening in &sort_openings(&openings) {
            sweep.advance(opening);
            assert!(sweep.cursor() >= last);
            assert!(sweep.cursor() <= w / 2.0);
            last = sweep.cursor();
        }
    }

    #[test]
    fn test_regions_tile_wall_exactly() {
        let (w, h) = (6.0, 2.8);
        let openings = sort_openings(&[
            Opening::window(1.5, 0.3, 1.2, 1.0),
            Opening::door(-1.0, -0.35, 0.9, 2.1),
        ]);
        let regions = decompose(w, h, &openings);

        let steps = 97;
        for i in 0..steps {
            for j in 0..steps {
                let x = -w / 2.0 + w * (i as f64 + 0.5) / steps as f64;
                let y = h * (j as f64 + 0.5) / steps as f64;
                let expected = if inside_opening(&openings, h, x, y) { 0 } else { 1 };
                assert_eq!(
                    coverage(&regions, x, y),
                    expected,
                    "point ({:.3}, {:.3}) covered wrongly",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_front_window_default() {
        // Window at the default room spot: all four fillers
        let (w, h) = (3.0, 2.7);
        let opening = Opening::window(0.014, 0.167, 1.143, 1.661);
        let regions = decompose(w, h, &[opening]);
        assert_eq!(regions.len(), 4);
        assert_relative_eq!(total_area(&regions), 3.0 * 2.7 - 1.143 * 1.661, epsilon = 1e-9);
    }

    #[test]
    fn test_low_window_omits_bottom_filler() {
        // centerOffsetY = -1.2 puts the opening bottom below the floor
        let (w, h) = (3.0, 2.7);
        let opening = Opening::window(0.014, -1.2, 1.143, 1.661);
        let regions = decompose(w, h, &[opening]);
        assert_eq!(regions.len(), 3);

        // left, top, right
        assert_relative_eq!(regions[0].center_y, h / 2.0);
        assert!(regions[1].center_y > h / 2.0);
        assert_relative_eq!(regions[2].center_y, h / 2.0);
        assert!(regions.iter().all(|r| r.width > 0.0 && r.height > 0.0));
    }

    #[test]
    fn test_side_door_omits_bottom_filler() {
        let (w, h) = (2.7, 2.7);
        let door = Opening::door(0.013, -0.4345, 0.855, 2.131);
        let (bottom, _) = door.vertical_span(h);
        assert!(bottom < MIN_REGION_SIZE);

        let regions = decompose(w, h, &[door]);
        assert_eq!(regions.len(), 3);

        let (left, right) = door.horizontal_span();
        assert_relative_eq!(regions[0].width, left + w / 2.0, epsilon = 1e-12);
        assert_relative_eq!(regions[1].width, 0.855);
        assert_relative_eq!(regions[2].width, w / 2.0 - right, epsilon = 1e-12);
    }

    #[test]
    fn test_edge_flush_opening_skips_slivers() {
        // Opening flush with the left edge and the floor: no left or bottom filler
        let (w, h) = (3.0, 2.5);
        let door = Opening::door(-1.0, -0.2, 1.0, 2.1);
        let regions = decompose(w, h, &[door]);
        assert_eq!(regions.len(), 2);
        assert_relative_eq!(total_area(&regions), w * h - 1.0 * 2.1, epsilon = 1e-9);
    }

    #[test]
    fn test_opening_covering_wall_falls_back_to_solid() {
        let slab = build_wall_slab(2.0, 2.0, 0.2, &[Opening::window(0.0, 0.0, 2.0, 2.0)], S);
        assert!(slab.is_solid());
        assert_eq!(slab.region_count(), 1);
    }

    #[test]
    fn test_right_sliver_below_threshold_is_skipped() {
        // Opening ends 0.005 short of the right edge
        let opening = Opening::window(0.995, 0.0, 1.0, 1.0);
        let regions = decompose(3.0, 2.7, &[opening]);

        assert_eq!(regions.len(), 3);
        assert!(regions.iter().all(|r| r.center_x + r.width / 2.0 <= 1.495 + 1e-9));
    }

    #[test]
    fn test_right_filler_above_threshold_is_emitted() {
        // Opening ends 0.02 short of the right edge
        let opening = Opening::window(0.98, 0.0, 1.0, 1.0);
        let regions = decompose(3.0, 2.7, &[opening]);

        assert_eq!(regions.len(), 4);
        let right = regions.last().unwrap();
        assert_relative_eq!(right.width, 0.02, epsilon = 1e-9);
        assert_relative_eq!(right.height, 2.7);
        assert_relative_eq!(right.center_x, 1.49, epsilon = 1e-9);
    }

    #[test]
    fn test_per_region_uv_scaling() {
        let door = Opening::door(0.0, -0.2, 1.0, 2.1);
        let slab = build_wall_slab(3.0, 2.5, 0.2, &[door], S);
        let regions = decompose(3.0, 2.5, &sort_openings(&[door]));
        assert_eq!(slab.region_count(), regions.len());

        for (i, region) in regions.iter().enumerate() {
            let uvs = &slab.mesh.uvs[i * 48..(i + 1) * 48];
            let max_u = uvs.chunks_exact(2).map(|uv| uv[0]).fold(0.0f32, f32::max);
            let max_v = uvs.chunks_exact(2).map(|uv| uv[1]).fold(0.0f32, f32::max);
            assert!((max_u as f64 - region.width / S).abs() < 1e-5);
            assert!((max_v as f64 - region.height / S).abs() < 1e-5);
        }
    }

    #[test]
    fn test_metadata_sorted_and_stable() {
        let openings = [
            Opening::window(1.0, 0.0, 0.5, 0.5),
            Opening::door(-1.0, -0.3, 0.8, 2.0),
            Opening::window(-1.0, 0.9, 0.4, 0.3),
        ];
        let slab = build_wall_slab(5.0, 3.0, 0.2, &openings, S);
        let kinds: Vec<_> = slab.openings.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![OpeningKind::Door, OpeningKind::Window, OpeningKind::Window]);
        assert_relative_eq!(slab.openings[0].center_x, -1.0);
        assert_relative_eq!(slab.openings[1].center_y, 1.5 + 0.9);
        assert_relative_eq!(slab.openings[2].center_x, 1.0);
    }

    #[test]
    fn test_merged_mesh_counts() {
        let slab = build_wall_slab(3.0, 2.7, 0.2, &[Opening::window(0.0, 0.0, 1.0, 1.0)], S);
        assert_eq!(slab.region_count(), 4);
        assert_eq!(slab.mesh.vertex_count(), 4 * 24);
        assert_eq!(slab.mesh.triangle_count(), 4 * 12);
        assert_eq!(slab.mesh.uvs.len(), 4 * 48);
    }

    #[test]
    fn test_nan_input_does_not_panic() {
        let slab = build_wall_slab(3.0, 2.7, 0.2, &[Opening::window(f64::NAN, 0.0, 1.0, 1.0)], S);
        assert!(slab.region_count() >= 1);

        let slab = build_wall_slab(-1.0, 2.7, 0.2, &[], S);
        assert_eq!(slab.region_count(), 1);
    }

    #[test]
    fn test_overlapping_openings_do_not_panic() {
        let cases = [
            // Partial overlap
            vec![
                Opening::window(-0.2, 0.0, 1.0, 1.0),
                Opening::window(0.1, 0.3, 1.0, 0.8),
            ],
            // Second opening nested inside the first
            vec![
                Opening::window(0.0, 0.0, 2.0, 1.5),
                Opening::door(0.2, -0.5, 0.4, 1.2),
            ],
        ];

        for openings in &cases {
            let regions = decompose(4.0, 2.7, &sort_openings(openings));
            assert!(!regions.is_empty());
            assert!(regions
                .iter()
                .all(|r| r.width > MIN_REGION_SIZE && r.height > MIN_REGION_SIZE));

            let slab = build_wall_slab(4.0, 2.7, 0.2, openings, S);
            assert_eq!(slab.region_count(), regions.len());
            assert!(slab.filled_area().is_finite());
            let vertices = slab.mesh.vertex_count();
            assert!(slab.mesh.indices.iter().all(|&i| (i as usize) < vertices));
        }
    }

    #[test]
    fn test_inward_normal_points_at_room_centre() {
        let wall = |x: f64, z: f64, turn| WallDescriptor {
            width: 3.0,
            height: 2.7,
            thickness: 0.2,
            position: Point3::new(x, 0.0, z),
            turn,
            openings: vec![],
        };

        assert_relative_eq!(wall(0.0, -1.5, QuarterTurn::R0).inward_normal(), Vector3::z());
        assert_relative_eq!(wall(0.0, 1.5, QuarterTurn::R0).inward_normal(), -Vector3::z());
        assert_relative_eq!(wall(-1.5, 0.0, QuarterTurn::R90).inward_normal(), Vector3::x());
        assert_relative_eq!(wall(1.5, 0.0, QuarterTurn::R90).inward_normal(), -Vector3::x());
        assert_eq!(wall(-1.5, 0.0, QuarterTurn::R90).interior_turn(), QuarterTurn::R270);
        assert_eq!(wall(1.5, 0.0, QuarterTurn::R90).interior_turn(), QuarterTurn::R90);
    }

    #[test]
    fn test_descriptor_placement_is_wall_position() {
        let desc = WallDescriptor {
            width: 3.0,
            height: 2.7,
            thickness: 0.2,
            position: Point3::new(-1.5, 0.0, 0.0),
            turn: QuarterTurn::R90,
            openings: vec![],
        };
        let placement = desc.placement();
        assert_eq!(placement.position, desc.position);
        assert_eq!(placement.turn, QuarterTurn::R90);
        assert_eq!(desc.build(S).region_count(), 1);
    }
}
