//! Extruded floor-plan meshes.
//!
//! Each polygon's outer ring is ear-clipped into a roof and, when it has
//! height, walled down to its base. Holes are not cut out; indoor data
//! models courtyards as separate features.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

/// Extrusions thinner than this render as a flat slab at the base.
const FLAT_EPSILON: f32 = 0.01;
/// Flat slabs float slightly above the floor base so stacked floors do not
/// z-fight with the slab below.
const FLAT_LIFT: f32 = 0.05;

/// Accumulated geometry for one merged mesh.
#[derive(Default, Debug)]
pub struct ExtrudedMeshData {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl ExtrudedMeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Add a ring (ground-plane `(x, z)` points) extruded from `base` to
    /// `top`. Degenerate rings are skipped.
    pub fn add_prism(&mut self, ring: &[Vec2], base: f32, top: f32) {
        let mut ring = clean_ring(ring);
        if ring.len() < 3 || signed_area(&ring).abs() < f32::EPSILON {
            return;
        }
        // Roof triangles face +Y when the ring winds with negative area in
        // (x, z) space.
        if signed_area(&ring) > 0.0 {
            ring.reverse();
        }

        let flat = top - base < FLAT_EPSILON;
        let roof_y = if flat { base + FLAT_LIFT } else { top };

        let roof_start = self.positions.len() as u32;
        for point in &ring {
            self.positions.push([point.x, roof_y, point.y]);
            self.normals.push([0.0, 1.0, 0.0]);
        }
        for [a, b, c] in triangulate(&ring) {
            self.indices.extend_from_slice(&[
                roof_start + a as u32,
                roof_start + b as u32,
                roof_start + c as u32,
            ]);
        }

        if flat {
            return;
        }
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[(i + 1) % ring.len()];
            let edge = b - a;
            let normal = Vec2::new(-edge.y, edge.x).normalize_or_zero();
            let start = self.positions.len() as u32;
            self.positions.extend_from_slice(&[
                [a.x, base, a.y],
                [b.x, base, b.y],
                [b.x, top, b.y],
                [a.x, top, a.y],
            ]);
            self.normals
                .extend_from_slice(&[[normal.x, 0.0, normal.y]; 4]);
            self.indices.extend_from_slice(&[
                start,
                start + 1,
                start + 2,
                start,
                start + 2,
                start + 3,
            ]);
        }
    }

    pub fn into_mesh(self) -> Mesh {
        let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; self.positions.len()];
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(self.indices))
    }
}

/// Drop the GeoJSON closing vertex and repeated points.
pub fn clean_ring(ring: &[Vec2]) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = Vec::with_capacity(ring.len());
    for &point in ring {
        if out.last().is_some_and(|last| last.distance_squared(point) < 1e-10) {
            continue;
        }
        out.push(point);
    }
    while out.len() > 1 && out[0].distance_squared(out[out.len() - 1]) < 1e-10 {
        out.pop();
    }
    out
}

/// Shoelace area in `(x, z)` space; positive for counter-clockwise in
/// `(x, z)`.
pub fn signed_area(ring: &[Vec2]) -> f32 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f32>()
        * 0.5
}

/// Ear-clipping triangulation of a simple polygon. Triangles keep the
/// ring's winding. Falls back to a fan if clipping stalls on a
/// self-intersecting ring.
pub fn triangulate(ring: &[Vec2]) -> Vec<[usize; 3]> {
    let n = ring.len();
    if n < 3 {
        return Vec::new();
    }
    let winding = signed_area(ring).signum();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    let mut guard = 0;
    while remaining.len() > 3 && guard < n * n {
        guard += 1;
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let prev = remaining[(i + m - 1) % m];
            let curr = remaining[i];
            let next = remaining[(i + 1) % m];
            is_ear(ring, &remaining, prev, curr, next, winding)
        });
        match ear {
            Some(i) => {
                let prev = remaining[(i + m - 1) % m];
                let next = remaining[(i + 1) % m];
                triangles.push([prev, remaining[i], next]);
                remaining.remove(i);
            }
            None => break,
        }
    }

    if remaining.len() == 3 {
        triangles.push([remaining[0], remaining[1], remaining[2]]);
    } else {
        for i in 1..remaining.len() - 1 {
            triangles.push([remaining[0], remaining[i], remaining[i + 1]]);
        }
    }
    triangles
}

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

fn is_ear(
    ring: &[Vec2],
    remaining: &[usize],
    prev: usize,
    curr: usize,
    next: usize,
    winding: f32,
) -> bool {
    let (a, b, c) = (ring[prev], ring[curr], ring[next]);
    if cross(a, b, c) * winding <= 0.0 {
        return false;
    }
    remaining
        .iter()
        .filter(|&&i| i != prev && i != curr && i != next)
        .all(|&i| !point_in_triangle(ring[i], a, b, c))
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
