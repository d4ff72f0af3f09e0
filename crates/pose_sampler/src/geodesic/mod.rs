//! Geodesic sphere sample generator.
//!
//! Starts from the unit icosahedron and applies `level` subdivision passes.
//! Each pass splits every triangle into four:
//!
//! ```text
//!            a                     a
//!           / \                   / \
//!          /   \                m0───m2
//!         /     \      ──▶      / \   / \
//!        /       \             /   \ /   \
//!       b─────────c           b────m1─────c
//! ```
//!
//! Midpoints are pushed back onto the unit sphere. Shared edges are keyed by
//! their sorted integer corner indices, so two triangles sharing an edge get
//! the same midpoint vertex. Deduplication is exact; no float comparison is
//! involved.
//!
//! Subdivision only appends vertices, so the points of level `k` are a prefix
//! of the points of level `k + 1`.

use std::collections::HashMap;

use glam::Vec3;

use crate::constants::{ICOSAHEDRON_TRIANGLES, ICOSAHEDRON_VERTICES, MAX_GEODESIC_LEVEL};
use crate::types::{SamplePoint, SampleSet};

/// Edge (min corner, max corner) -> midpoint vertex index.
type EdgeLookup = HashMap<(u32, u32), u32>;

/// Build the geodesic sphere for `level` subdivision passes.
///
/// `level == 0` returns the raw icosahedron (12 points, 20 triangles).
/// Levels above [`MAX_GEODESIC_LEVEL`] are clamped to it.
pub fn create(level: u32) -> SampleSet {
  let (vertices, triangles) = subdivided(clamp_level(level));
  into_sample_set(vertices, triangles)
}

/// Build every level from 0 to `max_level` inclusive in one pass.
///
/// Entry `k` is identical to `create(k)`. `max_level` is clamped like
/// [`create`].
pub fn create_levels(max_level: u32) -> Vec<SampleSet> {
  let max_level = clamp_level(max_level);
  let (mut vertices, mut triangles) = icosahedron();
  let mut levels = Vec::with_capacity(max_level as usize + 1);
  levels.push(into_sample_set(vertices.clone(), triangles.clone()));

  for _ in 0..max_level {
    triangles = subdivide(&mut vertices, &triangles);
    levels.push(into_sample_set(vertices.clone(), triangles.clone()));
  }

  levels
}

/// `level`, or [`MAX_GEODESIC_LEVEL`] with a warning when it is deeper.
pub fn clamp_level(level: u32) -> u32 {
  if level > MAX_GEODESIC_LEVEL {
    tracing::warn!(
      "geodesic level {} exceeds the maximum {}, using {}",
      level,
      MAX_GEODESIC_LEVEL,
      MAX_GEODESIC_LEVEL
    );
    MAX_GEODESIC_LEVEL
  } else {
    level
  }
}

/// Split every triangle into four, appending the new edge midpoints to
/// `vertices`. Returns the new triangle list.
pub fn subdivide(vertices: &mut Vec<Vec3>, triangles: &[[u32; 3]]) -> Vec<[u32; 3]> {
  let mut lookup = EdgeLookup::with_capacity(triangles.len() * 3 / 2);
  let mut result = Vec::with_capacity(triangles.len() * 4);

  for &[a, b, c] in triangles {
    let m0 = vertex_for_edge(&mut lookup, vertices, a, b);
    let m1 = vertex_for_edge(&mut lookup, vertices, b, c);
    let m2 = vertex_for_edge(&mut lookup, vertices, c, a);

    result.push([a, m0, m2]);
    result.push([b, m1, m0]);
    result.push([c, m2, m1]);
    result.push([m0, m1, m2]);
  }

  result
}

/// Index of the midpoint vertex of edge (first, second), creating it on first
/// use.
fn vertex_for_edge(lookup: &mut EdgeLookup, vertices: &mut Vec<Vec3>, first: u32, second: u32) -> u32 {
  let key = if first > second {
    (second, first)
  } else {
    (first, second)
  };

  *lookup.entry(key).or_insert_with(|| {
    let midpoint = (vertices[first as usize] + vertices[second as usize]).normalize();
    vertices.push(midpoint);
    (vertices.len() - 1) as u32
  })
}

fn icosahedron() -> (Vec<Vec3>, Vec<[u32; 3]>) {
  let vertices = ICOSAHEDRON_VERTICES
    .iter()
    .map(|v| Vec3::from_array(*v))
    .collect();
  (vertices, ICOSAHEDRON_TRIANGLES.to_vec())
}

fn subdivided(level: u32) -> (Vec<Vec3>, Vec<[u32; 3]>) {
  let (mut vertices, mut triangles) = icosahedron();
  for _ in 0..level {
    triangles = subdivide(&mut vertices, &triangles);
  }
  (vertices, triangles)
}

fn into_sample_set(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> SampleSet {
  SampleSet {
    points: vertices.into_iter().map(SamplePoint::on_sphere).collect(),
    triangles,
  }
}
