//! Sampling and camera constants shared by the pose tree and the sequencers.
//!
//! # Level Convention
//!
//! ```text
//! level -1   synthetic root (no direction, never rendered)
//! level  0   icosahedron            12 points
//! level  1   1 subdivision pass     42 points
//! level  k   10 * 4^k + 2 points
//! ```
//!
//! Every non-root node at level `k` draws its children from the level `k + 1`
//! point set.

use glam::Vec3;

/// Level assigned to the synthetic tree root.
pub const ROOT_LEVEL: i32 = -1;

/// Id of the tree root. Ids are assigned breadth-first starting here.
pub const ROOT_ID: usize = 0;

/// Number of nearest neighbors selected as children of a non-root node.
///
/// Vertices of a subdivided icosahedron have degree 5 or 6; the tree keeps the
/// literal 6 for every level so downstream consumers see a fixed shape.
pub const CHILD_FAN_OUT: usize = 6;

/// Icosahedron coordinate magnitudes: 1/sqrt(1+phi^2) and phi/sqrt(1+phi^2).
pub const ICOSAHEDRON_X: f32 = 0.525_731_1;
pub const ICOSAHEDRON_Z: f32 = 0.850_650_8;

/// Deepest subdivision level generated (10 * 4^10 + 2 = 10 485 762 points).
/// Higher requests are clamped; vertex indices are `u32`.
pub const MAX_GEODESIC_LEVEL: u32 = 10;

/// Unit icosahedron corners (level 0 of the geodesic sphere), canonical order.
pub const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = {
  const X: f32 = ICOSAHEDRON_X;
  const Z: f32 = ICOSAHEDRON_Z;
  const N: f32 = 0.0;
  [
    [-X, N, Z],
    [X, N, Z],
    [-X, N, -Z],
    [X, N, -Z],
    [N, Z, X],
    [N, Z, -X],
    [N, -Z, X],
    [N, -Z, -X],
    [Z, X, N],
    [-Z, X, N],
    [Z, -X, N],
    [-Z, -X, N],
  ]
};

/// Icosahedron faces as indices into [`ICOSAHEDRON_VERTICES`].
pub const ICOSAHEDRON_TRIANGLES: [[u32; 3]; 20] = [
  [0, 4, 1],
  [0, 9, 4],
  [9, 5, 4],
  [4, 5, 8],
  [4, 8, 1],
  [8, 10, 1],
  [8, 3, 10],
  [5, 3, 8],
  [5, 2, 3],
  [2, 7, 3],
  [7, 10, 3],
  [7, 6, 10],
  [7, 11, 6],
  [11, 0, 6],
  [0, 1, 6],
  [6, 1, 10],
  [9, 0, 11],
  [9, 11, 2],
  [9, 2, 5],
  [7, 2, 11],
];

// =============================================================================
// Camera
// =============================================================================

/// World up vector (+Y).
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Scene center every grid/tree camera looks at.
pub const SCENE_CENTER: Vec3 = Vec3::ZERO;

/// |dot(eye_dir, up)| above this is treated as colinear.
pub const UP_DEGENERACY_THRESHOLD: f32 = 0.999;

/// Smallest camera distance accepted from callers.
pub const MIN_CAMERA_DISTANCE: f32 = 0.1;

/// Camera distance for grid and tree-walk sequencers when none is usable.
pub const DEFAULT_CAMERA_DISTANCE: f32 = 1.3;

/// Camera distance for the random pose sequencer when none is usable.
pub const DEFAULT_RANDOM_CAMERA_DISTANCE: f32 = 1.2;

// =============================================================================
// Sphere grid
// =============================================================================

/// Minimum azimuth segments / elevation rows of the lat/long sphere grid.
pub const MIN_SPHERE_DIVISIONS: u32 = 5;

pub const DEFAULT_SPHERE_SEGMENTS: u32 = 30;
pub const DEFAULT_SPHERE_ROWS: u32 = 45;

// =============================================================================
// Random pose
// =============================================================================

/// The near depth bound is never closer to the camera than this (camera looks
/// down -Z).
pub const MAX_NEAR_DEPTH: f32 = -0.5;

/// The far depth bound is never closer to the camera than this.
pub const MAX_FAR_DEPTH: f32 = -1.0;

/// Random runs longer than this log a warning.
pub const LARGE_RUN_WARNING: u32 = 100_000;

// =============================================================================
// Tree file
// =============================================================================

/// File name the tree-walk sequencer writes into its output directory.
pub const TREE_FILE_NAME: &str = "BPTData.csv";

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
