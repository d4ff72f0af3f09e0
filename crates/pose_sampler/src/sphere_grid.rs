//! Latitude/longitude sample grid for the grid-on-sphere sequencer.
//!
//! ```text
//! index 0                         +Z pole (theta = 0)
//! rings k = 1 .. rows-1           theta = k * PI / rows
//!   azimuth j = 0 .. 2*segments   phi   = j * PI / segments
//! last index                      -Z pole (theta = PI)
//! ```
//!
//! Point count: `2 + (rows - 1) * 2 * segments`.

use std::f32::consts::PI;

use glam::Vec3;

use crate::constants::MIN_SPHERE_DIVISIONS;
use crate::types::{SamplePoint, SampleSet};

/// Build the grid. `segments` and `rows` below the minimum are raised to it.
pub fn create(segments: u32, rows: u32) -> SampleSet {
  let segments = clamp_divisions("segments", segments);
  let rows = clamp_divisions("rows", rows);

  let ring_len = 2 * segments as usize;
  let mut points = Vec::with_capacity(2 + (rows as usize - 1) * ring_len);

  points.push(SamplePoint::on_sphere(spherical(0.0, 0.0)));

  for k in 1..rows {
    let theta = k as f32 * PI / rows as f32;
    for j in 0..ring_len {
      let phi = j as f32 * PI / segments as f32;
      points.push(SamplePoint::on_sphere(spherical(theta, phi)));
    }
  }

  points.push(SamplePoint::on_sphere(spherical(PI, 2.0 * PI)));

  tracing::debug!(
    segments,
    rows,
    points = points.len(),
    "created sphere grid"
  );

  SampleSet {
    points,
    triangles: Vec::new(),
  }
}

/// Unit vector for elevation `theta` (from +Z) and azimuth `phi` (from +X).
#[inline]
fn spherical(theta: f32, phi: f32) -> Vec3 {
  Vec3::new(phi.cos() * theta.sin(), phi.sin() * theta.sin(), theta.cos())
}

fn clamp_divisions(name: &str, value: u32) -> u32 {
  if value < MIN_SPHERE_DIVISIONS {
    tracing::warn!(
      "sphere {} must be at least {}, got {}; using {}",
      name,
      MIN_SPHERE_DIVISIONS,
      value,
      MIN_SPHERE_DIVISIONS
    );
    MIN_SPHERE_DIVISIONS
  } else {
    value
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn point_count_follows_rings() {
    let set = create(5, 5);
    assert_eq!(set.len(), 2 + 4 * 10);
    assert_eq!(set.triangle_count(), 0);
  }

  #[test]
  fn small_divisions_are_clamped() {
    assert_eq!(create(1, 2).len(), create(5, 5).len());
  }

  #[test]
  fn starts_and_ends_at_poles() {
    let set = create(6, 8);
    let first = set.points.first().unwrap().direction;
    let last = set.points.last().unwrap().direction;
    assert!((first - Vec3::Z).length() < 1e-6);
    assert!((last - Vec3::NEG_Z).length() < 1e-6);
  }

  #[test]
  fn points_are_unit_length() {
    for p in create(12, 9).points {
      assert!((p.direction.length() - 1.0).abs() < 1e-5);
      assert_eq!(p.direction, p.normal);
    }
  }
}
