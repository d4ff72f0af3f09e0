use super::*;

/// Every icosahedron corner lies on the unit sphere.
#[test]
fn test_icosahedron_vertices_are_unit_length() {
  for (i, v) in ICOSAHEDRON_VERTICES.iter().enumerate() {
    let len = Vec3::from_array(*v).length();
    assert!(
      (len - 1.0).abs() < 1e-6,
      "Vertex {} has length {}",
      i,
      len
    );
  }
}

/// Triangle indices only reference the 12 corners, and each corner is shared
/// by exactly 5 faces.
#[test]
fn test_icosahedron_triangle_valence() {
  let mut valence = [0u32; 12];
  for tri in ICOSAHEDRON_TRIANGLES {
    for idx in tri {
      assert!((idx as usize) < ICOSAHEDRON_VERTICES.len());
      valence[idx as usize] += 1;
    }
  }
  assert!(valence.iter().all(|&v| v == 5), "valence: {:?}", valence);
}

/// Root sits one level above the icosahedron.
#[test]
fn test_root_level_precedes_level_zero() {
  assert_eq!(ROOT_LEVEL + 1, 0);
  assert_eq!(ROOT_ID, 0);
  assert_eq!(CHILD_FAN_OUT, 6);
}

/// Depth clamps keep the far bound behind the near bound.
#[test]
fn test_depth_clamps_are_ordered() {
  assert!(MAX_FAR_DEPTH < MAX_NEAR_DEPTH);
  assert!(MAX_NEAR_DEPTH < 0.0);
}
