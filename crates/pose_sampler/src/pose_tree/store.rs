//! Pose tree persistence.
//!
//! Line-oriented, tab-separated text:
//!
//! ```text
//! BPTDATA
//! Automatically generated file
//! <timestamp>
//! Header
//! NODE    node_id         node_level      num_childs      image_index
//! LINK    node_id_parent  node_id_child
//!
//! DATA
//! NODE    0   -1  12  -1
//! LINK    0   1
//! ...
//! ```
//!
//! Records after `DATA` are written depth-first pre-order: a node's `NODE`
//! line, one `LINK` line per child in child order, then each child subtree.
//! Missing `image_index` is written as `-1`.
//!
//! The reader ignores everything before `DATA`, collects all records and then
//! links them, so record order does not matter. Ids are dense; a gap in the
//! id range is an error.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use web_time::{SystemTime, UNIX_EPOCH};

use super::{NodeId, PoseNode, PoseTree};
use crate::constants::ROOT_ID;
use crate::error::StoreError;

/// First line of every tree file.
pub const MAGIC: &str = "BPTDATA";

/// Sentinel line that starts the record section.
pub const DATA_SENTINEL: &str = "DATA";

const NODE_TAG: &str = "NODE";
const LINK_TAG: &str = "LINK";

/// Write `tree` to `path`, creating missing parent directories.
///
/// The file is rendered in memory and moved into place, so a failure never
/// leaves a partial file at `path`. Returns the number of nodes written.
pub fn write(path: impl AsRef<Path>, tree: &PoseTree) -> Result<usize, StoreError> {
  let path = path.as_ref();
  let _span = tracing::info_span!("pose_tree::write", path = %path.display()).entered();

  let mut buffer = Vec::new();
  let written = encode(tree, &mut buffer).map_err(|e| StoreError::io(path, e))?;

  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
  }

  let staging = staging_path(path);
  let discard_staging = |error: StoreError| {
    if staging.is_file() {
      let _ = fs::remove_file(&staging);
    }
    error
  };
  fs::write(&staging, &buffer).map_err(|e| discard_staging(StoreError::io(&staging, e)))?;
  fs::rename(&staging, path).map_err(|e| discard_staging(StoreError::io(path, e)))?;

  tracing::info!("wrote {} nodes into {}", written, path.display());
  Ok(written)
}

/// Read a tree file. The flat node list is `tree.nodes()`.
pub fn read(path: impl AsRef<Path>) -> Result<PoseTree, StoreError> {
  let path = path.as_ref();
  let _span = tracing::info_span!("pose_tree::read", path = %path.display()).entered();

  if !path.exists() {
    return Err(StoreError::NotFound(path.to_path_buf()));
  }
  let file = fs::File::open(path).map_err(|e| StoreError::io(path, e))?;

  match decode(BufReader::new(file)) {
    Err(StoreError::Io { source, .. }) => Err(StoreError::io(path, source)),
    Err(StoreError::MissingDataSection(_)) => Err(StoreError::MissingDataSection(path.to_path_buf())),
    other => other,
  }
}

/// Serialize `tree` (header and records). Returns the number of nodes written.
pub fn encode<W: Write>(tree: &PoseTree, out: &mut W) -> io::Result<usize> {
  writeln!(out, "{}", MAGIC)?;
  writeln!(out, "Automatically generated file")?;
  writeln!(out, "{}", timestamp())?;
  writeln!(out, "Header")?;
  writeln!(out, "{}\tnode_id\tnode_level\tnum_childs\timage_index", NODE_TAG)?;
  writeln!(out, "{}\tnode_id_parent\tnode_id_child", LINK_TAG)?;
  writeln!(out)?;
  writeln!(out, "{}", DATA_SENTINEL)?;

  let mut count = 0;
  for node in tree.depth_first() {
    writeln!(
      out,
      "{}\t{}\t{}\t{}\t{}",
      NODE_TAG,
      node.id,
      node.level,
      node.children.len(),
      node.image_index.map_or(-1, i64::from)
    )?;
    for child in &node.children {
      writeln!(out, "{}\t{}\t{}", LINK_TAG, node.id, child)?;
    }
    count += 1;
  }

  Ok(count)
}

/// Parsed `NODE` record.
struct NodeRecord {
  line: usize,
  id: NodeId,
  level: i32,
  num_children: usize,
  image_index: Option<u32>,
}

/// Parsed `LINK` record.
struct LinkRecord {
  line: usize,
  parent: NodeId,
  child: NodeId,
}

/// Parse a tree from any line source.
pub fn decode<R: BufRead>(reader: R) -> Result<PoseTree, StoreError> {
  let mut found_data = false;
  let mut node_records = Vec::new();
  let mut link_records = Vec::new();

  for (index, line) in reader.lines().enumerate() {
    let line_no = index + 1;
    let line = line.map_err(|e| StoreError::io(PathBuf::new(), e))?;
    let line = line.trim_end_matches('\r');

    if !found_data {
      found_data = line == DATA_SENTINEL;
      continue;
    }

    let fields: Vec<&str> = line.split('\t').collect();
    match fields[0] {
      NODE_TAG => node_records.push(parse_node(line_no, &fields)?),
      LINK_TAG => link_records.push(parse_link(line_no, &fields)?),
      _ => {}
    }
  }

  if !found_data {
    return Err(StoreError::MissingDataSection(PathBuf::new()));
  }

  tracing::info!(
    "found {} nodes and {} links",
    node_records.len(),
    link_records.len()
  );

  link(node_records, link_records)
}

/// Place node records by id, then attach links.
fn link(node_records: Vec<NodeRecord>, link_records: Vec<LinkRecord>) -> Result<PoseTree, StoreError> {
  let Some(max_id) = node_records.iter().map(|r| r.id).max() else {
    return Err(StoreError::MissingRoot);
  };

  // Dense ids: n records can only cover 0..n.
  if max_id >= node_records.len() {
    return Err(first_missing_id(&node_records));
  }

  let mut slots: Vec<Option<PoseNode>> = vec![None; max_id + 1];
  let mut declared_children = vec![0usize; max_id + 1];

  for record in node_records {
    let slot = &mut slots[record.id];
    if slot.is_some() {
      return Err(StoreError::DuplicateNode {
        line: record.line,
        node_id: record.id,
      });
    }
    let mut node = PoseNode::bare(record.id, record.level);
    node.image_index = record.image_index;
    *slot = Some(node);
    declared_children[record.id] = record.num_children;
  }

  if slots[ROOT_ID].is_none() {
    return Err(StoreError::MissingRoot);
  }

  let mut nodes = slots
    .into_iter()
    .enumerate()
    .map(|(id, slot)| slot.ok_or(StoreError::MissingNode(id)))
    .collect::<Result<Vec<_>, _>>()?;

  for LinkRecord { line, parent, child } in link_records {
    for id in [parent, child] {
      if id >= nodes.len() {
        return Err(StoreError::UnknownNode { line, node_id: id });
      }
    }
    if nodes[child].level != nodes[parent].level + 1 {
      return Err(StoreError::LevelMismatch { parent, child });
    }
    if nodes[child].parent.is_some() {
      return Err(StoreError::MultipleParents { child });
    }
    nodes[child].parent = Some(parent);
    nodes[parent].children.push(child);
  }

  for node in &nodes {
    if !node.is_root() && node.parent.is_none() {
      return Err(StoreError::Orphan(node.id));
    }
    if node.children.len() != declared_children[node.id] {
      tracing::warn!(
        "node {} declares {} children but {} links were read",
        node.id,
        declared_children[node.id],
        node.children.len()
      );
    }
  }

  Ok(PoseTree::from_nodes(nodes))
}

/// Error for the lowest id in `0..records.len()` that no record defines.
fn first_missing_id(records: &[NodeRecord]) -> StoreError {
  let mut present = vec![false; records.len()];
  for record in records {
    if let Some(seen) = present.get_mut(record.id) {
      *seen = true;
    }
  }
  match present.iter().position(|&seen| !seen) {
    Some(ROOT_ID) => StoreError::MissingRoot,
    Some(id) => StoreError::MissingNode(id),
    None => StoreError::MissingNode(records.len()),
  }
}

fn parse_node(line: usize, fields: &[&str]) -> Result<NodeRecord, StoreError> {
  if fields.len() < 5 {
    return Err(StoreError::Parse {
      line,
      reason: format!("NODE record needs 4 fields, found {}", fields.len() - 1),
    });
  }

  let image_index: i64 = parse_field(line, "image_index", fields[4])?;
  let image_index = match image_index {
    -1 => None,
    i => Some(u32::try_from(i).map_err(|_| StoreError::Parse {
      line,
      reason: format!("image_index out of range: {}", i),
    })?),
  };

  Ok(NodeRecord {
    line,
    id: parse_field(line, "node_id", fields[1])?,
    level: parse_field(line, "node_level", fields[2])?,
    num_children: parse_field(line, "num_childs", fields[3])?,
    image_index,
  })
}

fn parse_link(line: usize, fields: &[&str]) -> Result<LinkRecord, StoreError> {
  if fields.len() < 3 {
    return Err(StoreError::Parse {
      line,
      reason: format!("LINK record needs 2 fields, found {}", fields.len() - 1),
    });
  }

  Ok(LinkRecord {
    line,
    parent: parse_field(line, "node_id_parent", fields[1])?,
    child: parse_field(line, "node_id_child", fields[2])?,
  })
}

fn parse_field<T: std::str::FromStr>(line: usize, name: &str, value: &str) -> Result<T, StoreError> {
  value.trim().parse().map_err(|_| StoreError::Parse {
    line,
    reason: format!("invalid {}: {:?}", name, value),
  })
}

/// `<path>.tmp` next to the destination.
fn staging_path(path: &Path) -> PathBuf {
  let mut staging = path.as_os_str().to_owned();
  staging.push(".tmp");
  PathBuf::from(staging)
}

fn timestamp() -> String {
  match SystemTime::now().duration_since(UNIX_EPOCH) {
    Ok(elapsed) => format!("unix time {}", elapsed.as_secs()),
    Err(_) => "unix time unknown".to_string(),
  }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
