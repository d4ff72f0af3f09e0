//! PoseTree - arena owning every node of the balanced pose tree.

use super::{NodeId, PoseNode};
use crate::constants::{ROOT_ID, ROOT_LEVEL};

/// Balanced pose tree.
///
/// Always holds at least the root. `nodes()[id].id == id` for every node.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseTree {
  nodes: Vec<PoseNode>,
}

impl PoseTree {
  /// Tree containing only the root.
  pub fn new() -> Self {
    Self {
      nodes: vec![PoseNode::root()],
    }
  }

  /// Wrap an arena whose ids already match their indices and whose links have
  /// been checked.
  pub(crate) fn from_nodes(nodes: Vec<PoseNode>) -> Self {
    debug_assert!(!nodes.is_empty());
    debug_assert!(nodes.iter().enumerate().all(|(i, n)| n.id == i));
    Self { nodes }
  }

  /// Append a child under `parent`, returning its id.
  pub(crate) fn push_child(&mut self, mut node: PoseNode) -> NodeId {
    let id = self.nodes.len();
    let parent = node.parent.unwrap_or(ROOT_ID);
    node.id = id;
    self.nodes[parent].children.push(id);
    self.nodes.push(node);
    id
  }

  pub fn root(&self) -> &PoseNode {
    &self.nodes[ROOT_ID]
  }

  /// Number of nodes, root included.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// True when the tree is only the root.
  pub fn is_empty(&self) -> bool {
    self.nodes.len() == 1
  }

  pub fn node(&self, id: NodeId) -> Option<&PoseNode> {
    self.nodes.get(id)
  }

  pub fn node_mut(&mut self, id: NodeId) -> Option<&mut PoseNode> {
    self.nodes.get_mut(id)
  }

  /// Flat node list in id order.
  pub fn nodes(&self) -> &[PoseNode] {
    &self.nodes
  }

  /// Children of `id` in selection order. Empty for unknown ids.
  pub fn children(&self, id: NodeId) -> impl Iterator<Item = &PoseNode> + '_ {
    self
      .nodes
      .get(id)
      .into_iter()
      .flat_map(|n| n.children.iter())
      .map(move |&child| &self.nodes[child])
  }

  /// Nodes on `level`, in id order.
  pub fn nodes_at_level(&self, level: i32) -> impl Iterator<Item = &PoseNode> + '_ {
    self.nodes.iter().filter(move |n| n.level == level)
  }

  /// Deepest level present (`-1` for a root-only tree).
  pub fn max_level(&self) -> i32 {
    self
      .nodes
      .iter()
      .map(|n| n.level)
      .max()
      .unwrap_or(ROOT_LEVEL)
  }

  /// Node that was rendered as image `image_index`.
  pub fn node_for_image(&self, image_index: u32) -> Option<&PoseNode> {
    self
      .nodes
      .iter()
      .find(|n| n.image_index == Some(image_index))
  }

  /// Pre-order depth-first traversal starting at the root.
  pub fn depth_first(&self) -> DepthFirst<'_> {
    DepthFirst {
      tree: self,
      stack: vec![ROOT_ID],
    }
  }
}

impl Default for PoseTree {
  fn default() -> Self {
    Self::new()
  }
}

/// Pre-order iterator: a node, then each child subtree in child-list order.
pub struct DepthFirst<'a> {
  tree: &'a PoseTree,
  stack: Vec<NodeId>,
}

impl<'a> Iterator for DepthFirst<'a> {
  type Item = &'a PoseNode;

  fn next(&mut self) -> Option<Self::Item> {
    let id = self.stack.pop()?;
    let node = &self.tree.nodes[id];
    self.stack.extend(node.children.iter().rev().copied());
    Some(node)
  }
}
