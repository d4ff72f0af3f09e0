//! Balanced pose tree: camera viewpoints organized by geodesic subdivision
//! level.
//!
//! The tree is an arena of [`PoseNode`] values addressed by dense id
//! (`id == index`). Parents hold child ids; the `parent` field is a lookup
//! only. Ids are handed out breadth-first, so arena order is also the order
//! the tree-walk sequencer visits nodes.
//!
//! ```text
//!                       root (level -1, id 0)
//!          ┌──────────┬────┴─────┬──────────┐
//!        n1 (L0)    n2 (L0)    ...       n12 (L0)      all 12 icosahedron points
//!     ┌──┬─┴┬──┬──┬──┐
//!    6 nearest level-1 points                          6 per non-root node
//! ```
//!
//! # Module Structure
//!
//! - [`node`]: `PoseNode` - one viewpoint in the arena
//! - [`tree`]: `PoseTree` - arena ownership and queries
//! - [`build`]: breadth-first construction by nearest-neighbor assignment
//! - [`store`]: line-oriented text persistence (`BPTDATA` format)

pub mod build;
pub mod node;
pub mod store;
pub mod tree;

// Re-exports
pub use build::{nearest_neighbors, select_children};
pub use node::{NodeId, PoseNode};
pub use tree::{DepthFirst, PoseTree};
