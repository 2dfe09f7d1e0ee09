//! # k3tree
//!
//! `k3tree` is a Rust library for matching 3D point catalogs, designed to be used in Rust as well
//! as compiled to WebAssembly (WASM). It indexes a set of identified points in a k-d tree and
//! answers exact nearest-neighbour and fixed-radius queries against it.
//!
//! ## Features
//!
//! - **Balanced construction**: median splits cycling x, y, z with depth give a tree of minimum
//!   height.
//! - **Incremental insertion**: points can be added one at a time, without rebalancing.
//! - **Exact queries**: backtracking nearest-neighbour search and pruned radius search, both
//!   comparing squared distances.
//! - **No recursion in queries**: searches run on explicit work stacks, so even a fully
//!   degenerate tree cannot exhaust the call stack.
//! - **WASM-first**: the `wasm` feature (on by default) exposes [`KdTree3D`] via `wasm-bindgen`.
//!
//! ## Example
//!
//! ```
//! use k3tree::{KdTree, Point};
//!
//! let tree = KdTree::build(vec![
//!     Point::new(1, 0.0, 0.0, 0.0),
//!     Point::new(2, 1.0, 0.0, 0.0),
//!     Point::new(3, 0.0, 1.0, 0.0),
//!     Point::new(4, 5.0, 5.0, 5.0),
//! ]);
//!
//! assert_eq!(tree.find_nearest([0.1, 0.0, 0.0]).unwrap().id, 1);
//! assert_eq!(tree.find_in_radius([0.0, 0.0, 0.0], 1.5).len(), 3);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct, which owns the points and the node arena.
//!
//! ## Concurrency
//!
//! Queries take `&self` and never modify the tree, so any number of them may run in parallel
//! once construction is finished. Building and inserting require `&mut self`.

mod dump;
mod errors;
mod kdtree;
mod median;
mod point;
mod search;
#[cfg(feature = "wasm")]
mod wasm;

pub use errors::KdResult;
pub use errors::KdTreeError;
pub use kdtree::build_tree;
pub use kdtree::KdTree;
pub use kdtree::Node;
pub use kdtree::NodeId;
pub use kdtree::PreOrder;
pub use median::median_position;
pub use median::select_median;
pub use point::distance_squared;
pub use point::Point;
pub use search::Match;
#[cfg(feature = "wasm")]
pub use wasm::KdTree3D;
