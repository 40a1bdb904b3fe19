//! Graph algorithms module
//!
//! Reachability with cycle detection is the only algorithm the object
//! model ships with.

pub mod traversal;

pub use traversal::DepthFirstTraversal;
