//! Tree traversal and rendering

mod renderer;

pub use renderer::{TreeRenderer, NO_TREE_MESSAGE};
