//! Layout tree construction, lookup, mutation and space allocation.
//!
//! Trees are assembled from [`Item`] and [`Level`] builders, then flattened
//! into a [`LayoutTree`] that owns them for its whole lifetime.

mod alloc;
mod config;
mod core;
mod frame;
mod tree;

pub use config::LayoutConfig;
pub use core::{Direction, Item, Level, SizeSpec};
pub use frame::{Frame, Placement};
pub use tree::{ItemId, ItemView, LayoutTree, LevelId};
