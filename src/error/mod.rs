//! Error types shared by every layout module.

mod types;

pub use types::{HookError, LayoutError, Result, SpaceShortfall};
