//! Character-cell layout engine for terminal hosts.
//!
//! A layout is a tree of [`Level`]s, each splitting its area horizontally or
//! vertically between [`Item`]s that claim either a fixed number of cells or
//! a ratio of what is left. Every pass partitions the host's current screen
//! top-down and materializes one region per leaf through a [`RegionHost`].
//!
//! ```no_run
//! use room_layout::{Item, LayoutTree, Level, Size, ZoneRegistry};
//!
//! let mut tree = LayoutTree::new(Level::horizontal(vec![
//!     Item::fixed(24, "sidebar"),
//!     Item::ratio(1, "main").with_inner(Level::vertical(vec![
//!         Item::ratio(3, "timeline"),
//!         Item::fixed(3, "input"),
//!     ])),
//! ]))?;
//!
//! let mut host = ZoneRegistry::new(Size::new(100, 30));
//! let frame = tree.layout(&mut host)?;
//! assert_eq!(frame.bounds_of("sidebar").map(|b| b.x1), Some(23));
//!
//! tree.toggle_item("sidebar")?;
//! tree.layout(&mut host)?;
//! # Ok::<(), room_layout::LayoutError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod shared;

pub use error::{HookError, LayoutError, Result, SpaceShortfall};
pub use geometry::{Bounds, Size};
pub use host::{HookResult, RegionHook, RegionHost, terminal_size};
pub use layout::{
    Direction, Frame, Item, ItemId, ItemView, LayoutConfig, LayoutTree, Level, LevelId,
    Placement, SizeSpec,
};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use registry::{Zone, ZoneContent, ZoneId, ZoneRegistry};
pub use shared::SharedLayout;
