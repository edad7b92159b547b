//! In-memory region host.
//!
//! Hosts that only need the solved rectangles, and the test suite, drive a
//! layout tree against [`ZoneRegistry`] instead of a real view toolkit.

mod core;

pub use core::{Zone, ZoneContent, ZoneId, ZoneRegistry};
