//! Boundary between the layout tree and the environment that owns the screen.
//!
//! A host materializes named regions and reports the screen size. The tree
//! drives it once per frame through [`crate::LayoutTree::layout`].

use crate::error::{HookError, Result};
use crate::geometry::{Bounds, Size};

/// Outcome of a single item hook.
pub type HookResult = std::result::Result<(), HookError>;

/// Region-management interface consumed by an allocation pass.
pub trait RegionHost {
    /// Host-side handle passed to item hooks.
    type Region;

    /// Current drawable area. Queried at the start of every pass.
    fn screen_size(&self) -> Size;

    /// Whether neighbouring regions may share their border cells.
    fn supports_overlap(&self) -> bool;

    /// Return the region registered under `name`, creating it on first use.
    ///
    /// The flag is `true` when the region was just created. Region identity
    /// must be stable across frames for the same name.
    fn create_or_update_region(
        &mut self,
        name: &str,
        bounds: Bounds,
    ) -> Result<(&mut Self::Region, bool)>;

    /// Push the named region to the back of the stacking order.
    fn set_region_background(&mut self, name: &str) -> Result<()>;
}

/// Capability invoked with a materialized region.
///
/// Closures `FnMut(&mut R) -> HookResult + Send` implement this directly;
/// implement it by hand for stateful doubles.
pub trait RegionHook<R>: Send {
    fn call(&mut self, region: &mut R) -> HookResult;
}

impl<R, F> RegionHook<R> for F
where
    F: FnMut(&mut R) -> HookResult + Send,
{
    fn call(&mut self, region: &mut R) -> HookResult {
        self(region)
    }
}

/// Query the controlling terminal for its size.
pub fn terminal_size() -> Result<Size> {
    let (width, height) = crossterm::terminal::size()?;
    Ok(Size::new(width, height))
}
