use std::fmt;
use std::num::NonZeroU16;

use serde::Serialize;

use crate::host::{HookResult, RegionHook};

/// Axis a level splits its space along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Items are laid out left to right.
    Horizontal,
    /// Items are laid out top to bottom.
    Vertical,
}

/// Space claim of one item along its level's axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeSpec {
    /// Exact number of cells.
    Fixed(NonZeroU16),
    /// Share of whatever the fixed items leave over.
    Ratio(NonZeroU16),
}

impl SizeSpec {
    pub fn fixed(cells: u16) -> Option<Self> {
        NonZeroU16::new(cells).map(Self::Fixed)
    }

    pub fn ratio(weight: u16) -> Option<Self> {
        NonZeroU16::new(weight).map(Self::Ratio)
    }

    /// Build from a `(ratio, fixed)` pair where exactly one side is non-zero.
    pub fn from_parts(ratio: u16, fixed: u16) -> Option<Self> {
        match (ratio, fixed) {
            (0, 0) => None,
            (ratio, 0) => Self::ratio(ratio),
            (0, fixed) => Self::fixed(fixed),
            _ => None,
        }
    }

    /// Signed encoding: positive is a ratio weight, negative a fixed size.
    pub fn from_signed(size: i32) -> Option<Self> {
        let magnitude = u16::try_from(size.unsigned_abs()).ok()?;
        if size > 0 {
            Self::ratio(magnitude)
        } else {
            Self::fixed(magnitude)
        }
    }

    pub fn fixed_cells(&self) -> Option<u32> {
        match self {
            Self::Fixed(cells) => Some(u32::from(cells.get())),
            Self::Ratio(_) => None,
        }
    }

    pub fn weight(&self) -> Option<u32> {
        match self {
            Self::Ratio(weight) => Some(u32::from(weight.get())),
            Self::Fixed(_) => None,
        }
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(cells) => write!(f, "fixed({cells})"),
            Self::Ratio(weight) => write!(f, "ratio({weight})"),
        }
    }
}

/// Builder for one node of a layout tree.
///
/// Options are applied in call order, so a later `.hidden()`/`.visible()` or
/// hook setter overwrites an earlier one.
pub struct Item<R> {
    pub(crate) name: String,
    pub(crate) size: SizeSpec,
    pub(crate) hidden: bool,
    pub(crate) inner: Option<Level<R>>,
    pub(crate) on_create: Option<Box<dyn RegionHook<R>>>,
    pub(crate) on_update: Option<Box<dyn RegionHook<R>>>,
}

impl<R> Item<R> {
    /// Item taking `weight` shares of the space left after fixed items.
    ///
    /// # Panics
    /// Panics if `weight` is zero.
    pub fn ratio(weight: u16, name: impl Into<String>) -> Self {
        Self::sized(i32::from(weight), name)
    }

    /// Item taking exactly `cells` lines or columns.
    ///
    /// # Panics
    /// Panics if `cells` is zero.
    pub fn fixed(cells: u16, name: impl Into<String>) -> Self {
        Self::sized(-i32::from(cells), name)
    }

    /// Positive `size` is a ratio weight, negative a fixed cell count.
    ///
    /// # Panics
    /// Panics if `size` is zero or its magnitude does not fit in `u16`.
    pub fn sized(size: i32, name: impl Into<String>) -> Self {
        let size = SizeSpec::from_signed(size).expect("invalid size when creating layout item");
        Self::with_spec(size, name)
    }

    pub fn with_spec(size: SizeSpec, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            hidden: false,
            inner: None,
            on_create: None,
            on_update: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn visible(mut self) -> Self {
        self.hidden = false;
        self
    }

    /// Subdivide this item's space with `level` instead of materializing a region.
    pub fn with_inner(mut self, level: Level<R>) -> Self {
        self.inner = Some(level);
        self
    }

    /// Run `hook` once, when the region is first created.
    pub fn with_create<F>(self, hook: F) -> Self
    where
        F: FnMut(&mut R) -> HookResult + Send + 'static,
    {
        self.with_create_hook(hook)
    }

    /// Run `hook` on every pass after the region exists.
    pub fn with_update<F>(self, hook: F) -> Self
    where
        F: FnMut(&mut R) -> HookResult + Send + 'static,
    {
        self.with_update_hook(hook)
    }

    pub fn with_create_hook(mut self, hook: impl RegionHook<R> + 'static) -> Self {
        self.on_create = Some(Box::new(hook));
        self
    }

    pub fn with_update_hook(mut self, hook: impl RegionHook<R> + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> SizeSpec {
        self.size
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl<R> fmt::Debug for Item<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("hidden", &self.hidden)
            .field("inner", &self.inner)
            .field("on_create", &self.on_create.is_some())
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

/// Ordered items sharing one split axis.
pub struct Level<R> {
    pub(crate) direction: Direction,
    pub(crate) items: Vec<Item<R>>,
}

impl<R> Level<R> {
    pub fn new(direction: Direction, items: Vec<Item<R>>) -> Self {
        Self { direction, items }
    }

    pub fn horizontal(items: Vec<Item<R>>) -> Self {
        Self::new(Direction::Horizontal, items)
    }

    pub fn vertical(items: Vec<Item<R>>) -> Self {
        Self::new(Direction::Vertical, items)
    }

    pub fn push(mut self, item: Item<R>) -> Self {
        self.items.push(item);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<R> fmt::Debug for Level<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("direction", &self.direction)
            .field("items", &self.items)
            .finish()
    }
}
