//! Lock-guarded layout handle for hosts that mutate from another thread.
//!
//! A [`LayoutTree`] has no synchronization of its own. When input handling
//! runs on a different thread than the render loop, wrap the tree in a
//! [`SharedLayout`] and route both sides through it.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{LayoutError, Result};
use crate::host::RegionHost;
use crate::layout::{Frame, LayoutTree, SizeSpec};
use crate::registry::Zone;

pub struct SharedLayout<R = Zone> {
    inner: Arc<Mutex<LayoutTree<R>>>,
}

impl<R> Clone for SharedLayout<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> SharedLayout<R> {
    pub fn new(tree: LayoutTree<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LayoutTree<R>>> {
        self.inner.lock().map_err(|_| LayoutError::Poisoned)
    }

    pub fn toggle_item(&self, name: &str) -> Result<()> {
        self.lock()?.toggle_item(name)
    }

    pub fn hide_item(&self, name: &str, hidden: bool) -> Result<()> {
        self.lock()?.hide_item(name, hidden)
    }

    pub fn resize_item(&self, name: &str, ratio: u16, fixed: u16) -> Result<()> {
        self.lock()?.resize_item(name, ratio, fixed)
    }

    pub fn set_item_size(&self, name: &str, size: SizeSpec) -> Result<()> {
        self.lock()?.set_item_size(name, size)
    }

    pub fn is_item_hidden(&self, name: &str) -> Result<bool> {
        self.lock()?.is_item_hidden(name)
    }

    /// Run one allocation pass while holding the lock.
    pub fn layout<H>(&self, host: &mut H) -> Result<Frame>
    where
        H: RegionHost<Region = R>,
    {
        self.lock()?.layout(host)
    }

    /// Borrow the tree for several operations under one lock.
    pub fn with_tree<T>(&self, f: impl FnOnce(&mut LayoutTree<R>) -> T) -> Result<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}
