use std::collections::HashMap;
use std::collections::hash_map::Entry;

use blake3::Hash;

use crate::error::{LayoutError, Result};
use crate::geometry::{Bounds, Size};
use crate::host::{RegionHost, terminal_size};

pub type ZoneId = String;

/// User facing payload stored for each zone.
pub type ZoneContent = String;

/// A materialized region as tracked by [`ZoneRegistry`].
#[derive(Debug, Clone)]
pub struct Zone {
    name: ZoneId,
    bounds: Bounds,
    background: bool,
    content: ZoneContent,
    hash: Option<Hash>,
    updates: u64,
    is_dirty: bool,
}

impl Zone {
    fn new(name: &str, bounds: Bounds) -> Self {
        Self {
            name: name.to_string(),
            bounds,
            background: false,
            content: ZoneContent::new(),
            hash: None,
            updates: 0,
            is_dirty: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether the last pass pushed this zone behind the visible ones.
    pub fn is_background(&self) -> bool {
        self.background
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of passes that touched this zone, including the creating one.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Replace the content, marking the zone dirty only if it changed.
    pub fn set_content(&mut self, content: impl Into<ZoneContent>) {
        let content = content.into();
        let new_hash = blake3::hash(content.as_bytes());
        if self.hash.map(|h| h != new_hash).unwrap_or(true) {
            self.content = content;
            self.hash = Some(new_hash);
            self.is_dirty = true;
        }
    }
}

/// In-memory region host keyed by zone name.
///
/// Zones are stacked back to front in creation order; background zones are
/// moved to the back. A zone is dirty when it is new, its bounds moved, or
/// its content changed since the last [`ZoneRegistry::take_dirty`].
#[derive(Debug)]
pub struct ZoneRegistry {
    size: Size,
    supports_overlap: bool,
    entries: HashMap<ZoneId, Zone>,
    stacking: Vec<ZoneId>,
}

impl ZoneRegistry {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            supports_overlap: false,
            entries: HashMap::new(),
            stacking: Vec::new(),
        }
    }

    /// Registry sized to the controlling terminal.
    pub fn from_terminal() -> Result<Self> {
        Ok(Self::new(terminal_size()?))
    }

    pub fn with_overlap(mut self, supports_overlap: bool) -> Self {
        self.supports_overlap = supports_overlap;
        self
    }

    pub fn set_supports_overlap(&mut self, supports_overlap: bool) {
        self.supports_overlap = supports_overlap;
    }

    /// Report a new screen size; picked up by the next pass.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.entries.get(name)
    }

    pub fn zone_mut(&mut self, name: &str) -> Option<&mut Zone> {
        self.entries.get_mut(name)
    }

    pub fn bounds_of(&self, name: &str) -> Option<Bounds> {
        self.entries.get(name).map(Zone::bounds)
    }

    /// Zone names from back to front.
    pub fn stacking_order(&self) -> &[ZoneId] {
        &self.stacking
    }

    /// Front-most zone covering the cell at `(x, y)`.
    pub fn zone_at(&self, x: u16, y: u16) -> Option<&Zone> {
        self.stacking
            .iter()
            .rev()
            .filter_map(|name| self.entries.get(name))
            .find(|zone| zone.bounds.contains(x, y))
    }

    pub fn apply_content(&mut self, name: &str, content: ZoneContent) -> Result<()> {
        let zone = self
            .entries
            .get_mut(name)
            .ok_or_else(|| LayoutError::NotFound(name.to_string()))?;
        zone.set_content(content);
        Ok(())
    }

    /// Drain dirty zones, sorted by name.
    pub fn take_dirty(&mut self) -> Vec<(ZoneId, Zone)> {
        let mut dirty: Vec<_> = self
            .entries
            .iter_mut()
            .filter(|(_, zone)| zone.is_dirty)
            .map(|(id, zone)| {
                zone.is_dirty = false;
                (id.clone(), zone.clone())
            })
            .collect();
        dirty.sort_by(|a, b| a.0.cmp(&b.0));
        dirty
    }

    pub fn has_dirty(&self) -> bool {
        self.entries.values().any(|zone| zone.is_dirty)
    }
}

impl RegionHost for ZoneRegistry {
    type Region = Zone;

    fn screen_size(&self) -> Size {
        self.size
    }

    fn supports_overlap(&self) -> bool {
        self.supports_overlap
    }

    fn create_or_update_region(
        &mut self,
        name: &str,
        bounds: Bounds,
    ) -> Result<(&mut Zone, bool)> {
        let (zone, is_new) = match self.entries.entry(name.to_string()) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(vacant) => {
                self.stacking.push(name.to_string());
                (vacant.insert(Zone::new(name, bounds)), true)
            }
        };

        if zone.bounds != bounds {
            zone.bounds = bounds;
            zone.is_dirty = true;
        }
        zone.background = false;
        zone.updates += 1;
        Ok((zone, is_new))
    }

    fn set_region_background(&mut self, name: &str) -> Result<()> {
        let zone = self
            .entries
            .get_mut(name)
            .ok_or_else(|| LayoutError::NotFound(name.to_string()))?;
        zone.background = true;
        if let Some(pos) = self.stacking.iter().position(|id| id == name) {
            let id = self.stacking.remove(pos);
            self.stacking.insert(0, id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ZoneRegistry {
        ZoneRegistry::new(Size::new(80, 25))
    }

    fn bounds() -> Bounds {
        Bounds::new(0, 0, 9, 4)
    }

    #[test]
    fn regions_keep_identity_across_frames() {
        let mut registry = registry();
        let (_, is_new) = registry.create_or_update_region("zone", bounds()).unwrap();
        assert!(is_new);
        let (zone, is_new) = registry.create_or_update_region("zone", bounds()).unwrap();
        assert!(!is_new);
        assert_eq!(zone.updates(), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn new_and_moved_zones_are_dirty() {
        let mut registry = registry();
        registry.create_or_update_region("zone", bounds()).unwrap();
        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].0, "zone");

        registry.create_or_update_region("zone", bounds()).unwrap();
        assert!(!registry.has_dirty());

        registry
            .create_or_update_region("zone", Bounds::new(0, 0, 19, 4))
            .unwrap();
        assert!(registry.has_dirty());
    }

    #[test]
    fn apply_content_detects_changes() {
        let mut registry = registry();
        registry.create_or_update_region("zone", bounds()).unwrap();
        registry.take_dirty();

        registry.apply_content("zone", "hello".to_string()).unwrap();
        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].1.content(), "hello");

        registry.apply_content("zone", "hello".to_string()).unwrap();
        assert!(registry.take_dirty().is_empty());
    }

    #[test]
    fn apply_content_to_unknown_zone_fails() {
        let mut registry = registry();
        let err = registry
            .apply_content("missing", "hello".to_string())
            .unwrap_err();
        assert!(matches!(err, LayoutError::NotFound(_)));
    }

    #[test]
    fn background_moves_zone_to_the_back() {
        let mut registry = registry();
        registry.create_or_update_region("a", bounds()).unwrap();
        registry.create_or_update_region("b", bounds()).unwrap();
        registry.create_or_update_region("c", bounds()).unwrap();
        registry.set_region_background("c").unwrap();

        assert_eq!(registry.stacking_order(), ["c", "a", "b"]);
        assert!(registry.zone("c").unwrap().is_background());
        assert_eq!(registry.zone_at(1, 1).unwrap().name(), "b");
    }

    #[test]
    fn zone_at_prefers_front_zone() {
        let mut registry = registry();
        registry
            .create_or_update_region("full", Bounds::new(0, 0, 79, 24))
            .unwrap();
        registry
            .create_or_update_region("left", Bounds::new(0, 0, 15, 24))
            .unwrap();
        registry.set_region_background("full").unwrap();

        assert_eq!(registry.zone_at(3, 3).unwrap().name(), "left");
        assert_eq!(registry.zone_at(40, 3).unwrap().name(), "full");
        assert!(registry.zone_at(80, 3).is_none());
    }
}
