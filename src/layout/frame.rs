use serde::Serialize;

use crate::geometry::{Bounds, Size};

use super::tree::ItemId;

/// One region planned by an allocation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub item: ItemId,
    pub name: String,
    pub bounds: Bounds,
    /// Hidden regions cover their parent's whole area and sit behind the rest.
    pub background: bool,
}

/// Every placement of one pass, in materialization order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Frame {
    pub size: Size,
    pub placements: Vec<Placement>,
}

impl Frame {
    pub fn get(&self, name: &str) -> Option<&Placement> {
        self.placements.iter().find(|placement| placement.name == name)
    }

    pub fn bounds_of(&self, name: &str) -> Option<Bounds> {
        self.get(name).map(|placement| placement.bounds)
    }

    pub fn visible(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|placement| !placement.background)
    }

    pub fn background(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|placement| placement.background)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Fingerprint of the size and every placement.
    ///
    /// Two frames with equal digests materialize identical regions, so a host
    /// can skip redrawing when the digest did not change.
    pub fn digest(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.size.width.to_le_bytes());
        hasher.update(&self.size.height.to_le_bytes());
        for placement in &self.placements {
            hasher.update(&(placement.name.len() as u64).to_le_bytes());
            hasher.update(placement.name.as_bytes());
            let Bounds { x0, y0, x1, y1 } = placement.bounds;
            for coord in [x0, y0, x1, y1] {
                hasher.update(&coord.to_le_bytes());
            }
            hasher.update(&[u8::from(placement.background)]);
        }
        hasher.finalize()
    }
}
