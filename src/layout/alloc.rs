//! Recursive space allocation.
//!
//! A pass runs in two phases. [`LayoutTree::plan`] walks every node and
//! computes a [`Frame`] without side effects; [`LayoutTree::layout`] then
//! materializes each placement through a [`RegionHost`] and fires item hooks.
//! A space shortfall anywhere in the tree is found during planning, before any
//! region is touched.

use serde_json::json;

use crate::error::{LayoutError, Result, SpaceShortfall};
use crate::geometry::{Bounds, Size};
use crate::host::RegionHost;
use crate::logging::{LogLevel, json_kv, json_str};

use super::core::Direction;
use super::frame::{Frame, Placement};
use super::tree::{LayoutTree, LevelId};

impl<R> LayoutTree<R> {
    /// Compute every placement for a screen of `size`.
    ///
    /// Hidden items are still planned, covering their parent's whole area as
    /// background placements, so their hooks keep running.
    pub fn plan(&self, size: Size, supports_overlap: bool) -> Result<Frame> {
        let area = Bounds::from_size(size).ok_or(SpaceShortfall::EmptyScreen {
            width: size.width,
            height: size.height,
        })?;
        let correction = if supports_overlap { 0 } else { 1 };
        let mut placements = Vec::with_capacity(self.items.len());
        self.plan_level(LevelId::ROOT, area, false, correction, &mut placements)?;
        Ok(Frame { size, placements })
    }

    fn plan_level(
        &self,
        level: LevelId,
        area: Bounds,
        force_hidden: bool,
        correction: u32,
        out: &mut Vec<Placement>,
    ) -> Result<()> {
        let node = &self.levels[level.index()];
        let (length, axis_start, axis_end) = match node.direction {
            Direction::Horizontal => (area.width(), area.x0, area.x1),
            Direction::Vertical => (area.height(), area.y0, area.y1),
        };

        let hidden: Vec<bool> = node
            .items
            .iter()
            .map(|&id| force_hidden || self.is_hidden(id))
            .collect();

        let mut fixed = 0u32;
        let mut weights = 0u32;
        let mut last_visible = None;
        for (idx, &id) in node.items.iter().enumerate() {
            if hidden[idx] {
                continue;
            }
            let size = self.items[id.index()].size;
            fixed += size.fixed_cells().unwrap_or(0);
            weights += size.weight().unwrap_or(0);
            last_visible = Some(idx);
        }

        if fixed > length {
            return Err(SpaceShortfall::FixedOverflow {
                available: length,
                required: fixed,
            }
            .into());
        }
        let remaining = length - fixed;

        let (unit, leftover) = if weights > 0 {
            (remaining / weights, remaining % weights)
        } else {
            (0, 0)
        };
        if weights > 0 && unit == 0 {
            return Err(SpaceShortfall::ZeroUnit { remaining, weights }.into());
        }

        let mut cursor = u32::from(axis_start);
        for (idx, &id) in node.items.iter().enumerate() {
            let item = &self.items[id.index()];

            if hidden[idx] {
                match item.inner {
                    Some(inner) => self.plan_level(inner, area, true, correction, out)?,
                    None => out.push(Placement {
                        item: id,
                        name: item.name.clone(),
                        bounds: area,
                        background: true,
                    }),
                }
                continue;
            }

            let mut claim = match item.size.fixed_cells() {
                Some(cells) => cells,
                None => unit * item.size.weight().unwrap_or(0),
            };
            if last_visible == Some(idx) {
                claim += leftover;
            }

            let start = cursor as u16;
            let end = (cursor + claim - correction).min(u32::from(axis_end)) as u16;
            cursor += claim;

            let bounds = match node.direction {
                Direction::Horizontal => Bounds::new(start, area.y0, end, area.y1),
                Direction::Vertical => Bounds::new(area.x0, start, area.x1, end),
            };

            match item.inner {
                Some(inner) => self.plan_level(inner, bounds, false, correction, out)?,
                None => out.push(Placement {
                    item: id,
                    name: item.name.clone(),
                    bounds,
                    background: false,
                }),
            }
        }

        Ok(())
    }

    /// Run one allocation pass against `host`.
    ///
    /// The screen size is read from the host on every call. Newly created
    /// regions get their item's create hook, existing ones the update hook,
    /// and hidden regions are pushed to the back. The first failing hook or
    /// host call aborts the pass.
    pub fn layout<H>(&mut self, host: &mut H) -> Result<Frame>
    where
        H: RegionHost<Region = R>,
    {
        let size = host.screen_size();
        let result = self
            .plan(size, host.supports_overlap())
            .and_then(|frame| self.materialize(host, frame));

        match &result {
            Ok((frame, created)) => self.record_pass(frame, *created),
            Err(err) => self.record_failure(size, err),
        }
        result.map(|(frame, _)| frame)
    }

    fn materialize<H>(&mut self, host: &mut H, frame: Frame) -> Result<(Frame, usize)>
    where
        H: RegionHost<Region = R>,
    {
        let mut created = 0;
        for placement in &frame.placements {
            let (region, is_new) =
                host.create_or_update_region(&placement.name, placement.bounds)?;
            let node = &mut self.items[placement.item.index()];
            let hook = if is_new {
                created += 1;
                node.on_create.as_mut()
            } else {
                node.on_update.as_mut()
            };
            if let Some(hook) = hook {
                hook.call(region).map_err(|source| LayoutError::Hook {
                    region: placement.name.clone(),
                    source,
                })?;
            }
            if placement.background {
                host.set_region_background(&placement.name)?;
            }
        }
        Ok((frame, created))
    }

    fn record_pass(&self, frame: &Frame, created: usize) {
        let background = frame.background().count();
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_pass(frame.len(), created, background);
            }
        }
        self.log(
            LogLevel::Debug,
            "layout_pass",
            [
                json_kv("width", json!(frame.size.width)),
                json_kv("height", json!(frame.size.height)),
                json_kv("regions", json!(frame.len())),
                json_kv("created", json!(created)),
                json_kv("background", json!(background)),
            ],
        );
    }

    fn record_failure(&self, size: Size, err: &LayoutError) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_failure();
            }
        }
        self.log(
            LogLevel::Warn,
            "layout_failed",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
                json_str("kind", err.kind()),
                json_str("error", err.to_string()),
            ],
        );
    }
}
