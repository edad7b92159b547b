use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::json;

use crate::error::{LayoutError, Result};
use crate::host::RegionHook;
use crate::logging::{LogLevel, event_with_fields, json_kv, json_str};
use crate::registry::Zone;

use super::config::LayoutConfig;
use super::core::{Direction, Item, Level, SizeSpec};

/// Stable handle to an item, valid for the lifetime of its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemId(u32);

impl ItemId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Handle to a level inside a tree. The root level is [`LevelId::ROOT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelId(u32);

impl LevelId {
    pub const ROOT: Self = Self(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

pub(crate) struct ItemNode<R> {
    pub(crate) name: String,
    pub(crate) size: SizeSpec,
    pub(crate) hidden: bool,
    pub(crate) inner: Option<LevelId>,
    pub(crate) on_create: Option<Box<dyn RegionHook<R>>>,
    pub(crate) on_update: Option<Box<dyn RegionHook<R>>>,
}

pub(crate) struct LevelNode {
    pub(crate) direction: Direction,
    pub(crate) items: Vec<ItemId>,
}

/// Read-only view of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemView<'a> {
    pub id: ItemId,
    pub name: &'a str,
    pub size: SizeSpec,
    /// The item's own flag.
    pub hidden: bool,
    /// Own flag, or every leaf beneath the item hidden.
    pub effectively_hidden: bool,
    pub inner: Option<LevelId>,
}

/// Layout tree flattened into an index arena.
///
/// Items and levels are stored in depth-first order and never move, so an
/// [`ItemId`] resolved once stays valid. Names are unique and resolve through
/// a flat index.
///
/// The tree does no locking of its own. Mutate it on the render thread, or
/// share it through [`crate::SharedLayout`].
pub struct LayoutTree<R = Zone> {
    pub(crate) items: Vec<ItemNode<R>>,
    pub(crate) levels: Vec<LevelNode>,
    index: HashMap<String, ItemId>,
    pub(crate) config: LayoutConfig,
}

impl<R> LayoutTree<R> {
    pub fn new(root: Level<R>) -> Result<Self> {
        Self::with_config(root, LayoutConfig::default())
    }

    /// Flatten `root`, rejecting names used more than once.
    pub fn with_config(root: Level<R>, config: LayoutConfig) -> Result<Self> {
        let mut tree = Self {
            items: Vec::new(),
            levels: Vec::new(),
            index: HashMap::new(),
            config,
        };
        tree.insert_level(root)?;
        Ok(tree)
    }

    fn insert_level(&mut self, level: Level<R>) -> Result<LevelId> {
        let id = LevelId(self.levels.len() as u32);
        self.levels.push(LevelNode {
            direction: level.direction,
            items: Vec::with_capacity(level.items.len()),
        });
        for item in level.items {
            let item_id = self.insert_item(item)?;
            self.levels[id.index()].items.push(item_id);
        }
        Ok(id)
    }

    fn insert_item(&mut self, item: Item<R>) -> Result<ItemId> {
        let Item {
            name,
            size,
            hidden,
            inner,
            on_create,
            on_update,
        } = item;

        if self.index.contains_key(&name) {
            return Err(LayoutError::DuplicateName(name));
        }

        let id = ItemId(self.items.len() as u32);
        self.index.insert(name.clone(), id);
        self.items.push(ItemNode {
            name,
            size,
            hidden,
            inner: None,
            on_create,
            on_update,
        });

        if let Some(level) = inner {
            let level_id = self.insert_level(level)?;
            self.items[id.index()].inner = Some(level_id);
        }
        Ok(id)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LayoutConfig {
        &mut self.config
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn root(&self) -> LevelId {
        LevelId::ROOT
    }

    /// Item names in depth-first, item-order traversal.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|node| node.name.as_str())
    }

    pub fn level_direction(&self, level: LevelId) -> Option<Direction> {
        self.levels.get(level.index()).map(|node| node.direction)
    }

    pub fn level_items(&self, level: LevelId) -> Option<&[ItemId]> {
        self.levels.get(level.index()).map(|node| node.items.as_slice())
    }

    /// Resolve `name` to its handle.
    pub fn find_item(&self, name: &str) -> Result<ItemId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::NotFound(name.to_string()))
    }

    pub fn item(&self, id: ItemId) -> Option<ItemView<'_>> {
        let node = self.items.get(id.index())?;
        Some(ItemView {
            id,
            name: &node.name,
            size: node.size,
            hidden: node.hidden,
            effectively_hidden: self.is_hidden(id),
            inner: node.inner,
        })
    }

    pub fn is_item_hidden(&self, name: &str) -> Result<bool> {
        let id = self.find_item(name)?;
        Ok(self.is_hidden(id))
    }

    pub(crate) fn is_hidden(&self, id: ItemId) -> bool {
        let node = &self.items[id.index()];
        if node.hidden {
            return true;
        }
        match node.inner {
            Some(level) => self.all_hidden(level),
            None => false,
        }
    }

    /// True when every item of `level` is hidden. Empty levels count as hidden.
    pub fn all_hidden(&self, level: LevelId) -> bool {
        self.levels
            .get(level.index())
            .map(|node| node.items.iter().all(|&id| self.is_hidden(id)))
            .unwrap_or(true)
    }

    pub fn toggle_item(&mut self, name: &str) -> Result<()> {
        let id = self.find_item(name)?;
        self.toggle(id)
    }

    pub fn hide_item(&mut self, name: &str, hidden: bool) -> Result<()> {
        let id = self.find_item(name)?;
        self.set_hidden(id, hidden)
    }

    /// Replace the size of `name`. Exactly one of `ratio` and `fixed` must be non-zero.
    pub fn resize_item(&mut self, name: &str, ratio: u16, fixed: u16) -> Result<()> {
        let id = self.find_item(name)?;
        let size =
            SizeSpec::from_parts(ratio, fixed).ok_or_else(|| LayoutError::InvalidSizeSpec {
                name: name.to_string(),
                ratio,
                fixed,
            })?;
        self.set_size(id, size)
    }

    pub fn set_item_size(&mut self, name: &str, size: SizeSpec) -> Result<()> {
        let id = self.find_item(name)?;
        self.set_size(id, size)
    }

    pub fn toggle(&mut self, id: ItemId) -> Result<()> {
        let node = self.node_mut(id)?;
        node.hidden = !node.hidden;
        let hidden = node.hidden;
        self.record_mutation(id, "toggle", [json_kv("hidden", hidden)]);
        Ok(())
    }

    pub fn set_hidden(&mut self, id: ItemId, hidden: bool) -> Result<()> {
        self.node_mut(id)?.hidden = hidden;
        self.record_mutation(id, "hide", [json_kv("hidden", hidden)]);
        Ok(())
    }

    pub fn set_size(&mut self, id: ItemId, size: SizeSpec) -> Result<()> {
        self.node_mut(id)?.size = size;
        self.record_mutation(id, "resize", [json_str("size", size.to_string())]);
        Ok(())
    }

    fn node_mut(&mut self, id: ItemId) -> Result<&mut ItemNode<R>> {
        self.items
            .get_mut(id.index())
            .ok_or_else(|| LayoutError::NotFound(id.to_string()))
    }

    fn record_mutation<const N: usize>(
        &self,
        id: ItemId,
        operation: &str,
        fields: [(String, serde_json::Value); N],
    ) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_mutation();
            }
        }
        let name = self.items[id.index()].name.as_str();
        let fields = [
            json_str("item", name),
            json_kv("operation", json!(operation)),
        ]
        .into_iter()
        .chain(fields);
        self.log(LogLevel::Info, "item_mutated", fields);
    }

    pub(crate) fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

impl<R> fmt::Debug for LayoutTree<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutTree")
            .field("items", &self.items.len())
            .field("levels", &self.levels.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{Logger, MemorySink};

    fn grid() -> LayoutTree {
        LayoutTree::new(Level::horizontal(vec![
            Item::ratio(1, "col1").with_inner(Level::vertical(vec![
                Item::ratio(1, "test11"),
                Item::ratio(1, "test12"),
            ])),
            Item::ratio(1, "col2").with_inner(Level::vertical(vec![
                Item::ratio(1, "test21"),
                Item::ratio(1, "test22"),
                Item::ratio(1, "test23"),
            ])),
        ]))
        .unwrap()
    }

    #[test]
    fn names_follow_depth_first_item_order() {
        let tree = grid();
        let names: Vec<_> = tree.names().collect();
        assert_eq!(
            names,
            vec!["col1", "test11", "test12", "col2", "test21", "test22", "test23"]
        );
    }

    #[test]
    fn find_item_resolves_nested_names() {
        let tree = grid();
        let id = tree.find_item("test22").unwrap();
        let view = tree.item(id).unwrap();
        assert_eq!(view.name, "test22");
        assert_eq!(view.size, SizeSpec::ratio(1).unwrap());
        assert!(view.inner.is_none());
    }

    #[test]
    fn unknown_name_is_not_found() {
        let tree = grid();
        let err = tree.find_item("missing").unwrap_err();
        assert!(matches!(err, LayoutError::NotFound(name) if name == "missing"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result: Result<LayoutTree> = LayoutTree::new(Level::horizontal(vec![
            Item::ratio(1, "a").with_inner(Level::vertical(vec![Item::ratio(1, "b")])),
            Item::ratio(1, "b"),
        ]));
        assert!(matches!(result, Err(LayoutError::DuplicateName(name)) if name == "b"));
    }

    #[test]
    fn sub_layout_is_hidden_only_when_every_leaf_is() {
        let mut tree = grid();
        assert!(!tree.is_item_hidden("col1").unwrap());

        tree.hide_item("test11", true).unwrap();
        assert!(!tree.is_item_hidden("col1").unwrap());

        tree.hide_item("test12", true).unwrap();
        assert!(tree.is_item_hidden("col1").unwrap());
        let col1 = tree.item(tree.find_item("col1").unwrap()).unwrap();
        assert!(!col1.hidden);
        assert!(col1.effectively_hidden);

        tree.toggle_item("test12").unwrap();
        assert!(!tree.is_item_hidden("col1").unwrap());
    }

    #[test]
    fn empty_level_is_vacuously_hidden() {
        let tree: LayoutTree = LayoutTree::new(Level::horizontal(vec![
            Item::ratio(1, "empty").with_inner(Level::vertical(Vec::new())),
            Item::ratio(1, "main"),
        ]))
        .unwrap();
        assert!(tree.is_item_hidden("empty").unwrap());
        assert!(!tree.all_hidden(tree.root()));
    }

    #[test]
    fn toggle_flips_own_flag() {
        let mut tree = grid();
        tree.toggle_item("test21").unwrap();
        assert!(tree.is_item_hidden("test21").unwrap());
        tree.toggle_item("test21").unwrap();
        assert!(!tree.is_item_hidden("test21").unwrap());
    }

    #[test]
    fn resize_replaces_size_spec() {
        let mut tree = grid();
        tree.resize_item("test21", 0, 4).unwrap();
        let id = tree.find_item("test21").unwrap();
        assert_eq!(tree.item(id).unwrap().size, SizeSpec::fixed(4).unwrap());

        tree.resize_item("test21", 3, 0).unwrap();
        assert_eq!(tree.item(id).unwrap().size, SizeSpec::ratio(3).unwrap());
    }

    #[test]
    fn resize_with_both_modes_keeps_prior_spec() {
        let mut tree = grid();
        let err = tree.resize_item("test21", 2, 5).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidSizeSpec { ratio: 2, fixed: 5, .. }
        ));
        let err = tree.resize_item("test21", 0, 0).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSizeSpec { .. }));

        let id = tree.find_item("test21").unwrap();
        assert_eq!(tree.item(id).unwrap().size, SizeSpec::ratio(1).unwrap());
    }

    #[test]
    fn mutations_on_unknown_names_change_nothing() {
        let mut tree = grid();
        assert!(matches!(
            tree.toggle_item("nope"),
            Err(LayoutError::NotFound(_))
        ));
        assert!(matches!(
            tree.hide_item("nope", true),
            Err(LayoutError::NotFound(_))
        ));
        assert!(matches!(
            tree.resize_item("nope", 1, 0),
            Err(LayoutError::NotFound(_))
        ));
        for name in tree.names().collect::<Vec<_>>() {
            assert!(!tree.is_item_hidden(name).unwrap());
        }
    }

    #[test]
    fn mutations_are_logged_and_counted() {
        let sink = MemorySink::new();
        let mut tree = grid();
        tree.config_mut().logger = Some(Logger::new(sink.clone()));
        tree.config_mut().enable_metrics();

        tree.toggle_item("test11").unwrap();
        tree.resize_item("test12", 0, 3).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "item_mutated");
        assert_eq!(events[0].field("item"), Some(&json!("test11")));
        assert_eq!(events[0].field("operation"), Some(&json!("toggle")));
        assert_eq!(events[1].field("size"), Some(&json!("fixed(3)")));

        let metrics = tree.config().metrics_handle().unwrap();
        assert_eq!(metrics.lock().unwrap().snapshot().mutations, 2);
    }
}
