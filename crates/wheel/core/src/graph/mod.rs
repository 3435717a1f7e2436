//! Conflict graph builder.
//!
//! Maps every `Item`-category group touched by a batch of items to the groups
//! it blocks, then assigns each node a sorting priority (how deep its blocking
//! chain runs) and a `blocks_subset` flag (whether an already worn item
//! transitively blocks something in the new batch). The orchestrator uses the
//! latter to pick items that must come off first; [`fortune_items_sort`] uses
//! the former to order a batch so that nothing blocks a later item.
mod error;

use std::collections::{BTreeMap, BTreeSet};

pub use error::GraphError;

use crate::env::{AssetName, GroupName, HostEnv, OracleError};
use crate::state::{Character, Effect, WornItem};

/// Minimal view of an item as needed by the graph builder.
pub trait GraphItem {
    fn group(&self) -> &GroupName;
    fn asset_name(&self) -> &AssetName;
    fn type_name(&self) -> Option<&str>;
}

impl GraphItem for WornItem {
    fn group(&self) -> &GroupName {
        &self.group
    }

    fn asset_name(&self) -> &AssetName {
        &self.asset
    }

    fn type_name(&self) -> Option<&str> {
        self.property.type_name.as_deref()
    }
}

impl<T: GraphItem + ?Sized> GraphItem for &T {
    fn group(&self) -> &GroupName {
        (**self).group()
    }

    fn asset_name(&self) -> &AssetName {
        (**self).asset_name()
    }

    fn type_name(&self) -> Option<&str> {
        (**self).type_name()
    }
}

/// Per-group node of a [`BlockGraph`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphNode {
    /// Groups blocked by the item occupying this group.
    pub blocked: BTreeSet<GroupName>,
    /// Whether the node came from the currently worn items.
    pub from_superset: bool,
    pub priority: Option<i32>,
    pub blocks_subset: Option<bool>,
}

impl GraphNode {
    fn resolved(&self) -> Option<(i32, bool)> {
        Some((self.priority?, self.blocks_subset?))
    }
}

/// Directed blocking graph keyed by group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockGraph {
    nodes: BTreeMap<GroupName, GraphNode>,
}

/// Contribution of a blocked group that has no node.
const ABSENT_PRIORITY: i32 = -1;

#[derive(Clone, Copy)]
enum Visit {
    InProgress,
    Done(i32, bool),
}

impl BlockGraph {
    pub fn node(&self, group: &GroupName) -> Option<&GraphNode> {
        self.nodes.get(group)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupName, &GraphNode)> {
        self.nodes.iter()
    }

    /// Sorting priority of `group`, `None` when the group has no node.
    pub fn sort_priority(&self, group: &GroupName) -> Option<i32> {
        self.nodes.get(group).and_then(|node| node.priority)
    }

    /// Whether the worn item in `group` blocks part of the new batch.
    pub fn blocks_subset(&self, group: &GroupName) -> bool {
        self.nodes
            .get(group)
            .and_then(|node| node.blocks_subset)
            .unwrap_or(false)
    }

    /// Assigns priorities and `blocks_subset` flags to every node.
    fn resolve(&mut self) -> Result<(), GraphError> {
        let mut visits: BTreeMap<GroupName, Visit> = BTreeMap::new();
        let groups: Vec<GroupName> = self.nodes.keys().cloned().collect();
        for group in &groups {
            self.visit(group, &mut visits)?;
        }

        for (group, visit) in visits {
            if let (Visit::Done(priority, blocks_subset), Some(node)) =
                (visit, self.nodes.get_mut(&group))
            {
                node.priority = Some(priority);
                node.blocks_subset = Some(blocks_subset);
            }
        }
        Ok(())
    }

    /// Depth-first traversal returning `(priority, blocks_subset)` of `group`.
    fn visit(
        &self,
        group: &GroupName,
        visits: &mut BTreeMap<GroupName, Visit>,
    ) -> Result<(i32, bool), GraphError> {
        let Some(node) = self.nodes.get(group) else {
            return Ok((ABSENT_PRIORITY, false));
        };

        match visits.get(group) {
            Some(Visit::Done(priority, blocks_subset)) => return Ok((*priority, *blocks_subset)),
            Some(Visit::InProgress) => {
                return Err(GraphError::CyclicBlockGraph {
                    group: group.clone(),
                });
            }
            None => {}
        }

        // Enclosing items are resolved at construction time.
        if let Some(resolved) = node.resolved() {
            visits.insert(group.clone(), Visit::Done(resolved.0, resolved.1));
            return Ok(resolved);
        }

        if node.blocked.is_empty() {
            visits.insert(group.clone(), Visit::Done(0, false));
            return Ok((0, false));
        }

        visits.insert(group.clone(), Visit::InProgress);
        let mut max_priority = ABSENT_PRIORITY;
        let mut any_child = false;
        for child in &node.blocked {
            let (priority, child_blocks_subset) = self.visit(child, visits)?;
            max_priority = max_priority.max(priority);
            let child_is_new = self
                .nodes
                .get(child)
                .is_some_and(|child_node| !child_node.from_superset);
            any_child |= child_blocks_subset || child_is_new;
        }

        let resolved = (1 + max_priority, node.from_superset && any_child);
        visits.insert(group.clone(), Visit::Done(resolved.0, resolved.1));
        Ok(resolved)
    }
}

/// Rejects item lists with entries lacking a group or an asset name.
///
/// # Errors
///
/// Returns `GraphError::InvalidItemList` for the first malformed entry.
pub fn validate_item_list<I: GraphItem>(items: &[I]) -> Result<(), GraphError> {
    for (index, item) in items.iter().enumerate() {
        if item.group().is_empty() {
            return Err(GraphError::invalid(index, "item has no group"));
        }
        if item.asset_name().is_empty() {
            return Err(GraphError::invalid(index, "item has no asset name"));
        }
    }
    Ok(())
}

/// Builds the block graph of `new_items` and `current_items`.
///
/// New items are visited first and the first occurrence of a group wins, so a
/// worn item sharing a group with a new one never gets a node of its own.
/// Groups outside the `Item` category are skipped.
///
/// # Errors
///
/// Fails on malformed lists, unknown assets, cyclic block declarations and
/// missing oracles.
pub fn items_arg_sort<N, C>(
    new_items: &[N],
    character: &Character,
    current_items: &[C],
    env: &HostEnv<'_>,
) -> Result<BlockGraph, GraphError>
where
    N: GraphItem,
    C: GraphItem,
{
    validate_item_list(new_items)?;
    validate_item_list(current_items)?;

    let assets = env.assets()?;
    let mut graph = BlockGraph::default();
    let new_iter = new_items.iter().map(|item| (item as &dyn GraphItem, false));
    let current_iter = current_items
        .iter()
        .map(|item| (item as &dyn GraphItem, true));

    for (item, from_superset) in new_iter.chain(current_iter) {
        if graph.nodes.contains_key(item.group()) {
            continue;
        }

        let asset = assets
            .asset(item.group(), item.asset_name())
            .ok_or_else(|| GraphError::UnknownAsset {
                group: item.group().clone(),
                name: item.asset_name().clone(),
            })?;
        let group = assets
            .group(&asset.group)
            .ok_or_else(|| OracleError::GroupNotFound(asset.group.clone()))?;
        if !group.is_item() {
            continue;
        }

        let property = assets.baseline_property(&asset, character, item.type_name())?;
        let mut node = GraphNode {
            blocked: asset
                .block
                .iter()
                .chain(property.block.iter())
                .cloned()
                .collect(),
            from_superset,
            priority: None,
            blocks_subset: None,
        };

        if asset.encloses() || property.has_effect(Effect::Enclose) {
            node.priority = Some(i32::try_from(assets.group_count()).unwrap_or(i32::MAX));
            node.blocks_subset = Some(from_superset);
        }
        graph.nodes.insert(item.group().clone(), node);
    }

    graph.resolve()?;
    tracing::trace!(nodes = graph.len(), "block graph resolved");
    Ok(graph)
}

/// Returns the items of `current_items` that block part of `new_items`.
///
/// # Errors
///
/// See [`items_arg_sort`].
pub fn block_superset<N, C>(
    new_items: &[N],
    current_items: &[C],
    character: &Character,
    env: &HostEnv<'_>,
) -> Result<Vec<C>, GraphError>
where
    N: GraphItem,
    C: GraphItem + Clone,
{
    let graph = items_arg_sort(new_items, character, current_items, env)?;
    Ok(current_items
        .iter()
        .filter(|item| graph.blocks_subset(item.group()))
        .cloned()
        .collect())
}

/// Stable-sorts `items` by ascending block priority; groups without a node go last.
///
/// # Errors
///
/// See [`items_arg_sort`].
pub fn fortune_items_sort<N>(
    items: &[N],
    character: &Character,
    env: &HostEnv<'_>,
) -> Result<Vec<N>, GraphError>
where
    N: GraphItem + Clone,
{
    let graph = items_arg_sort::<N, WornItem>(items, character, &[], env)?;
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| match graph.sort_priority(item.group()) {
        Some(priority) => (0, priority),
        None => (1, 0),
    });
    Ok(sorted)
}
