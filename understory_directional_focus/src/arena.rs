// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small arena-backed [`FocusTree`].
//!
//! [`FocusArena`] stores just enough per-node state to drive the navigator:
//! bounds, flags, overrides, strategy preferences, scrollability, and the
//! popups opened while a node is engaged. It is useful for tests, for
//! prototyping, and for hosts that mirror their focusable elements into a
//! separate structure.
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_directional_focus::arena::{ArenaNode, FocusArena, NodeFlags};
//! use understory_directional_focus::{Direction, DirectionalNavigator, QueryOptions};
//!
//! let mut tree = FocusArena::new();
//! let root = tree.insert(None, ArenaNode::container(Rect::new(0.0, 0.0, 200.0, 100.0)));
//! let a = tree.insert(Some(root), ArenaNode::focusable(Rect::new(0.0, 0.0, 100.0, 100.0)));
//! let b = tree.insert(Some(root), ArenaNode::focusable(Rect::new(100.0, 0.0, 200.0, 100.0)));
//!
//! let mut nav = DirectionalNavigator::new();
//! let opts = QueryOptions::default();
//! assert_eq!(nav.navigate(&tree, a, Direction::Right, None, &opts), Some(b));
//! assert_eq!(nav.navigate(&tree, b, Direction::Left, None, &opts), Some(a));
//! ```

use alloc::vec::Vec;

use kurbo::Rect;

use crate::tree::{Engagement, FocusTree, HitTestError, Scrollability};
use crate::types::{Direction, StrategyPreference};

/// Identifier for a node in a [`FocusArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-node state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u16 {
        /// Node is visible.
        const VISIBLE = 1 << 0;
        /// Node is enabled.
        const ENABLED = 1 << 1;
        /// Node is a potential tab stop.
        const FOCUSABLE = 1 << 2;
        /// Do not search this node's descendants.
        const SKIP_SUBTREE = 1 << 3;
        /// Node is a declared directional region.
        const DIRECTIONAL_REGION = 1 << 4;
        /// Node lays out right to left.
        const RIGHT_TO_LEFT = 1 << 5;
        /// Node is covered by another surface.
        const OCCLUDED = 1 << 6;
        /// Hit testing this node fails.
        const HIT_TEST_FAILS = 1 << 7;
        /// Node has no box of its own; its parent stands in for layout.
        const INLINE = 1 << 8;
        /// Node requires engagement before its content takes focus.
        const ENGAGEMENT = 1 << 9;
        /// Node is engaged.
        const ENGAGED = 1 << 10;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::ENABLED
    }
}

/// Per-node data stored in a [`FocusArena`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArenaNode {
    /// Bounds in arena space; `None` when unavailable.
    pub bounds: Option<Rect>,
    /// State flags.
    pub flags: NodeFlags,
    /// Scrollability, for scroller nodes.
    pub scroll: Option<Scrollability>,
    /// Strategy preferences indexed Left, Right, Up, Down; `None` when the
    /// node does not carry strategy preferences.
    pub strategies: Option<[StrategyPreference; 4]>,
    /// Explicit overrides indexed Left, Right, Up, Down.
    pub overrides: [Option<NodeId>; 4],
}

impl ArenaNode {
    /// A visible, enabled, non-focusable node.
    pub fn container(bounds: Rect) -> Self {
        Self {
            bounds: Some(bounds),
            strategies: Some([StrategyPreference::Auto; 4]),
            ..Self::default()
        }
    }

    /// A visible, enabled, focusable node.
    pub fn focusable(bounds: Rect) -> Self {
        Self {
            flags: NodeFlags::default() | NodeFlags::FOCUSABLE,
            ..Self::container(bounds)
        }
    }

    /// A scroller node that can scroll along the given axes.
    pub fn scroller(bounds: Rect, scroll: Scrollability) -> Self {
        Self {
            scroll: Some(scroll),
            ..Self::container(bounds)
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    node: ArenaNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    popups: Vec<NodeId>,
}

/// An append-only tree of [`ArenaNode`]s implementing [`FocusTree`].
///
/// The first node inserted without a parent is the tree root. Further
/// parentless nodes are detached roots, typically popups registered with
/// [`FocusArena::add_popup`].
#[derive(Clone, Debug, Default)]
pub struct FocusArena {
    slots: Vec<Slot>,
}

impl FocusArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or as a root) and return its id.
    pub fn insert(&mut self, parent: Option<NodeId>, node: ArenaNode) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Arena ids are 32-bit indices."
        )]
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            node,
            parent,
            children: Vec::new(),
            popups: Vec::new(),
        });
        if let Some(p) = parent {
            self.slots[p.idx()].children.push(id);
        }
        id
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena has no nodes.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Node data for `id`.
    pub fn node(&self, id: NodeId) -> &ArenaNode {
        &self.slots[id.idx()].node
    }

    /// Mutable node data for `id`.
    pub fn node_mut(&mut self, id: NodeId) -> &mut ArenaNode {
        &mut self.slots[id.idx()].node
    }

    /// Replace the bounds of `id`.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Option<Rect>) {
        self.node_mut(id).bounds = bounds;
    }

    /// Insert or remove flags on `id`.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags, value: bool) {
        self.node_mut(id).flags.set(flags, value);
    }

    /// Set the explicit `direction` override of `id`.
    ///
    /// Directions other than the four cardinal ones are ignored.
    pub fn set_override(&mut self, id: NodeId, direction: Direction, target: Option<NodeId>) {
        if let Some(slot) = self.node_mut(id).overrides.get_mut(direction.index()) {
            *slot = target;
        }
    }

    /// Set the `direction` strategy preference of `id`.
    pub fn set_strategy(&mut self, id: NodeId, direction: Direction, preference: StrategyPreference) {
        let node = self.node_mut(id);
        let strategies = node
            .strategies
            .get_or_insert([StrategyPreference::Auto; 4]);
        if let Some(slot) = strategies.get_mut(direction.index()) {
            *slot = preference;
        }
    }

    /// Register `popup` as opened while `owner` is engaged.
    pub fn add_popup(&mut self, owner: NodeId, popup: NodeId) {
        self.slots[owner.idx()].popups.push(popup);
    }

    fn flags(&self, id: NodeId) -> NodeFlags {
        self.node(id).flags
    }
}

impl FocusTree for FocusArena {
    type Id = NodeId;

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.idx()].parent
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.idx()].children
    }

    fn is_focus_candidate(&self, id: NodeId) -> bool {
        self.flags(id)
            .contains(NodeFlags::VISIBLE | NodeFlags::ENABLED | NodeFlags::FOCUSABLE)
    }

    fn is_focus_subtree(&self, id: NodeId, directional_regions_only: bool) -> bool {
        let flags = self.flags(id);
        flags.contains(NodeFlags::VISIBLE | NodeFlags::ENABLED)
            && !flags.contains(NodeFlags::SKIP_SUBTREE)
            && (!directional_regions_only || flags.contains(NodeFlags::DIRECTIONAL_REGION))
    }

    fn layout_target(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while self.flags(current).contains(NodeFlags::INLINE) {
            match self.parent(current) {
                Some(p) => current = p,
                None => break,
            }
        }
        current
    }

    fn bounds(&self, id: NodeId, _ignore_clipping: bool) -> Option<Rect> {
        self.node(id).bounds
    }

    fn hit_test_occluded(&self, id: NodeId, _bounds: Rect) -> Result<bool, HitTestError> {
        let flags = self.flags(id);
        if flags.contains(NodeFlags::HIT_TEST_FAILS) {
            return Err(HitTestError::Unavailable);
        }
        Ok(flags.contains(NodeFlags::OCCLUDED))
    }

    fn is_scroller(&self, id: NodeId) -> bool {
        self.node(id).scroll.is_some()
    }

    fn scrollability(&self, id: NodeId) -> Scrollability {
        self.node(id).scroll.unwrap_or_default()
    }

    fn directional_override(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.node(id)
            .overrides
            .get(direction.index())
            .copied()
            .flatten()
    }

    fn strategy_preference(&self, id: NodeId, direction: Direction) -> Option<StrategyPreference> {
        let strategies = self.node(id).strategies?;
        strategies.get(direction.index()).copied()
    }

    fn is_right_to_left(&self, id: NodeId) -> bool {
        self.flags(id).contains(NodeFlags::RIGHT_TO_LEFT)
    }

    fn engagement(&self, id: NodeId) -> Engagement {
        let flags = self.flags(id);
        Engagement {
            enabled: flags.contains(NodeFlags::ENGAGEMENT),
            engaged: flags.contains(NodeFlags::ENGAGED),
        }
    }

    fn engaged_popups(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.idx()].popups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_links_parent_and_children() {
        let mut tree = FocusArena::new();
        let root = tree.insert(None, ArenaNode::container(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let a = tree.insert(Some(root), ArenaNode::focusable(Rect::new(0.0, 0.0, 5.0, 5.0)));
        let b = tree.insert(Some(root), ArenaNode::focusable(Rect::new(5.0, 0.0, 10.0, 5.0)));

        assert_eq!(tree.root(), root);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(b), Some(root));
        assert_eq!(tree.len(), 3);
        assert!(tree.is_focus_candidate(a));
        assert!(!tree.is_focus_candidate(root));
    }

    #[test]
    fn inline_nodes_resolve_to_containing_block() {
        let mut tree = FocusArena::new();
        let root = tree.insert(None, ArenaNode::container(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let block = tree.insert(Some(root), ArenaNode::container(Rect::new(1.0, 1.0, 9.0, 9.0)));
        let run = tree.insert(Some(block), ArenaNode::focusable(Rect::ZERO));
        tree.set_flags(run, NodeFlags::INLINE, true);

        assert_eq!(tree.layout_target(run), block);
        assert_eq!(tree.layout_target(block), block);
    }

    #[test]
    fn subtree_rules_follow_flags() {
        let mut tree = FocusArena::new();
        let root = tree.insert(None, ArenaNode::container(Rect::ZERO));
        let region = tree.insert(Some(root), ArenaNode::container(Rect::ZERO));
        tree.set_flags(region, NodeFlags::DIRECTIONAL_REGION, true);

        assert!(tree.is_focus_subtree(region, true));
        assert!(!tree.is_focus_subtree(root, true));
        assert!(tree.is_focus_subtree(root, false));

        tree.set_flags(root, NodeFlags::SKIP_SUBTREE, true);
        assert!(!tree.is_focus_subtree(root, false));
    }

    #[test]
    fn hit_test_failure_is_reported() {
        let mut tree = FocusArena::new();
        let root = tree.insert(None, ArenaNode::focusable(Rect::ZERO));
        assert_eq!(tree.hit_test_occluded(root, Rect::ZERO), Ok(false));
        tree.set_flags(root, NodeFlags::HIT_TEST_FAILS, true);
        assert_eq!(
            tree.hit_test_occluded(root, Rect::ZERO),
            Err(HitTestError::Unavailable)
        );
    }
}
