// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Occlusion gate.

use kurbo::Rect;

use crate::tree::FocusTree;

/// Whether `id`, occupying `bounds`, is hidden behind another surface.
///
/// The query is made against the element's layout target. A failing hit
/// test counts as occluded.
pub fn is_occluded<T: FocusTree + ?Sized>(tree: &T, id: T::Id, bounds: Rect) -> bool {
    let target = tree.layout_target(id);
    match tree.hit_test_occluded(target, bounds) {
        Ok(occluded) => occluded,
        Err(err) => {
            tracing::warn!(element = ?id, %err, "occlusion test failed; treating element as occluded");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ArenaNode, FocusArena, NodeFlags};

    #[test]
    fn follows_the_hit_test_result() {
        let mut tree = FocusArena::new();
        let root = tree.insert(None, ArenaNode::container(Rect::ZERO));
        let a = tree.insert(Some(root), ArenaNode::focusable(Rect::ZERO));
        assert!(!is_occluded(&tree, a, Rect::ZERO));
        tree.set_flags(a, NodeFlags::OCCLUDED, true);
        assert!(is_occluded(&tree, a, Rect::ZERO));
    }

    #[test]
    fn failure_counts_as_occluded() {
        let mut tree = FocusArena::new();
        let root = tree.insert(None, ArenaNode::container(Rect::ZERO));
        let a = tree.insert(Some(root), ArenaNode::focusable(Rect::ZERO));
        tree.set_flags(a, NodeFlags::HIT_TEST_FAILS, true);
        assert!(is_occluded(&tree, a, Rect::ZERO));
    }

    #[test]
    fn inline_elements_ask_their_containing_block() {
        let mut tree = FocusArena::new();
        let root = tree.insert(None, ArenaNode::container(Rect::ZERO));
        let block = tree.insert(Some(root), ArenaNode::container(Rect::ZERO));
        let run = tree.insert(Some(block), ArenaNode::focusable(Rect::ZERO));
        tree.set_flags(run, NodeFlags::INLINE, true);
        tree.set_flags(block, NodeFlags::OCCLUDED, true);
        assert!(is_occluded(&tree, run, Rect::ZERO));
    }
}
