// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit directional overrides and bubbling.
//!
//! An element may name its next focus target for a direction. The current
//! element's own override short-circuits the search. Overrides on ancestors
//! act as a fallback: when the geometric winner would leave the subtree of
//! the nearest ancestor carrying an override (the *override root*), the
//! override target is used instead.

use crate::tree::{FocusTree, is_ancestor_of};
use crate::types::Direction;

/// Resolve the `direction` override of `id`.
///
/// Left and Right are mirrored for right-to-left elements. Returns `None`
/// when there is no override, when the target cannot take focus (unless
/// `ignore_focusability` is set), or when the target lies outside
/// `search_root`.
pub fn direction_override<T: FocusTree + ?Sized>(
    tree: &T,
    id: T::Id,
    search_root: Option<T::Id>,
    direction: Direction,
    ignore_focusability: bool,
) -> Option<T::Id> {
    let logical = if tree.is_right_to_left(id) {
        direction.mirrored()
    } else {
        direction
    };
    let target = tree.directional_override(id, logical)?;
    if !ignore_focusability && !tree.is_focus_candidate(target) {
        return None;
    }
    if let Some(root) = search_root
        && !is_ancestor_of(tree, root, target)
    {
        return None;
    }
    Some(target)
}

/// The nearest element at or above `id` with an override for `direction`,
/// or the top of the tree when there is none.
pub fn override_root<T: FocusTree + ?Sized>(
    tree: &T,
    id: T::Id,
    search_root: Option<T::Id>,
    direction: Direction,
) -> T::Id {
    let mut current = id;
    loop {
        if direction_override(tree, current, search_root, direction, false).is_some() {
            return current;
        }
        match tree.parent(current) {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}

/// Substitute an ancestor override for `candidate` when `candidate` escapes
/// the override root's subtree.
///
/// A `None` candidate stays `None`: ancestor overrides only redirect a move
/// that found something.
pub fn try_bubble<T: FocusTree + ?Sized>(
    tree: &T,
    id: T::Id,
    candidate: Option<T::Id>,
    search_root: Option<T::Id>,
    direction: Direction,
) -> Option<T::Id> {
    let candidate = candidate?;
    let root = override_root(tree, id, search_root, direction);
    match direction_override(tree, root, search_root, direction, false) {
        Some(target) if !is_ancestor_of(tree, root, candidate) => {
            tracing::trace!(?root, ?target, "bubbling to ancestor override");
            Some(target)
        }
        _ => Some(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ArenaNode, FocusArena, NodeFlags, NodeId};
    use kurbo::Rect;

    struct Fixture {
        tree: FocusArena,
        panel: NodeId,
        a: NodeId,
        inner: NodeId,
        outside: NodeId,
    }

    // root
    // ├── panel (override Right -> outside)
    // │   ├── a
    // │   └── inner
    // └── outside
    fn fixture() -> Fixture {
        let mut tree = FocusArena::new();
        let root = tree.insert(None, ArenaNode::container(Rect::new(0.0, 0.0, 400.0, 100.0)));
        let panel = tree.insert(Some(root), ArenaNode::container(Rect::new(0.0, 0.0, 200.0, 100.0)));
        let a = tree.insert(Some(panel), ArenaNode::focusable(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let inner = tree.insert(Some(panel), ArenaNode::focusable(Rect::new(100.0, 0.0, 200.0, 100.0)));
        let outside = tree.insert(Some(root), ArenaNode::focusable(Rect::new(300.0, 0.0, 400.0, 100.0)));
        tree.set_override(panel, Direction::Right, Some(outside));
        Fixture {
            tree,
            panel,
            a,
            inner,
            outside,
        }
    }

    #[test]
    fn override_respects_focusability_and_scope() {
        let mut f = fixture();
        assert_eq!(
            direction_override(&f.tree, f.panel, None, Direction::Right, false),
            Some(f.outside)
        );
        assert_eq!(
            direction_override(&f.tree, f.panel, Some(f.panel), Direction::Right, true),
            None
        );

        f.tree.set_flags(f.outside, NodeFlags::ENABLED, false);
        assert_eq!(
            direction_override(&f.tree, f.panel, None, Direction::Right, false),
            None
        );
        assert_eq!(
            direction_override(&f.tree, f.panel, None, Direction::Right, true),
            Some(f.outside)
        );
    }

    #[test]
    fn right_to_left_mirrors_horizontal_overrides() {
        let mut f = fixture();
        f.tree.set_flags(f.panel, NodeFlags::RIGHT_TO_LEFT, true);
        assert_eq!(
            direction_override(&f.tree, f.panel, None, Direction::Left, false),
            Some(f.outside)
        );
        assert_eq!(
            direction_override(&f.tree, f.panel, None, Direction::Right, false),
            None
        );
    }

    #[test]
    fn override_root_walks_up_inclusively() {
        let f = fixture();
        assert_eq!(override_root(&f.tree, f.a, None, Direction::Right), f.panel);
        assert_eq!(override_root(&f.tree, f.panel, None, Direction::Right), f.panel);
        // No override anywhere for Left: the top of the tree.
        assert_eq!(override_root(&f.tree, f.a, None, Direction::Left), f.tree.root());
    }

    #[test]
    fn bubbling_keeps_candidates_inside_the_override_root() {
        let f = fixture();
        assert_eq!(
            try_bubble(&f.tree, f.a, Some(f.inner), None, Direction::Right),
            Some(f.inner)
        );
    }

    #[test]
    fn bubbling_replaces_candidates_escaping_the_override_root() {
        let mut f = fixture();
        let stray = f.tree.insert(
            Some(f.tree.root()),
            ArenaNode::focusable(Rect::new(200.0, 0.0, 300.0, 100.0)),
        );
        assert_eq!(
            try_bubble(&f.tree, f.a, Some(stray), None, Direction::Right),
            Some(f.outside)
        );
    }

    #[test]
    fn bubbling_never_invents_a_result() {
        let f = fixture();
        assert_eq!(try_bubble(&f.tree, f.a, None, None, Direction::Right), None);
    }
}
