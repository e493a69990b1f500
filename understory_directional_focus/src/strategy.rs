// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strategy resolution.

use crate::tree::FocusTree;
use crate::types::{Direction, NavigationStrategy, NavigationStrategyOverride};

/// Pick the scoring strategy for a move from `id` in `direction`.
///
/// - A concrete `caller_override` wins outright.
/// - [`NavigationStrategyOverride::Auto`] starts the lookup at the parent.
/// - Otherwise the per-direction preference is read from the element and
///   inherited through `Auto` values towards the root. Elements that carry
///   no preference at all end the lookup with
///   [`NavigationStrategy::Projection`], as does reaching the root.
pub fn resolve_strategy<T: FocusTree + ?Sized>(
    tree: &T,
    id: T::Id,
    direction: Direction,
    caller_override: NavigationStrategyOverride,
) -> NavigationStrategy {
    let mut current = id;
    if let Some(preference) = caller_override.preference() {
        if let Some(strategy) = preference.strategy() {
            return strategy;
        }
        // Auto: begin one level up.
        if let Some(parent) = tree.parent(id) {
            current = parent;
        }
    }

    loop {
        let logical = if tree.is_right_to_left(current) {
            direction.mirrored()
        } else {
            direction
        };
        let Some(preference) = tree.strategy_preference(current, logical) else {
            return NavigationStrategy::Projection;
        };
        if let Some(strategy) = preference.strategy() {
            return strategy;
        }
        match tree.parent(current) {
            Some(parent) => current = parent,
            None => return NavigationStrategy::Projection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ArenaNode, FocusArena, NodeFlags, NodeId};
    use crate::types::StrategyPreference;
    use kurbo::Rect;

    fn chain() -> (FocusArena, NodeId, NodeId, NodeId) {
        let mut tree = FocusArena::new();
        let root = tree.insert(None, ArenaNode::container(Rect::ZERO));
        let mid = tree.insert(Some(root), ArenaNode::container(Rect::ZERO));
        let leaf = tree.insert(Some(mid), ArenaNode::focusable(Rect::ZERO));
        (tree, root, mid, leaf)
    }

    #[test]
    fn defaults_to_projection() {
        let (tree, _, _, leaf) = chain();
        assert_eq!(
            resolve_strategy(&tree, leaf, Direction::Down, NavigationStrategyOverride::None),
            NavigationStrategy::Projection
        );
    }

    #[test]
    fn concrete_override_wins() {
        let (mut tree, _, _, leaf) = chain();
        tree.set_strategy(leaf, Direction::Down, StrategyPreference::Projection);
        assert_eq!(
            resolve_strategy(
                &tree,
                leaf,
                Direction::Down,
                NavigationStrategyOverride::RectilinearDistance
            ),
            NavigationStrategy::RectilinearDistance
        );
    }

    #[test]
    fn auto_values_inherit_from_ancestors() {
        let (mut tree, root, _, leaf) = chain();
        tree.set_strategy(root, Direction::Down, StrategyPreference::NavigationDirectionDistance);
        assert_eq!(
            resolve_strategy(&tree, leaf, Direction::Down, NavigationStrategyOverride::None),
            NavigationStrategy::NavigationDirectionDistance
        );
        // Other directions are independent.
        assert_eq!(
            resolve_strategy(&tree, leaf, Direction::Up, NavigationStrategyOverride::None),
            NavigationStrategy::Projection
        );
    }

    #[test]
    fn auto_override_skips_the_element_itself() {
        let (mut tree, _, mid, leaf) = chain();
        tree.set_strategy(leaf, Direction::Left, StrategyPreference::RectilinearDistance);
        tree.set_strategy(mid, Direction::Left, StrategyPreference::NavigationDirectionDistance);
        assert_eq!(
            resolve_strategy(&tree, leaf, Direction::Left, NavigationStrategyOverride::None),
            NavigationStrategy::RectilinearDistance
        );
        assert_eq!(
            resolve_strategy(&tree, leaf, Direction::Left, NavigationStrategyOverride::Auto),
            NavigationStrategy::NavigationDirectionDistance
        );
    }

    #[test]
    fn elements_without_preferences_resolve_to_projection() {
        let (mut tree, root, _, leaf) = chain();
        tree.set_strategy(root, Direction::Right, StrategyPreference::RectilinearDistance);
        tree.node_mut(leaf).strategies = None;
        assert_eq!(
            resolve_strategy(&tree, leaf, Direction::Right, NavigationStrategyOverride::None),
            NavigationStrategy::Projection
        );
    }

    #[test]
    fn right_to_left_reads_the_mirrored_preference() {
        let (mut tree, _, _, leaf) = chain();
        tree.set_flags(leaf, NodeFlags::RIGHT_TO_LEFT, true);
        tree.set_strategy(leaf, Direction::Left, StrategyPreference::RectilinearDistance);
        assert_eq!(
            resolve_strategy(&tree, leaf, Direction::Right, NavigationStrategyOverride::None),
            NavigationStrategy::RectilinearDistance
        );
    }
}
