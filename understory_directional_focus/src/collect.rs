// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate collection: walk a scope and gather focusable elements.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::occlusion::is_occluded;
use crate::tree::{FocusTree, element_bounds, is_ancestor_of, nearest_scroller};
use crate::types::Candidate;

/// Collect focus candidates under `root` (exclusive) into `out`.
///
/// Elements are visited in pre-order. An element becomes a candidate when it
/// is not `current`, passes [`FocusTree::is_focus_candidate`], and has
/// bounds. While an `active_scroller` is given, a candidate must also be
/// reachable: inside the active scroller's viewport, inside an outer scroller
/// that could bring it into view, or simply not occluded.
///
/// The walk descends into an element only when
/// [`FocusTree::is_focus_subtree`] allows it and the element is not waiting
/// to be engaged.
///
/// `out` is appended to, not cleared, so several scopes can be gathered into
/// one list.
pub fn collect_candidates<T: FocusTree + ?Sized>(
    tree: &T,
    root: T::Id,
    current: T::Id,
    active_scroller: Option<T::Id>,
    ignore_clipping: bool,
    directional_regions_only: bool,
    out: &mut Vec<Candidate<T::Id>>,
) {
    let mut stack: SmallVec<[T::Id; 32]> = SmallVec::new();
    push_children(tree, root, &mut stack);

    while let Some(id) = stack.pop() {
        if id != current
            && tree.is_focus_candidate(id)
            && let Some(bounds) = element_bounds(tree, id, ignore_clipping)
        {
            match active_scroller {
                None => out.push(Candidate::new(id, bounds)),
                Some(scroller) => {
                    if scrolls_into_view(tree, id, scroller) {
                        out.push(Candidate {
                            scroll_participant: true,
                            ..Candidate::new(id, bounds)
                        });
                    } else if !is_occluded(tree, id, bounds) {
                        out.push(Candidate::new(id, bounds));
                    }
                }
            }
        }

        if could_contain_candidates(tree, id, directional_regions_only) {
            push_children(tree, id, &mut stack);
        }
    }
}

/// Whether the walk should descend into `id`.
fn could_contain_candidates<T: FocusTree + ?Sized>(
    tree: &T,
    id: T::Id,
    directional_regions_only: bool,
) -> bool {
    if !tree.is_focus_subtree(id, directional_regions_only) {
        return false;
    }
    let engagement = tree.engagement(id);
    !engagement.enabled || engagement.engaged
}

/// Whether `id` sits in the viewport of `active`, or of a scroller enclosing
/// `active`.
fn scrolls_into_view<T: FocusTree + ?Sized>(tree: &T, id: T::Id, active: T::Id) -> bool {
    if nearest_scroller(tree, id) == Some(active) {
        return true;
    }
    let mut outer = nearest_scroller(tree, active);
    while let Some(scroller) = outer {
        if is_ancestor_of(tree, scroller, id) {
            return true;
        }
        outer = nearest_scroller(tree, scroller);
    }
    false
}

fn push_children<T: FocusTree + ?Sized>(tree: &T, id: T::Id, stack: &mut SmallVec<[T::Id; 32]>) {
    // Reverse so the stack pops children in document order.
    stack.extend(tree.children(id).iter().rev().copied());
}
