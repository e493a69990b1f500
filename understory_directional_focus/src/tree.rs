// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host tree capability consumed by the navigator.

use core::fmt;
use core::hash::Hash;

use kurbo::Rect;

use crate::types::{Direction, StrategyPreference};

/// Which axes a scroller can scroll along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scrollability {
    /// Content can scroll along the x axis.
    pub horizontal: bool,
    /// Content can scroll along the y axis.
    pub vertical: bool,
}

impl Scrollability {
    /// Scrollable along both axes.
    pub const BOTH: Self = Self {
        horizontal: true,
        vertical: true,
    };

    /// Whether content can scroll along the axis of `direction`.
    pub const fn allows(self, direction: Direction) -> bool {
        if direction.is_horizontal() {
            self.horizontal
        } else if direction.is_vertical() {
            self.vertical
        } else {
            false
        }
    }
}

/// Focus engagement state of an element.
///
/// An engagement-enabled element keeps directional navigation outside of its
/// subtree until it is engaged; while engaged, navigation is confined to it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Engagement {
    /// The element requires engagement before its content can take focus.
    pub enabled: bool,
    /// The element is currently engaged.
    pub engaged: bool,
}

/// Why a hit-test collaborator could not answer an occlusion query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitTestError {
    /// The element is not attached to a hit-testable root.
    Detached,
    /// The hit-test service is not available right now.
    Unavailable,
}

impl fmt::Display for HitTestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => f.write_str("element is not attached to a hit-testable root"),
            Self::Unavailable => f.write_str("hit testing is unavailable"),
        }
    }
}

impl core::error::Error for HitTestError {}

/// Read-only view of a host UI tree.
///
/// The navigator borrows an implementation for the duration of one query and
/// never retains element handles beyond it (the failure cache stores handles
/// as opaque keys, and must be cleared whenever the tree changes).
///
/// Only [`root`](Self::root), [`parent`](Self::parent),
/// [`children`](Self::children), [`is_focus_candidate`](Self::is_focus_candidate)
/// and [`bounds`](Self::bounds) are required; the remaining methods default
/// to "feature not present".
pub trait FocusTree {
    /// Opaque element handle.
    type Id: Copy + Eq + Hash + fmt::Debug;

    /// The top of the tree; the default search scope.
    fn root(&self) -> Self::Id;

    /// Parent of `id`, or `None` at the top of the tree.
    fn parent(&self, id: Self::Id) -> Option<Self::Id>;

    /// Children of `id` in document order.
    fn children(&self, id: Self::Id) -> &[Self::Id];

    /// Whether `id` may receive focus: visible, enabled, a potential tab stop,
    /// and accepted by any remote/gamepad focus policy of the host.
    fn is_focus_candidate(&self, id: Self::Id) -> bool;

    /// Whether the subtree under `id` could contain focusable content.
    ///
    /// When `directional_regions_only` is set, only declared directional
    /// regions qualify.
    fn is_focus_subtree(&self, id: Self::Id, directional_regions_only: bool) -> bool {
        let _ = (id, directional_regions_only);
        true
    }

    /// The element whose layout box stands for `id`.
    ///
    /// Inline and text-run elements have no box of their own and should
    /// return their containing block here.
    fn layout_target(&self, id: Self::Id) -> Self::Id {
        id
    }

    /// Bounds of `id` in a coordinate space shared by the whole tree, or
    /// `None` when they cannot be obtained.
    fn bounds(&self, id: Self::Id, ignore_clipping: bool) -> Option<Rect>;

    /// Whether `id`, occupying `bounds`, is covered by another surface.
    fn hit_test_occluded(&self, id: Self::Id, bounds: Rect) -> Result<bool, HitTestError> {
        let _ = (id, bounds);
        Ok(false)
    }

    /// Whether `id` scrolls its content.
    fn is_scroller(&self, id: Self::Id) -> bool {
        let _ = id;
        false
    }

    /// Axes along which the scroller `id` can currently scroll.
    fn scrollability(&self, id: Self::Id) -> Scrollability {
        let _ = id;
        Scrollability::default()
    }

    /// Explicit next-focus target of `id` for the logical `direction`.
    ///
    /// The navigator mirrors Left/Right for right-to-left elements before
    /// calling this.
    fn directional_override(&self, id: Self::Id, direction: Direction) -> Option<Self::Id> {
        let _ = (id, direction);
        None
    }

    /// The per-direction strategy stored on `id`, or `None` when `id` is not
    /// an element kind that carries one.
    ///
    /// The navigator mirrors Left/Right for right-to-left elements before
    /// calling this.
    fn strategy_preference(&self, id: Self::Id, direction: Direction) -> Option<StrategyPreference> {
        let _ = (id, direction);
        Some(StrategyPreference::Auto)
    }

    /// Whether `id` lays out its content right to left.
    fn is_right_to_left(&self, id: Self::Id) -> bool {
        let _ = id;
        false
    }

    /// Engagement state of `id`.
    fn engagement(&self, id: Self::Id) -> Engagement {
        let _ = id;
        Engagement::default()
    }

    /// Roots of popups opened while `id` is engaged.
    fn engaged_popups(&self, id: Self::Id) -> &[Self::Id] {
        let _ = id;
        &[]
    }
}

/// Bounds of `id`, resolved through its layout target.
///
/// Non-finite rectangles are treated as unavailable.
pub(crate) fn element_bounds<T: FocusTree + ?Sized>(
    tree: &T,
    id: T::Id,
    ignore_clipping: bool,
) -> Option<Rect> {
    tree.bounds(tree.layout_target(id), ignore_clipping)
        .filter(|r| r.is_finite())
}

/// Whether `ancestor` is `node` or one of its ancestors.
pub fn is_ancestor_of<T: FocusTree + ?Sized>(tree: &T, ancestor: T::Id, node: T::Id) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = tree.parent(id);
    }
    false
}

/// Nearest strict ancestor of `id` that is a scroller able to scroll along
/// the axis of `direction`.
pub fn active_scroller<T: FocusTree + ?Sized>(
    tree: &T,
    id: T::Id,
    direction: Direction,
) -> Option<T::Id> {
    let mut current = tree.parent(id);
    while let Some(candidate) = current {
        if tree.is_scroller(candidate) && tree.scrollability(candidate).allows(direction) {
            return Some(candidate);
        }
        current = tree.parent(candidate);
    }
    None
}

/// Nearest strict ancestor of `id` that is a scroller of any kind.
pub(crate) fn nearest_scroller<T: FocusTree + ?Sized>(tree: &T, id: T::Id) -> Option<T::Id> {
    let mut current = tree.parent(id);
    while let Some(candidate) = current {
        if tree.is_scroller(candidate) {
            return Some(candidate);
        }
        current = tree.parent(candidate);
    }
    None
}
