// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Directional Focus: arrow-key (XY) focus navigation.
//!
//! Given the currently focused element and a cardinal direction, this crate
//! picks the element focus should move to. It works against any element tree
//! that implements the read-only [`FocusTree`] trait, and combines:
//!
//! - **Explicit overrides**: an element may name its target for a direction.
//!   Overrides on ancestors act as fallbacks when the geometric winner would
//!   leave their subtree (see [`try_bubble`]).
//! - **Candidate collection** ([`collect_candidates`]): a pre-order walk that
//!   honors focusability, pruned subtrees, engagement, and scroll viewports.
//! - **Scoring**: one of three [`NavigationStrategy`] values, resolved per
//!   element and direction through ancestor inheritance
//!   ([`resolve_strategy`]). The default, projection, weighs distance along
//!   both axes, overlap with the reference element, and overlap with the
//!   persisted [`Manifolds`].
//! - **Occlusion** ([`is_occluded`]): covered candidates are skipped.
//! - **A failure cache** ([`FailureCache`]) so repeated fruitless queries
//!   are answered without a search.
//!
//! [`DirectionalNavigator`] ties these together and owns the state that lives
//! between queries.
//!
//! ## Minimal example
//!
//! A 3×3 grid of 100×100 cells, built with the bundled [`arena::FocusArena`]:
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_directional_focus::arena::{ArenaNode, FocusArena};
//! use understory_directional_focus::{Direction, DirectionalNavigator, QueryOptions};
//!
//! let mut tree = FocusArena::new();
//! let root = tree.insert(None, ArenaNode::container(Rect::new(0.0, 0.0, 300.0, 300.0)));
//! let mut cells = Vec::new();
//! for row in 0..3 {
//!     for col in 0..3 {
//!         let (x, y) = (f64::from(col) * 100.0, f64::from(row) * 100.0);
//!         let rect = Rect::new(x, y, x + 100.0, y + 100.0);
//!         cells.push(tree.insert(Some(root), ArenaNode::focusable(rect)));
//!     }
//! }
//! let cell = |col: usize, row: usize| cells[row * 3 + col];
//!
//! let mut nav = DirectionalNavigator::new();
//! let opts = QueryOptions::default();
//! assert_eq!(nav.navigate(&tree, cell(0, 0), Direction::Right, None, &opts), Some(cell(1, 0)));
//! assert_eq!(nav.navigate(&tree, cell(1, 0), Direction::Down, None, &opts), Some(cell(1, 1)));
//! assert_eq!(nav.navigate(&tree, cell(0, 1), Direction::Left, None, &opts), None);
//! ```
//!
//! ## Session state
//!
//! The navigator remembers two things between calls:
//!
//! - the **manifolds**, which keep repeated moves along one axis aligned with
//!   where they started. Call [`DirectionalNavigator::reset_manifolds`] when
//!   focus moves by other means.
//! - the **failure cache**. Call [`DirectionalNavigator::clear_cache`] after
//!   layout or any change to visibility, focusability, or structure.
//!
//! ## Diagnostics
//!
//! Queries emit [`tracing`] events: `trace` for intermediate steps, `debug`
//! for each result, and `warn` when a hit test fails. The crate installs no
//! subscriber.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and `tracing`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod arena;
mod cache;
mod collect;
mod manifold;
mod navigator;
mod occlusion;
mod overrides;
mod score;
mod strategy;
mod tree;
mod types;

pub use cache::{FailureCache, QueryKey};
pub use collect::collect_candidates;
pub use manifold::{ManifoldTracker, Manifolds, Span};
pub use navigator::DirectionalNavigator;
pub use occlusion::is_occluded;
pub use overrides::{direction_override, override_root, try_bubble};
pub use score::{
    ProjectionWeights, in_cone, max_directional_distance, percent_in_shadow,
    primary_axis_distance, proximity_score, secondary_axis_distance,
};
pub use strategy::resolve_strategy;
pub use tree::{Engagement, FocusTree, HitTestError, Scrollability, active_scroller, is_ancestor_of};
pub use types::{
    Candidate, Direction, NavigationStrategy, NavigationStrategyOverride, OptionsFingerprint,
    QueryFlags, QueryOptions, StrategyPreference,
};
