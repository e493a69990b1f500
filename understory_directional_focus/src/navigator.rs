// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The directional navigator: one query from start to finish.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::hash::Hash;

use kurbo::Rect;

use crate::cache::{FailureCache, QueryKey};
use crate::collect::collect_candidates;
use crate::manifold::{ManifoldTracker, Manifolds};
use crate::occlusion::is_occluded;
use crate::overrides::{direction_override, try_bubble};
use crate::score::{
    ProjectionWeights, encloses, excluded, in_cone, max_directional_distance, proximity_score,
};
use crate::strategy::resolve_strategy;
use crate::tree::{FocusTree, active_scroller, element_bounds};
use crate::types::{Candidate, Direction, NavigationStrategy, QueryFlags, QueryOptions};

/// Directional focus navigator.
///
/// Owns the state that persists between queries of one focus session: the
/// projection weights, the [`Manifolds`], and the [`FailureCache`]. The tree
/// itself is only borrowed for the duration of [`navigate`](Self::navigate).
///
/// Hosts are expected to:
/// - call [`clear_cache`](Self::clear_cache) after layout or any change to
///   the tree's structure, visibility, or focusability;
/// - call [`reset_manifolds`](Self::reset_manifolds) when focus moves by
///   other means (pointer, Tab, programmatic focus).
#[derive(Clone, Debug)]
pub struct DirectionalNavigator<K> {
    weights: ProjectionWeights,
    manifolds: ManifoldTracker,
    cache: FailureCache<K>,
    candidates: Vec<Candidate<K>>,
}

impl<K> Default for DirectionalNavigator<K> {
    fn default() -> Self {
        Self {
            weights: ProjectionWeights::default(),
            manifolds: ManifoldTracker::default(),
            cache: FailureCache::default(),
            candidates: Vec::new(),
        }
    }
}

impl<K> DirectionalNavigator<K>
where
    K: Copy + Eq + Hash + core::fmt::Debug,
{
    /// Create a navigator with default weights and no persisted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator with the given projection weights.
    pub fn with_weights(weights: ProjectionWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    /// Find the element focus should move to from `current` in `direction`.
    ///
    /// `engaged` is the currently engaged container, if any; the search is
    /// then confined to it and to the popups it opened.
    ///
    /// Returns `None` when nothing lies in that direction. The result is
    /// never `current` and never outside `options.search_root`.
    pub fn navigate<T>(
        &mut self,
        tree: &T,
        current: K,
        direction: Direction,
        engaged: Option<K>,
        options: &QueryOptions<K>,
    ) -> Option<K>
    where
        T: FocusTree<Id = K> + ?Sized,
    {
        if !direction.is_spatial() {
            return None;
        }
        if options
            .flags
            .contains(QueryFlags::UPDATE_MANIFOLDS_FROM_FOCUS_HINT)
            && let Some(hint) = options.focus_hint
        {
            self.manifolds.set(Manifolds::from_rect(hint));
        }

        let key = QueryKey::new(direction, current, engaged, options);
        if self.cache.contains(&key) {
            tracing::trace!(?direction, element = ?current, "failure cache hit");
            return None;
        }

        if let Some(target) =
            direction_override(tree, current, options.search_root, direction, true)
        {
            tracing::trace!(?direction, ?target, "explicit override");
            return Some(target);
        }

        let winner = self.search(tree, current, direction, engaged, options);
        let result = try_bubble(tree, current, winner, options.search_root, direction);

        tracing::debug!(?direction, element = ?current, ?result, "directional navigation");
        if result.is_none() {
            self.cache.insert(key);
        }
        result
    }

    /// Geometric search: collect, score, rank, and pick the best candidate.
    fn search<T>(
        &mut self,
        tree: &T,
        current: K,
        direction: Direction,
        engaged: Option<K>,
        options: &QueryOptions<K>,
    ) -> Option<K>
    where
        T: FocusTree<Id = K> + ?Sized,
    {
        let flags = options.flags;
        let ignore_clipping = flags.contains(QueryFlags::IGNORE_CLIPPING);
        let scroller = active_scroller(tree, current, direction);

        let reference = options
            .focus_hint
            .or(options.focused_bounds)
            .or_else(|| element_bounds(tree, current, ignore_clipping))?;

        let scope = options.search_root.unwrap_or_else(|| tree.root());
        let root_bounds = engaged
            .or(options.search_root)
            .and_then(|id| element_bounds(tree, id, ignore_clipping))
            .or_else(|| element_bounds(tree, scope, ignore_clipping))
            .unwrap_or(Rect::ZERO);

        let mut candidates = core::mem::take(&mut self.candidates);
        candidates.clear();
        let directional_only = flags.contains(QueryFlags::DIRECTIONAL_REGIONS_ONLY);
        match engaged {
            Some(container) => {
                collect_candidates(
                    tree,
                    container,
                    current,
                    scroller,
                    ignore_clipping,
                    directional_only,
                    &mut candidates,
                );
                for &popup in tree.engaged_popups(container) {
                    collect_candidates(
                        tree,
                        popup,
                        current,
                        scroller,
                        ignore_clipping,
                        directional_only,
                        &mut candidates,
                    );
                }
                if container != current
                    && let Some(bounds) = element_bounds(tree, container, ignore_clipping)
                {
                    candidates.push(Candidate::new(container, bounds));
                }
            }
            None => collect_candidates(
                tree,
                scope,
                current,
                scroller,
                ignore_clipping,
                directional_only,
                &mut candidates,
            ),
        }
        tracing::trace!(count = candidates.len(), "collected candidates");

        let winner = if candidates.is_empty() {
            None
        } else {
            self.rank(tree, current, direction, reference, root_bounds, options, &mut candidates)
        };

        if let Some((_, bounds)) = winner
            && flags.contains(QueryFlags::UPDATE_MANIFOLD)
        {
            self.manifolds.update(direction, reference, bounds);
        }
        self.candidates = candidates;
        winner.map(|(id, _)| id)
    }

    /// Score and sort `candidates`, returning the first acceptable one.
    fn rank<T>(
        &self,
        tree: &T,
        current: K,
        direction: Direction,
        reference: Rect,
        root_bounds: Rect,
        options: &QueryOptions<K>,
        candidates: &mut [Candidate<K>],
    ) -> Option<(K, Rect)>
    where
        T: FocusTree<Id = K> + ?Sized,
    {
        let flags = options.flags;
        let max_distance = candidates
            .iter()
            .map(|c| max_directional_distance(direction, reference, c.bounds))
            .fold(root_bounds.width().max(root_bounds.height()), f64::max);
        if max_distance <= 0.0 {
            return None;
        }

        let strategy = resolve_strategy(tree, current, direction, options.strategy_override);
        tracing::trace!(?strategy, max_distance, "scoring candidates");
        let manifolds = self.manifolds.get();
        let check_cone = !flags.contains(QueryFlags::IGNORE_CONE);

        for candidate in candidates.iter_mut() {
            if encloses(candidate.bounds, reference)
                || options
                    .exclusion
                    .is_some_and(|exclusion| excluded(exclusion, candidate.bounds))
            {
                continue;
            }
            candidate.score = match strategy {
                NavigationStrategy::Projection => {
                    if check_cone && !in_cone(direction, reference, candidate.bounds, max_distance) {
                        continue;
                    }
                    self.weights
                        .score(direction, reference, candidate.bounds, &manifolds, max_distance)
                }
                NavigationStrategy::NavigationDirectionDistance => {
                    proximity_score(direction, reference, candidate.bounds, max_distance, false)
                }
                NavigationStrategy::RectilinearDistance => {
                    proximity_score(direction, reference, candidate.bounds, max_distance, true)
                }
            };
        }

        let right_to_left = tree.is_right_to_left(current);
        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| cross_axis_order(direction, right_to_left, a.bounds, b.bounds))
        });

        let ignore_occlusion = flags.contains(QueryFlags::IGNORE_OCCLUSIVITY);
        candidates
            .iter()
            .take_while(|c| c.score > 0.0)
            .find(|c| ignore_occlusion || c.scroll_participant || !is_occluded(tree, c.id, c.bounds))
            .map(|c| (c.id, c.bounds))
    }

    /// Current manifolds.
    pub fn manifolds(&self) -> Manifolds {
        self.manifolds.get()
    }

    /// Return the current manifolds and clear them.
    pub fn reset_manifolds(&mut self) -> Manifolds {
        self.manifolds.reset()
    }

    /// Replace the current manifolds.
    pub fn set_manifolds(&mut self, manifolds: Manifolds) {
        self.manifolds.set(manifolds);
    }

    /// Forget every cached failure.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// The failure cache, for inspection.
    pub fn cache(&self) -> &FailureCache<K> {
        &self.cache
    }

    /// Current projection weights.
    pub fn weights(&self) -> ProjectionWeights {
        self.weights
    }

    /// Replace all projection weights.
    pub fn set_weights(&mut self, weights: ProjectionWeights) {
        self.weights = weights;
    }

    /// Set the weight of closeness along the direction of movement.
    pub fn set_primary_axis_distance_weight(&mut self, weight: u32) {
        self.weights.primary_axis_distance = weight;
    }

    /// Set the weight of closeness along the cross axis.
    pub fn set_secondary_axis_distance_weight(&mut self, weight: u32) {
        self.weights.secondary_axis_distance = weight;
    }

    /// Set the weight of alignment with the current manifold.
    pub fn set_percent_in_manifold_shadow_weight(&mut self, weight: u32) {
        self.weights.percent_in_manifold_shadow = weight;
    }

    /// Set the weight of alignment with the reference element.
    pub fn set_percent_in_shadow_weight(&mut self, weight: u32) {
        self.weights.percent_in_shadow = weight;
    }
}

/// Tie-break for equally scored candidates: leading cross-axis edge first.
///
/// Horizontal moves prefer the topmost candidate. Vertical moves prefer the
/// leftmost one, or the rightmost one in right-to-left flow.
fn cross_axis_order(direction: Direction, right_to_left: bool, a: Rect, b: Rect) -> Ordering {
    if direction.is_horizontal() {
        a.y0.total_cmp(&b.y0)
    } else if right_to_left {
        b.x1.total_cmp(&a.x1)
    } else {
        a.x0.total_cmp(&b.x0)
    }
}
